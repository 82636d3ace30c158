//! Pipeline configuration.

use crate::lines::DEFAULT_MAX_LINE_LEN;

/// Options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Maximum decoded line length in bytes for transformable entries.
    pub max_line_len: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl PipelineOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum decoded line length in bytes (minimum 1).
    pub fn max_line_len(mut self, limit: usize) -> Self {
        self.max_line_len = limit.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_eight_mebibytes() {
        assert_eq!(PipelineOptions::new().max_line_len, 8 * 1024 * 1024);
    }

    #[test]
    fn builder_clamps_to_one() {
        assert_eq!(PipelineOptions::new().max_line_len(0).max_line_len, 1);
        assert_eq!(PipelineOptions::new().max_line_len(64).max_line_len, 64);
    }
}
