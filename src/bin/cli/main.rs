//! CLI tool for repacking zip archives into tar archives.

mod exit_codes;

use std::path::{Path, PathBuf};

use clap::Parser;

use exit_codes::ExitCode;
use repack::{DEFAULT_MAX_LINE_LEN, PipelineOptions};

/// Repack a zip archive into a tar archive with rule-based line transforms
#[derive(Parser)]
#[command(name = "repack")]
#[command(author, version, long_about = None)]
#[command(about = "Repack a zip archive into a tar archive, transforming \
                   _integers_ and _strings_ entries line by line")]
struct Cli {
    /// The input archive file path (must end in .zip)
    #[arg(long = "input-file", short = 'i', value_name = "PATH")]
    input_file: PathBuf,

    /// The output archive file path (must end in .tar)
    #[arg(long = "output-file", short = 'o', value_name = "PATH")]
    output_file: PathBuf,

    /// Maximum decoded line length in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,

    /// Suppress the summary line
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() {
    // Set up Ctrl+C handler
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted");
        std::process::exit(exit_codes::USER_INTERRUPT);
    })
    .ok();

    let cli = Cli::parse();

    if let Err(message) = validate_paths(&cli.input_file, &cli.output_file) {
        eprintln!("Error: {message}");
        std::process::exit(exit_codes::BAD_ARGS);
    }

    let options = PipelineOptions::new().max_line_len(cli.max_line_len);
    let exit_code = match repack::process_path(&cli.input_file, &cli.output_file, options) {
        Ok(summary) => {
            if !cli.quiet {
                println!(
                    "Wrote {} entries ({} transformed, {} copied) to {}",
                    summary.entries,
                    summary.transformed,
                    summary.copied,
                    cli.output_file.display()
                );
            }
            ExitCode::Success
        }
        Err(error) => {
            eprintln!("Error: {error}");
            exit_codes::error_to_exit_code(&error)
        }
    };

    std::process::exit(exit_code.code());
}

/// Validates both archive paths before the pipeline runs.
fn validate_paths(input: &Path, output: &Path) -> Result<(), String> {
    if !has_extension(input, "zip") {
        return Err(format!(
            "input file '{}' is not a zip archive",
            input.display()
        ));
    }
    if !has_extension(output, "tar") {
        return Err(format!(
            "output file '{}' is not a tar archive",
            output.display()
        ));
    }
    Ok(())
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_extensions() {
        assert!(validate_paths(Path::new("in.zip"), Path::new("out.tar")).is_ok());
        assert!(validate_paths(Path::new("dir/archive.zip"), Path::new("./a.tar")).is_ok());
    }

    #[test]
    fn rejects_wrong_extensions() {
        assert!(validate_paths(Path::new("in.7z"), Path::new("out.tar")).is_err());
        assert!(validate_paths(Path::new("in.zip"), Path::new("out.tgz")).is_err());
        assert!(validate_paths(Path::new("in"), Path::new("out.tar")).is_err());
        // Extension matching is case-sensitive.
        assert!(validate_paths(Path::new("in.ZIP"), Path::new("out.tar")).is_err());
    }
}
