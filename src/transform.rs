//! Entry classification and the pure per-line transforms.
//!
//! Entries are classified by filename pattern into a [`Category`] which
//! selects the transform applied to every line of their content. The
//! transforms are deterministic, infallible `&str -> String` functions with
//! no I/O; everything stateful lives in the pipeline around them.

/// The shift added to every integer token on the [`Category::Integers`] path.
///
/// Arithmetic is done in 128 bits so the shift cannot overflow for any
/// representable `i64` token.
pub const INTEGER_SHIFT: i128 = 123;

/// Which transform applies to an entry, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Lines of space-separated tokens; integer tokens are shifted.
    Integers,
    /// Lines of space-separated tokens; each token is reversed with its
    /// letter case inverted.
    Strings,
    /// No transform; the entry is copied verbatim.
    Other,
}

impl Category {
    /// Classifies an entry by name.
    ///
    /// Matching is an exact, case-sensitive substring check: names containing
    /// `_integers_` select [`Category::Integers`], otherwise names containing
    /// `_strings_` select [`Category::Strings`], otherwise the entry is
    /// [`Category::Other`]. A name containing both markers is classified as
    /// `Integers`.
    pub fn for_name(name: &str) -> Self {
        if name.contains("_integers_") {
            Self::Integers
        } else if name.contains("_strings_") {
            Self::Strings
        } else {
            Self::Other
        }
    }

    /// Returns true if this category rewrites entry content.
    pub fn is_transforming(self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Applies this category's transform to one line (without terminator).
    pub fn apply(self, line: &str) -> String {
        match self {
            Self::Integers => shift_integers(line),
            Self::Strings => reverse_invert(line),
            Self::Other => line.to_string(),
        }
    }
}

/// Shifts every integer token of a line by [`INTEGER_SHIFT`].
///
/// The line is split on single spaces (consecutive spaces produce empty
/// tokens, which are preserved). Tokens that parse as base-10 signed 64-bit
/// integers are replaced by the decimal text of `value + 123`; all other
/// tokens pass through unchanged.
pub fn shift_integers(line: &str) -> String {
    line.split(' ')
        .map(|token| match token.parse::<i64>() {
            Ok(value) => (i128::from(value) + INTEGER_SHIFT).to_string(),
            Err(_) => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reverses every token of a line and inverts the case of its letters.
///
/// Operates on Unicode code points, never on raw bytes, so multi-byte
/// characters are repositioned intact. Case inversion uses only
/// single-code-point mappings (a letter whose case mapping would expand,
/// like `ß`, is left as-is), which keeps every token the same length in
/// code points.
pub fn reverse_invert(line: &str) -> String {
    line.split(' ')
        .map(|token| token.chars().rev().map(flip_case).collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

fn flip_case(ch: char) -> char {
    if ch.is_lowercase() {
        single_char(ch.to_uppercase()).unwrap_or(ch)
    } else if ch.is_uppercase() {
        single_char(ch.to_lowercase()).unwrap_or(ch)
    } else {
        ch
    }
}

fn single_char(mut chars: impl Iterator<Item = char>) -> Option<char> {
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_substring() {
        assert_eq!(Category::for_name("data_integers_01.txt"), Category::Integers);
        assert_eq!(Category::for_name("data_strings_01.txt"), Category::Strings);
        assert_eq!(Category::for_name("plain.txt"), Category::Other);
        assert_eq!(Category::for_name("nested/dir/x_integers_.log"), Category::Integers);
        // Integers marker wins when both are present.
        assert_eq!(
            Category::for_name("a_integers_b_strings_c"),
            Category::Integers
        );
        // Case-sensitive match.
        assert_eq!(Category::for_name("DATA_INTEGERS_01"), Category::Other);
    }

    #[test]
    fn shifts_integer_tokens() {
        assert_eq!(shift_integers("321 test -100"), "444 test 23");
        assert_eq!(shift_integers("0"), "123");
        assert_eq!(shift_integers("-123"), "0");
        assert_eq!(shift_integers("+5"), "128");
    }

    #[test]
    fn keeps_non_integer_tokens() {
        assert_eq!(shift_integers("12.5 0x10 ten"), "12.5 0x10 ten");
        assert_eq!(shift_integers(""), "");
        // Consecutive spaces are empty tokens and survive the round trip.
        assert_eq!(shift_integers("1  2"), "124  125");
    }

    #[test]
    fn shifts_extreme_integers_without_overflow() {
        let max = i64::MAX.to_string();
        let expected = (i128::from(i64::MAX) + 123).to_string();
        assert_eq!(shift_integers(&max), expected);
        // Out-of-range tokens fail to parse and pass through unchanged.
        let too_big = "9223372036854775808";
        assert_eq!(shift_integers(too_big), too_big);
    }

    #[test]
    fn reverses_and_inverts_case() {
        assert_eq!(reverse_invert("ollEh 語本日Ű⌘ÉH"), "HeLLO hé⌘ű日本語");
        assert_eq!(reverse_invert("abc"), "CBA");
        assert_eq!(reverse_invert(""), "");
        assert_eq!(reverse_invert("a  b"), "A  B");
    }

    #[test]
    fn repositions_symbols_without_case_change() {
        assert_eq!(reverse_invert("a-b!"), "!B-A");
        assert_eq!(reverse_invert("123"), "321");
    }

    #[test]
    fn preserves_code_point_length() {
        for token in ["straße", "ǅungla", "ÅÉÎŐŰ"] {
            let out = reverse_invert(token);
            assert_eq!(out.chars().count(), token.chars().count(), "token {token:?}");
        }
    }

    #[test]
    fn other_category_is_identity() {
        let line = "  mixed 42 CONTENT  ";
        assert_eq!(Category::Other.apply(line), line);
    }
}
