//! Property-based tests for the line transforms.
//!
//! These verify the structural invariants of the transforms over randomly
//! generated lines: token and separator counts are preserved, integer tokens
//! obey the shift law, and the string transform preserves code-point length
//! while inverting case positionally.

use proptest::prelude::*;
use repack::Category;
use repack::transform::{reverse_invert, shift_integers};

/// Strategy for lines of 0-7 space-separated tokens, including empty tokens
/// (so consecutive-space behavior is exercised) and a spread of numeric,
/// ASCII, and multi-byte tokens.
fn line_strategy() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9_.+-]{1,8}",
        any::<i64>().prop_map(|n| n.to_string()),
        "[àéîőűΑ-Ωα-ω語本日]{1,5}",
    ];
    proptest::collection::vec(token, 0..7).prop_map(|tokens| tokens.join(" "))
}

/// The single-code-point case inversion the string transform promises.
fn expected_flip(ch: char) -> char {
    fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
    if ch.is_lowercase() {
        single(ch.to_uppercase()).unwrap_or(ch)
    } else if ch.is_uppercase() {
        single(ch.to_lowercase()).unwrap_or(ch)
    } else {
        ch
    }
}

proptest! {
    /// Both transforms preserve token count (and therefore separator count).
    #[test]
    fn token_counts_are_preserved(line in line_strategy()) {
        let tokens = line.split(' ').count();
        prop_assert_eq!(shift_integers(&line).split(' ').count(), tokens);
        prop_assert_eq!(reverse_invert(&line).split(' ').count(), tokens);
    }

    /// Integer tokens come out shifted by 123; everything else is unchanged
    /// byte-for-byte.
    #[test]
    fn integer_tokens_obey_the_shift_law(line in line_strategy()) {
        let transformed = shift_integers(&line);
        for (input, output) in line.split(' ').zip(transformed.split(' ')) {
            match input.parse::<i64>() {
                Ok(n) => prop_assert_eq!(output, (i128::from(n) + 123).to_string()),
                Err(_) => prop_assert_eq!(output, input),
            }
        }
    }

    /// The shift is uniform: applying it to a bare integer adds exactly 123.
    #[test]
    fn bare_integers_shift_by_123(n in any::<i64>()) {
        let out = shift_integers(&n.to_string());
        prop_assert_eq!(out.parse::<i128>().unwrap(), i128::from(n) + 123);
    }

    /// Each output token of the string transform has the same code-point
    /// length as its input token, and the i-th code point from the end is
    /// the case-inverted i-th code point from the start.
    #[test]
    fn string_transform_reverses_and_inverts_positionally(line in line_strategy()) {
        let transformed = reverse_invert(&line);
        for (input, output) in line.split(' ').zip(transformed.split(' ')) {
            prop_assert_eq!(output.chars().count(), input.chars().count());
            for (i, o) in input.chars().zip(output.chars().rev()) {
                prop_assert_eq!(o, expected_flip(i));
            }
        }
    }

    /// The verbatim category is the identity on any line.
    #[test]
    fn other_category_is_identity(line in line_strategy()) {
        prop_assert_eq!(Category::Other.apply(&line), line);
    }
}
