//! Whitespace normalization applied to program output before comparison.
//!
//! Two stages: the captured output is trimmed of leading/trailing whitespace
//! as a whole, then both sides lose only their trailing CR/LF right before
//! the equality check. Trailing spaces on intermediate lines survive.

const OUTER: &[char] = &[' ', '\t', '\r', '\n'];
const NEWLINES: &[char] = &['\r', '\n'];

pub fn trim_outer(s: &str) -> &str {
    s.trim_matches(OUTER)
}

pub fn trim_trailing_newlines(s: &str) -> &str {
    s.trim_end_matches(NEWLINES)
}

pub fn normalize(s: &str) -> &str {
    trim_trailing_newlines(trim_outer(s))
}

/// Compares a captured output blob against the expected text.
/// The captured side gets the full two-stage trim; the expected side only
/// loses its trailing newlines.
pub fn outputs_match(actual: &str, expected: &str) -> bool {
    normalize(actual) == trim_trailing_newlines(expected)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        for s in ["", "10\n", "  a b \r\n", "x\n\ny\n", "\t 1 2 \t\r\n\n"] {
            let once = normalize(s);
            assert_eq!(normalize(once), once);
        }
    }

    #[test]
    fn missing_final_newline_is_forgiven() {
        assert!(outputs_match("10", "10\n"));
        assert!(outputs_match("10\n", "10"));
    }

    #[test]
    fn trailing_space_before_final_newline_is_forgiven() {
        // The outer trim eats the space, not just the newline.
        assert!(outputs_match("10 \n", "10\n"));
    }

    #[test]
    fn leading_whitespace_on_captured_side_is_forgiven() {
        assert!(outputs_match("\n  10\n", "10\n"));
    }

    #[test]
    fn interior_trailing_spaces_are_not_forgiven() {
        assert!(!outputs_match("Yes \nNo\n", "Yes\nNo\n"));
        assert!(outputs_match("Yes\nNo \n", "Yes\nNo\n")); // last line: outer trim applies
    }

    #[test]
    fn differing_content_is_rejected() {
        assert!(!outputs_match("10", "11\n"));
        assert!(!outputs_match("", "10\n"));
    }

    #[test]
    fn crlf_line_endings_on_last_line_are_forgiven() {
        assert!(outputs_match("10\r\n", "10\n"));
        assert!(outputs_match("10", "10\r\n"));
    }
}
