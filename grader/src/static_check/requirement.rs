//! Whether a static rule's pattern is required or forbidden, read from `expected_output`.

use crate::utilities::text::is_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    /// The pattern must be present (`true`) or absent (`false`).
    pub required: bool,
    /// The count written in `expected_output`, when it was a plain integer.
    /// Only its sign affects `required`; no occurrence counting is done.
    pub count: Option<u64>,
}

impl Requirement {
    /// - blank, or anything containing `true` in any case: required
    /// - a plain non-negative integer `n`: required when `n > 0`
    /// - anything else: forbidden
    pub fn parse(expected_output: &str) -> Self {
        let mut required =
            is_blank(expected_output) || expected_output.to_ascii_lowercase().contains("true");
        let mut count = None;

        if !expected_output.is_empty() && expected_output.bytes().all(|b| b.is_ascii_digit()) {
            count = expected_output.parse().ok();
            // Counts too large for u64 are still positive.
            required = expected_output.bytes().any(|b| b != b'0');
        }

        Requirement { required, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_required() {
        assert!(Requirement::parse("").required);
        assert!(Requirement::parse("  ").required);
    }

    #[test]
    fn test_true_like_is_required() {
        assert!(Requirement::parse("true").required);
        assert!(Requirement::parse("TRUE").required);
        assert!(Requirement::parse("yes, true").required);
    }

    #[test]
    fn test_integer_sign_decides() {
        assert_eq!(
            Requirement::parse("0"),
            Requirement {
                required: false,
                count: Some(0)
            }
        );
        assert_eq!(
            Requirement::parse("3"),
            Requirement {
                required: true,
                count: Some(3)
            }
        );
        assert_eq!(
            Requirement::parse("000"),
            Requirement {
                required: false,
                count: Some(0)
            }
        );
        let huge = Requirement::parse("99999999999999999999999");
        assert!(huge.required);
        assert_eq!(huge.count, None);
    }

    #[test]
    fn test_other_values_are_forbidden() {
        assert!(!Requirement::parse("false").required);
        assert!(!Requirement::parse("no").required);
        assert!(!Requirement::parse("-1").required);
        assert!(!Requirement::parse(" 2").required);
    }
}
