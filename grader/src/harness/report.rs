//! The report side channel written by generated harness code.
//!
//! Each generated test writes one line per run through a sink expression
//! (for example `@@f` in Ruby): `1,,<id>` when the check held, `0,"<feedback>",<id>`
//! when it did not. Downstream tooling reads these lines back with [`ReportLine::parse`].

use std::fmt;

/// The expression generated code writes report lines through.
///
/// Passed explicitly to [`HarnessRenderer::render_with_channel`](super::HarnessRenderer::render_with_channel);
/// when omitted each template falls back to its own default sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportChannel {
    pub sink: String,
}

impl ReportChannel {
    pub fn new(sink: impl Into<String>) -> Self {
        Self { sink: sink.into() }
    }
}

/// One line on the report side channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub pass: bool,
    pub feedback: Option<String>,
    pub test_case_id: i64,
}

impl ReportLine {
    pub fn passed(test_case_id: i64) -> Self {
        Self {
            pass: true,
            feedback: None,
            test_case_id,
        }
    }

    pub fn failed(test_case_id: i64, feedback: impl Into<String>) -> Self {
        Self {
            pass: false,
            feedback: Some(feedback.into()),
            test_case_id,
        }
    }

    /// Reads a line in either form. The feedback may itself contain commas since
    /// only the first and last separators are significant.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (flag, rest) = line.split_once(',')?;
        let (feedback, id) = rest.rsplit_once(',')?;

        let pass = match flag.trim() {
            "1" => true,
            "0" => false,
            _ => return None,
        };
        let test_case_id = id.trim().parse().ok()?;
        let feedback = feedback
            .strip_prefix('"')
            .and_then(|f| f.strip_suffix('"'))
            .unwrap_or(feedback);

        Some(Self {
            pass,
            feedback: (!feedback.is_empty()).then(|| feedback.to_string()),
            test_case_id,
        })
    }

    /// The line escaped for embedding inside a double-quoted string literal in
    /// generated code.
    pub fn as_string_literal_body(&self) -> String {
        self.to_string().replace('\\', "\\\\").replace('"', "\\\"")
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pass {
            write!(f, "1,,{}", self.test_case_id)
        } else {
            write!(
                f,
                "0,\"{}\",{}",
                self.feedback.as_deref().unwrap_or(""),
                self.test_case_id
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ReportLine::passed(12).to_string(), "1,,12");
        assert_eq!(
            ReportLine::failed(12, "Check the base case").to_string(),
            "0,\"Check the base case\",12"
        );
        assert_eq!(ReportLine::failed(3, "").to_string(), "0,\"\",3");
    }

    #[test]
    fn test_string_literal_body_escapes_quotes() {
        assert_eq!(
            ReportLine::failed(4, "say \"hi\"").as_string_literal_body(),
            r#"0,\"say \"hi\"\",4"#
        );
        assert_eq!(ReportLine::failed(4, "x").as_string_literal_body(), r#"0,\"x\",4"#);
        assert_eq!(ReportLine::passed(4).as_string_literal_body(), "1,,4");
        assert_eq!(
            ReportLine::failed(5, r"C:\tmp").as_string_literal_body(),
            r#"0,\"C:\\tmp\",5"#
        );
    }

    #[test]
    fn test_parse_pass_and_fail() {
        assert_eq!(ReportLine::parse("1,,7\n"), Some(ReportLine::passed(7)));
        assert_eq!(
            ReportLine::parse("0,\"Off by one, again\",7"),
            Some(ReportLine::failed(7, "Off by one, again"))
        );
        assert_eq!(
            ReportLine::parse("0,\"\",7"),
            Some(ReportLine {
                pass: false,
                feedback: None,
                test_case_id: 7
            })
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(ReportLine::parse(""), None);
        assert_eq!(ReportLine::parse("1,7"), None);
        assert_eq!(ReportLine::parse("2,,7"), None);
        assert_eq!(ReportLine::parse("1,,seven"), None);
    }
}
