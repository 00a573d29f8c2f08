//! Parsing of the static rule language written in a test case's `input` field.
//!
//! | Prefix (any case)          | Kind            |
//! |----------------------------|-----------------|
//! | `keyword:` / `keywords:`   | [`RuleSpec::Keywords`] |
//! | `class:` / `classes:`      | [`RuleSpec::Classes`]  |
//! | `method:` / `methods:`     | [`RuleSpec::Methods`]  |
//! | `/body/flags`              | [`RuleSpec::RawPattern`] |
//! | anything else              | [`RuleSpec::Literal`]  |
//!
//! Token lists may be separated by commas, whitespace or both.

use crate::error::{GraderError, Result};

/// A parsed static rule. Produced once from the authored text; evaluation never
/// re-inspects the original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSpec {
    Keywords(Vec<String>),
    Classes(Vec<String>),
    Methods(Vec<String>),
    /// `/body/flags`: a pattern with optional `i`, `m`, `x` flags.
    RawPattern { body: String, flags: PatternFlags },
    /// Unprefixed text, used as a pattern as-is.
    Literal(String),
}

/// Flags accepted after the closing `/` of a raw pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    /// `i`: case-insensitive matching.
    pub ignore_case: bool,
    /// `m`: `.` also matches newlines.
    pub dot_all: bool,
    /// `x`: whitespace and `#` comments in the pattern are ignored.
    pub extended: bool,
}

impl PatternFlags {
    fn parse(raw: &str) -> Result<Self> {
        let mut flags = PatternFlags::default();
        for flag in raw.chars() {
            match flag {
                'i' => flags.ignore_case = true,
                'm' => flags.dot_all = true,
                'x' => flags.extended = true,
                other => {
                    return Err(GraderError::Configuration(format!(
                        "Unsupported pattern flag '{other}' in /.../{raw}"
                    )));
                }
            }
        }
        Ok(flags)
    }
}

const KEYWORD_PREFIXES: [&str; 2] = ["keywords:", "keyword:"];
const CLASS_PREFIXES: [&str; 2] = ["classes:", "class:"];
const METHOD_PREFIXES: [&str; 2] = ["methods:", "method:"];

impl RuleSpec {
    pub fn parse(input: &str) -> Result<Self> {
        if let Some(rest) = strip_any_prefix(input, &KEYWORD_PREFIXES) {
            return Ok(RuleSpec::Keywords(tokens(rest, "keyword")?));
        }
        if let Some(rest) = strip_any_prefix(input, &CLASS_PREFIXES) {
            return Ok(RuleSpec::Classes(tokens(rest, "class")?));
        }
        if let Some(rest) = strip_any_prefix(input, &METHOD_PREFIXES) {
            return Ok(RuleSpec::Methods(tokens(rest, "method")?));
        }
        if let Some(rest) = input.strip_prefix('/') {
            let Some(close) = rest.rfind('/') else {
                return Err(GraderError::Configuration(format!(
                    "Pattern literal is missing its closing '/': {input}"
                )));
            };
            return Ok(RuleSpec::RawPattern {
                body: rest[..close].to_string(),
                flags: PatternFlags::parse(&rest[close + 1..])?,
            });
        }
        if input.is_empty() {
            return Err(GraderError::Configuration(
                "Static rule input is empty".to_string(),
            ));
        }
        Ok(RuleSpec::Literal(input.to_string()))
    }

    /// The verb used in synthesized feedback: raw patterns describe text the answer
    /// must "contain", every other form names something the answer must "use".
    pub fn verb(&self) -> &'static str {
        match self {
            RuleSpec::RawPattern { .. } => "contain",
            _ => "use",
        }
    }
}

/// The part of a rule that names what the answer must (or cannot) use: the token
/// list for the prefixed forms, the whole input otherwise.
pub fn rule_subject(input: &str) -> &str {
    [&KEYWORD_PREFIXES, &CLASS_PREFIXES, &METHOD_PREFIXES]
        .into_iter()
        .find_map(|prefixes| strip_any_prefix(input, prefixes))
        .map(str::trim)
        .unwrap_or(input)
}

fn strip_any_prefix<'a>(input: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|prefix| {
        input
            .get(..prefix.len())
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .map(|_| &input[prefix.len()..])
    })
}

fn tokens(list: &str, kind: &str) -> Result<Vec<String>> {
    let tokens: Vec<String> = list
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if tokens.is_empty() {
        return Err(GraderError::Configuration(format!(
            "No {kind} names listed in static rule"
        )));
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_keywords_mixed_separators() {
        assert_eq!(
            RuleSpec::parse("keywords: for, while  do").unwrap(),
            RuleSpec::Keywords(names(&["for", "while", "do"]))
        );
        assert_eq!(
            RuleSpec::parse("keyword:goto").unwrap(),
            RuleSpec::Keywords(names(&["goto"]))
        );
    }

    #[test]
    fn test_parse_prefix_is_case_insensitive() {
        assert_eq!(
            RuleSpec::parse("Classes: ArrayList,HashMap").unwrap(),
            RuleSpec::Classes(names(&["ArrayList", "HashMap"]))
        );
        assert_eq!(
            RuleSpec::parse("METHOD: size").unwrap(),
            RuleSpec::Methods(names(&["size"]))
        );
    }

    #[test]
    fn test_parse_empty_token_list_is_configuration_error() {
        for input in ["keyword:", "classes: , ,", "methods:   "] {
            assert!(
                matches!(RuleSpec::parse(input), Err(GraderError::Configuration(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_raw_pattern_with_flags() {
        assert_eq!(
            RuleSpec::parse("/for\\s*\\(/i").unwrap(),
            RuleSpec::RawPattern {
                body: "for\\s*\\(".to_string(),
                flags: PatternFlags {
                    ignore_case: true,
                    ..PatternFlags::default()
                },
            }
        );
    }

    #[test]
    fn test_parse_raw_pattern_keeps_inner_slashes() {
        assert_eq!(
            RuleSpec::parse("/a/b/").unwrap(),
            RuleSpec::RawPattern {
                body: "a/b".to_string(),
                flags: PatternFlags::default(),
            }
        );
    }

    #[test]
    fn test_parse_raw_pattern_errors() {
        assert!(RuleSpec::parse("/unterminated").is_err());
        assert!(RuleSpec::parse("/x/q").is_err());
    }

    #[test]
    fn test_parse_literal_fallback() {
        assert_eq!(
            RuleSpec::parse("System.out.println").unwrap(),
            RuleSpec::Literal("System.out.println".to_string())
        );
        // A prefix must be at the very start to count.
        assert_eq!(
            RuleSpec::parse(" keyword: for").unwrap(),
            RuleSpec::Literal(" keyword: for".to_string())
        );
        assert!(RuleSpec::parse("").is_err());
    }

    #[test]
    fn test_rule_subject() {
        assert_eq!(rule_subject("keyword: for"), "for");
        assert_eq!(rule_subject("Methods:size, get "), "size, get");
        assert_eq!(rule_subject("/for/i"), "/for/i");
        assert_eq!(rule_subject("Math.pow"), "Math.pow");
    }

    #[test]
    fn test_verb() {
        assert_eq!(RuleSpec::parse("keyword: for").unwrap().verb(), "use");
        assert_eq!(RuleSpec::parse("/for/").unwrap().verb(), "contain");
        assert_eq!(RuleSpec::parse("for").unwrap().verb(), "use");
    }
}
