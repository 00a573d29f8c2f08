//! # Static Checks
//!
//! Grades a submission by matching its (comment-free) source text against a rule
//! compiled from the test case, without running anything.
//!
//! A [`StaticRule`] is built in one step from a [`TestCase`]: the `input` field is
//! parsed into a [`RuleSpec`], `expected_output` into a [`Requirement`], and the spec
//! is compiled into a [`Matcher`]. Any problem with the authored rule surfaces here as
//! a [`GraderError::Configuration`] instead of a rule that silently never matches.
//!
//! - [`rule_spec`]: the `keyword:` / `class:` / `method:` / `/.../` rule language.
//! - [`requirement`]: required versus forbidden polarity.

pub mod requirement;
pub mod rule_spec;

use regex::{Regex, RegexBuilder};

use crate::error::{GraderError, Result};
use crate::types::TestCase;
use crate::utilities::text::non_blank;

pub use requirement::Requirement;
pub use rule_spec::{PatternFlags, RuleSpec, rule_subject};

/// A compiled search over source text.
#[derive(Debug, Clone)]
pub enum Matcher {
    Pattern(Regex),
    /// `.name(` calls, ignoring those made on `this`.
    MethodCall(Regex),
}

impl Matcher {
    pub fn compile(spec: &RuleSpec) -> Result<Self> {
        match spec {
            RuleSpec::Keywords(names) | RuleSpec::Classes(names) => {
                let pattern = format!(r"\b(?:{})\b", alternation(names));
                Ok(Matcher::Pattern(build(&pattern, PatternFlags::default())?))
            }
            RuleSpec::Methods(names) => {
                let pattern = format!(r"\.\s*(?:{})\s*\(", alternation(names));
                Ok(Matcher::MethodCall(build(&pattern, PatternFlags::default())?))
            }
            RuleSpec::RawPattern { body, flags } => Ok(Matcher::Pattern(build(body, *flags)?)),
            RuleSpec::Literal(pattern) => {
                Ok(Matcher::Pattern(build(pattern, PatternFlags::default())?))
            }
        }
    }

    pub fn is_match(&self, code: &str) -> bool {
        match self {
            Matcher::Pattern(regex) => regex.is_match(code),
            Matcher::MethodCall(regex) => regex
                .find_iter(code)
                .any(|call| !called_on_this(&code[..call.start()])),
        }
    }
}

fn alternation(names: &[String]) -> String {
    names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|")
}

/// `^` and `$` always anchor at line boundaries, so a rule can target a single line
/// of a multi-line submission.
fn build(pattern: &str, flags: PatternFlags) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .case_insensitive(flags.ignore_case)
        .dot_matches_new_line(flags.dot_all)
        .ignore_whitespace(flags.extended)
        .build()
        .map_err(|e| GraderError::Configuration(format!("Invalid static rule pattern: {e}")))
}

/// True when the text before a `.` ends with the standalone word `this`,
/// optionally followed by whitespace.
fn called_on_this(before_dot: &str) -> bool {
    before_dot
        .trim_end()
        .strip_suffix("this")
        .is_some_and(|rest| !rest.ends_with(|c: char| c.is_alphanumeric() || c == '_'))
}

/// The outcome of checking one piece of code against a [`StaticRule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticVerdict {
    pub satisfied: bool,
    /// Present only when the rule was not satisfied.
    pub feedback: Option<String>,
}

/// A test case's static rule, ready to evaluate.
#[derive(Debug, Clone)]
pub struct StaticRule {
    spec: RuleSpec,
    requirement: Requirement,
    matcher: Matcher,
    feedback: String,
}

impl StaticRule {
    pub fn compile(test_case: &TestCase) -> Result<Self> {
        let spec = RuleSpec::parse(&test_case.input)?;
        let requirement = Requirement::parse(&test_case.expected_output);
        let matcher = Matcher::compile(&spec)?;

        let feedback = match non_blank(test_case.negative_feedback.as_deref()) {
            Some(explicit) => explicit.to_string(),
            None => {
                let modal = if requirement.required { "must" } else { "cannot" };
                format!(
                    "Answer {modal} {} {}",
                    spec.verb(),
                    rule_subject(&test_case.input)
                )
            }
        };

        Ok(StaticRule {
            spec,
            requirement,
            matcher,
            feedback,
        })
    }

    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    /// The message shown when the rule is violated.
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Required rules are satisfied by a match, forbidden rules by its absence.
    pub fn evaluate(&self, code: &str) -> StaticVerdict {
        let matched = self.matcher.is_match(code);
        let satisfied = matched == self.requirement.required;
        StaticVerdict {
            satisfied,
            feedback: (!satisfied).then(|| self.feedback.clone()),
        }
    }
}
