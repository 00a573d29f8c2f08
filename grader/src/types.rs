//! # Types Module
//!
//! This module defines the core data structures shared by the grading engine: the
//! test-case configuration, the prompt that owns it, the submission being graded and
//! the result record handed to the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The coding prompt a test case belongs to. Supplies the names used in display
/// strings and generated harness code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingPrompt {
    pub id: i64,
    pub class_name: String,
    pub method_name: String,
}

/// Declarative configuration for one check against a coding prompt.
///
/// Immutable for the duration of a grading run. In dynamic mode `input` holds the
/// argument expressions passed to the method under test and `expected_output` the
/// expression its result is compared to. In static mode `input` is a rule spec
/// (see [`RuleSpec`](crate::static_check::rule_spec::RuleSpec)) and `expected_output`
/// encodes whether the rule is required or forbidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: i64,
    pub coding_prompt: CodingPrompt,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub expected_output: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub negative_feedback: Option<String>,
    /// Score credited when this case passes.
    pub weight: f64,
    /// Static-analysis mode instead of dynamic execution.
    #[serde(rename = "static", default)]
    pub is_static: bool,
    /// Pre-submission gate: feedback only, never a stored verdict.
    #[serde(default)]
    pub screening: bool,
    /// Visible to the student before submission.
    #[serde(default)]
    pub example: bool,
    /// Description suppressed in display.
    #[serde(default)]
    pub hidden: bool,
}

/// One student answer to a coding prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub user_id: i64,
    pub answer_id: i64,
    /// The submitted source text, comments included.
    pub source: String,
    /// Pre-stripped source. When absent, static checks strip `source` themselves.
    pub comment_free: Option<String>,
}

impl Submission {
    pub fn new(user_id: i64, answer_id: i64, source: impl Into<String>) -> Self {
        Self {
            user_id,
            answer_id,
            source: source.into(),
            comment_free: None,
        }
    }

    pub fn with_comment_free(mut self, code: impl Into<String>) -> Self {
        self.comment_free = Some(code.into());
        self
    }
}

/// The verdict for one test case against one submission.
///
/// Created by the engine and handed to a [`ResultStore`](crate::traits::store::ResultStore).
/// `feedback` is only ever set on failing results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingResult {
    pub test_case_id: i64,
    pub user_id: i64,
    pub answer_id: i64,
    pub pass: bool,
    pub feedback: Option<String>,
    pub graded_at: DateTime<Utc>,
}

impl GradingResult {
    pub fn new(test_case: &TestCase, submission: &Submission, pass: bool) -> Self {
        Self {
            test_case_id: test_case.id,
            user_id: submission.user_id,
            answer_id: submission.answer_id,
            pass,
            feedback: None,
            graded_at: Utc::now(),
        }
    }
}

/// What a static check produced for a test case.
#[derive(Debug, Clone, PartialEq)]
pub enum StaticOutcome {
    /// The case is dynamic; static evaluation does not apply.
    NotApplicable,
    /// Screening case: feedback when the rule is violated, `None` when satisfied.
    /// Nothing is persisted.
    Screened(Option<String>),
    /// Graded case: the persisted result.
    Graded(GradingResult),
}
