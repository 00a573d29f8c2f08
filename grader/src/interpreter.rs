//! # Execution Result Interpreter
//!
//! Turns the raw fields reported by an external test runner into a pass/fail verdict
//! and student-facing feedback.
//!
//! ## Record layout
//!
//! A record is a fixed-position sequence of exactly [`RECORD_FIELDS`] strings. Only three
//! positions are read:
//!
//! | Index | Meaning |
//! |-------|---------|
//! | 5 | fully-qualified type of the thrown exception, or empty |
//! | 6 | exception / assertion message, or empty / `"null"` |
//! | 7 | `"1"` when the test passed |
//!
//! A record of any other length is a failing verdict, never an error.
//!
//! ## Feedback
//!
//! An authored `negative_feedback` always wins. Otherwise the message is assembled from
//! the exception name and message: assertion-style exceptions are left unnamed when
//! they carry a message (the message already says what went wrong), JUnit timeout
//! messages are reworded to read naturally, and the result is capitalised.

use tracing::debug;

use crate::types::{GradingResult, Submission, TestCase};
use crate::utilities::text::{capitalize_first, is_blank, non_blank};

pub const RECORD_FIELDS: usize = 8;

const EXCEPTION_TYPE: usize = 5;
const MESSAGE: usize = 6;
const PASS_FLAG: usize = 7;

/// Exceptions a failing assertion throws. Their names add nothing for the student
/// when a message is present.
const ASSERTION_EXCEPTIONS: [&str; 4] = [
    "AssertionFailedError",
    "AssertionError",
    "ComparisonFailure",
    "ReflectionSupportError",
];

const TIMEOUT_PREFIX: &str = "test timed out";
const NULL_MESSAGE: &str = "null";

pub const DEFAULT_FEEDBACK: &str = "did not meet expectations";

/// Borrowed view over one runner record.
#[derive(Debug)]
pub struct ExecutionRecord<'a, S: AsRef<str>> {
    fields: &'a [S],
}

impl<'a, S: AsRef<str>> ExecutionRecord<'a, S> {
    pub fn new(fields: &'a [S]) -> Self {
        Self { fields }
    }

    /// Missing positions read as empty.
    fn field(&self, index: usize) -> &'a str {
        self.fields.get(index).map(|f| f.as_ref()).unwrap_or("")
    }

    pub fn is_well_formed(&self) -> bool {
        self.fields.len() == RECORD_FIELDS
    }

    pub fn passed(&self) -> bool {
        self.is_well_formed() && leading_integer(self.field(PASS_FLAG)) == 1
    }

    /// Simple name of the thrown exception, e.g. `ComparisonFailure` for
    /// `org.junit.ComparisonFailure`.
    pub fn exception_name(&self) -> Option<&'a str> {
        let raw = self.field(EXCEPTION_TYPE);
        if is_blank(raw) {
            return None;
        }
        raw.rsplit('.').next()
    }

    /// The runner's message, unless absent or the `"null"` sentinel.
    pub fn message(&self) -> Option<&'a str> {
        non_blank(Some(self.field(MESSAGE))).filter(|m| *m != NULL_MESSAGE)
    }

    /// Builds the feedback shown for a failure of this record.
    pub fn feedback(&self) -> String {
        let raw_message = self.field(MESSAGE);
        let message = self.message();
        let mut feedback = String::new();

        if let Some(name) = self.exception_name() {
            let expected_failure = ASSERTION_EXCEPTIONS.contains(&name)
                || (name == "Exception" && raw_message.starts_with(TIMEOUT_PREFIX));
            if !expected_failure || message.is_none() {
                feedback.push_str(name);
            }
        }

        if let Some(message) = message {
            if !feedback.is_empty() {
                feedback.push_str(": ");
            }
            feedback.push_str(&capitalize_first(&reword_timeout(message)));
        }

        if feedback.is_empty() {
            feedback.push_str(DEFAULT_FEEDBACK);
        }
        feedback
    }
}

/// `test timed out after 60000 milliseconds` reads as `timed out after 60 seconds`.
fn reword_timeout(message: &str) -> String {
    if !message.starts_with(TIMEOUT_PREFIX) {
        return message.to_string();
    }
    let without_test = message.strip_prefix("test ").unwrap_or(message);
    without_test.replacen("000 milli", " ", 1)
}

/// Integer value of the leading digits, ignoring leading whitespace and trailing
/// junk; `0` when there are none.
fn leading_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// Interprets a runner record for `test_case`, producing the result to persist.
///
/// Feedback is attached only to failing results: the authored `negative_feedback`
/// when present, otherwise the feedback derived from the record.
pub fn interpret<S: AsRef<str>>(
    test_case: &TestCase,
    submission: &Submission,
    fields: &[S],
) -> GradingResult {
    let record = ExecutionRecord::new(fields);
    let pass = record.passed();
    let mut result = GradingResult::new(test_case, submission, pass);

    if !record.is_well_formed() {
        debug!(
            test_case_id = test_case.id,
            fields = fields.len(),
            "Execution record has unexpected length; treating as failure"
        );
    }

    if !pass {
        let feedback = match non_blank(test_case.negative_feedback.as_deref()) {
            Some(explicit) => explicit.to_string(),
            None => record.feedback(),
        };
        result.feedback = Some(feedback);
    }
    result
}

/// Score credited for a result: the full weight on a pass, nothing otherwise.
pub fn score_contribution(test_case: &TestCase, result: &GradingResult) -> f64 {
    if result.pass { test_case.weight } else { 0.0 }
}
