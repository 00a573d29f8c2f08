//! # Grader Library
//!
//! This crate grades a student's answer to a coding prompt against individual test
//! cases, and renders test cases into harness code for external runners.
//!
//! ## Key Concepts
//! - **Grader**: dispatches a [`TestCase`] to the check its mode calls for and persists
//!   the verdict through a [`ResultStore`].
//! - **Static checks** ([`static_check`]): pattern rules over the comment-free source,
//!   no execution involved. Screening cases gate submissions and never store a result.
//! - **Dynamic checks** ([`interpreter`]): interpretation of the fixed-shape record an
//!   external runner reports after executing the generated harness.
//! - **Harness rendering** ([`harness`]): per-language templates that turn a test case
//!   into runnable test source.
//!
//! The three parts share only the data types in [`types`]; each can be used on its own.

pub mod error;
pub mod harness;
pub mod interpreter;
pub mod static_check;
pub mod stores;
pub mod test_case;
pub mod traits;
pub mod types;
pub mod utilities;

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::error::Result;
use crate::static_check::StaticRule;
use crate::traits::comment_stripper::{CStyleComments, CommentStripper};
use crate::traits::store::ResultStore;
use crate::types::{GradingResult, StaticOutcome, Submission, TestCase};

/// Grades submissions against test cases, persisting verdicts through `S`.
///
/// # Fields
/// - `store`: where graded results go.
/// - `stripper`: removes comments when a submission arrives without pre-stripped code.
pub struct Grader<S: ResultStore> {
    store: S,
    stripper: Box<dyn CommentStripper>,
}

impl<S: ResultStore> Grader<S> {
    /// Create a grader that strips C-style comments.
    pub fn new(store: S) -> Self {
        Self {
            store,
            stripper: Box::new(CStyleComments),
        }
    }

    /// Set the comment stripper used for submissions without pre-stripped code.
    pub fn with_stripper<C: CommentStripper + 'static>(mut self, stripper: C) -> Self {
        self.stripper = Box::new(stripper);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run a test case's static rule against a submission.
    ///
    /// # Returns
    /// * `NotApplicable` for dynamic test cases.
    /// * `Screened(Some(feedback))` / `Screened(None)` for screening cases; nothing is stored.
    /// * `Graded(result)` otherwise, after the result has been saved.
    ///
    /// # Errors
    /// * `Configuration` when the rule cannot be compiled.
    /// * `Storage` when the store rejects the result.
    pub fn check_static(
        &self,
        test_case: &TestCase,
        submission: &Submission,
    ) -> Result<StaticOutcome> {
        if !test_case.is_static {
            return Ok(StaticOutcome::NotApplicable);
        }

        let rule = StaticRule::compile(test_case)?;
        let code: Cow<'_, str> = match &submission.comment_free {
            Some(code) => Cow::Borrowed(code),
            None => Cow::Owned(self.stripper.strip_comments(&submission.source)),
        };
        let verdict = rule.evaluate(&code);

        if test_case.screening {
            debug!(
                test_case_id = test_case.id,
                satisfied = verdict.satisfied,
                "Screening check evaluated"
            );
            return Ok(StaticOutcome::Screened(verdict.feedback));
        }

        let mut result = GradingResult::new(test_case, submission, verdict.satisfied);
        result.feedback = verdict.feedback;
        self.save(&result)?;
        Ok(StaticOutcome::Graded(result))
    }

    /// Interpret a runner record for a dynamic test case, save the result and return
    /// the score it contributes: the case's weight on a pass, `0.0` otherwise.
    ///
    /// # Errors
    /// * `Storage` when the store rejects the result.
    pub fn record_result<F: AsRef<str>>(
        &self,
        test_case: &TestCase,
        submission: &Submission,
        fields: &[F],
    ) -> Result<f64> {
        let result = interpreter::interpret(test_case, submission, fields);
        self.save(&result)?;
        Ok(interpreter::score_contribution(test_case, &result))
    }

    fn save(&self, result: &GradingResult) -> Result<()> {
        debug!(
            test_case_id = result.test_case_id,
            answer_id = result.answer_id,
            pass = result.pass,
            "Saving grading result"
        );
        self.store.save(result).inspect_err(|e| {
            warn!(
                test_case_id = result.test_case_id,
                answer_id = result.answer_id,
                error = %e,
                "Failed to save grading result"
            );
        })
    }
}
