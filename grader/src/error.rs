//! Grader Error Types
//!
//! This module defines the [`GraderError`] enum, which covers every failure the grading
//! engine can report: bad test-case configuration, persistence failures from the result
//! store, and harness rendering problems.
//!
//! Verdicts themselves are never errors. A failing submission, or an execution record
//! with the wrong number of fields, produces a failing [`GradingResult`](crate::types::GradingResult),
//! not a `GraderError`.
//!
//! # Example
//!
//! ```rust
//! use grader::error::GraderError;
//!
//! fn require_tokens(tokens: &[String]) -> Result<(), GraderError> {
//!     if tokens.is_empty() {
//!         return Err(GraderError::Configuration("no tokens listed".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

/// Represents all error types that can occur in the grading engine.
#[derive(Debug, thiserror::Error)]
pub enum GraderError {
    /// The test case cannot be compiled or rendered as configured: malformed rule
    /// spec, invalid pattern, unknown harness language, bad template, invalid weight.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The result store rejected a grading result. Never retried here.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A harness template was found but failed while rendering.
    #[error("Render error: {0}")]
    Render(String),

    /// Reading template overrides from disk failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraderError>;
