//! # Utilities
//!
//! Small helpers shared across the `grader` crate.
//!
//! - [`text`]: blank-string handling matching how test-case fields are authored.

pub mod text;
