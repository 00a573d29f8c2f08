//! Traits Module
//!
//! Seams between the grading engine and its collaborators.
//!
//! - [`store`]: where grading results are persisted.
//! - [`comment_stripper`]: how comments are removed from submitted source before static checks.
//!
//! Implement these traits to plug the engine into a particular database or language.

pub mod comment_stripper;
pub mod store;
