//! Shared ambient concerns for the grading workspace: configuration, logging
//! bootstrap and the default comment strippers used by static checks.

pub mod comments;
pub mod config;
pub mod logging;
