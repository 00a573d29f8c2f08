//! Result Store Trait
//!
//! This module defines the [`ResultStore`] trait, the persistence seam for
//! [`GradingResult`]s. The engine calls `save` once per graded evaluation and never
//! for screening checks. Write discipline (transactions, ordering) belongs to the
//! implementation.
//!
//! # Example
//!
//! ```rust
//! use grader::error::{GraderError, Result};
//! use grader::traits::store::ResultStore;
//! use grader::types::GradingResult;
//!
//! struct RejectingStore;
//!
//! impl ResultStore for RejectingStore {
//!     fn save(&self, _result: &GradingResult) -> Result<()> {
//!         Err(GraderError::Storage("read-only".to_string()))
//!     }
//! }
//! ```

use crate::error::Result;
use crate::types::GradingResult;

pub trait ResultStore: Send + Sync {
    /// Persist one result.
    ///
    /// # Errors
    ///
    /// Returns [`GraderError::Storage`](crate::error::GraderError::Storage) when the
    /// result could not be written. Callers do not retry.
    fn save(&self, result: &GradingResult) -> Result<()>;
}

impl<T: ResultStore + ?Sized> ResultStore for &T {
    fn save(&self, result: &GradingResult) -> Result<()> {
        (**self).save(result)
    }
}
