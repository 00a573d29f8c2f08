use std::sync::{Mutex, MutexGuard};

use crate::error::{GraderError, Result};
use crate::traits::store::ResultStore;
use crate::types::GradingResult;

/// Collects saved results in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    results: Mutex<Vec<GradingResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<GradingResult>>> {
        self.results
            .lock()
            .map_err(|_| GraderError::Storage("Result store lock poisoned".to_string()))
    }

    /// A copy of everything saved so far.
    pub fn results(&self) -> Vec<GradingResult> {
        self.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultStore for MemoryStore {
    fn save(&self, result: &GradingResult) -> Result<()> {
        self.lock()?.push(result.clone());
        Ok(())
    }
}
