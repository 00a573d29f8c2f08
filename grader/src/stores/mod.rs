//! # Result Stores
//!
//! Implementations of [`ResultStore`](crate::traits::store::ResultStore).
//!
//! - [`memory_store`]: keeps results in memory; for tests and for callers that batch
//!   their own writes.

pub mod memory_store;
