//! Compartmented bulk storage: a fixed total capacity split on demand into
//! equal compartments, one per commodity category.

pub mod config;
pub mod storage;

pub use storage::{CompartmentedStorage, StorageError};
