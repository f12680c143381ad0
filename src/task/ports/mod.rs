//! Port contracts for the task registry.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
