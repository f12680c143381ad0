//! Error types for taxonomy validation and parsing.

use thiserror::Error;

/// Errors returned while constructing taxonomy values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxonomyDomainError {
    /// The category or sub-category name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// The name exceeds the 100-character storage limit.
    #[error("name exceeds 100 character limit: {0}")]
    NameTooLong(String),
}

/// Error returned while parsing a pillar from user input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown pillar: {0}")]
pub struct ParsePillarError(pub String);
