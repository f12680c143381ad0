//! Category and sub-category aggregates.

use super::{CategoryId, Pillar, SubCategoryId, TaxonomyDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a category name, matching the `VARCHAR(100)` column.
const MAX_NAME_LENGTH: usize = 100;

/// Validated category or sub-category name.
///
/// Names are trimmed but keep their casing; uniqueness within the parent is
/// compared case-insensitively by [`CategoryName::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Creates a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyDomainError::EmptyName`] when the value is empty
    /// after trimming or [`TaxonomyDomainError::NameTooLong`] when it exceeds
    /// 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaxonomyDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaxonomyDomainError::EmptyName);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(TaxonomyDomainError::NameTooLong(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when both names are equal ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user-defined grouping of tasks inside one pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    pillar: Pillar,
    name: CategoryName,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCategoryData {
    /// Persisted category identifier.
    pub id: CategoryId,
    /// Owning pillar.
    pub pillar: Pillar,
    /// Category name.
    pub name: CategoryName,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new category in the given pillar.
    #[must_use]
    pub fn new(pillar: Pillar, name: CategoryName, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: CategoryId::new(),
            pillar,
            name,
            description: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Sets the category description, dropping blank values.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_description(description.into());
        self
    }

    /// Reconstructs a category from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCategoryData) -> Self {
        Self {
            id: data.id,
            pillar: data.pillar,
            name: data.name,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the category identifier.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the owning pillar.
    #[must_use]
    pub const fn pillar(&self) -> Pillar {
        self.pillar
    }

    /// Returns the category name.
    #[must_use]
    pub const fn name(&self) -> &CategoryName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Renames the category.
    pub fn rename(&mut self, name: CategoryName, clock: &impl Clock) {
        self.name = name;
        self.updated_at = clock.utc();
    }

    /// Replaces the description; blank values clear it.
    pub fn describe(&mut self, description: Option<String>, clock: &impl Clock) {
        self.description = description.and_then(normalize_description);
        self.updated_at = clock.utc();
    }
}

/// A finer grouping of tasks inside one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    id: SubCategoryId,
    category_id: CategoryId,
    name: CategoryName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted sub-category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSubCategoryData {
    /// Persisted sub-category identifier.
    pub id: SubCategoryId,
    /// Parent category.
    pub category_id: CategoryId,
    /// Sub-category name.
    pub name: CategoryName,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl SubCategory {
    /// Creates a new sub-category under the given category.
    #[must_use]
    pub fn new(category_id: CategoryId, name: CategoryName, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: SubCategoryId::new(),
            category_id,
            name,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a sub-category from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSubCategoryData) -> Self {
        Self {
            id: data.id,
            category_id: data.category_id,
            name: data.name,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the sub-category identifier.
    #[must_use]
    pub const fn id(&self) -> SubCategoryId {
        self.id
    }

    /// Returns the parent category identifier.
    #[must_use]
    pub const fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Returns the sub-category name.
    #[must_use]
    pub const fn name(&self) -> &CategoryName {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn normalize_description(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
