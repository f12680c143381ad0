//! Repository port for category and sub-category persistence.

use crate::taxonomy::domain::{Category, CategoryId, CategoryName, Pillar, SubCategory, SubCategoryId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for taxonomy repository operations.
pub type TaxonomyRepositoryResult<T> = Result<T, TaxonomyRepositoryError>;

/// Taxonomy persistence contract.
#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    /// Stores a new category.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyRepositoryError::DuplicateCategoryName`] when the
    /// pillar already holds a category with the same name.
    async fn store_category(&self, category: &Category) -> TaxonomyRepositoryResult<()>;

    /// Persists changes to an existing category.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyRepositoryError::CategoryNotFound`] when the
    /// category does not exist or
    /// [`TaxonomyRepositoryError::DuplicateCategoryName`] when a rename
    /// collides with a sibling.
    async fn update_category(&self, category: &Category) -> TaxonomyRepositoryResult<()>;

    /// Finds a category by identifier.
    async fn find_category(&self, id: CategoryId) -> TaxonomyRepositoryResult<Option<Category>>;

    /// Lists categories ordered by pillar then name, optionally restricted to
    /// one pillar.
    async fn list_categories(&self, pillar: Option<Pillar>)
    -> TaxonomyRepositoryResult<Vec<Category>>;

    /// Stores a new sub-category.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyRepositoryError::CategoryNotFound`] when the parent
    /// category does not exist or
    /// [`TaxonomyRepositoryError::DuplicateSubCategoryName`] when the parent
    /// already holds a sub-category with the same name.
    async fn store_sub_category(&self, sub_category: &SubCategory)
    -> TaxonomyRepositoryResult<()>;

    /// Finds a sub-category by identifier.
    async fn find_sub_category(
        &self,
        id: SubCategoryId,
    ) -> TaxonomyRepositoryResult<Option<SubCategory>>;

    /// Lists the sub-categories of a category ordered by name.
    async fn list_sub_categories(
        &self,
        category_id: CategoryId,
    ) -> TaxonomyRepositoryResult<Vec<SubCategory>>;
}

/// Errors returned by taxonomy repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaxonomyRepositoryError {
    /// A category with the same name already exists in the pillar.
    #[error("category '{name}' already exists in pillar {pillar}")]
    DuplicateCategoryName {
        /// Pillar holding the existing category.
        pillar: Pillar,
        /// Conflicting name.
        name: CategoryName,
    },

    /// A sub-category with the same name already exists in the category.
    #[error("sub-category '{name}' already exists in category {category_id}")]
    DuplicateSubCategoryName {
        /// Parent category.
        category_id: CategoryId,
        /// Conflicting name.
        name: CategoryName,
    },

    /// The category was not found.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaxonomyRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
