//! Service layer for pillars, categories, and sub-categories.

use crate::taxonomy::{
    domain::{Category, CategoryId, CategoryName, Pillar, SubCategory, TaxonomyDomainError},
    ports::{TaxonomyRepository, TaxonomyRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryRequest {
    pillar: Pillar,
    name: String,
    description: Option<String>,
}

impl CreateCategoryRequest {
    /// Creates a request with required category fields.
    #[must_use]
    pub fn new(pillar: Pillar, name: impl Into<String>) -> Self {
        Self {
            pillar,
            name: name.into(),
            description: None,
        }
    }

    /// Sets the category description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for changing an existing category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCategoryRequest {
    name: Option<String>,
    description: Option<Option<String>>,
}

impl UpdateCategoryRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the category.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description; `None` clears it.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }
}

/// Service-level errors for taxonomy operations.
#[derive(Debug, Error)]
pub enum TaxonomyServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaxonomyDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaxonomyRepositoryError),
}

/// Result type for taxonomy service operations.
pub type TaxonomyServiceResult<T> = Result<T, TaxonomyServiceError>;

/// Taxonomy orchestration service.
#[derive(Clone)]
pub struct TaxonomyService<C>
where
    C: Clock + Send + Sync,
{
    repository: Arc<dyn TaxonomyRepository>,
    clock: Arc<C>,
}

impl<C> TaxonomyService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a new taxonomy service.
    #[must_use]
    pub fn new(repository: Arc<dyn TaxonomyRepository>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the fixed pillars in display order.
    #[must_use]
    pub const fn pillars(&self) -> [Pillar; 3] {
        Pillar::ALL
    }

    /// Creates a category inside a pillar.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyServiceError`] when the name is invalid or already
    /// used in the pillar.
    pub async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> TaxonomyServiceResult<Category> {
        let CreateCategoryRequest {
            pillar,
            name,
            description,
        } = request;

        let mut category = Category::new(pillar, CategoryName::new(name)?, &*self.clock);
        if let Some(text) = description {
            category = category.with_description(text);
        }
        self.repository.store_category(&category).await?;
        info!(category_id = %category.id(), pillar = %pillar, "category created");
        Ok(category)
    }

    /// Applies a rename and/or description change to a category.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyServiceError`] when the category is missing, the new
    /// name is invalid, or the name collides with a sibling.
    pub async fn update_category(
        &self,
        id: CategoryId,
        request: UpdateCategoryRequest,
    ) -> TaxonomyServiceResult<Category> {
        let mut category = self.find_category_or_error(id).await?;
        if let Some(name) = request.name {
            category.rename(CategoryName::new(name)?, &*self.clock);
        }
        if let Some(description) = request.description {
            category.describe(description, &*self.clock);
        }
        self.repository.update_category(&category).await?;
        Ok(category)
    }

    /// Finds a category by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyServiceError::Repository`] when lookup fails.
    pub async fn find_category(&self, id: CategoryId) -> TaxonomyServiceResult<Option<Category>> {
        Ok(self.repository.find_category(id).await?)
    }

    /// Lists categories, optionally restricted to one pillar.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyServiceError::Repository`] when lookup fails.
    pub async fn list_categories(
        &self,
        pillar: Option<Pillar>,
    ) -> TaxonomyServiceResult<Vec<Category>> {
        Ok(self.repository.list_categories(pillar).await?)
    }

    /// Creates a sub-category under an existing category.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyServiceError`] when the parent is missing, the name
    /// is invalid, or the name is already used under the parent.
    pub async fn create_sub_category(
        &self,
        category_id: CategoryId,
        name: impl Into<String>,
    ) -> TaxonomyServiceResult<SubCategory> {
        let parent = self.find_category_or_error(category_id).await?;
        let sub_category = SubCategory::new(parent.id(), CategoryName::new(name)?, &*self.clock);
        self.repository.store_sub_category(&sub_category).await?;
        info!(
            sub_category_id = %sub_category.id(),
            category_id = %category_id,
            "sub-category created"
        );
        Ok(sub_category)
    }

    /// Lists the sub-categories of an existing category.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyServiceError`] when the parent is missing or lookup
    /// fails.
    pub async fn list_sub_categories(
        &self,
        category_id: CategoryId,
    ) -> TaxonomyServiceResult<Vec<SubCategory>> {
        self.find_category_or_error(category_id).await?;
        Ok(self.repository.list_sub_categories(category_id).await?)
    }

    async fn find_category_or_error(&self, id: CategoryId) -> TaxonomyServiceResult<Category> {
        self.repository
            .find_category(id)
            .await?
            .ok_or_else(|| TaxonomyRepositoryError::CategoryNotFound(id).into())
    }
}
