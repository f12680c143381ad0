//! In-memory repository for categories and sub-categories.

use crate::taxonomy::{
    domain::{Category, CategoryId, Pillar, SubCategory, SubCategoryId},
    ports::{TaxonomyRepository, TaxonomyRepositoryError, TaxonomyRepositoryResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory taxonomy repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaxonomyRepository {
    state: Arc<RwLock<InMemoryTaxonomyState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaxonomyState {
    categories: HashMap<CategoryId, Category>,
    sub_categories: HashMap<SubCategoryId, SubCategory>,
}

impl InMemoryTaxonomyRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaxonomyRepositoryResult<RwLockReadGuard<'_, InMemoryTaxonomyState>> {
        self.state.read().map_err(|err| {
            TaxonomyRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaxonomyRepositoryResult<RwLockWriteGuard<'_, InMemoryTaxonomyState>> {
        self.state.write().map_err(|err| {
            TaxonomyRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn ensure_unique_category_name(
    state: &InMemoryTaxonomyState,
    category: &Category,
) -> TaxonomyRepositoryResult<()> {
    let collides = state.categories.values().any(|existing| {
        existing.id() != category.id()
            && existing.pillar() == category.pillar()
            && existing.name().matches(category.name())
    });
    if collides {
        return Err(TaxonomyRepositoryError::DuplicateCategoryName {
            pillar: category.pillar(),
            name: category.name().clone(),
        });
    }
    Ok(())
}

#[async_trait]
impl TaxonomyRepository for InMemoryTaxonomyRepository {
    async fn store_category(&self, category: &Category) -> TaxonomyRepositoryResult<()> {
        let mut state = self.write()?;
        ensure_unique_category_name(&state, category)?;
        state.categories.insert(category.id(), category.clone());
        Ok(())
    }

    async fn update_category(&self, category: &Category) -> TaxonomyRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.categories.contains_key(&category.id()) {
            return Err(TaxonomyRepositoryError::CategoryNotFound(category.id()));
        }
        ensure_unique_category_name(&state, category)?;
        state.categories.insert(category.id(), category.clone());
        Ok(())
    }

    async fn find_category(&self, id: CategoryId) -> TaxonomyRepositoryResult<Option<Category>> {
        let state = self.read()?;
        Ok(state.categories.get(&id).cloned())
    }

    async fn list_categories(
        &self,
        pillar: Option<Pillar>,
    ) -> TaxonomyRepositoryResult<Vec<Category>> {
        let state = self.read()?;
        let mut categories: Vec<Category> = state
            .categories
            .values()
            .filter(|category| pillar.is_none_or(|wanted| category.pillar() == wanted))
            .cloned()
            .collect();
        categories.sort_by(|left, right| {
            left.pillar()
                .cmp(&right.pillar())
                .then_with(|| left.name().as_str().cmp(right.name().as_str()))
        });
        Ok(categories)
    }

    async fn store_sub_category(
        &self,
        sub_category: &SubCategory,
    ) -> TaxonomyRepositoryResult<()> {
        let mut state = self.write()?;
        let category_id = sub_category.category_id();
        if !state.categories.contains_key(&category_id) {
            return Err(TaxonomyRepositoryError::CategoryNotFound(category_id));
        }
        let collides = state.sub_categories.values().any(|existing| {
            existing.category_id() == category_id && existing.name().matches(sub_category.name())
        });
        if collides {
            return Err(TaxonomyRepositoryError::DuplicateSubCategoryName {
                category_id,
                name: sub_category.name().clone(),
            });
        }
        state
            .sub_categories
            .insert(sub_category.id(), sub_category.clone());
        Ok(())
    }

    async fn find_sub_category(
        &self,
        id: SubCategoryId,
    ) -> TaxonomyRepositoryResult<Option<SubCategory>> {
        let state = self.read()?;
        Ok(state.sub_categories.get(&id).cloned())
    }

    async fn list_sub_categories(
        &self,
        category_id: CategoryId,
    ) -> TaxonomyRepositoryResult<Vec<SubCategory>> {
        let state = self.read()?;
        let mut sub_categories: Vec<SubCategory> = state
            .sub_categories
            .values()
            .filter(|sub_category| sub_category.category_id() == category_id)
            .cloned()
            .collect();
        sub_categories.sort_by(|left, right| left.name().as_str().cmp(right.name().as_str()));
        Ok(sub_categories)
    }
}
