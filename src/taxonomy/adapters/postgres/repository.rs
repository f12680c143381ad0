//! `PostgreSQL` repository implementation for taxonomy storage.

use super::{
    models::{CategoryRow, SubCategoryRow},
    schema::{categories, sub_categories},
};
use crate::db::PgPool;
use crate::taxonomy::{
    domain::{
        Category, CategoryId, CategoryName, PersistedCategoryData, PersistedSubCategoryData,
        Pillar, SubCategory, SubCategoryId,
    },
    ports::{TaxonomyRepository, TaxonomyRepositoryError, TaxonomyRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed taxonomy repository.
#[derive(Debug, Clone)]
pub struct PostgresTaxonomyRepository {
    pool: PgPool,
}

impl PostgresTaxonomyRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaxonomyRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaxonomyRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaxonomyRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaxonomyRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaxonomyRepository for PostgresTaxonomyRepository {
    async fn store_category(&self, category: &Category) -> TaxonomyRepositoryResult<()> {
        let row = to_category_row(category);
        let pillar = category.pillar();
        let name = category.name().clone();

        self.run_blocking(move |connection| {
            diesel::insert_into(categories::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_category_write_error(err, pillar, &name))?;
            Ok(())
        })
        .await
    }

    async fn update_category(&self, category: &Category) -> TaxonomyRepositoryResult<()> {
        let category_id = category.id();
        let pillar = category.pillar();
        let name = category.name().clone();
        let description = category.description().map(str::to_owned);
        let updated_at = category.updated_at();

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                categories::table.filter(categories::id.eq(category_id.into_inner())),
            )
            .set((
                categories::name.eq(name.as_str()),
                categories::description.eq(description),
                categories::updated_at.eq(updated_at),
            ))
            .execute(connection)
            .map_err(|err| map_category_write_error(err, pillar, &name))?;

            if updated_count == 0 {
                return Err(TaxonomyRepositoryError::CategoryNotFound(category_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_category(&self, id: CategoryId) -> TaxonomyRepositoryResult<Option<Category>> {
        self.run_blocking(move |connection| {
            let row = categories::table
                .filter(categories::id.eq(id.into_inner()))
                .select(CategoryRow::as_select())
                .first::<CategoryRow>(connection)
                .optional()
                .map_err(TaxonomyRepositoryError::persistence)?;
            row.map(row_to_category).transpose()
        })
        .await
    }

    async fn list_categories(
        &self,
        pillar: Option<Pillar>,
    ) -> TaxonomyRepositoryResult<Vec<Category>> {
        self.run_blocking(move |connection| {
            let mut query = categories::table
                .select(CategoryRow::as_select())
                .into_boxed();
            if let Some(wanted) = pillar {
                query = query.filter(categories::pillar.eq(wanted.as_str()));
            }
            let rows = query
                .order((categories::pillar.asc(), categories::name.asc()))
                .load::<CategoryRow>(connection)
                .map_err(TaxonomyRepositoryError::persistence)?;
            let mut loaded = rows
                .into_iter()
                .map(row_to_category)
                .collect::<TaxonomyRepositoryResult<Vec<_>>>()?;
            // Storage orders pillars alphabetically; callers expect display order.
            loaded.sort_by_key(Category::pillar);
            Ok(loaded)
        })
        .await
    }

    async fn store_sub_category(
        &self,
        sub_category: &SubCategory,
    ) -> TaxonomyRepositoryResult<()> {
        let row = SubCategoryRow {
            id: sub_category.id().into_inner(),
            category_id: sub_category.category_id().into_inner(),
            name: sub_category.name().as_str().to_owned(),
            created_at: sub_category.created_at(),
            updated_at: sub_category.updated_at(),
        };
        let category_id = sub_category.category_id();
        let name = sub_category.name().clone();

        self.run_blocking(move |connection| {
            diesel::insert_into(sub_categories::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaxonomyRepositoryError::CategoryNotFound(category_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaxonomyRepositoryError::DuplicateSubCategoryName {
                            category_id,
                            name: name.clone(),
                        }
                    }
                    _ => TaxonomyRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_sub_category(
        &self,
        id: SubCategoryId,
    ) -> TaxonomyRepositoryResult<Option<SubCategory>> {
        self.run_blocking(move |connection| {
            let row = sub_categories::table
                .filter(sub_categories::id.eq(id.into_inner()))
                .select(SubCategoryRow::as_select())
                .first::<SubCategoryRow>(connection)
                .optional()
                .map_err(TaxonomyRepositoryError::persistence)?;
            row.map(row_to_sub_category).transpose()
        })
        .await
    }

    async fn list_sub_categories(
        &self,
        category_id: CategoryId,
    ) -> TaxonomyRepositoryResult<Vec<SubCategory>> {
        self.run_blocking(move |connection| {
            sub_categories::table
                .filter(sub_categories::category_id.eq(category_id.into_inner()))
                .order(sub_categories::name.asc())
                .select(SubCategoryRow::as_select())
                .load::<SubCategoryRow>(connection)
                .map_err(TaxonomyRepositoryError::persistence)?
                .into_iter()
                .map(row_to_sub_category)
                .collect()
        })
        .await
    }
}

fn map_category_write_error(
    err: DieselError,
    pillar: Pillar,
    name: &CategoryName,
) -> TaxonomyRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TaxonomyRepositoryError::DuplicateCategoryName {
                pillar,
                name: name.clone(),
            }
        }
        _ => TaxonomyRepositoryError::persistence(err),
    }
}

fn to_category_row(category: &Category) -> CategoryRow {
    CategoryRow {
        id: category.id().into_inner(),
        pillar: category.pillar().as_str().to_owned(),
        name: category.name().as_str().to_owned(),
        description: category.description().map(str::to_owned),
        created_at: category.created_at(),
        updated_at: category.updated_at(),
    }
}

fn row_to_category(row: CategoryRow) -> TaxonomyRepositoryResult<Category> {
    let pillar =
        Pillar::try_from(row.pillar.as_str()).map_err(TaxonomyRepositoryError::persistence)?;
    let name = CategoryName::new(row.name).map_err(TaxonomyRepositoryError::persistence)?;
    Ok(Category::from_persisted(PersistedCategoryData {
        id: CategoryId::from_uuid(row.id),
        pillar,
        name,
        description: row.description,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn row_to_sub_category(row: SubCategoryRow) -> TaxonomyRepositoryResult<SubCategory> {
    let name = CategoryName::new(row.name).map_err(TaxonomyRepositoryError::persistence)?;
    Ok(SubCategory::from_persisted(PersistedSubCategoryData {
        id: SubCategoryId::from_uuid(row.id),
        category_id: CategoryId::from_uuid(row.category_id),
        name,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::{CategoryRow, row_to_category};
    use crate::taxonomy::domain::Pillar;
    use chrono::Utc;

    fn category_row(pillar: &str, name: &str) -> CategoryRow {
        let now = Utc::now();
        CategoryRow {
            id: uuid::Uuid::new_v4(),
            pillar: pillar.to_owned(),
            name: name.to_owned(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_to_category_parses_pillar() {
        let category = row_to_category(category_row("calmness", "Meditation"))
            .expect("valid row should convert");
        assert_eq!(category.pillar(), Pillar::Calmness);
        assert_eq!(category.name().as_str(), "Meditation");
    }

    #[test]
    fn row_to_category_rejects_unknown_pillar() {
        let result = row_to_category(category_row("leisure", "Games"));
        assert!(result.is_err());
    }
}
