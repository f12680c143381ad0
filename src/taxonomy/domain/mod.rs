//! Domain model for the pillar taxonomy.

mod category;
mod error;
mod ids;
mod pillar;

pub use category::{
    Category, CategoryName, PersistedCategoryData, PersistedSubCategoryData, SubCategory,
};
pub use error::{ParsePillarError, TaxonomyDomainError};
pub use ids::{CategoryId, SubCategoryId};
pub use pillar::Pillar;
