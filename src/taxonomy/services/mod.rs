//! Application services for taxonomy management.

mod catalog;

pub use catalog::{
    CreateCategoryRequest, TaxonomyService, TaxonomyServiceError, TaxonomyServiceResult,
    UpdateCategoryRequest,
};
