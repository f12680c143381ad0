//! In-memory integration tests over the wired application services.
//!
//! Tests are organized into modules by functionality:
//! - `registry_tests`: Taxonomy placement and task lifecycle
//! - `calendar_tests`: Reconciliation across weekly, monthly, and yearly periods

mod in_memory {
    pub mod helpers;

    mod calendar_tests;
    mod registry_tests;
}
