//! Pillarwise: pillar-based personal time allocation.
//!
//! Tasks belong to one of three pillars (hard work, calmness, family) and
//! carry a per-period minute allocation. Minutes are logged against
//! sub-units of a period (hours of a day, days of a week or month, months
//! of a year), and reconciliation compares what was allocated with what was
//! spent.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Use cases orchestrating domain and ports
//!
//! # Modules
//!
//! - [`taxonomy`]: Pillars, categories, and sub-categories
//! - [`task`]: Task definitions and their global lifecycle
//! - [`tracking`]: Time entries, per-period statuses, and reconciliation
//! - [`app`]: Wiring of stores and services
//! - [`http`]: JSON API over the services

pub mod app;
pub mod config;
pub mod db;
pub mod http;
pub mod task;
pub mod taxonomy;
pub mod telemetry;
pub mod tracking;

#[cfg(test)]
mod test_support;
