//! Pillar, category, and sub-category taxonomy.
//!
//! Every task is placed somewhere in the fixed three-pillar framework:
//! pillar → category → optional sub-category. The taxonomy is the source of
//! truth for those placements and for the names captured in time-entry
//! snapshots. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
