//! Period tracking for pillarwise.
//!
//! A period is a calendar window (day, week, month, or year) identified by a
//! canonical [`domain::PeriodAnchor`]. Minutes are logged per task and
//! sub-unit of that window, per-period statuses override a task's
//! allocation, and the reconciler derives a cached [`domain::PeriodSummary`]
//! from those inputs after every mutation.
//!
//! - Domain types and the pure reconciliation in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
