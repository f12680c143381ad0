//! Task registry for pillarwise.
//!
//! Tasks are the unit of allocation: each one sits under a pillar and
//! category, recurs at a fixed frequency, and expects a number of minutes per
//! period. Global completion and "not applicable" stamps remove a task from
//! every period on or after the stamp date; soft deletion retires a task while
//! leaving its logged history intact. The module follows hexagonal
//! architecture:
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
