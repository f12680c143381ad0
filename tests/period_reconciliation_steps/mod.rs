//! Step definitions for period reconciliation scenarios.

mod given;
mod then;
mod when;
pub mod world;
