//! Adapter implementations for taxonomy ports.

pub mod memory;
pub mod postgres;
