//! Adapter implementations for task registry ports.

pub mod memory;
pub mod postgres;
