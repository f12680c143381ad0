//! Unit tests for the task registry.
