//! Unit tests for the taxonomy module.

mod domain_tests;
