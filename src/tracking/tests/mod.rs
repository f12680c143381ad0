//! Unit tests for period tracking.

mod reconcile_tests;
