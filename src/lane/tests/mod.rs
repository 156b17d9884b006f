//! Unit tests for lane configuration.
