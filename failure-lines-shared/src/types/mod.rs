//! Core data structures used across the failure line importer.

pub mod action;
pub mod failure_line;
pub mod test_failure_line;
