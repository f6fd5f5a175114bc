//! Mapper module for the failure line importer.
//!
//! Transforms failure lines into search documents.

mod failure_line_mapper;

pub use failure_line_mapper::FailureLineMapper;
