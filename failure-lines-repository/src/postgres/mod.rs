//! PostgreSQL implementation of the record source.

mod connection;
mod failure_line_source;

pub use connection::connect;
pub use failure_line_source::{PostgresFailureLineSource, DEFAULT_TABLE};
