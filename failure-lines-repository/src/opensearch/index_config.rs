//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the test failure
//! line index.

use failure_lines_shared::DOCUMENT_TYPE;
use serde_json::{json, Value};

/// The default base name of the search index (without version).
pub const INDEX_NAME: &str = "failure-lines";

/// Configuration for the search index targeted by one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// The base index name.
    pub name: String,
    /// The version number for the index (e.g., 0 for "failure-lines_v0").
    pub version: u32,
}

impl IndexConfig {
    /// Create a new index configuration.
    ///
    /// # Arguments
    ///
    /// * `name` - The base index name
    /// * `version` - The version number
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// The concrete index name every call of a run is made against.
    pub fn versioned_name(&self) -> String {
        format!("{}_v{}", self.name, self.version)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(INDEX_NAME, 0)
    }
}

/// Get the index settings and mappings for the test failure line index.
///
/// The configuration includes:
/// - **Keyword fields**: job guid, test and subtest names, and statuses are
///   matched exactly
/// - **message_analyzer**: whitespace tokenized, lowercased free text for
///   the failure message
/// - **best_classification / best_is_verified**: stored for filtering
///   matched candidates
///
/// # Sharding Configuration
///
/// - 1 primary shard
/// - 1 replica for redundancy
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1,
            "analysis": {
                "analyzer": {
                    "message_analyzer": {
                        "type": "custom",
                        "tokenizer": "whitespace",
                        "filter": ["lowercase"]
                    }
                }
            }
        },
        "mappings": {
            "_meta": {
                "document_type": DOCUMENT_TYPE
            },
            "properties": {
                "job_guid": {
                    "type": "keyword"
                },
                "test": {
                    "type": "keyword"
                },
                "subtest": {
                    "type": "keyword"
                },
                "status": {
                    "type": "keyword"
                },
                "expected": {
                    "type": "keyword"
                },
                "message": {
                    "type": "text",
                    "analyzer": "message_analyzer"
                },
                "best_classification": {
                    "type": "long"
                },
                "best_is_verified": {
                    "type": "boolean"
                }
            }
        }
    })
}
