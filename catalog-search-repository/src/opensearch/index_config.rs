//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the product
//! search index. The schema is fixed per deployment and created once at
//! startup.

use serde_json::{json, Value};

/// Configuration for the search index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The index name used for all operations.
    pub name: String,
}

impl IndexConfig {
    /// Create a new index configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The default name of the product search index.
pub const DEFAULT_INDEX_NAME: &str = "products";

/// Get the index settings and mappings for the product search index.
///
/// Field types:
/// - **text** for the free-text `title` and `description` fields
/// - **keyword** for the exact-match `category` name
/// - **float** / **integer** for `price` and `quantity`
/// - an object mapping for the nested `seller`, with a keyword `id` for
///   exact owner lookups
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "title": { "type": "text" },
                "description": { "type": "text" },
                "category": { "type": "keyword" },
                "price": { "type": "float" },
                "quantity": { "type": "integer" },
                "image": { "type": "text" },
                "seller": {
                    "properties": {
                        "id": { "type": "keyword" },
                        "profileUrl": { "type": "text" }
                    }
                }
            }
        }
    })
}
