//! # dedupe Schema
//!
//! Schema abstraction and record cleaning for the dedupe
//! entity-resolution engine.
//!
//! - [`FieldTag`] - Closed enumeration of semantic field categories
//! - [`RecordSchema`] - Immutable column-to-tag mapping with value extraction
//! - [`FunctionalCleaner`] - Declarative per-column / per-tag text transforms
//!
//! ## Example
//!
//! ```rust
//! use dedupe_schema::{FieldTag, RecordSchema};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let schema = RecordSchema::from_mapping([
//!     (FieldTag::Name, vec!["FIRSTNAME", "LASTNAME"]),
//! ]).unwrap();
//!
//! let mut attributes = HashMap::new();
//! attributes.insert("FIRSTNAME".to_string(), json!("Jane"));
//! attributes.insert("LASTNAME".to_string(), json!("Smith"));
//!
//! assert_eq!(schema.joined_value(&attributes, FieldTag::Name), "Jane Smith");
//! ```

pub mod cleaner;
pub mod schema;
pub mod tag;

pub use cleaner::FunctionalCleaner;
pub use schema::RecordSchema;
pub use tag::FieldTag;
