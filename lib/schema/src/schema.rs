//! Record schema definitions
//!
//! A [`RecordSchema`] maps source-system columns onto stable semantic
//! [`FieldTag`]s and provides the value-extraction helpers the matchers
//! consume. The schema is immutable after construction and shared
//! read-only across all pipeline stages.

use crate::tag::FieldTag;
use dedupe_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Maps source-system columns to stable semantic tags.
///
/// Multiple columns may map to one tag (e.g. billing and shipping name
/// columns). Reusing a column under more than one tag is permitted:
/// extraction is read-only, so there is no last-wins ambiguity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordSchema {
    tag_to_columns: HashMap<FieldTag, Vec<String>>,
}

impl RecordSchema {
    /// Build a schema from a tag-to-columns mapping.
    ///
    /// Fails with [`Error::InvalidSchema`] when a column name is empty,
    /// a column is listed twice under the same tag, or a tag appears
    /// more than once in the mapping.
    pub fn from_mapping<I, S>(mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (FieldTag, Vec<S>)>,
        S: Into<String>,
    {
        let mut tag_to_columns: HashMap<FieldTag, Vec<String>> = HashMap::new();

        for (tag, columns) in mapping {
            let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

            let mut seen: HashSet<&str> = HashSet::new();
            for column in &columns {
                if column.trim().is_empty() {
                    return Err(Error::InvalidSchema(format!(
                        "empty column name mapped to tag {tag}"
                    )));
                }
                if !seen.insert(column.as_str()) {
                    return Err(Error::InvalidSchema(format!(
                        "column '{column}' listed twice under tag {tag}"
                    )));
                }
            }

            if tag_to_columns.insert(tag, columns).is_some() {
                return Err(Error::InvalidSchema(format!(
                    "tag {tag} mapped more than once"
                )));
            }
        }

        Ok(Self { tag_to_columns })
    }

    /// The raw tag-to-columns mapping
    pub fn tag_to_columns(&self) -> &HashMap<FieldTag, Vec<String>> {
        &self.tag_to_columns
    }

    /// Ordered column names for `tag`; empty when the tag is unmapped
    pub fn columns_for(&self, tag: FieldTag) -> &[String] {
        self.tag_to_columns
            .get(&tag)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-empty trimmed string values for `tag`, in column order.
    ///
    /// Absent, null and blank values are skipped; non-string primitives
    /// are rendered through their JSON representation.
    pub fn values_for(&self, attributes: &HashMap<String, Value>, tag: FieldTag) -> Vec<String> {
        let mut values = Vec::new();
        for column in self.columns_for(tag) {
            let Some(value) = attributes.get(column) else {
                continue;
            };
            let Some(text) = value_text(value) else {
                continue;
            };
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                values.push(trimmed.to_string());
            }
        }
        values
    }

    /// Space-joined concatenation of [`Self::values_for`], trimmed
    pub fn joined_value(&self, attributes: &HashMap<String, Value>, tag: FieldTag) -> String {
        self.joined_value_with(attributes, tag, " ")
    }

    /// Separator-joined concatenation of [`Self::values_for`], trimmed
    pub fn joined_value_with(
        &self,
        attributes: &HashMap<String, Value>,
        tag: FieldTag,
        separator: &str,
    ) -> String {
        self.values_for(attributes, tag)
            .join(separator)
            .trim()
            .to_string()
    }
}

/// Render an attribute value as text; `None` for JSON null.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
