//! Record cleaning
//!
//! [`FunctionalCleaner`] applies registered text transforms to a record
//! batch and produces a new batch; no record is mutated in place. Two
//! registries exist: by raw column name (over the stored value) and by
//! semantic tag (over the string form of every column the schema maps to
//! that tag). Column transforms run first, then tag transforms, each in
//! registration order. Absent columns are silently skipped.

use crate::schema::{value_text, RecordSchema};
use crate::tag::FieldTag;
use dedupe_core::{Cleaner, Record};
use serde_json::Value;

type ColumnTransform = Box<dyn Fn(&Value) -> Value + Send + Sync>;
type TagTransform = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Composable cleaner supporting both raw-column and semantic-tag transforms.
///
/// Transform functions must be pure: each record is cleaned independently,
/// so impure transforms would break row-parallel execution and
/// determinism guarantees.
#[derive(Default)]
pub struct FunctionalCleaner {
    schema: Option<RecordSchema>,
    column_transforms: Vec<(String, ColumnTransform)>,
    tag_transforms: Vec<(FieldTag, TagTransform)>,
}

impl FunctionalCleaner {
    /// Cleaner with no schema; only column transforms will apply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cleaner bound to a schema, enabling tag-keyed transforms.
    pub fn with_schema(schema: RecordSchema) -> Self {
        Self {
            schema: Some(schema),
            ..Self::default()
        }
    }

    /// Register a transform over the raw value of `column`.
    pub fn column_transform<F>(mut self, column: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.column_transforms
            .push((column.into(), Box::new(transform)));
        self
    }

    /// Register a transform over the string value of every column the
    /// schema maps to `tag`. Ignored when the cleaner has no schema.
    pub fn tag_transform<F>(mut self, tag: FieldTag, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.tag_transforms.push((tag, Box::new(transform)));
        self
    }

    fn clean_one(&self, record: &Record) -> Record {
        let mut attributes = record.attributes.clone();

        for (column, transform) in &self.column_transforms {
            if let Some(value) = attributes.get_mut(column) {
                let next = transform(value);
                *value = next;
            }
        }

        if let Some(schema) = &self.schema {
            for (tag, transform) in &self.tag_transforms {
                for column in schema.columns_for(*tag) {
                    let Some(value) = attributes.get_mut(column) else {
                        continue;
                    };
                    let Some(text) = value_text(value) else {
                        continue;
                    };
                    *value = Value::String(transform(&text));
                }
            }
        }

        Record::new(record.record_id.clone(), attributes)
    }
}

impl Cleaner for FunctionalCleaner {
    fn clean(&self, records: &[Record]) -> Vec<Record> {
        records.iter().map(|record| self.clean_one(record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn record(pairs: &[(&str, Value)]) -> Record {
        let attributes: HashMap<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Record::new("cust_001", attributes)
    }

    fn postcode_schema() -> RecordSchema {
        RecordSchema::from_mapping([(FieldTag::Postcode, vec!["BILLING_POSTCODE"])]).unwrap()
    }

    #[test]
    fn test_clean_preserves_id_and_key_set() {
        let cleaner = FunctionalCleaner::with_schema(postcode_schema())
            .tag_transform(FieldTag::Postcode, |v| v.replace(' ', "").to_uppercase());

        let input = record(&[
            ("BILLING_POSTCODE", json!("sw1a 1aa")),
            ("FIRSTNAME", json!("Jane")),
        ]);
        let cleaned = cleaner.clean(std::slice::from_ref(&input));

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].record_id, input.record_id);

        let mut input_keys: Vec<&String> = input.attributes.keys().collect();
        let mut output_keys: Vec<&String> = cleaned[0].attributes.keys().collect();
        input_keys.sort();
        output_keys.sort();
        assert_eq!(input_keys, output_keys);

        assert_eq!(cleaned[0].get("BILLING_POSTCODE"), Some(&json!("SW1A1AA")));
        assert_eq!(cleaned[0].get("FIRSTNAME"), Some(&json!("Jane")));
    }

    #[test]
    fn test_column_transforms_run_before_tag_transforms() {
        let cleaner = FunctionalCleaner::with_schema(postcode_schema())
            .column_transform("BILLING_POSTCODE", |v| match v {
                Value::String(s) => Value::String(format!("GB {s}")),
                other => other.clone(),
            })
            .tag_transform(FieldTag::Postcode, |v| v.replace(' ', ""));

        let cleaned = cleaner.clean(&[record(&[("BILLING_POSTCODE", json!("sw1a 1aa"))])]);
        assert_eq!(cleaned[0].get("BILLING_POSTCODE"), Some(&json!("GBsw1a1aa")));
    }

    #[test]
    fn test_absent_columns_are_skipped() {
        let cleaner = FunctionalCleaner::with_schema(postcode_schema())
            .column_transform("MISSING", |_| json!("boom"))
            .tag_transform(FieldTag::Postcode, |v| v.to_uppercase());

        let input = record(&[("FIRSTNAME", json!("Jane"))]);
        let cleaned = cleaner.clean(std::slice::from_ref(&input));

        assert_eq!(cleaned[0], input);
    }

    #[test]
    fn test_input_records_are_not_mutated() {
        let cleaner = FunctionalCleaner::with_schema(postcode_schema())
            .tag_transform(FieldTag::Postcode, |v| v.to_uppercase());

        let input = record(&[("BILLING_POSTCODE", json!("sw1a"))]);
        let _ = cleaner.clean(std::slice::from_ref(&input));

        assert_eq!(input.get("BILLING_POSTCODE"), Some(&json!("sw1a")));
    }

    #[test]
    fn test_clean_empty_batch() {
        let cleaner = FunctionalCleaner::new();
        assert!(cleaner.clean(&[]).is_empty());
    }
}
