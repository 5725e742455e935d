//! Synthetic retail dataset generation
//!
//! Produces record batches with intentional duplicates for tests,
//! benchmarks, and CLI runs. Duplicates are copies of a source record
//! with realistic perturbations applied: email aliasing, name
//! truncation and case noise, address abbreviation.

use dedupe_core::Record;
use dedupe_schema::{FieldTag, RecordSchema};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde_json::Value;
use std::collections::HashMap;

/// Column layout of the retail customer extract.
pub const RETAIL_COLUMNS: [&str; 34] = [
    "CUSTOMER_PK",
    "DIM_CUSTOMER_ID",
    "REGISTERED_DATE",
    "ANONYMISED",
    "DIM_INDIVIDUAL_ID",
    "WEB_CUSTOMER_ID",
    "TITLE",
    "FIRSTNAME",
    "LASTNAME",
    "GENDER",
    "SOURCE",
    "DOB",
    "EMAIL",
    "COUNTRY_CODE",
    "LAST_UPDATED",
    "DELIVERY_ADDRESS_COUNT",
    "BILLING_TITLE",
    "BILLING_FIRSTNAME",
    "BILLING_LASTNAME",
    "BILLING_ADDRESS_LINE1",
    "BILLING_ADDRESS_LINE2",
    "BILLING_ADDRESS_LINE3",
    "BILLING_TOWN",
    "BILLING_POSTCODE",
    "BILLING_COUNTRY_CODE",
    "BILLING_PHONE",
    "CONTACT_WOMEN",
    "CONTACT_MEN",
    "CONTACT_KIDS",
    "CONTACT_BEAUTY",
    "OPTED_IN_TO_MARKETING",
    "AGGREGATED_MARKETING_PREFERENCE",
    "GDPR_ANONYMISED",
    "GDPR_REGISTERED_DATE",
];

/// Tag mapping for [`RETAIL_COLUMNS`].
pub fn retail_schema() -> dedupe_core::Result<RecordSchema> {
    RecordSchema::from_mapping([
        (
            FieldTag::CustomerId,
            vec!["CUSTOMER_PK", "DIM_CUSTOMER_ID", "WEB_CUSTOMER_ID"],
        ),
        (
            FieldTag::Name,
            vec![
                "TITLE",
                "FIRSTNAME",
                "LASTNAME",
                "BILLING_FIRSTNAME",
                "BILLING_LASTNAME",
            ],
        ),
        (FieldTag::Email, vec!["EMAIL"]),
        (FieldTag::Dob, vec!["DOB"]),
        (FieldTag::Gender, vec!["GENDER"]),
        (
            FieldTag::Country,
            vec!["COUNTRY_CODE", "BILLING_COUNTRY_CODE"],
        ),
        (
            FieldTag::Address,
            vec![
                "BILLING_ADDRESS_LINE1",
                "BILLING_ADDRESS_LINE2",
                "BILLING_ADDRESS_LINE3",
                "BILLING_TOWN",
            ],
        ),
        (FieldTag::Postcode, vec!["BILLING_POSTCODE"]),
        (FieldTag::Phone, vec!["BILLING_PHONE"]),
        (
            FieldTag::Date,
            vec!["REGISTERED_DATE", "LAST_UPDATED", "GDPR_REGISTERED_DATE"],
        ),
        (
            FieldTag::Marketing,
            vec![
                "CONTACT_WOMEN",
                "CONTACT_MEN",
                "CONTACT_KIDS",
                "CONTACT_BEAUTY",
                "OPTED_IN_TO_MARKETING",
                "AGGREGATED_MARKETING_PREFERENCE",
            ],
        ),
    ])
}

const FIRST_NAMES: [&str; 10] = [
    "Dominique", "Luke", "Alex", "Sofia", "Maya", "Daniel", "Emma", "Chris", "Olivia", "Noah",
];
const LAST_NAMES: [&str; 8] = [
    "Smith", "Johnson", "Brown", "Taylor", "Wilson", "Davies", "Martin", "Thomas",
];
const STREETS: [&str; 6] = [
    "Luke Street",
    "Maple Road",
    "King Avenue",
    "River Lane",
    "Elm Street",
    "Station Road",
];
const TOWNS: [&str; 6] = [
    "London",
    "Manchester",
    "Leeds",
    "Bristol",
    "Birmingham",
    "Dublin",
];
const DOMAINS: [&str; 4] = ["gmail.com", "outlook.com", "yahoo.com", "example.com"];

struct Profile {
    title: String,
    first_name: String,
    last_name: String,
    address_line1: String,
    town: String,
    postcode: String,
    email: String,
    phone: String,
    dob: String,
    country: String,
    date: String,
    marketing: String,
}

/// Seeded generator; identical seeds produce identical batches.
pub struct DatasetGenerator {
    rng: StdRng,
}

impl DatasetGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate `size` records over `columns`, of which roughly
    /// `duplicate_rate` are perturbed copies of earlier records.
    pub fn generate(
        &mut self,
        columns: &[&str],
        schema: &RecordSchema,
        size: usize,
        duplicate_rate: f64,
    ) -> Vec<Record> {
        if size == 0 {
            return Vec::new();
        }

        let unique_count = ((size as f64) * (1.0 - duplicate_rate)) as usize;
        let unique_count = unique_count.clamp(1, size);

        let column_to_tag = column_to_tag_map(schema);

        let mut records: Vec<Record> = Vec::with_capacity(size);
        for idx in 0..unique_count {
            let profile = self.profile(idx);
            let attributes: HashMap<String, Value> = columns
                .iter()
                .map(|column| {
                    let value =
                        value_for_column(column, idx, column_to_tag.get(*column).copied(), &profile);
                    (column.to_string(), Value::String(value))
                })
                .collect();
            records.push(Record::new(format!("cust_{idx:07}"), attributes));
        }

        while records.len() < size {
            let source = self.rng.random_range(0..unique_count);
            let mut attributes = records[source].attributes.clone();
            self.perturb(&mut attributes, &column_to_tag);
            records.push(Record::new(
                format!("cust_{:07}", records.len()),
                attributes,
            ));
        }

        records.shuffle(&mut self.rng);
        records
    }

    fn profile(&mut self, idx: usize) -> Profile {
        let first_name = pick(&mut self.rng, &FIRST_NAMES).to_string();
        let last_name = pick(&mut self.rng, &LAST_NAMES).to_string();
        let street = pick(&mut self.rng, &STREETS);
        let house_no = 1 + (idx % 180);
        let domain = pick(&mut self.rng, &DOMAINS);
        let email_local = format!("{}.{}{}", first_name, last_name, idx % 97).to_lowercase();

        Profile {
            title: pick(&mut self.rng, &["Mr", "Ms", "Dr"]).to_string(),
            first_name,
            last_name,
            address_line1: format!("{street}, {house_no}"),
            town: pick(&mut self.rng, &TOWNS).to_string(),
            postcode: format!("{}", 10000 + (idx % 89999)),
            email: format!("{email_local}@{domain}"),
            phone: format!("07{:09}", idx % 1_000_000_000),
            dob: format!(
                "{}-{:02}-{:02}",
                1970 + (idx % 30),
                (idx % 12) + 1,
                (idx % 27) + 1
            ),
            country: pick(&mut self.rng, &["GB", "US", "IE"]).to_string(),
            date: format!("2024-{:02}-{:02}", (idx % 12) + 1, (idx % 27) + 1),
            marketing: pick(&mut self.rng, &["true", "false"]).to_string(),
        }
    }

    fn perturb(
        &mut self,
        attributes: &mut HashMap<String, Value>,
        column_to_tag: &HashMap<String, FieldTag>,
    ) {
        let email_cols = columns_with_tag(attributes, column_to_tag, FieldTag::Email);
        let first_cols = columns_containing(attributes, "FIRST");
        let last_cols = columns_containing(attributes, "LAST");
        let address_cols = columns_with_tag(attributes, column_to_tag, FieldTag::Address);

        let mutation = *pick(&mut self.rng, &["email", "name", "address", "mixed"]);

        if (mutation == "email" || mutation == "mixed") && !email_cols.is_empty() {
            let col = pick(&mut self.rng, &email_cols).clone();
            if let Some(Value::String(email)) = attributes.get(&col) {
                let variant = self.email_variant(email);
                attributes.insert(col, Value::String(variant));
            }
        }

        if mutation == "name" || mutation == "mixed" {
            self.name_variant(attributes, &first_cols, &last_cols);
        }

        if (mutation == "address" || mutation == "mixed") && !address_cols.is_empty() {
            self.address_variant(attributes, &address_cols);
        }
    }

    fn email_variant(&mut self, email: &str) -> String {
        let Some((local, domain)) = email.split_once('@') else {
            return email.to_string();
        };

        match *pick(&mut self.rng, &["plus", "dot", "case"]) {
            "plus" => {
                let suffix = pick(&mut self.rng, &["test", "shop", "vip"]);
                format!("{local}+{suffix}@{domain}")
            }
            "dot" if local.len() > 3 && !local.contains('.') => {
                let at = local.len() / 2;
                format!("{}.{}@{domain}", &local[..at], &local[at..])
            }
            _ => {
                let mut chars = local.chars();
                let capitalized = match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                };
                format!("{capitalized}@{domain}")
            }
        }
    }

    fn name_variant(
        &mut self,
        attributes: &mut HashMap<String, Value>,
        first_cols: &[String],
        last_cols: &[String],
    ) {
        if !first_cols.is_empty() {
            let col = pick(&mut self.rng, first_cols).clone();
            if let Some(Value::String(first)) = attributes.get(&col) {
                let first = first.trim().to_string();
                let next = if first.len() > 4 {
                    first[..3].to_string()
                } else {
                    match first.to_lowercase().as_str() {
                        "alex" => "Alexander".to_string(),
                        "chris" => "Christopher".to_string(),
                        "dan" => "Daniel".to_string(),
                        _ => first,
                    }
                };
                attributes.insert(col, Value::String(next));
            }
        }

        if !last_cols.is_empty() {
            let col = pick(&mut self.rng, last_cols).clone();
            if let Some(Value::String(last)) = attributes.get(&col) {
                let last = last.trim().to_string();
                let truncated = if last.len() > 4 {
                    last[..last.len() - 1].to_string()
                } else {
                    last.clone()
                };
                let next =
                    pick(&mut self.rng, &[last.to_uppercase(), last.to_lowercase(), truncated])
                        .clone();
                attributes.insert(col, Value::String(next));
            }
        }
    }

    fn address_variant(&mut self, attributes: &mut HashMap<String, Value>, address_cols: &[String]) {
        let line1_cols: Vec<String> = address_cols
            .iter()
            .filter(|c| c.contains("LINE1"))
            .cloned()
            .collect();
        let targets = if line1_cols.is_empty() {
            address_cols
        } else {
            line1_cols.as_slice()
        };

        let col = pick(&mut self.rng, targets).clone();
        let Some(Value::String(value)) = attributes.get(&col) else {
            return;
        };
        let value = value.trim();

        let mut variant = if value.contains("Street") {
            value.replace("Street", "St")
        } else if value.contains(" St") {
            value.replace(" St", " Street")
        } else {
            value.to_string()
        };

        if self.rng.random_bool(0.6) {
            variant = format!("{variant}, Top floor");
        }

        attributes.insert(col, Value::String(variant));
    }
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

fn column_to_tag_map(schema: &RecordSchema) -> HashMap<String, FieldTag> {
    let mut mapping = HashMap::new();
    for (tag, columns) in schema.tag_to_columns() {
        for column in columns {
            mapping.insert(column.clone(), *tag);
        }
    }
    mapping
}

fn columns_with_tag(
    attributes: &HashMap<String, Value>,
    column_to_tag: &HashMap<String, FieldTag>,
    tag: FieldTag,
) -> Vec<String> {
    let mut columns: Vec<String> = attributes
        .keys()
        .filter(|column| column_to_tag.get(*column) == Some(&tag))
        .cloned()
        .collect();
    columns.sort();
    columns
}

fn columns_containing(attributes: &HashMap<String, Value>, token: &str) -> Vec<String> {
    let mut columns: Vec<String> = attributes
        .keys()
        .filter(|column| column.to_uppercase().contains(token))
        .cloned()
        .collect();
    columns.sort();
    columns
}

fn value_for_column(
    column: &str,
    idx: usize,
    tag: Option<FieldTag>,
    profile: &Profile,
) -> String {
    let lowered = column.to_lowercase();

    match tag {
        Some(FieldTag::Name) => {
            if lowered.contains("title") {
                profile.title.clone()
            } else if lowered.contains("first") {
                profile.first_name.clone()
            } else if lowered.contains("last") {
                profile.last_name.clone()
            } else {
                format!("{} {}", profile.first_name, profile.last_name)
            }
        }
        Some(FieldTag::Address) => {
            if lowered.contains("line2") || lowered.contains("line3") {
                String::new()
            } else if lowered.contains("town") || lowered.contains("city") {
                profile.town.clone()
            } else {
                profile.address_line1.clone()
            }
        }
        Some(FieldTag::Postcode) => profile.postcode.clone(),
        Some(FieldTag::Email) => profile.email.clone(),
        Some(FieldTag::Phone) => profile.phone.clone(),
        Some(FieldTag::Dob) => profile.dob.clone(),
        Some(FieldTag::Country) => profile.country.clone(),
        Some(FieldTag::Date) => profile.date.clone(),
        Some(FieldTag::Marketing) => profile.marketing.clone(),
        Some(FieldTag::Gender) | Some(FieldTag::CustomerId) | None => {
            if lowered.contains("count") {
                format!("{}", idx % 4)
            } else {
                format!("{column}_{idx:07}")
            }
        }
    }
}
