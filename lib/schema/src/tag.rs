use dedupe_core::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic category a source column maps to.
///
/// This is a closed enumeration: it is stable across schemas, and new
/// tags require a code change, not a data change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldTag {
    Address,
    Country,
    CustomerId,
    Date,
    Dob,
    Email,
    Gender,
    Marketing,
    Name,
    Phone,
    Postcode,
}

impl FieldTag {
    pub const ALL: [FieldTag; 11] = [
        FieldTag::Address,
        FieldTag::Country,
        FieldTag::CustomerId,
        FieldTag::Date,
        FieldTag::Dob,
        FieldTag::Email,
        FieldTag::Gender,
        FieldTag::Marketing,
        FieldTag::Name,
        FieldTag::Phone,
        FieldTag::Postcode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldTag::Address => "ADDRESS",
            FieldTag::Country => "COUNTRY",
            FieldTag::CustomerId => "CUSTOMER_ID",
            FieldTag::Date => "DATE",
            FieldTag::Dob => "DOB",
            FieldTag::Email => "EMAIL",
            FieldTag::Gender => "GENDER",
            FieldTag::Marketing => "MARKETING",
            FieldTag::Name => "NAME",
            FieldTag::Phone => "PHONE",
            FieldTag::Postcode => "POSTCODE",
        }
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        FieldTag::ALL
            .iter()
            .find(|tag| tag.as_str() == upper)
            .copied()
            .ok_or_else(|| Error::UnknownTag(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrip() {
        for tag in FieldTag::ALL {
            let parsed: FieldTag = tag.as_str().parse().unwrap();
            assert_eq!(parsed, tag);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("email".parse::<FieldTag>().unwrap(), FieldTag::Email);
        assert_eq!("customer_id".parse::<FieldTag>().unwrap(), FieldTag::CustomerId);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        assert!(matches!(
            "SHOE_SIZE".parse::<FieldTag>(),
            Err(Error::UnknownTag(_))
        ));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&FieldTag::CustomerId).unwrap();
        assert_eq!(json, "\"CUSTOMER_ID\"");
    }
}
