use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::normalize::normalize;

/// Top-level fields a record must carry, non-empty, to be considered complete.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "passport",
    "first_name",
    "last_name",
    "birth_date",
    "home",
    "entry_reason",
    "from",
];

/// One traveller's entry application, after normalization.
///
/// Textual fields read as `""` when the source omits them or holds something
/// other than a string.  Location and visa sub-objects are `None` unless the
/// source holds a mapping there.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Record {
    #[serde(deserialize_with = "text")]
    pub passport: String,
    #[serde(deserialize_with = "text")]
    pub first_name: String,
    #[serde(deserialize_with = "text")]
    pub last_name: String,
    #[serde(deserialize_with = "text")]
    pub birth_date: String,
    #[serde(deserialize_with = "text")]
    pub entry_reason: String,
    #[serde(deserialize_with = "mapping")]
    pub home: Option<Location>,
    #[serde(deserialize_with = "mapping")]
    pub from: Option<Location>,
    #[serde(deserialize_with = "mapping")]
    pub via: Option<Location>,
    #[serde(deserialize_with = "mapping")]
    pub visa: Option<Visa>,
    /// Required fields found missing or empty when the record was read.
    #[serde(skip)]
    missing: Vec<&'static str>,
}

impl Record {
    /// Normalize a raw record and read it into its typed form.
    ///
    /// Never fails: anything that is not a mapping yields an empty record
    /// with every required field reported missing.
    pub fn from_value(raw: &Value) -> Self {
        let normalized = normalize(raw);
        let missing = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !is_filled(normalized.get(field)))
            .collect();
        let mut record: Record = serde_json::from_value(normalized).unwrap_or_default();
        record.missing = missing;
        record
    }

    /// Required fields that were missing or empty.
    pub fn missing_fields(&self) -> &[&'static str] {
        &self.missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn home_country(&self) -> &str {
        country_of(self.home.as_ref())
    }

    pub fn from_country(&self) -> &str {
        country_of(self.from.as_ref())
    }

    pub fn via_country(&self) -> &str {
        country_of(self.via.as_ref())
    }

    /// `"first last"`, the form watchlisted names are stored in.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn country_of(location: Option<&Location>) -> &str {
    location.map_or("", |l| l.country.as_str())
}

/// A field counts as filled when it holds a non-empty string or a non-empty
/// mapping.  After normalization nothing else can be present.
fn is_filled(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Object(m)) => !m.is_empty(),
        _ => false,
    }
}

/// A place a traveller lives in, comes from, or passes through.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "text")]
    pub country: String,
    #[serde(deserialize_with = "text")]
    pub city: String,
    #[serde(deserialize_with = "text")]
    pub region: String,
}

/// Visa details attached to a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Visa {
    #[serde(deserialize_with = "text")]
    pub code: String,
    #[serde(deserialize_with = "text")]
    pub date: String,
}

/// Entry requirements for one country.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Country {
    #[serde(deserialize_with = "text")]
    pub code: String,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "flag")]
    pub visitor_visa_required: bool,
    #[serde(deserialize_with = "flag")]
    pub transit_visa_required: bool,
    /// Empty when the country has no advisory.
    #[serde(deserialize_with = "text")]
    pub medical_advisory: String,
}

impl Country {
    pub fn has_medical_advisory(&self) -> bool {
        !self.medical_advisory.is_empty()
    }
}

/// A watchlist entry: a flagged passport and a flagged name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WatchEntry {
    #[serde(deserialize_with = "text")]
    pub first_name: String,
    #[serde(deserialize_with = "text")]
    pub last_name: String,
    #[serde(deserialize_with = "text")]
    pub passport: String,
}

impl WatchEntry {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ---------------------------------------------------------------------------
// Lenient field readers used by serde
// ---------------------------------------------------------------------------

/// Read a string, treating any other JSON value as absent.
fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Read a yes/no flag: a JSON boolean, a non-zero number, or text such as
/// `"1"` or `"true"`.
fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(flag_value(&Value::deserialize(d)?))
}

pub(crate) fn flag_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "y"),
        _ => false,
    }
}

/// Read a nested mapping, treating any other JSON value as absent.
fn mapping<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(d)? {
        v @ Value::Object(_) => serde_json::from_value(v).ok(),
        _ => None,
    })
}
