use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::{debug, warn};

use crate::normalize::normalize;
use crate::schema::{flag_value, Country, WatchEntry};

/// Read-only lookup structures for one decision run.
///
/// Built from the normalized watchlist and country table; rule predicates
/// borrow it and never change it.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    countries: HashMap<String, Country>,
    watch_passports: HashSet<String>,
    watch_names: HashSet<String>,
    /// Returned for codes absent from the table.
    unknown: Country,
}

impl ReferenceIndex {
    /// Build the index from a watchlist (a sequence of entries) and a country
    /// table (a mapping keyed by country code, or a sequence of country
    /// objects with a `code` field).
    pub fn build(watchlist: &[Value], countries: &Value) -> Self {
        let mut index = Self::default();

        for raw in watchlist {
            let entry: WatchEntry = serde_json::from_value(normalize(raw)).unwrap_or_default();
            if !entry.passport.is_empty() {
                index.watch_passports.insert(entry.passport.clone());
            }
            if !entry.first_name.is_empty() && !entry.last_name.is_empty() {
                index.watch_names.insert(entry.full_name());
            }
        }

        match countries {
            Value::Object(table) => {
                for (code, raw) in table {
                    index.insert_country(Some(code), raw);
                }
            }
            Value::Array(list) => {
                for raw in list {
                    index.insert_country(None, raw);
                }
            }
            other => {
                warn!(kind = json_kind(other), "country table is neither a mapping nor a list; ignoring it");
            }
        }

        debug!(
            countries = index.countries.len(),
            watch_passports = index.watch_passports.len(),
            watch_names = index.watch_names.len(),
            "built reference index"
        );
        index
    }

    fn insert_country(&mut self, key: Option<&str>, raw: &Value) {
        let mut country: Country = serde_json::from_value(normalize(raw)).unwrap_or_default();
        // Visa flags are booleans; normalization would drop them.
        if let Some(v) = raw_member(raw, "visitor_visa_required") {
            country.visitor_visa_required = flag_value(v);
        }
        if let Some(v) = raw_member(raw, "transit_visa_required") {
            country.transit_visa_required = flag_value(v);
        }
        let code = match key {
            Some(k) => k.to_lowercase(),
            None => country.code.clone(),
        };
        if code.is_empty() {
            warn!("country entry without a code; ignoring it");
            return;
        }
        if country.code.is_empty() {
            country.code = code.clone();
        }
        self.countries.insert(code, country);
    }

    /// Look up a country by normalized code.
    ///
    /// Unknown codes resolve to a country with no advisory and no visa
    /// requirements.
    pub fn country(&self, code: &str) -> &Country {
        self.countries.get(code).unwrap_or_else(|| {
            if !code.is_empty() {
                debug!(code, "country code not in table; using defaults");
            }
            &self.unknown
        })
    }

    pub fn is_watched_passport(&self, passport: &str) -> bool {
        self.watch_passports.contains(passport)
    }

    /// `name` must be in `"first last"` form.
    pub fn is_watched_name(&self, name: &str) -> bool {
        self.watch_names.contains(name)
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }
}

/// Case-insensitive member lookup on an un-normalized mapping.
///
/// An exact lowercase key wins over its case variants, as in [`normalize`].
fn raw_member<'a>(raw: &'a Value, field: &str) -> Option<&'a Value> {
    let map = raw.as_object()?;
    map.get(field).or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(field))
            .map(|(_, v)| v)
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
