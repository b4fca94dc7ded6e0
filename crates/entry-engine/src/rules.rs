//! Screening rules.
//!
//! Each rule is a pure predicate over one normalized [`Record`] and the
//! [`RuleContext`] of the current run.  [`RULES`] lists them in priority
//! order; the first one that matches decides the record and anything that
//! matches none is accepted.

use chrono::{Months, NaiveDate};

use crate::decision::Disposition;
use crate::format::{parse_date, valid_visa_format};
use crate::reference::ReferenceIndex;
use crate::schema::Record;

/// Country code of Kanadia.  Its citizens never need a visa.
pub const HOME_COUNTRY: &str = "kan";

/// How long a visa stays valid after its issue date.
pub const VISA_VALIDITY: Months = Months::new(24);

/// Everything a rule may consult besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub index: &'a ReferenceIndex,
    /// Date visa ages are measured against.
    pub today: NaiveDate,
}

/// A named entry of the priority-ordered rule table.
pub struct Rule {
    pub name: &'static str,
    pub disposition: Disposition,
    pub applies: fn(&Record, &RuleContext<'_>) -> bool,
    /// Explains a match; only called when `applies` returned true.
    pub explain: fn(&Record, &RuleContext<'_>) -> String,
}

/// Rules in descending priority.
pub static RULES: [Rule; 3] = [
    Rule {
        name: "quarantine",
        disposition: Disposition::Quarantine,
        applies: is_quarantine,
        explain: explain_quarantine,
    },
    Rule {
        name: "reject",
        disposition: Disposition::Reject,
        applies: is_reject,
        explain: explain_reject,
    },
    Rule {
        name: "secondary",
        disposition: Disposition::Secondary,
        applies: is_secondary,
        explain: explain_secondary,
    },
];

// ---------------------------------------------------------------------------
// Quarantine
// ---------------------------------------------------------------------------

/// The traveller comes from, or travelled via, a country under a medical
/// advisory.  The home country is not considered.
pub fn is_quarantine(record: &Record, ctx: &RuleContext<'_>) -> bool {
    advisory_country(record, ctx).is_some()
}

fn advisory_country<'r>(record: &'r Record, ctx: &RuleContext<'_>) -> Option<&'r str> {
    [record.from_country(), record.via_country()]
        .into_iter()
        .find(|code| ctx.index.country(code).has_medical_advisory())
}

fn explain_quarantine(record: &Record, ctx: &RuleContext<'_>) -> String {
    match advisory_country(record, ctx) {
        Some(code) => format!(
            "medical advisory in '{code}': {}",
            ctx.index.country(code).medical_advisory
        ),
        None => "medical advisory".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Reject
// ---------------------------------------------------------------------------

/// The record is incomplete, or the traveller needs a visa and does not hold
/// a valid one.
pub fn is_reject(record: &Record, ctx: &RuleContext<'_>) -> bool {
    !record.is_complete() || (requires_visa(record, ctx) && !is_valid_visa(record, ctx.today))
}

/// Whether the traveller's home country and entry reason call for a visa.
pub fn requires_visa(record: &Record, ctx: &RuleContext<'_>) -> bool {
    let home = record.home_country();
    if home == HOME_COUNTRY {
        return false;
    }
    let country = ctx.index.country(home);
    match record.entry_reason.as_str() {
        "visit" => country.visitor_visa_required,
        "transit" => country.transit_visa_required,
        _ => false,
    }
}

/// Whether the record carries a well-formed visa issued no more than two
/// calendar years before `today`.
pub fn is_valid_visa(record: &Record, today: NaiveDate) -> bool {
    let Some(visa) = &record.visa else {
        return false;
    };
    if !valid_visa_format(&visa.code) {
        return false;
    }
    let Some(issued) = parse_date(&visa.date) else {
        return false;
    };
    today
        .checked_sub_months(VISA_VALIDITY)
        .is_some_and(|cutoff| issued >= cutoff)
}

fn explain_reject(record: &Record, _ctx: &RuleContext<'_>) -> String {
    if !record.is_complete() {
        return format!("missing required fields: {}", record.missing_fields().join(", "));
    }
    match &record.visa {
        None => format!("{} visa required but none presented", record.entry_reason),
        Some(_) => format!("{} visa is malformed or expired", record.entry_reason),
    }
}

// ---------------------------------------------------------------------------
// Secondary
// ---------------------------------------------------------------------------

/// The traveller's passport or full name is on the watchlist.
pub fn is_secondary(record: &Record, ctx: &RuleContext<'_>) -> bool {
    ctx.index.is_watched_passport(&record.passport)
        || ctx.index.is_watched_name(&record.full_name())
}

fn explain_secondary(record: &Record, ctx: &RuleContext<'_>) -> String {
    if ctx.index.is_watched_passport(&record.passport) {
        "passport is on the watchlist".to_string()
    } else {
        "name is on the watchlist".to_string()
    }
}
