use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing::{debug, trace};

use crate::decision::{Disposition, EntryDecision};
use crate::reference::ReferenceIndex;
use crate::rules::{RuleContext, RULES};
use crate::schema::Record;

// ---------------------------------------------------------------------------
// EntryEngine
// ---------------------------------------------------------------------------

/// Screening engine for one decision run.
///
/// Construct via [`EntryEngine::new`], which normalizes the watchlist and
/// country table into a [`ReferenceIndex`] once; every record evaluated
/// afterwards is checked against that index.
pub struct EntryEngine {
    index: ReferenceIndex,
    /// Date visa ages are measured against.
    today: NaiveDate,
}

impl std::fmt::Debug for EntryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryEngine")
            .field("today", &self.today)
            .field("num_countries", &self.index.country_count())
            .finish()
    }
}

impl EntryEngine {
    /// Build an engine that measures visa ages against the local date.
    pub fn new(watchlist: &[Value], countries: &Value) -> Self {
        Self::on(watchlist, countries, Local::now().date_naive())
    }

    /// Build an engine that measures visa ages against `today`.
    pub fn on(watchlist: &[Value], countries: &Value, today: NaiveDate) -> Self {
        Self {
            index: ReferenceIndex::build(watchlist, countries),
            today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    // -- Evaluate entry points ------------------------------------------------

    /// Screen one raw record.
    pub fn evaluate(&self, raw: &Value) -> EntryDecision {
        let record = Record::from_value(raw);
        self.evaluate_record(&record)
    }

    /// Screen one record that has already been normalized and typed.
    pub fn evaluate_record(&self, record: &Record) -> EntryDecision {
        debug!(passport = record.passport, "screening record");

        let ctx = RuleContext {
            index: &self.index,
            today: self.today,
        };

        for rule in &RULES {
            if (rule.applies)(record, &ctx) {
                trace!(rule = rule.name, "rule matched record");
                let reason = (rule.explain)(record, &ctx);
                return EntryDecision::from_rule(rule.disposition, rule.name, reason);
            }
        }

        EntryDecision::accept_default("no rule matched the record")
    }

    /// Screen a batch, one decision per record in input order.
    pub fn explain(&self, records: &[Value]) -> Vec<EntryDecision> {
        records.iter().map(|r| self.evaluate(r)).collect()
    }

    /// Screen a batch, one label per record in input order.
    pub fn decide(&self, records: &[Value]) -> Vec<Disposition> {
        records.iter().map(|r| self.evaluate(r).disposition).collect()
    }
}

/// Decide every record in `records` against a watchlist and country table,
/// measuring visa ages against the local date.
///
/// Builds a fresh [`ReferenceIndex`] for this call; nothing carries over
/// between calls and none of the inputs are modified.
pub fn decide(records: &[Value], watchlist: &[Value], countries: &Value) -> Vec<Disposition> {
    EntryEngine::new(watchlist, countries).decide(records)
}

/// Like [`decide`], with an explicit evaluation date.
pub fn decide_on(
    records: &[Value],
    watchlist: &[Value],
    countries: &Value,
    today: NaiveDate,
) -> Vec<Disposition> {
    EntryEngine::on(watchlist, countries, today).decide(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
