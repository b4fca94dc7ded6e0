//! Batch screening scenarios driven by the JSON fixtures in `tests/fixtures`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use entry_engine::loader::{decide_files, load_countries, load_entries, load_watchlist};
use entry_engine::{decide_on, Disposition, EntryEngine, LoadError};

use Disposition::{Accept, Quarantine, Reject, Secondary};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn screen(entries: &str) -> Vec<Disposition> {
    let records = load_entries(fixture(entries)).expect("entries fixture should load");
    let watchlist = load_watchlist(fixture("watchlist.json")).expect("watchlist should load");
    let countries = load_countries(fixture("countries.json")).expect("countries should load");
    decide_on(&records, &watchlist, &countries, today())
}

#[test]
fn returning_citizens() {
    assert_eq!(screen("returning_citizen.json"), [Accept, Accept, Quarantine]);
}

#[test]
fn watchlisted_passport_or_name() {
    assert_eq!(screen("watchlist1.json"), [Secondary, Secondary]);
}

#[test]
fn half_a_watchlisted_name() {
    assert_eq!(screen("watchlist2.json"), [Accept, Accept]);
}

#[test]
fn quarantine_from_advisory_country() {
    assert_eq!(screen("quarantine.json"), [Quarantine, Accept]);
}

#[test]
fn quarantine_via_advisory_country() {
    assert_eq!(screen("quarantine_via.json"), [Quarantine]);
}

#[test]
fn incomplete_records() {
    assert_eq!(screen("incomplete.json"), [Reject, Reject, Reject]);
}

#[test]
fn invalid_visas() {
    assert_eq!(screen("invalid_visa.json"), [Reject; 5]);
}

#[test]
fn valid_visa() {
    assert_eq!(screen("valid_visa.json"), [Accept]);
}

#[test]
fn valid_visa_expires_after_two_years() {
    let records = load_entries(fixture("valid_visa.json")).unwrap();
    let watchlist = load_watchlist(fixture("watchlist.json")).unwrap();
    let countries = load_countries(fixture("countries.json")).unwrap();

    let last_day = NaiveDate::from_ymd_opt(2028, 1, 15).unwrap();
    let day_after = NaiveDate::from_ymd_opt(2028, 1, 16).unwrap();
    assert_eq!(decide_on(&records, &watchlist, &countries, last_day), [Accept]);
    assert_eq!(decide_on(&records, &watchlist, &countries, day_after), [Reject]);
}

#[test]
fn visa_not_needed() {
    assert_eq!(screen("visa_not_needed.json"), [Accept, Accept]);
}

#[test]
fn case_insensitivity() {
    assert_eq!(screen("case_insensitivity.json"), [Accept, Secondary]);
}

#[test]
fn conflicts_resolve_by_priority() {
    assert_eq!(screen("conflicts1.json"), [Quarantine, Reject, Secondary]);
}

#[test]
fn reject_beats_secondary() {
    assert_eq!(screen("conflicts2.json"), [Reject]);
}

#[test]
fn country_table_as_list() {
    let records = load_entries(fixture("returning_citizen.json")).unwrap();
    let watchlist = load_watchlist(fixture("watchlist.json")).unwrap();
    let countries = load_countries(fixture("countries_list.json")).unwrap();
    assert_eq!(
        decide_on(&records, &watchlist, &countries, today()),
        [Accept, Accept, Quarantine]
    );
}

#[test]
fn boolean_visa_flags_require_a_visa() {
    let countries = serde_json::json!({
        "GOR": {"code": "GOR", "visitor_visa_required": true, "transit_visa_required": false,
                "medical_advisory": ""}
    });
    let records = [serde_json::json!({
        "passport": "JMZ0S-89IA9-OTCLY-MQILJ-P7CTY",
        "first_name": "Wanda",
        "last_name": "Ross",
        "birth_date": "1985-03-02",
        "home": {"city": "Gorgeous", "region": "GG", "country": "GOR"},
        "entry_reason": "visit",
        "from": {"city": "Gorgeous", "region": "GG", "country": "GOR"}
    })];
    assert_eq!(decide_on(&records, &[], &countries, today()), [Reject]);
}

#[test]
fn explanations_follow_labels() {
    let records = load_entries(fixture("conflicts1.json")).unwrap();
    let watchlist = load_watchlist(fixture("watchlist.json")).unwrap();
    let countries = load_countries(fixture("countries.json")).unwrap();
    let engine = EntryEngine::on(&watchlist, &countries, today());

    let decisions = engine.explain(&records);
    let rules: Vec<_> = decisions.iter().map(|d| d.matched_rule.as_deref()).collect();
    assert_eq!(rules, [Some("quarantine"), Some("reject"), Some("secondary")]);
    assert_eq!(decisions[0].reason, "medical advisory in 'ele': measles");
    assert_eq!(decisions[1].reason, "visit visa required but none presented");
    assert_eq!(decisions[2].reason, "passport is on the watchlist");
}

#[test]
fn error_file_not_found() {
    let err = decide_files(
        fixture("returning_citizen.json"),
        "",
        fixture("countries.json"),
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }), "unexpected error: {err}");
}

#[test]
fn files_not_modified() {
    let dir = tempfile::tempdir().unwrap();
    let names = ["example_entries.json", "watchlist.json", "countries.json"];
    let copies: Vec<PathBuf> = names
        .iter()
        .map(|name| {
            let dest = dir.path().join(name);
            fs::copy(fixture(name), &dest).unwrap();
            dest
        })
        .collect();

    let snapshot = |paths: &[PathBuf]| {
        paths
            .iter()
            .map(|p| {
                let meta = fs::metadata(p).unwrap();
                (fs::read(p).unwrap(), meta.modified().unwrap())
            })
            .collect::<Vec<_>>()
    };

    let before = snapshot(&copies);
    let labels = decide_files(&copies[0], &copies[1], &copies[2]).unwrap();
    let after = snapshot(&copies);

    assert_eq!(labels, [Accept, Quarantine, Secondary]);
    assert_eq!(before, after);
}
