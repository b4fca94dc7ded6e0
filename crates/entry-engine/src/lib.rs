//! # entry-engine
//!
//! Core screening logic for the Kanadia border office.  This crate takes
//! already-parsed traveller records, a watchlist and a country table,
//! normalizes them for case-insensitive matching, and assigns each record one
//! of four dispositions by evaluating a fixed, priority-ordered rule set.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use entry_engine::{decide, loader};
//!
//! let entries = loader::load_entries("entries.json").unwrap();
//! let watchlist = loader::load_watchlist("watchlist.json").unwrap();
//! let countries = loader::load_countries("countries.json").unwrap();
//! let labels = decide(&entries, &watchlist, &countries);
//! println!("{:?}", labels);
//! ```

mod decision;
mod evaluator;
pub mod format;
pub mod loader;
pub mod normalize;
mod reference;
pub mod rules;
mod schema;

// Re-export primary public API at crate root.
pub use decision::{Disposition, EntryDecision};
pub use evaluator::{decide, decide_on, EntryEngine};
pub use format::{valid_date_format, valid_passport_format, valid_visa_format};
pub use loader::LoadError;
pub use normalize::normalize;
pub use reference::ReferenceIndex;
pub use schema::{Country, Location, Record, Visa, WatchEntry, REQUIRED_FIELDS};
