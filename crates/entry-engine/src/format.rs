use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Five groups of five word characters separated by dashes.
static PASSPORT_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w{5}-\w{5}-\w{5}-\w{5}-\w{5}$").expect("passport pattern is valid")
});

/// Two groups of five word characters separated by a dash.
static VISA_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w{5}-\w{5}$").expect("visa pattern is valid"));

/// Digit layout of an ISO calendar date; calendar validity is checked by chrono.
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid"));

/// Check whether `passport` is five groups of five word characters
/// (letters, digits, underscore) separated by dashes.
pub fn valid_passport_format(passport: &str) -> bool {
    PASSPORT_FORMAT.is_match(passport)
}

/// Check whether `code` is two groups of five word characters separated by
/// a dash.
pub fn valid_visa_format(code: &str) -> bool {
    VISA_FORMAT.is_match(code)
}

/// Check whether `date` is a real calendar date written as `YYYY-MM-DD`.
pub fn valid_date_format(date: &str) -> bool {
    parse_date(date).is_some()
}

/// Parse a `YYYY-MM-DD` date, returning `None` for anything malformed.
///
/// The shape check runs first because chrono's numeric specifiers also accept
/// one-digit months and days.
pub(crate) fn parse_date(date: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(date) {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
