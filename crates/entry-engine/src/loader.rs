use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::decision::Disposition;
use crate::evaluator::decide;

/// Errors that can occur while reading an input file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {} as JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} must hold a JSON {expected}", .path.display())]
    Shape {
        path: PathBuf,
        expected: &'static str,
    },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Load a batch of entry records (a JSON list).
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<Value>, LoadError> {
    load_list(path.as_ref())
}

/// Load a watchlist (a JSON list of `{first_name, last_name, passport}`).
pub fn load_watchlist(path: impl AsRef<Path>) -> Result<Vec<Value>, LoadError> {
    load_list(path.as_ref())
}

/// Load a country table: a JSON mapping keyed by country code, or a list of
/// country objects.
pub fn load_countries(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    let path = path.as_ref();
    match load_json(path)? {
        v @ (Value::Object(_) | Value::Array(_)) => Ok(v),
        _ => Err(LoadError::Shape {
            path: path.to_path_buf(),
            expected: "object or list",
        }),
    }
}

/// Read all three inputs from disk and decide every entry.
///
/// Files are only read; a missing file surfaces as [`LoadError::NotFound`].
pub fn decide_files(
    entries: impl AsRef<Path>,
    watchlist: impl AsRef<Path>,
    countries: impl AsRef<Path>,
) -> Result<Vec<Disposition>, LoadError> {
    let entries = load_entries(entries)?;
    let watchlist = load_watchlist(watchlist)?;
    let countries = load_countries(countries)?;
    Ok(decide(&entries, &watchlist, &countries))
}

fn load_list(path: &Path) -> Result<Vec<Value>, LoadError> {
    match load_json(path)? {
        Value::Array(items) => Ok(items),
        _ => Err(LoadError::Shape {
            path: path.to_path_buf(),
            expected: "list",
        }),
    }
}

fn load_json(path: &Path) -> Result<Value, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    serde_json::from_str(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_with(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn load_list_of_entries() {
        let f = file_with(r#"[{"passport": "A"}, {"passport": "B"}]"#);
        assert_eq!(load_entries(f.path()).unwrap().len(), 2);
    }

    #[test]
    fn countries_may_be_mapping_or_list() {
        let f = file_with(r#"{"KAN": {"code": "KAN"}}"#);
        assert!(load_countries(f.path()).unwrap().is_object());
        let f = file_with(r#"[{"code": "KAN"}]"#);
        assert!(load_countries(f.path()).unwrap().is_array());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_entries("/does/not/exist.json").unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn empty_path_is_not_found() {
        let err = load_watchlist("").unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let f = file_with("[{");
        let err = load_entries(f.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "unexpected error: {err}");
    }

    #[test]
    fn entries_must_be_a_list() {
        let f = file_with(r#"{"passport": "A"}"#);
        let err = load_entries(f.path()).unwrap_err();
        assert!(
            err.to_string().contains("must hold a JSON list"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn countries_must_not_be_a_scalar() {
        let f = file_with("42");
        let err = load_countries(f.path()).unwrap_err();
        assert!(matches!(err, LoadError::Shape { .. }));
    }
}
