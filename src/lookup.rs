//! Occupational series lookup
//!
//! Static mapping from series code to series title, read once from a JSON
//! side file shaped as `[{"code": "2210", "title": "Information Technology Management"}, ...]`.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::schema::columns::UNKNOWN_SERIES;
use crate::utils::io::read_json;
use crate::utils::logging::{log_operation_start, log_warning};

/// One entry of the lookup file
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesEntry {
    #[serde(deserialize_with = "code_as_string")]
    pub code: String,
    pub title: String,
}

/// Accept codes written either as strings or as bare integers
fn code_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(s) => s,
        Code::Number(n) => n.to_string(),
    })
}

/// Immutable series code to title map
#[derive(Debug, Clone, Default)]
pub struct SeriesLookup {
    titles: FxHashMap<String, String>,
}

impl SeriesLookup {
    /// Load the lookup from a JSON file
    ///
    /// A missing file yields an empty lookup, so every code resolves to
    /// "Unknown Series". Later entries win on duplicate codes.
    ///
    /// # Errors
    /// Returns an error if the file exists but is not valid lookup JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            log_warning("Series lookup file not found, all series will be unmapped", Some(path));
            return Ok(Self::default());
        }

        log_operation_start("Loading occupational series lookup", path);
        let entries: Vec<SeriesEntry> = read_json(path)?;
        let lookup = Self::from_entries(entries);
        log::info!("  {} series codes available", lookup.len());
        Ok(lookup)
    }

    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = SeriesEntry>) -> Self {
        Self {
            titles: entries.into_iter().map(|e| (e.code, e.title)).collect(),
        }
    }

    /// Title for a code, or "Unknown Series" for null and unmapped codes
    #[must_use]
    pub fn resolve(&self, code: Option<&str>) -> &str {
        code.and_then(|c| self.titles.get(c))
            .map_or(UNKNOWN_SERIES, String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
