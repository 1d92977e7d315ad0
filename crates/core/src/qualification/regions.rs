//! Minimum order weight per region (CIF freight, carbon steel).
//!
//! The table is immutable once built. The built-in values ship with the
//! crate; operators may replace them with a TOML file of the same shape,
//! which must still cover exactly the 27 federative units.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::region::RegionCode;
use crate::errors::{ApplicationError, DomainError};

/// Threshold used by the minimum-volume check when the region is absent or
/// not in the table.
pub const DEFAULT_MINIMUM_KG: u32 = 1500;

/// Every federative unit the table must cover.
pub const FEDERATIVE_UNITS: [&str; 27] = [
    "AC", "AL", "AM", "AP", "BA", "CE", "DF", "ES", "GO", "MA", "MG", "MS", "MT", "PA", "PB", "PE",
    "PI", "PR", "RJ", "RN", "RO", "RR", "RS", "SC", "SE", "SP", "TO",
];

const BUILTIN_MINIMUMS_KG: [(&str, u32); 27] = [
    // Nordeste; headquarters in Fortaleza/CE
    ("CE", 250),
    ("AL", 1500),
    ("MA", 1500),
    ("PB", 1500),
    ("PI", 1500),
    ("SE", 1500),
    ("BA", 1500),
    ("PE", 1500),
    ("RN", 1500),
    // Norte
    ("PA", 1500),
    ("AC", 10_000),
    ("AM", 10_000),
    ("AP", 8000),
    ("RO", 10_000),
    ("RR", 10_000),
    // Centro-Oeste / Sudeste
    ("GO", 4000),
    ("DF", 4000),
    ("MG", 4000),
    ("SP", 4000),
    ("RJ", 4000),
    ("ES", 4000),
    ("MT", 4000),
    ("MS", 4000),
    ("TO", 4000),
    // Sul
    ("PR", 4000),
    ("RS", 8000),
    ("SC", 8000),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionThresholdTable {
    minimums_kg: BTreeMap<RegionCode, u32>,
}

#[derive(Debug, Deserialize)]
struct RegionTableFile {
    regions: BTreeMap<String, i64>,
}

impl RegionThresholdTable {
    pub fn builtin() -> Self {
        let minimums_kg = BUILTIN_MINIMUMS_KG
            .iter()
            .filter_map(|(code, kg)| RegionCode::parse(code).ok().map(|code| (code, *kg)))
            .collect();
        Self { minimums_kg }
    }

    /// Builds a table from raw entries, enforcing the table invariants:
    /// well-formed codes, positive thresholds, no duplicates and full
    /// coverage of [`FEDERATIVE_UNITS`].
    pub fn from_entries<I, S>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut minimums_kg = BTreeMap::new();

        for (raw_code, minimum_kg) in entries {
            let code = RegionCode::parse(raw_code.as_ref())?;
            if !FEDERATIVE_UNITS.contains(&code.as_str()) {
                return Err(DomainError::UnknownRegion(code.to_string()));
            }
            let minimum = u32::try_from(minimum_kg).ok().filter(|kg| *kg > 0).ok_or_else(|| {
                DomainError::NonPositiveThreshold { code: code.to_string(), minimum_kg }
            })?;
            if minimums_kg.insert(code.clone(), minimum).is_some() {
                return Err(DomainError::InvariantViolation(format!(
                    "region `{code}` is listed more than once"
                )));
            }
        }

        if let Some(missing) =
            FEDERATIVE_UNITS.iter().find(|unit| !minimums_kg.contains_key(**unit))
        {
            return Err(DomainError::MissingRegion((*missing).to_owned()));
        }

        Ok(Self { minimums_kg })
    }

    /// Parses a `[regions]` TOML document, e.g. `CE = 250`.
    pub fn from_toml_str(raw: &str) -> Result<Self, ApplicationError> {
        let file = toml::from_str::<RegionTableFile>(raw).map_err(|error| {
            ApplicationError::Configuration(format!("could not parse region table: {error}"))
        })?;
        Ok(Self::from_entries(file.regions)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ApplicationError> {
        let raw = fs::read_to_string(path).map_err(|error| {
            ApplicationError::Configuration(format!(
                "could not read region table `{}`: {error}",
                path.display()
            ))
        })?;
        let table = Self::from_toml_str(&raw)?;
        tracing::info!(
            event_name = "qualification.region_table.loaded",
            path = %path.display(),
            regions = table.len(),
            "region table loaded from file"
        );
        Ok(table)
    }

    /// Raw lookup: no fallback, unknown codes are `None`.
    pub fn minimum_for(&self, raw_code: &str) -> Option<u32> {
        let normalized = RegionCode::normalize(raw_code)?;
        self.minimums_kg.get(normalized.as_str()).copied()
    }

    /// Minimum for the minimum-volume check: falls back to
    /// [`DEFAULT_MINIMUM_KG`] when the region is absent or unknown.
    pub fn minimum_or_default(&self, raw_code: Option<&str>) -> u32 {
        raw_code.and_then(|code| self.minimum_for(code)).unwrap_or(DEFAULT_MINIMUM_KG)
    }

    pub fn contains(&self, raw_code: &str) -> bool {
        self.minimum_for(raw_code).is_some()
    }

    pub fn codes(&self) -> impl Iterator<Item = &RegionCode> {
        self.minimums_kg.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RegionCode, u32)> {
        self.minimums_kg.iter().map(|(code, minimum)| (code, *minimum))
    }

    pub fn len(&self) -> usize {
        self.minimums_kg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minimums_kg.is_empty()
    }
}

impl Default for RegionThresholdTable {
    fn default() -> Self {
        Self::builtin()
    }
}
