use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Two-letter code of a Brazilian federative unit, stored uppercase.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    /// Trims and uppercases `raw`. Blank input yields `None`.
    ///
    /// The result is not checked for shape, so unknown codes such as `"XX"` or
    /// `"SAO PAULO"` survive normalisation and simply miss every lookup.
    pub fn normalize(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.to_uppercase())
    }

    /// Strict constructor used for table keys: exactly two ASCII letters.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized =
            Self::normalize(raw).ok_or_else(|| DomainError::InvalidRegionCode(raw.to_owned()))?;
        let well_formed =
            normalized.len() == 2 && normalized.chars().all(|ch| ch.is_ascii_uppercase());
        if !well_formed {
            return Err(DomainError::InvalidRegionCode(raw.to_owned()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RegionCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RegionCode> for String {
    fn from(value: RegionCode) -> Self {
        value.0
    }
}

impl Borrow<str> for RegionCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
