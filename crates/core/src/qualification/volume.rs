use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::weight::Kilograms;

/// Kilograms assumed per unit when a volume is given as a piece count.
pub const KG_PER_UNIT: u32 = 20;

pub const KG_PER_TONNE: u32 = 1000;

const TONNE_MARKERS: [&str; 2] = ["ton", " t "];
const UNIT_MARKERS: [&str; 4] = ["unidade", " un", "pç", "peça"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    Tonnes,
    Units,
    Kilograms,
}

impl VolumeUnit {
    pub fn factor(self) -> Decimal {
        match self {
            VolumeUnit::Tonnes => Decimal::from(KG_PER_TONNE),
            VolumeUnit::Units => Decimal::from(KG_PER_UNIT),
            VolumeUnit::Kilograms => Decimal::ONE,
        }
    }

    /// Infers the unit from markers in already-lowercased text.
    ///
    /// Tonnage wins over piece counts; anything else is read as kilograms.
    pub fn infer(text: &str) -> Self {
        if TONNE_MARKERS.iter().any(|marker| text.contains(marker)) || text.ends_with('t') {
            VolumeUnit::Tonnes
        } else if UNIT_MARKERS.iter().any(|marker| text.contains(marker)) {
            VolumeUnit::Units
        } else {
            VolumeUnit::Kilograms
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedVolume {
    pub amount: Decimal,
    pub unit: VolumeUnit,
    pub kilograms: Kilograms,
}

/// Parses a free-text volume such as `"5 toneladas"` or `"500kg"`.
///
/// Returns `None` when the text is absent, blank, carries no numeric token,
/// the first numeric token is not a number, or the weight overflows.
pub fn parse_volume(text: Option<&str>) -> Option<ParsedVolume> {
    let text = text?.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let amount = parse_amount(first_numeric_token(&text)?)?;
    let unit = VolumeUnit::infer(&text);

    let kilograms = amount.checked_mul(unit.factor())?;

    Some(ParsedVolume { amount, unit, kilograms: Kilograms::new(kilograms) })
}

/// Lenient form of [`parse_volume`]: anything unparseable weighs zero.
pub fn parse_volume_kg(text: Option<&str>) -> Kilograms {
    parse_volume(text).map(|parsed| parsed.kilograms).unwrap_or(Kilograms::ZERO)
}

fn first_numeric_token(text: &str) -> Option<&str> {
    let is_numeric = |ch: char| ch.is_ascii_digit() || ch == '.' || ch == ',';
    let start = text.find(is_numeric)?;
    let rest = &text[start..];
    let end = rest.find(|ch: char| !is_numeric(ch)).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Reads a token of digits and separators, commas counting as decimal points.
fn parse_amount(token: &str) -> Option<Decimal> {
    let token = token.replace(',', ".");
    let (whole, fraction) = match token.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (token.as_str(), ""),
    };
    if fraction.contains('.') || (whole.is_empty() && fraction.is_empty()) {
        return None;
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let normalized =
        if fraction.is_empty() { whole.to_owned() } else { format!("{whole}.{fraction}") };
    Decimal::from_str(&normalized).ok()
}
