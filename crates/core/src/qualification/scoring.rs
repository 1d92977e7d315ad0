use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::volume::parse_volume_kg;

pub const MAX_SCORE: u8 = 100;
pub const MAX_VOLUME_POINTS: u8 = 70;
pub const URGENCY_POINTS: u8 = 30;

pub const URGENCY_KEYWORDS: [&str; 5] = ["urgente", "imediato", "hoje", "amanhã", "semana"];

/// Interest score in `0..=100`: one point per 100 kg (capped at 70) plus a
/// flat bonus when the urgency text mentions a near-term deadline.
pub fn compute_score(volume_estimate: Option<&str>, urgency: Option<&str>) -> u8 {
    let score = volume_points(volume_estimate).saturating_add(urgency_points(urgency));
    score.min(MAX_SCORE)
}

pub fn volume_points(volume_estimate: Option<&str>) -> u8 {
    let kilograms = parse_volume_kg(volume_estimate);
    if kilograms.value() <= Decimal::ZERO {
        return 0;
    }
    let capped = kilograms.hundreds().min(Decimal::from(MAX_VOLUME_POINTS));
    capped.to_u8().unwrap_or(0)
}

pub fn is_urgent(urgency: Option<&str>) -> bool {
    urgency
        .map(str::to_lowercase)
        .is_some_and(|text| URGENCY_KEYWORDS.iter().any(|keyword| text.contains(keyword)))
}

pub fn urgency_points(urgency: Option<&str>) -> u8 {
    if is_urgent(urgency) {
        URGENCY_POINTS
    } else {
        0
    }
}
