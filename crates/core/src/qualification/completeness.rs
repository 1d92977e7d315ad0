use super::cnpj::is_valid_cnpj;
use crate::domain::lead::{present, LeadField, LeadProfile};

/// Required fields that are still missing, in collection order.
///
/// A CNPJ that fails validation counts as missing. The result says nothing
/// about whether the lead is qualified; see the disqualification pipeline.
pub fn missing_fields(profile: &LeadProfile) -> Vec<LeadField> {
    LeadField::REQUIRED
        .into_iter()
        .filter(|field| !is_filled(profile, *field))
        .collect()
}

pub fn is_complete(profile: &LeadProfile) -> bool {
    missing_fields(profile).is_empty()
}

fn is_filled(profile: &LeadProfile, field: LeadField) -> bool {
    match (field, present(profile.value(field))) {
        (_, None) => false,
        (LeadField::Cnpj, Some(cnpj)) => is_valid_cnpj(cnpj),
        (_, Some(_)) => true,
    }
}
