use serde::{Deserialize, Serialize};

use super::catalog::ProductCatalog;
use super::regions::RegionThresholdTable;
use super::volume::parse_volume_kg;
use crate::domain::lead::supplied;
use crate::domain::weight::Kilograms;

/// Disqualification rules, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisqualificationRule {
    Region,
    Volume,
    Product,
}

impl DisqualificationRule {
    pub const ORDER: [DisqualificationRule; 3] =
        [DisqualificationRule::Region, DisqualificationRule::Volume, DisqualificationRule::Product];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationState {
    Qualified,
    DisqualifiedByRegion,
    DisqualifiedByVolume,
    DisqualifiedByProduct,
}

/// Outcome of the disqualification pipeline.
///
/// A qualified verdict only means no *supplied* attribute failed a rule.
/// `skipped_rules` lists the rules that were reached but had nothing to
/// check, so a lead with no attributes at all is qualified with every rule
/// skipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub disqualified: bool,
    pub reason: String,
    pub rule: Option<DisqualificationRule>,
    pub skipped_rules: Vec<DisqualificationRule>,
}

impl Verdict {
    pub fn qualified(skipped_rules: Vec<DisqualificationRule>) -> Self {
        Self { disqualified: false, reason: String::new(), rule: None, skipped_rules }
    }

    pub fn disqualified(
        rule: DisqualificationRule,
        reason: impl Into<String>,
        skipped_rules: Vec<DisqualificationRule>,
    ) -> Self {
        Self { disqualified: true, reason: reason.into(), rule: Some(rule), skipped_rules }
    }

    pub fn state(&self) -> QualificationState {
        match self.rule {
            None => QualificationState::Qualified,
            Some(DisqualificationRule::Region) => QualificationState::DisqualifiedByRegion,
            Some(DisqualificationRule::Volume) => QualificationState::DisqualifiedByVolume,
            Some(DisqualificationRule::Product) => QualificationState::DisqualifiedByProduct,
        }
    }

    /// True when the lead passed without any rule actually being checked.
    pub fn qualified_by_omission(&self) -> bool {
        !self.disqualified && self.skipped_rules.len() == DisqualificationRule::ORDER.len()
    }
}

/// Runs region → volume → product; the first failing rule ends the pipeline.
pub fn check_disqualification(
    regions: &RegionThresholdTable,
    catalog: &ProductCatalog,
    region: Option<&str>,
    volume_estimate: Option<&str>,
    product: Option<&str>,
) -> Verdict {
    let region = supplied(region);
    let volume_estimate = supplied(volume_estimate);
    let product = supplied(product);
    let mut skipped = Vec::new();

    match region {
        Some(code) if !regions.contains(code) => {
            return Verdict::disqualified(
                DisqualificationRule::Region,
                region_reason(regions, code),
                skipped,
            );
        }
        Some(_) => {}
        None => skipped.push(DisqualificationRule::Region),
    }

    match volume_estimate {
        Some(volume) => {
            let kilograms = parse_volume_kg(Some(volume));
            let minimum_kg = regions.minimum_or_default(region);
            if kilograms < Kilograms::from_whole(minimum_kg) {
                return Verdict::disqualified(
                    DisqualificationRule::Volume,
                    volume_reason(volume, kilograms, minimum_kg, region),
                    skipped,
                );
            }
        }
        None => skipped.push(DisqualificationRule::Volume),
    }

    match product {
        Some(name) if !catalog.is_available(Some(name)) => {
            return Verdict::disqualified(
                DisqualificationRule::Product,
                product_reason(catalog, name),
                skipped,
            );
        }
        Some(_) => {}
        None => skipped.push(DisqualificationRule::Product),
    }

    Verdict::qualified(skipped)
}

fn region_reason(regions: &RegionThresholdTable, code: &str) -> String {
    let served = regions.codes().map(|code| code.as_str()).collect::<Vec<_>>().join(", ");
    format!(
        "Infelizmente não atendemos o estado {}. Atendemos os estados: {served}.",
        code.trim().to_uppercase()
    )
}

fn volume_reason(
    volume: &str,
    kilograms: Kilograms,
    minimum_kg: u32,
    region: Option<&str>,
) -> String {
    let minimum = Kilograms::from_whole(minimum_kg);
    let shortfall = Kilograms::new(minimum.value() - kilograms.value());
    let scope = match region {
        Some(code) => format!("para o estado {}", code.trim().to_uppercase()),
        None => "por pedido".to_owned(),
    };
    format!(
        "O volume informado ({volume}) equivale a {kilograms}, abaixo do mínimo de {minimum} {scope}. Faltam {shortfall}."
    )
}

fn product_reason(catalog: &ProductCatalog, name: &str) -> String {
    let families = catalog.families().iter().map(|family| family.label()).collect::<Vec<_>>();
    let families = match families.split_last() {
        Some((last, [])) => (*last).to_owned(),
        Some((last, rest)) => format!("{} e {last}", rest.join(", ")),
        None => String::new(),
    };
    format!(
        "O produto '{name}' não está disponível no nosso portfólio. Trabalhamos com {families}."
    )
}
