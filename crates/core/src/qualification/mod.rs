//! Lead qualification rules.
//!
//! Every operation is pure over immutable data. The free functions at the
//! bottom of this module run against a process-wide engine built from the
//! built-in region table and catalog; use [`DeterministicQualificationEngine`]
//! directly when a different table is configured.
//!
//! The disqualification pipeline only rejects on attributes that were
//! actually supplied. A lead with no attributes is qualified; check
//! [`Verdict::skipped_rules`] before treating a qualified verdict as proof.

pub mod catalog;
pub mod cnpj;
pub mod completeness;
pub mod disqualification;
pub mod regions;
pub mod scoring;
pub mod volume;

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use self::{
    catalog::ProductCatalog,
    disqualification::Verdict,
    regions::RegionThresholdTable,
    volume::parse_volume_kg as parse_kilograms,
};
use crate::config::AppConfig;
use crate::domain::lead::{present, LeadAttributes};
use crate::domain::weight::Kilograms;
use crate::errors::ApplicationError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadAssessment {
    pub score: u8,
    pub verdict: Verdict,
}

pub trait QualificationEngine: Send + Sync {
    fn regions(&self) -> &RegionThresholdTable;
    fn catalog(&self) -> &ProductCatalog;

    fn compute_score(&self, volume_estimate: Option<&str>, urgency: Option<&str>) -> u8 {
        scoring::compute_score(volume_estimate, urgency)
    }

    fn is_region_served(&self, region: Option<&str>) -> bool {
        present(region).is_some_and(|code| self.regions().contains(code))
    }

    fn get_minimum_for_region(&self, region: &str) -> Option<u32> {
        self.regions().minimum_for(region)
    }

    fn meets_minimum_volume(&self, volume_estimate: Option<&str>, region: Option<&str>) -> bool {
        let minimum_kg = self.regions().minimum_or_default(present(region));
        parse_kilograms(volume_estimate) >= Kilograms::from_whole(minimum_kg)
    }

    fn is_product_available(&self, product: Option<&str>) -> bool {
        self.catalog().is_available(product)
    }

    fn check_disqualification(
        &self,
        region: Option<&str>,
        volume_estimate: Option<&str>,
        product: Option<&str>,
    ) -> Verdict {
        disqualification::check_disqualification(
            self.regions(),
            self.catalog(),
            region,
            volume_estimate,
            product,
        )
    }

    fn assess(&self, attributes: &LeadAttributes) -> LeadAssessment {
        let score = self
            .compute_score(attributes.volume_estimate.as_deref(), attributes.urgency.as_deref());
        let verdict = self.check_disqualification(
            attributes.region.as_deref(),
            attributes.volume_estimate.as_deref(),
            attributes.product.as_deref(),
        );

        tracing::debug!(
            event_name = "qualification.verdict",
            score,
            disqualified = verdict.disqualified,
            rule = ?verdict.rule,
            skipped_rules = ?verdict.skipped_rules,
            "lead assessed"
        );

        LeadAssessment { score, verdict }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeterministicQualificationEngine {
    regions: RegionThresholdTable,
    catalog: ProductCatalog,
}

impl DeterministicQualificationEngine {
    pub fn new(regions: RegionThresholdTable, catalog: ProductCatalog) -> Self {
        Self { regions, catalog }
    }

    /// Uses the configured region table when one is set, else the built-in.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        let regions = match &config.qualification.region_table_path {
            Some(path) => RegionThresholdTable::from_path(path)?,
            None => RegionThresholdTable::builtin(),
        };
        Ok(Self::new(regions, ProductCatalog::builtin()))
    }
}

impl QualificationEngine for DeterministicQualificationEngine {
    fn regions(&self) -> &RegionThresholdTable {
        &self.regions
    }

    fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }
}

static DEFAULT_ENGINE: OnceLock<DeterministicQualificationEngine> = OnceLock::new();

pub fn default_engine() -> &'static DeterministicQualificationEngine {
    DEFAULT_ENGINE.get_or_init(DeterministicQualificationEngine::default)
}

pub fn parse_volume_kg(text: Option<&str>) -> Kilograms {
    parse_kilograms(text)
}

pub fn compute_score(volume_estimate: Option<&str>, urgency: Option<&str>) -> u8 {
    default_engine().compute_score(volume_estimate, urgency)
}

pub fn is_region_served(region: Option<&str>) -> bool {
    default_engine().is_region_served(region)
}

pub fn meets_minimum_volume(volume_estimate: Option<&str>, region: Option<&str>) -> bool {
    default_engine().meets_minimum_volume(volume_estimate, region)
}

pub fn is_product_available(product: Option<&str>) -> bool {
    default_engine().is_product_available(product)
}

pub fn check_disqualification(
    region: Option<&str>,
    volume_estimate: Option<&str>,
    product: Option<&str>,
) -> Verdict {
    default_engine().check_disqualification(region, volume_estimate, product)
}

pub fn get_minimum_for_region(region: &str) -> Option<u32> {
    default_engine().get_minimum_for_region(region)
}

pub fn assess(attributes: &LeadAttributes) -> LeadAssessment {
    default_engine().assess(attributes)
}
