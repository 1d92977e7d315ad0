pub mod config;
pub mod domain;
pub mod errors;
pub mod qualification;

pub use domain::lead::{LeadAttributes, LeadField, LeadProfile};
pub use domain::region::RegionCode;
pub use domain::weight::Kilograms;
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use qualification::catalog::{CatalogEntry, ProductCatalog, ProductFamily};
pub use qualification::disqualification::{DisqualificationRule, QualificationState, Verdict};
pub use qualification::regions::{RegionThresholdTable, DEFAULT_MINIMUM_KG};
pub use qualification::volume::{ParsedVolume, VolumeUnit};
pub use qualification::{
    assess, check_disqualification, compute_score, get_minimum_for_region, is_product_available,
    is_region_served, meets_minimum_volume, parse_volume_kg, DeterministicQualificationEngine,
    LeadAssessment, QualificationEngine,
};
