use serde::{Deserialize, Serialize};

/// Attributes the orchestrator extracted from the conversation so far.
///
/// Every field is optional and trusted as given. An absent or empty field
/// means "not collected yet", never "invalid".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadAttributes {
    pub region: Option<String>,
    pub volume_estimate: Option<String>,
    pub urgency: Option<String>,
    pub product: Option<String>,
}

/// Contact and order data required before a lead can be handed to quoting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadProfile {
    pub name: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub cnpj: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub product: Option<String>,
    pub volume_estimate: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Name,
    Whatsapp,
    Email,
    Cnpj,
    Region,
    City,
    Product,
    VolumeEstimate,
}

impl LeadField {
    pub const REQUIRED: [LeadField; 8] = [
        LeadField::Name,
        LeadField::Whatsapp,
        LeadField::Email,
        LeadField::Cnpj,
        LeadField::Region,
        LeadField::City,
        LeadField::Product,
        LeadField::VolumeEstimate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LeadField::Name => "Nome completo",
            LeadField::Whatsapp => "WhatsApp",
            LeadField::Email => "E-mail",
            LeadField::Cnpj => "CNPJ",
            LeadField::Region => "UF",
            LeadField::City => "Cidade",
            LeadField::Product => "Produto",
            LeadField::VolumeEstimate => "Volume estimado",
        }
    }
}

impl LeadProfile {
    pub fn value(&self, field: LeadField) -> Option<&str> {
        let value = match field {
            LeadField::Name => &self.name,
            LeadField::Whatsapp => &self.whatsapp,
            LeadField::Email => &self.email,
            LeadField::Cnpj => &self.cnpj,
            LeadField::Region => &self.region,
            LeadField::City => &self.city,
            LeadField::Product => &self.product,
            LeadField::VolumeEstimate => &self.volume_estimate,
        };
        value.as_deref()
    }

    pub fn attributes(&self) -> LeadAttributes {
        LeadAttributes {
            region: self.region.clone(),
            volume_estimate: self.volume_estimate.clone(),
            urgency: None,
            product: self.product.clone(),
        }
    }
}

/// Returns the value unless it is absent or the empty string.
///
/// Whitespace-only text counts as supplied, so the rule it feeds still runs.
pub(crate) fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Returns the trimmed value when it carries any content.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
