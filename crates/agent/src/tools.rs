use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use steelqual_core::config::AppConfig;
use steelqual_core::errors::InterfaceError;
use steelqual_core::qualification::completeness::missing_fields;
use steelqual_core::qualification::volume::parse_volume;
use steelqual_core::{
    DeterministicQualificationEngine, LeadAttributes, LeadProfile, QualificationEngine,
};

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn execute(&self, input: Value) -> Result<Value>;
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Registry holding every qualification tool, backed by `engine`.
    pub fn with_qualification_tools(engine: Arc<dyn QualificationEngine>) -> Self {
        let mut registry = Self::default();
        registry.register(QualifyLeadTool::new(engine.clone()));
        registry.register(ParseVolumeTool);
        registry.register(RegionMinimumTool::new(engine));
        registry.register(LeadCompletenessTool);
        registry
    }

    /// Builds the engine from `config`; a bad region table is an interface error.
    pub fn from_config(config: &AppConfig) -> Result<Self, InterfaceError> {
        let engine = DeterministicQualificationEngine::from_config(config)
            .map_err(|error| error.into_interface("tool_registry"))?;
        Ok(Self::with_qualification_tools(Arc::new(engine)))
    }

    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub async fn execute(&self, name: &str, input: Value) -> Result<Value> {
        let tool = self.get(name).ok_or_else(|| anyhow!("unknown tool `{name}`"))?;
        let output = tool.execute(input).await;
        if let Err(error) = &output {
            let interface = error.downcast_ref::<InterfaceError>();
            tracing::warn!(
                event_name = "agent.tool.failed",
                tool = name,
                correlation_id = interface.map(InterfaceError::correlation_id),
                user_message = interface.map(InterfaceError::user_message),
                error = %error,
                "tool execution failed"
            );
        }
        output
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn parse_input<T>(tool: &'static str, input: Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(input).map_err(|error| {
        InterfaceError::bad_request(format!("invalid `{tool}` input: {error}"), tool).into()
    })
}

pub struct QualifyLeadTool {
    engine: Arc<dyn QualificationEngine>,
}

impl QualifyLeadTool {
    pub fn new(engine: Arc<dyn QualificationEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Tool for QualifyLeadTool {
    fn name(&self) -> &'static str {
        "qualify_lead"
    }

    fn description(&self) -> &'static str {
        "Score a lead and check region, volume and product disqualification rules"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let attributes: LeadAttributes = parse_input(self.name(), input)?;
        let assessment = self.engine.assess(&attributes);
        Ok(serde_json::to_value(assessment)?)
    }
}

#[derive(Debug, Deserialize)]
struct ParseVolumeInput {
    text: Option<String>,
}

pub struct ParseVolumeTool;

#[async_trait]
impl Tool for ParseVolumeTool {
    fn name(&self) -> &'static str {
        "parse_volume"
    }

    fn description(&self) -> &'static str {
        "Convert a free-text quantity such as \"5 toneladas\" into kilograms"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: ParseVolumeInput = parse_input(self.name(), input)?;
        let parsed = parse_volume(input.text.as_deref());
        Ok(json!({
            "kilograms": parsed.map(|volume| volume.kilograms.as_f64()).unwrap_or(0.0),
            "parsed": parsed,
        }))
    }
}

#[derive(Debug, Deserialize)]
struct RegionMinimumInput {
    region: String,
}

pub struct RegionMinimumTool {
    engine: Arc<dyn QualificationEngine>,
}

impl RegionMinimumTool {
    pub fn new(engine: Arc<dyn QualificationEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Tool for RegionMinimumTool {
    fn name(&self) -> &'static str {
        "region_minimum"
    }

    fn description(&self) -> &'static str {
        "Look up the minimum order weight in kilograms for a two-letter region code"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: RegionMinimumInput = parse_input(self.name(), input)?;
        let minimum_kg = self.engine.get_minimum_for_region(&input.region);
        Ok(json!({
            "region": input.region.trim().to_uppercase(),
            "found": minimum_kg.is_some(),
            "minimum_kg": minimum_kg,
        }))
    }
}

pub struct LeadCompletenessTool;

#[async_trait]
impl Tool for LeadCompletenessTool {
    fn name(&self) -> &'static str {
        "lead_completeness"
    }

    fn description(&self) -> &'static str {
        "List the required lead fields that are still missing or invalid"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let profile: LeadProfile = parse_input(self.name(), input)?;
        let missing = missing_fields(&profile);
        let labels = missing.iter().map(|field| field.label()).collect::<Vec<_>>();
        Ok(json!({
            "complete": missing.is_empty(),
            "missing_fields": missing,
            "missing_labels": labels,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use serde_json::json;
    use steelqual_core::config::AppConfig;
    use steelqual_core::errors::InterfaceError;
    use steelqual_core::DeterministicQualificationEngine;

    use super::ToolRegistry;

    fn registry() -> ToolRegistry {
        let engine = DeterministicQualificationEngine::default();
        ToolRegistry::with_qualification_tools(Arc::new(engine))
    }

    #[test]
    fn registry_lists_every_qualification_tool() {
        let registry = registry();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.names(),
            vec!["lead_completeness", "parse_volume", "qualify_lead", "region_minimum"]
        );
    }

    #[tokio::test]
    async fn qualify_lead_returns_score_and_verdict() -> anyhow::Result<()> {
        let output = registry()
            .execute(
                "qualify_lead",
                json!({"region": "SP", "volume_estimate": "3 toneladas", "product": "Vergalhão"}),
            )
            .await?;

        assert_eq!(output["score"], 30);
        assert_eq!(output["verdict"]["disqualified"], true);
        assert_eq!(output["verdict"]["rule"], "volume");
        Ok(())
    }

    #[tokio::test]
    async fn qualify_lead_flags_rules_skipped_for_missing_attributes() -> anyhow::Result<()> {
        let output = registry().execute("qualify_lead", json!({})).await?;

        assert_eq!(output["score"], 0);
        assert_eq!(output["verdict"]["disqualified"], false);
        assert_eq!(output["verdict"]["skipped_rules"], json!(["region", "volume", "product"]));
        Ok(())
    }

    #[tokio::test]
    async fn parse_volume_reports_kilograms() -> anyhow::Result<()> {
        let registry = registry();
        let tonnes = registry.execute("parse_volume", json!({"text": "5 toneladas"})).await?;
        assert_eq!(tonnes["kilograms"], 5000.0);
        assert_eq!(tonnes["parsed"]["unit"], "tonnes");

        let nothing = registry.execute("parse_volume", json!({"text": "abc"})).await?;
        assert_eq!(nothing["kilograms"], 0.0);
        assert!(nothing["parsed"].is_null());
        Ok(())
    }

    #[tokio::test]
    async fn region_minimum_distinguishes_not_found() -> anyhow::Result<()> {
        let registry = registry();
        let ce = registry.execute("region_minimum", json!({"region": " ce "})).await?;
        assert_eq!(ce, json!({"region": "CE", "found": true, "minimum_kg": 250}));

        let unknown = registry.execute("region_minimum", json!({"region": "XX"})).await?;
        assert_eq!(unknown["found"], false);
        assert!(unknown["minimum_kg"].is_null());
        Ok(())
    }

    #[tokio::test]
    async fn lead_completeness_lists_missing_fields() -> anyhow::Result<()> {
        let output = registry()
            .execute(
                "lead_completeness",
                json!({"name": "Ana", "region": "PE", "cnpj": "00.000.000/0000-00"}),
            )
            .await?;

        assert_eq!(output["complete"], false);
        assert_eq!(
            output["missing_fields"],
            json!(["whatsapp", "email", "cnpj", "city", "product", "volume_estimate"])
        );
        assert_eq!(output["missing_labels"][0], "WhatsApp");
        Ok(())
    }

    #[tokio::test]
    async fn malformed_input_is_a_bad_request() {
        let error = registry()
            .execute("region_minimum", json!({"region": 42}))
            .await
            .err()
            .map(|error| error.downcast::<InterfaceError>());

        assert!(matches!(error, Some(Ok(InterfaceError::BadRequest { .. }))));
    }

    #[test]
    fn from_config_uses_builtin_table_by_default() {
        let registry = ToolRegistry::from_config(&AppConfig::default());
        assert_eq!(registry.map(|registry| registry.len()).ok(), Some(4));
    }

    #[test]
    fn from_config_maps_unreadable_table_to_internal_error() {
        let mut config = AppConfig::default();
        config.qualification.region_table_path = Some("/nowhere/regions.toml".into());

        let error = ToolRegistry::from_config(&config).err();
        assert!(matches!(
            &error,
            Some(InterfaceError::Internal { correlation_id, .. })
                if correlation_id == "tool_registry"
        ));
        assert_eq!(
            error.as_ref().map(InterfaceError::user_message),
            Some("An unexpected internal error occurred.")
        );
    }

    #[test]
    fn from_config_maps_incomplete_table_to_bad_request() {
        let dir = tempfile::tempdir().unwrap_or_else(|error| panic!("tempdir: {error}"));
        let path = dir.path().join("regions.toml");
        fs::write(&path, "[regions]\nCE = 250\n")
            .unwrap_or_else(|error| panic!("write: {error}"));

        let mut config = AppConfig::default();
        config.qualification.region_table_path = Some(path);

        let error = ToolRegistry::from_config(&config).err();
        assert!(matches!(
            error,
            Some(InterfaceError::BadRequest { ref message, .. }) if message.contains("missing")
        ));
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        assert!(registry().execute("send_quote", json!({})).await.is_err());
    }
}
