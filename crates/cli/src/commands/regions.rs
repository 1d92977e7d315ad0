use serde_json::{json, Map, Value};
use steelqual_core::{QualificationEngine, DEFAULT_MINIMUM_KG};

use crate::commands::{load_engine, CommandResult};

pub fn run() -> CommandResult {
    let (config, engine) = match load_engine("regions") {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };

    let minimums = engine
        .regions()
        .iter()
        .map(|(code, minimum_kg)| (code.to_string(), Value::from(minimum_kg)))
        .collect::<Map<String, Value>>();
    let source = match &config.qualification.region_table_path {
        Some(path) => path.display().to_string(),
        None => "builtin".to_string(),
    };

    CommandResult::success_with_data(
        "regions",
        format!("{} regions served (table source: {source})", minimums.len()),
        Some(json!({
            "source": source,
            "default_minimum_kg": DEFAULT_MINIMUM_KG,
            "minimum_kg": minimums,
        })),
    )
}
