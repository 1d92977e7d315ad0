use serde_json::json;
use steelqual_core::qualification::volume::parse_volume;

use crate::commands::CommandResult;

pub fn run(text: &str) -> CommandResult {
    match parse_volume(Some(text)) {
        Some(parsed) => CommandResult::success_with_data(
            "parse-volume",
            format!("`{text}` is {}", parsed.kilograms),
            Some(json!({
                "kilograms": parsed.kilograms.as_f64(),
                "amount": parsed.amount.to_string(),
                "unit": parsed.unit,
            })),
        ),
        None => CommandResult::success_with_data(
            "parse-volume",
            format!("no quantity found in `{text}`; treated as 0 kg"),
            Some(json!({ "kilograms": 0.0, "amount": null, "unit": null })),
        ),
    }
}
