use steelqual_core::{LeadAttributes, QualificationEngine};

use crate::commands::{load_engine, CommandResult};

pub fn run(attributes: LeadAttributes) -> CommandResult {
    let (_, engine) = match load_engine("qualify") {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };

    let assessment = engine.assess(&attributes);
    let message = if assessment.verdict.disqualified {
        format!("lead disqualified: {}", assessment.verdict.reason)
    } else if assessment.verdict.qualified_by_omission() {
        "lead qualified by omission: no region, volume or product supplied".to_string()
    } else {
        format!("lead qualified with score {}", assessment.score)
    };

    match serde_json::to_value(&assessment) {
        Ok(data) => CommandResult::success_with_data("qualify", message, Some(data)),
        Err(error) => CommandResult::failure("qualify", "serialization", error.to_string(), 4),
    }
}
