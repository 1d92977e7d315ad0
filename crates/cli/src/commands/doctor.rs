use serde::Serialize;
use steelqual_core::config::{AppConfig, LoadOptions};
use steelqual_core::qualification::regions::FEDERATIVE_UNITS;
use steelqual_core::{DeterministicQualificationEngine, QualificationEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            match DeterministicQualificationEngine::from_config(&config) {
                Ok(engine) => {
                    checks.push(check_region_table(&engine));
                    checks.push(check_catalog(&engine));
                }
                Err(error) => {
                    checks.push(DoctorCheck {
                        name: "region_table",
                        status: CheckStatus::Fail,
                        details: error.to_string(),
                    });
                    checks.push(skipped("product_catalog", "region table did not load"));
                }
            }
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(skipped("region_table", "configuration did not load"));
            checks.push(skipped("product_catalog", "configuration did not load"));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn skipped(name: &'static str, cause: &str) -> DoctorCheck {
    DoctorCheck { name, status: CheckStatus::Skipped, details: format!("skipped because {cause}") }
}

fn check_region_table(engine: &DeterministicQualificationEngine) -> DoctorCheck {
    let regions = engine.regions();
    let missing =
        FEDERATIVE_UNITS.iter().filter(|unit| !regions.contains(unit)).copied().collect::<Vec<_>>();

    if missing.is_empty() {
        DoctorCheck {
            name: "region_table",
            status: CheckStatus::Pass,
            details: format!("{} regions with positive minimums", regions.len()),
        }
    } else {
        DoctorCheck {
            name: "region_table",
            status: CheckStatus::Fail,
            details: format!("missing regions: {}", missing.join(", ")),
        }
    }
}

fn check_catalog(engine: &DeterministicQualificationEngine) -> DoctorCheck {
    let catalog = engine.catalog();
    if catalog.is_empty() {
        return DoctorCheck {
            name: "product_catalog",
            status: CheckStatus::Fail,
            details: "catalog has no products".to_string(),
        };
    }

    DoctorCheck {
        name: "product_catalog",
        status: CheckStatus::Pass,
        details: format!(
            "{} product fragments across {} families",
            catalog.len(),
            catalog.families().len()
        ),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
