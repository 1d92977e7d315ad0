pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use steelqual_core::config::{AppConfig, LoadOptions};
use steelqual_core::LeadAttributes;

#[derive(Debug, Parser)]
#[command(
    name = "steelqual",
    about = "Steel lead qualification CLI",
    long_about = "Score leads, check disqualification rules, and inspect the region threshold table and configuration.",
    after_help = "Examples:\n  steelqual qualify --region CE --volume \"5 toneladas\" --product vergalhão\n  steelqual parse-volume \"2,5 t\"\n  steelqual doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Score a lead and run the region, volume and product rules")]
    Qualify {
        #[arg(long, help = "Two-letter region code, e.g. CE")]
        region: Option<String>,
        #[arg(long, help = "Free-text volume estimate, e.g. \"5 toneladas\"")]
        volume: Option<String>,
        #[arg(long, help = "Free-text urgency, e.g. \"urgente\"")]
        urgency: Option<String>,
        #[arg(long, help = "Free-text product name")]
        product: Option<String>,
    },
    #[command(about = "Convert a free-text quantity into kilograms")]
    ParseVolume { text: String },
    #[command(about = "List the minimum order weight per region")]
    Regions,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, region table and product catalog")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let logging = AppConfig::load(LoadOptions::default())
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);
    logging::init(&logging);

    let result = match cli.command {
        Command::Qualify { region, volume, urgency, product } => {
            commands::qualify::run(LeadAttributes {
                region,
                volume_estimate: volume,
                urgency,
                product,
            })
        }
        Command::ParseVolume { text } => commands::parse_volume::run(&text),
        Command::Regions => commands::regions::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
