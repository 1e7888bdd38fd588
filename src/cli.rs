//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_event_writer::CsvEventWriter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{instance_names, validate_data_config, DataConfig};
use crate::domain::error::TaEventsError;
use crate::domain::generator::{generate_events, resolve_osids, GenerationReport};
use crate::domain::strategy::{build_instance, Strategy, StrategyInstance, PRESETS};
use crate::ports::config_port::ConfigPort;
use crate::ports::event_port::EventPort;

#[derive(Parser, Debug)]
#[command(name = "taevents", about = "Technical-analysis buy/sell event generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate events for every configured strategy instance
    Generate {
        #[arg(short, long)]
        config: PathBuf,
        /// Output CSV; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Restrict to these instruments (repeatable); overrides [data] osids
        #[arg(long)]
        osid: Vec<String>,
    },
    /// Validate a configuration file without reading prices
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List the built-in strategy presets
    ListStrategies,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Generate {
            config,
            output,
            osid,
        } => run_generate(&config, output.as_deref(), &osid),
        Command::Validate { config } => run_validate(&config),
        Command::ListStrategies => {
            print!("{}", format_presets());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, TaEventsError> {
    FileConfigAdapter::from_file(path).map_err(|reason| TaEventsError::ConfigParse {
        file: path.display().to_string(),
        reason,
    })
}

/// Every instance listed under `[events]`, fully validated.
pub fn build_instances(config: &dyn ConfigPort) -> Result<Vec<StrategyInstance>, TaEventsError> {
    instance_names(config)?
        .iter()
        .map(|name| build_instance(config, name))
        .collect()
}

fn load_and_validate(path: &Path) -> Result<(DataConfig, Vec<StrategyInstance>), TaEventsError> {
    info!("Loading config from {}", path.display());
    let config = load_config(path)?;
    let data = validate_data_config(&config)?;
    let instances = build_instances(&config)?;
    Ok((data, instances))
}

fn run_generate(
    config_path: &Path,
    output: Option<&Path>,
    osid_override: &[String],
) -> Result<(), TaEventsError> {
    let (data_config, instances) = load_and_validate(config_path)?;
    let data = CsvAdapter::new(data_config.path.clone());

    let requested = if osid_override.is_empty() {
        data_config.osids.as_slice()
    } else {
        osid_override
    };
    let osids = resolve_osids(&data, requested)?;

    info!(
        "Generating {} instances over {} osids ({} to {})",
        instances.len(),
        osids.len(),
        data_config.start_date,
        data_config.end_date
    );
    let report = generate_events(
        &data,
        &instances,
        &osids,
        data_config.start_date,
        data_config.end_date,
    );
    log_report(&report, &instances);

    match output {
        Some(path) => {
            let mut writer = CsvEventWriter::create(path)?;
            write_report(&mut writer, &report)?;
            info!("Events written to {}", path.display());
        }
        None => write_report(&mut CsvEventWriter::stdout(), &report)?,
    }
    Ok(())
}

fn write_report(writer: &mut dyn EventPort, report: &GenerationReport) -> Result<(), TaEventsError> {
    writer.write_events(&report.events)?;
    writer.finish()
}

fn log_report(report: &GenerationReport, instances: &[StrategyInstance]) {
    for instance in instances {
        info!(
            "  {} ({}): {} events",
            instance.name,
            instance.generator().event_name(),
            report.count_for(&instance.name)
        );
    }
    if !report.empty_histories.is_empty() {
        warn!(
            "{} osids had no prices: {}",
            report.empty_histories.len(),
            report.empty_histories.join(", ")
        );
    }
    if !report.skipped.is_empty() {
        warn!(
            "{} osids skipped: {}",
            report.skipped.len(),
            report.skipped.join(", ")
        );
    }
}

fn run_validate(config_path: &Path) -> Result<(), TaEventsError> {
    let (data, instances) = load_and_validate(config_path)?;

    println!("data: {} ({} to {})", data.path.display(), data.start_date, data.end_date);
    if data.osids.is_empty() {
        println!("osids: all files under data path");
    } else {
        println!("osids: {}", data.osids.join(", "));
    }
    println!("instances:");
    for instance in &instances {
        println!("  {}", describe(&instance.name, instance.event_id, &instance.strategy));
    }
    info!("Config validated successfully");
    Ok(())
}

fn describe(name: &str, event_id: i64, strategy: &Strategy) -> String {
    let generator = strategy.generator();
    format!(
        "{name} event_id={event_id} kind={} {} category={} -> {}",
        strategy.kind(),
        generator.cache_key(),
        generator.category_id(),
        generator.event_name()
    )
}

pub fn format_presets() -> String {
    PRESETS
        .iter()
        .map(|p| describe(p.name, p.event_id, &p.strategy) + "\n")
        .collect()
}
