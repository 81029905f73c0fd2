use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::SimConfig;

#[derive(Parser, Debug)]
#[command(
    name = "drive-thru-sim",
    about = "Discrete-event simulation of an order/pay/pickup drive-thru"
)]
pub struct Cli {
    #[arg(long, short, global = true, help = "Log engine progress to stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one simulation and print its report
    Run(RunArgs),
    /// Run a baseline and a candidate staffing side by side
    Compare(CompareArgs),
    /// Print the resolved configuration without running
    ShowConfig(ScenarioArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScenarioArgs {
    #[arg(long, help = "TOML or JSON file; flags override its values")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Mean minutes between arrivals")]
    pub arrival_interval: Option<f64>,
    #[arg(long, help = "Simulated minutes")]
    pub duration: Option<u64>,
    #[arg(long)]
    pub pay_servers: Option<u32>,
    #[arg(long)]
    pub pickup_servers: Option<u32>,
    #[arg(long, help = "Mean order service time in minutes")]
    pub order_service: Option<f64>,
    #[arg(long, help = "Mean pay service time in minutes")]
    pub pay_service: Option<f64>,
    #[arg(long, help = "Mean pickup service time in minutes")]
    pub pickup_service: Option<f64>,
    #[arg(long, conflicts_with = "unseeded")]
    pub seed: Option<u64>,
    #[arg(long, help = "Seed from OS entropy instead of a fixed seed")]
    pub unseeded: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub baseline: ScenarioArgs,
    #[arg(long, help = "Pay servers in the candidate scenario")]
    pub candidate_pay_servers: Option<u32>,
    #[arg(long, help = "Pickup servers in the candidate scenario")]
    pub candidate_pickup_servers: Option<u32>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Cli> {
    Cli::try_parse().map_err(|e| Error::Cli(e.to_string()))
}

// Defaults, then the config file, then explicit flags.
pub fn build_config(args: &ScenarioArgs) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };

    if let Some(value) = args.arrival_interval {
        config.arrival_interval = value;
    }
    if let Some(value) = args.duration {
        config.duration_minutes = value;
    }
    if let Some(value) = args.pay_servers {
        config.pay_servers = value;
    }
    if let Some(value) = args.pickup_servers {
        config.pickup_servers = value;
    }
    if let Some(value) = args.order_service {
        config.service_times.order = value;
    }
    if let Some(value) = args.pay_service {
        config.service_times.pay = value;
    }
    if let Some(value) = args.pickup_service {
        config.service_times.pickup = value;
    }
    if args.unseeded {
        config.seed = None;
    } else if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}

pub fn build_comparison(args: &CompareArgs) -> Result<(SimConfig, SimConfig)> {
    let baseline = build_config(&args.baseline)?;
    let mut candidate = baseline.clone();
    if let Some(value) = args.candidate_pay_servers {
        candidate.pay_servers = value;
    }
    if let Some(value) = args.candidate_pickup_servers {
        candidate.pickup_servers = value;
    }
    candidate.validate()?;
    Ok((baseline, candidate))
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    let config: SimConfig = match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err)))?,
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err)))?,
        "" => return Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => return Err(Error::UnsupportedConfigFormat(ext.to_string())),
    };
    config.validate()?;
    Ok(config)
}
