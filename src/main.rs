use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use u_roster::export::{CsvExportObserver, XlsxExportObserver};
use u_roster::facade::{RosterFacade, RunOptions};
use u_roster::logging;
use u_roster::models::ScheduleConfig;
use u_roster::scheduler::{GeneratedRoster, DEFAULT_MAX_ATTEMPTS};

#[derive(Parser, Debug)]
#[command(
    name = "u-roster",
    about = "Generate a weekly shift roster from a team configuration",
    version
)]
struct Cli {
    /// Team configuration (JSON)
    config: PathBuf,
    /// Seed for reproducible rosters
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum fairness retries before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,
    /// Also write the roster as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Also write the roster as an xlsx week grid
    #[arg(long)]
    xlsx: Option<PathBuf>,
    /// Print the result as JSON instead of a listing
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    generated: &'a GeneratedRoster,
    distribution: Vec<(String, u32)>,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ScheduleConfig::from_path(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let mut options = RunOptions::default().with_max_attempts(cli.max_attempts);
    if let Some(seed) = cli.seed {
        options = options.with_seed(seed);
    }

    let mut facade = RosterFacade::with_options(options);
    if let Some(path) = &cli.csv {
        facade.subscribe(Box::new(CsvExportObserver::new(path)));
    }
    if let Some(path) = &cli.xlsx {
        facade.subscribe(Box::new(XlsxExportObserver::new(path)));
    }
    facade.configure(config)?;
    let generated = facade.generate()?;

    let Some(config) = facade.config() else {
        anyhow::bail!("configuration was not retained");
    };
    let distribution = generated.distribution(config);

    if cli.json {
        let report = JsonReport {
            generated: &generated,
            distribution,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", generated.roster);
    println!();
    println!("Shift distribution:");
    for (member, shifts) in &distribution {
        println!("  {member}: {shifts}");
    }
    if let Some(kpi) = facade.kpi(&generated) {
        println!(
            "Desired: {}, neutral: {}, undesired: {} ({} attempt(s))",
            kpi.desired_hits, kpi.neutral_hits, kpi.undesired_hits, generated.attempts
        );
    }
    Ok(())
}
