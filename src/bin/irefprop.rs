use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use irefprop::config::{convention_from_env, find_refprop_path};
use irefprop::{Convention, HarnessConfig, RefpropError, Result, StateQuery};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "irefprop")]
#[command(about = "Query NIST REFPROP for a refrigerant state point in English units", long_about = None)]
struct Cli {
    /// Refrigerant file, e.g. R134A.FLD or R410A.MIX
    #[arg(short, long)]
    fluid: String,
    /// Temperature (°F)
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    temperature: String,
    /// Gauge pressure (psig, negative for vacuum)
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pressure: String,
    /// REFPROP calling convention [default: $REFPROP_CONVENTION or legacy]
    #[arg(short, long)]
    convention: Option<Convention>,
    /// Directory containing the REFPROP library [default: $REFPROP_PATH]
    #[arg(long)]
    refprop_path: Option<PathBuf>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let refprop_path = match cli.refprop_path {
        Some(path) => path,
        None => find_refprop_path()?,
    };
    if !irefprop::engine_available(&refprop_path) {
        return Err(RefpropError::EngineUnavailable(format!(
            "could not load REFPROP from {}",
            refprop_path.display()
        )));
    }

    let convention = match cli.convention {
        Some(convention) => convention,
        None => convention_from_env()?,
    };
    let config = HarnessConfig::new(convention, refprop_path);
    let mut harness = irefprop::open(&config)?;

    let query = StateQuery::from_text(&cli.fluid, &cli.temperature, &cli.pressure);
    let report = harness.evaluate(&query)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| RefpropError::CalculationFailed(e.to_string()))?;
        println!("{json}");
    } else {
        println!("{report}");
    }
    Ok(())
}
