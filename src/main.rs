use std::path::PathBuf;

use clap::{Parser, Subcommand};

use outlook::api::{analysis_to_json, run_http_server};
use outlook::core::{Calibration, EngineError, run_analysis_str, scenario_table};
use outlook::telemetry::init_tracing;

#[derive(Parser, Debug)]
#[command(
    name = "outlook",
    about = "Monte Carlo value and retention outlook for named scenarios"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        #[arg(long, help = "Calibration JSON replacing the built-in scenario table")]
        calibration: Option<PathBuf>,
    },
    /// Run one scenario and print the analysis as JSON.
    Analyze {
        #[arg(
            long,
            default_value = "all",
            help = "One of all, conservative, base, optimistic"
        )]
        scenario: String,
        #[arg(long, help = "Sampling seed; random when omitted")]
        seed: Option<u64>,
        #[arg(long, help = "Calibration JSON replacing the built-in scenario table")]
        calibration: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the scenario comparison table as JSON.
    Scenarios {
        #[arg(long, help = "Calibration JSON replacing the built-in scenario table")]
        calibration: Option<PathBuf>,
    },
}

fn load_calibration(path: Option<PathBuf>) -> Result<Calibration, EngineError> {
    match path {
        Some(path) => Calibration::from_json_file(path),
        None => Ok(Calibration::default()),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Serve { port, calibration } => match load_calibration(calibration) {
            Ok(calibration) => run_http_server(port, calibration)
                .await
                .map_err(|e| format!("server error: {e}")),
            Err(e) => Err(e.to_string()),
        },
        Command::Analyze {
            scenario,
            seed,
            calibration,
            pretty,
        } => load_calibration(calibration)
            .and_then(|calibration| {
                let seed = seed.unwrap_or_else(rand::random);
                run_analysis_str(&scenario, &calibration, seed)
            })
            .map_err(|e| e.to_string())
            .and_then(|analysis| analysis_to_json(&analysis, pretty).map_err(|e| e.to_string()))
            .map(|json| println!("{json}")),
        Command::Scenarios { calibration } => load_calibration(calibration)
            .map_err(|e| e.to_string())
            .and_then(|calibration| {
                serde_json::to_string_pretty(scenario_table(&calibration)).map_err(|e| e.to_string())
            })
            .map(|json| println!("{json}")),
    };

    if let Err(e) = outcome {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
