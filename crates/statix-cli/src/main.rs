//! Statix CLI: solve, benchmark and validate.

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

mod commands;

#[derive(Parser)]
#[command(name = "statix")]
#[command(version, about = "Statix: hybrid nonlinear static-equilibrium solver")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one built-in scenario.
    Solve {
        /// Scenario name (linear_spring, hanging_chain, slack_cable, runaway_load).
        #[arg(short, long, default_value = "hanging_chain")]
        scenario: String,

        /// Solver config (TOML). Missing keys take their defaults.
        #[arg(short, long)]
        config: Option<String>,

        /// Print the full solve trace.
        #[arg(long)]
        trace: bool,

        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (a scenario name, or all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a solver config file.
    Validate {
        /// Path to config file (TOML).
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Solve {
            scenario,
            config,
            trace,
            json,
        } => commands::solve(&scenario, config.as_deref(), trace, json),
        Commands::Benchmark { scenario, output } => {
            commands::benchmark(&scenario, output.as_deref())
        }
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
