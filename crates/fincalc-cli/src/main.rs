mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::retirement::RetirementArgs;
use commands::sip::SipArgs;
use commands::swp::SwpArgs;

/// Deterministic SIP, SWP and retirement projections
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Deterministic SIP, SWP and retirement projections",
    long_about = "A CLI for projecting systematic investment plans, systematic withdrawal \
                  plans and retirement readiness with decimal precision. Parameters come \
                  from flags, a JSON/YAML file (--input) or JSON piped on stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging on stderr (overridden by FINCALC_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a systematic investment plan
    Sip(SipArgs),
    /// Project a systematic withdrawal plan
    Swp(SwpArgs),
    /// Plan retirement readiness and sustainability
    Retirement(RetirementArgs),
    /// Print version information
    Version,
}

impl Commands {
    fn include_monthly(&self) -> bool {
        match self {
            Commands::Sip(args) => args.monthly,
            Commands::Swp(args) => args.monthly,
            Commands::Retirement(_) | Commands::Version => false,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let include_monthly = cli.command.include_monthly();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Sip(args) => commands::sip::run_sip(args),
        Commands::Swp(args) => commands::swp::run_swp(args),
        Commands::Retirement(args) => commands::retirement::run_retirement(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, include_monthly);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
