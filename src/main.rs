use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use fxavg::core::export::EXPORT_FILE_NAME;
use fxavg::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// First day of the range (YYYY-MM-DD), defaults to the configured start date
    #[arg(short, long, global = true)]
    start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD), defaults to today
    #[arg(short, long, global = true)]
    end: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxavg::AppCommand {
    fn from(cmd: Commands) -> fxavg::AppCommand {
        match cmd {
            Commands::Chart => fxavg::AppCommand::Chart,
            Commands::Export { output } => fxavg::AppCommand::Export { output },
            Commands::Report { output } => fxavg::AppCommand::Report { output },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display monthly average USD and EUR rates
    Chart,
    /// Write monthly averages of both currencies to a spreadsheet
    Export {
        /// Destination of the xlsx file
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },
    /// Display the charts, then write the spreadsheet
    Report {
        /// Destination of the xlsx file
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = fxavg::RangeOptions {
        start: cli.start,
        end: cli.end,
    };
    let result = match cli.command {
        Some(Commands::Setup) => fxavg::cli::setup::setup(),
        Some(cmd) => fxavg::run_command(cmd.into(), cli.config_path.as_deref(), options).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
