//! Command-line front end: collects paths and dates, prints the status line

mod report;
mod summary;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::services::pipeline::failure_status;
use crate::types::{DateRange, Result};

pub use report::ReportArgs;
pub use summary::SummaryArgs;

/// Per-person page usage reports from printer fleet logs
#[derive(Parser, Debug)]
#[command(name = "pagetally")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: per-user config.toml, if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Filter, aggregate and write the spreadsheet report
    Report(ReportArgs),

    /// Print the aggregated table without writing a spreadsheet
    Summary(SummaryArgs),
}

/// Source log and optional date bounds, shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Print log export (`;`-delimited)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// First day to include (dd/mm/yyyy)
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Last day to include, whole day (dd/mm/yyyy)
    #[arg(long, value_name = "DATE")]
    pub end: Option<String>,
}

impl SourceArgs {
    pub fn range(&self) -> Result<DateRange> {
        DateRange::from_bounds(self.start.as_deref(), self.end.as_deref())
    }
}

impl Cli {
    /// Log level implied by `-v` flags when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = Config::discover(self.config.as_deref())
            .map_err(|e| anyhow::anyhow!(failure_status(&e)))?;

        match self.command {
            Commands::Report(args) => args.run(&config),
            Commands::Summary(args) => args.run(&config),
        }
    }
}
