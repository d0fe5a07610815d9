use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::application::{LedgerService, LoadSummary};
use crate::domain::IngestReport;
use crate::io::{
    export_balances_csv, export_balances_json, export_history_csv, export_history_json,
};

pub mod shell;

use shell::Shell;

/// SupportBank - tally who owes whom from CSV transaction records
#[derive(Parser)]
#[command(name = "supportbank")]
#[command(about = "Load transaction records and report account balances and histories")]
#[command(version)]
pub struct Cli {
    /// Log every file load (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the files and answer 'List All' / 'List <account>' interactively
    Shell {
        /// Transaction files, loaded in order (first line of each is a header)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the balance of every account
    Balances {
        /// Transaction files, loaded in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print every transaction involving one account
    History {
        /// Account name (case-sensitive)
        account: String,

        /// Transaction files, loaded in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Report records that cannot be parsed
    Check {
        /// Transaction files, loaded in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl Cli {
    /// Default log filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "info" } else { "warn" }
    }

    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Shell { files } => {
                let service = load(&files)?;
                log::info!("Transactions parsed!");
                let stdin = io::stdin();
                Shell::new(service.ledger())
                    .run(stdin.lock(), io::stdout().lock())
                    .context("Interactive session failed")?;
            }

            Commands::Balances { files, format } => {
                let service = load(&files)?;
                run_balances_command(&service, format)?;
            }

            Commands::History {
                account,
                files,
                format,
            } => {
                let service = load(&files)?;
                run_history_command(&service, &account, format)?;
            }

            Commands::Check { files } => {
                let (_, summaries) = LedgerService::from_files(&files)?;
                run_check_command(&summaries)?;
            }
        }

        Ok(())
    }
}

fn load(files: &[PathBuf]) -> Result<LedgerService> {
    let (service, _) = LedgerService::from_files(files)?;
    Ok(service)
}

fn run_balances_command(service: &LedgerService, format: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Table => {
            shell::write_balances(service.ledger(), &mut stdout)?;
        }
        OutputFormat::Csv => {
            export_balances_csv(service.ledger(), &mut stdout)?;
        }
        OutputFormat::Json => {
            export_balances_json(service.ledger(), &mut stdout)?;
        }
    }
    stdout.flush()?;
    Ok(())
}

fn run_history_command(service: &LedgerService, account: &str, format: OutputFormat) -> Result<()> {
    let rows = service.account_history(account)?;
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Table => {
            shell::write_history(account, &rows, &mut stdout)?;
        }
        OutputFormat::Csv => {
            export_history_csv(&rows, &mut stdout)?;
        }
        OutputFormat::Json => {
            export_history_json(&rows, &mut stdout)?;
        }
    }
    stdout.flush()?;
    Ok(())
}

fn run_check_command(summaries: &[LoadSummary]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let mut total = IngestReport::default();

    for summary in summaries {
        for record in &summary.report.rejected {
            writeln!(
                stdout,
                "{}:{}: {}",
                summary.path.display(),
                record.line,
                record.error
            )?;
        }
        total.merge(summary.report.clone());
    }

    writeln!(
        stdout,
        "{} accepted, {} rejected",
        total.accepted,
        total.rejected.len()
    )?;
    Ok(())
}
