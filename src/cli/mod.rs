//! # CLI Module
//!
//! Report commands. Each command bundles its own clap options struct and a
//! single `run` entry point, and is used in two ways:
//!
//! - one-shot from the command line, where clap parses the options and
//!   `main` builds the [`CommandContext`] from the global flags
//! - from inside a menu session through [`crate::menu::adapter`], which
//!   synthesizes the context and takes every option at its declared default
//!
//! ## Commands
//!
//! - [`StatsCommand`] - system statistics (four statistics endpoints)
//! - [`TicketsCommand`] - ticket listing with status and overdue filters
//! - [`TechniciansCommand`] - technician workload
//! - [`SkillsCommand`] - skill coverage
//! - [`ClientsCommand`] - client directory
//! - [`AppointmentsCommand`] - appointment schedule
//!
//! ## Exit codes
//!
//! `0` on success, [`EXIT_API_ERROR`] when the API call failed and
//! [`EXIT_INVALID_OPTION`] when an option value was rejected.

mod appointments;
mod clients;
mod skills;
mod stats;
mod technicians;
mod tickets;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::{
    api::{ApiError, ApiService},
    failed, info, utils,
};

pub use appointments::{AppointmentsCommand, AppointmentsOptions};
pub use clients::{ClientsCommand, ClientsOptions, client_details};
pub use skills::{SkillsCommand, SkillsOptions};
pub use stats::{StatsCommand, StatsOptions};
pub use technicians::{TechnicianSort, TechniciansCommand, TechniciansOptions};
pub use tickets::{TicketsCommand, TicketsOptions, ticket_details};

pub const EXIT_OK: i32 = 0;
pub const EXIT_API_ERROR: i32 = 1;
pub const EXIT_INVALID_OPTION: i32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Settings a report command inherits from whoever launches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub server_url: String,
    pub verbose: bool,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Context used inside a menu session: not verbose, table output.
    pub fn interactive(server_url: &str) -> Self {
        Self {
            server_url: server_url.to_string(),
            verbose: false,
            format: OutputFormat::Table,
        }
    }
}

/// A self-contained report with its own options.
pub trait ReportCommand: Sized {
    /// Name used on the command line and in diagnostics.
    const NAME: &'static str;

    type Options: Parser;

    fn from_parts(context: CommandContext, options: Self::Options) -> Self;

    fn context(&self) -> &CommandContext;

    /// Runs the report and returns its exit code.
    fn run(&mut self, service: &ApiService) -> i32;
}

/// Runs `request` behind a spinner.
pub(crate) fn fetch<T>(
    context: &CommandContext,
    message: &str,
    request: impl FnOnce() -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    if context.verbose {
        info!("Querying {}", context.server_url);
    }
    let pb = utils::spinner(message);
    let result = request();
    pb.finish_and_clear();
    result
}

/// Prints `records` as JSON or `rows` as a table, depending on the context.
pub(crate) fn emit<T, R>(context: &CommandContext, records: &T, rows: Vec<R>) -> i32
where
    T: Serialize + ?Sized,
    R: Tabled,
{
    match context.format {
        OutputFormat::Json => match serde_json::to_string_pretty(records) {
            Ok(json) => {
                println!("{}", json);
                EXIT_OK
            }
            Err(e) => {
                failed!("Cannot serialize report: {}", e);
                EXIT_API_ERROR
            }
        },
        OutputFormat::Table => {
            println!("{}", Table::new(rows));
            EXIT_OK
        }
    }
}

/// Reports an API failure and maps it to the exit code.
pub(crate) fn api_failure(command: &str, err: &ApiError) -> i32 {
    tracing::debug!(command, error = ?err, "report failed");
    failed!("{}", err);
    EXIT_API_ERROR
}
