use clap::{Parser, ValueEnum};

use crate::{
    api::ApiService,
    cli::{self, CommandContext, ReportCommand},
    info,
    types::{Technician, TechnicianTableRow},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TechnicianSort {
    Workload,
    Name,
}

#[derive(Parser, Debug, Clone)]
pub struct TechniciansOptions {
    /// Only technicians with spare capacity
    #[clap(long)]
    pub available: bool,

    /// Sort order of the listing
    #[clap(long, value_enum, default_value = "workload")]
    pub sort: TechnicianSort,
}

/// Technician workload report.
pub struct TechniciansCommand {
    context: CommandContext,
    options: TechniciansOptions,
}

impl TechniciansCommand {
    pub fn options(&self) -> &TechniciansOptions {
        &self.options
    }
}

impl ReportCommand for TechniciansCommand {
    const NAME: &'static str = "technicians";
    type Options = TechniciansOptions;

    fn from_parts(context: CommandContext, options: TechniciansOptions) -> Self {
        Self { context, options }
    }

    fn context(&self) -> &CommandContext {
        &self.context
    }

    fn run(&mut self, service: &ApiService) -> i32 {
        let result = cli::fetch(&self.context, "Fetching technicians...", || {
            if self.options.available {
                service.available_technicians()
            } else {
                service.technicians()
            }
        });

        let mut technicians = match result {
            Ok(technicians) => technicians,
            Err(e) => return cli::api_failure(Self::NAME, &e),
        };

        if technicians.is_empty() {
            info!("No technicians found.");
            return cli::EXIT_OK;
        }

        sort_technicians(&mut technicians, self.options.sort);
        let rows: Vec<TechnicianTableRow> = technicians.iter().map(technician_row).collect();
        cli::emit(&self.context, &technicians, rows)
    }
}

pub(crate) fn sort_technicians(technicians: &mut [Technician], sort: TechnicianSort) {
    match sort {
        TechnicianSort::Workload => technicians.sort_by(|a, b| {
            b.workload_percent()
                .cmp(&a.workload_percent())
                .then(a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }),
        TechnicianSort::Name => {
            technicians.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
    }
}

pub(crate) fn technician_row(technician: &Technician) -> TechnicianTableRow {
    TechnicianTableRow {
        id: technician.id,
        name: technician.name.clone(),
        skills: technician
            .skills
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(","),
        workload: format!(
            "{}/{} ({}%)",
            technician.current_workload,
            technician.max_workload,
            technician.workload_percent()
        ),
        available: if technician.is_available() {
            "yes".to_string()
        } else {
            "no".to_string()
        },
    }
}
