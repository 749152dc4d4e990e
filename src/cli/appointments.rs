use chrono::Local;
use clap::Parser;

use crate::{
    api::ApiService,
    cli::{self, CommandContext, ReportCommand},
    info,
    types::{Appointment, AppointmentStatus, AppointmentTableRow},
    utils,
};

#[derive(Parser, Debug, Clone)]
pub struct AppointmentsOptions {
    /// Only scheduled appointments in the future
    #[clap(long)]
    pub upcoming: bool,
}

/// Appointment schedule in chronological order.
pub struct AppointmentsCommand {
    context: CommandContext,
    options: AppointmentsOptions,
}

impl ReportCommand for AppointmentsCommand {
    const NAME: &'static str = "appointments";
    type Options = AppointmentsOptions;

    fn from_parts(context: CommandContext, options: AppointmentsOptions) -> Self {
        Self { context, options }
    }

    fn context(&self) -> &CommandContext {
        &self.context
    }

    fn run(&mut self, service: &ApiService) -> i32 {
        let result = cli::fetch(&self.context, "Fetching appointments...", || {
            if self.options.upcoming {
                service.upcoming_appointments()
            } else {
                service.appointments()
            }
        });

        let mut appointments = match result {
            Ok(appointments) => appointments,
            Err(e) => return cli::api_failure(Self::NAME, &e),
        };

        if self.options.upcoming {
            let now = Local::now().naive_local();
            appointments.retain(|a| a.is_upcoming_at(now));
        }

        if appointments.is_empty() {
            info!("No appointments found.");
            return cli::EXIT_OK;
        }

        appointments.sort_by_key(|a| a.scheduled_at);
        let rows: Vec<AppointmentTableRow> = appointments.iter().map(appointment_row).collect();
        cli::emit(&self.context, &appointments, rows)
    }
}

fn appointment_row(appointment: &Appointment) -> AppointmentTableRow {
    AppointmentTableRow {
        id: appointment.id,
        scheduled: utils::format_datetime(Some(appointment.scheduled_at)),
        minutes: appointment.duration_minutes,
        ticket: utils::format_optional_id(appointment.ticket_id),
        technician: utils::format_optional_id(appointment.technician_id),
        status: match appointment.status {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Unknown => "Unknown",
        }
        .to_string(),
    }
}
