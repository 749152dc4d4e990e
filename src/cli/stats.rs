use clap::Parser;

use crate::{
    api::ApiService,
    cli::{self, CommandContext, EXIT_OK, OutputFormat, ReportCommand},
    types::{StatisticTableRow, SystemStatistics},
    warning,
};

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {}

/// System-wide statistics assembled from the four statistics endpoints.
pub struct StatsCommand {
    context: CommandContext,
}

impl ReportCommand for StatsCommand {
    const NAME: &'static str = "stats";
    type Options = StatsOptions;

    fn from_parts(context: CommandContext, _options: StatsOptions) -> Self {
        Self { context }
    }

    fn context(&self) -> &CommandContext {
        &self.context
    }

    fn run(&mut self, service: &ApiService) -> i32 {
        let stats = match cli::fetch(&self.context, "Fetching statistics...", || {
            service.system_statistics()
        }) {
            Ok(stats) => stats,
            Err(e) => return cli::api_failure(Self::NAME, &e),
        };

        let code = cli::emit(&self.context, &stats, statistic_rows(&stats));
        if code == EXIT_OK
            && self.context.format == OutputFormat::Table
            && stats.tickets.overdue > 0
        {
            warning!("{} tickets are overdue.", stats.tickets.overdue);
        }
        code
    }
}

pub(crate) fn statistic_rows(stats: &SystemStatistics) -> Vec<StatisticTableRow> {
    let row = |area: &str, metric: &str, value: String| StatisticTableRow {
        area: area.to_string(),
        metric: metric.to_string(),
        value,
    };

    let t = &stats.tickets;
    let c = &stats.clients;
    let tech = &stats.technicians;
    let a = &stats.appointments;

    vec![
        row("Tickets", "Total", t.total.to_string()),
        row("Tickets", "Open", t.open.to_string()),
        row("Tickets", "In progress", t.in_progress.to_string()),
        row("Tickets", "Resolved", t.resolved.to_string()),
        row("Tickets", "Closed", t.closed.to_string()),
        row("Tickets", "Overdue", t.overdue.to_string()),
        row(
            "Tickets",
            "Resolution rate",
            format!("{:.1}%", t.resolution_rate()),
        ),
        row(
            "Tickets",
            "Avg. resolution",
            t.average_resolution_hours
                .map(|h| format!("{:.1} h", h))
                .unwrap_or_else(|| "-".to_string()),
        ),
        row("Clients", "Total", c.total.to_string()),
        row("Clients", "Active", c.active.to_string()),
        row("Clients", "New this month", c.new_this_month.to_string()),
        row("Technicians", "Total", tech.total.to_string()),
        row("Technicians", "Active", tech.active.to_string()),
        row("Technicians", "Available", tech.available.to_string()),
        row(
            "Technicians",
            "Avg. workload",
            format!("{:.1}", tech.average_workload),
        ),
        row("Appointments", "Total", a.total.to_string()),
        row("Appointments", "Scheduled", a.scheduled.to_string()),
        row("Appointments", "Completed", a.completed.to_string()),
        row("Appointments", "Cancelled", a.cancelled.to_string()),
        row("Appointments", "Upcoming", a.upcoming.to_string()),
    ]
}
