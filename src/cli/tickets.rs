use chrono::{Local, NaiveDateTime};
use clap::Parser;

use crate::{
    api::ApiService,
    cli::{self, CommandContext, EXIT_INVALID_OPTION, ReportCommand},
    failed, info,
    types::{Ticket, TicketStatus, TicketTableRow},
    utils,
};

#[derive(Parser, Debug, Clone)]
pub struct TicketsOptions {
    /// Only tickets with this status (open, in-progress, resolved, closed)
    #[clap(long)]
    pub status: Option<String>,

    /// Only overdue tickets
    #[clap(long)]
    pub overdue: bool,

    /// Maximum number of tickets to show
    #[clap(long, default_value = "25")]
    pub limit: usize,
}

/// Ticket listing, most urgent first.
pub struct TicketsCommand {
    context: CommandContext,
    options: TicketsOptions,
}

impl TicketsCommand {
    pub fn options(&self) -> &TicketsOptions {
        &self.options
    }
}

impl ReportCommand for TicketsCommand {
    const NAME: &'static str = "tickets";
    type Options = TicketsOptions;

    fn from_parts(context: CommandContext, options: TicketsOptions) -> Self {
        Self { context, options }
    }

    fn context(&self) -> &CommandContext {
        &self.context
    }

    fn run(&mut self, service: &ApiService) -> i32 {
        let status = match self.options.status.as_deref() {
            Some(value) => match TicketStatus::parse(value) {
                Some(status) => Some(status),
                None => {
                    failed!(
                        "Unknown ticket status '{}'. Use open, in-progress, resolved or closed.",
                        value
                    );
                    return EXIT_INVALID_OPTION;
                }
            },
            None => None,
        };

        let result = cli::fetch(&self.context, "Fetching tickets...", || {
            if self.options.overdue {
                service.overdue_tickets()
            } else if let Some(status) = status {
                service.tickets_by_status(status)
            } else {
                service.tickets()
            }
        });

        let mut tickets = match result {
            Ok(tickets) => tickets,
            Err(e) => return cli::api_failure(Self::NAME, &e),
        };

        let now = Local::now().naive_local();
        retain_matching(&mut tickets, status, self.options.overdue, now);
        sort_by_urgency(&mut tickets, now);
        tickets.truncate(self.options.limit);

        if tickets.is_empty() {
            info!("No tickets found.");
            return cli::EXIT_OK;
        }

        let rows: Vec<TicketTableRow> = tickets.iter().map(|t| ticket_row(t, now)).collect();
        cli::emit(&self.context, &tickets, rows)
    }
}

/// Applies both filters locally; the server only ever filters by one of them.
pub(crate) fn retain_matching(
    tickets: &mut Vec<Ticket>,
    status: Option<TicketStatus>,
    overdue: bool,
    now: NaiveDateTime,
) {
    tickets.retain(|t| {
        status.is_none_or(|s| t.status == s) && (!overdue || t.is_overdue_at(now))
    });
}

/// Overdue first, then by priority (highest first), then by id.
pub(crate) fn sort_by_urgency(tickets: &mut [Ticket], now: NaiveDateTime) {
    tickets.sort_by(|a, b| {
        b.is_overdue_at(now)
            .cmp(&a.is_overdue_at(now))
            .then(b.priority.rank().cmp(&a.priority.rank()))
            .then(a.id.cmp(&b.id))
    });
}

pub(crate) fn ticket_row(ticket: &Ticket, now: NaiveDateTime) -> TicketTableRow {
    let due = utils::format_datetime(ticket.due_date);
    TicketTableRow {
        id: ticket.id,
        title: utils::truncate(&ticket.title, 40),
        status: ticket.status.to_string(),
        priority: ticket.priority.to_string(),
        technician: utils::format_optional_id(ticket.technician_id),
        due: if ticket.is_overdue_at(now) {
            format!("{} (overdue)", due)
        } else {
            due
        },
    }
}

/// Multi-line detail view used by the ticket lookup in the menus.
pub fn ticket_details(ticket: &Ticket) -> String {
    let now = Local::now().naive_local();
    let mut lines = vec![
        format!("Ticket #{}: {}", ticket.id, ticket.title),
        format!("Status:      {}", ticket.status),
        format!("Priority:    {}", ticket.priority),
        format!("Client:      {}", utils::format_optional_id(ticket.client_id)),
        format!(
            "Technician:  {}",
            utils::format_optional_id(ticket.technician_id)
        ),
        format!("Created:     {}", utils::format_datetime(ticket.created_at)),
        format!("Due:         {}", utils::format_datetime(ticket.due_date)),
        format!(
            "Overdue:     {}",
            if ticket.is_overdue_at(now) { "yes" } else { "no" }
        ),
    ];
    if let Some(skill) = &ticket.required_skill {
        lines.push(format!("Skill:       {}", skill));
    }
    if let Some(description) = &ticket.description {
        lines.push(String::new());
        lines.push(description.clone());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::types::TicketPriority;

    fn ticket(id: u64, priority: TicketPriority, overdue: bool) -> Ticket {
        Ticket {
            id,
            title: format!("Ticket {}", id),
            description: None,
            status: TicketStatus::Open,
            priority,
            client_id: None,
            technician_id: None,
            required_skill: None,
            created_at: None,
            due_date: None,
            overdue: Some(overdue),
        }
    }

    #[test]
    fn overdue_first_then_priority_then_id() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut tickets = vec![
            ticket(5, TicketPriority::Low, false),
            ticket(3, TicketPriority::Critical, false),
            ticket(9, TicketPriority::Low, true),
            ticket(1, TicketPriority::Critical, false),
            ticket(7, TicketPriority::Unknown, false),
        ];

        sort_by_urgency(&mut tickets, now);

        let ids: Vec<u64> = tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![9, 1, 3, 5, 7]);
    }

    #[test]
    fn status_filter_applies_to_overdue_listing() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut in_progress = ticket(2, TicketPriority::High, true);
        in_progress.status = TicketStatus::InProgress;
        let mut tickets = vec![
            ticket(1, TicketPriority::Low, true),
            in_progress,
            ticket(3, TicketPriority::Low, false),
        ];

        retain_matching(&mut tickets, Some(TicketStatus::InProgress), true, now);

        let ids: Vec<u64> = tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn without_filters_every_ticket_is_kept() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut tickets = vec![
            ticket(1, TicketPriority::Low, true),
            ticket(2, TicketPriority::Low, false),
        ];

        retain_matching(&mut tickets, None, false, now);

        assert_eq!(tickets.len(), 2);
    }

    #[test]
    fn overdue_tickets_are_marked_in_the_row() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let row = ticket_row(&ticket(4, TicketPriority::High, true), now);

        assert_eq!(row.due, "- (overdue)");
        assert_eq!(row.technician, "-");
        assert_eq!(row.priority, "High");
    }
}
