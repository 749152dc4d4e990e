//! Concrete menus of the helpdesk session.
//!
//! Every screen is a [`MenuSkeleton`] built by a plain function, so a
//! submenu option only needs the function as its supplier.

use chrono::Local;
use colored::Colorize;

use crate::{
    cli::{
        AppointmentsCommand, ClientsCommand, SkillsCommand, StatsCommand, TechniciansCommand,
        TicketsCommand, client_details, ticket_details,
    },
    info,
    menu::{
        Menu, MenuContext, MenuError, MenuOption, MenuSkeleton,
        adapter::{command_action, command_action_with},
    },
    utils, warning,
};

pub fn main_menu() -> Box<dyn Menu> {
    MenuSkeleton::new("Helpdesk", |_| {
        vec![
            MenuOption::submenu(1, "Tickets", tickets_menu).describe("browse and look up tickets"),
            MenuOption::submenu(2, "Clients", clients_menu).describe("client directory"),
            MenuOption::submenu(3, "Technicians", technicians_menu)
                .describe("workload and skills"),
            MenuOption::submenu(4, "Appointments", appointments_menu),
            MenuOption::submenu(5, "Reports", reports_menu).describe("statistics"),
            MenuOption::exit(6, "Exit"),
        ]
    })
    .boxed()
}

pub fn tickets_menu() -> Box<dyn Menu> {
    MenuSkeleton::new("Tickets", |_| {
        vec![
            MenuOption::action(1, "List tickets", command_action::<TicketsCommand>()),
            MenuOption::action(
                2,
                "Overdue tickets",
                command_action_with::<TicketsCommand>(&["--overdue"]),
            ),
            MenuOption::action(3, "View ticket", view_ticket),
        ]
    })
    .with_content(|_| "Tip: type #<id> to open a ticket directly.".dimmed().to_string())
    .with_free_text(|input, context| {
        match utils::parse_ticket_reference(input).filter(|_| input.starts_with('#')) {
            Some(id) => {
                show_ticket(context, id)?;
                context.wait_for_enter()?;
            }
            None => {
                context.report_error(format!(
                    "Invalid input '{}'. Enter an option number or #<ticket id>.",
                    input
                ));
                context.wait_for_enter()?;
            }
        }
        Ok(None)
    })
    .boxed()
}

fn view_ticket(context: &mut MenuContext) -> Result<(), MenuError> {
    match context.ask_id("Ticket id: ")? {
        Some(id) => show_ticket(context, id),
        None => Ok(()),
    }
}

fn show_ticket(context: &mut MenuContext, id: u64) -> Result<(), MenuError> {
    let ticket = context.service().ticket(id)?;
    println!("\n{}", ticket_details(&ticket));
    if ticket.is_overdue() {
        warning!("Ticket #{} is overdue.", ticket.id);
    }
    Ok(())
}

pub fn clients_menu() -> Box<dyn Menu> {
    MenuSkeleton::new("Clients", |_| {
        vec![
            MenuOption::action(1, "List clients", command_action::<ClientsCommand>()),
            MenuOption::action(2, "Search clients", search_clients),
            MenuOption::action(3, "View client", view_client),
        ]
    })
    .boxed()
}

fn search_clients(context: &mut MenuContext) -> Result<(), MenuError> {
    let Some(text) = context.ask("Search for: ")? else {
        return Ok(());
    };

    let clients = context.service().search_clients(&text)?;
    if clients.is_empty() {
        info!("No clients match '{}'.", text);
        return Ok(());
    }
    for client in &clients {
        println!("  #{:<5} {} <{}>", client.id, client.name, client.email);
    }
    Ok(())
}

fn view_client(context: &mut MenuContext) -> Result<(), MenuError> {
    if let Some(id) = context.ask_id("Client id: ")? {
        let client = context.service().client(id)?;
        println!("\n{}", client_details(&client));
    }
    Ok(())
}

pub fn technicians_menu() -> Box<dyn Menu> {
    MenuSkeleton::new("Technicians", |_| {
        vec![
            MenuOption::action(1, "Workload", command_action::<TechniciansCommand>()),
            MenuOption::action(
                2,
                "Available technicians",
                command_action_with::<TechniciansCommand>(&["--available"]),
            ),
            MenuOption::action(3, "Skill coverage", command_action::<SkillsCommand>()),
        ]
    })
    .boxed()
}

pub fn appointments_menu() -> Box<dyn Menu> {
    MenuSkeleton::new("Appointments", |_| {
        vec![
            MenuOption::action(1, "All appointments", command_action::<AppointmentsCommand>()),
            MenuOption::action(2, "Upcoming appointments", upcoming_appointments),
        ]
    })
    .boxed()
}

fn upcoming_appointments(context: &mut MenuContext) -> Result<(), MenuError> {
    let now = Local::now().naive_local();
    let mut upcoming: Vec<_> = context
        .service()
        .upcoming_appointments()?
        .into_iter()
        .filter(|a| a.is_upcoming_at(now))
        .collect();

    if upcoming.is_empty() {
        info!("No upcoming appointments.");
        return Ok(());
    }

    upcoming.sort_by_key(|a| a.scheduled_at);
    for appointment in &upcoming {
        println!(
            "  {}  {:>3} min  ticket {}  technician {}",
            utils::format_datetime(Some(appointment.scheduled_at)),
            appointment.duration_minutes,
            utils::format_optional_id(appointment.ticket_id),
            utils::format_optional_id(appointment.technician_id),
        );
    }
    Ok(())
}

pub fn reports_menu() -> Box<dyn Menu> {
    MenuSkeleton::new("Reports", |_| {
        vec![
            MenuOption::action(1, "System statistics", command_action::<StatsCommand>()),
            MenuOption::action(2, "Ticket statistics", ticket_statistics),
        ]
    })
    .with_content(|context| format!("Server: {}", context.service().base_url()))
    .boxed()
}

fn ticket_statistics(context: &mut MenuContext) -> Result<(), MenuError> {
    let stats = context.service().ticket_statistics()?;
    println!("  Total:        {}", stats.total);
    println!("  Open:         {}", stats.open);
    println!("  In progress:  {}", stats.in_progress);
    println!("  Resolved:     {}", stats.resolved);
    println!("  Closed:       {}", stats.closed);
    println!("  Resolution:   {:.1}%", stats.resolution_rate());
    if stats.overdue > 0 {
        warning!("{} tickets are overdue.", stats.overdue);
    }
    Ok(())
}
