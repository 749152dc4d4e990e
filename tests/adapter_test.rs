mod common;

use clap::Parser;
use helpdesk_cli::{
    api::ApiService,
    cli::{
        CommandContext, EXIT_API_ERROR, OutputFormat, ReportCommand, StatsCommand,
        TechnicianSort, TechniciansCommand, TicketsCommand,
    },
    menu::adapter::{CommandOutcome, instantiate, instantiate_with, run_command, run_command_with},
};

use common::{BASE_URL, ScriptedTransport, context};

#[derive(Parser, Debug, Clone)]
struct ProbeOptions {
    #[clap(long, default_value = "http://localhost:8080")]
    target: String,

    #[clap(long, default_value = "table")]
    style: String,

    #[clap(long, default_value = "0")]
    exit_code: i32,
}

/// Command that records its options and returns a chosen exit code.
struct ProbeCommand {
    context: CommandContext,
    options: ProbeOptions,
}

impl ReportCommand for ProbeCommand {
    const NAME: &'static str = "probe";
    type Options = ProbeOptions;

    fn from_parts(context: CommandContext, options: ProbeOptions) -> Self {
        Self { context, options }
    }

    fn context(&self) -> &CommandContext {
        &self.context
    }

    fn run(&mut self, _service: &ApiService) -> i32 {
        self.options.exit_code
    }
}

#[derive(Parser, Debug, Clone)]
struct StrictOptions {
    #[clap(long)]
    ticket: u64,
}

/// Command with a mandatory option, so it cannot be built from defaults.
struct StrictCommand {
    context: CommandContext,
}

impl ReportCommand for StrictCommand {
    const NAME: &'static str = "strict";
    type Options = StrictOptions;

    fn from_parts(context: CommandContext, _options: StrictOptions) -> Self {
        Self { context }
    }

    fn context(&self) -> &CommandContext {
        &self.context
    }

    fn run(&mut self, _service: &ApiService) -> i32 {
        0
    }
}

#[test]
fn test_instantiate_fills_declared_defaults() {
    let command = instantiate::<ProbeCommand>(BASE_URL).unwrap();

    assert_eq!(command.options.target, "http://localhost:8080");
    assert_eq!(command.options.style, "table");
    assert_eq!(command.options.exit_code, 0);
}

#[test]
fn test_instantiate_uses_interactive_context() {
    let command = instantiate::<ProbeCommand>(BASE_URL).unwrap();

    assert_eq!(command.context().server_url, BASE_URL);
    assert!(!command.context().verbose);
    assert_eq!(command.context().format, OutputFormat::Table);
}

#[test]
fn test_instantiate_converts_defaults_to_field_types() {
    let tickets = instantiate::<TicketsCommand>(BASE_URL).unwrap();
    assert_eq!(tickets.options().limit, 25);
    assert!(!tickets.options().overdue);
    assert!(tickets.options().status.is_none());

    let technicians = instantiate::<TechniciansCommand>(BASE_URL).unwrap();
    assert_eq!(technicians.options().sort, TechnicianSort::Workload);
    assert!(!technicians.options().available);
}

#[test]
fn test_instantiate_with_overrides_single_options() {
    let tickets = instantiate_with::<TicketsCommand>(BASE_URL, &["--overdue"]).unwrap();
    assert!(tickets.options().overdue);
    assert_eq!(tickets.options().limit, 25);

    let probe = instantiate_with::<ProbeCommand>(BASE_URL, &["--exit-code", "3"]).unwrap();
    assert_eq!(probe.options.exit_code, 3);
    assert_eq!(probe.options.style, "table");
}

#[test]
fn test_instantiate_fails_without_required_option() {
    assert!(instantiate::<StrictCommand>(BASE_URL).is_err());
}

#[test]
fn test_run_command_succeeds_on_zero() {
    let mut ctx = context(&ScriptedTransport::new(), "");

    assert_eq!(run_command::<ProbeCommand>(&mut ctx), CommandOutcome::Succeeded);
    assert!(ctx.last_error().is_none());
}

#[test]
fn test_run_command_reports_non_zero_exit_code() {
    let mut ctx = context(&ScriptedTransport::new(), "");

    let outcome = run_command_with::<ProbeCommand>(&mut ctx, &["--exit-code", "3"]);

    assert_eq!(outcome, CommandOutcome::Failed(3));
    assert_eq!(
        ctx.last_error(),
        Some("'probe' finished with exit code 3")
    );
}

#[test]
fn test_run_command_aborts_when_command_cannot_be_built() {
    let mut ctx = context(&ScriptedTransport::new(), "");

    let outcome = run_command::<StrictCommand>(&mut ctx);

    assert!(matches!(outcome, CommandOutcome::Aborted(_)));
    assert!(ctx.last_error().unwrap().starts_with("Cannot run 'strict'"));
}

#[test]
fn test_run_report_against_api() {
    let tickets = r#"[
        {"id": 1, "title": "VPN drops", "status": "OPEN", "priority": "LOW"},
        {"id": 2, "title": "Printer on fire", "status": "IN_PROGRESS", "priority": "CRITICAL", "technicianId": 4}
    ]"#;
    let transport = ScriptedTransport::new().respond(200, tickets);
    let mut ctx = context(&transport, "");

    assert_eq!(run_command::<TicketsCommand>(&mut ctx), CommandOutcome::Succeeded);
    assert_eq!(transport.calls(), vec![format!("{}/api/tickets", BASE_URL)]);
}

#[test]
fn test_api_failure_maps_to_failed_outcome() {
    let transport = ScriptedTransport::new()
        .respond(200, "{}")
        .respond(500, "database offline");
    let mut ctx = context(&transport, "");

    let outcome = run_command::<StatsCommand>(&mut ctx);

    assert_eq!(outcome, CommandOutcome::Failed(EXIT_API_ERROR));
    assert_eq!(transport.calls().len(), 2);
}
