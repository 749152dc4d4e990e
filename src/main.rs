use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use helpdesk_cli::{
    api::ApiService,
    cli::{
        AppointmentsCommand, AppointmentsOptions, ClientsCommand, ClientsOptions, CommandContext,
        OutputFormat, ReportCommand, SkillsCommand, SkillsOptions, StatsCommand, StatsOptions,
        TechniciansCommand, TechniciansOptions, TicketsCommand, TicketsOptions,
    },
    config, error,
    menu::{MenuContext, MenuManager, Prompt, screens},
    success, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name = "helpdesk",
  bin_name = "helpdesk",
  about = env!("CARGO_PKG_DESCRIPTION"),
  styles = styles(),
)]
struct Cli {
    /// Base URL of the helpdesk API
    #[clap(long, global = true, env = config::API_URL_ENV, default_value = config::DEFAULT_API_URL)]
    server: String,

    /// Print diagnostic output
    #[clap(long, short, global = true)]
    verbose: bool,

    /// Output format of reports
    #[clap(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Start the interactive menu (default)
    Menu,

    /// System statistics
    Stats(StatsOptions),

    /// List tickets
    Tickets(TicketsOptions),

    /// Technician workload
    Technicians(TechniciansOptions),

    /// Skill coverage across technicians
    Skills(SkillsOptions),

    /// Client directory
    Clients(ClientsOptions),

    /// Appointment schedule
    Appointments(AppointmentsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
struct CompletionsOption {
    shell: Shell,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let env_loaded = config::load_env();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &env_loaded {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Err(e) => tracing::debug!(error = %e, "no environment file loaded"),
    }

    let context = CommandContext {
        server_url: cli.server.clone(),
        verbose: cli.verbose,
        format: cli.format,
    };

    let code = match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            interactive(&cli.server);
            0
        }
        Command::Stats(opt) => report::<StatsCommand>(context, opt),
        Command::Tickets(opt) => report::<TicketsCommand>(context, opt),
        Command::Technicians(opt) => report::<TechniciansCommand>(context, opt),
        Command::Skills(opt) => report::<SkillsCommand>(context, opt),
        Command::Clients(opt) => report::<ClientsCommand>(context, opt),
        Command::Appointments(opt) => report::<AppointmentsCommand>(context, opt),
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            0
        }
    };

    std::process::exit(code);
}

fn service(server_url: &str) -> ApiService {
    match ApiService::connect(server_url) {
        Ok(service) => service,
        Err(e) => error!("Cannot create API client: {}", e),
    }
}

fn report<C: ReportCommand>(context: CommandContext, options: C::Options) -> i32 {
    let service = service(&context.server_url);
    let mut command = C::from_parts(context, options);
    command.run(&service)
}

fn interactive(server_url: &str) {
    let manager = MenuManager::new(MenuContext::new(service(server_url), Prompt::stdin()));

    if let Err(e) = manager.start(screens::main_menu) {
        warning!("Is the helpdesk server running? Use --server or HELPDESK_API_URL to point elsewhere.");
        error!("{}", e);
    }

    success!("Goodbye!");
}
