use clap::Parser;

use crate::{
    api::ApiService,
    cli::{self, CommandContext, ReportCommand},
    info,
    types::{Client, ClientTableRow},
    utils,
};

#[derive(Parser, Debug, Clone)]
pub struct ClientsOptions {
    /// Search clients by name, email or company
    #[clap(long)]
    pub search: Option<String>,
}

/// Client directory, sorted by name.
pub struct ClientsCommand {
    context: CommandContext,
    options: ClientsOptions,
}

impl ReportCommand for ClientsCommand {
    const NAME: &'static str = "clients";
    type Options = ClientsOptions;

    fn from_parts(context: CommandContext, options: ClientsOptions) -> Self {
        Self { context, options }
    }

    fn context(&self) -> &CommandContext {
        &self.context
    }

    fn run(&mut self, service: &ApiService) -> i32 {
        let result = cli::fetch(&self.context, "Fetching clients...", || {
            match self.options.search.as_deref() {
                Some(text) => service.search_clients(text),
                None => service.clients(),
            }
        });

        let mut clients = match result {
            Ok(clients) => clients,
            Err(e) => return cli::api_failure(Self::NAME, &e),
        };

        if clients.is_empty() {
            info!("No clients found.");
            return cli::EXIT_OK;
        }

        clients.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        let rows: Vec<ClientTableRow> = clients.iter().map(client_row).collect();
        cli::emit(&self.context, &clients, rows)
    }
}

pub(crate) fn client_row(client: &Client) -> ClientTableRow {
    ClientTableRow {
        id: client.id,
        name: client.name.clone(),
        email: client.email.clone(),
        company: client
            .company
            .as_deref()
            .map(|c| utils::truncate(c, 30))
            .unwrap_or_else(|| "-".to_string()),
    }
}

/// Multi-line detail view used by the client lookup in the menus.
pub fn client_details(client: &Client) -> String {
    [
        format!("Client #{}: {}", client.id, client.name),
        format!("Email:    {}", client.email),
        format!("Phone:    {}", client.phone.as_deref().unwrap_or("-")),
        format!("Company:  {}", client.company.as_deref().unwrap_or("-")),
        format!("Since:    {}", utils::format_datetime(client.created_at)),
    ]
    .join("\n")
}
