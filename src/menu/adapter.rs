//! Runs report commands inside a menu session.
//!
//! A report command normally gets its options from clap and its context
//! from the global command-line flags. Here the context is synthesized from
//! the session (API base URL, not verbose, table output) and the options
//! struct is parsed from an argument list holding only the command name, so
//! every field takes its declared default converted to the field's type.
//!
//! Failures never end the session: they are logged with the command name and
//! reported as recoverable errors.

use clap::Parser;

use crate::{
    cli::{CommandContext, ReportCommand},
    menu::{MenuContext, MenuError},
};

/// Result of running a command from a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Succeeded,
    /// The command ran and returned a non-zero exit code.
    Failed(i32),
    /// The command could not be built.
    Aborted(String),
}

/// Builds `C` with the session context and default options.
///
/// # Arguments
///
/// * `server_url` - API base URL of the running session
///
/// # Errors
///
/// Returns the clap error when an option has no default and is required.
///
/// # Example
///
/// ```
/// let tickets = instantiate::<TicketsCommand>("http://localhost:8080")?;
/// assert_eq!(tickets.options().limit, 25);
/// ```
pub fn instantiate<C: ReportCommand>(server_url: &str) -> Result<C, clap::Error> {
    instantiate_with::<C>(server_url, &[])
}

/// Builds `C` with the session context; `args` override individual defaults.
///
/// ```
/// let overdue = instantiate_with::<TicketsCommand>(url, &["--overdue"])?;
/// ```
pub fn instantiate_with<C: ReportCommand>(
    server_url: &str,
    args: &[&str],
) -> Result<C, clap::Error> {
    let argv = std::iter::once(C::NAME).chain(args.iter().copied());
    let options = C::Options::try_parse_from(argv)?;
    Ok(C::from_parts(CommandContext::interactive(server_url), options))
}

/// Runs `C` with default options against the session's API service.
pub fn run_command<C: ReportCommand>(context: &mut MenuContext) -> CommandOutcome {
    run_command_with::<C>(context, &[])
}

/// Runs `C` with some options overridden.
///
/// Construction failures and non-zero exit codes are logged and reported
/// through [`MenuContext::report_error`]; the session keeps running.
pub fn run_command_with<C: ReportCommand>(
    context: &mut MenuContext,
    args: &[&str],
) -> CommandOutcome {
    let mut command = match instantiate_with::<C>(context.service().base_url(), args) {
        Ok(command) => command,
        Err(e) => {
            let reason = e.to_string().trim().to_string();
            tracing::error!(command = C::NAME, error = %reason, "cannot prepare command");
            context.report_error(format!("Cannot run '{}': {}", C::NAME, reason));
            return CommandOutcome::Aborted(reason);
        }
    };

    match command.run(context.service()) {
        0 => CommandOutcome::Succeeded,
        code => {
            tracing::error!(command = C::NAME, code, "command finished with an error");
            context.report_error(format!("'{}' finished with exit code {}", C::NAME, code));
            CommandOutcome::Failed(code)
        }
    }
}

/// Menu action running `C` with default options.
pub fn command_action<C: ReportCommand + 'static>()
-> impl FnMut(&mut MenuContext) -> Result<(), MenuError> + 'static {
    |context: &mut MenuContext| {
        run_command::<C>(context);
        Ok(())
    }
}

/// Menu action running `C` with some options overridden.
pub fn command_action_with<C: ReportCommand + 'static>(
    args: &'static [&'static str],
) -> impl FnMut(&mut MenuContext) -> Result<(), MenuError> + 'static {
    move |context: &mut MenuContext| {
        run_command_with::<C>(context, args);
        Ok(())
    }
}
