use colored::Colorize;
use thiserror::Error;

use crate::{
    failed, info,
    menu::{Menu, MenuContext, MenuError},
    utils,
};

/// Separator between menu titles in the breadcrumb line.
pub const BREADCRUMB_SEPARATOR: &str = " > ";

const HELP_TEXT: &str = "\
Global commands (available in every menu):
  back, b          Return to the previous menu
  quit, q, exit    Leave the helpdesk client
  help, h          Show this help

Anything else is handled by the current menu: enter the number of an
option to select it.";

/// Commands recognized before the current menu sees the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalCommand {
    Back,
    Quit,
    Help,
}

impl GlobalCommand {
    /// Case-insensitive match on the trimmed input.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "back" | "b" => Some(GlobalCommand::Back),
            "quit" | "q" | "exit" => Some(GlobalCommand::Quit),
            "help" | "h" => Some(GlobalCommand::Help),
            _ => None,
        }
    }
}

/// Whether the session keeps running after one dispatched input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Visited menus plus the current one.
///
/// The root menu starts as `current` and is never on the stack, so the
/// stack depth is the number of forward navigations minus backs.
pub struct Navigation {
    stack: Vec<Box<dyn Menu>>,
    current: Box<dyn Menu>,
}

impl Navigation {
    pub fn new(mut root: Box<dyn Menu>, context: &MenuContext) -> Self {
        root.initialize(context);
        Self {
            stack: Vec::new(),
            current: root,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current(&self) -> &dyn Menu {
        self.current.as_ref()
    }

    /// The menu that opened the current one, if any.
    pub fn parent(&self) -> Option<&dyn Menu> {
        self.stack.last().map(|menu| menu.as_ref())
    }

    pub fn breadcrumbs(&self) -> String {
        self.stack
            .iter()
            .map(|menu| menu.title())
            .chain(std::iter::once(self.current.title()))
            .collect::<Vec<_>>()
            .join(BREADCRUMB_SEPARATOR)
    }

    pub fn forward(&mut self, mut menu: Box<dyn Menu>, context: &MenuContext) {
        menu.initialize(context);
        let previous = std::mem::replace(&mut self.current, menu);
        self.stack.push(previous);
    }

    /// Returns to the previous menu; `false` when already at the root.
    pub fn back(&mut self) -> bool {
        match self.stack.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    pub fn render(&self, context: &MenuContext) {
        println!("{}\n", self.breadcrumbs().dimmed());
        self.current.display(context);
    }

    /// Handles one line of input: global commands first, then the current menu.
    pub fn dispatch(&mut self, input: &str, context: &mut MenuContext) -> Result<Flow, MenuError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Flow::Continue);
        }

        if let Some(command) = GlobalCommand::parse(input) {
            return match command {
                GlobalCommand::Back => {
                    if !self.back() {
                        info!("Already at the top-level menu.");
                        context.wait_for_enter()?;
                    }
                    Ok(Flow::Continue)
                }
                GlobalCommand::Quit => Ok(Flow::Stop),
                GlobalCommand::Help => {
                    println!("\n{}", HELP_TEXT);
                    context.wait_for_enter()?;
                    Ok(Flow::Continue)
                }
            };
        }

        match self.current.handle_input(input, context)? {
            Some(menu) => {
                self.forward(menu, context);
                Ok(Flow::Continue)
            }
            None if self.current.is_exit_requested() => Ok(Flow::Stop),
            None => Ok(Flow::Continue),
        }
    }
}

/// Explicit session state threaded through the manager loop.
pub enum Session {
    NotStarted,
    Running(Navigation),
    Stopped,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Cannot connect to the helpdesk API at {url}")]
    Unreachable { url: String },
}

/// Drives the interactive session: render, read one line, dispatch.
pub struct MenuManager {
    context: MenuContext,
    session: Session,
}

impl MenuManager {
    pub fn new(context: MenuContext) -> Self {
        Self {
            context,
            session: Session::NotStarted,
        }
    }

    /// Runs the session until the user quits or input ends.
    ///
    /// The API must answer its health check first; otherwise the root menu is
    /// never built. The manager, and with it the API client, is dropped when
    /// this returns.
    ///
    /// # Errors
    ///
    /// [`SessionError::Unreachable`] when the health check fails.
    pub fn start(mut self, root: impl FnOnce() -> Box<dyn Menu>) -> Result<(), SessionError> {
        if !self.context.service().test_connection() {
            return Err(SessionError::Unreachable {
                url: self.context.service().base_url().to_string(),
            });
        }

        tracing::debug!(url = %self.context.service().base_url(), "session started");
        self.session = Session::Running(Navigation::new(root(), &self.context));

        loop {
            match std::mem::replace(&mut self.session, Session::Stopped) {
                Session::Running(navigation) => self.session = self.step(navigation),
                Session::NotStarted | Session::Stopped => break,
            }
        }

        tracing::debug!("session stopped");
        Ok(())
    }

    fn step(&mut self, mut navigation: Navigation) -> Session {
        utils::clear_screen();
        navigation.render(&self.context);

        let line = match self.context.prompt().ask("\n> ") {
            Ok(Some(line)) => line,
            Ok(None) => return Session::Stopped,
            Err(e) => {
                failed!("Cannot read input: {}", e);
                return Session::Stopped;
            }
        };

        match navigation.dispatch(&line, &mut self.context) {
            Ok(Flow::Continue) => Session::Running(navigation),
            Ok(Flow::Stop) => Session::Stopped,
            Err(e) => {
                tracing::warn!(error = %e, "unhandled menu error");
                self.context
                    .report_error(format!("An unexpected error occurred: {}", e));
                if let Err(e) = self.context.wait_for_enter() {
                    failed!("Cannot read input: {}", e);
                    return Session::Stopped;
                }
                Session::Running(navigation)
            }
        }
    }
}
