//! # Menu Module
//!
//! Interactive navigation over the helpdesk API.
//!
//! ```text
//! MenuManager  (session state, global commands, render/read/dispatch loop)
//!     ↓ owns
//! Navigation   (stack of visited menus + current menu, breadcrumbs)
//!     ↓ delegates input to
//! dyn Menu     (MenuSkeleton instances built in `screens`)
//!     ↓ selects
//! MenuOption   (submenu | action | exit)
//!     ↓ actions may call
//! ApiService directly, or a report command through `adapter`
//! ```
//!
//! Everything runs on one thread. The API service and the input source live
//! in a [`MenuContext`] owned by the manager and lent to menus while they
//! handle input.

pub mod adapter;
mod manager;
mod option;
pub mod screens;
mod skeleton;

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::{api::ApiError, api::ApiService, failed};

pub use manager::{
    BREADCRUMB_SEPARATOR, Flow, GlobalCommand, MenuManager, Navigation, Session, SessionError,
};
pub use option::{MenuAction, MenuOption, MenuSupplier, OptionKind, Selection};
pub use skeleton::{MenuSkeleton, NAVIGATION_HINT};

/// Errors raised while a menu handles input.
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid value '{value}': {reason}")]
    InvalidValue { value: String, reason: String },
}

/// One screen of the interactive session.
///
/// Lifecycle: `initialize` once, then any number of `display` /
/// `handle_input` rounds until the manager drops the menu or
/// `is_exit_requested` turns true.
pub trait Menu {
    fn title(&self) -> &str;

    /// Populates the options. Calling it again has no effect.
    fn initialize(&mut self, context: &MenuContext);

    fn display(&self, context: &MenuContext);

    /// Handles one line of input that was not a global command.
    ///
    /// Returns the successor menu on forward navigation, `None` to stay.
    fn handle_input(
        &mut self,
        input: &str,
        context: &mut MenuContext,
    ) -> Result<Option<Box<dyn Menu>>, MenuError>;

    fn is_exit_requested(&self) -> bool;
}

/// Line-oriented input source for the session.
pub struct Prompt {
    reader: Box<dyn BufRead>,
}

impl Prompt {
    pub fn new(reader: impl BufRead + 'static) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }

    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }

    /// Reads one line without its line terminator. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        print!("{}", label);
        io::stdout().flush()?;
        self.read_line()
    }
}

/// Shared services lent to menus: the API service and the input source.
pub struct MenuContext {
    service: ApiService,
    prompt: Prompt,
    last_error: Option<String>,
}

impl MenuContext {
    pub fn new(service: ApiService, prompt: Prompt) -> Self {
        Self {
            service,
            prompt,
            last_error: None,
        }
    }

    pub fn service(&self) -> &ApiService {
        &self.service
    }

    pub fn prompt(&mut self) -> &mut Prompt {
        &mut self.prompt
    }

    /// Asks for a value; `None` when the user entered nothing or input ended.
    pub fn ask(&mut self, label: &str) -> Result<Option<String>, MenuError> {
        let answer = self.prompt.ask(label)?;
        Ok(answer
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty()))
    }

    /// Asks for a numeric id.
    pub fn ask_id(&mut self, label: &str) -> Result<Option<u64>, MenuError> {
        match self.ask(label)? {
            Some(value) => value
                .parse::<u64>()
                .map(Some)
                .map_err(|_| MenuError::InvalidValue {
                    value,
                    reason: "expected a numeric id".to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Blocks until the user presses Enter. End of input counts as Enter.
    pub fn wait_for_enter(&mut self) -> Result<(), MenuError> {
        self.prompt.ask("\nPress Enter to continue...")?;
        Ok(())
    }

    /// Shows a recoverable error and remembers it as the last reported one.
    pub fn report_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        failed!("{}", message);
        self.last_error = Some(message);
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
