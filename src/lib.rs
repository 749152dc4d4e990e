//! Helpdesk CLI Library
//!
//! An interactive, menu-driven client and a set of one-shot report commands
//! for the helpdesk ticketing REST API.
//!
//! # Modules
//!
//! - `api` - Blocking HTTP client, error type and endpoint service
//! - `cli` - Report commands shared by the command line and the menus
//! - `config` - Configuration defaults and `.env` loading
//! - `menu` - Menu contract, skeleton, navigation manager and command adapter
//! - `types` - Records returned by the API and their table rows
//! - `utils` - Formatting and terminal helpers
//!
//! # Example
//!
//! ```
//! use helpdesk_cli::{api::ApiService, menu::{screens, MenuContext, MenuManager, Prompt}};
//!
//! fn main() -> helpdesk_cli::Res<()> {
//!     let service = ApiService::connect("http://localhost:8080")?;
//!     let manager = MenuManager::new(MenuContext::new(service, Prompt::stdin()));
//!     manager.start(screens::main_menu)?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod menu;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error so configuration and startup code can mix
/// error sources freely.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Connected to {}", url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Fetched {} tickets", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors in the binary, after every resource that needs
/// releasing has been dropped.
///
/// # Example
///
/// ```
/// error!("Cannot reach API at {}", url);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a recoverable error with a red cross. Execution continues.
///
/// # Example
///
/// ```
/// failed!("Invalid option: {}", number);
/// ```
#[macro_export]
macro_rules! failed {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "x".red().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("{} tickets are overdue", overdue);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
