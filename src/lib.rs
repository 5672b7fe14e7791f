//! Spotify listening statistics dashboard.
//!
//! This library backs the `spotistats` binary. It stores the Spotify
//! application credentials, runs the OAuth authorization-code flow against
//! the Spotify accounts service, reads the user's profile plus top artists
//! and top tracks, and renders them as a two-column terminal dashboard.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback server
//! - `cli` - Command implementations (`--setup` and the dashboard)
//! - `config` - File locations and environment overrides
//! - `management` - Persistence of credentials and the token cache
//! - `server` - Local HTTP server receiving the OAuth redirect
//! - `spotify` - Spotify Web API client and authorization flow
//! - `types` - Data structures shared across the crate
//! - `ui` - Dashboard rendering
//! - `utils` - Small helpers for the auth flow and formatting

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod ui;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error so callers can propagate any error with `?`
/// and inspect it later with `downcast_ref`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Opening browser for authorization...");
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
/// success!("Configuration saved to {}", path.display());
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
/// Terminates the process with exit code 1 right after printing, so it must
/// only be used for failures the program cannot continue from.
///
/// # Example
///
/// ```
/// error!("Configuration not found.");
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

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Failed to write token cache: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
