//! Terminal Music Streaming Client Library
//!
//! This library provides the building blocks of a music streaming client that
//! talks to a REST backend for songs, albums, playlists and accounts, and plays
//! them through an in-process playback coordinator with queue, shuffle, repeat,
//! volume and like state.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Typed errors for the gateway, local stores and audio output
//! - `gateway` - REST backend client and the record normalization boundary
//! - `logging` - File based diagnostics through `tracing`
//! - `management` - Session, library and like stores
//! - `player` - Playback coordinator, queue and audio output abstraction
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use tunedeck::{config, gateway::Gateway};
//!
//! #[tokio::main]
//! async fn main() -> tunedeck::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env();
//!     let gateway = Gateway::new(&settings.api_url, &settings.media_url)?;
//!     let songs = gateway.list_songs().await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod management;
pub mod player;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the command-line glue where errors from several layers meet and
/// only need to be reported. Library layers return their own typed errors
/// from [`error`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loading songs...");
/// info!("Found {} songs", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the command-line boundary uses this, for conditions the user has to
/// fix before retrying (no session, unreadable file). Library code never
/// calls it.
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
/// This is the transient, non-fatal notice used for failed gateway calls and
/// media problems.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
