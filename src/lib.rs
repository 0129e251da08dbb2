//! Spotify top-items proxy library
//!
//! This library implements a small backend that lets a browser frontend log a
//! user in with Spotify and read their profile and top artists/tracks without
//! ever seeing the application's client secret.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the routes exposed to the frontend
//! - `config` - Configuration loading from the environment and `.env` files
//! - `error` - Error taxonomy shared by all modules
//! - `schema` - Validated decoding of upstream JSON
//! - `server` - Router construction and the HTTP listener
//! - `spotify` - Outbound calls to the Spotify accounts and Web API hosts
//! - `types` - Typed shapes of every upstream document
//! - `utils` - Small encoding helpers
//!
//! # Example
//!
//! ```
//! use statify::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> statify::error::Result<()> {
//!     config::load_env().await?;
//!     server::start_api_server(config::Config::from_env()?).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod schema;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints a success message with a green checkmark.
///
/// Used for operator-facing CLI output, not for request logging (that goes
/// through `tracing`).
///
/// # Example
///
/// ```
/// success!("Configuration loaded for client {}", client_id);
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
/// Only for unrecoverable startup failures such as missing configuration.
/// Code after this macro does not run.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
