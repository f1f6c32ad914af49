//! TIDAL Favorites Backup Library
//!
//! This library backs up and restores a TIDAL user's favorite artists, tracks,
//! albums and playlists. Backups are JSON snapshots written to a local directory,
//! optionally accompanied by the cover images of playlists the user owns.
//!
//! # Modules
//!
//! - `cli` - Session bootstrap, backup and restore operations
//! - `config` - Environment configuration and API endpoints
//! - `management` - Credential INI files and snapshot persistence
//! - `tidal` - TIDAL API client, device login and image URL resolution
//! - `types` - Snapshot records and API data structures
//! - `utils` - Paging offsets, spinners and other helpers
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use tidalfav::{cli, config};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> tidalfav::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::ApiSettings::from_env();
//!     let tidal = cli::bootstrap(&settings, None).await?;
//!     cli::backup(&tidal, "tidal_favorites.json", Path::new("backup")).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod management;
pub mod tidal;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Operation-level errors (network, file system, malformed snapshots) are boxed
/// and propagated to the binary, which reports them and exits with a nonzero
/// status. The Send + Sync bounds keep the alias usable across `.await` points.
///
/// # Example
///
/// ```
/// use tidalfav::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("authenticating new session");
/// info!("Found {} playlists", count);
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
/// Used for per-item confirmations such as a favorite being restored.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing, so it is
/// reserved for errors that reach the top level.
///
/// # Example
///
/// ```
/// error!("Backup failed: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems, e.g. an incomplete credentials file that
/// makes the program fall back to an interactive login.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
