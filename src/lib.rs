//! Era detection for a Spotify library.
//!
//! eracli groups a user's saved tracks into listening "eras", either by
//! gaps in the add timeline, by Last.fm tag similarity or by audio-feature
//! mood. The engine in [`clustering`] is synchronous and pure; the tag
//! enrichment in [`tags`] runs a bounded async worker pool behind a
//! persistent cache.
//!
//! # Modules
//!
//! - `cli` - Command implementations for the `eracli` binary
//! - `clustering` - Temporal, tag and mood era detection plus formatting
//! - `config` - Environment and `.env` handling
//! - `error` - The crate-wide [`EraError`]
//! - `lastfm` - Last.fm tag client
//! - `management` - JSON caches for the library, tags and detected eras
//! - `spotify` - Saved tracks and audio features from the Web API
//! - `tags` - Concurrent tag fetching and the cache-aside layer
//! - `types` - Data structures shared across modules
//! - `utils` - Conversions and small helpers

pub mod cli;
pub mod clustering;
pub mod config;
pub mod error;
pub mod lastfm;
pub mod management;
pub mod spotify;
pub mod tags;
pub mod types;
pub mod utils;

pub use error::EraError;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the binary glue where errors from several sources meet. Library
/// code returns [`EraError`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line with a blue `o` marker.
///
/// ```ignore
/// info!("Library has {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits with status 1.
///
/// Only for failures the command cannot recover from. The expansion
/// diverges, so it can stand in for a value in a `match` arm:
///
/// ```ignore
/// let token = match config::spotify_token() {
///     Ok(t) => t,
///     Err(e) => error!("{}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line for problems the command works around.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
