//! # CLI commands
//!
//! The user-facing layer of eracli. Each command loads what it needs from
//! the local cache, talks to the remote APIs where required and reports
//! progress with spinners and the crate's status macros.
//!
//! | Command          | Function                |
//! |------------------|-------------------------|
//! | `library sync`   | [`sync_library`]        |
//! | `tags update`    | [`update_tags`]         |
//! | `eras detect`    | [`detect_eras`]         |
//! | `eras show`      | [`show_eras`]           |
//! | `eras playlists` | [`create_playlists`]    |
//! | `info`           | [`info`]                |
//!
//! The typical first run is:
//!
//! ```bash
//! eracli library sync --audio-features
//! eracli tags update
//! eracli eras detect --strategy tags --table
//! eracli eras playlists --dry-run
//! ```
//!
//! Fatal problems (missing credentials, unreadable cache) end the process
//! through [`error!`](crate::error!). Everything that only degrades the
//! result is reported with [`warning!`](crate::warning!) and the command
//! carries on.

mod eras;
mod info;
mod library;
mod playlists;
mod tags;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use eras::{DetectOptions, StrategyKind, detect_eras, show_eras};
pub use info::info;
pub use library::sync_library;
pub use playlists::create_playlists;
pub use tags::update_tags;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
