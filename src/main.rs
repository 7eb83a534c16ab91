use chrono::Duration;
use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use eracli::{
    Res,
    cli::{self, DetectOptions, StrategyKind},
    config, error,
    tags::DEFAULT_CONCURRENCY,
    utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage the local copy of your saved tracks
    #[command(subcommand)]
    Library(LibraryCommand),

    /// Manage Last.fm tags of the library
    #[command(subcommand)]
    Tags(TagsCommand),

    /// Detect and show listening eras
    #[command(subcommand)]
    Eras(ErasCommand),

    /// Show what is in the local cache
    Info,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Subcommand, Debug, Clone)]
pub enum LibraryCommand {
    /// Fetch saved tracks from Spotify
    Sync(SyncOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOpts {
    /// Also fetch audio features for mood detection
    #[clap(long)]
    audio_features: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TagsCommand {
    /// Fetch tags for tracks that have none or whose tags are stale
    Update(TagsUpdateOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct TagsUpdateOpts {
    /// Number of concurrent Last.fm requests
    #[clap(long, default_value_t = DEFAULT_CONCURRENCY, value_parser = utils::parse_positive)]
    concurrency: usize,

    /// Refetch cached tags older than this many days
    #[clap(long)]
    ttl_days: Option<u32>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ErasCommand {
    /// Group the library into eras
    Detect(DetectOpts),

    /// Print the last detected eras
    Show(ShowOpts),

    /// Write the last detected eras to Spotify as private playlists
    Playlists(PlaylistsOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectOpts {
    /// Clustering strategy
    #[clap(long, value_enum, default_value_t = StrategyKind::Temporal)]
    strategy: StrategyKind,

    /// Days without additions that start a new era (temporal)
    #[clap(long, value_parser = utils::parse_gap_days)]
    gap_days: Option<Duration>,

    /// Smallest group that counts as an era
    #[clap(long, value_parser = utils::parse_positive)]
    min_size: Option<usize>,

    /// Split eras with more tracks than this, 0 to never split (temporal)
    #[clap(long, value_parser = utils::parse_count)]
    max_tracks: Option<usize>,

    /// Number of clusters (tags, mood)
    #[clap(long, value_parser = utils::parse_positive)]
    clusters: Option<usize>,

    /// Vocabulary size (tags)
    #[clap(long, value_parser = utils::parse_positive)]
    max_tags: Option<usize>,

    /// Print a table instead of the summary
    #[clap(long)]
    table: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowOpts {
    /// Print a table instead of the summary
    #[clap(long)]
    table: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOpts {
    /// Print the eras without creating playlists
    #[clap(long)]
    dry_run: bool,

    /// Most playlists to create, newest eras first; 0 for all
    #[clap(long, default_value_t = 5, value_parser = utils::parse_count)]
    limit: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() -> Res<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("eracli=info".parse()?))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_tracing() {
        error!("Cannot set up logging. Err: {}", e);
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Library(LibraryCommand::Sync(opt)) => cli::sync_library(opt.audio_features).await,
        Command::Tags(TagsCommand::Update(opt)) => {
            cli::update_tags(opt.concurrency, opt.ttl_days.map(i64::from)).await
        }
        Command::Eras(ErasCommand::Detect(opt)) => {
            cli::detect_eras(DetectOptions {
                strategy: opt.strategy,
                gap: opt.gap_days,
                min_size: opt.min_size,
                max_tracks: opt.max_tracks,
                clusters: opt.clusters,
                max_tags: opt.max_tags,
                table: opt.table,
            })
            .await
        }
        Command::Eras(ErasCommand::Show(opt)) => cli::show_eras(opt.table).await,
        Command::Eras(ErasCommand::Playlists(opt)) => {
            cli::create_playlists(opt.dry_run, opt.limit).await
        }
        Command::Info => cli::info().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
