//! CLI commands module

pub mod board;
pub mod config;
pub mod init;
pub mod post;
pub mod reply;
pub mod thread;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pt_core::board::BoardManager;
use pt_core::config::Config;
use pt_core::types::BoardId;
use pt_storage::FileSystemStorage;
use tracing::debug;
use std::path::{Path, PathBuf};

/// Data directory looked up in the working directory
pub const LOCAL_DATA_DIR: &str = ".peerthread";

/// peerthread - threaded reviews and replies for shared notes
#[derive(Debug, Parser)]
#[command(name = "peerthread")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path (default: <data-dir>/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Data directory holding boards and configuration
    /// (default: ./.peerthread if present, else the per-user data directory)
    #[arg(long, global = true, env = "PEERTHREAD_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the data directory and default configuration
    Init(init::InitArgs),

    /// Post a top-level review on a board
    Post(post::PostArgs),

    /// Reply to a review or another reply
    Reply(reply::ReplyArgs),

    /// Render reply threads
    Thread(thread::ThreadArgs),

    /// Manage review boards
    #[command(subcommand)]
    Board(board::BoardCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Paths shared by every command
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Data directory
    pub data_dir: PathBuf,
    /// Configuration file
    pub config_path: PathBuf,
}

impl Workspace {
    fn from_cli(cli: &Cli) -> Self {
        let data_dir = match (&cli.data_dir, &cli.command) {
            (Some(dir), _) => dir.clone(),
            (None, Commands::Init(args)) if args.user => FileSystemStorage::default_base_dir(),
            (None, Commands::Init(_)) => PathBuf::from(LOCAL_DATA_DIR),
            (None, _) => locate_data_dir(Path::new(LOCAL_DATA_DIR)),
        };
        Self::at(data_dir, cli.config.clone())
    }

    /// Workspace rooted at `data_dir`, with an optional config override
    pub fn at(data_dir: PathBuf, config_path: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(|| data_dir.join("config.toml"));
        Self {
            data_dir,
            config_path,
        }
    }

    /// Load configuration, falling back to defaults
    pub fn config(&self) -> Result<Config> {
        Config::load_or_default(&self.config_path).with_context(|| {
            format!("Failed to load configuration from {}", self.config_path.display())
        })
    }

    /// Open board storage, which requires an initialised data directory
    pub fn manager(&self, config: &Config) -> Result<BoardManager> {
        if !self.data_dir.exists() {
            bail!(
                "No data directory at {}. Run 'peerthread init' first.",
                self.data_dir.display()
            );
        }
        let storage = FileSystemStorage::new(&self.data_dir)?;
        Ok(BoardManager::new(storage).with_config(config))
    }
}

/// `local` when it exists, otherwise the per-user data directory
fn locate_data_dir(local: &Path) -> PathBuf {
    if local.is_dir() {
        local.to_path_buf()
    } else {
        debug!("No {} here, using the per-user data directory", local.display());
        FileSystemStorage::default_base_dir()
    }
}

/// Parse and validate a board id argument
pub fn parse_board_id(raw: &str) -> Result<BoardId> {
    BoardId::from_string(raw).with_context(|| format!("Invalid board ID: {}", raw))
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let workspace = Workspace::from_cli(&cli);

    match cli.command {
        Commands::Init(args) => init::execute(&workspace, args),
        Commands::Post(args) => post::execute(&workspace, args),
        Commands::Reply(args) => reply::execute(&workspace, args),
        Commands::Thread(args) => thread::execute(&workspace, args),
        Commands::Board(cmd) => board::execute(&workspace, cmd),
        Commands::Config(cmd) => config::execute(&workspace, cmd),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_init_defaults_to_local_dir() {
        let cli = Cli::try_parse_from(["peerthread", "init"]).unwrap();
        if cli.data_dir.is_some() {
            // PEERTHREAD_DIR is set in this environment
            return;
        }
        let workspace = Workspace::from_cli(&cli);
        assert_eq!(workspace.data_dir, PathBuf::from(".peerthread"));
        assert_eq!(workspace.config_path, PathBuf::from(".peerthread/config.toml"));

        let cli = Cli::try_parse_from(["peerthread", "init", "--user"]).unwrap();
        let workspace = Workspace::from_cli(&cli);
        assert_eq!(workspace.data_dir, FileSystemStorage::default_base_dir());
    }

    #[test]
    fn test_locate_data_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let local = temp.path().join(LOCAL_DATA_DIR);
        assert_eq!(locate_data_dir(&local), FileSystemStorage::default_base_dir());

        std::fs::create_dir(&local).unwrap();
        assert_eq!(locate_data_dir(&local), local);
    }

    #[test]
    fn test_explicit_config_path() {
        let cli = Cli::try_parse_from([
            "peerthread",
            "--data-dir",
            "/tmp/pt",
            "-c",
            "/etc/pt.toml",
            "config",
            "show",
        ])
        .unwrap();
        let workspace = Workspace::from_cli(&cli);
        assert_eq!(workspace.data_dir, PathBuf::from("/tmp/pt"));
        assert_eq!(workspace.config_path, PathBuf::from("/etc/pt.toml"));
    }

    #[test]
    fn test_parse_board_id() {
        assert!(parse_board_id("note-1").is_ok());
        assert!(parse_board_id("../x").is_err());
    }
}
