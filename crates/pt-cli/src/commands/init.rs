//! Init command
//!
//! Create the data directory, the boards folder and a default config.

use super::Workspace;
use anyhow::{Context, Result};
use clap::Args;
use pt_core::config::Config;
use std::fs;

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration
    #[arg(long)]
    pub force: bool,

    /// Initialise the per-user data directory instead of ./.peerthread
    #[arg(long)]
    pub user: bool,
}

/// Execute the init command
pub fn execute(workspace: &Workspace, args: InitArgs) -> Result<()> {
    use colored::Colorize;

    let data_dir = &workspace.data_dir;
    if workspace.config_path.exists() && !args.force {
        eprintln!(
            "{} peerthread already initialized in {}. Use --force to reinitialize.",
            "⚠".yellow(),
            data_dir.display()
        );
        return Ok(());
    }

    fs::create_dir_all(data_dir.join("boards"))
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    println!("{} Created {}", "✓".green(), data_dir.display());

    write_default_config(workspace)?;
    println!(
        "{} Generated {}",
        "✓".green(),
        workspace.config_path.display()
    );

    println!("\n{}", "Next steps:".bold());
    println!(
        "  1. Post a review:  {}",
        "peerthread post note-<id> --author <user> --rating 5 \"...\"".cyan()
    );
    println!("  2. Show threads:   {}", "peerthread thread note-<id>".cyan());

    Ok(())
}

/// Write the default configuration with a header comment
pub fn write_default_config(workspace: &Workspace) -> Result<()> {
    let body = Config::default().to_toml()?;
    let content = format!("# peerthread configuration\n\n{}", body);

    if let Some(parent) = workspace.config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&workspace.config_path, content).with_context(|| {
        format!("Failed to write {}", workspace.config_path.display())
    })?;
    Ok(())
}
