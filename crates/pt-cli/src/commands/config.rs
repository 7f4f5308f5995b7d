//! Config command
//!
//! Show, reset and validate the peerthread configuration.

use super::init::write_default_config;
use super::Workspace;
use anyhow::Result;
use clap::Subcommand;
use pt_core::config::Config;
use std::fs;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reset to default configuration
    Reset {
        /// Force reset without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(workspace: &Workspace, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(workspace, json),
        ConfigCommand::Reset { force } => reset_config(workspace, force),
        ConfigCommand::Validate => validate_config(workspace),
    }
}

fn show_config(workspace: &Workspace, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config = workspace.config()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    if workspace.config_path.exists() {
        println!("{}", workspace.config_path.display().to_string().dimmed());
    } else {
        println!(
            "{}",
            format!("{} not found, showing defaults", workspace.config_path.display()).dimmed()
        );
    }
    println!();
    println!("{}", config.to_toml()?);

    Ok(())
}

fn reset_config(workspace: &Workspace, force: bool) -> Result<()> {
    use colored::Colorize;

    let config_path = &workspace.config_path;

    if !force {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt("Reset configuration to defaults?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    if config_path.exists() {
        let backup_path = format!(
            "{}.backup-{}",
            config_path.display(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        fs::copy(config_path, &backup_path)?;
        println!("{} Backed up to {}", "✓".green(), backup_path);
    }

    write_default_config(workspace)?;
    println!("{} Configuration reset to defaults.", "✓".green());

    Ok(())
}

fn validate_config(workspace: &Workspace) -> Result<()> {
    use colored::Colorize;

    let config_path = &workspace.config_path;

    if !config_path.exists() {
        eprintln!(
            "{} Configuration not found at {}",
            "✗".red(),
            config_path.display()
        );
        return Ok(());
    }

    match Config::load(config_path) {
        Ok(config) => {
            println!("{} Configuration is valid", "✓".green());
            println!(
                "  Replies: {:?} layout, children {:?}",
                config.thread.layout, config.thread.child_order
            );
            println!(
                "  One top-level review per author: {}",
                config.review.one_top_level_per_author
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{} Invalid configuration", "✗".red());
            Err(e.into())
        }
    }
}
