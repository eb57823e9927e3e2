//! CLI module for Menugate
//!
//! Provides command-line interface using clap.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::*;

/// Menugate - admin page permission gate
#[derive(Parser)]
#[command(name = "menugate")]
#[command(author = "Menugate Contributors")]
#[command(version)]
#[command(about = "Check admin page access and render navigation menus", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the permission gate for an admin page
    #[command(visible_alias = "c")]
    Check(check::CheckArgs),

    /// Render the sidebar menus the current user may see
    Menus(menus::MenusArgs),

    /// Render the public header navigation
    Header(header::HeaderArgs),

    /// Issue a CSRF token and show how it would be attached
    Csrf(csrf::CsrfArgs),

    /// List page access rules
    Rules(rules::RulesArgs),
}
