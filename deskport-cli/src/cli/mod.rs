//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches to the two export pipelines.

pub mod issues;
pub mod tickets;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI command for deskport
#[derive(Parser)]
#[command(name = "deskport")]
#[command(about = "Export Jira Service Desk tickets to CSV")]
#[command(
  long_about = "Deskport pulls every ticket of a Jira Service Desk project through the REST API\n\
        and flattens it into a CSV file suitable for offline analysis or migration."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for log output.\n\n\
             default: progress (info) messages\n\
             -v: Show debug level messages\n\
             -vv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Read settings from this TOML file instead of the platform config directory
  #[arg(long, global = true, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for deskport
#[derive(Subcommand)]
pub enum Commands {
  /// Export every ticket of a project to CSV
  #[command(long_about = "Export every ticket of a project to CSV.\n\n\
            Tickets are fetched 50 at a time until the project is exhausted. If a page\n\
            request fails, the tickets fetched so far are still written.")]
  Tickets(tickets::TicketsArgs),

  /// Export issues with their public comments, diverting internal comments
  #[command(long_about = "Export issues together with their public comments.\n\n\
            Each issue's public comments are embedded as a JSON array in the Comments\n\
            column. Internal (non-public) comments are appended to a separate CSV file\n\
            and never reach the main export.")]
  Issues(issues::IssuesArgs),
}

/// Connection settings shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
  /// Jira host, e.g. https://company.atlassian.net (falls back to
  /// DESKPORT_JIRA_HOST, then the config file)
  #[arg(long, value_name = "URL")]
  pub host: Option<String>,

  /// Jira username (falls back to .netrc)
  #[arg(short = 'u', long, env = "DESKPORT_JIRA_USERNAME")]
  pub username: Option<String>,

  /// Jira API token (falls back to .netrc)
  #[arg(
    short = 'a',
    long = "api-token",
    alias = "api_token",
    env = "DESKPORT_JIRA_API_TOKEN",
    hide_env_values = true
  )]
  pub api_token: Option<String>,

  /// PEM bundle of extra root certificates to trust, e.g. a corporate CA
  /// [config: ca_cert]
  #[arg(long = "ca-cert", value_name = "FILE")]
  pub ca_cert: Option<PathBuf>,
}

/// Handle the parsed command
pub fn handle_cli(cli: Cli) -> Result<()> {
  let config = crate::clients::load_export_config(cli.config.as_deref())?;

  match cli.command {
    Commands::Tickets(args) => tickets::handle_tickets_command(args, &config),
    Commands::Issues(args) => issues::handle_issues_command(args, &config),
  }
}
