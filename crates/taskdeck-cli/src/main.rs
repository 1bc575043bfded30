use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use taskdeck_core::clock::SystemClock;
use taskdeck_core::error::CoreError;
use taskdeck_core::repository::InMemoryRepository;

use cli::{Cli, Commands};
use commands::Session;
use query_parser::QueryParseError;

mod cli;
mod commands;
mod config;
mod logging;
mod parser;
mod query_parser;
mod util;
mod views;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        handle_error(e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::Config::new().context("Failed to load configuration")?;
    let _logger = logging::init_logging(cli.verbose, &config.log_level)?;

    let tz = config.resolve_timezone(cli.timezone.as_deref())?;
    log::debug!("Using timezone {}", tz);
    let clock = SystemClock::new(tz);
    let repo = if cli.empty || !config.seed {
        InMemoryRepository::new(clock)
    } else {
        InMemoryRepository::seeded(clock)
    };
    let mut session = Session::new(repo, config);

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => commands::dashboard::show_dashboard(&session),
        Commands::List(command) => commands::list::list_tasks(&session, command),
        Commands::Today(options) => commands::list::list_due_today(&session, options),
        Commands::Project(command) => commands::project::project_command(&session, command),
        Commands::Tags => commands::tags::list_tags(&session),
        Commands::Shell => commands::shell::run_shell(&mut session),
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.chain().find_map(|e| e.downcast_ref::<CoreError>()) {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidTimezone(s) => {
                eprintln!(
                    "{} Invalid timezone {}",
                    "Error:".style(error_style),
                    s.yellow()
                );
            }
        }
    } else if let Some(query_error) = err.downcast_ref::<QueryParseError>() {
        eprintln!("{} {}", "Error:".style(error_style), query_error);
        eprintln!(
            "Queries look like {} or {}",
            "status:todo and not priority:low".cyan(),
            "(tag:Urgent or overdue)".cyan()
        );
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
