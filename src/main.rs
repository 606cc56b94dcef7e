pub mod app;
pub mod config;
pub mod logging;

use anyhow::{bail, Context, Result};
use app::{
    Balloon, BalloonState, DeleteOutcome, HttpRecordedApi, RecordedId, RecordedMenu,
    SnackbarQueue, DELETE_ID, MENU_ID,
};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;

type Menu = RecordedMenu<BalloonState, HttpRecordedApi, SnackbarQueue>;

/// Inspect recorded programs and delete their files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Read configuration from this file instead of the user config directory
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Server profile to talk to (defaults to the first one configured)
    #[arg(long, value_name = "SERVER")]
    server: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a recorded program and the files that can be deleted
    Show {
        id: u64,
    },
    /// Delete a recorded program, or only some of its files
    Delete {
        id: u64,

        /// Keep the file with this name (TS for the original stream); repeatable
        #[arg(long, value_name = "NAME")]
        keep: Vec<String>,

        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init_tracing(if args.verbose { Level::DEBUG } else { Level::WARN });

    let app_config = config::Config::load(args.config.as_deref());
    let server = app_config.server(args.server.as_deref())?;
    let api = Arc::new(HttpRecordedApi::new(
        server.base_url()?,
        app_config.menu.request_timeout(),
        app_config.menu.refresh_limit,
    )?);
    let balloon = Arc::new(BalloonState::new());
    let snackbar = Arc::new(SnackbarQueue::new());
    let mut menu = RecordedMenu::new(balloon.clone(), api.clone(), snackbar.clone())
        .with_dialog_delay(app_config.menu.delete_dialog_delay());

    match args.command {
        Command::Show { id } => {
            let recorded = api
                .fetch_recorded(RecordedId(id))
                .await
                .with_context(|| format!("Failed to fetch recorded item {}", id))?;
            menu.set(recorded);
            print_menu(&menu);
        }
        Command::Delete { id, keep, yes } => {
            let recorded = api
                .fetch_recorded(RecordedId(id))
                .await
                .with_context(|| format!("Failed to fetch recorded item {}", id))?;
            menu.set(recorded);
            for name in &keep {
                if !menu.uncheck_by_name(name) {
                    bail!("'{}' has no file named '{}'", menu.title(), name);
                }
            }

            balloon.open(MENU_ID);
            menu.open_delete_dialog();
            if !menu.wait_delete_dialog().await || !balloon.is_open(DELETE_ID) {
                bail!("Delete dialog did not open");
            }
            print_menu(&menu);

            if !yes && !confirm()? {
                menu.close_dialog();
                println!("Delete cancelled by user.");
                return Ok(());
            }

            let result = menu.delete().await;
            for message in snackbar.drain() {
                println!("{}", message);
            }
            menu.close_dialog();

            let outcome = result.context("Failed to refresh recorded list after delete")?;
            if outcome == DeleteOutcome::Skipped {
                println!("Nothing to delete.");
            }
            if let Some(page) = api.cached_recorded() {
                println!("{} recorded programs on {}.", page.total, server.name);
            }
        }
    }

    Ok(())
}

fn print_menu(menu: &Menu) {
    println!("{}", menu.title());
    if let Some(rule_id) = menu.rule_id() {
        println!("  rule: {}", rule_id);
    }
    if menu.files().is_empty() {
        println!("  (no files)");
    }
    for file in menu.files() {
        println!("  [{}] {}", if file.checked { "x" } else { " " }, file.name);
    }
}

fn confirm() -> Result<bool> {
    println!("Are you sure you want to proceed? (yes/no)");
    let mut confirmation = String::new();
    io::stdin().read_line(&mut confirmation)?;
    Ok(confirmation.trim().eq_ignore_ascii_case("yes"))
}
