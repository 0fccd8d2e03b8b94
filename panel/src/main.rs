//! DevHQ CLI
//!
//! Terminal host for the workspace TODO tree and the notes list.

mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use devhq_notes::Note;
use devhq_panel::{Panel, Settings, TomlSettings, TreeDataProvider};
use tracing_subscriber::EnvFilter;

use crate::terminal::{TerminalOpener, TerminalPrompter};

#[derive(Parser)]
#[command(name = "devhq")]
#[command(about = "DevHQ - workspace TODOs and personal notes")]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/devhq/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Workspace root to scan, repeatable (default: current directory)
    #[arg(long = "root", global = true, value_name = "DIR")]
    roots: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List TODO and FIXME markers grouped by file
    Todos {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage notes
    #[command(subcommand)]
    Notes(NotesCommands),
}

#[derive(Subcommand)]
enum NotesCommands {
    /// List notes
    List,

    /// Create a note and print its path
    New {
        /// Note title (prompted when omitted)
        title: Option<String>,
    },

    /// Rename a note
    Rename {
        /// Current note name
        name: String,

        /// New title (prompted when omitted)
        new_title: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note name
        name: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the notes directory
    Dir,

    /// Reveal the notes directory
    OpenFolder,
}

fn settings_path(config: Option<PathBuf>) -> PathBuf {
    config.unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("devhq")
            .join("config.toml")
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let Cli {
        config,
        mut roots,
        command,
    } = Cli::parse();

    let settings: Arc<dyn Settings> = Arc::new(TomlSettings::new(settings_path(config)));
    if roots.is_empty() {
        roots.push(std::env::current_dir().context("Cannot determine current directory")?);
    }

    let mut prompter = TerminalPrompter::new();
    match &command {
        Commands::Notes(NotesCommands::New { title: Some(title) })
        | Commands::Notes(NotesCommands::Rename {
            new_title: Some(title),
            ..
        }) => prompter = prompter.with_answer(title.clone()),
        Commands::Notes(NotesCommands::Delete { yes, .. }) => prompter = prompter.assume_yes(*yes),
        _ => {}
    }

    let prompter = Arc::new(prompter);
    let panel = Panel::builder(Arc::new(TerminalOpener), prompter.clone())
        .with_roots(roots)
        .with_settings(settings)
        .build()
        .await;

    match command {
        Commands::Todos { json } => cmd_todos(&panel, json).await?,
        Commands::Notes(command) => cmd_notes(&panel, command).await?,
    }

    // Note commands report failures as notices rather than errors.
    exit_status(&prompter)
}

fn exit_status(prompter: &TerminalPrompter) -> Result<()> {
    match prompter.failure() {
        Some(message) => anyhow::bail!(message),
        None => Ok(()),
    }
}

async fn cmd_todos(panel: &Panel, json: bool) -> Result<()> {
    let files = panel.todos().files().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(files.as_ref())?);
        return Ok(());
    }

    if files.is_empty() {
        println!("No TODO or FIXME markers found.");
        return Ok(());
    }

    for file in files.iter() {
        let count = file.len();
        println!(
            "{} ({count} item{})",
            file.relative_path.display(),
            if count == 1 { "" } else { "s" }
        );
        for marker in &file.markers {
            println!("  {:>5}  {:<5}  {}", marker.line + 1, marker.kind, marker.text);
        }
    }
    Ok(())
}

async fn find_note(panel: &Panel, name: &str) -> Result<Note> {
    let notes = panel.notes().children(None).await?;
    notes
        .into_iter()
        .find(|note| note.name == name)
        .with_context(|| format!("No note named {name:?}"))
}

async fn cmd_notes(panel: &Panel, command: NotesCommands) -> Result<()> {
    let notes = panel.notes();

    match command {
        NotesCommands::List => {
            for note in notes.children(None).await? {
                println!("{}", note.name);
            }
        }
        NotesCommands::New { .. } => {
            notes.create_note().await;
        }
        NotesCommands::Rename { name, .. } => {
            let note = find_note(panel, &name).await?;
            notes.rename_note(&note).await;
        }
        NotesCommands::Delete { name, .. } => {
            let note = find_note(panel, &name).await?;
            if notes.delete_note(&note).await {
                println!("Deleted {}", note.name);
            }
        }
        NotesCommands::Dir => {
            println!("{}", panel.notes_store().directory().display());
        }
        NotesCommands::OpenFolder => {
            notes.open_notes_folder().await;
        }
    }
    Ok(())
}
