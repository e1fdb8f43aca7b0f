//! Tether CLI - stay in touch with the people who matter.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use tether::cli::{Cli, Commands};
use tether::commands::{self, CommandResult};
use tether::models::{PersonInput, PersonPatch};
use tether::storage::Store;
use tether::view::ViewFilter;
use tether::{action_log, Result};

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    let (cmd_name, args_json) = serialize_command(&cli.command);

    let start = Instant::now();
    let result = run_command(cli.command, cli.data_dir, human);
    let duration = start.elapsed().as_millis() as u64;

    let (success, error) = match &result {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };

    // Best effort; never fails the command.
    action_log::log_action(&cmd_name, args_json, success, error, duration);

    if let Err(e) = result {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!(
                "{}",
                serde_json::json!({ "error": e.to_string() })
            );
        }
        process::exit(1);
    }
}

/// Print a command result as JSON or human-readable text.
fn output(result: &dyn CommandResult, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

fn open_store(data_dir: Option<PathBuf>) -> Result<Store> {
    match data_dir {
        Some(dir) => Store::open_at(&dir),
        None => Store::open(),
    }
}

fn run_command(command: Commands, data_dir: Option<PathBuf>, human: bool) -> Result<()> {
    let mut store = open_store(data_dir)?;
    let today = chrono::Local::now().date_naive();

    match command {
        Commands::Add {
            name,
            notes,
            frequency,
            category,
            phone,
            email,
        } => {
            let input = PersonInput {
                name,
                notes,
                contact_frequency_days: frequency,
                category,
                phone,
                email,
            };
            let result = commands::add(&mut store, input, today)?;
            output(&result, human);
        }

        Commands::List {
            filter,
            search,
            category,
        } => {
            let filter = ViewFilter::parse(&filter)?;
            let result = commands::list(
                &store,
                filter,
                search.as_deref(),
                category.as_deref(),
                today,
            )?;
            output(&result, human);
        }

        Commands::Show { id } => {
            let result = commands::show(&store, &id, today)?;
            output(&result, human);
        }

        Commands::Update {
            id,
            name,
            notes,
            frequency,
            category,
            phone,
            email,
        } => {
            let patch = PersonPatch {
                name,
                notes,
                contact_frequency_days: frequency,
                category,
                phone,
                email,
            };
            let result = commands::update(&mut store, &id, &patch, today)?;
            output(&result, human);
        }

        Commands::Delete { id } => {
            let result = commands::delete(&mut store, &id)?;
            output(&result, human);
        }

        Commands::Contacted { id, all, category } => {
            if all {
                let result = commands::contacted_all(&mut store, today)?;
                output(&result, human);
            } else if let Some(category) = category {
                let result = commands::contacted_category(&mut store, &category, today)?;
                output(&result, human);
            } else if let Some(id) = id {
                let result = commands::contacted(&mut store, &id, today)?;
                output(&result, human);
            }
        }

        Commands::Undo => {
            let result = commands::undo(&mut store, today)?;
            output(&result, human);
        }

        Commands::Stats => {
            let result = commands::stats(&store, today)?;
            output(&result, human);
        }

        Commands::Categories => {
            let result = commands::categories(&store)?;
            output(&result, human);
        }

        Commands::Import {
            file,
            dry_run,
            frequency,
        } => {
            let result = commands::import(&mut store, &file, dry_run, frequency, today)?;
            output(&result, human);
        }
    }

    Ok(())
}

/// Describe a command for the action log: name plus redactable args.
fn serialize_command(command: &Commands) -> (String, serde_json::Value) {
    match command {
        Commands::Add {
            name, frequency, category, ..
        } => (
            "add".to_string(),
            serde_json::json!({ "name": name, "frequency": frequency, "category": category }),
        ),
        Commands::List {
            filter,
            search,
            category,
        } => (
            "list".to_string(),
            serde_json::json!({ "filter": filter, "search": search, "category": category }),
        ),
        Commands::Show { id } => ("show".to_string(), serde_json::json!({ "id": id })),
        Commands::Update { id, .. } => ("update".to_string(), serde_json::json!({ "id": id })),
        Commands::Delete { id } => ("delete".to_string(), serde_json::json!({ "id": id })),
        Commands::Contacted { id, all, category } => (
            "contacted".to_string(),
            serde_json::json!({ "id": id, "all": all, "category": category }),
        ),
        Commands::Undo => ("undo".to_string(), serde_json::json!({})),
        Commands::Stats => ("stats".to_string(), serde_json::json!({})),
        Commands::Categories => ("categories".to_string(), serde_json::json!({})),
        Commands::Import { file, dry_run, .. } => (
            "import".to_string(),
            serde_json::json!({ "file": file.display().to_string(), "dry_run": dry_run }),
        ),
    }
}
