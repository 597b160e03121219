use std::io::{BufRead, Write};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::task::{Task, TaskPatch};
use crate::model::theme::{ThemePreference, detect_system_theme};
use crate::ops::search;
use crate::store::{FileKv, TaskStore, ThemeStore, resolve_data_dir};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let kv = FileKv::open(&data_dir)?;

    match cli.command {
        None => {
            // No subcommand launches the TUI; handled in main.rs
            unreachable!("dispatch called without a subcommand")
        }
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(args, &TaskStore::new(kv), json),
            Commands::Add(args) => cmd_add(args, &TaskStore::new(kv), json),
            Commands::Edit(args) => cmd_edit(args, &TaskStore::new(kv), json),
            Commands::Toggle(args) => cmd_toggle(args, &TaskStore::new(kv), json),
            Commands::Rm(args) => cmd_rm(args, &TaskStore::new(kv)),
            Commands::Search(args) => cmd_search(args, &TaskStore::new(kv), json),
            Commands::Theme(args) => cmd_theme(args, &ThemeStore::new(kv), json),
        },
    }
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

fn cmd_list(
    args: ListArgs,
    store: &TaskStore<FileKv>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = store.load_all()?;
    let selected: Vec<&Task> = tasks
        .iter()
        .filter(|t| {
            if args.completed {
                t.completed
            } else if args.pending {
                !t.completed
            } else {
                true
            }
        })
        .collect();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&task_list_json(&selected, &tasks))?
        );
    } else if selected.is_empty() {
        println!("no tasks");
    } else {
        for task in &selected {
            for line in format_task_lines(task) {
                println!("{}", line);
            }
        }
        println!();
        println!("{}", format_summary(&tasks));
    }
    Ok(())
}

fn cmd_add(
    args: AddArgs,
    store: &TaskStore<FileKv>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let title = args.title.trim();
    if title.is_empty() {
        return Err("title must not be empty".into());
    }
    let description = args
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    let task = store.add(title, description)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        println!("added {}  {}", task.id, task.title);
    }
    Ok(())
}

fn cmd_edit(
    args: EditArgs,
    store: &TaskStore<FileKv>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let title = match args.title.as_deref().map(str::trim) {
        Some("") => return Err("title must not be empty".into()),
        other => other.map(str::to_string),
    };
    let description = if args.clear_desc {
        Some(None)
    } else {
        args.description
            .as_deref()
            .map(str::trim)
            .map(|d| (!d.is_empty()).then(|| d.to_string()))
    };

    let patch = TaskPatch {
        title,
        description,
        completed: None,
    };
    if patch.is_empty() {
        return Err("nothing to change: pass --title, --desc, or --clear-desc".into());
    }

    let task = store.update(&args.id, &patch)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        println!("updated {}  {}", task.id, task.title);
    }
    Ok(())
}

fn cmd_toggle(
    args: ToggleArgs,
    store: &TaskStore<FileKv>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let task = store.toggle(&args.id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        let state = if task.completed { "done" } else { "pending" };
        println!("{}  {} ({})", task.id, task.title, state);
    }
    Ok(())
}

fn cmd_rm(args: RmArgs, store: &TaskStore<FileKv>) -> Result<(), Box<dyn std::error::Error>> {
    if !args.yes {
        let tasks = store.load_all()?;
        let title = tasks
            .iter()
            .find(|t| t.id == args.id)
            .map(|t| t.title.clone())
            .ok_or_else(|| format!("task not found: {}", args.id))?;

        print!("delete \"{}\"? [y/N] ", title);
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y") {
            println!("cancelled");
            return Ok(());
        }
    }

    store.delete(&args.id)?;
    println!("deleted {}", args.id);
    Ok(())
}

fn cmd_search(
    args: SearchArgs,
    store: &TaskStore<FileKv>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = store.load_all()?;
    let re = search::build_query(&args.query);
    let hits: Vec<&Task> = search::filter_indices(&tasks, re.as_ref())
        .into_iter()
        .map(|i| &tasks[i])
        .collect();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&task_list_json(&hits, &tasks))?
        );
    } else if hits.is_empty() {
        println!("no tasks match \"{}\"", args.query.trim());
    } else {
        for task in &hits {
            for line in format_task_lines(task) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Theme command
// ---------------------------------------------------------------------------

fn cmd_theme(
    args: ThemeArgs,
    store: &ThemeStore<FileKv>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let system = detect_system_theme();

    let pref = match args.action.as_deref() {
        None => store.load()?,
        Some("toggle") => store.toggle(system)?,
        Some(token) => {
            let pref = ThemePreference::from_token(token)
                .ok_or_else(|| format!("unknown theme \"{}\" (light, dark, system)", token))?;
            store.save(pref)?;
            pref
        }
    };

    let resolved = pref.resolve(system);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&theme_json(pref, resolved))?
        );
    } else {
        println!("{} (resolved: {})", pref, resolved);
    }
    Ok(())
}
