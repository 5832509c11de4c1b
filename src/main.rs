//! tasktable CLI - a local task tracker backed by SQLite.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tasktable::export::export_csv;
use tasktable::{Board, Config, Page, Priority, Store, Task, TaskFields, format_created};

mod cli;

use cli::{CategoryCommand, Cli, Command};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tasktable")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("tasktable.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn parse_priority(s: &str) -> Result<Priority> {
    s.parse::<Priority>().map_err(|e| eyre::eyre!(e))
}

fn format_priority(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "high".red(),
        Priority::Medium => "medium".yellow(),
        Priority::Low => "low".green(),
    }
}

fn format_done(done: bool) -> ColoredString {
    if done { "✔".green() } else { "⏳".normal() }
}

fn print_row(task: &Task) {
    let line = format!(
        "{:>4} {} {:<6} {} {}{}{}",
        task.id,
        if task.done { "[x]" } else { "[ ]" },
        task.priority,
        format_created(task.created),
        task.title,
        task.category
            .as_ref()
            .map(|c| format!(" [{}]", c))
            .unwrap_or_default(),
        task.time.as_ref().map(|t| format!(" ({})", t)).unwrap_or_default(),
    );

    if task.done {
        println!("{}", line.dimmed());
    } else {
        let colored = match task.priority {
            Priority::High => line.red(),
            Priority::Medium => line.yellow(),
            Priority::Low => line.green(),
        };
        println!("{}", colored);
    }
}

fn print_page(page: &Page) {
    if page.tasks.is_empty() {
        println!("{}", "No tasks found".dimmed());
    } else {
        for task in &page.tasks {
            print_row(task);
        }
    }
    println!();
    println!(
        "{} {} / {}    Page {} of {}",
        "✔".green(),
        page.done,
        page.total,
        page.page,
        page.total_pages()
    );
}

fn print_task(task: &Task) {
    println!("{}: {}", "ID".bold(), task.id.to_string().cyan());
    println!("{}: {}", "Title".bold(), task.title);
    if let Some(desc) = &task.description {
        println!("{}: {}", "Description".bold(), desc);
    }
    if let Some(time) = &task.time {
        println!("{}: {}", "Time".bold(), time);
    }
    if let Some(category) = &task.category {
        println!("{}: {}", "Category".bold(), category);
    }
    println!("{}: {}", "Priority".bold(), format_priority(task.priority));
    println!("{}: {}", "Created".bold(), format_created(task.created));
    println!(
        "{}: {} {}",
        "Status".bold(),
        format_done(task.done),
        if task.done { "done" } else { "pending" }
    );
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn warn_unknown_category(store: &Store, category: Option<&str>) -> Result<()> {
    if let Some(name) = category
        && !store.list_categories()?.iter().any(|c| c == name)
    {
        println!(
            "{} '{}' is not a known category (add it with 'tt category add')",
            "note:".yellow(),
            name
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    let db_path = cli.db.clone().unwrap_or_else(|| config.database.clone());

    match cli.command {
        Command::Init => {
            let store = Store::open(&db_path).context("Failed to open database")?;
            store.create_schema().context("Failed to create schema")?;
            println!("{} Initialized task database at {}", "✓".green(), db_path.display());
        }

        Command::Add {
            title,
            description,
            time,
            category,
            priority,
        } => {
            let priority = parse_priority(&priority)?;
            let store = Store::open(&db_path).context("Failed to open database")?;
            warn_unknown_category(&store, category.as_deref())?;

            let fields = TaskFields {
                title,
                description,
                time,
                category,
                priority,
            };

            let mut board = Board::new(store, config.page_size)?;
            let id = board.submit(&fields).context("Failed to add task")?;

            println!("{} Added: {} {}", "✓".green(), id.to_string().cyan(), fields.title);
        }

        Command::Edit {
            id,
            title,
            description,
            time,
            category,
            priority,
        } => {
            let priority = priority.as_deref().map(parse_priority).transpose()?;
            let store = Store::open(&db_path).context("Failed to open database")?;
            warn_unknown_category(&store, category.as_deref())?;

            let mut board = Board::new(store, config.page_size)?;
            let Some(current) = board.start_edit(id).context("Failed to load task")? else {
                eyre::bail!("task not found: {}", id);
            };

            let fields = TaskFields {
                title: title.unwrap_or(current.title),
                description: description.or(current.description),
                time: time.or(current.time),
                category: category.or(current.category),
                priority: priority.unwrap_or(current.priority),
            };

            board.submit(&fields).context("Failed to save task")?;
            println!("{} Updated: {} {}", "✓".green(), id.to_string().cyan(), fields.title);
        }

        Command::List {
            search,
            page,
            page_size,
            json,
        } => {
            let store = Store::open(&db_path).context("Failed to open database")?;
            let mut board = Board::new(store, page_size.unwrap_or(config.page_size))?;

            board.search(search).context("Failed to search tasks")?;
            let result = board.go_to_page(page).context("Failed to load page")?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).context("Failed to serialize page")?
                );
            } else {
                print_page(&result);
            }
        }

        Command::Show { id, json } => {
            let store = Store::open(&db_path).context("Failed to open database")?;
            let task = store.get_task(id).context("Failed to get task")?;

            match task {
                Some(task) if json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&task).context("Failed to serialize task")?
                    );
                }
                Some(task) => print_task(&task),
                None => {
                    eprintln!("{} Task not found: {}", "✗".red(), id);
                    std::process::exit(1);
                }
            }
        }

        Command::Toggle { ids } => {
            let store = Store::open(&db_path).context("Failed to open database")?;
            let mut board = Board::new(store, config.page_size)?;

            for id in ids {
                board.toggle(id).context("Failed to toggle task")?;
                match board.store().get_task(id)? {
                    Some(task) => println!(
                        "{} {} {}",
                        format_done(task.done),
                        id.to_string().cyan(),
                        task.title
                    ),
                    None => println!("{} {} (no such task)", "-".dimmed(), id),
                }
            }
        }

        Command::Delete { ids, yes } => {
            let store = Store::open(&db_path).context("Failed to open database")?;

            if !yes && !confirm(&format!("Delete {} task(s)?", ids.len()))? {
                println!("{}", "Cancelled".dimmed());
                return Ok(());
            }

            let mut board = Board::new(store, config.page_size)?;
            board.delete(&ids).context("Failed to delete tasks")?;
            println!("{} Deleted {} task(s)", "✓".green(), ids.len());
        }

        Command::Export { path } => {
            let store = Store::open(&db_path).context("Failed to open database")?;
            let path = path.unwrap_or_else(|| config.export_path.clone());

            let count = export_csv(&store, &path).context("Export failed")?;
            println!("{} Exported {} task(s) to {}", "✓".green(), count, path.display());
        }

        Command::Category { command } => {
            let mut store = Store::open(&db_path).context("Failed to open database")?;

            match command {
                CategoryCommand::Add { name } => {
                    store.add_category(&name)?;
                    println!("{} Added category: {}", "✓".green(), name.cyan());
                }
                CategoryCommand::List => {
                    let names = store.list_categories().context("Failed to list categories")?;
                    if names.is_empty() {
                        println!("{}", "No categories".dimmed());
                    } else {
                        for name in names {
                            println!("{}", name);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
