//! taskmate - interactive task list client
//!
//! Session-scoped task CRUD over the in-memory store, with AI motivation
//! tips behind the rate-limited gate.

#![allow(missing_docs)]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tracing::Level;

use taskmate_rs::core::tasks::task_counts;
use taskmate_rs::{
    Config, MemorySessionStore, MemoryTaskStore, MotivationOutcome, MotivationService, Result,
    StaticIdentity, Task, TaskService,
};

/// Interactive task list client with AI motivation tips
#[derive(Parser)]
#[command(name = "taskmate", version)]
struct Cli {
    /// Configuration file (YAML); environment variables are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// User to sign in as
    #[arg(long, default_value = "local-user")]
    user: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize logging system
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };

    let store = Arc::new(MemoryTaskStore::new());
    let identity = Arc::new(StaticIdentity::signed_in(cli.user.clone()));
    let session = Arc::new(MemorySessionStore::new());

    let tasks = TaskService::new(store, identity);
    let motivation = MotivationService::new(&config, session)?;

    println!("taskmate {} - signed in as {}", taskmate_rs::VERSION, cli.user);
    println!("Type 'help' for commands.");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    prompt();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            prompt();
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => break,
            "help" => help(),
            _ => {
                if let Err(e) = dispatch(command, rest, &tasks, &motivation).await {
                    println!("Error: {}", e);
                }
            }
        }
        prompt();
    }

    Ok(())
}

async fn dispatch(
    command: &str,
    rest: &str,
    tasks: &TaskService,
    motivation: &MotivationService,
) -> Result<()> {
    match command {
        "add" => {
            tasks.add_task(rest).await?;
            render(&tasks.tasks().await?);
        }
        "ls" => render(&tasks.tasks().await?),
        "done" => {
            let task = resolve(tasks, rest).await?;
            tasks.toggle_complete(&task.id).await?;
            render(&tasks.tasks().await?);
        }
        "rm" => {
            let task = resolve(tasks, rest).await?;
            tasks.delete_task(&task.id).await?;
            render(&tasks.tasks().await?);
        }
        "rename" => {
            let (index, title) = rest.split_once(' ').unwrap_or((rest, ""));
            let task = resolve(tasks, index).await?;
            tasks.rename_task(&task.id, title).await?;
            render(&tasks.tasks().await?);
        }
        "ai" => {
            let task = resolve(tasks, rest).await?;
            println!("Fetching insight for \"{}\"...", task.title);
            match motivation.request_for_task(&task.title).await {
                MotivationOutcome::Success { message } => println!("{}", message),
                MotivationOutcome::Failure { detail, .. } => println!("{}", detail),
            }
        }
        other => println!("Unknown command '{}'. Type 'help' for commands.", other),
    }
    Ok(())
}

/// Resolve a 1-based list index to a task
async fn resolve(tasks: &TaskService, arg: &str) -> Result<Task> {
    let index: usize = arg
        .parse()
        .map_err(|_| taskmate_rs::AppError::Validation(format!("Not a task number: '{}'", arg)))?;

    let current = tasks.tasks().await?;
    current
        .get(index.wrapping_sub(1))
        .cloned()
        .ok_or_else(|| taskmate_rs::AppError::NotFound(format!("Task #{}", index)))
}

fn render(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks yet. Try 'add <title>'.");
        return;
    }

    for (i, task) in tasks.iter().enumerate() {
        let mark = if task.completed { "x" } else { " " };
        println!("{:>3}. [{}] {}", i + 1, mark, task.title);
    }

    let counts = task_counts(tasks);
    println!(
        "{} total, {} done, {} open",
        counts.total, counts.completed, counts.incomplete
    );
}

fn help() {
    println!("Commands:");
    println!("  add <title>        add a task");
    println!("  ls                 list tasks, newest first");
    println!("  done <n>           toggle completion");
    println!("  rename <n> <title> rename a task");
    println!("  rm <n>             delete a task");
    println!("  ai <n>             get a motivational tip for a task");
    println!("  quit               leave");
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
