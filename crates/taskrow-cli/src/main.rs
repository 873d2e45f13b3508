use anyhow::{bail, Result};
use clap::{CommandFactory, Parser, Subcommand};
use taskrow_core::store::TaskStore;

/// Storage lives next to wherever the command is run, as a plain CSV file.
const TASK_FILE: &str = "todos.csv";

#[derive(Parser)]
#[command(name = "taskrow", version, about = "File-backed personal task list")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Add a task; remaining words become the description
    Add {
        #[arg(required = true)]
        description: Vec<String>,
    },
    /// Print every task with its id
    List,
    /// Remove the task with the given id
    Delete { id: u64 },
    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Command::Add { description }) => {
            let description = description.join(" ");
            if description.trim().is_empty() {
                bail!("task description must not be empty");
            }
            let task = TaskStore::new(TASK_FILE).add(&description)?;
            println!("Added task {}: {}", task.id, task.description);
        }
        Some(Command::List) => {
            let outcome = TaskStore::new(TASK_FILE).list()?;
            println!("Your tasks:");
            for task in &outcome.tasks {
                println!("{}: {}", task.id, task.description);
            }
        }
        Some(Command::Delete { id }) => {
            TaskStore::new(TASK_FILE).delete(id)?;
            println!("Deleted task {id}.");
        }
        Some(Command::Version) => {
            println!("taskrow {}", taskrow_core::version());
        }
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }
    Ok(())
}
