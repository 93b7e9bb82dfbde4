mod routes;
mod view;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tasklist_core::{FileTaskStore, TaskId, TaskService};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LISTEN: &str = "127.0.0.1:5000";

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "A single-user to-do list served over HTTP", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Serve the web UI (default when no command is given)
    Serve {
        /// Address to bind
        #[arg(long, default_value = DEFAULT_LISTEN)]
        listen: SocketAddr,
    },
    /// List all tasks
    List,
    /// Add a new task (usage: add Buy milk)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Delete every task with the given ID
    Delete { id: TaskId },
    /// Flip a task between done and not done
    Toggle { id: TaskId },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stderr keeps `list` output clean for piping.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let service = TaskService::new(FileTaskStore::new(None));

    match cli.command {
        Some(Commands::Serve { listen }) => serve(service, listen).await?,
        None => {
            let listen = DEFAULT_LISTEN.parse()?;
            serve(service, listen).await?;
        }
        Some(Commands::List) => {
            let tasks = service.list().context("failed to load tasks")?;
            if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                println!("{:<6} {:<6} {}", "ID", "Done", "Text");
                println!("{:-<6} {:-<6} {:-<20}", "", "", "");
                for task in &tasks {
                    let done = if task.completed { "x" } else { "" };
                    println!("{:<6} {:<6} {}", task.id, done, task.text);
                }
            }
        }
        Some(Commands::Add { text }) => {
            let text = text.join(" ");
            match service.add(Some(&text)).context("failed to add task")? {
                Some(id) => println!("Task added: {} (ID: {})", text, id),
                None => println!("Error: Task text is required."),
            }
        }
        Some(Commands::Delete { id }) => {
            let removed = service.delete(id).context("failed to delete task")?;
            if removed == 0 {
                println!("No task with ID {}.", id);
            } else {
                println!("Deleted task {}.", id);
            }
        }
        Some(Commands::Toggle { id }) => match service.toggle(id).context("failed to toggle task")? {
            Some(true) => println!("Task {} marked done.", id),
            Some(false) => println!("Task {} marked not done.", id),
            None => println!("No task with ID {}.", id),
        },
    }
    Ok(())
}

async fn serve(service: TaskService<FileTaskStore>, listen: SocketAddr) -> Result<()> {
    let path = service.store().path().display().to_string();
    let app = routes::create_router(service);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("failed to bind {}", listen))?;
    info!(%listen, tasks_file = %path, "tasklist listening on http://{}", listen);

    axum::serve(listener, app)
        .await
        .context("server terminated with error")
}
