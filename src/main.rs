use clap::{Parser, Subcommand};
use eyre::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use todostore::{Backend, Config, Filter, Frame, Outcome, Presenter, TerminalPresenter};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "TodoStore CLI - Persistent task list")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/todostore/config.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the task data (overrides config)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Storage backend: file, sqlite or memory (overrides config)
    #[arg(short, long)]
    backend: Option<Backend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tasks
    List {
        /// all, active or completed
        #[arg(short, long, default_value = "all")]
        filter: Filter,
    },

    /// Add a task
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Mark a task completed or pending
    Toggle { id: i64 },

    /// Replace the text of a task (empty text deletes it)
    Edit {
        id: i64,
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },

    /// Delete a task
    Delete { id: i64 },

    /// Delete all completed tasks
    ClearCompleted,

    /// Delete every task
    ClearAll {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show task counts
    Stats,
}

/// Ask on stdin; anything but y/yes declines
fn prompt_stdin(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    // Open store
    let mut store = config.open_store()?;
    let mut presenter = TerminalPresenter::stdout();

    let outcome = match cli.command {
        Commands::List { filter } => {
            store.set_filter(filter);
            Outcome::none()
        }
        Commands::Add { text } => store.add(&text.join(" "))?,
        Commands::Toggle { id } => store.toggle(id)?,
        Commands::Edit { id, text } => {
            store.begin_edit(id);
            store.commit_edit(id, &text.join(" "))?
        }
        Commands::Delete { id } => store.delete(id)?,
        Commands::ClearCompleted => store.clear_completed()?,
        Commands::ClearAll { yes } => {
            if yes {
                store.clear_all(&mut true)?
            } else {
                store.clear_all(&mut prompt_stdin)?
            }
        }
        Commands::Stats => {
            println!("{}", store.stats());
            return Ok(());
        }
    };

    presenter.present(&Frame::capture(&store, outcome))?;
    Ok(())
}
