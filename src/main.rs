use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use taskboard::{
    Assignee, BoardError, BootstrapSource, Config, HttpRemote, LocalCache, RemoteSnapshot, Status,
    TaskStore, bootstrap, codec,
};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Shared kanban board with a remote snapshot and a local cache")]
#[command(version)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Remote snapshot URL (overrides config)
    #[arg(long, global = true)]
    remote: Option<String>,

    /// Local cache file (overrides config)
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the board, column by column
    Board,

    /// Add a task to the todo column
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// rene, scott, or both
        #[arg(short, long, default_value = "both")]
        assignee: Assignee,
    },

    /// Edit a task's title, description, or assignee
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        assignee: Option<Assignee>,
    },

    /// Move a task to another column (todo, in-progress, done)
    Move { id: i64, status: Status },

    /// Delete a task
    Rm { id: i64 },

    /// Print the shareable board document (for updating the snapshot)
    Export,

    /// Replace the board from a document file ("-" for stdin)
    Import { file: PathBuf },

    /// Re-fetch the remote snapshot and overwrite the local cache
    Refresh,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let cache = LocalCache::new(cli.cache.clone().unwrap_or_else(|| config.cache_path()));
    let remote_url = cli.remote.clone().or_else(|| config.remote_url.clone());

    // Only `refresh` consults the remote snapshot. Every other command loads
    // from the local cache, so unsynced edits are never clobbered mid-work.
    let http_remote = match (&cli.command, &remote_url) {
        (Commands::Refresh, Some(url)) => Some(HttpRemote::new(url.clone())?),
        (Commands::Refresh, None) => {
            eprintln!("{}", "no remote snapshot configured; loading locally".yellow());
            None
        }
        _ => None,
    };

    let (tasks, source) = bootstrap(
        http_remote.as_ref().map(|r| r as &dyn RemoteSnapshot),
        &cache,
    );
    let mut store = TaskStore::new(tasks);

    match cli.command {
        Commands::Board => {
            render_board(&store);
            println!("{}", format!("loaded from {source}").dimmed());
        }

        Commands::Add {
            title,
            description,
            assignee,
        } => {
            let task = store.create(&title, &description, assignee)?;
            cache.save(store.list())?;
            println!("added {} {}", task.id.to_string().dimmed(), task.title);
            print_sync_reminder();
        }

        Commands::Edit {
            id,
            title,
            description,
            assignee,
        } => {
            let current = store
                .get(id)
                .ok_or_else(|| eyre!("no task with id {id}"))?
                .clone();
            let task = store.update(
                id,
                title.as_deref().unwrap_or(&current.title),
                description.as_deref().unwrap_or(&current.description),
                assignee.unwrap_or(current.assignee),
            )?;
            cache.save(store.list())?;
            println!("updated {} {}", task.id.to_string().dimmed(), task.title);
            print_sync_reminder();
        }

        Commands::Move { id, status } => {
            let task = store.move_status(id, status)?;
            cache.save(store.list())?;
            println!(
                "moved {} {} to {}",
                task.id.to_string().dimmed(),
                task.title,
                status.to_string().bold()
            );
            print_sync_reminder();
        }

        Commands::Rm { id } => {
            match store.delete(id) {
                Ok(()) => {
                    cache.save(store.list())?;
                    println!("deleted {id}");
                    print_sync_reminder();
                }
                // Already gone is fine; nothing to save.
                Err(BoardError::NotFound(_)) => println!("task {id} not found (already deleted?)"),
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Export => {
            println!("{}", codec::export_document(store.list())?);
        }

        Commands::Import { file } => {
            let text = if file.as_os_str() == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                fs::read_to_string(&file)
                    .map_err(|e| eyre!("failed to read {}: {e}", file.display()))?
            };
            let tasks = codec::import_document(&text)?;
            store.replace_all(tasks);
            cache.save(store.list())?;
            println!("imported {} tasks", store.len());
            print_sync_reminder();
        }

        Commands::Refresh => {
            println!(
                "loaded {} tasks from {}",
                store.len(),
                source.to_string().bold()
            );
            if source != BootstrapSource::Remote {
                eprintln!("{}", "remote snapshot not reached; board may be stale".yellow());
            }
        }
    }

    Ok(())
}

fn render_board(store: &TaskStore) {
    for status in Status::ALL {
        let column = store.column(status);
        println!("{}", format!("── {} ({})", status, column.len()).bold());
        if column.is_empty() {
            println!("  {}", "(empty)".dimmed());
        }
        for task in column {
            println!(
                "  {}  {} {}",
                task.id.to_string().dimmed(),
                task.title,
                task.assignee.label().cyan()
            );
            if !task.description.is_empty() {
                println!("      {}", task.description.dimmed());
            }
        }
        println!();
    }
}

fn print_sync_reminder() {
    println!(
        "{}",
        "⚠ local changes - run `taskboard export` and update the shared snapshot".yellow()
    );
}
