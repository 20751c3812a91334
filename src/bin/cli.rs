//! Cheque register table CLI
//!
//! Loads the configured fragments and prints the table to the terminal.

use std::io::Stdout;
use std::path::PathBuf;
use std::time::Instant;

use cheque_table::{
    app::{TableApp, UiEvent},
    error::{AppError, Result},
    models::{Config, Field, FilterState},
    storage::{LocalStorage, SnapshotStore},
    surface::TextSurface,
    utils::input::ClearOnDelete,
};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

/// cheque-table - searchable register of cheques
#[derive(Parser, Debug)]
#[command(
    name = "cheque-table",
    version,
    about = "Search, filter, sort and page merged cheque registers"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "storage/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the records and print one page
    Show {
        /// Free-text search over every column
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category filter ("all" for none)
        #[arg(long, default_value = "all")]
        category: String,

        /// Status filter ("all" for none)
        #[arg(long, default_value = "all")]
        status: String,

        /// Column to sort by
        #[arg(long)]
        sort: Option<Field>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Page to print
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Rows per page (default from config)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Interactive session reading commands from stdin
    Browse,

    /// Validate the configuration file
    Validate,

    /// Show snapshot info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

const BROWSE_HELP: &str = "\
commands:
  search <text>     submit a search
  type <text>       live input (large deletions clear the search)
  category <name>   filter by category (all to reset)
  status <name>     filter by status (all to reset)
  sort <column>     sort by column, again to reverse
  page <n>          go to page n
  size <n>          rows per page
  options           list categories and statuses
  clear             reset all filters
  reload            load the records again
  quit";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Show {
            search,
            category,
            status,
            sort,
            desc,
            page,
            page_size,
        } => {
            let mut surface = TextSurface::new(std::io::stdout());
            let mut app = open_table(config, &mut surface)?;
            if let Err(e) = app.reload().await {
                app.render_to(&mut surface)?;
                return Err(e);
            }

            if let Some(size) = page_size {
                app.dispatch(UiEvent::ChangePageSize(size)).await?;
            }
            app.apply_filters(FilterState::new(&search, &category, &status));
            if let Some(column) = sort {
                app.dispatch(UiEvent::ClickColumnHeader(column)).await?;
                if desc {
                    app.dispatch(UiEvent::ClickColumnHeader(column)).await?;
                }
            }
            app.dispatch(UiEvent::ClickPage(page)).await?;
            app.render_to(&mut surface)?;
        }

        Command::Browse => browse(config).await?,

        Command::Validate => {
            log::info!("Validating configuration...");

            let config = Config::load(&cli.config)
                .map_err(|e| AppError::config(format!("{}: {e}", cli.config.display())))?;
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            println!("✓ Config OK ({} status rules)", config.status_rules.len());
        }

        Command::Info => {
            println!("Source: {}", config.source.location);
            println!("Manifest: {}", config.source.manifest);
            if !config.snapshot.enabled {
                println!("Snapshot: disabled");
                return Ok(());
            }

            let store = LocalStorage::new(&config.snapshot.path);
            match store.load_snapshot().await? {
                Some(snapshot) => {
                    println!("Snapshot: {}", store.path().display());
                    println!("Saved at: {}", snapshot.saved_at);
                    println!("Fragments: {}", snapshot.fragment_count);
                    println!("Size: {} bytes", snapshot.document.len());
                }
                None => println!("No snapshot found yet."),
            }
        }
    }

    Ok(())
}

/// Set up the table, showing setup failures in the error banner.
fn open_table(config: Config, surface: &mut TextSurface<Stdout>) -> Result<TableApp> {
    TableApp::from_config(config, &*surface).or_else(|e| {
        log::error!("Table setup failed: {}", e);
        surface.show_error(&e.to_string())?;
        Err(e)
    })
}

async fn browse(config: Config) -> Result<()> {
    let mut surface = TextSurface::new(std::io::stdout());
    let mut app = open_table(config, &mut surface)?;
    if let Err(e) = app.reload().await {
        log::warn!("Initial load failed: {}", e);
    }
    app.render_to(&mut surface)?;

    let mut live = ClearOnDelete::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
        let argument = argument.trim();

        let event = match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{BROWSE_HELP}");
                continue;
            }
            "options" => {
                println!("categories: {}", app.state().category_options().join(", "));
                println!("statuses: {}", app.state().status_options().join(", "));
                continue;
            }
            "clear" => {
                app.apply_filters(FilterState::default());
                app.render_to(&mut surface)?;
                continue;
            }
            "type" => {
                live.on_input(argument, Instant::now());
                if live.is_armed() {
                    tokio::time::sleep(live.quiet_period()).await;
                }
                if live.poll(Instant::now()) {
                    UiEvent::SubmitSearch(String::new())
                } else {
                    UiEvent::SubmitSearch(argument.to_string())
                }
            }
            "search" => UiEvent::SubmitSearch(argument.to_string()),
            "category" => UiEvent::ChangeCategory(argument.to_string()),
            "status" => UiEvent::ChangeStatus(argument.to_string()),
            "sort" => match argument.parse::<Field>() {
                Ok(column) => UiEvent::ClickColumnHeader(column),
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            },
            "page" | "size" => match argument.parse::<usize>() {
                Ok(n) if command == "page" => UiEvent::ClickPage(n),
                Ok(n) => UiEvent::ChangePageSize(n),
                Err(_) => {
                    eprintln!("{}", AppError::validation(format!("not a number: {argument}")));
                    continue;
                }
            },
            "reload" => UiEvent::RequestReload,
            other => {
                eprintln!("unknown command: {other} (try help)");
                continue;
            }
        };

        if let Err(e) = app.dispatch(event).await {
            log::warn!("{}", e);
            if matches!(e, AppError::Validation(_)) {
                eprintln!("{e}");
            }
        }
        app.render_to(&mut surface)?;
    }

    Ok(())
}
