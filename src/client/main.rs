/**
 * Bookworm Command-Line Entry Point
 *
 * Drives the client library from a terminal: sign in and out, browse the
 * catalog, manage the personal library and ask the route guards where a
 * given path would lead.
 */

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use bookworm::client::catalog::{filter_books, paginate, BrowseFilter};
use bookworm::client::{
    allowed_routes, AutoConfirm, ApiClient, CatalogClient, ClientError, ClientResult, Config,
    ConfirmPrompt, Confirmer, CredentialStore, FileCredentialStore, GuardDecision, LibraryModel,
    MemoryCredentialStore, Navigator, Route, RouteGuard, SessionState, SessionStore,
};
use bookworm::shared::{LibraryEntry, Shelf};

#[derive(Debug, Parser)]
#[command(name = "bookworm", about = "Track what you read", version)]
struct Cli {
    /// TOML configuration file; environment variables still override it
    #[arg(long, value_name = "path", global = true)]
    config: Option<PathBuf>,
    /// Answer yes to every confirmation
    #[arg(long, short = 'y', global = true)]
    yes: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account (does not sign in)
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Profile photo URL
        #[arg(long)]
        photo: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Browse the catalog
    Books {
        /// Matches title or author
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Manage your library
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },
    /// Show where the guards send you for a path
    Route { path: String },
}

#[derive(Debug, Subcommand)]
enum LibraryAction {
    List,
    /// Put a book on a shelf (defaults to want)
    Add {
        book_id: String,
        #[arg(long, default_value = "want")]
        shelf: Shelf,
    },
    Shelf { book_id: String, shelf: Shelf },
    Progress { book_id: String, value: u8 },
    Remove { book_id: String },
}

/// Prints redirects instead of switching screens
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        println!("-> {}", route);
    }
}

/// Asks on stdin, `y` or `yes` confirms
struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        print!(
            "{} {} [{} / {}] (y/N) ",
            prompt.title, prompt.text, prompt.confirm_text, prompt.cancel_text
        );
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, bookworm::shared::ConfigError> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::from_env(),
    }
}

fn credential_store(config: &Config) -> Arc<dyn CredentialStore> {
    match config.credential_path() {
        Some(path) => {
            debug!(path = %path.display(), "using credential file");
            Arc::new(FileCredentialStore::new(path))
        }
        None => {
            warn!("no configuration directory, the session will not be remembered");
            Arc::new(MemoryCredentialStore::new())
        }
    }
}

fn print_entry(entry: &LibraryEntry) {
    let title = entry.book.title().unwrap_or_else(|| entry.book_id());
    println!(
        "  {:<40} {:<18} {:>3}%",
        title,
        entry.shelf.label(),
        entry.progress
    );
}

fn print_library(entries: &[LibraryEntry]) {
    if entries.is_empty() {
        println!("Your library is empty.");
        return;
    }
    for shelf in Shelf::ALL {
        let on_shelf: Vec<&LibraryEntry> = entries.iter().filter(|e| e.shelf == shelf).collect();
        if on_shelf.is_empty() {
            continue;
        }
        println!("{} ({})", shelf.label(), on_shelf.len());
        for entry in on_shelf {
            print_entry(entry);
        }
    }
}

async fn run(cli: Cli, config: Config) -> ClientResult<()> {
    let confirmer: Box<dyn Confirmer> = if cli.yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(TerminalConfirmer)
    };
    let api = ApiClient::new(config.clone());
    let navigator = Arc::new(TerminalNavigator);
    let session = SessionStore::new(api.clone(), credential_store(&config), navigator.clone());

    match cli.command {
        Command::Login { email, password } => {
            bookworm::client::validators::validate_login(&email, &password)?;
            if !session.login(&email, &password).await {
                println!("Invalid email or password");
                return Ok(());
            }
            if let Some(user) = session.snapshot().user() {
                println!("Welcome back, {}!", user.name);
            }
        }
        Command::Register {
            name,
            email,
            password,
            photo,
        } => {
            session.register(&name, &email, &password, &photo).await?;
            println!("Account created. Please log in.");
            navigator.navigate(Route::Login);
        }
        Command::Logout => session.logout(),
        Command::Whoami => match session.restore().await {
            SessionState::Authenticated { user, .. } => {
                println!("[{}] {} <{}> ({})", user.initial(), user.name, user.email, user.role);
                let links: Vec<&str> = allowed_routes(user.role).iter().map(|l| l.label).collect();
                println!("Menu: {}", links.join(", "));
            }
            _ => println!("Not signed in"),
        },
        Command::Books { query, genre, page } => {
            let catalog = CatalogClient::new(api, session.view());
            let books = catalog.books().await?;
            let filtered: Vec<_> = filter_books(&books, &BrowseFilter::new(query, genre))
                .into_iter()
                .cloned()
                .collect();
            let page = paginate(&filtered, page, config.page_size());
            for book in &page.items {
                println!("  {:<24} {:<40} {} [{}]", book.id, book.title, book.author, book.genre);
            }
            println!(
                "Page {} of {} ({} books)",
                page.page, page.total_pages, page.total_items
            );
        }
        Command::Library { action } => {
            session.restore().await;
            let mut library = LibraryModel::new(api, session.view());
            match action {
                LibraryAction::List => {
                    let entries = library.fetch_mine().await?;
                    print_library(entries);
                }
                LibraryAction::Add { book_id, shelf } => {
                    library.set_shelf(&book_id, shelf).await?;
                    println!("Added to {}", shelf.label());
                }
                LibraryAction::Shelf { book_id, shelf } => {
                    let entries = library.set_shelf(&book_id, shelf).await?;
                    print_library(entries);
                }
                LibraryAction::Progress { book_id, value } => {
                    let entries = library.set_progress(&book_id, value).await?;
                    print_library(entries);
                }
                LibraryAction::Remove { book_id } => {
                    library.fetch_mine().await?;
                    if library.remove(&book_id, confirmer.as_ref()).await? {
                        println!("Removed");
                    }
                }
            }
        }
        Command::Route { path } => {
            let Some(route) = Route::from_path(&path) else {
                println!("{} is not a known screen", path);
                return Ok(());
            };
            let settled = session.restore().await;
            let guard = RouteGuard::for_route(&route, config.role_mismatch());
            match guard.decide(&settled) {
                GuardDecision::Render => println!("{} renders", route),
                GuardDecision::Redirect(to) => println!("{} redirects to {}", route, to),
                GuardDecision::Loading => println!("{} is still loading", route),
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(ClientError::Cancelled) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
