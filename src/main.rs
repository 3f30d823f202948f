//! League Guider - Champion browser and AI profile manager
//!
//! Browse champion and item data from a local DataDragon snapshot and manage
//! AI provider profiles, from the dashboard or the command line.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use league_guider::{
    dashboard::Dashboard,
    profile::MemorySecretStore,
    AiProfile, Champion, Config, Item, ItemSource, JsonProfileStore, ListPresenter, ListView,
    LocalDataSource, PageLink, ProfileForm, ProfileStore,
};

#[derive(Parser)]
#[command(name = "league-guider")]
#[command(author = "League Guider Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse champion and item data and manage AI provider profiles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the dashboard GUI
    Dashboard,

    /// Show which data version is installed
    Status,

    /// Install DataDragon champion.json (and item.json) into the data directory
    Import {
        /// Path to champion.json
        champions: PathBuf,
        /// Path to item.json
        #[arg(long)]
        items: Option<PathBuf>,
        /// Version to record (defaults to the version inside champion.json)
        #[arg(long)]
        version: Option<String>,
    },

    /// List champions one page at a time
    Champions {
        /// Only show champions whose name contains this text
        #[arg(short, long, default_value = "")]
        query: String,
        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Champions per page (defaults to the configured size)
        #[arg(long)]
        page_size: Option<NonZeroUsize>,
    },

    /// List items one page at a time
    Items {
        /// Only show items whose name contains this text
        #[arg(short, long, default_value = "")]
        query: String,
        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Items per page (defaults to the configured size)
        #[arg(long)]
        page_size: Option<NonZeroUsize>,
    },

    /// Manage AI provider profiles
    Profiles {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// List saved profiles
    List,

    /// Add a profile
    Add {
        /// Profile name
        name: String,
        /// Chat completions endpoint (defaults to the configured one)
        #[arg(long)]
        endpoint: Option<String>,
        /// Model name (defaults to the configured one)
        #[arg(long)]
        model: Option<String>,
        /// API key for the provider
        #[arg(long)]
        api_key: String,
    },

    /// Remove a profile by name or ID
    Remove {
        /// Profile name or ID
        profile: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(Config::stored_log_filter().as_deref().unwrap_or("info"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Some(Commands::Dashboard) | None => run_dashboard()?,
        Some(Commands::Status) => show_status()?,
        Some(Commands::Import { champions, items, version }) => {
            import_data(&champions, items.as_deref(), version.as_deref())?
        }
        Some(Commands::Champions { query, page, page_size }) => {
            list_champions(&query, page, page_size)?
        }
        Some(Commands::Items { query, page, page_size }) => list_items(&query, page, page_size)?,
        Some(Commands::Profiles { action }) => manage_profiles(action)?,
    }

    Ok(())
}

fn load_config() -> Result<Config> {
    Config::load().inspect_err(|e| error!("Failed to load config: {:#}", e))
}

fn data_source(config: &Config) -> Result<LocalDataSource> {
    Ok(LocalDataSource::new(config.champion_data_dir()?))
}

fn profile_store() -> Result<JsonProfileStore> {
    JsonProfileStore::new(Box::new(MemorySecretStore::new()))
}

/// Run the dashboard GUI
fn run_dashboard() -> Result<()> {
    info!("Starting League Guider dashboard...");

    let config = load_config()?;
    let source = data_source(&config)?;
    let store = profile_store()?;
    let runtime = tokio::runtime::Handle::current();

    Dashboard::run(config, source, store, runtime)
        .map_err(|e| anyhow::anyhow!("Dashboard error: {}", e))?;

    Ok(())
}

/// Show the installed data version
fn show_status() -> Result<()> {
    let config = load_config()?;
    let source = data_source(&config)?;
    let status = source.status()?;

    println!("Data directory: {}", source.root().display());
    match status.current_version {
        Some(version) => println!("Game data:      v{}", version),
        None => println!("Game data:      none (run `league-guider import <champion.json>`)"),
    }

    Ok(())
}

/// Import champion.json and optionally item.json
fn import_data(champions: &Path, items: Option<&Path>, version: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let source = data_source(&config)?;
    let status = source.import(champions, items, version)?;

    println!(
        "Imported {} v{}",
        if items.is_some() { "champion and item data" } else { "champion data" },
        status.current_version.unwrap_or_default()
    );

    Ok(())
}

fn present<'a, T: league_guider::Listable>(
    items: &'a [T],
    query: &str,
    page: usize,
    page_size: NonZeroUsize,
) -> ListView<'a, T> {
    let mut presenter = ListPresenter::new(page_size);
    presenter.set_query(query);
    presenter.go_to_page(page);
    presenter.present(items)
}

fn print_footer<T>(view: &ListView<'_, T>) {
    println!();
    println!("{}  (page {} of {})", view.range_label(), view.current_page, view.total_pages);
    if let Some(pager) = pager_line(view) {
        println!("{}", pager);
    }
}

/// Print one page of champions
fn list_champions(query: &str, page: usize, page_size: Option<NonZeroUsize>) -> Result<()> {
    let config = load_config()?;
    let source = data_source(&config)?;
    let champions = ItemSource::<Champion>::fetch_all(&source)?;
    let view = present(&champions, query, page, page_size.unwrap_or(config.page_size));

    if view.matched == 0 {
        println!("No champions found matching \"{}\"", query);
        return Ok(());
    }

    for champion in &view.items {
        println!("  {:<16} {}", champion.name, champion.title);
        println!("  {:<16} {}", "", champion.tags.join(", "));
    }
    print_footer(&view);

    Ok(())
}

/// Print one page of items
fn list_items(query: &str, page: usize, page_size: Option<NonZeroUsize>) -> Result<()> {
    let config = load_config()?;
    let source = data_source(&config)?;
    let items = ItemSource::<Item>::fetch_all(&source)?;
    let view = present(&items, query, page, page_size.unwrap_or(config.page_size));

    if view.matched == 0 {
        println!("No items found matching \"{}\"", query);
        return Ok(());
    }

    for item in &view.items {
        println!("  {:<28} {:>5}g  {}", item.name, item.gold.total, item.plaintext);
    }
    print_footer(&view);

    Ok(())
}

/// Text pager such as `‹ 1 … 4 [5] 6 … 10 ›`, `None` when there is one page
fn pager_line<T>(view: &ListView<'_, T>) -> Option<String> {
    if !view.shows_pager() {
        return None;
    }

    let mut parts = Vec::with_capacity(view.window.len() + 2);
    parts.push(if view.has_prev { "‹" } else { " " }.to_string());
    for link in &view.window {
        parts.push(match *link {
            PageLink::Page(n) if n == view.current_page => format!("[{}]", n),
            PageLink::Page(n) => n.to_string(),
            PageLink::Ellipsis => "…".to_string(),
        });
    }
    parts.push(if view.has_next { "›" } else { " " }.to_string());

    Some(parts.join(" ").trim().to_string())
}

fn manage_profiles(action: ProfileAction) -> Result<()> {
    let mut store = profile_store()?;

    match action {
        ProfileAction::List => {
            let profiles = store.list()?;
            if profiles.is_empty() {
                println!("No profiles found. Add one with `league-guider profiles add`.");
            }
            for profile in profiles {
                println!("  {} ({})", profile.name, profile.id);
                println!("    Model: {}", profile.model);
                println!("    URL:   {}", profile.endpoint);
            }
        }
        ProfileAction::Add { name, endpoint, model, api_key } => {
            let config = load_config()?;
            let form = ProfileForm {
                name,
                endpoint: endpoint.unwrap_or(config.default_endpoint),
                model: model.unwrap_or(config.default_model),
                api_key,
                ..ProfileForm::default()
            };
            let submission = form.validate()?;
            let id = submission.profile.id;
            store.save(submission.profile, submission.api_key.as_deref())?;
            println!("Added profile {}", id);
            println!("Note: API keys are only held for the running session.");
        }
        ProfileAction::Remove { profile } => {
            let profiles = store.list()?;
            let target: &AiProfile = profiles
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(&profile) || p.id.to_string() == profile)
                .with_context(|| format!("Profile not found: {}", profile))?;
            store.delete(target.id)?;
            println!("Removed profile {}", target.name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_guider::Listable;

    struct Row(String);

    impl Listable for Row {
        fn key(&self) -> &str {
            &self.0
        }

        fn name(&self) -> &str {
            &self.0
        }
    }

    fn rows(count: usize) -> Vec<Row> {
        (0..count).map(|i| Row(format!("Champion {i:03}"))).collect()
    }

    #[test]
    fn test_pager_line_middle() {
        let rows = rows(100);
        let mut presenter = ListPresenter::new(NonZeroUsize::new(10).unwrap());
        presenter.go_to_page(5);
        let view = presenter.present(&rows);
        assert_eq!(pager_line(&view).unwrap(), "‹ 1 … 4 [5] 6 … 10 ›");
    }

    #[test]
    fn test_pager_line_first_page() {
        let rows = rows(100);
        let mut presenter = ListPresenter::new(NonZeroUsize::new(10).unwrap());
        let view = presenter.present(&rows);
        assert_eq!(pager_line(&view).unwrap(), "[1] 2 … 10 ›");
    }

    #[test]
    fn test_pager_line_hidden_for_single_page() {
        let rows = rows(5);
        let mut presenter = ListPresenter::new(NonZeroUsize::new(10).unwrap());
        let view = presenter.present(&rows);
        assert!(pager_line(&view).is_none());
    }

    #[test]
    fn test_present_applies_query_then_clamps() {
        let rows = rows(100);
        let view = present(&rows, "champion 00", 9, NonZeroUsize::new(4).unwrap());

        // "Champion 000" to "Champion 009", three pages of four
        assert_eq!(view.matched, 10);
        assert_eq!(view.current_page, 3);
        assert_eq!(view.items.len(), 2);
        assert_eq!(pager_line(&view).unwrap(), "‹ 1 2 [3]");
    }
}
