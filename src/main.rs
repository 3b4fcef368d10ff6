use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use dreamjob::app::App;
use dreamjob::apply::submit_and_confirm;
use dreamjob::config::Config;
use dreamjob::error::SearchError;
use dreamjob::models::JobListing;
use dreamjob::search::{partition, run_search};
use dreamjob::services::Services;
use dreamjob::theme::ThemeStore;
use dreamjob::{logging, tui};

#[derive(Parser)]
#[command(name = "dreamjob")]
#[command(about = "Find your dream job - search listings and apply from the terminal")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive job board (default)
    Browse,

    /// Run a search and print the best matches and other jobs
    Search {
        /// Search text
        #[arg(default_value = "")]
        query: String,
    },

    /// Run a search, then apply to one of the listings
    Apply {
        /// Search text
        #[arg(default_value = "")]
        query: String,

        /// Listing number as printed by `search` (1-based)
        #[arg(short, long)]
        pick: usize,
    },

    /// Show or toggle the saved color theme
    Theme {
        /// Switch to the other theme and save it
        #[arg(long)]
        toggle: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // load .env if present; ignore if missing
    let cli = Cli::parse();
    let config = cli.config;

    let data_dir = config.data_dir();
    let log_path = logging::init(&data_dir, &config.log_level);
    tracing::info!(log = ?log_path, data_dir = %data_dir.display(), "starting");
    let store = ThemeStore::in_dir(&data_dir);

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => {
            let services = Services::from_config(&config)?;
            tui::run_browse(App::new(store), services).await?;
        }

        Commands::Search { query } => {
            let services = Services::from_config(&config)?;
            let Some(jobs) = search_or_report(&services, &query).await? else {
                return Ok(());
            };
            let (best, other) = partition(jobs);

            println!("Top job picks for you");
            print_jobs(&best, 1, false);
            if !other.is_empty() {
                println!("\nMore jobs for you");
                print_jobs(&other, best.len() + 1, true);
            }
        }

        Commands::Apply { query, pick } => {
            let services = Services::from_config(&config)?;
            let Some(jobs) = search_or_report(&services, &query).await? else {
                return Ok(());
            };
            let total = jobs.len();
            let job = pick
                .checked_sub(1)
                .and_then(|index| jobs.get(index))
                .ok_or_else(|| anyhow!("Job #{} not found; the search returned {} jobs", pick, total))?;

            println!("Applying to {} at {}...", job.title, job.company_name);
            let confirmation =
                submit_and_confirm(services.webhook.as_ref(), services.generator.as_ref(), job)
                    .await;
            println!("\n{}\n\n{}", confirmation.title, confirmation.message);
        }

        Commands::Theme { toggle } => {
            let current = store.load().unwrap_or_default();
            if toggle {
                let theme = current.toggled();
                store
                    .save(theme)
                    .with_context(|| format!("Failed to save theme to {}", store.path().display()))?;
                println!("Theme set to {}", theme);
            } else {
                println!("Theme: {}", current);
            }
        }
    }

    Ok(())
}

/// Runs the search flow; an empty result is reported and yields `None`.
async fn search_or_report(services: &Services, query: &str) -> Result<Option<Vec<JobListing>>> {
    match run_search(services.source.as_ref(), query).await {
        Ok(jobs) => Ok(Some(jobs)),
        Err(SearchError::EmptyResult) => {
            println!("{}", SearchError::EmptyResult);
            Ok(None)
        }
        Err(e) => Err(e).context("Job search failed"),
    }
}

fn print_jobs(jobs: &[JobListing], first_number: usize, show_posted: bool) {
    if show_posted {
        println!("{:<4} {:<30} {:<22} {:<24} {:<10}", "#", "TITLE", "COMPANY", "LOCATION", "POSTED");
        println!("{}", "-".repeat(94));
    } else {
        println!("{:<4} {:<30} {:<22} {:<24}", "#", "TITLE", "COMPANY", "LOCATION");
        println!("{}", "-".repeat(83));
    }

    for (i, job) in jobs.iter().enumerate() {
        let row = format!(
            "{:<4} {:<30} {:<22} {:<24}",
            first_number + i,
            truncate(&job.title, 28),
            truncate(&job.company_name, 20),
            truncate(&job.location, 22),
        );
        if show_posted {
            println!("{} {:<10}", row, job.time_posted);
        } else {
            println!("{}", row);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
