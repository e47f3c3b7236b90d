//! Price tracking job.
//!
//! Runs a single pass over the watchlist, or repeats it forever when
//! `poll_interval_secs` is configured.

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use pricewatch::crawler::{HttpPageFetcher, PageFetcher};
use pricewatch::db::{establish_connection_pool, run_migrations};
use pricewatch::models::config::AppConfig;
use pricewatch::notifier::{Notifier, TelegramNotifier};
use pricewatch::repository::DieselRepository;
use pricewatch::services::ServiceError;
use pricewatch::services::tracking::{TrackingReport, run_tracking_job};
use pricewatch::watchlist::{WatchlistError, load_watchlist};

#[derive(Debug, Error)]
enum RunError {
    #[error("{0}")]
    Watchlist(#[from] WatchlistError),
    #[error("tracking aborted: {0}")]
    Service(#[from] ServiceError),
}

fn run_once<F, N>(
    config: &AppConfig,
    repo: &DieselRepository,
    fetcher: &F,
    notifier: &N,
) -> Result<TrackingReport, RunError>
where
    F: PageFetcher,
    N: Notifier,
{
    let products = load_watchlist(&config.products_file)?;
    if products.is_empty() {
        log::warn!("No products in {}", config.products_file);
    }
    Ok(run_tracking_job(&products, repo, fetcher, notifier)?)
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to open database {}: {e}", config.database_url);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to prepare database schema: {e}");
        return ExitCode::FAILURE;
    }

    let repo = DieselRepository::new(pool);

    let fetcher = match HttpPageFetcher::new(&config.fetch) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            log::error!("Failed to build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let notifier = match TelegramNotifier::new(&config.telegram) {
        Ok(notifier) => notifier,
        Err(e) => {
            log::error!("Failed to build notifier: {e}");
            return ExitCode::FAILURE;
        }
    };

    let Some(interval) = config.poll_interval_secs.map(Duration::from_secs) else {
        return match run_once(&config, &repo, &fetcher, &notifier) {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("Tracking run failed: {e}");
                ExitCode::FAILURE
            }
        };
    };

    log::info!("Polling every {}s", interval.as_secs());
    loop {
        if let Err(e) = run_once(&config, &repo, &fetcher, &notifier) {
            log::error!("Tracking run failed: {e}");
        }
        thread::sleep(interval);
    }
}
