use std::process::ExitCode;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use tera::Tera;

use pricewatch::db::{establish_connection_pool, run_migrations};
use pricewatch::models::config::AppConfig;
use pricewatch::repository::DieselRepository;
use pricewatch::routes::api::{api_v1_latest, api_v1_prices};
use pricewatch::routes::main::index;
use pricewatch::routes::products::show_product_history;

#[actix_web::main]
async fn main() -> ExitCode {
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

    let tera = match Tera::new(&config.dashboard.templates_dir) {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to load templates: {e}");
            return ExitCode::FAILURE;
        }
    };

    let bind_address = (config.dashboard.address.clone(), config.dashboard.port);
    let repo = web::Data::new(DieselRepository::new(pool));
    let tera = web::Data::new(tera);
    let config = web::Data::new(config);

    log::info!("Dashboard listening on {}:{}", bind_address.0, bind_address.1);

    let server = match HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(repo.clone())
            .app_data(tera.clone())
            .app_data(config.clone())
            .service(index)
            .service(show_product_history)
            .service(web::scope("/api").service(api_v1_latest).service(api_v1_prices))
    })
    .bind(bind_address)
    {
        Ok(server) => server,
        Err(e) => {
            log::error!("Failed to bind dashboard address: {e}");
            return ExitCode::FAILURE;
        }
    };

    match server.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Dashboard stopped with error: {e}");
            ExitCode::FAILURE
        }
    }
}
