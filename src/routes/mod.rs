use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use tera::{Context, Tera};

use crate::domain::product::ProductEntry;
use crate::models::config::AppConfig;
use crate::watchlist::load_watchlist;

pub mod api;
pub mod main;
pub mod products;

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn base_context(current_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("current_page", current_page);
    context
}

/// Watchlist used for targets on the dashboard; an unreadable file only
/// hides the targets.
pub(crate) fn dashboard_watchlist(config: &AppConfig) -> Vec<ProductEntry> {
    load_watchlist(&config.products_file).unwrap_or_else(|e| {
        log::warn!("Dashboard could not read {}: {e}", config.products_file);
        Vec::new()
    })
}
