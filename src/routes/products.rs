use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;
use tera::Tera;

use crate::models::config::AppConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, dashboard_watchlist, render_template};
use crate::services::ServiceError;
use crate::services::dashboard::show_history as show_history_service;

#[derive(Deserialize)]
struct HistoryQueryParams {
    page: Option<usize>,
}

#[get("/product/{product_name}")]
pub async fn show_product_history(
    params: web::Query<HistoryQueryParams>,
    product_name: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<AppConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = params.page.unwrap_or(1);
    let products = dashboard_watchlist(&config);

    match show_history_service(&product_name, page, &products, repo.get_ref()) {
        Ok(history) => {
            let mut context = base_context("history");
            context.insert("history", &history);
            render_template(&tera, "products/history.html", &context)
        }
        Err(ServiceError::NotFound) => {
            let mut context = base_context("history");
            context.insert("product_name", product_name.as_str());
            let mut response = render_template(&tera, "products/not_found.html", &context);
            *response.status_mut() = actix_web::http::StatusCode::NOT_FOUND;
            response
        }
        Err(err) => {
            log::error!("Failed to render price history: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
