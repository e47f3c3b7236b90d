use actix_web::{HttpResponse, Responder, get, web};
use tera::Tera;

use crate::models::config::AppConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, dashboard_watchlist, render_template};
use crate::services::dashboard::show_overview as show_overview_service;

#[get("/")]
pub async fn index(
    repo: web::Data<DieselRepository>,
    config: web::Data<AppConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let products = dashboard_watchlist(&config);

    match show_overview_service(&products, repo.get_ref()) {
        Ok(rows) => {
            let mut context = base_context("index");
            context.insert("rows", &rows);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render overview: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
