use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::api::{latest_prices, price_history};

#[derive(Deserialize, Debug)]
struct ApiV1PricesQueryParams {
    product: String,
    page: Option<usize>,
}

#[get("/v1/latest")]
pub async fn api_v1_latest(repo: web::Data<DieselRepository>) -> impl Responder {
    match latest_prices(repo.get_ref()) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/v1/prices")]
pub async fn api_v1_prices(
    params: web::Query<ApiV1PricesQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let page = params.page.unwrap_or(1);

    match price_history(&params.product, page, repo.get_ref()) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(ServiceError::TypeConstraint(message)) => HttpResponse::BadRequest().body(message),
        Err(err) => {
            log::error!("Failed to serve price history: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
