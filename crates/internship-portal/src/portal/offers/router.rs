use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::catalog::OfferCatalog;
use super::domain::{filter_options, Offer, OfferCategory, OfferId};
use super::filter::{FilterError, OfferFilters};

/// Router builder exposing catalog search.
pub fn offer_router(catalog: Arc<OfferCatalog>) -> Router {
    Router::new()
        .route("/api/v1/offers", get(search_handler))
        .route("/api/v1/offers/options", get(options_handler))
        .route("/api/v1/offers/:offer_id", get(offer_handler))
        .with_state(catalog)
}

#[derive(Debug, Serialize)]
pub struct OfferSearchResponse {
    pub total: usize,
    pub matched: usize,
    pub offers: Vec<Offer>,
}

/// Split raw query pairs into the free-text query and category filters.
///
/// `q` carries the search text; every other key names a category and may
/// repeat or hold comma-separated values.
pub fn parse_search_params(
    params: Vec<(String, String)>,
) -> Result<(String, OfferFilters), FilterError> {
    let mut query = String::new();
    let mut filters = OfferFilters::new();

    for (key, value) in params {
        if key == "q" {
            query = value;
            continue;
        }
        let category = key.parse::<OfferCategory>()?;
        for part in value.split(',').map(str::trim).filter(|part| !part.is_empty()) {
            filters.select(category, part);
        }
    }

    Ok((query, filters))
}

pub(crate) async fn search_handler(
    State(catalog): State<Arc<OfferCatalog>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let (query, filters) = match parse_search_params(params) {
        Ok(parsed) => parsed,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    let offers: Vec<Offer> = catalog
        .search(&query, &filters)
        .into_iter()
        .cloned()
        .collect();

    let body = OfferSearchResponse {
        total: catalog.len(),
        matched: offers.len(),
        offers,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn options_handler() -> Response {
    (StatusCode::OK, Json(filter_options())).into_response()
}

pub(crate) async fn offer_handler(
    State(catalog): State<Arc<OfferCatalog>>,
    Path(offer_id): Path<String>,
) -> Response {
    let id = OfferId(offer_id);
    match catalog.get(&id) {
        Some(offer) => (StatusCode::OK, Json(offer.clone())).into_response(),
        None => {
            let payload = json!({ "error": format!("offer {id} not found") });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}
