use crate::api::auth::middleware::Auth;
use crate::catalog;
use crate::repository;
use crate::types::Context;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
struct MarketFilters {
    query: Option<String>,
    category: Option<String>,
}

async fn market(
    State(ctx): State<Arc<Context>>,
    _: Auth,
    Query(filters): Query<MarketFilters>,
) -> impl IntoResponse {
    // An unknown category is ignored rather than rejected.
    let vegetable_names = filters
        .category
        .as_deref()
        .and_then(catalog::find_category)
        .map(|category| {
            category
                .vegetables
                .iter()
                .map(|name| name.to_string())
                .collect::<Vec<_>>()
        });

    let search = filters.query.clone().filter(|query| !query.is_empty());

    match repository::listing::find_many(
        ctx.db_conn.clone(),
        repository::listing::FindManyFilters {
            vegetable_names,
            search,
        },
    )
    .await
    {
        Ok(listings) => (
            StatusCode::OK,
            Json(json!({
                "listings": listings,
                "categories": catalog::CATEGORIES.iter().map(|category| category.name).collect::<Vec<_>>(),
                "active_category": filters.category,
                "search_query": filters.query,
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to fetch listings"})),
        ),
    }
}

async fn view_farmer(
    State(ctx): State<Arc<Context>>,
    _: Auth,
    Path(farmer_id): Path<String>,
) -> impl IntoResponse {
    let farmer =
        match repository::user::find_farmer_by_id(ctx.db_conn.clone(), farmer_id.clone()).await {
            Ok(Some(farmer)) => farmer,
            Ok(None) => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": "Farmer not found."})),
                )
            }
            Err(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Failed to fetch farmer"})),
                )
            }
        };

    match repository::listing::find_unsold_by_farmer_id(ctx.db_conn.clone(), farmer_id).await {
        Ok(listings) => (
            StatusCode::OK,
            Json(json!({ "farmer": farmer, "listings": listings })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to fetch farmer"})),
        ),
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/market", get(market))
        .route("/farmer/:id", get(view_farmer))
}
