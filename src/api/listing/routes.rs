use crate::api::auth::middleware::FarmerAuth;
use crate::catalog;
use crate::repository;
use crate::types::Context;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

fn location_missing(auth: &FarmerAuth) -> bool {
    auth.user.latitude.is_none() || auth.user.longitude.is_none()
}

async fn dashboard(State(ctx): State<Arc<Context>>, auth: FarmerAuth) -> impl IntoResponse {
    let listings =
        match repository::listing::find_by_farmer_id(ctx.db_conn.clone(), auth.user.id.clone())
            .await
        {
            Ok(listings) => listings,
            Err(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Failed to fetch dashboard"})),
                )
            }
        };

    match repository::listing::get_dashboard_stats(ctx.db_conn.clone(), auth.user.id.clone()).await
    {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({
                "listings": listings,
                "active_count": stats.active_count,
                "sold_count": stats.sold_count,
                // Potential value of unsold stock; nothing here has actually
                // been sold yet.
                "earnings": stats.earnings,
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to fetch dashboard"})),
        ),
    }
}

async fn add_listing_form(auth: FarmerAuth) -> impl IntoResponse {
    if location_missing(&auth) {
        return (
            StatusCode::BAD_REQUEST,
            Json(
                json!({"error": "Please set your farm location on your profile before adding a listing."}),
            ),
        );
    }

    (
        StatusCode::OK,
        Json(json!({ "vegetables": catalog::CATEGORIES })),
    )
}

#[derive(Deserialize)]
struct AddListingItem {
    vegetable_name: String,
    quantity_kg: f64,
    rate_per_kg: f64,
}

#[derive(Deserialize)]
struct AddListingPayload {
    items: Vec<AddListingItem>,
}

async fn add_listing(
    State(ctx): State<Arc<Context>>,
    auth: FarmerAuth,
    Json(payload): Json<AddListingPayload>,
) -> impl IntoResponse {
    if location_missing(&auth) {
        return (
            StatusCode::BAD_REQUEST,
            Json(
                json!({"error": "Please set your farm location on your profile before adding a listing."}),
            ),
        );
    }

    let mut items_added = 0;
    for item in payload.items {
        // Unknown vegetables and non-positive amounts are skipped, not rejected.
        if !catalog::contains_vegetable(item.vegetable_name.as_str()) {
            continue;
        }
        if item.quantity_kg <= 0.0 || item.rate_per_kg <= 0.0 {
            continue;
        }

        match repository::listing::create(
            ctx.db_conn.clone(),
            repository::listing::CreateListingPayload {
                farmer_id: auth.user.id.clone(),
                vegetable_name: item.vegetable_name,
                quantity_kg: item.quantity_kg,
                rate_per_kg: item.rate_per_kg,
            },
        )
        .await
        {
            Ok(_) => items_added += 1,
            Err(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Failed to add listings"})),
                )
            }
        }
    }

    if items_added > 0 {
        (
            StatusCode::CREATED,
            Json(json!({
                "message": format!("{} item(s) posted successfully!", items_added),
                "items_added": items_added,
            })),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No items were added. Please enter both quantity and rate."})),
        )
    }
}

async fn toggle_status(
    State(ctx): State<Arc<Context>>,
    auth: FarmerAuth,
    Path(listing_id): Path<String>,
) -> impl IntoResponse {
    // Same notice whether the listing is missing or owned by someone else.
    let listing = match repository::listing::find_by_id(ctx.db_conn.clone(), listing_id).await {
        Ok(Some(listing)) if listing.farmer_id == auth.user.id => listing,
        Ok(_) => {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({"error": "You are not authorized to change this listing."})),
            )
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to update listing"})),
            )
        }
    };

    // Read-modify-write without row locking; two concurrent toggles of the
    // same listing can interleave. Accepted for this workload.
    match repository::listing::update_sold_status(ctx.db_conn.clone(), listing.id, !listing.is_sold)
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({"message": "Listing status updated successfully."})),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to update listing"})),
        ),
    }
}

async fn delete_listing(
    State(ctx): State<Arc<Context>>,
    auth: FarmerAuth,
    Path(listing_id): Path<String>,
) -> impl IntoResponse {
    let listing = match repository::listing::find_by_id(ctx.db_conn.clone(), listing_id).await {
        Ok(Some(listing)) if listing.farmer_id == auth.user.id => listing,
        Ok(_) => {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({"error": "You are not authorized to delete this listing."})),
            )
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to delete listing"})),
            )
        }
    };

    match repository::listing::delete_by_id(ctx.db_conn.clone(), listing.id).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({"message": "Listing deleted successfully."})),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to delete listing"})),
        ),
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/add_listing", get(add_listing_form).post(add_listing))
        .route("/toggle_status/:id", post(toggle_status))
        .route("/delete_listing/:id", post(delete_listing))
}
