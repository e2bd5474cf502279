use crate::api::auth::middleware::{BuyerAuth, FarmerAuth};
use crate::repository;
use crate::types::Context;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

async fn profile(auth: FarmerAuth) -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "user": auth.user })))
}

async fn buyer_profile(auth: BuyerAuth) -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "user": auth.user })))
}

#[derive(Deserialize)]
struct UpdateLocationPayload {
    latitude: f64,
    longitude: f64,
}

async fn update_location(
    State(ctx): State<Arc<Context>>,
    auth: FarmerAuth,
    Json(payload): Json<UpdateLocationPayload>,
) -> impl IntoResponse {
    // Coordinates are stored as supplied; no range check.
    match repository::user::update_location_by_id(
        ctx.db_conn.clone(),
        auth.user.id,
        payload.latitude,
        payload.longitude,
    )
    .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({"message": "Your farm location has been updated!"})),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to update location"})),
        ),
    }
}

async fn update_buyer_location(
    State(ctx): State<Arc<Context>>,
    auth: BuyerAuth,
    Json(payload): Json<UpdateLocationPayload>,
) -> impl IntoResponse {
    match repository::user::update_location_by_id(
        ctx.db_conn.clone(),
        auth.user.id,
        payload.latitude,
        payload.longitude,
    )
    .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({"message": "Your primary location has been updated!"})),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to update location"})),
        ),
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/profile", get(profile))
        .route("/update_location", post(update_location))
        .route("/buyer_profile", get(buyer_profile))
        .route("/update_buyer_location", post(update_buyer_location))
}
