use crate::repository;
use crate::types::Context;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;

/// Aggregate user counts, served as an HTML fragment without
/// authentication.
async fn admin_stats(State(ctx): State<Arc<Context>>) -> Response {
    match repository::user::get_stats(ctx.db_conn.clone()).await {
        Ok(stats) => Html(format!(
            "<h1>STATS FOR ADMIN:</h1><h2>Total Registered Users:</h2><p>Total Farmers: {}<br>Total Buyers: {}<br><strong>Total Users: {}</strong></p>",
            stats.farmers, stats.buyers, stats.total
        ))
        .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to fetch stats"})),
        )
            .into_response(),
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new().route("/admin_stats", get(admin_stats))
}
