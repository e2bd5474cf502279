use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::{admin, auth, listing, market, profile};
use crate::api::auth::middleware::Auth;
use crate::types::Context;
use std::sync::Arc;

async fn index() -> impl IntoResponse {
    Redirect::to("/welcome")
}

async fn welcome(auth: Option<Auth>) -> Response {
    if auth.is_some() {
        return Redirect::to("/market").into_response();
    }

    (
        StatusCode::OK,
        Json(json!({ "message": "Welcome to the FarmHut market" })),
    )
        .into_response()
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(index))
        .route("/welcome", get(welcome))
        .merge(auth::get_router())
        .merge(market::get_router())
        .merge(listing::get_router())
        .merge(profile::get_router())
        .merge(admin::get_router())
}
