use crate::repository;
use crate::repository::user::UserType;
use crate::types::Context;
use crate::utils;
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
use validator::Validate;

use super::middleware::Auth;

#[derive(Deserialize, Validate)]
struct RegisterPayload {
    user_type: UserType,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    name: String,
    #[validate(length(min = 1, message = "Place cannot be empty"))]
    place: String,
    #[validate(length(min = 1, message = "Date of birth cannot be empty"))]
    dob: String,
    #[validate(length(min = 10, message = "Invalid mobile number"))]
    mobile_number: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    password: String,
}

async fn register(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<RegisterPayload>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors);
    }

    let hashed_password = match utils::password::hash(payload.password.as_str()) {
        Ok(hashed) => hashed,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Registration failed!"})),
            )
        }
    };

    match repository::user::create(
        ctx.db_conn.clone(),
        repository::user::CreateUserPayload {
            user_type: payload.user_type,
            name: payload.name,
            place: payload.place,
            dob: payload.dob,
            mobile_number: payload.mobile_number,
            password: hashed_password,
        },
    )
    .await
    {
        Ok(_) => (
            StatusCode::CREATED,
            Json(json!({"message": "Registration successful! Please login."})),
        ),
        Err(repository::user::Error::DuplicateMobileNumber) => (
            StatusCode::CONFLICT,
            Json(json!({"error": "This mobile number is already registered."})),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Registration failed!"})),
        ),
    }
}

#[derive(Deserialize)]
struct LoginPayload {
    mobile_number: String,
    password: String,
}

async fn login(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<LoginPayload>,
) -> impl IntoResponse {
    // One notice for both unknown number and wrong password, so callers
    // cannot probe which mobile numbers are registered.
    let invalid = (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Invalid mobile number or password. Please try again."})),
    );

    let user = match repository::user::find_by_mobile_number(
        ctx.db_conn.clone(),
        payload.mobile_number.clone(),
    )
    .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return invalid,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Login failed!"})),
            )
        }
    };

    if !utils::password::verify(user.password.as_str(), payload.password.as_str()) {
        return invalid;
    }

    match repository::session::create(ctx.db_conn.clone(), user.id.clone()).await {
        Ok(session) => (
            StatusCode::OK,
            Json(json!({
                "message": format!("Welcome back, {}!", user.name),
                "token": session.id,
                "user_id": user.id,
                "user_name": user.name,
                "user_type": user.user_type,
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to create session"})),
        ),
    }
}

async fn logout(State(ctx): State<Arc<Context>>, auth: Auth) -> impl IntoResponse {
    match repository::session::delete_by_id(ctx.db_conn.clone(), auth.session.id).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({"message": "You have been logged out successfully."})),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Logout failed!"})),
        ),
    }
}

#[derive(Deserialize)]
struct ForgotPasswordPayload {
    mobile_number: String,
    dob: String,
}

async fn forgot_password(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> impl IntoResponse {
    match repository::user::find_by_mobile_number_and_dob(
        ctx.db_conn.clone(),
        payload.mobile_number,
        payload.dob,
    )
    .await
    {
        Ok(Some(user)) => {
            match repository::password_reset::create(ctx.db_conn.clone(), user.id).await {
                Ok(reset) => (StatusCode::OK, Json(json!({ "reset_token": reset.id }))),
                Err(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Failed to start password reset"})),
                ),
            }
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid mobile number or date of birth."})),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to start password reset"})),
        ),
    }
}

#[derive(Deserialize)]
struct ResetPasswordPayload {
    reset_token: String,
    password: String,
    confirm_password: String,
}

async fn reset_password(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<ResetPasswordPayload>,
) -> impl IntoResponse {
    let reset = match repository::password_reset::find_by_id(
        ctx.db_conn.clone(),
        payload.reset_token.clone(),
    )
    .await
    {
        Ok(Some(reset)) => reset,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(
                    json!({"error": "Password reset not started. Please verify your identity first."}),
                ),
            )
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to reset password"})),
            )
        }
    };

    if reset.expires_at < chrono::Utc::now().naive_utc() {
        let _ = repository::password_reset::delete_by_id(ctx.db_conn.clone(), reset.id).await;
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Password reset expired. Please verify your identity again."})),
        );
    }

    if payload.password != payload.confirm_password {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Passwords do not match!"})),
        );
    }

    let hashed_password = match utils::password::hash(payload.password.as_str()) {
        Ok(hashed) => hashed,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to reset password"})),
            )
        }
    };

    match repository::user::update_password_by_id(
        ctx.db_conn.clone(),
        reset.user_id,
        hashed_password,
    )
    .await
    {
        Ok(_) => {
            let _ = repository::password_reset::delete_by_id(ctx.db_conn.clone(), reset.id).await;
            (
                StatusCode::OK,
                Json(json!({"message": "Password updated successfully! Please login."})),
            )
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to reset password"})),
        ),
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/forgot_password", post(forgot_password))
        .route("/reset_password", post(reset_password))
}
