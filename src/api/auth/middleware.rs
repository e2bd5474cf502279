use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json};
use axum::{extract::Extension, http, http::request::Parts};
use serde_json::json;

use crate::repository;
use crate::repository::session::Session;
use crate::repository::user::{User, UserType};
use crate::types::Context;
use crate::utils::database::DatabaseConnection;
use std::sync::Arc;

enum Error {
    InvalidSession,
}

fn get_session_id_from_header(header: String) -> Result<String, Error> {
    header
        .split(" ")
        .skip(1)
        .next()
        .map(|h| h.to_string())
        .ok_or(Error::InvalidSession)
}

async fn get_session_from_header(
    db_conn: DatabaseConnection,
    header: String,
) -> Result<(Session, User), Error> {
    let session_id = get_session_id_from_header(header)?;

    let session = repository::session::find_by_id(db_conn.clone(), session_id)
        .await
        .map_err(|_| Error::InvalidSession)?
        .ok_or(Error::InvalidSession)?;

    if session.expires_at < chrono::Utc::now().naive_utc() {
        return Err(Error::InvalidSession);
    }

    let user = repository::user::find_by_id(db_conn.clone(), session.user_id.clone())
        .await
        .map_err(|_| Error::InvalidSession)?
        .ok_or(Error::InvalidSession)?;

    Ok((session, user))
}

/// Any logged-in user, resolved from the bearer session token.
#[derive(Clone)]
pub struct Auth {
    pub session: Session,
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        use axum::RequestPartsExt;
        let Extension(ctx) = parts.extract::<Extension<Arc<Context>>>().await.unwrap();
        let headers = parts.extract::<HeaderMap>().await.unwrap();

        let err = (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Please login to continue."})),
        );

        let auth_header = headers
            .get(http::header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or(err.clone().into_response())?;

        get_session_from_header(ctx.db_conn.clone(), auth_header.to_string())
            .await
            .map(|(session, user)| Self { session, user })
            .map_err(|_| err.clone().into_response())
    }
}

#[derive(Clone)]
pub struct FarmerAuth {
    pub session: Session,
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for FarmerAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Auth::from_request_parts(parts, state).await?;

        if auth.user.user_type != UserType::Farmer {
            return Err((
                StatusCode::FORBIDDEN,
                Json(json!({"error": "Access denied."})),
            )
                .into_response());
        }

        Ok(Self {
            session: auth.session,
            user: auth.user,
        })
    }
}

#[derive(Clone)]
pub struct BuyerAuth {
    pub session: Session,
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BuyerAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Auth::from_request_parts(parts, state).await?;

        if auth.user.user_type != UserType::Buyer {
            return Err((
                StatusCode::FORBIDDEN,
                Json(json!({"error": "Access denied."})),
            )
                .into_response());
        }

        Ok(Self {
            session: auth.session,
            user: auth.user,
        })
    }
}
