use chrono::NaiveDateTime;
use sqlx::FromRow;
use ulid::Ulid;

use crate::utils::database::DatabaseConnection;

/// Server-side session record; the row id doubles as the bearer token.
#[derive(Clone, Debug, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub expires_at: NaiveDateTime,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create(db: DatabaseConnection, user_id: String) -> Result<Session, Error> {
    match sqlx::query_as::<_, Session>(
        "INSERT INTO sessions (id, user_id, expires_at) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(Ulid::new().to_string())
    .bind(user_id.clone())
    .bind(chrono::Utc::now().naive_utc() + chrono::Duration::days(7))
    .fetch_one(&db.pool)
    .await
    {
        Ok(session) => Ok(session),
        Err(err) => {
            tracing::error!(
                "Error occurred while creating a new session for user with id {}: {}",
                user_id,
                err
            );
            Err(Error::UnexpectedError)
        }
    }
}

pub async fn find_by_id(db: DatabaseConnection, id: String) -> Result<Option<Session>, Error> {
    sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = ?")
        .bind(id.clone())
        .fetch_optional(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching session with id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn delete_by_id(db: DatabaseConnection, id: String) -> Result<(), Error> {
    match sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(id.clone())
        .execute(&db.pool)
        .await
    {
        Ok(_) => Ok(()),
        Err(err) => {
            tracing::error!(
                "Error occurred while deleting session with id {}: {}",
                id,
                err
            );
            Err(Error::UnexpectedError)
        }
    }
}
