use chrono::NaiveDateTime;
use sqlx::FromRow;
use ulid::Ulid;

use crate::utils::database::DatabaseConnection;

/// Short-lived marker created by a successful forgot-password identity
/// check; the row id is the reset token the caller must present.
#[derive(Clone, Debug, FromRow)]
pub struct PasswordReset {
    pub id: String,
    pub user_id: String,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create(db: DatabaseConnection, user_id: String) -> Result<PasswordReset, Error> {
    match sqlx::query_as::<_, PasswordReset>(
        "INSERT INTO password_resets (id, user_id, expires_at) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(Ulid::new().to_string())
    .bind(user_id.clone())
    .bind(chrono::Utc::now().naive_utc() + chrono::Duration::minutes(15))
    .fetch_one(&db.pool)
    .await
    {
        Ok(reset) => Ok(reset),
        Err(err) => {
            tracing::error!(
                "Error occurred while creating a password reset for user with id {}: {}",
                user_id,
                err
            );
            Err(Error::UnexpectedError)
        }
    }
}

pub async fn find_by_id(
    db: DatabaseConnection,
    id: String,
) -> Result<Option<PasswordReset>, Error> {
    sqlx::query_as::<_, PasswordReset>("SELECT * FROM password_resets WHERE id = ?")
        .bind(id.clone())
        .fetch_optional(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching password reset with id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn delete_by_id(db: DatabaseConnection, id: String) -> Result<(), Error> {
    match sqlx::query("DELETE FROM password_resets WHERE id = ?")
        .bind(id.clone())
        .execute(&db.pool)
        .await
    {
        Ok(_) => Ok(()),
        Err(err) => {
            tracing::error!(
                "Error occurred while deleting password reset with id {}: {}",
                id,
                err
            );
            Err(Error::UnexpectedError)
        }
    }
}
