use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ulid::Ulid;

use crate::utils::database::DatabaseConnection;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserType {
    Farmer,
    Buyer,
}

#[derive(Serialize, Deserialize, Clone, Debug, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub place: String,
    /// Doubles as the password-reset secret, so it is never serialized out.
    #[serde(skip_serializing)]
    pub dob: String,
    pub mobile_number: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub user_type: UserType,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: NaiveDateTime,
}

pub struct CreateUserPayload {
    pub user_type: UserType,
    pub name: String,
    pub place: String,
    pub dob: String,
    pub mobile_number: String,
    /// Already hashed; this layer never sees the plaintext.
    pub password: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
    DuplicateMobileNumber,
}

pub async fn create(db: DatabaseConnection, payload: CreateUserPayload) -> Result<User, Error> {
    match sqlx::query_as::<_, User>(
        "
        INSERT INTO users (id, user_type, name, place, dob, mobile_number, password)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.user_type)
    .bind(payload.name)
    .bind(payload.place)
    .bind(payload.dob)
    .bind(payload.mobile_number)
    .bind(payload.password)
    .fetch_one(&db.pool)
    .await
    {
        Ok(user) => Ok(user),
        Err(err) => {
            if err
                .as_database_error()
                .map(|db_err| db_err.is_unique_violation())
                .unwrap_or(false)
            {
                return Err(Error::DuplicateMobileNumber);
            }
            tracing::error!("Error occurred while creating a user account: {}", err);
            Err(Error::UnexpectedError)
        }
    }
}

pub async fn find_by_id(db: DatabaseConnection, id: String) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id.clone())
        .fetch_optional(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_farmer_by_id(db: DatabaseConnection, id: String) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ? AND user_type = 'farmer'")
        .bind(id.clone())
        .fetch_optional(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching farmer with id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_by_mobile_number(
    db: DatabaseConnection,
    mobile_number: String,
) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE mobile_number = ?")
        .bind(mobile_number)
        .fetch_optional(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_mobile_number: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_by_mobile_number_and_dob(
    db: DatabaseConnection,
    mobile_number: String,
    dob: String,
) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE mobile_number = ? AND dob = ?")
        .bind(mobile_number)
        .bind(dob)
        .fetch_optional(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_mobile_number_and_dob: {}", err);
            Error::UnexpectedError
        })
}

pub async fn update_password_by_id(
    db: DatabaseConnection,
    id: String,
    password: String,
) -> Result<(), Error> {
    match sqlx::query("UPDATE users SET password = ? WHERE id = ?")
        .bind(password)
        .bind(id.clone())
        .execute(&db.pool)
        .await
    {
        Ok(_) => Ok(()),
        Err(err) => {
            tracing::error!(
                "Error occurred while updating password for user with id {}: {}",
                id,
                err
            );
            Err(Error::UnexpectedError)
        }
    }
}

pub async fn update_location_by_id(
    db: DatabaseConnection,
    id: String,
    latitude: f64,
    longitude: f64,
) -> Result<(), Error> {
    match sqlx::query("UPDATE users SET latitude = ?, longitude = ? WHERE id = ?")
        .bind(latitude)
        .bind(longitude)
        .bind(id.clone())
        .execute(&db.pool)
        .await
    {
        Ok(_) => Ok(()),
        Err(err) => {
            tracing::error!(
                "Error occurred while updating location for user with id {}: {}",
                id,
                err
            );
            Err(Error::UnexpectedError)
        }
    }
}

#[derive(Serialize, Deserialize, FromRow)]
pub struct UserStats {
    pub farmers: i64,
    pub buyers: i64,
    pub total: i64,
}

pub async fn get_stats(db: DatabaseConnection) -> Result<UserStats, Error> {
    sqlx::query_as::<_, UserStats>(
        "
        SELECT
            (SELECT COUNT(id) FROM users WHERE user_type = 'farmer') AS farmers,
            (SELECT COUNT(id) FROM users WHERE user_type = 'buyer') AS buyers,
            (SELECT COUNT(id) FROM users) AS total
        ",
    )
    .fetch_one(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while counting users: {}", err);
        Error::UnexpectedError
    })
}
