use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;

#[derive(Clone)]
pub struct DatabaseConnection {
    pub pool: SqlitePool,
}

pub async fn connect(database_url: &str) -> DatabaseConnection {
    let options = SqliteConnectOptions::from_str(database_url)
        .unwrap_or_else(|e| {
            tracing::error!("{:}", e);
            panic!("Invalid database url {}", database_url)
        })
        .create_if_missing(true);

    DatabaseConnection {
        pool: SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("{:}", e);
                panic!("Error connecting to database {}", database_url)
            }),
    }
}

const SCHEMA: &[&str] = &[
    "
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        place TEXT NOT NULL,
        dob TEXT NOT NULL,
        mobile_number TEXT UNIQUE NOT NULL,
        password TEXT NOT NULL,
        user_type TEXT NOT NULL,
        latitude REAL,
        longitude REAL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    ",
    "
    CREATE TABLE IF NOT EXISTS listings (
        id TEXT PRIMARY KEY,
        farmer_id TEXT NOT NULL REFERENCES users (id),
        vegetable_name TEXT NOT NULL,
        quantity_kg REAL NOT NULL,
        rate_per_kg REAL NOT NULL,
        is_sold BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    ",
    "
    CREATE TABLE IF NOT EXISTS sessions (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users (id),
        expires_at TIMESTAMP NOT NULL
    )
    ",
    "
    CREATE TABLE IF NOT EXISTS password_resets (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users (id),
        expires_at TIMESTAMP NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    ",
];

/// Creates the schema if it does not exist yet. Safe to run on every boot.
pub async fn migrate(db_conn: DatabaseConnection) {
    for statement in SCHEMA {
        match sqlx::query(statement).execute(&db_conn.pool).await {
            Ok(_) => (),
            Err(err) => {
                tracing::error!("{}", err);
                panic!("Failed to create database schema");
            }
        }
    }
}
