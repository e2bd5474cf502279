use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite};
use ulid::Ulid;

use crate::utils::database::DatabaseConnection;

#[derive(Serialize, Deserialize, Clone, Debug, FromRow)]
pub struct Listing {
    pub id: String,
    pub farmer_id: String,
    pub vegetable_name: String,
    pub quantity_kg: f64,
    pub rate_per_kg: f64,
    pub is_sold: bool,
    pub created_at: NaiveDateTime,
}

/// A listing joined to the public details of the farmer selling it, as
/// shown on the market page.
#[derive(Serialize, Deserialize, Clone, Debug, FromRow)]
pub struct MarketListing {
    pub id: String,
    pub vegetable_name: String,
    pub quantity_kg: f64,
    pub rate_per_kg: f64,
    pub is_sold: bool,
    pub farmer_id: String,
    pub farmer_name: String,
    pub farmer_place: String,
    pub mobile_number: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub struct CreateListingPayload {
    pub farmer_id: String,
    pub vegetable_name: String,
    pub quantity_kg: f64,
    pub rate_per_kg: f64,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create(
    db: DatabaseConnection,
    payload: CreateListingPayload,
) -> Result<Listing, Error> {
    match sqlx::query_as::<_, Listing>(
        "
        INSERT INTO listings (id, farmer_id, vegetable_name, quantity_kg, rate_per_kg)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.farmer_id)
    .bind(payload.vegetable_name)
    .bind(payload.quantity_kg)
    .bind(payload.rate_per_kg)
    .fetch_one(&db.pool)
    .await
    {
        Ok(listing) => Ok(listing),
        Err(err) => {
            tracing::error!("Error occurred while creating a listing: {}", err);
            Err(Error::UnexpectedError)
        }
    }
}

pub async fn find_by_id(db: DatabaseConnection, id: String) -> Result<Option<Listing>, Error> {
    sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?")
        .bind(id.clone())
        .fetch_optional(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching listing with id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub struct FindManyFilters {
    /// Exact names to restrict to, already expanded from a catalog category.
    pub vegetable_names: Option<Vec<String>>,
    /// Case-insensitive substring match on the vegetable name.
    pub search: Option<String>,
}

pub async fn find_many(
    db: DatabaseConnection,
    filters: FindManyFilters,
) -> Result<Vec<MarketListing>, Error> {
    let mut query = QueryBuilder::<Sqlite>::new(
        "
        SELECT
            l.id, l.vegetable_name, l.quantity_kg, l.rate_per_kg, l.is_sold,
            u.id AS farmer_id, u.name AS farmer_name, u.place AS farmer_place,
            u.mobile_number, u.latitude, u.longitude
        FROM listings l
        JOIN users u ON l.farmer_id = u.id
        WHERE 1 = 1
        ",
    );

    if let Some(names) = filters.vegetable_names {
        query.push(" AND l.vegetable_name IN (");
        let mut separated = query.separated(", ");
        for name in names {
            separated.push_bind(name);
        }
        separated.push_unseparated(")");
    }

    if let Some(search) = filters.search {
        query.push(" AND l.vegetable_name LIKE ");
        query.push_bind(format!("%{}%", search));
    }

    query.push(" ORDER BY l.is_sold ASC, l.id DESC");

    query
        .build_query_as::<MarketListing>()
        .fetch_all(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching market listings: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_by_farmer_id(
    db: DatabaseConnection,
    farmer_id: String,
) -> Result<Vec<Listing>, Error> {
    sqlx::query_as::<_, Listing>(
        "SELECT * FROM listings WHERE farmer_id = ? ORDER BY is_sold ASC, id DESC",
    )
    .bind(farmer_id.clone())
    .fetch_all(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching listings for farmer {}: {}",
            farmer_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_unsold_by_farmer_id(
    db: DatabaseConnection,
    farmer_id: String,
) -> Result<Vec<Listing>, Error> {
    sqlx::query_as::<_, Listing>(
        "SELECT * FROM listings WHERE farmer_id = ? AND is_sold = 0 ORDER BY id DESC",
    )
    .bind(farmer_id.clone())
    .fetch_all(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching unsold listings for farmer {}: {}",
            farmer_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn update_sold_status(
    db: DatabaseConnection,
    id: String,
    is_sold: bool,
) -> Result<(), Error> {
    match sqlx::query("UPDATE listings SET is_sold = ? WHERE id = ?")
        .bind(is_sold)
        .bind(id.clone())
        .execute(&db.pool)
        .await
    {
        Ok(_) => Ok(()),
        Err(err) => {
            tracing::error!(
                "Error occurred while updating sold status of listing {}: {}",
                id,
                err
            );
            Err(Error::UnexpectedError)
        }
    }
}

pub async fn delete_by_id(db: DatabaseConnection, id: String) -> Result<(), Error> {
    match sqlx::query("DELETE FROM listings WHERE id = ?")
        .bind(id.clone())
        .execute(&db.pool)
        .await
    {
        Ok(_) => Ok(()),
        Err(err) => {
            tracing::error!(
                "Error occurred while deleting listing with id {}: {}",
                id,
                err
            );
            Err(Error::UnexpectedError)
        }
    }
}

#[derive(Serialize, Deserialize, FromRow)]
pub struct DashboardStats {
    pub active_count: i64,
    pub sold_count: i64,
    /// Potential value of the unsold stock, not realized revenue.
    pub earnings: f64,
}

pub async fn get_dashboard_stats(
    db: DatabaseConnection,
    farmer_id: String,
) -> Result<DashboardStats, Error> {
    sqlx::query_as::<_, DashboardStats>(
        "
        SELECT
            COALESCE(SUM(CASE WHEN is_sold = 0 THEN 1 ELSE 0 END), 0) AS active_count,
            COALESCE(SUM(CASE WHEN is_sold = 1 THEN 1 ELSE 0 END), 0) AS sold_count,
            COALESCE(SUM(CASE WHEN is_sold = 0 THEN quantity_kg * rate_per_kg END), 0.0) AS earnings
        FROM listings
        WHERE farmer_id = ?
        ",
    )
    .bind(farmer_id.clone())
    .fetch_one(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while computing dashboard stats for farmer {}: {}",
            farmer_id,
            err
        );
        Error::UnexpectedError
    })
}
