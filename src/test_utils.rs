pub mod test_helpers {
    use crate::repository;
    use crate::repository::user::{User, UserType};
    use crate::types::{AppContext, AppEnvironment, Context};
    use crate::utils::database::{self, DatabaseConnection};
    use crate::utils::password;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;

    /// A fresh in-memory database with the schema already created. A single
    /// connection keeps every query in the test on the same database.
    pub async fn create_test_db() -> Result<DatabaseConnection, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let db_conn = DatabaseConnection { pool };
        database::migrate(db_conn.clone()).await;

        Ok(db_conn)
    }

    pub async fn create_test_context() -> Arc<Context> {
        let db_conn = create_test_db().await.unwrap();

        Arc::new(Context {
            app: AppContext {
                host: "127.0.0.1".to_string(),
                environment: AppEnvironment::Development,
                port: 0,
                url: "http://127.0.0.1:0".to_string(),
            },
            db_conn,
        })
    }

    pub async fn insert_test_user(
        db_conn: DatabaseConnection,
        user_type: UserType,
        name: &str,
        mobile_number: &str,
        plain_password: &str,
    ) -> User {
        let hashed = password::hash(plain_password).ok().unwrap();

        repository::user::create(
            db_conn,
            repository::user::CreateUserPayload {
                user_type,
                name: name.to_string(),
                place: "Madurai".to_string(),
                dob: "1990-01-01".to_string(),
                mobile_number: mobile_number.to_string(),
                password: hashed,
            },
        )
        .await
        .unwrap()
    }

    pub async fn create_session_for(db_conn: DatabaseConnection, user_id: String) -> String {
        repository::session::create(db_conn, user_id).await.unwrap().id
    }

    pub async fn insert_test_listing(
        db_conn: DatabaseConnection,
        farmer_id: &str,
        vegetable_name: &str,
        quantity_kg: f64,
        rate_per_kg: f64,
    ) -> repository::listing::Listing {
        repository::listing::create(
            db_conn,
            repository::listing::CreateListingPayload {
                farmer_id: farmer_id.to_string(),
                vegetable_name: vegetable_name.to_string(),
                quantity_kg,
                rate_per_kg,
            },
        )
        .await
        .unwrap()
    }

    pub async fn set_location(db_conn: DatabaseConnection, user_id: &str) {
        repository::user::update_location_by_id(db_conn, user_id.to_string(), 9.9252, 78.1198)
            .await
            .unwrap();
    }
}
