mod common;

use axum::http::StatusCode;
use farmhut_backend_rs::repository;
use farmhut_backend_rs::test_utils::test_helpers;
use serde_json::json;

#[tokio::test]
async fn add_listing_is_refused_until_the_farm_location_is_set() {
    let (router, _ctx) = common::test_app().await;

    let token = common::register_and_login(&router, "farmer", "Murugan", "9100000001", "pw").await;

    let (status, body) = common::request(&router, "GET", "/add_listing", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Please set your farm location on your profile before adding a listing."
    );

    let (status, _) = common::request(
        &router,
        "POST",
        "/update_location",
        Some(&token),
        Some(json!({ "latitude": 9.9252, "longitude": 78.1198 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = common::request(&router, "GET", "/add_listing", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["vegetables"].is_array());
}

#[tokio::test]
async fn add_listing_inserts_one_row_per_valid_item() {
    let (router, ctx) = common::test_app().await;

    let token = common::register_and_login(&router, "farmer", "Murugan", "9100000002", "pw").await;
    let (_, login_body) = common::request(
        &router,
        "POST",
        "/login",
        None,
        Some(json!({ "mobile_number": "9100000002", "password": "pw" })),
    )
    .await;
    let farmer_id = login_body["user_id"].as_str().unwrap().to_string();

    test_helpers::set_location(ctx.db_conn.clone(), &farmer_id).await;

    let (status, body) = common::request(
        &router,
        "POST",
        "/add_listing",
        Some(&token),
        Some(json!({
            "items": [
                { "vegetable_name": "Tomato", "quantity_kg": 5.0, "rate_per_kg": 20.0 },
                { "vegetable_name": "Cabbage", "quantity_kg": 2.0, "rate_per_kg": 10.0 },
                { "vegetable_name": "Potato", "quantity_kg": 0.0, "rate_per_kg": 10.0 },
                { "vegetable_name": "Onion", "quantity_kg": 3.0, "rate_per_kg": -1.0 },
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["items_added"], 1);
    assert_eq!(body["message"], "1 item(s) posted successfully!");

    let listings = repository::listing::find_by_farmer_id(ctx.db_conn.clone(), farmer_id)
        .await
        .unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].vegetable_name, "Tomato");
    assert_eq!(listings[0].quantity_kg, 5.0);
    assert_eq!(listings[0].rate_per_kg, 20.0);
    assert!(!listings[0].is_sold);
}

#[tokio::test]
async fn add_listing_with_no_valid_items_reports_a_validation_failure() {
    let (router, ctx) = common::test_app().await;

    let token = common::register_and_login(&router, "farmer", "Murugan", "9100000003", "pw").await;
    let user = repository::user::find_by_mobile_number(ctx.db_conn.clone(), "9100000003".to_string())
        .await
        .unwrap()
        .unwrap();
    test_helpers::set_location(ctx.db_conn.clone(), &user.id).await;

    let (status, body) = common::request(
        &router,
        "POST",
        "/add_listing",
        Some(&token),
        Some(json!({
            "items": [
                { "vegetable_name": "Cabbage", "quantity_kg": 5.0, "rate_per_kg": 20.0 },
                { "vegetable_name": "Tomato", "quantity_kg": 0.0, "rate_per_kg": 0.0 },
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "No items were added. Please enter both quantity and rate."
    );
}

#[tokio::test]
async fn toggle_status_flips_only_for_the_owner() {
    let (router, ctx) = common::test_app().await;

    let owner_token =
        common::register_and_login(&router, "farmer", "Murugan", "9100000004", "pw").await;
    let other_token =
        common::register_and_login(&router, "farmer", "Raman", "9100000005", "pw").await;

    let owner = repository::user::find_by_mobile_number(ctx.db_conn.clone(), "9100000004".to_string())
        .await
        .unwrap()
        .unwrap();
    let listing =
        test_helpers::insert_test_listing(ctx.db_conn.clone(), &owner.id, "Tomato", 5.0, 20.0).await;

    let uri = format!("/toggle_status/{}", listing.id);

    let (status, _) = common::request(&router, "POST", &uri, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let reloaded = repository::listing::find_by_id(ctx.db_conn.clone(), listing.id.clone())
        .await
        .unwrap()
        .unwrap();
    assert!(reloaded.is_sold);

    let (status, _) = common::request(&router, "POST", &uri, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let reloaded = repository::listing::find_by_id(ctx.db_conn.clone(), listing.id.clone())
        .await
        .unwrap()
        .unwrap();
    assert!(!reloaded.is_sold);

    // A different farmer is turned away and the flag is untouched.
    let (status, body) = common::request(&router, "POST", &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You are not authorized to change this listing.");
    let reloaded = repository::listing::find_by_id(ctx.db_conn.clone(), listing.id.clone())
        .await
        .unwrap()
        .unwrap();
    assert!(!reloaded.is_sold);
}

#[tokio::test]
async fn delete_listing_respects_ownership() {
    let (router, ctx) = common::test_app().await;

    let owner_token =
        common::register_and_login(&router, "farmer", "Murugan", "9100000006", "pw").await;
    let other_token =
        common::register_and_login(&router, "farmer", "Raman", "9100000007", "pw").await;

    let owner = repository::user::find_by_mobile_number(ctx.db_conn.clone(), "9100000006".to_string())
        .await
        .unwrap()
        .unwrap();
    let listing =
        test_helpers::insert_test_listing(ctx.db_conn.clone(), &owner.id, "Carrot", 4.0, 30.0).await;

    let uri = format!("/delete_listing/{}", listing.id);

    let (status, body) = common::request(&router, "POST", &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You are not authorized to delete this listing.");
    assert!(
        repository::listing::find_by_id(ctx.db_conn.clone(), listing.id.clone())
            .await
            .unwrap()
            .is_some()
    );

    let (status, body) = common::request(&router, "POST", &uri, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Listing deleted successfully.");
    assert!(
        repository::listing::find_by_id(ctx.db_conn.clone(), listing.id.clone())
            .await
            .unwrap()
            .is_none()
    );

    let (_, body) = common::request(&router, "GET", "/dashboard", Some(&owner_token), None).await;
    assert_eq!(body["listings"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn dashboard_counts_only_unsold_stock_as_earnings() {
    let (router, ctx) = common::test_app().await;

    let token = common::register_and_login(&router, "farmer", "Murugan", "9100000008", "pw").await;
    let user = repository::user::find_by_mobile_number(ctx.db_conn.clone(), "9100000008".to_string())
        .await
        .unwrap()
        .unwrap();

    let active =
        test_helpers::insert_test_listing(ctx.db_conn.clone(), &user.id, "Tomato", 5.0, 20.0).await;
    let sold =
        test_helpers::insert_test_listing(ctx.db_conn.clone(), &user.id, "Potato", 3.0, 10.0).await;
    repository::listing::update_sold_status(ctx.db_conn.clone(), sold.id.clone(), true)
        .await
        .unwrap();

    let (status, body) = common::request(&router, "GET", "/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active_count"], 1);
    assert_eq!(body["sold_count"], 1);
    assert_eq!(body["earnings"].as_f64().unwrap(), 100.0);

    // Unsold first, then most recent first within each group.
    let listings = body["listings"].as_array().unwrap();
    assert_eq!(listings[0]["id"], active.id.as_str());
    assert_eq!(listings[1]["id"], sold.id.as_str());
}

#[tokio::test]
async fn dashboard_is_farmer_only() {
    let (router, _ctx) = common::test_app().await;

    let token = common::register_and_login(&router, "buyer", "Kavitha", "9100000009", "pw").await;

    let (status, body) = common::request(&router, "GET", "/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied.");

    let (status, _) = common::request(&router, "GET", "/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
