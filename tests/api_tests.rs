mod common;

use std::time::Duration;

use axum::http::{header, Method, StatusCode};
use regex::Regex;
use serde_json::json;
use uuid::Uuid;

use common::{booking, TestApp, ADMIN_EMAIL, MANAGER_EMAIL};
use rental_admin::config::EnvironmentConfig;
use rental_admin::models::CustomerFilters;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;
    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["storage"], "memory");
}

#[tokio::test]
async fn test_create_booking_properties() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("1111-AAA").await;

    let response = app
        .post("/bookings", booking(vehicle.id, "ana@test.com", "2025-01-10", "2025-01-15"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let code_pattern = Regex::new(r"^RNT-\d{4}$").unwrap();
    let rental_id = response.body["rentalId"].as_str().unwrap();
    assert!(code_pattern.is_match(rental_id));
    assert_eq!(response.body["rental"]["rentalId"], rental_id);
    assert_eq!(response.body["rental"]["status"], "pending");
    assert_eq!(response.body["rental"]["paymentStatus"], "pending");
    assert_eq!(response.body["rental"]["withDriver"], false);
    assert_eq!(response.body["rental"]["totalAmount"], 0.0);
    assert_eq!(response.body["rental"]["notes"], "");
}

#[tokio::test]
async fn test_same_email_creates_one_customer() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("1111-AAA").await;

    let first = app
        .post("/bookings", booking(vehicle.id, "ana@test.com", "2025-01-10", "2025-01-15"), None)
        .await;
    let second = app
        .post("/bookings", booking(vehicle.id, "ana@test.com", "2025-03-01", "2025-03-05"), None)
        .await;

    assert_eq!(first.body["rentalId"], "RNT-0001");
    assert_eq!(second.body["rentalId"], "RNT-0002");
    assert_eq!(first.body["rental"]["customerId"], second.body["rental"]["customerId"]);

    let customers = app.repos.customers.list(&CustomerFilters::default()).await.unwrap();
    assert_eq!(customers.len(), 1);
}

#[tokio::test]
async fn test_create_booking_validation() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("1111-AAA").await;

    let mut missing = booking(vehicle.id, "ana@test.com", "2025-01-10", "2025-01-15");
    missing.as_object_mut().unwrap().remove("customerLocation");
    let response = app.post("/bookings", missing, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert!(response.body["message"].as_str().unwrap().contains("customerLocation"));

    let bad_date = app
        .post("/bookings", booking(vehicle.id, "ana@test.com", "next tuesday", "2025-01-15"), None)
        .await;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);

    let malformed = app
        .request(Method::POST, "/bookings", None, None)
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let unknown_vehicle = app
        .post("/bookings", booking(Uuid::new_v4(), "ana@test.com", "2025-01-10", "2025-01-15"), None)
        .await;
    assert_eq!(unknown_vehicle.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_availability_scenario() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("1111-AAA").await;
    let cookie = app.login(MANAGER_EMAIL).await;

    let created = app
        .post("/bookings", booking(vehicle.id, "ana@test.com", "2025-01-10", "2025-01-15"), None)
        .await;
    let rental_uuid = created.body["rental"]["id"].as_str().unwrap().to_string();
    let activated = app
        .patch(&format!("/rentals/{}/status", rental_uuid), json!({ "status": "active" }), Some(&cookie))
        .await;
    assert_eq!(activated.status, StatusCode::OK);

    let path = |start: &str, end: &str| {
        format!("/vehicles/{}/availability?startDate={}&endDate={}", vehicle.id, start, end)
    };

    let busy = app.get(&path("2025-01-14", "2025-01-20"), None).await;
    assert_eq!(busy.status, StatusCode::OK);
    assert_eq!(busy.body["available"], false);
    assert_eq!(busy.body["conflictingRentals"][0]["rentalId"], "RNT-0001");
    assert_eq!(busy.body["conflictingRentals"][0]["status"], "active");

    let free = app.get(&path("2025-01-16", "2025-01-20"), None).await;
    assert_eq!(free.body["available"], true);
    assert_eq!(free.body["conflictingRentals"], json!([]));

    // Extremos que se tocan cuentan como solape
    let touching = app.get(&path("2025-01-15", "2025-01-20"), None).await;
    assert_eq!(touching.body["available"], false);

    let containing = app.get(&path("2025-01-01", "2025-01-31"), None).await;
    assert_eq!(containing.body["available"], false);

    app.patch(&format!("/rentals/{}/status", rental_uuid), json!({ "status": "cancelled" }), Some(&cookie))
        .await;
    let after_cancel = app.get(&path("2025-01-14", "2025-01-20"), None).await;
    assert_eq!(after_cancel.body["available"], true);
}

#[tokio::test]
async fn test_availability_errors() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("1111-AAA").await;

    let missing_dates = app
        .get(&format!("/vehicles/{}/availability?startDate=2025-01-10", vehicle.id), None)
        .await;
    assert_eq!(missing_dates.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .get(
            &format!("/vehicles/{}/availability?startDate=2025-01-10&endDate=2025-01-12", Uuid::new_v4()),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let bad_id = app
        .get("/vehicles/not-a-uuid/availability?startDate=2025-01-10&endDate=2025-01-12", None)
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_enforced_availability_blocks_double_booking() {
    let mut config = EnvironmentConfig::development();
    config.enforce_availability = true;
    let app = TestApp::with_config(config).await;
    let vehicle = app.seed_vehicle("1111-AAA").await;

    let first = app
        .post("/bookings", booking(vehicle.id, "ana@test.com", "2025-01-10", "2025-01-15"), None)
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let overlapping = app
        .post("/bookings", booking(vehicle.id, "bob@test.com", "2025-01-14", "2025-01-20"), None)
        .await;
    assert_eq!(overlapping.status, StatusCode::BAD_REQUEST);
    assert_eq!(overlapping.body["code"], "CONFLICT");

    let customers = app.repos.customers.list(&CustomerFilters::default()).await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].email, "ana@test.com");
}

#[tokio::test]
async fn test_invalid_status_is_rejected_without_mutation() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("1111-AAA").await;
    let cookie = app.login(MANAGER_EMAIL).await;
    let created = app
        .post("/bookings", booking(vehicle.id, "ana@test.com", "2025-01-10", "2025-01-15"), None)
        .await;
    let id = created.body["rental"]["id"].as_str().unwrap().to_string();

    let rejected = app
        .patch(&format!("/rentals/{}/status", id), json!({ "status": "returned" }), Some(&cookie))
        .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);

    let payment = app
        .patch(&format!("/rentals/{}/payment-status", id), json!({ "paymentStatus": "partial" }), Some(&cookie))
        .await;
    assert_eq!(payment.status, StatusCode::BAD_REQUEST);

    let detail = app.get(&format!("/rentals/{}", id), Some(&cookie)).await;
    assert_eq!(detail.body["rental"]["status"], "pending");
    assert_eq!(detail.body["rental"]["paymentStatus"], "pending");

    let missing = app
        .patch(&format!("/rentals/{}/status", Uuid::new_v4()), json!({ "status": "active" }), Some(&cookie))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_payment_status_returns_joined_summaries() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("1111-AAA").await;
    let cookie = app.login(MANAGER_EMAIL).await;
    let created = app
        .post("/bookings", booking(vehicle.id, "ana@test.com", "2025-01-10", "2025-01-15"), None)
        .await;
    let id = created.body["rental"]["id"].as_str().unwrap().to_string();

    let paid = app
        .patch(&format!("/rentals/{}/payment-status", id), json!({ "paymentStatus": "paid" }), Some(&cookie))
        .await;
    assert_eq!(paid.status, StatusCode::OK);
    assert_eq!(paid.body["rental"]["paymentStatus"], "paid");
    assert_eq!(paid.body["rental"]["customer"]["email"], "ana@test.com");
    assert_eq!(paid.body["rental"]["vehicle"]["name"], "Toyota Corolla");
    assert_eq!(paid.body["rental"]["vehicle"]["price"], 55.0);
}

#[tokio::test]
async fn test_bulk_delete() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("1111-AAA").await;
    let cookie = app.login(MANAGER_EMAIL).await;
    let created = app
        .post("/bookings", booking(vehicle.id, "ana@test.com", "2025-01-10", "2025-01-15"), None)
        .await;
    let id = created.body["rental"]["id"].as_str().unwrap().to_string();

    let empty = app
        .post("/rentals/bulk-delete", json!({ "rentalIds": [] }), Some(&cookie))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let missing = app.post("/rentals/bulk-delete", json!({}), Some(&cookie)).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let mixed = app
        .post(
            "/rentals/bulk-delete",
            json!({ "rentalIds": [id, Uuid::new_v4().to_string()] }),
            Some(&cookie),
        )
        .await;
    assert_eq!(mixed.status, StatusCode::OK);
    assert_eq!(mixed.body["deletedCount"], 1);

    let none_left = app
        .post("/rentals/bulk-delete", json!({ "rentalIds": [Uuid::new_v4()] }), Some(&cookie))
        .await;
    assert_eq!(none_left.body["deletedCount"], 0);
}

#[tokio::test]
async fn test_booking_after_bulk_delete_gets_fresh_identifier() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("1111-AAA").await;
    let cookie = app.login(MANAGER_EMAIL).await;

    let mut ids = Vec::new();
    for day in 1..=10 {
        let date = format!("2025-03-{:02}", day);
        let created = app
            .post("/bookings", booking(vehicle.id, "ana@test.com", &date, &date), None)
            .await;
        assert_eq!(created.status, StatusCode::OK);
        ids.push(created.body["rental"]["id"].as_str().unwrap().to_string());
    }

    let deleted = app
        .post("/rentals/bulk-delete", json!({ "rentalIds": &ids[..5] }), Some(&cookie))
        .await;
    assert_eq!(deleted.body["deletedCount"], 5);

    let next = app
        .post("/bookings", booking(vehicle.id, "ana@test.com", "2025-04-01", "2025-04-02"), None)
        .await;
    assert_eq!(next.status, StatusCode::OK);
    assert_eq!(next.body["rentalId"], "RNT-0011");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new().await;
    let response = app
        .post("/auth/login", json!({ "email": MANAGER_EMAIL, "password": common::PASSWORD }), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["email"], MANAGER_EMAIL);
    assert_eq!(response.body["user"]["role"], "manager");
    assert!(response.body["user"].get("passwordHash").is_none());

    let set_cookie = response.headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("session_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=604800"));

    let cookie = response.session_cookie().unwrap();
    let session = app.get("/auth/session", Some(&cookie)).await;
    assert_eq!(session.body["authenticated"], true);
    assert_eq!(session.body["user"]["email"], MANAGER_EMAIL);
}

#[tokio::test]
async fn test_login_failures_have_identical_shape() {
    let app = TestApp::new().await;
    let wrong_password = app
        .post("/auth/login", json!({ "email": MANAGER_EMAIL, "password": "nope" }), None)
        .await;
    let unknown_email = app
        .post("/auth/login", json!({ "email": "ghost@agency.test", "password": "nope" }), None)
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert!(wrong_password.headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_logout_and_anonymous_session() {
    let app = TestApp::new().await;
    let logout = app.request(Method::POST, "/auth/logout", None, None).await;
    assert_eq!(logout.status, StatusCode::OK);
    let set_cookie = logout.headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.contains("Max-Age=0"));

    let anonymous = app.get("/auth/session", Some("session_token=forged")).await;
    assert_eq!(anonymous.body["authenticated"], false);
    assert!(anonymous.body["user"].is_null());
}

#[tokio::test]
async fn test_login_rate_limit() {
    let mut config = EnvironmentConfig::development();
    config.rate_limit_requests = 2;
    let app = TestApp::with_config(config).await;

    for _ in 0..2 {
        let response = app
            .post("/auth/login", json!({ "email": MANAGER_EMAIL, "password": "nope" }), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
    let limited = app
        .post("/auth/login", json!({ "email": MANAGER_EMAIL, "password": "nope" }), None)
        .await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let app = TestApp::new().await;

    let anonymous = app.get("/rentals", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let forged = app.get("/customers", Some("session_token=forged")).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let cookie = app.login(MANAGER_EMAIL).await;
    let token = cookie.trim_start_matches("session_token=").to_string();
    let bearer = app
        .request_with_headers(
            Method::GET,
            "/customers",
            None,
            vec![(header::AUTHORIZATION, format!("Bearer {}", token))],
        )
        .await;
    assert_eq!(bearer.status, StatusCode::OK);

    let listed = app.get("/rentals", Some(&cookie)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["rentals"], json!([]));
}

#[tokio::test]
async fn test_vehicle_management_is_admin_only() {
    let app = TestApp::new().await;
    let new_vehicle = json!({
        "name": "Ford Transit",
        "category": "van",
        "plateNumber": "9999-ZZZ",
        "price": 95.5
    });

    let manager = app.login(MANAGER_EMAIL).await;
    let forbidden = app.post("/vehicles", new_vehicle.clone(), Some(&manager)).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let admin = app.login(ADMIN_EMAIL).await;
    let created = app.post("/vehicles", new_vehicle.clone(), Some(&admin)).await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["data"]["plateNumber"], "9999-ZZZ");
    assert_eq!(created.body["data"]["status"], "available");

    let duplicate = app.post("/vehicles", new_vehicle, Some(&admin)).await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);

    let public = app.get("/vehicles", None).await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_booking_fires_notifications() {
    let app = TestApp::new().await;
    let vehicle = app.seed_vehicle("1111-AAA").await;
    let cookie = app.login(MANAGER_EMAIL).await;

    app.post("/bookings", booking(vehicle.id, "ana@test.com", "2025-01-10", "2025-01-15"), None)
        .await;

    // Las notificaciones se crean en segundo plano
    let mut notifications = json!([]);
    for _ in 0..50 {
        let response = app.get("/notifications", Some(&cookie)).await;
        notifications = response.body["notifications"].clone();
        if notifications.as_array().map_or(0, Vec::len) >= 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let types: Vec<&str> = notifications
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["type"].as_str())
        .collect();
    assert!(types.contains(&"rental"));
    assert!(types.contains(&"customer"));

    let read_all = app.post("/notifications/read-all", json!({}), Some(&cookie)).await;
    assert_eq!(read_all.body["updatedCount"], 2);
}
