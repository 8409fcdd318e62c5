mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{ids, spawn_app, TestApp};

struct Fixture {
    customer: i64,
    organizer: i64,
    package: i64,
}

async fn fixture(app: &TestApp) -> Fixture {
    let customer = app.register("Ravi", "ravi@example.com", "CUSTOMER").await;
    let organizer = app.register("Maya", "maya@example.com", "ORGANIZER").await;
    let package = app.create_package(organizer, "Floral Arch", Some(120.0)).await;

    Fixture {
        customer,
        organizer,
        package,
    }
}

#[tokio::test]
async fn test_create_booking() {
    let app = spawn_app().await;
    let f = fixture(&app).await;

    let (status, body) = app.book(f.customer, f.package, f.organizer).await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["customer"]["id"], f.customer);
    assert_eq!(body["organizer"]["id"], f.organizer);
    assert_eq!(body["decorationPackage"]["id"], f.package);
    assert_eq!(body["location"], "Town Hall");
    assert_eq!(body["day"], "Saturday");
    assert_eq!(body["time"], "18:00");
    assert!(body["bookingTime"].is_string());
}

#[tokio::test]
async fn test_duplicate_booking_rejected() {
    let app = spawn_app().await;
    let f = fixture(&app).await;

    let (status, _) = app.book(f.customer, f.package, f.organizer).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.book(f.customer, f.package, f.organizer).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Package already booked with this organizer");

    let (_, bookings) = app
        .get(&format!("/api/bookings/customer/{}", f.customer))
        .await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_same_package_with_another_organizer_is_allowed() {
    let app = spawn_app().await;
    let f = fixture(&app).await;
    let second = app.register("Ana", "ana@example.com", "ORGANIZER").await;
    app.request(
        "POST",
        &format!("/api/packages/{}/organizers/{}", f.package, second),
        None,
    )
    .await;

    let (status, _) = app.book(f.customer, f.package, f.organizer).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.book(f.customer, f.package, second).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_booking_with_organizer_not_on_package() {
    let app = spawn_app().await;
    let f = fixture(&app).await;
    let outsider = app.register("Ana", "ana@example.com", "ORGANIZER").await;

    let (status, body) = app.book(f.customer, f.package, outsider).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Selected organizer is not managing this package");
}

#[tokio::test]
async fn test_booking_with_unknown_references() {
    let app = spawn_app().await;
    let f = fixture(&app).await;

    let (status, body) = app.book(999, f.package, f.organizer).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Customer not found");

    let (status, body) = app.book(f.customer, 999, f.organizer).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Package not found");

    let (status, body) = app.book(f.customer, f.package, 999).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Organizer not found");
}

#[tokio::test]
async fn test_cancel_booking() {
    let app = spawn_app().await;
    let f = fixture(&app).await;
    app.book(f.customer, f.package, f.organizer).await;

    let uri = format!(
        "/api/bookings?customerId={}&packageId={}&organizerId={}",
        f.customer, f.package, f.organizer
    );
    let (status, body) = app.request("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking canceled successfully");

    let (status, body) = app.request("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Booking not found");
}

#[tokio::test]
async fn test_cancel_without_organizer_matches_any() {
    let app = spawn_app().await;
    let f = fixture(&app).await;
    app.book(f.customer, f.package, f.organizer).await;

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/bookings?customerId={}&packageId={}", f.customer, f.package),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, bookings) = app
        .get(&format!("/api/bookings/organizer/{}", f.organizer))
        .await;
    assert!(bookings.as_array().unwrap().is_empty());

    // The slot is free again
    let (status, _) = app.book(f.customer, f.package, f.organizer).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_booking_listings_and_booked_customers() {
    let app = spawn_app().await;
    let f = fixture(&app).await;
    let second_customer = app.register("Lee", "lee@example.com", "CUSTOMER").await;
    let second_package = app.create_package(f.organizer, "Balloon Wall", Some(60.0)).await;

    app.book(f.customer, f.package, f.organizer).await;
    app.book(f.customer, second_package, f.organizer).await;
    app.book(second_customer, f.package, f.organizer).await;

    let (_, by_organizer) = app
        .get(&format!("/api/bookings/organizer/{}", f.organizer))
        .await;
    assert_eq!(by_organizer.as_array().unwrap().len(), 3);

    let (_, by_customer) = app
        .get(&format!("/api/bookings/customer/{}", f.customer))
        .await;
    let packages: Vec<i64> = by_customer
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["decorationPackage"]["id"].as_i64().unwrap())
        .collect();
    assert_eq!(packages, vec![f.package, second_package]);

    // Each customer once, even with several bookings
    let (status, customers) = app
        .get(&format!("/api/customers/booked-customers?organizerId={}", f.organizer))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&customers), vec![f.customer, second_customer]);

    let (_, stage_customers) = app
        .get(&format!("/api/stages/customers?organizerId={}", f.organizer))
        .await;
    assert_eq!(stage_customers.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_deleting_package_drops_its_bookings() {
    let app = spawn_app().await;
    let f = fixture(&app).await;
    app.book(f.customer, f.package, f.organizer).await;

    app.request("DELETE", &format!("/api/packages/{}", f.package), None)
        .await;

    let (status, bookings) = app
        .get(&format!("/api/bookings/customer/{}", f.customer))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(bookings.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_identical_bookings_yield_one() {
    let app = spawn_app().await;
    let f = fixture(&app).await;

    let (first, second) = tokio::join!(
        app.book(f.customer, f.package, f.organizer),
        app.book(f.customer, f.package, f.organizer),
    );

    let mut statuses = vec![first.0.as_u16(), second.0.as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, vec![201, 409]);

    let (_, bookings) = app
        .get(&format!("/api/bookings/customer/{}", f.customer))
        .await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_overlong_fields_are_rejected() {
    let app = spawn_app().await;
    let f = fixture(&app).await;

    let (status, body) = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "customerId": f.customer,
                "packageId": f.package,
                "organizerId": f.organizer,
                "contactNumber": "5".repeat(256),
                "location": "Town Hall",
                "day": "Saturday",
                "time": "18:00",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Field 'contactNumber' must be at most 255 characters");

    let (_, bookings) = app
        .get(&format!("/api/bookings/customer/{}", f.customer))
        .await;
    assert!(bookings.as_array().unwrap().is_empty());

    // Exactly at the column width is fine
    let (status, _) = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "customerId": f.customer,
                "packageId": f.package,
                "organizerId": f.organizer,
                "contactNumber": "5".repeat(255),
                "location": "l".repeat(255),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let app = spawn_app().await;
    let f = fixture(&app).await;

    // Missing customerId in the body
    let (status, body) = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({ "packageId": f.package, "organizerId": f.organizer })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("customerId"));

    let (status, body) = app
        .get("/api/customers/booked-customers?organizerId=abc")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = app.request("DELETE", "/api/bookings?packageId=1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = app.get("/api/bookings/customer/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
