mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{spawn_app, CONTACT_INBOX};

#[tokio::test]
async fn test_send_email_forwards_inquiry() {
    let app = spawn_app().await;

    let (status, body) = app
        .request(
            "POST",
            "/api/send-email",
            Some(json!({
                "fromEmail": "jo@example.com",
                "fromName": "Jo",
                "message": "Can you decorate a wedding stage in June?",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Email sent successfully");

    let sent = app.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, CONTACT_INBOX);
    assert_eq!(sent[0].subject, "New Contact Inquiry from Jo");
    assert!(sent[0].text.contains("Email: jo@example.com"));
    assert!(sent[0].text.contains("Mobile: N/A"));
}

#[tokio::test]
async fn test_send_email_requires_fields() {
    let app = spawn_app().await;

    let (status, body) = app
        .request(
            "POST",
            "/api/send-email",
            Some(json!({ "fromEmail": "jo@example.com", "fromMobile": "555-0101" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please fill in all required fields");
    assert!(app.mailer.sent.lock().unwrap().is_empty());
}
