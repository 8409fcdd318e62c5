#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use decoration_backend::config::{Config, MailConfig};
use decoration_backend::services::mail::{MailMessage, Mailer};
use decoration_backend::{db, routes, AppResult, AppState};

pub const BACKEND_URL: &str = "http://localhost:8080";
pub const CONTACT_INBOX: &str = "inbox@example.com";

static APP_COUNTER: AtomicUsize = AtomicUsize::new(0);

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<MailMessage>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub mailer: Arc<RecordingMailer>,
    pub upload_dir: PathBuf,
}

pub async fn spawn_app() -> TestApp {
    let db = db::connect_url("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let upload_dir = std::env::temp_dir().join(format!(
        "decoration-tests-{}-{}",
        std::process::id(),
        APP_COUNTER.fetch_add(1, Ordering::SeqCst)
    ));

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_expiration_hours: 1,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        upload_dir: upload_dir.to_string_lossy().to_string(),
        backend_url: BACKEND_URL.to_string(),
        mail: MailConfig {
            contact_inbox: CONTACT_INBOX.to_string(),
            from_address: "no-reply@example.com".to_string(),
            api_url: None,
            api_key: None,
        },
    };

    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState {
        db: db.clone(),
        config,
        mailer: mailer.clone(),
    };

    TestApp {
        router: routes::create_router(state),
        db,
        mailer,
        upload_dir,
    }
}

async fn read_body(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    if bytes.is_empty() {
        return (status, Value::Null);
    }

    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()));
    (status, value)
}

impl TestApp {
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        read_body(self.router.clone().oneshot(request).await.unwrap()).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn get_with_token(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        read_body(self.router.clone().oneshot(request).await.unwrap()).await
    }

    pub async fn multipart(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        image: Option<(&str, &[u8])>,
    ) -> (StatusCode, Value) {
        let boundary = "decoration-test-boundary";
        let mut body: Vec<u8> = Vec::new();

        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }

        if let Some((file_name, bytes)) = image {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        read_body(self.router.clone().oneshot(request).await.unwrap()).await
    }

    /// Register a user and return its id
    pub async fn register(&self, name: &str, email: &str, role: &str) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/register",
                Some(json!({
                    "name": name,
                    "email": email,
                    "password": "secret-pass",
                    "phoneNumber": "555-0100",
                    "role": role,
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["user"]["id"].as_i64().unwrap()
    }

    /// Create a package through the JSON stages route, which allows a null price
    pub async fn create_package(&self, organizer_id: i64, title: &str, price: Option<f64>) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/stages/packages",
                Some(json!({
                    "title": title,
                    "description": format!("{} decor", title),
                    "price": price,
                    "organizerId": organizer_id,
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "create package failed: {}", body);
        body["id"].as_i64().unwrap()
    }

    pub async fn book(&self, customer_id: i64, package_id: i64, organizer_id: i64) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/api/bookings",
            Some(json!({
                "customerId": customer_id,
                "packageId": package_id,
                "organizerId": organizer_id,
                "contactNumber": "555-0199",
                "location": "Town Hall",
                "day": "Saturday",
                "time": "18:00",
            })),
        )
        .await
    }
}

pub fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}
