use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::extract::AppJson;
use crate::services::mail::MailMessage;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub from_email: Option<String>,
    pub from_name: Option<String>,
    pub from_mobile: Option<String>,
    pub message: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Format a contact inquiry for the inbox.
pub fn contact_message(inbox: &str, request: &ContactRequest) -> AppResult<MailMessage> {
    let (Some(email), Some(name), Some(message)) = (
        present(&request.from_email),
        present(&request.from_name),
        present(&request.message),
    ) else {
        return Err(AppError::BadRequest(
            "Please fill in all required fields".to_string(),
        ));
    };

    let mobile = present(&request.from_mobile).unwrap_or("N/A");

    Ok(MailMessage {
        to: inbox.to_string(),
        subject: format!("New Contact Inquiry from {}", name),
        text: format!(
            "Name: {}\nEmail: {}\nMobile: {}\n\nMessage: {}",
            name, email, mobile, message
        ),
    })
}

/// Forward a contact form inquiry by email
pub async fn send_email(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ContactRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let message = contact_message(&state.config.mail.contact_inbox, &payload)?;
    state.mailer.send(message).await?;

    Ok(Json(serde_json::json!({ "message": "Email sent successfully" })))
}
