//! Organizer dashboard routes under `/api/stages`, kept for older clients.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::bookings::{booking_responses, BookingResponse};
use crate::handlers::extract::{AppJson, AppQuery};
use crate::handlers::packages::PackageResponse;
use crate::services::bookings;
use crate::services::packages::{self, NewPackage, PackageFilter};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePackageRequest {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub organizer_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageOrganizerQuery {
    pub organizer_id: i32,
}

pub async fn create_stage_package(
    State(state): State<AppState>,
    AppJson(payload): AppJson<StagePackageRequest>,
) -> AppResult<(StatusCode, Json<PackageResponse>)> {
    if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Title and description are required".to_string(),
        ));
    }

    let created = packages::create(
        &state.db,
        &state.config.upload_dir,
        NewPackage {
            title: payload.title,
            description: payload.description,
            price: payload.price,
            image_url: payload.image_url,
            organizer_id: payload.organizer_id,
        },
        None,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(PackageResponse::new(created, &state.config.backend_url)),
    ))
}

pub async fn stage_packages(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<StageOrganizerQuery>,
) -> AppResult<Json<Vec<PackageResponse>>> {
    let packages = packages::list(&state.db, PackageFilter::by_organizer(Some(query.organizer_id))).await?;

    Ok(Json(
        packages
            .into_iter()
            .map(|p| PackageResponse::new(p, &state.config.backend_url))
            .collect(),
    ))
}

pub async fn stage_customers(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<StageOrganizerQuery>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let bookings = bookings::list_by_organizer(&state.db, query.organizer_id).await?;
    Ok(Json(booking_responses(&state, bookings).await?))
}
