use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::entities::{booking, user};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::UserInfo;
use crate::handlers::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::packages::PackageResponse;
use crate::services::bookings::{self, NewBooking};
use crate::services::packages;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub customer_id: i32,
    pub package_id: i32,
    pub organizer_id: i32,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingQuery {
    pub customer_id: i32,
    pub package_id: i32,
    pub organizer_id: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i32,
    pub customer: UserInfo,
    pub decoration_package: PackageResponse,
    pub organizer: UserInfo,
    pub contact_number: String,
    pub location: String,
    pub day: String,
    pub time: String,
    pub booking_time: DateTime<Utc>,
}

/// Resolve the people and packages a set of bookings point at.
pub async fn booking_responses(
    state: &AppState,
    bookings: Vec<booking::Model>,
) -> AppResult<Vec<BookingResponse>> {
    if bookings.is_empty() {
        return Ok(Vec::new());
    }

    let mut user_ids: Vec<i32> = bookings
        .iter()
        .flat_map(|b| [b.customer_id, b.organizer_id])
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let mut package_ids: Vec<i32> = bookings.iter().map(|b| b.package_id).collect();
    package_ids.sort_unstable();
    package_ids.dedup();

    let users: HashMap<i32, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let packages: HashMap<i32, PackageResponse> = packages::find_many(&state.db, package_ids)
        .await?
        .into_iter()
        .map(|p| (p.0.id, PackageResponse::new(p, &state.config.backend_url)))
        .collect();

    let responses = bookings
        .into_iter()
        .filter_map(|b| {
            let customer = users.get(&b.customer_id)?;
            let organizer = users.get(&b.organizer_id)?;
            let package = packages.get(&b.package_id)?;

            Some(BookingResponse {
                id: b.id,
                customer: customer.clone().into(),
                decoration_package: package.clone(),
                organizer: organizer.clone().into(),
                contact_number: b.contact_number,
                location: b.location,
                day: b.day,
                time: b.time,
                booking_time: b.booking_time.with_timezone(&Utc),
            })
        })
        .collect();

    Ok(responses)
}

/// Create a booking
pub async fn create_booking(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let booking = bookings::create(
        &state.db,
        NewBooking {
            customer_id: payload.customer_id,
            package_id: payload.package_id,
            organizer_id: payload.organizer_id,
            contact_number: payload.contact_number,
            location: payload.location,
            day: payload.day,
            time: payload.time,
        },
    )
    .await?;

    let response = booking_responses(&state, vec![booking])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("Booking references vanished".to_string()))?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Cancel a booking by customer, package and optionally organizer
pub async fn cancel_booking(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CancelBookingQuery>,
) -> AppResult<Json<serde_json::Value>> {
    bookings::cancel(&state.db, query.customer_id, query.package_id, query.organizer_id).await?;
    Ok(Json(serde_json::json!({ "message": "Booking canceled successfully" })))
}

/// Bookings received by an organizer
pub async fn organizer_bookings(
    State(state): State<AppState>,
    AppPath(organizer_id): AppPath<i32>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let bookings = bookings::list_by_organizer(&state.db, organizer_id).await?;
    Ok(Json(booking_responses(&state, bookings).await?))
}

/// Bookings made by a customer
pub async fn customer_bookings(
    State(state): State<AppState>,
    AppPath(customer_id): AppPath<i32>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let bookings = bookings::list_by_customer(&state.db, customer_id).await?;
    Ok(Json(booking_responses(&state, bookings).await?))
}
