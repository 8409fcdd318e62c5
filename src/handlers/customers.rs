use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::auth::UserInfo;
use crate::handlers::extract::AppQuery;
use crate::services::customers;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedCustomersQuery {
    pub organizer_id: i32,
}

/// Customers who have booked with an organizer
pub async fn booked_customers(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BookedCustomersQuery>,
) -> AppResult<Json<Vec<UserInfo>>> {
    let customers = customers::booked_customers(&state.db, query.organizer_id).await?;
    Ok(Json(customers.into_iter().map(UserInfo::from).collect()))
}

/// All organizer accounts
pub async fn list_organizers(State(state): State<AppState>) -> AppResult<Json<Vec<UserInfo>>> {
    let organizers = customers::list_organizers(&state.db).await?;
    Ok(Json(organizers.into_iter().map(UserInfo::from).collect()))
}
