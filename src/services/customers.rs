use std::collections::BTreeSet;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::user::{self, UserRole};
use crate::error::AppResult;
use crate::services::bookings;

/// Distinct customers who hold at least one booking with the organizer.
pub async fn booked_customers(db: &DatabaseConnection, organizer_id: i32) -> AppResult<Vec<user::Model>> {
    let customer_ids: BTreeSet<i32> = bookings::list_by_organizer(db, organizer_id)
        .await?
        .into_iter()
        .map(|b| b.customer_id)
        .collect();

    if customer_ids.is_empty() {
        return Ok(Vec::new());
    }

    Ok(user::Entity::find()
        .filter(user::Column::Id.is_in(customer_ids))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?)
}

pub async fn list_organizers(db: &DatabaseConnection) -> AppResult<Vec<user::Model>> {
    Ok(user::Entity::find()
        .filter(user::Column::Role.eq(UserRole::Organizer))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?)
}
