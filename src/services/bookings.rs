use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::booking;
use crate::error::{AppError, AppResult};
use crate::services::{auth::find_user, packages};
use crate::utils::validate::{check_len, MAX_TEXT_LEN};

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: i32,
    pub package_id: i32,
    pub organizer_id: i32,
    pub contact_number: String,
    pub location: String,
    pub day: String,
    pub time: String,
}

/// Book a package with one of its organizers.
///
/// Duplicate detection is a conditional insert against the unique
/// (customer, package, organizer) index, so concurrent identical requests
/// yield exactly one booking.
pub async fn create(db: &DatabaseConnection, new_booking: NewBooking) -> AppResult<booking::Model> {
    for (field, value) in [
        ("contactNumber", &new_booking.contact_number),
        ("location", &new_booking.location),
        ("day", &new_booking.day),
        ("time", &new_booking.time),
    ] {
        check_len(field, value, MAX_TEXT_LEN)?;
    }

    let customer = find_user(db, new_booking.customer_id, "Customer").await?;
    let (package, organizers) = packages::find_one(db, new_booking.package_id).await?;
    let organizer = find_user(db, new_booking.organizer_id, "Organizer").await?;

    if !organizers.iter().any(|o| o.id == organizer.id) {
        return Err(AppError::BadRequest(
            "Selected organizer is not managing this package".to_string(),
        ));
    }

    let active = booking::ActiveModel {
        customer_id: Set(customer.id),
        package_id: Set(package.id),
        organizer_id: Set(organizer.id),
        contact_number: Set(new_booking.contact_number),
        location: Set(new_booking.location),
        day: Set(new_booking.day),
        time: Set(new_booking.time),
        booking_time: Set(Utc::now().into()),
        ..Default::default()
    };

    let inserted = booking::Entity::insert(active)
        .on_conflict(
            OnConflict::columns([
                booking::Column::CustomerId,
                booking::Column::PackageId,
                booking::Column::OrganizerId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec(db)
        .await;

    let booking_id = match inserted {
        Ok(result) => result.last_insert_id,
        Err(DbErr::RecordNotInserted) => {
            return Err(AppError::Conflict(
                "Package already booked with this organizer".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        booking_id,
        customer_id = customer.id,
        package_id = package.id,
        organizer_id = organizer.id,
        "Booking created"
    );

    booking::Entity::find_by_id(booking_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Booking {} missing after insert", booking_id)))
}

/// Cancel a customer's booking of a package.
///
/// Without `organizer_id` the first booking of the package by that customer
/// is cancelled, whichever organizer it was made with.
pub async fn cancel(
    db: &DatabaseConnection,
    customer_id: i32,
    package_id: i32,
    organizer_id: Option<i32>,
) -> AppResult<booking::Model> {
    let mut query = booking::Entity::find()
        .filter(booking::Column::CustomerId.eq(customer_id))
        .filter(booking::Column::PackageId.eq(package_id));

    if let Some(organizer_id) = organizer_id {
        query = query.filter(booking::Column::OrganizerId.eq(organizer_id));
    }

    let booking = query
        .order_by_asc(booking::Column::Id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    booking::Entity::delete_by_id(booking.id).exec(db).await?;

    tracing::info!(booking_id = booking.id, "Booking cancelled");
    Ok(booking)
}

pub async fn list_by_organizer(db: &DatabaseConnection, organizer_id: i32) -> AppResult<Vec<booking::Model>> {
    Ok(booking::Entity::find()
        .filter(booking::Column::OrganizerId.eq(organizer_id))
        .order_by_asc(booking::Column::Id)
        .all(db)
        .await?)
}

pub async fn list_by_customer(db: &DatabaseConnection, customer_id: i32) -> AppResult<Vec<booking::Model>> {
    Ok(booking::Entity::find()
        .filter(booking::Column::CustomerId.eq(customer_id))
        .order_by_asc(booking::Column::Id)
        .all(db)
        .await?)
}
