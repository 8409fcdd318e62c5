use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000001_create_users::User;
use super::m20250301_000002_create_packages::DecorationPackage;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::CustomerId).not_null())
                    .col(integer(Booking::PackageId).not_null())
                    .col(integer(Booking::OrganizerId).not_null())
                    .col(string_len(Booking::ContactNumber, 255).not_null())
                    .col(string_len(Booking::Location, 255).not_null())
                    .col(string_len(Booking::Day, 255).not_null())
                    .col(string_len(Booking::Time, 255).not_null())
                    .col(timestamp_with_time_zone(Booking::BookingTime).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_customer")
                            .from(Booking::Table, Booking::CustomerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_package")
                            .from(Booking::Table, Booking::PackageId)
                            .to(DecorationPackage::Table, DecorationPackage::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_organizer")
                            .from(Booking::Table, Booking::OrganizerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One booking per (customer, package, organizer)
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_customer_package_organizer")
                    .table(Booking::Table)
                    .col(Booking::CustomerId)
                    .col(Booking::PackageId)
                    .col(Booking::OrganizerId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    CustomerId,
    PackageId,
    OrganizerId,
    ContactNumber,
    Location,
    Day,
    Time,
    BookingTime,
}
