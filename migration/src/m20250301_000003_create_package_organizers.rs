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
                    .table(PackageOrganizer::Table)
                    .if_not_exists()
                    .col(integer(PackageOrganizer::PackageId).not_null())
                    .col(integer(PackageOrganizer::OrganizerId).not_null())
                    .primary_key(
                        Index::create()
                            .col(PackageOrganizer::PackageId)
                            .col(PackageOrganizer::OrganizerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_package_organizer_package")
                            .from(PackageOrganizer::Table, PackageOrganizer::PackageId)
                            .to(DecorationPackage::Table, DecorationPackage::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_package_organizer_user")
                            .from(PackageOrganizer::Table, PackageOrganizer::OrganizerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PackageOrganizer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PackageOrganizer {
    Table,
    PackageId,
    OrganizerId,
}
