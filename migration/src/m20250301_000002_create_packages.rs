use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DecorationPackage::Table)
                    .if_not_exists()
                    .col(pk_auto(DecorationPackage::Id))
                    .col(string_len(DecorationPackage::Title, 255).not_null())
                    .col(text(DecorationPackage::Description).not_null())
                    .col(double_null(DecorationPackage::Price))
                    .col(string_len_null(DecorationPackage::ImageUrl, 512))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DecorationPackage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DecorationPackage {
    Table,
    Id,
    Title,
    Description,
    Price,
    ImageUrl,
}
