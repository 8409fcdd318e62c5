use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[sea_orm(string_value = "CUSTOMER")]
    Customer,
    #[sea_orm(string_value = "ORGANIZER")]
    Organizer,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn is_organizer(&self) -> bool {
        self.role == UserRole::Organizer
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::package_organizer::Entity")]
    PackageOrganizers,
}

impl Related<super::package_organizer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PackageOrganizers.def()
    }
}

/// Packages this user organizes, through the membership table.
impl Related<super::package::Entity> for Entity {
    fn to() -> RelationDef {
        super::package_organizer::Relation::Package.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::package_organizer::Relation::Organizer.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
