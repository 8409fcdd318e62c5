use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "decoration_package")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::package_organizer::Entity")]
    PackageOrganizers,
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::package_organizer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PackageOrganizers.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

/// Organizers of this package, through the membership table.
impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::package_organizer::Relation::Organizer.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::package_organizer::Relation::Package.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
