use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

use crate::entities::{package, package_organizer, user};
use crate::error::{AppError, AppResult};
use crate::services::auth::find_user;
use crate::utils::upload::store_image;
use crate::utils::validate::{check_len, MAX_IMAGE_URL_LEN, MAX_TEXT_LEN};

/// A package together with its current organizers.
pub type PackageWithOrganizers = (package::Model, Vec<user::Model>);

#[derive(Debug, Clone)]
pub struct NewPackage {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub organizer_id: i32,
}

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Optional listing constraints, combined with AND.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PackageFilter {
    pub organizer_id: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl PackageFilter {
    pub fn by_organizer(organizer_id: Option<i32>) -> Self {
        Self {
            organizer_id,
            ..Default::default()
        }
    }

    pub fn matches(&self, package: &package::Model, organizers: &[user::Model]) -> bool {
        if let Some(organizer_id) = self.organizer_id {
            if !organizers.iter().any(|o| o.id == organizer_id) {
                return false;
            }
        }

        // An unpriced package never satisfies a price bound
        if let Some(min) = self.min_price {
            if !package.price.is_some_and(|p| p >= min) {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if !package.price.is_some_and(|p| p <= max) {
                return false;
            }
        }

        true
    }
}

/// Order packages and each organizer list by id.
fn sorted(mut packages: Vec<PackageWithOrganizers>) -> Vec<PackageWithOrganizers> {
    packages.sort_by_key(|(p, _)| p.id);
    for (_, organizers) in packages.iter_mut() {
        organizers.sort_by_key(|o| o.id);
    }
    packages
}

pub async fn list(db: &DatabaseConnection, filter: PackageFilter) -> AppResult<Vec<PackageWithOrganizers>> {
    let packages = package::Entity::find()
        .find_with_related(user::Entity)
        .all(db)
        .await?;

    Ok(sorted(packages)
        .into_iter()
        .filter(|(p, organizers)| filter.matches(p, organizers))
        .collect())
}

pub async fn find_one(db: &DatabaseConnection, id: i32) -> AppResult<PackageWithOrganizers> {
    let found = package::Entity::find_by_id(id)
        .find_with_related(user::Entity)
        .all(db)
        .await?;

    sorted(found)
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound("Package not found".to_string()))
}

pub async fn find_many(db: &DatabaseConnection, ids: Vec<i32>) -> AppResult<Vec<PackageWithOrganizers>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let found = package::Entity::find()
        .filter(package::Column::Id.is_in(ids))
        .find_with_related(user::Entity)
        .all(db)
        .await?;

    Ok(sorted(found))
}

async fn require_organizer(db: &DatabaseConnection, user_id: i32) -> AppResult<user::Model> {
    let user = find_user(db, user_id, "User").await?;
    if !user.is_organizer() {
        return Err(AppError::BadRequest("User is not an organizer".to_string()));
    }
    Ok(user)
}

/// Create a package owned by `new_package.organizer_id`.
///
/// The image, when given, is written before the database insert and is not
/// removed if the insert fails.
pub async fn create(
    db: &DatabaseConnection,
    upload_dir: &str,
    mut new_package: NewPackage,
    image: Option<UploadedImage>,
) -> AppResult<PackageWithOrganizers> {
    check_len("title", &new_package.title, MAX_TEXT_LEN)?;
    if let Some(image_url) = &new_package.image_url {
        check_len("imageUrl", image_url, MAX_IMAGE_URL_LEN)?;
    }

    let organizer = require_organizer(db, new_package.organizer_id).await?;

    if let Some(image) = image {
        new_package.image_url = Some(store_image(upload_dir, &image.file_name, &image.bytes).await?);
    }

    let txn = db.begin().await?;

    let package = package::ActiveModel {
        title: Set(new_package.title),
        description: Set(new_package.description),
        price: Set(new_package.price),
        image_url: Set(new_package.image_url),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    package_organizer::Entity::insert(package_organizer::ActiveModel {
        package_id: Set(package.id),
        organizer_id: Set(organizer.id),
    })
    .exec_without_returning(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(package_id = package.id, organizer_id = organizer.id, "Package created");
    Ok((package, vec![organizer]))
}

/// Attach an organizer to a package. Attaching an existing member is a no-op.
pub async fn add_organizer(
    db: &DatabaseConnection,
    package_id: i32,
    user_id: i32,
) -> AppResult<PackageWithOrganizers> {
    find_one(db, package_id).await?;
    let organizer = require_organizer(db, user_id).await?;

    let inserted = package_organizer::Entity::insert(package_organizer::ActiveModel {
        package_id: Set(package_id),
        organizer_id: Set(organizer.id),
    })
    .on_conflict(
        OnConflict::columns([
            package_organizer::Column::PackageId,
            package_organizer::Column::OrganizerId,
        ])
        .do_nothing()
        .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    if inserted > 0 {
        tracing::info!(package_id, organizer_id = organizer.id, "Organizer added to package");
    }

    find_one(db, package_id).await
}

pub async fn remove_organizer(
    db: &DatabaseConnection,
    package_id: i32,
    user_id: i32,
) -> AppResult<PackageWithOrganizers> {
    find_one(db, package_id).await?;
    find_user(db, user_id, "User").await?;

    let result = package_organizer::Entity::delete_many()
        .filter(package_organizer::Column::PackageId.eq(package_id))
        .filter(package_organizer::Column::OrganizerId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        tracing::info!(package_id, organizer_id = user_id, "Organizer removed from package");
    }

    find_one(db, package_id).await
}

/// Delete a package by id. Missing ids are not an error.
pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
    let result = package::Entity::delete_by_id(id).exec(db).await?;
    tracing::info!(package_id = id, deleted = result.rows_affected, "Package delete");
    Ok(())
}
