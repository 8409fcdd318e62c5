use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::auth::UserInfo;
use crate::handlers::extract::{AppPath, AppQuery};
use crate::services::customers;
use crate::services::packages::{self, NewPackage, PackageFilter, PackageWithOrganizers, UploadedImage};
use crate::utils::upload::absolute_image_url;
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub organizers: Vec<UserInfo>,
}

impl PackageResponse {
    pub fn new((package, organizers): PackageWithOrganizers, backend_url: &str) -> Self {
        Self {
            id: package.id,
            title: package.title,
            description: package.description,
            price: package.price,
            image_url: package
                .image_url
                .map(|url| absolute_image_url(backend_url, &url)),
            organizers: organizers.into_iter().map(UserInfo::from).collect(),
        }
    }
}

fn to_responses(state: &AppState, packages: Vec<PackageWithOrganizers>) -> Vec<PackageResponse> {
    packages
        .into_iter()
        .map(|p| PackageResponse::new(p, &state.config.backend_url))
        .collect()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerQuery {
    pub organizer_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub organizer_id: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageOrganizersQuery {
    pub package_id: Option<i32>,
}

/// List packages, optionally only those run by `organizerId`
pub async fn list_packages(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<OrganizerQuery>,
) -> AppResult<Json<Vec<PackageResponse>>> {
    let packages = packages::list(&state.db, PackageFilter::by_organizer(query.organizer_id)).await?;
    Ok(Json(to_responses(&state, packages)))
}

/// List every package
pub async fn list_all_packages(State(state): State<AppState>) -> AppResult<Json<Vec<PackageResponse>>> {
    let packages = packages::list(&state.db, PackageFilter::default()).await?;
    Ok(Json(to_responses(&state, packages)))
}

/// Filter packages by organizer and/or price range
pub async fn filter_packages(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<FilterQuery>,
) -> AppResult<Json<Vec<PackageResponse>>> {
    let filter = PackageFilter {
        organizer_id: query.organizer_id,
        min_price: query.min_price,
        max_price: query.max_price,
    };

    let packages = packages::list(&state.db, filter).await?;
    Ok(Json(to_responses(&state, packages)))
}

/// Multipart fields accepted by `POST /api/packages`
#[derive(Debug, Default)]
pub struct PackageForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<String>,
    pub image: Option<UploadedImage>,
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::BadRequest(format!("Field '{}' is required", field))),
    }
}

impl PackageForm {
    pub fn into_parts(self) -> AppResult<(NewPackage, Option<UploadedImage>)> {
        let title = required(self.name, "name")?;
        let price = required(self.price, "price")?;
        let description = required(self.description, "description")?;
        let user_id = required(self.user_id, "userId")?;

        let price: f64 = price
            .parse()
            .ok()
            .filter(|p: &f64| p.is_finite())
            .ok_or_else(|| AppError::BadRequest("Field 'price' must be a number".to_string()))?;
        let organizer_id: i32 = user_id
            .parse()
            .map_err(|_| AppError::BadRequest("Field 'userId' must be an integer".to_string()))?;

        Ok((
            NewPackage {
                title,
                description,
                price: Some(price),
                image_url: None,
                organizer_id,
            },
            self.image,
        ))
    }
}

async fn read_form(mut multipart: Multipart) -> AppResult<PackageForm> {
    let mut form = PackageForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read image: {}", e)))?;

            // Browsers send an empty part when no file is chosen
            if !bytes.is_empty() {
                form.image = Some(UploadedImage {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read field '{}': {}", name, e)))?;

        match name.as_str() {
            "name" => form.name = Some(value),
            "price" => form.price = Some(value),
            "description" => form.description = Some(value),
            "userId" => form.user_id = Some(value),
            _ => tracing::debug!(field = %name, "Ignoring unknown package form field"),
        }
    }

    Ok(form)
}

/// Create a package from a multipart form with an optional image
pub async fn create_package(
    State(state): State<AppState>,
    WithRejection(multipart, _): WithRejection<Multipart, AppError>,
) -> AppResult<(StatusCode, Json<PackageResponse>)> {
    let (new_package, image) = read_form(multipart).await?.into_parts()?;
    let created = packages::create(&state.db, &state.config.upload_dir, new_package, image).await?;

    Ok((
        StatusCode::CREATED,
        Json(PackageResponse::new(created, &state.config.backend_url)),
    ))
}

/// Attach an organizer to a package
pub async fn add_organizer(
    State(state): State<AppState>,
    AppPath((package_id, organizer_id)): AppPath<(i32, i32)>,
) -> AppResult<Json<PackageResponse>> {
    let updated = packages::add_organizer(&state.db, package_id, organizer_id).await?;
    Ok(Json(PackageResponse::new(updated, &state.config.backend_url)))
}

/// Detach an organizer from a package
pub async fn remove_organizer(
    State(state): State<AppState>,
    AppPath((package_id, organizer_id)): AppPath<(i32, i32)>,
) -> AppResult<Json<PackageResponse>> {
    let updated = packages::remove_organizer(&state.db, package_id, organizer_id).await?;
    Ok(Json(PackageResponse::new(updated, &state.config.backend_url)))
}

/// Delete a package
pub async fn delete_package(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<serde_json::Value>> {
    packages::delete(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "message": "Package deleted" })))
}

/// Organizers of one package, or every organizer when no package is given
pub async fn list_package_organizers(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PackageOrganizersQuery>,
) -> AppResult<Json<Vec<UserInfo>>> {
    let organizers = match query.package_id {
        Some(package_id) => packages::find_one(&state.db, package_id).await?.1,
        None => customers::list_organizers(&state.db).await?,
    };

    Ok(Json(organizers.into_iter().map(UserInfo::from).collect()))
}
