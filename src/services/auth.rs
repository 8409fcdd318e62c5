use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::user::{self, UserRole};
use crate::error::{AppError, AppResult};
use crate::utils::validate::{check_len, MAX_TEXT_LEN};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Failed to parse password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> AppResult<Option<user::Model>> {
    Ok(user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?)
}

/// Register a new user account
pub async fn register(db: &DatabaseConnection, new_user: NewUser) -> AppResult<user::Model> {
    for (field, value) in [
        ("name", &new_user.name),
        ("email", &new_user.email),
        ("password", &new_user.password),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("Field '{}' is required", field)));
        }
    }
    check_len("name", &new_user.name, MAX_TEXT_LEN)?;
    check_len("email", &new_user.email, MAX_TEXT_LEN)?;
    if let Some(phone_number) = &new_user.phone_number {
        check_len("phoneNumber", phone_number, MAX_TEXT_LEN)?;
    }

    if find_by_email(db, &new_user.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&new_user.password)?;

    let user = user::ActiveModel {
        name: Set(new_user.name),
        email: Set(new_user.email),
        password_hash: Set(password_hash),
        phone_number: Set(new_user.phone_number),
        role: Set(new_user.role),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(user_id = user.id, role = ?user.role, "User registered");
    Ok(user)
}

/// Check credentials and return the matching user
pub async fn login(db: &DatabaseConnection, email: &str, password: &str) -> AppResult<user::Model> {
    let user = find_by_email(db, email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid email or password".to_string()));
    }

    Ok(user)
}

pub async fn find_user(db: &DatabaseConnection, id: i32, label: &str) -> AppResult<user::Model> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", label)))
}
