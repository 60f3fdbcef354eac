use crate::api::error::AppError;
use crate::api::handlers::MessageResponse;
use crate::entities::{prelude::*, users};
use crate::utils::auth::create_jwt;
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 2, max = 50, message = "Username must be between 2 and 50 characters"))]
    pub username: String,
    pub university_id: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: String,
    pub karma_points: i32,
    pub university_id: Option<String>,
    pub university_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

async fn user_response(
    db: &sea_orm::DatabaseConnection,
    user: users::Model,
) -> Result<UserResponse, AppError> {
    let university_name = match &user.university_id {
        Some(id) => Universities::find_by_id(id)
            .one(db)
            .await?
            .map(|u| u.name),
        None => None,
    };

    Ok(UserResponse {
        id: user.id,
        email: user.email,
        username: user.username,
        role: user.role,
        karma_points: user.karma_points,
        university_id: user.university_id,
        university_name,
        created_at: user.created_at,
    })
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if !payload.password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(
            "Password must contain at least one digit".to_string(),
        ));
    }

    // Emails are unique case-insensitively; normalize before any lookup
    let email = payload.email.trim().to_lowercase();

    let existing = Users::find()
        .filter(users::Column::Email.eq(&email))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "This email is already registered".to_string(),
        ));
    }

    if let Some(university_id) = &payload.university_id {
        Universities::find_by_id(university_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::BadRequest("University not found".to_string()))?;
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(e.to_string()))?
        .to_string();

    let user = users::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set(email),
        password_hash: Set(password_hash),
        username: Set(payload.username.trim().to_string()),
        role: Set("user".to_string()),
        karma_points: Set(0),
        university_id: Set(payload.university_id),
        created_at: Set(Utc::now()),
    };

    let user = user
        .insert(&state.db)
        .await
        .map_err(|_e| AppError::Conflict("This email is already registered".to_string()))?;

    let token = create_jwt(
        &user.id,
        &user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = user_response(&state.db, user).await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();

    let user = Users::find()
        .filter(users::Column::Email.eq(&email))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    let parsed_hash = argon2::PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized("Invalid email or password".to_string()))?;

    let token = create_jwt(
        &user.id,
        &user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = user_response(&state.db, user).await?;

    Ok(Json(AuthResponse { token, user }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("jwt" = [])),
    tag = "auth"
)]
pub async fn me(
    State(state): State<crate::AppState>,
    Extension(user): Extension<users::Model>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(user_response(&state.db, user).await?))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    security(("jwt" = [])),
    tag = "auth"
)]
pub async fn logout() -> Json<MessageResponse> {
    // Tokens are stateless; the client discards its copy
    Json(MessageResponse {
        message: "Logged out".to_string(),
    })
}
