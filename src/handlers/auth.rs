use axum::{extract::State, http::StatusCode, Extension, Json};
use validator::Validate;

use crate::auth::{
    jwt::create_token,
    middleware::AuthUser,
    password::{hash_password, verify_password},
};
use crate::db::StoreError;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest, Role, UserProfile};
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    body.validate()?;

    let pwd_hash = hash_password(&body.password)?;

    // The unique index decides; two concurrent registrations cannot both win.
    let user = match state
        .store
        .create_user(&body.username, &pwd_hash, Role::User)
        .await
    {
        Ok(user) => user,
        Err(StoreError::Conflict) => {
            return Err(AppError::Conflict("user already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Unknown usernames and wrong passwords produce the same response.
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let Some(user) = state.store.find_user_by_username(&body.username).await? else {
        tracing::info!("Login rejected");
        return Err(AppError::Unauthorized);
    };

    if !verify_password(&body.password, &user.password_hash)? {
        tracing::info!("Login rejected");
        return Err(AppError::Unauthorized);
    }

    let token = create_token(&user, &state.config)?;
    tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.jwt_ttl_secs,
    }))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .store
        .find_user(auth_user.id)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}
