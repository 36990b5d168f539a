use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{
            CreateUserRequest, CreateUserResponse, DeleteUserResponse, PublicUser,
            UpdateUserRequest, UpdateUserResponse,
        },
        repo_types::User,
        services::hash_secret,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    let payload = payload.normalized();

    if payload.has_missing_field() {
        warn!("create rejected: missing required field");
        return Err(ApiError::Validation(
            "Fields name, email, secret and phone are required.".into(),
        ));
    }

    // Pre-check is an optimization; the unique constraint is authoritative.
    if User::email_exists(&state.db, &payload.email).await? {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered.".into()));
    }

    let secret_hash = hash_secret(&payload.secret)?;
    let user = User::create(
        &state.db,
        &payload.name,
        &payload.email,
        &secret_hash,
        &payload.phone,
    )
    .await?;

    info!(user_id = %user.id, email = %user.email, "user created");
    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created successfully".into(),
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = User::list(&state.db).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, id).await?.ok_or_else(|| {
        warn!(%id, "user not found");
        ApiError::NotFound("User not found".into())
    })?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>, ApiError> {
    let fields = payload.normalized();

    let user = User::update(
        &state.db,
        id,
        fields.name.as_deref(),
        fields.email.as_deref(),
        fields.phone.as_deref(),
    )
    .await?
    .ok_or_else(|| {
        warn!(%id, "user not found");
        ApiError::NotFound("User not found".into())
    })?;

    info!(user_id = %user.id, "user updated");
    Ok(Json(UpdateUserResponse {
        message: "User updated successfully".into(),
        user: user.into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    if !User::delete(&state.db, id).await? {
        warn!(%id, "user not found");
        return Err(ApiError::NotFound("User not found".into()));
    }

    info!(user_id = %id, "user deleted");
    Ok(Json(DeleteUserResponse {
        message: "User deleted successfully".into(),
    }))
}
