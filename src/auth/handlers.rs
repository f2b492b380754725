use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, CredentialsRequest, PublicUser},
        extractors::AuthUser,
        services,
        validation::{validate_credentials, validate_signup},
    },
    error::AuthError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user/me", get(get_me))
}

fn json_body(
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<CredentialsRequest, AuthError> {
    let Json(body) = payload.map_err(|rejection| {
        warn!(error = %rejection, "malformed credentials body");
        AuthError::Validation(rejection.body_text())
    })?;
    Ok(body)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    let creds = validate_signup(json_body(payload)?, state.config.strict_email)?;
    let access_token = services::signup(state.users.as_ref(), &state.keys, &creds).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse { access_token })))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AuthError> {
    let creds = validate_credentials(json_body(payload)?)?;
    let access_token = services::login(state.users.as_ref(), &state.keys, &creds).await?;
    Ok(Json(AuthResponse { access_token }))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<PublicUser>, AuthError> {
    let record = state.users.find_by_id(user.id).await?.ok_or_else(|| {
        warn!(user_id = %user.id, email = %user.email, "token for missing user");
        AuthError::Unauthorized("User not found")
    })?;
    Ok(Json(PublicUser::from(record)))
}
