//! Authentication API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use groove_shared::types::{SignInRequest, SignInResponse};
use tracing::info;
use validator::Validate;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signin", post(sign_in))
        .route("/signout", post(sign_out))
}

/// POST /api/v1/auth/signin - Exchange an identity credential for a token
///
/// The exchange also starts the user's session: their dashboard aggregator
/// and its subscriptions come up before the response is returned.
async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let user_id = state.identity().exchange(&req.credential).await?;
    let access_token = state.jwt().generate_access_token(&user_id)?;
    state.sessions().get_or_spawn(&user_id).await?;

    info!(user_id, "signed in");
    Ok(Json(SignInResponse {
        user_id,
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt().access_token_expiry_secs(),
    }))
}

/// POST /api/v1/auth/signout - End the session
///
/// Releases every live subscription the session owns and clears its weight
/// cache; a later sign-in starts fresh.
async fn sign_out(State(state): State<AppState>, auth: AuthUser) -> StatusCode {
    state.sessions().sign_out(&auth.user_id).await;
    StatusCode::NO_CONTENT
}
