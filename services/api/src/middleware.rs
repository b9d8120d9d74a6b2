//! Middleware for JWT token validation and authentication

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Authenticated admin extracted from a verified bearer token
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub id: Uuid,
    pub role: String,
}

/// Extract and validate the JWT from the Authorization header
///
/// Runs in front of every protected route; a missing, malformed, expired,
/// or forged token short-circuits with 401 before the handler runs.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    // Check that it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    // Validate the token
    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        error!("Failed to validate token: {}", e);
        ApiError::Unauthorized
    })?;

    // Make the admin identity available to handlers
    req.extensions_mut().insert(AuthAdmin {
        id: claims.sub,
        role: claims.role,
    });

    // Continue with the request
    Ok(next.run(req).await)
}
