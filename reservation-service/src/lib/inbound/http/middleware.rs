use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::exception::HttpException;
use crate::inbound::http::router::AppState;

/// Caller identity, stored in request extensions by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Bearer token guard.
///
/// The token must verify, and its subject must still exist.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, HttpException> {
    let token = extract_bearer_token(&req)?;

    let claims = state.jwt_handler.decode(token).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        match e {
            JwtError::TokenExpired => HttpException::unauthorized("Token expired"),
            _ => HttpException::unauthorized("Invalid token"),
        }
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::debug!(error = %e, "Token subject is not a user ID");
        HttpException::unauthorized("Invalid token")
    })?;

    let user = state.auth_service.validate_user(&user_id).await?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.name.as_str().to_string(),
    });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, HttpException> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| HttpException::unauthorized("Missing Authorization header"))?;

    let value = value
        .to_str()
        .map_err(|_| HttpException::unauthorized("Invalid Authorization header"))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            HttpException::unauthorized(
                "Invalid Authorization header format. Expected: Bearer <token>",
            )
        })
}
