use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use tracing::{debug, info};

use crate::db::{AccessToken, DbError, User};
use crate::server::AppState;
use super::error::ApiError;
use super::types::*;

/// Id of the user owning the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.config.auth.registration {
        return Err(ApiError::Forbidden("Registration is disabled".to_string()));
    }

    let email = req.email.trim().to_lowercase();
    if email.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required".to_string()));
    }

    let password = req.password;
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        name: req.name.trim().to_string(),
        email,
        password: hash,
        created: Some(chrono::Utc::now()),
    };
    state.db.create_user(&user).await?;

    info!(user = %user.id, "registered user");
    Ok(Json(MessageResponse::ok("User registered successfully")))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<DataResponse<String>>, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = state
        .db
        .get_user_by_email(&req.email.trim().to_lowercase())
        .await
        .map_err(|e| match e {
            DbError::NotFound(_) => invalid(),
            e => ApiError::from(e),
        })?;

    let hash = user.password.clone();
    let password = req.password;
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    if !valid {
        return Err(invalid());
    }

    let now = chrono::Utc::now();
    let token = AccessToken {
        token: uuid::Uuid::new_v4().to_string(),
        userid: user.id.clone(),
        created: Some(now),
        lastused: Some(now),
    };
    state.db.upsert_token(&token).await?;

    info!(user = %user.id, "user logged in");
    Ok(Json(DataResponse::with_message("User logged in successfully", token.token)))
}

pub async fn current_user(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<DataResponse<UserInfo>>, ApiError> {
    let user = state.db.get_user_by_id(&user_id).await?;
    Ok(Json(DataResponse::new(user.into())))
}

/// Reject requests without a known bearer token; otherwise attach
/// [`AuthUser`] to the request.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&req)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let token = state.db.get_token(&token).await.map_err(|e| {
        debug!("token lookup failed: {}", e);
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(AuthUser(token.userid));
    Ok(next.run(req).await)
}

fn extract_token<B>(req: &axum::http::Request<B>) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    parse_bearer(value)
}

fn parse_bearer(value: &str) -> Option<String> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer("Bearer abc"), Some("abc".to_string()));
        assert_eq!(parse_bearer("bearer  abc "), Some("abc".to_string()));
        assert_eq!(parse_bearer("Basic abc"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("abc"), None);
    }
}
