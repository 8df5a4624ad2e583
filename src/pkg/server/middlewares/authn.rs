use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{
    pkg::{
        internal::auth::{AuthToken, User},
        server::state::AppState,
    },
    prelude::{Error, Result},
};

/// Resolves the bearer token and stashes the user as a request extension.
pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty());
    let Some(token) = token else {
        tracing::warn!("token missing, authentication denied");
        return Err(Error::Unauthorized);
    };
    let user = AuthToken::check_token_validity(&state, token).await?;
    request.extensions_mut().insert(Arc::new(user));
    Ok(next.run(request).await)
}

/// Runs after `authenticate`; gates mutating routes on the admin flag.
pub async fn require_admin(request: Request, next: Next) -> Result<Response> {
    let user = request
        .extensions()
        .get::<Arc<User>>()
        .cloned()
        .ok_or(Error::Unauthorized)?;
    if !user.is_admin {
        tracing::warn!("user {} denied, not an administrator", &user.user_id);
        return Err(Error::Forbidden);
    }
    Ok(next.run(request).await)
}
