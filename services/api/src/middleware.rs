//! Session middleware and the authenticated-user extractor

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{TypedHeader, headers::Cookie};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Authenticated user information
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub session_id: String,
}

/// Resolve the session cookie, if any, and attach the user to the request.
///
/// Requests without a valid session pass through anonymously.
pub async fn session_middleware(
    State(state): State<AppState>,
    cookies: Option<TypedHeader<Cookie>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_id = cookies
        .as_ref()
        .and_then(|TypedHeader(cookies)| cookies.get(&state.cookie.name))
        .map(str::to_string);

    if let Some(session_id) = session_id {
        if let Some(user_id) = state.credentials.sessions().resolve(&session_id).await? {
            req.extensions_mut().insert(AuthUser {
                id: user_id,
                session_id,
            });
        }
    }

    Ok(next.run(req).await)
}

/// Reject requests that carry no valid session
pub async fn require_auth(req: Request, next: Next) -> Result<Response, ApiError> {
    if req.extensions().get::<AuthUser>().is_none() {
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}
