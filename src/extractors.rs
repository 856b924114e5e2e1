use axum::{extract::FromRequestParts, http::request::Parts, http::StatusCode, Json};

use crate::operations::policy::PolicyHolder;
use crate::operations::TokenAuthorizer;

/// Subject resolved from the bearer token on a protected route. Extraction
/// runs before the handler body, so a rejected request never reaches the
/// package storage.
pub(crate) struct Authenticated(pub String);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get("authorization")?.to_str().ok()?;
    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))?;
    Some(token.trim())
}

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync + PolicyHolder,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Err(unauthenticated());
        };

        match state.as_token_authorizer().verify_token(token).await {
            Ok(subject) => Ok(Authenticated(subject)),
            Err(error) => {
                tracing::debug!(%error, "rejected bearer token");
                Err(unauthenticated())
            }
        }
    }
}

fn unauthenticated() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "message": "Could not validate credentials"
        })),
    )
}
