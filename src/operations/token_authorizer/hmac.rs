use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::operations::{AuthError, TokenAuthorizer};

/// How long an issued token stays valid.
const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Symmetric-key token service. Tokens are HS256 JWTs carrying the subject
/// and an expiry; the signature guarantees integrity only, the payload is
/// readable by any holder.
#[derive(Clone)]
pub struct HmacTokenAuthorizer {
    subject: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for HmacTokenAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacTokenAuthorizer")
            .field("subject", &self.subject)
            .finish()
    }
}

impl HmacTokenAuthorizer {
    /// `subject` is the only principal whose tokens verify.
    pub fn new(secret: &[u8], subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

#[async_trait::async_trait]
impl TokenAuthorizer for HmacTokenAuthorizer {
    async fn issue_token(&self, subject: &str) -> anyhow::Result<String> {
        let expires_at = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
        let claims = Claims {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    async fn verify_token(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|error| match error.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                // every other decode failure is reported uniformly
                _ => AuthError::InvalidSignature,
            })?;

        if data.claims.sub != self.subject {
            return Err(AuthError::SubjectMismatch);
        }

        Ok(data.claims.sub)
    }
}
