mod package;
use serde::{Deserialize, Serialize};

pub use package::*;

/// Bearer credential handed out by a successful login.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
}

impl AuthToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
