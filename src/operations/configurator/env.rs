use anyhow::Context;

use crate::operations::{AdminIdentity, AdminSecret, Configurator};

/// Reads service configuration from `CATALOG_*` environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfigurator;

impl EnvConfigurator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Configurator for EnvConfigurator {
    async fn admin_identity(&self) -> anyhow::Result<AdminIdentity> {
        let username =
            std::env::var("CATALOG_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());

        let secret = if let Ok(hash) = std::env::var("CATALOG_ADMIN_PASSWORD_HASH") {
            AdminSecret::PasswordHash(hash)
        } else {
            let password = std::env::var("CATALOG_ADMIN_PASSWORD").context(
                "set CATALOG_ADMIN_PASSWORD_HASH or CATALOG_ADMIN_PASSWORD",
            )?;
            AdminSecret::Password(password)
        };

        Ok(AdminIdentity { username, secret })
    }

    async fn token_secret(&self) -> anyhow::Result<String> {
        std::env::var("CATALOG_TOKEN_SECRET").context("set CATALOG_TOKEN_SECRET")
    }
}
