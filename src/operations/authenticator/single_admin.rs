use argon2::password_hash::{rand_core::OsRng, PasswordHashString, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use subtle::ConstantTimeEq;

use crate::operations::Authenticator;

/// The one administrator identity the service knows about. The password is
/// held only as an Argon2id PHC hash; the username comparison is
/// constant-time, and both checks run on every attempt.
#[derive(Clone)]
pub struct SingleAdminAuthenticator {
    username: String,
    password_hash: PasswordHashString,
}

impl std::fmt::Debug for SingleAdminAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleAdminAuthenticator")
            .field("username", &self.username)
            .finish()
    }
}

impl SingleAdminAuthenticator {
    pub fn new(username: impl Into<String>, password_hash: &str) -> anyhow::Result<Self> {
        Ok(Self {
            username: username.into(),
            password_hash: PasswordHashString::new(password_hash)?,
        })
    }

    /// Hashes a bootstrap password with a fresh salt.
    pub fn with_password(username: impl Into<String>, password: &str) -> anyhow::Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(Self {
            username: username.into(),
            password_hash: hash.serialize(),
        })
    }
}

#[async_trait::async_trait]
impl Authenticator for SingleAdminAuthenticator {
    async fn verify_credentials(&self, username: &str, password: &str) -> anyhow::Result<bool> {
        let username_ok: bool = self
            .username
            .as_bytes()
            .ct_eq(username.as_bytes())
            .into();

        let password_ok = Argon2::default()
            .verify_password(password.as_bytes(), &self.password_hash.password_hash())
            .is_ok();

        Ok(username_ok & password_ok)
    }
}
