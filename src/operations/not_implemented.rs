use crate::models::Package;

use super::*;

trait Unimplemented: Send + Sync {}

#[derive(Clone, Copy, Debug, Default)]
pub struct NotImplemented;

impl Unimplemented for NotImplemented {}

#[async_trait::async_trait]
impl<T: Unimplemented> Authenticator for T {
    async fn verify_credentials(&self, _username: &str, _password: &str) -> anyhow::Result<bool> {
        Err(anyhow::anyhow!("not implemented"))
    }
}

#[async_trait::async_trait]
impl<T: Unimplemented> TokenAuthorizer for T {
    async fn issue_token(&self, _subject: &str) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("not implemented"))
    }

    async fn verify_token(&self, _token: &str) -> Result<String, AuthError> {
        Err(AuthError::InvalidSignature)
    }
}

#[async_trait::async_trait]
impl<T: Unimplemented> PackageStorage for T {
    async fn find_package(&self, _package_id: &str) -> anyhow::Result<Option<Package>> {
        Err(anyhow::anyhow!("not implemented"))
    }

    async fn all_packages(&self) -> anyhow::Result<Vec<Package>> {
        Err(anyhow::anyhow!("not implemented"))
    }

    async fn insert_package(&self, _package: Package) -> anyhow::Result<bool> {
        Err(anyhow::anyhow!("not implemented"))
    }

    async fn replace_package(&self, _package_id: &str, _package: Package) -> anyhow::Result<bool> {
        Err(anyhow::anyhow!("not implemented"))
    }

    async fn delete_package(&self, _package_id: &str) -> anyhow::Result<bool> {
        Err(anyhow::anyhow!("not implemented"))
    }
}
