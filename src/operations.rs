use std::fmt::Debug;

use chrono::Utc;
use thiserror::Error;

use crate::models::{Package, PackageWithStatus};

pub(crate) mod authenticator;
pub(crate) mod configurator;
pub(crate) mod not_implemented;
pub(crate) mod package_storage;
pub(crate) mod policy;
pub(crate) mod token_authorizer;

/// Reasons a bearer token is refused. The transport layer collapses all of
/// these into one unauthenticated response; the distinction only feeds
/// diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("token signature could not be validated")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token subject is not the configured administrator")]
    SubjectMismatch,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("a package with id {0:?} already exists")]
    Conflict(String),

    #[error("no package with id {0:?}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Checks a username/password pair against the administrator identity.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    async fn verify_credentials(&self, username: &str, password: &str) -> anyhow::Result<bool>;
}

/// Issues and verifies the signed bearer tokens handed out at login.
/// Verification resolves to the subject or to an [`AuthError`]; a future
/// multi-user deployment changes only what sits behind this trait.
#[async_trait::async_trait]
pub trait TokenAuthorizer: Send + Sync {
    async fn issue_token(&self, subject: &str) -> anyhow::Result<String>;

    async fn verify_token(&self, token: &str) -> Result<String, AuthError>;
}

/// Document-level access to the backing package collection.
///
/// Uniqueness of `package_id` belongs to the store: `insert_package` is the
/// authoritative arbiter, so concurrent creates of one id resolve to a
/// single winner at this boundary.
#[async_trait::async_trait]
pub trait PackageStorage: Send + Sync {
    async fn find_package(&self, package_id: &str) -> anyhow::Result<Option<Package>>;

    async fn all_packages(&self) -> anyhow::Result<Vec<Package>>;

    /// Returns false when the id is already taken.
    async fn insert_package(&self, package: Package) -> anyhow::Result<bool>;

    /// Wholesale replacement of the document matched by `package_id`.
    /// Returns false when nothing matched.
    async fn replace_package(&self, package_id: &str, package: Package) -> anyhow::Result<bool>;

    /// Returns false when nothing matched.
    async fn delete_package(&self, package_id: &str) -> anyhow::Result<bool>;
}

/// Catalog record lifecycle, layered over any [`PackageStorage`].
#[async_trait::async_trait]
pub trait PackageService: PackageStorage {
    /// Every stored package annotated with its wall-clock status. An empty
    /// store yields an empty list; order is whatever the store returns.
    async fn list_all(&self) -> Result<Vec<PackageWithStatus>, CatalogError> {
        let now = Utc::now();
        let packages = self.all_packages().await?;
        Ok(packages
            .into_iter()
            .map(|package| PackageWithStatus::annotate(package, now))
            .collect())
    }

    /// Persists the record verbatim. No status is computed at write time.
    async fn create(&self, package: Package) -> Result<(), CatalogError> {
        let package_id = package.package_id.clone();
        if self.insert_package(package).await? {
            Ok(())
        } else {
            Err(CatalogError::Conflict(package_id))
        }
    }

    /// Replaces the document found under `package_id` with `package`,
    /// whatever id the body itself carries.
    async fn update(&self, package_id: &str, package: Package) -> Result<(), CatalogError> {
        if self.replace_package(package_id, package).await? {
            Ok(())
        } else {
            Err(CatalogError::NotFound(package_id.to_string()))
        }
    }

    async fn delete(&self, package_id: &str) -> Result<(), CatalogError> {
        if self.delete_package(package_id).await? {
            Ok(())
        } else {
            Err(CatalogError::NotFound(package_id.to_string()))
        }
    }

    /// The stored document as-is. Unlike [`PackageService::list_all`], no
    /// status annotation is attached.
    async fn detail(&self, package_id: &str) -> Result<Package, CatalogError> {
        self.find_package(package_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(package_id.to_string()))
    }
}

impl<T: PackageStorage + ?Sized> PackageService for T {}

/// The administrator principal as it arrives from configuration.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub username: String,
    pub secret: AdminSecret,
}

/// How the administrator secret is supplied.
#[derive(Clone)]
pub enum AdminSecret {
    /// A PHC-format hash, ready to verify against.
    PasswordHash(String),
    /// A bootstrap password, hashed once at startup.
    Password(String),
}

impl Debug for AdminSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminSecret::PasswordHash(_) => f.write_str("AdminSecret::PasswordHash(..)"),
            AdminSecret::Password(_) => f.write_str("AdminSecret::Password(..)"),
        }
    }
}

#[async_trait::async_trait]
pub trait Configurator: Send + Sync {
    async fn admin_identity(&self) -> anyhow::Result<AdminIdentity>;

    async fn token_secret(&self) -> anyhow::Result<String>;
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::package_storage::in_memory::InMemoryPackageStorage;
    use super::{CatalogError, PackageService};
    use crate::models::{Package, PackageStatus};

    fn package(id: &str, ends_in_hours: i64) -> Package {
        let now = chrono::Utc::now();
        Package {
            package_id: id.to_string(),
            package_name: format!("{} tour", id),
            full_price: 1290.0,
            sale_price: 990.0,
            start_date: now - Duration::days(30),
            end_date: now + Duration::hours(ends_in_hours),
            languages: Default::default(),
        }
    }

    #[tokio::test]
    async fn create_then_detail_returns_the_document() {
        let store = InMemoryPackageStorage::new();
        let submitted = package("phuket-4d3n", 24);

        store.create(submitted.clone()).await.unwrap();

        let stored = store.detail("phuket-4d3n").await.unwrap();
        assert_eq!(stored, submitted);
    }

    #[tokio::test]
    async fn create_rejects_a_taken_id_even_with_different_fields() {
        let store = InMemoryPackageStorage::new();
        store.create(package("krabi-2d1n", 24)).await.unwrap();

        let mut second = package("krabi-2d1n", 96);
        second.package_name = "another name".to_string();

        let err = store.create(second).await.unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(id) if id == "krabi-2d1n"));

        // the first document is untouched
        let stored = store.detail("krabi-2d1n").await.unwrap();
        assert_eq!(stored.package_name, "krabi-2d1n tour");
    }

    #[tokio::test]
    async fn update_on_a_missing_id_does_not_create_a_record() {
        let store = InMemoryPackageStorage::new();

        let err = store
            .update("missing", package("missing", 24))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(id) if id == "missing"));

        let err = store.detail("missing").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_replaces_the_document_wholesale() {
        let store = InMemoryPackageStorage::new();
        store.create(package("samui-3d2n", 24)).await.unwrap();

        let mut replacement = package("samui-3d2n", 240);
        replacement.package_name = "Samui Deluxe".to_string();
        replacement.sale_price = 1490.0;

        store.update("samui-3d2n", replacement.clone()).await.unwrap();

        let stored = store.detail("samui-3d2n").await.unwrap();
        assert_eq!(stored, replacement);
    }

    #[tokio::test]
    async fn delete_succeeds_once_then_reports_not_found() {
        let store = InMemoryPackageStorage::new();
        store.create(package("pattaya-1d", 24)).await.unwrap();

        store.delete("pattaya-1d").await.unwrap();

        let err = store.delete("pattaya-1d").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(id) if id == "pattaya-1d"));
    }

    #[tokio::test]
    async fn list_annotates_status_from_the_end_date() {
        let store = InMemoryPackageStorage::new();
        store.create(package("lapsed", -48)).await.unwrap();
        store.create(package("running", 48)).await.unwrap();

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed.len(), 2);

        let status_of = |id: &str| {
            listed
                .iter()
                .find(|entry| entry.package.package_id == id)
                .unwrap()
                .status
        };
        assert_eq!(status_of("lapsed"), PackageStatus::Expired);
        assert_eq!(status_of("running"), PackageStatus::Published);
    }

    #[tokio::test]
    async fn list_on_an_empty_store_is_empty() {
        let store = InMemoryPackageStorage::new();
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
