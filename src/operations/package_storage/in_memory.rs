use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::Package;
use crate::operations::PackageStorage;

/// Process-local package collection, keyed by each document's `package_id`
/// field. The write lock makes insert's existence check and the insert
/// itself a single atomic step.
///
/// Suitable for development and tests; data is lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryPackageStorage {
    packages: Arc<RwLock<HashMap<String, Package>>>,
}

impl std::fmt::Debug for InMemoryPackageStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut formatter = f.debug_struct("InMemoryPackageStorage");
        if let Ok(packages) = self.packages.try_read() {
            formatter.field("packages", &packages.keys());
        }
        formatter.finish()
    }
}

impl InMemoryPackageStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PackageStorage for InMemoryPackageStorage {
    async fn find_package(&self, package_id: &str) -> anyhow::Result<Option<Package>> {
        let packages = self.packages.read().await;
        Ok(packages.get(package_id).cloned())
    }

    async fn all_packages(&self) -> anyhow::Result<Vec<Package>> {
        let packages = self.packages.read().await;
        Ok(packages.values().cloned().collect())
    }

    async fn insert_package(&self, package: Package) -> anyhow::Result<bool> {
        let mut packages = self.packages.write().await;
        if packages.contains_key(&package.package_id) {
            return Ok(false);
        }
        packages.insert(package.package_id.clone(), package);
        Ok(true)
    }

    async fn replace_package(&self, package_id: &str, package: Package) -> anyhow::Result<bool> {
        let mut packages = self.packages.write().await;
        if packages.remove(package_id).is_none() {
            return Ok(false);
        }
        // The replacement is keyed by its own id, which may differ from the
        // id it was looked up under.
        packages.insert(package.package_id.clone(), package);
        Ok(true)
    }

    async fn delete_package(&self, package_id: &str) -> anyhow::Result<bool> {
        let mut packages = self.packages.write().await;
        Ok(packages.remove(package_id).is_some())
    }
}
