use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Presentation fields for one language of a package. Every language
/// carries its own copy of each field; nothing is shared across languages.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct LanguageContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// Rich text from the editor, stored as HTML.
    #[serde(default)]
    pub package_detail: String,
    #[serde(default)]
    pub cover_image: String,
}

/// A priced, time-bounded catalog offering. `package_id` is supplied by the
/// caller and is the document key in the backing store.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Package {
    pub package_id: String,
    pub package_name: String,
    #[serde(default)]
    pub full_price: f64,
    #[serde(default)]
    pub sale_price: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub languages: HashMap<String, LanguageContent>,
}

/// Wall-clock standing of a package. Computed when a listing is read and
/// never persisted.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageStatus {
    Published,
    Expired,
}

impl PackageStatus {
    /// A package stays `Published` through its `end_date` and flips to
    /// `Expired` strictly afterwards.
    pub fn at(now: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        if now > end_date {
            PackageStatus::Expired
        } else {
            PackageStatus::Published
        }
    }
}

/// List-view projection of a package: the stored document plus its status.
#[derive(Serialize, Debug, Clone)]
pub struct PackageWithStatus {
    #[serde(flatten)]
    pub package: Package,
    pub status: PackageStatus,
}

impl PackageWithStatus {
    pub fn annotate(package: Package, now: DateTime<Utc>) -> Self {
        let status = PackageStatus::at(now, package.end_date);
        Self { package, status }
    }
}
