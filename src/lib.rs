mod extractors;
mod handlers;
mod models;
mod operations;

pub use handlers::v1::routes;
pub use operations::policy::{Policy, PolicyHolder};

pub use models::{AuthToken, LanguageContent, Package, PackageStatus, PackageWithStatus};
pub use operations::{
    AdminIdentity, AdminSecret, AuthError, Authenticator, CatalogError, Configurator,
    PackageService, PackageStorage, TokenAuthorizer,
};

pub mod services {
    pub mod authenticators {
        pub use crate::operations::authenticator::single_admin::SingleAdminAuthenticator as SingleAdmin;
    }

    pub mod token_authorizers {
        pub use crate::operations::token_authorizer::hmac::HmacTokenAuthorizer as Hmac;
    }

    pub mod configurators {
        pub use crate::operations::configurator::env::EnvConfigurator as Env;
    }

    pub mod storage {
        pub mod package {
            pub use crate::operations::package_storage::in_memory::InMemoryPackageStorage as InMemory;
        }
    }
}
