use super::not_implemented::NotImplemented;
use super::*;

pub trait PolicyHolder {
    type Authenticator: Authenticator + Send + Sync;
    type TokenAuthorizer: TokenAuthorizer + Send + Sync;
    type PackageStorage: PackageStorage + Send + Sync;

    fn as_authenticator(&self) -> &Self::Authenticator;
    fn as_token_authorizer(&self) -> &Self::TokenAuthorizer;
    fn as_package_storage(&self) -> &Self::PackageStorage;
}

#[derive(Clone, Copy, Debug)]
pub struct Policy<
    AuthImpl = NotImplemented,
    TokenAuthzImpl = NotImplemented,
    PackageStorageImpl = NotImplemented,
> where
    AuthImpl: Authenticator + Send + Sync,
    TokenAuthzImpl: TokenAuthorizer + Send + Sync,
    PackageStorageImpl: PackageStorage + Send + Sync,
{
    auth: AuthImpl,
    token_authz: TokenAuthzImpl,
    package_storage: PackageStorageImpl,
}

impl Policy {
    pub fn new() -> Self {
        Self {
            auth: NotImplemented,
            token_authz: NotImplemented,
            package_storage: NotImplemented,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::new()
    }
}

impl<A, T, P> PolicyHolder for Policy<A, T, P>
where
    A: Authenticator + Send + Sync,
    T: TokenAuthorizer + Send + Sync,
    P: PackageStorage + Send + Sync,
{
    type Authenticator = A;

    type TokenAuthorizer = T;

    type PackageStorage = P;

    fn as_authenticator(&self) -> &Self::Authenticator {
        &self.auth
    }

    fn as_token_authorizer(&self) -> &Self::TokenAuthorizer {
        &self.token_authz
    }

    fn as_package_storage(&self) -> &Self::PackageStorage {
        &self.package_storage
    }
}

impl<A, T, P> Policy<A, T, P>
where
    A: Authenticator + Send + Sync,
    T: TokenAuthorizer + Send + Sync,
    P: PackageStorage + Send + Sync,
{
    pub fn with_authenticator<A1: Authenticator + Send + Sync>(
        self,
        auth: A1,
    ) -> Policy<A1, T, P> {
        Policy {
            auth,
            token_authz: self.token_authz,
            package_storage: self.package_storage,
        }
    }

    pub fn with_token_authorizer<T1: TokenAuthorizer + Send + Sync>(
        self,
        token_authz: T1,
    ) -> Policy<A, T1, P> {
        Policy {
            auth: self.auth,
            token_authz,
            package_storage: self.package_storage,
        }
    }

    pub fn with_package_storage<P1: PackageStorage + Send + Sync>(
        self,
        package_storage: P1,
    ) -> Policy<A, T, P1> {
        Policy {
            auth: self.auth,
            token_authz: self.token_authz,
            package_storage,
        }
    }
}
