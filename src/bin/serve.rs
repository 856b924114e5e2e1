use std::net::TcpListener;

use listenfd::ListenFd;

use catalog::services;
use catalog::{AdminSecret, Configurator, Policy};

fn setup_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let config = tracing_subscriber::registry().with(filter_layer);

    if atty::is(atty::Stream::Stdout) {
        config.with(fmt::layer().pretty()).init();
    } else {
        config.with(fmt::layer().json()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut listenfd = ListenFd::from_env();

    let bind = if let Some(listener) = listenfd.take_tcp_listener(0)? {
        listener
    } else {
        TcpListener::bind((
            std::env::var("HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string())
                .as_str(),
            std::env::var("PORT")
                .ok()
                .and_then(|port| port.parse::<u16>().ok())
                .unwrap_or(8000),
        ))?
    };

    setup_tracing();

    let config = services::configurators::Env::new();
    let identity = config.admin_identity().await?;
    let token_secret = config.token_secret().await?;

    let authenticator = match &identity.secret {
        AdminSecret::PasswordHash(hash) => {
            services::authenticators::SingleAdmin::new(identity.username.clone(), hash)?
        }
        AdminSecret::Password(password) => {
            services::authenticators::SingleAdmin::with_password(identity.username.clone(), password)?
        }
    };

    let policy = Policy::new()
        .with_authenticator(authenticator)
        .with_token_authorizer(services::token_authorizers::Hmac::new(
            token_secret.as_bytes(),
            &identity.username,
        ))
        .with_package_storage(services::storage::package::InMemory::new());

    let app = catalog::routes(policy);

    let address = bind.local_addr()?;
    tracing::info!(%address, "catalog listening");

    axum::Server::from_tcp(bind)?
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
