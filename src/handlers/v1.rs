use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;

use serde::Deserialize;
use serde_json::json;
use tracing::{instrument, Level};

use crate::extractors::Authenticated;
use crate::models::{AuthToken, Package, PackageWithStatus};
use crate::operations::policy::PolicyHolder;
use crate::operations::{Authenticator, CatalogError, PackageService, TokenAuthorizer};

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CatalogError::Conflict(_) => (StatusCode::BAD_REQUEST, "Package ID already exists"),
            CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            CatalogError::Storage(error) => {
                tracing::error!(?error, "package storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

fn internal_error(error: anyhow::Error) -> Response {
    tracing::error!(?error, "request failed with internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "internal error" })),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[instrument(level = "info", skip_all, fields(username = %login.username))]
async fn post_login<S>(
    State(state): State<S>,
    Form(login): Form<LoginForm>,
) -> Result<Json<AuthToken>, Response>
where
    S: PolicyHolder + Send + Sync,
{
    let verified = state
        .as_authenticator()
        .verify_credentials(&login.username, &login.password)
        .await
        .map_err(internal_error)?;

    if !verified {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Incorrect username or password" })),
        )
            .into_response());
    }

    let token = state
        .as_token_authorizer()
        .issue_token(&login.username)
        .await
        .map_err(internal_error)?;

    Ok(Json(AuthToken::bearer(token)))
}

#[instrument(level = "info", skip_all, fields(subject = %subject))]
async fn get_packages<S>(
    State(state): State<S>,
    Authenticated(subject): Authenticated,
) -> Result<Json<Vec<PackageWithStatus>>, CatalogError>
where
    S: PolicyHolder + Send + Sync,
{
    let packages = state.as_package_storage().list_all().await?;
    Ok(Json(packages))
}

#[instrument(level = "info", skip_all, fields(subject = %subject, package_id = %package.package_id))]
async fn post_package<S>(
    State(state): State<S>,
    Authenticated(subject): Authenticated,
    Json(package): Json<Package>,
) -> Result<Json<serde_json::Value>, CatalogError>
where
    S: PolicyHolder + Send + Sync,
{
    state.as_package_storage().create(package).await?;
    Ok(Json(json!({ "message": "Created" })))
}

#[instrument(level = "info", skip_all, fields(subject = %subject, package_id = %package_id))]
async fn put_package<S>(
    State(state): State<S>,
    Authenticated(subject): Authenticated,
    Path(package_id): Path<String>,
    Json(package): Json<Package>,
) -> Result<Json<serde_json::Value>, CatalogError>
where
    S: PolicyHolder + Send + Sync,
{
    state
        .as_package_storage()
        .update(&package_id, package)
        .await?;
    Ok(Json(json!({ "message": "Updated" })))
}

#[instrument(level = "info", skip_all, fields(subject = %subject, package_id = %package_id))]
async fn delete_package<S>(
    State(state): State<S>,
    Authenticated(subject): Authenticated,
    Path(package_id): Path<String>,
) -> Result<Json<serde_json::Value>, CatalogError>
where
    S: PolicyHolder + Send + Sync,
{
    state.as_package_storage().delete(&package_id).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}

#[instrument(level = "info", skip_all, fields(package_id = %package_id))]
async fn get_package_detail<S>(
    State(state): State<S>,
    Path(package_id): Path<String>,
) -> Result<Json<Package>, CatalogError>
where
    S: PolicyHolder + Send + Sync,
{
    let package = state.as_package_storage().detail(&package_id).await?;
    Ok(Json(package))
}

pub fn routes<S>(state: S) -> Router
where
    S: PolicyHolder + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(post_login::<S>))
        .route(
            "/packages",
            get(get_packages::<S>).post(post_package::<S>),
        )
        .route(
            "/packages/:package_id",
            get(get_package_detail::<S>)
                .put(put_package::<S>)
                .delete(delete_package::<S>),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetSensitiveRequestHeadersLayer::new(std::iter::once(
                    axum::http::header::AUTHORIZATION,
                )))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new())
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(LatencyUnit::Micros),
                        ),
                )
                .layer(CorsLayer::very_permissive()),
        )
}
