use crate::{doc::ApiDoc, routes, state::AppState};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the HTTP application with every resource router and the API docs
pub fn app(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::health::router())
        .merge(routes::faculty::router())
        .merge(routes::department::router())
        .merge(routes::person::router())
        .merge(routes::student::router())
        .merge(routes::professor::router())
        .merge(routes::employee::router())
        .merge(routes::course::router())
        .merge(routes::semester::router())
        .merge(routes::class_schedule::router())
        .merge(routes::enrollment::router())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}
