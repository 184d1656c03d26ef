// src/routes.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn app_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/api/health", get(handlers::health::health))
        .route("/api/instagram", post(handlers::customers::create_customer))
        .route("/api/customers", get(handlers::customers::list_customers))
        .route("/api/customers/total", get(handlers::customers::count_total))
        .route(
            "/api/customers/contracted",
            get(handlers::customers::count_by_contract_status),
        )
        .route("/api/customers/{id}", put(handlers::customers::update_customer))
        .route("/api/search-customers", get(handlers::customers::search_customers))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}
