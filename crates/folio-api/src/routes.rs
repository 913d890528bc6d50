use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use folio_shared::{config::AppSettings, constants::CSRF_HEADER_NAME};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::handlers::{contact, csrf, health, listings};
use crate::security::csrf_middleware;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.app);

    // Every /api route sits behind the CSRF guard; safe methods pass through
    let api_routes = Router::new()
        .route("/csrf-token", get(csrf::issue_csrf_token))
        .route("/news", get(listings::list_news))
        .route("/news/{slug}", get(listings::get_news_article))
        .route("/portfolio", get(listings::list_portfolio))
        .route("/contact", post(contact::submit_contact))
        .layer(middleware::from_fn(csrf_middleware));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(settings: &AppSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(CSRF_HEADER_NAME),
        ])
        .allow_credentials(true)
}
