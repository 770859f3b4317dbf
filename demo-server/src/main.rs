use axum::Router;
use http::{Method, header::CONTENT_TYPE};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gmail_proxy::{AUTH_ROUTE_PREFIX, GMAIL_ROUTE_PREFIX};
use gmail_proxy_axum::{AppState, auth_router, gmail_router};

mod server;

use crate::server::spawn_http_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    gmail_proxy::init().await?;

    let state = AppState::from_env();

    // Frontend dev servers run on arbitrary localhost ports, so mirror the
    // request origin instead of pinning one; cookies need credentials
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .nest(AUTH_ROUTE_PREFIX.as_str(), auth_router(state.clone()))
        .nest(GMAIL_ROUTE_PREFIX.as_str(), gmail_router(state))
        .layer(cors);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(3001);

    let http_server = spawn_http_server(port, app);
    http_server.await?;
    Ok(())
}
