//! Web server implementation using Axum

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::mailer::SmtpMailer;
use crate::routes::contact::{get_contact, method_not_allowed, post_contact, preflight};
use crate::routes::health::health;
use crate::routes::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    // The form is also served from other origins (static mirrors of the
    // landing page), so the API answers cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(get_contact))
        .route("/health", get(health))
        .route(
            "/api/contact",
            post(post_contact)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Start the web server
pub async fn serve(config: &Config, host: &str, port: u16) -> anyhow::Result<()> {
    let mailer = SmtpMailer::new(&config.email)?;

    let state = AppState {
        mailer: Arc::new(mailer),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
