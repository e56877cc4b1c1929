use app::{component, shell};
use axum::{Router, http::StatusCode, response::Json, routing::get};
use dotenvy::dotenv;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes as _, generate_route_list};
use leptos_config::get_configuration;
use serde_json::json;

use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

// Health check handler
async fn health_handler() -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "waypoint",
        "version": env!("CARGO_PKG_VERSION")
    })))
}

fn tracing_level() -> tracing::Level {
    if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_max_level(tracing_level())
        .init();

    if dotenv().is_err() {
        tracing::warn!("There is no corresponding .env file");
    }

    let conf = match get_configuration(Some("Cargo.toml")) {
        Ok(conf) => conf,
        Err(err) => {
            tracing::error!("Failed to get configuration: {err}");
            return;
        }
    };

    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(component);

    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .route("/health", get(health_handler))
        .layer(
            tower::ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .fallback(leptos_axum::file_and_error_handler::<LeptosOptions, _>(shell))
        .with_state(leptos_options);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(list) => list,
        Err(err) => {
            tracing::error!("Failed to bind tcp listener to {addr}: {err}");
            return;
        }
    };
    tracing::info!("Listening on http://{addr}");

    match axum::serve(listener, app.into_make_service()).await {
        Ok(()) => tracing::info!("Server shutdown gracefully"),
        Err(err) => tracing::error!(error = ?err, "Failed to serve app"),
    }
}
