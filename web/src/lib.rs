/*
 * SPDX-FileCopyrightText: 2025 Showcase Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod authorization;
pub mod endpoints;
pub mod error;

#[cfg(test)]
mod tests;

use axum::http::HeaderValue;
use axum::routing::{delete, get, post, put};
use axum::{Router, middleware};
use core::types::ServerState;
use http::Method;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

fn cors_layer(state: &ServerState) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = Vec::new();

    if let Ok(origin) = state.cli.serve_url.parse() {
        origins.push(origin);
    }

    if let Some(extra) = &state.cli.cors_origins {
        for origin in extra.split(',') {
            match origin.trim().parse() {
                Ok(origin) => origins.push(origin),
                Err(_) => tracing::warn!("Ignoring invalid CORS origin: {}", origin),
            }
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
}

pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/v1/users/me", get(endpoints::user::get))
        .route("/api/v1/projects", post(endpoints::projects::post))
        .route(
            "/api/v1/projects/{project}",
            put(endpoints::projects::put).delete(endpoints::projects::delete),
        )
        .route(
            "/api/v1/comments/project/{project}",
            post(endpoints::comments::post),
        )
        .route(
            "/api/v1/comments/{comment}",
            delete(endpoints::comments::delete),
        )
        .route(
            "/api/v1/improvements/project/{project}",
            post(endpoints::improvements::post),
        )
        .route(
            "/api/v1/improvements/{improvement}",
            put(endpoints::improvements::put).delete(endpoints::improvements::delete),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            authorization::authorize,
        ))
        .route("/api/v1/users/signup", post(endpoints::auth::post_signup))
        .route("/api/v1/users/signin", post(endpoints::auth::post_signin))
        .route("/api/v1/projects", get(endpoints::projects::get))
        .route(
            "/api/v1/projects/{project}",
            get(endpoints::projects::get_project),
        )
        .route(
            "/api/v1/comments/project/{project}",
            get(endpoints::comments::get),
        )
        .route(
            "/api/v1/improvements/project/{project}",
            get(endpoints::improvements::get),
        )
        .route("/api/v1/health", get(endpoints::get_health))
        .fallback(endpoints::handle_404)
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve_web(state: Arc<ServerState>) -> std::io::Result<()> {
    let server_url = format!("{}:{}", state.cli.ip.clone(), state.cli.port.clone());
    let app = create_router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    axum::serve(listener, app).await
}
