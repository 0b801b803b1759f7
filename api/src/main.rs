//! GupShup API Server
//!
//! Feed, explore and admin-panel API for the GupShup social network.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod feed;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    PostgresAdminRepository, PostgresModerationRepository, PostgresPostRepository,
    PostgresUserRepository,
};
use app::{AccountService, AnalyticsService, ExploreService, FeedService, ModerationService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<FeedService<PostgresUserRepository, PostgresPostRepository>>,
    pub explore_service: Arc<ExploreService<PostgresPostRepository>>,
    pub account_service: Arc<AccountService<PostgresUserRepository>>,
    pub moderation_service:
        Arc<ModerationService<PostgresModerationRepository, PostgresPostRepository>>,
    pub analytics_service: Arc<AnalyticsService<PostgresPostRepository>>,
    pub users: Arc<PostgresUserRepository>,
    pub admins: Arc<PostgresAdminRepository>,
}

impl AppState {
    fn new(db: DatabaseConnection, config: &Config) -> Self {
        // Create adapters
        let users = Arc::new(PostgresUserRepository::new(db.clone()));
        let posts = Arc::new(PostgresPostRepository::new(db.clone()));
        let admins = Arc::new(PostgresAdminRepository::new(db.clone()));
        let moderation = Arc::new(PostgresModerationRepository::new(db));

        // Create application services
        Self {
            feed_service: Arc::new(FeedService::new(users.clone(), posts.clone(), config)),
            explore_service: Arc::new(ExploreService::new(posts.clone(), config)),
            account_service: Arc::new(AccountService::new(users.clone())),
            moderation_service: Arc::new(ModerationService::new(moderation, posts.clone())),
            analytics_service: Arc::new(AnalyticsService::new(posts, config)),
            users,
            admins,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn build_router(state: AppState) -> anyhow::Result<Router> {
    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    // (SmartIpKeyExtractor requires X-Forwarded-For headers from reverse proxy)
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    // Rate-limited routes (account lookup reveals which numbers are registered)
    let rate_limited_routes = Router::new()
        .route("/accounts/resolve", get(handlers::resolve_account))
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Signed-in user routes
    let user_routes = Router::new()
        .route("/feed", get(handlers::get_feed))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::user_auth_middleware,
        ));

    // Admin panel API
    let admin_routes = Router::new()
        .route("/moderation-queue", get(handlers::get_moderation_queue))
        .route("/analytics/viral", get(handlers::get_viral_report))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_auth_middleware,
        ));

    Ok(Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public explore endpoints
        .route("/explore/trending", get(handlers::get_trending))
        .route("/hashtags/:tag", get(handlers::get_hashtag_posts))
        .merge(rate_limited_routes)
        .merge(user_routes)
        .nest("/admin-panel/api", admin_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gupshup_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GupShup API...");

    // Load configuration
    let config = Config::from_env();

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let state = AppState::new(db, &config);
    let app = build_router(state)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
