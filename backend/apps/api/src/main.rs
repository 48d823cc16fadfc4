//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{AuthConfig, HttpIdentityProvider, IdentityConfig, PgDirectoryRepository};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use catalog::{CatalogAppState, HttpImageStore, PgCatalogStore, StorageConfig};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Session cookie policy follows the deployment environment
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
    let auth_config = if app_env == "production" {
        AuthConfig::default()
    } else {
        AuthConfig::development()
    };

    // External services (identity provider, object storage)
    let identity_url =
        env::var("IDENTITY_URL").expect("IDENTITY_URL must be set in environment");
    let storage_url = env::var("STORAGE_URL").expect("STORAGE_URL must be set in environment");
    let api_key = env::var("IDENTITY_API_KEY").ok();

    let service_client = platform::http::service_client()?;

    let provider = HttpIdentityProvider::new(
        service_client.clone(),
        IdentityConfig {
            base_url: identity_url,
            api_key: api_key.clone(),
        },
    );
    let directory = PgDirectoryRepository::new(pool.clone());

    // Auth routes plus the gate state the catalog mutations share
    let auth_routes =
        auth::auth_router_generic(provider.clone(), directory.clone(), auth_config.clone());
    let gate = auth::auth_gate_state(
        Arc::new(provider),
        Arc::new(directory),
        Arc::new(auth_config),
    );

    // Catalog: public reads, admin-gated mutations
    let catalog_state = CatalogAppState::new(
        Arc::new(PgCatalogStore::new(pool.clone())),
        Arc::new(HttpImageStore::new(
            service_client,
            StorageConfig::new(storage_url, api_key),
        )),
    );
    let product_routes = catalog::public_routes(catalog_state.clone()).merge(
        catalog::admin_routes(catalog_state)
            .route_layer(middleware::from_fn(auth::require_admin))
            .route_layer(middleware::from_fn_with_state(
                gate,
                auth::authenticate::<HttpIdentityProvider, PgDirectoryRepository>,
            )),
    );

    // CORS: the session cookie crosses the browser origin boundary,
    // so credentials must be allowed and origins listed explicitly
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/products", product_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
