use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{ClassifierClient, WeatherClient};
use services::{LabelStore, RegionStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub weather: WeatherClient,
    pub classifier: ClassifierClient,
    pub regions: Arc<RegionStore>,
    pub labels: Arc<LabelStore>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "krishi_server=debug,tower_http=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!("Starting Krishi Advisory Platform in {} mode", config.environment);

    // Setup database connection pool
    let db = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        sqlx::migrate!("./migrations").run(&db).await?;
        tracing::info!("Database migrations completed");
    }

    // External service clients
    let weather = WeatherClient::new(&config.weather)?;
    let classifier = ClassifierClient::new(&config.classifier)?;

    // Load file-backed data sources at startup
    let regions = Arc::new(RegionStore::load(&config.data.regions_file)?);
    tracing::info!("Loaded {} priority-region rows", regions.len());

    let labels = Arc::new(LabelStore::load(&config.data.labels_file)?);
    tracing::info!("Loaded {} disease class labels", labels.len());

    let port = config.server.port;
    let state = AppState {
        db,
        config: Arc::new(config),
        weather,
        classifier,
        regions,
        labels,
    };

    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(|| async { "Krishi Advisory Platform API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
