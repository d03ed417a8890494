use axum::Router;
use looproute::config::Config;
use looproute::constants::{
    DEMO_START_DISTANCE_MILES, DEMO_START_LAT, DEMO_START_LNG, DEMO_START_TITLE,
};
use looproute::models::{Coordinates, StartPoint};
use looproute::services::geocoding::MapboxGeocodingClient;
use looproute::services::map_sink::{GeoJsonMapSink, MapSink};
use looproute::services::mapbox::{AuthMode, MapboxDirectionsClient};
use looproute::services::orchestrator::RouteOrchestrator;
use looproute::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "looproute=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting looproute API server");

    // Initialize services
    let directions: Arc<dyn looproute::services::DirectionsProvider> =
        if let Some(ref base_url) = config.mapbox_base_url {
            Arc::new(MapboxDirectionsClient::with_config(
                config.mapbox_api_key.clone(),
                base_url.clone(),
                AuthMode::BearerHeader,
            ))
        } else {
            Arc::new(MapboxDirectionsClient::new(config.mapbox_api_key.clone()))
        };

    let geocoding = MapboxGeocodingClient::new(
        config.mapbox_api_key.clone(),
        config.geocode_cache_ttl,
        config.geocode_cache_max_entries,
    );

    let map = Arc::new(GeoJsonMapSink::new());
    let orchestrator =
        RouteOrchestrator::new(directions, map.clone() as Arc<dyn looproute::services::MapSink>);

    // Seed the map with the demo start marker so the first snapshot isn't empty
    let demo = StartPoint::new(
        DEMO_START_TITLE,
        Coordinates {
            lat: DEMO_START_LAT,
            lng: DEMO_START_LNG,
        },
        DEMO_START_DISTANCE_MILES,
    );
    map.add_start_marker(&demo);

    // Create application state
    let state = Arc::new(AppState {
        orchestrator,
        map,
        geocoding,
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", looproute::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
