// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

// App state for sharing across the application
use services::geocoding::MapboxGeocodingClient;
use services::map_sink::GeoJsonMapSink;
use services::orchestrator::RouteOrchestrator;
use std::sync::Arc;

pub struct AppState {
    pub orchestrator: RouteOrchestrator,
    pub map: Arc<GeoJsonMapSink>,
    pub geocoding: MapboxGeocodingClient,
}
