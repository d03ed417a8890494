pub mod directions;
pub mod geocoding;
pub mod map_sink;
pub mod mapbox;
pub mod orchestrator;
pub mod planner;

pub use directions::DirectionsProvider;
pub use map_sink::MapSink;
pub use orchestrator::RouteOrchestrator;
