pub mod coordinates;
pub mod geo;
pub mod route;
pub mod start_point;

pub use coordinates::Coordinates;
pub use geo::BoundingBox;
pub use route::{LegReport, LegStatus, LoopSummary, RoutePath, TransportMode};
pub use start_point::StartPoint;
