use crate::models::{Coordinates, StartPoint};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Walk,
    Bike,
}

impl TransportMode {
    /// Returns the Mapbox profile name for this transport mode
    pub fn mapbox_profile(&self) -> &str {
        match self {
            TransportMode::Walk => "walking",
            TransportMode::Bike => "cycling",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Walk => write!(f, "walk"),
            TransportMode::Bike => write!(f, "bike"),
        }
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walk" | "walking" => Ok(TransportMode::Walk),
            "bike" | "cycling" | "bicycle" => Ok(TransportMode::Bike),
            _ => Err(format!("Invalid transport mode: '{}'", s)),
        }
    }
}

/// One candidate polyline returned by the directions provider for a leg.
/// Geometry is opaque to the routing pipeline: it is forwarded to the map
/// sink and never measured against the requested loop distance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutePath {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: Vec<Coordinates>,
}

impl RoutePath {
    pub fn distance_miles(&self) -> f64 {
        self.distance_meters / 1609.344
    }

    pub fn duration_minutes(&self) -> u32 {
        (self.duration_seconds / 60.0).round() as u32
    }
}

/// Terminal state of one leg's directions lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum LegStatus {
    /// Provider answered; every candidate path was published to the sink.
    /// Zero candidates is still a resolution, it just publishes nothing.
    Resolved { paths_published: usize },
    /// Provider errored; the leg contributes nothing and no sibling is
    /// cancelled or retried.
    Failed,
    /// A newer plan replaced this one before the leg completed; the result
    /// was discarded unpublished.
    Superseded,
}

/// Outcome of a single leg: which consecutive plan pair it covered and how
/// its lookup ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegReport {
    pub leg: usize,
    pub source: Coordinates,
    pub destination: Coordinates,
    #[serde(flatten)]
    pub status: LegStatus,
}

/// Aggregate result of one loop dispatch. There is no whole-operation error
/// state: four failed legs are four `Failed` reports and an empty map, not an
/// `Err`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoopSummary {
    pub plan_id: Uuid,
    pub legs: Vec<LegReport>,
    pub legs_succeeded: usize,
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct LoopRouteRequest {
    /// Display label for the start marker.
    #[serde(default = "default_start_title")]
    pub title: String,
    pub start_point: Coordinates,
    pub distance_miles: f64,
    #[serde(default)]
    pub mode: TransportMode,
}

fn default_start_title() -> String {
    "Start".to_string()
}

impl LoopRouteRequest {
    pub fn validate(&self) -> Result<(), String> {
        self.start_point().validate()
    }

    /// The active start point this request submits.
    pub fn start_point(&self) -> StartPoint {
        StartPoint::new(self.title.clone(), self.start_point, self.distance_miles)
    }
}
