use crate::models::{BoundingBox, Coordinates, RoutePath, StartPoint};
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde::Serialize;
use serde_json::{json, Map};
use std::sync::Mutex;

/// The rendering surface the routing pipeline publishes into. One shared
/// mutable sink; leg completions may arrive on any task in any order, so
/// implementations synchronize internally and every method takes `&self`.
pub trait MapSink: Send + Sync {
    /// Remove all previously drawn paths and start markers.
    fn clear_all(&self);
    /// Render one polyline.
    fn add_path(&self, path: &RoutePath);
    /// Adjust the viewport to contain the path's bounding region.
    fn focus_on(&self, path: &RoutePath);
    /// Render the start marker for the active start point.
    fn add_start_marker(&self, point: &StartPoint);
}

/// Serializable view of the sink's current contents.
#[derive(Debug, Clone, Serialize)]
pub struct MapSnapshot {
    pub features: FeatureCollection,
    pub viewport: Option<BoundingBox>,
}

#[derive(Default)]
struct SinkState {
    features: Vec<Feature>,
    viewport: Option<BoundingBox>,
}

/// `MapSink` that accumulates published geometry as GeoJSON features, for
/// clients that poll the current map state over HTTP. Path polylines become
/// LineString features, start markers become Point features, and the
/// viewport is the union of every focused path's bounding box.
#[derive(Default)]
pub struct GeoJsonMapSink {
    state: Mutex<SinkState>,
}

impl GeoJsonMapSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MapSnapshot {
        let state = self.state.lock().expect("map sink lock poisoned");
        MapSnapshot {
            features: FeatureCollection {
                bbox: None,
                features: state.features.clone(),
                foreign_members: None,
            },
            viewport: state.viewport,
        }
    }

    fn line_string(geometry: &[Coordinates]) -> Geometry {
        Geometry::new(Value::LineString(
            geometry.iter().map(|c| vec![c.lng, c.lat]).collect(),
        ))
    }

    fn properties(pairs: serde_json::Value) -> Option<Map<String, serde_json::Value>> {
        match pairs {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl MapSink for GeoJsonMapSink {
    fn clear_all(&self) {
        let mut state = self.state.lock().expect("map sink lock poisoned");
        state.features.clear();
        state.viewport = None;
        tracing::debug!("Map sink cleared");
    }

    fn add_path(&self, path: &RoutePath) {
        let feature = Feature {
            bbox: None,
            geometry: Some(Self::line_string(&path.geometry)),
            id: None,
            properties: Self::properties(json!({
                "kind": "route-path",
                "distance_miles": path.distance_miles(),
                "duration_minutes": path.duration_minutes(),
            })),
            foreign_members: None,
        };

        let mut state = self.state.lock().expect("map sink lock poisoned");
        state.features.push(feature);
    }

    fn focus_on(&self, path: &RoutePath) {
        let Some(bounds) = BoundingBox::from_path(&path.geometry) else {
            return;
        };

        let mut state = self.state.lock().expect("map sink lock poisoned");
        state.viewport = Some(match state.viewport {
            Some(current) => current.union(&bounds),
            None => bounds,
        });
    }

    fn add_start_marker(&self, point: &StartPoint) {
        let feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![
                point.coordinates.lng,
                point.coordinates.lat,
            ]))),
            id: None,
            properties: Self::properties(json!({
                "kind": "start-marker",
                "title": point.title,
                "distance_miles": point.distance_miles,
            })),
            foreign_members: None,
        };

        let mut state = self.state.lock().expect("map sink lock poisoned");
        state.features.push(feature);
    }
}
