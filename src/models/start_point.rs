use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// A chosen loop origin: display label, coordinate, and the requested loop
/// distance in miles. Exactly one is active per submission; a resubmission
/// replaces it wholesale. The origin is always carried by explicit reference,
/// never looked up by position in a marker collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartPoint {
    pub title: String,
    pub coordinates: Coordinates,
    pub distance_miles: f64,
}

impl StartPoint {
    pub fn new(title: impl Into<String>, coordinates: Coordinates, distance_miles: f64) -> Self {
        StartPoint {
            title: title.into(),
            coordinates,
            distance_miles,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.distance_miles.is_finite() || self.distance_miles <= 0.0 {
            return Err(format!(
                "distance_miles must be a positive finite number, got {}",
                self.distance_miles
            ));
        }
        Coordinates::new(self.coordinates.lat, self.coordinates.lng)?;
        Ok(())
    }
}
