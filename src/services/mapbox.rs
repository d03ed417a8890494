use crate::error::{AppError, Result};
use crate::models::{Coordinates, RoutePath, TransportMode};
use crate::services::directions::DirectionsProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const MAPBOX_DIRECTIONS_BASE_URL: &str = "https://api.mapbox.com/directions/v5/mapbox";

/// How the client authenticates with the directions API.
#[derive(Clone, Debug)]
pub enum AuthMode {
    /// Current default: send `access_token` query param (direct Mapbox).
    DirectToken,
    /// Proxy mode: send `Authorization: Bearer` header.
    BearerHeader,
}

#[derive(Clone)]
pub struct MapboxDirectionsClient {
    client: Client,
    api_key: String,
    base_url: String,
    auth_mode: AuthMode,
}

impl MapboxDirectionsClient {
    pub fn new(api_key: String) -> Self {
        MapboxDirectionsClient {
            client: Client::new(),
            api_key,
            base_url: MAPBOX_DIRECTIONS_BASE_URL.to_string(),
            auth_mode: AuthMode::DirectToken,
        }
    }

    pub fn with_config(api_key: String, base_url: String, auth_mode: AuthMode) -> Self {
        MapboxDirectionsClient {
            client: Client::new(),
            api_key,
            base_url,
            auth_mode,
        }
    }

    /// Get candidate routes for one leg.
    /// Returns every candidate Mapbox offers, in response order.
    async fn get_leg_directions(
        &self,
        source: Coordinates,
        destination: Coordinates,
        mode: &TransportMode,
    ) -> Result<Vec<RoutePath>> {
        // Format coordinates as "lng,lat;lng,lat"
        let coordinates_str = format!(
            "{},{};{},{}",
            source.lng, source.lat, destination.lng, destination.lat
        );

        let url = format!(
            "{}/{}/{}",
            self.base_url,
            mode.mapbox_profile(),
            coordinates_str
        );

        tracing::debug!(
            mode = %mode.mapbox_profile(),
            "Mapbox leg request: ({:.5}, {:.5}) -> ({:.5}, {:.5})",
            source.lat, source.lng, destination.lat, destination.lng
        );

        let mut request = self.client.get(&url).query(&[
            ("geometries", "geojson"),
            ("overview", "full"),
            ("steps", "false"),
            ("alternatives", "true"),
        ]);

        match self.auth_mode {
            AuthMode::DirectToken => {
                request = request.query(&[("access_token", &self.api_key)]);
            }
            AuthMode::BearerHeader => {
                request = request.bearer_auth(&self.api_key);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                "Mapbox API HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::DirectionsApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let directions: MapboxDirectionsApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Failed to parse response: {}", e)))?;

        if directions.routes.is_empty() {
            tracing::warn!(
                mode = %mode.mapbox_profile(),
                "Mapbox returned 0 candidate routes for leg"
            );
        }

        let paths: Vec<RoutePath> = directions
            .routes
            .iter()
            .map(|route| RoutePath {
                distance_meters: route.distance,
                duration_seconds: route.duration,
                geometry: route
                    .geometry
                    .coordinates
                    .iter()
                    .map(|c| Coordinates {
                        lat: c[1],
                        lng: c[0],
                    })
                    .collect(),
            })
            .collect();

        if let Some(first) = paths.first() {
            tracing::debug!(
                candidates = paths.len(),
                distance_miles = %format!("{:.2}", first.distance_miles()),
                duration_min = first.duration_minutes(),
                "Mapbox leg response: {} candidates, first {:.2}mi / {}min",
                paths.len(), first.distance_miles(), first.duration_minutes()
            );
        }

        Ok(paths)
    }
}

#[async_trait]
impl DirectionsProvider for MapboxDirectionsClient {
    async fn request_route(
        &self,
        source: Coordinates,
        destination: Coordinates,
        mode: &TransportMode,
    ) -> Result<Vec<RoutePath>> {
        self.get_leg_directions(source, destination, mode).await
    }
}

// Mapbox API response types

#[derive(Debug, Deserialize)]
struct MapboxDirectionsApiResponse {
    routes: Vec<MapboxRoute>,
    #[allow(dead_code)]
    code: String,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    distance: f64, // meters
    duration: f64, // seconds
    geometry: MapboxGeometry,
}

#[derive(Debug, Deserialize)]
struct MapboxGeometry {
    coordinates: Vec<[f64; 2]>, // [lng, lat] pairs
    #[allow(dead_code)]
    #[serde(rename = "type")]
    geometry_type: String,
}
