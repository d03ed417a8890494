use crate::constants::GEOCODE_RESULT_LIMIT;
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::services::mapbox::AuthMode;
use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const MAPBOX_GEOCODING_BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

/// One place-search candidate: the resolved display name and its coordinate.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceMatch {
    pub name: String,
    pub coordinates: Coordinates,
}

/// Forward-geocoding client resolving a typed place name to coordinate
/// candidates. Results are cached in memory with TTL + bounded capacity since
/// place names are stable and users retype the same queries.
#[derive(Clone)]
pub struct MapboxGeocodingClient {
    client: Client,
    api_key: String,
    base_url: String,
    auth_mode: AuthMode,
    cache: Cache<String, Arc<Vec<PlaceMatch>>>,
}

impl MapboxGeocodingClient {
    pub fn new(api_key: String, cache_ttl_seconds: u64, cache_max_entries: u64) -> Self {
        Self::with_config(
            api_key,
            MAPBOX_GEOCODING_BASE_URL.to_string(),
            AuthMode::DirectToken,
            cache_ttl_seconds,
            cache_max_entries,
        )
    }

    pub fn with_config(
        api_key: String,
        base_url: String,
        auth_mode: AuthMode,
        cache_ttl_seconds: u64,
        cache_max_entries: u64,
    ) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(cache_ttl_seconds))
            .max_capacity(cache_max_entries)
            .build();

        MapboxGeocodingClient {
            client: Client::new(),
            api_key,
            base_url,
            auth_mode,
            cache,
        }
    }

    /// Resolve a place-name query to up to `GEOCODE_RESULT_LIMIT` candidates,
    /// best match first (backend ordering).
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceMatch>> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(AppError::InvalidRequest(
                "Search query must not be empty".to_string(),
            ));
        }

        if let Some(cached) = self.cache.get(&normalized).await {
            tracing::debug!("Geocode cache hit for query: {}", normalized);
            return Ok((*cached).clone());
        }

        let url = format!("{}/{}.json", self.base_url, urlencoding::encode(&normalized));

        let limit = GEOCODE_RESULT_LIMIT.to_string();
        let mut request = self.client.get(&url).query(&[("limit", limit.as_str())]);

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
            .map_err(|e| AppError::GeocodingApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                "Geocoding API HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::GeocodingApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let geocoding: MapboxGeocodingApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::GeocodingApi(format!("Failed to parse response: {}", e)))?;

        let matches: Vec<PlaceMatch> = geocoding
            .features
            .into_iter()
            .filter_map(|feature| {
                // GeoJSON center is [lng, lat]; out-of-range centers are dropped
                Coordinates::new(feature.center[1], feature.center[0])
                    .ok()
                    .map(|coordinates| PlaceMatch {
                        name: feature.place_name,
                        coordinates,
                    })
            })
            .collect();

        tracing::debug!(
            candidates = matches.len(),
            "Geocode query '{}' resolved to {} candidates",
            normalized,
            matches.len()
        );

        self.cache
            .insert(normalized, Arc::new(matches.clone()))
            .await;

        Ok(matches)
    }
}

// Mapbox Geocoding API response types

#[derive(Debug, Deserialize)]
struct MapboxGeocodingApiResponse {
    features: Vec<MapboxGeocodingFeature>,
}

#[derive(Debug, Deserialize)]
struct MapboxGeocodingFeature {
    place_name: String,
    center: [f64; 2], // [lng, lat]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_rejected() {
        let client = MapboxGeocodingClient::new("pk.test".to_string(), 60, 10);
        let err = tokio_test::block_on(client.search("   ")).unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[test]
    fn test_response_parsing() {
        let body = serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "place_name": "Harvard Yard, Cambridge, Massachusetts",
                    "center": [-71.11688, 42.37444]
                },
                {
                    "place_name": "Harvard Square, Cambridge, Massachusetts",
                    "center": [-71.11903, 42.37298]
                }
            ]
        });

        let parsed: MapboxGeocodingApiResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.features.len(), 2);
        assert_eq!(parsed.features[0].center[1], 42.37444);
    }
}
