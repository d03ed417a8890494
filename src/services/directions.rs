use crate::error::Result;
use crate::models::{Coordinates, RoutePath, TransportMode};
use async_trait::async_trait;

/// Asynchronous directions backend, one request per loop leg.
///
/// `Ok(vec![])` means the provider answered with zero candidates; that is a
/// successful resolution that simply publishes nothing, distinct from `Err`.
/// When multiple candidates are returned they are forwarded in provider
/// order, without deduplication or ranking.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn request_route(
        &self,
        source: Coordinates,
        destination: Coordinates,
        mode: &TransportMode,
    ) -> Result<Vec<RoutePath>>;
}
