//! Sequential multi-leg routing orchestration.
//!
//! Takes the planner's four-point loop, issues one directions request per
//! leg, and publishes each leg's candidate paths to the map sink as that leg
//! resolves. Legs are fully independent: they share no state, complete in
//! any order, and one leg's failure never cancels, retries, or rolls back a
//! sibling. A loop with one broken leg still shows the other three.

use crate::models::{Coordinates, LegReport, LegStatus, LoopSummary, StartPoint, TransportMode};
use crate::services::directions::DirectionsProvider;
use crate::services::map_sink::MapSink;
use crate::services::planner;
use futures::future::join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub struct RouteOrchestrator {
    directions: Arc<dyn DirectionsProvider>,
    sink: Arc<dyn MapSink>,
    /// Bumped on every dispatch. Legs completing under an older generation
    /// discard their results instead of publishing into a newer plan's map.
    generation: AtomicU64,
}

impl RouteOrchestrator {
    pub fn new(directions: Arc<dyn DirectionsProvider>, sink: Arc<dyn MapSink>) -> Self {
        RouteOrchestrator {
            directions,
            sink,
            generation: AtomicU64::new(0),
        }
    }

    /// Plan and route one closed loop from `start`.
    ///
    /// Clears the sink (previous loop's paths and markers) before issuing the
    /// new legs, re-adds the start marker, then resolves all four legs
    /// concurrently. Never fails: leg errors are absorbed into per-leg
    /// reports, and four failed legs degrade to an empty map plus a warning.
    pub async fn route_loop(&self, start: &StartPoint, mode: &TransportMode) -> LoopSummary {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let plan_id = Uuid::new_v4();
        let plan = planner::plan_loop(start.coordinates, start.distance_miles);

        tracing::info!(
            plan_id = %plan_id,
            lat = start.coordinates.lat,
            lng = start.coordinates.lng,
            distance_miles = start.distance_miles,
            mode = %mode,
            "Dispatching loop: '{}' ({:.5}, {:.5}), {:.1}mi",
            start.title, start.coordinates.lat, start.coordinates.lng, start.distance_miles
        );

        self.sink.clear_all();
        self.sink.add_start_marker(start);

        let leg_futures = plan
            .legs()
            .into_iter()
            .enumerate()
            .map(|(index, (source, destination))| {
                self.run_leg(generation, index + 1, source, destination, mode)
            });

        let legs = join_all(leg_futures).await;

        let legs_succeeded = legs
            .iter()
            .filter(|report| matches!(report.status, LegStatus::Resolved { paths_published } if paths_published > 0))
            .count();

        if legs_succeeded == 0 {
            tracing::warn!(
                plan_id = %plan_id,
                "No leg of the loop produced a path; map shows an empty loop"
            );
        } else {
            tracing::info!(
                plan_id = %plan_id,
                legs_succeeded = legs_succeeded,
                "Loop dispatched: {}/{} legs produced paths",
                legs_succeeded,
                legs.len()
            );
        }

        LoopSummary {
            plan_id,
            legs,
            legs_succeeded,
        }
    }

    /// Resolve one leg and publish its candidates.
    ///
    /// The staleness check is best-effort: it runs once at completion, so a
    /// completion racing a concurrent resubmission can still slip a path in
    /// after the clear. Acceptable for a polling map surface; sinks needing a
    /// hard guarantee can filter on generation themselves.
    async fn run_leg(
        &self,
        generation: u64,
        leg: usize,
        source: Coordinates,
        destination: Coordinates,
        mode: &TransportMode,
    ) -> LegReport {
        let result = self.directions.request_route(source, destination, mode).await;

        let status = if self.is_stale(generation) {
            tracing::debug!(leg = leg, "Discarding result for superseded plan");
            LegStatus::Superseded
        } else {
            match result {
                Ok(paths) => {
                    for path in &paths {
                        self.sink.add_path(path);
                        self.sink.focus_on(path);
                    }
                    if paths.is_empty() {
                        tracing::warn!(leg = leg, "Leg resolved with zero candidate paths");
                    }
                    LegStatus::Resolved {
                        paths_published: paths.len(),
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        leg = leg,
                        error = %e,
                        "Leg routing failed; remaining legs continue"
                    );
                    LegStatus::Failed
                }
            }
        };

        LegReport {
            leg,
            source,
            destination,
            status,
        }
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }
}
