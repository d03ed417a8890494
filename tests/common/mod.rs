// Each integration-test binary uses a subset of these helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use looproute::error::Result;
use looproute::models::{Coordinates, RoutePath, StartPoint, TransportMode};
use looproute::services::{DirectionsProvider, MapSink};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;

/// A plausible single-candidate path between two points.
pub fn path_between(source: Coordinates, destination: Coordinates) -> RoutePath {
    RoutePath {
        distance_meters: 1609.344,
        duration_seconds: 1200.0,
        geometry: vec![source, destination],
    }
}

pub fn pennypacker() -> StartPoint {
    StartPoint::new(
        "Pennypacker",
        Coordinates {
            lat: 42.37265,
            lng: -71.11372,
        },
        4.0,
    )
}

/// Directions stub that consumes scripted responses in call order. Legs are
/// polled in plan order and the stub resolves synchronously, so response N
/// answers leg N+1.
pub struct ScriptedDirections {
    responses: Mutex<VecDeque<Result<Vec<RoutePath>>>>,
    /// When the script runs dry, echo a single path between the endpoints.
    echo_when_exhausted: bool,
}

impl ScriptedDirections {
    pub fn new(responses: Vec<Result<Vec<RoutePath>>>) -> Self {
        ScriptedDirections {
            responses: Mutex::new(responses.into()),
            echo_when_exhausted: false,
        }
    }

    /// Stub with no script: every call succeeds with one echoed path.
    pub fn echoing() -> Self {
        ScriptedDirections {
            responses: Mutex::new(VecDeque::new()),
            echo_when_exhausted: true,
        }
    }
}

#[async_trait]
impl DirectionsProvider for ScriptedDirections {
    async fn request_route(
        &self,
        source: Coordinates,
        destination: Coordinates,
        _mode: &TransportMode,
    ) -> Result<Vec<RoutePath>> {
        let scripted = self.responses.lock().unwrap().pop_front();
        match scripted {
            Some(response) => response,
            None if self.echo_when_exhausted => Ok(vec![path_between(source, destination)]),
            None => panic!("ScriptedDirections ran out of responses"),
        }
    }
}

/// Directions stub whose first `gated_calls` requests block until released,
/// for exercising completions that race a resubmission. Later requests echo
/// immediately.
pub struct GatedDirections {
    seq: AtomicUsize,
    gated_calls: usize,
    release: watch::Receiver<bool>,
}

impl GatedDirections {
    pub fn new(gated_calls: usize) -> (Self, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        (
            GatedDirections {
                seq: AtomicUsize::new(0),
                gated_calls,
                release: rx,
            },
            tx,
        )
    }

    pub fn calls_started(&self) -> usize {
        self.seq.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectionsProvider for GatedDirections {
    async fn request_route(
        &self,
        source: Coordinates,
        destination: Coordinates,
        _mode: &TransportMode,
    ) -> Result<Vec<RoutePath>> {
        let call = self.seq.fetch_add(1, Ordering::SeqCst);
        if call < self.gated_calls {
            let mut release = self.release.clone();
            while !*release.borrow() {
                release
                    .changed()
                    .await
                    .expect("gate sender dropped before release");
            }
        }
        Ok(vec![path_between(source, destination)])
    }
}

/// Everything the routing pipeline did to the map, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    ClearAll,
    AddPath(RoutePath),
    FocusOn(RoutePath),
    AddStartMarker(StartPoint),
}

#[derive(Default)]
pub struct RecordingMapSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingMapSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count_paths_added(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SinkEvent::AddPath(_)))
            .count()
    }

    pub fn count_focus_calls(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SinkEvent::FocusOn(_)))
            .count()
    }

    pub fn count_clears(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SinkEvent::ClearAll))
            .count()
    }
}

impl MapSink for RecordingMapSink {
    fn clear_all(&self) {
        self.events.lock().unwrap().push(SinkEvent::ClearAll);
    }

    fn add_path(&self, path: &RoutePath) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::AddPath(path.clone()));
    }

    fn focus_on(&self, path: &RoutePath) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::FocusOn(path.clone()));
    }

    fn add_start_marker(&self, point: &StartPoint) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::AddStartMarker(point.clone()));
    }
}
