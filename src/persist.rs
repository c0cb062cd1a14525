// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! Debounced persistence of route paths.
//!
//! Every committed edit (point added, drag released, point removed) wants to
//! reach durable storage, but a burst of drags should not turn into a burst
//! of writes. Saves are therefore debounced per route: a commit (re)queues
//! the route's full point array, and the queue entry is written out once the
//! route has been quiet for [`DEBOUNCE_QUIET`], or unconditionally once
//! [`DEBOUNCE_MAX`] has elapsed since it was first queued, so an edit is
//! never left unsaved indefinitely.
//!
//! The saver is a pure state machine over caller-supplied `Instant`s: the
//! session pumps it from `tick` and flushes it synchronously on teardown.
//! No timers, no runtime, fully testable.
//!
//! A failed save is never silently dropped. The payload is parked in a
//! failed set, reported to the host, and retried either explicitly or
//! implicitly by the next commit to the same route (which carries the full
//! current point array and so supersedes the parked payload).

use crate::model::{NormPoint, RouteId};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Quiet period after the last commit before a queued save is written.
pub const DEBOUNCE_QUIET: Duration = Duration::from_millis(400);

/// Upper bound on how long a queued save may be deferred by further
/// commits to the same route.
pub const DEBOUNCE_MAX: Duration = Duration::from_secs(2);

/// Error from the external path persistence service.
#[derive(Debug, Clone, Error)]
pub enum SaveError {
    /// The backend refused the write (validation, permissions, ...).
    #[error("path store rejected save: {0}")]
    Rejected(String),
    /// The backend could not be reached.
    #[error("path store unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage for route paths.
///
/// Points are always normalized `[0,1]²` floats; how the service stores
/// them (the reference backend keeps a JSON array column per route) is its
/// own business.
pub trait PathStore {
    fn save(&mut self, route_id: RouteId, points: &[NormPoint]) -> Result<(), SaveError>;
}

#[derive(Debug, Clone)]
struct Pending {
    points: Vec<NormPoint>,
    /// When this route first entered the queue; bounds the total deferral.
    first_queued: Instant,
    /// Last commit; the quiet period restarts from here.
    last_commit: Instant,
}

/// Per-route write coalescing with bounded delay and failure parking.
#[derive(Debug, Default)]
pub struct DebouncedSaver {
    pending: HashMap<RouteId, Pending>,
    failed: HashMap<RouteId, Vec<NormPoint>>,
}

impl DebouncedSaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Routes whose last save attempt failed and has not been superseded.
    pub fn failed_routes(&self) -> Vec<RouteId> {
        let mut ids: Vec<RouteId> = self.failed.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Queue the full current point array of a route for saving.
    ///
    /// Rapid successive commits to the same route coalesce into one write.
    /// A new commit supersedes any parked failed payload for the route.
    pub fn schedule(&mut self, route_id: RouteId, points: Vec<NormPoint>, now: Instant) {
        self.failed.remove(&route_id);
        match self.pending.entry(route_id) {
            std::collections::hash_map::Entry::Occupied(mut e) => {
                let p = e.get_mut();
                p.points = points;
                p.last_commit = now;
            }
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(Pending {
                    points,
                    first_queued: now,
                    last_commit: now,
                });
            }
        }
    }

    /// Write out every queued entry that is due at `now`. Returns the routes
    /// whose save failed.
    pub fn poll(&mut self, now: Instant, store: &mut dyn PathStore) -> Vec<RouteId> {
        let due: Vec<RouteId> = self
            .pending
            .iter()
            .filter(|(_, p)| {
                now.duration_since(p.last_commit) >= DEBOUNCE_QUIET
                    || now.duration_since(p.first_queued) >= DEBOUNCE_MAX
            })
            .map(|(&id, _)| id)
            .collect();

        self.write_out(due, store)
    }

    /// Synchronously write out everything still queued, due or not. Called
    /// on editor teardown so nothing beyond the last debounce window is
    /// lost.
    pub fn flush(&mut self, store: &mut dyn PathStore) -> Vec<RouteId> {
        let all: Vec<RouteId> = self.pending.keys().copied().collect();
        self.write_out(all, store)
    }

    /// Re-attempt every parked failed payload immediately.
    pub fn retry_failed(&mut self, store: &mut dyn PathStore) -> Vec<RouteId> {
        let mut failures = Vec::new();
        let parked = std::mem::take(&mut self.failed);
        for (route_id, points) in parked {
            self.attempt(route_id, points, store, &mut failures);
        }
        failures.sort();
        failures
    }

    fn write_out(&mut self, mut ids: Vec<RouteId>, store: &mut dyn PathStore) -> Vec<RouteId> {
        ids.sort();
        let mut failures = Vec::new();
        for route_id in ids {
            if let Some(p) = self.pending.remove(&route_id) {
                self.attempt(route_id, p.points, store, &mut failures);
            }
        }
        failures
    }

    fn attempt(
        &mut self,
        route_id: RouteId,
        points: Vec<NormPoint>,
        store: &mut dyn PathStore,
        failures: &mut Vec<RouteId>,
    ) {
        match store.save(route_id, &points) {
            Ok(()) => {
                tracing::debug!("saved {} points for {route_id}", points.len());
            }
            Err(err) => {
                tracing::warn!("save failed for {route_id}: {err}");
                self.failed.insert(route_id, points);
                failures.push(route_id);
            }
        }
    }
}
