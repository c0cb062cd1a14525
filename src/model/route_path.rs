// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! In-memory path data for the routes on one topo.
//!
//! Points live in normalized image space: `(x, y)` as fractions of the topo
//! image's intrinsic size, origin at the top-left. That is the only
//! representation that is ever stored or persisted; screen pixels are derived
//! per frame by the viewport and thrown away. Keeping paths normalized is
//! what makes them survive container resizes, window zoom, and display of the
//! same topo at a different resolution than it was drawn at.

use crate::model::RouteId;
use crate::theme;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// A path point in normalized image space, `0 ≤ x,y ≤ 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormPoint {
    pub x: f64,
    pub y: f64,
}

impl NormPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp into the unit square.
    ///
    /// Points produced by the viewport are already in range; this is the
    /// defense for externally supplied data (a corrupted persisted record
    /// must never crash the editor, per the input-data error policy).
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }

    /// True if already inside the unit square.
    pub fn in_bounds(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// The editable line of one route on one topo.
#[derive(Debug, Clone)]
pub struct RoutePath {
    /// Foreign key to the route entity owned by the routes screen.
    pub route_id: RouteId,
    /// Display order of the route on this topo; list ordering key.
    pub number: i32,
    /// Ordered points in normalized image space. Empty means "no path
    /// drawn yet"; the route still appears in the list so an equipper
    /// can select it and start drawing.
    pub points: Vec<NormPoint>,
    /// Stable display color, derived from the route id so the same route
    /// renders identically across sessions.
    pub color: Color,
    /// Grade and/or name shown near the path.
    pub label: String,
}

impl RoutePath {
    pub fn new(route_id: RouteId, number: i32, label: String, points: Vec<NormPoint>) -> Self {
        let points = points.into_iter().map(NormPoint::clamped).collect();
        Self {
            route_id,
            number,
            points,
            color: theme::route_color(route_id),
            label,
        }
    }

    /// True once at least one point exists; empty paths render nothing.
    pub fn has_line(&self) -> bool {
        !self.points.is_empty()
    }
}

/// The collection of route paths for one topo, keyed by route id and
/// ordered by `number` for list display.
#[derive(Debug, Clone, Default)]
pub struct PathSet {
    paths: Vec<RoutePath>,
}

impl PathSet {
    /// Build the set from provider records, one entry per route.
    ///
    /// Routes arrive with whatever points were previously persisted
    /// (possibly none); out-of-range values are clamped, not rejected.
    pub fn load(mut paths: Vec<RoutePath>) -> Self {
        paths.sort_by_key(|p| p.number);
        Self { paths }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Paths in `number` order.
    pub fn iter(&self) -> impl Iterator<Item = &RoutePath> {
        self.paths.iter()
    }

    /// The first route in list order, used for the initial selection.
    pub fn first_route(&self) -> Option<RouteId> {
        self.paths.first().map(|p| p.route_id)
    }

    pub fn get(&self, route_id: RouteId) -> Option<&RoutePath> {
        self.paths.iter().find(|p| p.route_id == route_id)
    }

    pub fn get_mut(&mut self, route_id: RouteId) -> Option<&mut RoutePath> {
        self.paths.iter_mut().find(|p| p.route_id == route_id)
    }

    /// Replace the point sequence for a route, clamping each point into
    /// the unit square. Ordering is the caller's responsibility.
    pub fn set_points(&mut self, route_id: RouteId, points: Vec<NormPoint>) {
        if let Some(path) = self.get_mut(route_id) {
            path.points = points.into_iter().map(NormPoint::clamped).collect();
        } else {
            tracing::warn!("set_points for unknown {route_id}");
        }
    }
}
