// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! The topo data provider boundary.
//!
//! The editor never talks to the hosted backend itself; the surrounding
//! screen hands it one [`TopoData`] snapshot when the dialog opens. The
//! snapshot is read once per session and never refreshed; concurrent edits
//! to the same topo are out of scope.

use crate::model::{NormPoint, RouteId, TopoImage};
use serde::Deserialize;

/// One route attached to the topo, as loaded from storage.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRecord {
    pub id: RouteId,
    /// Display order of the route on this topo.
    pub number: i32,
    /// Grade and/or name to show near the path.
    pub label: String,
    /// Previously persisted path, empty if none was ever drawn.
    #[serde(default)]
    pub points: Vec<NormPoint>,
}

/// Everything the editor needs for one session.
#[derive(Debug, Clone)]
pub struct TopoData {
    pub image: TopoImage,
    /// Routes belonging to the topo, in display order.
    pub routes: Vec<RouteRecord>,
}

/// Source of topo data, implemented by the host against its backend.
///
/// Errors here are host-defined (network, auth, missing row, ...), so the
/// boundary uses `anyhow` rather than a crate-local error type.
pub trait TopoDataProvider {
    fn load_topo(&self, topo_id: crate::model::TopoId) -> anyhow::Result<TopoData>;
}
