// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! Typed identifiers for topos and routes.
//!
//! Both wrap the stable `i64` keys assigned by the backing store. They are
//! never generated locally; the data provider hands them to us and they are
//! used as map keys, selection state, and save targets for the lifetime of a
//! session.

use serde::{Deserialize, Serialize};

/// Identifier of a topo image record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopoId(pub i64);

/// Identifier of a route record (owned by an external collaborator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub i64);

impl std::fmt::Display for TopoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "topo:{}", self.0)
    }
}

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "route:{}", self.0)
    }
}
