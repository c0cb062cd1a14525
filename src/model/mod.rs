// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! Data model: identifiers, the topo image, and route path geometry.

mod ids;
mod route_path;
mod topo;

pub use ids::{RouteId, TopoId};
pub use route_path::{NormPoint, PathSet, RoutePath};
pub use topo::TopoImage;
