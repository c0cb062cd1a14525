// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod selection;
pub mod session;
pub mod viewport;

pub use selection::{RouteSelection, SelectTrigger};
pub use session::{EditorEvent, EditorSession, Modifiers, RouteListEntry, ViewMode};
pub use viewport::Viewport;
