// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! Topo path editor: draw, select, and persist climbing-route lines over a
//! crag photograph.
//!
//! The crate is the editing core of a route-cataloguing app's topo screen.
//! A host UI opens an [`EditorSession`] with one [`provider::TopoData`]
//! snapshot, forwards pointer events and route-list clicks to it, paints it
//! each frame through a [`render::DrawSurface`] implementation, and drains
//! [`EditorEvent`]s for its own notifications. Route paths live in
//! normalized `[0,1]²` image coordinates throughout and are persisted per
//! route through a debounced [`persist::PathStore`].
//!
//! ```no_run
//! use topo_editor::{EditorSession, Modifiers, ViewMode};
//! use topo_editor::model::TopoId;
//! use topo_editor::provider::TopoDataProvider;
//! # fn open(provider: &dyn TopoDataProvider,
//! #         store: Box<dyn topo_editor::persist::PathStore>)
//! #         -> anyhow::Result<()> {
//! let data = provider.load_topo(TopoId(7))?;
//! let mut session = EditorSession::new(data, ViewMode::Editor, store);
//! session.set_container_rect(kurbo::Rect::new(0.0, 0.0, 800.0, 600.0));
//! session.image_loaded(kurbo::Size::new(1600.0, 1200.0));
//!
//! // ... forward pointer/list input, render, pump saves ...
//! session.pointer_down(kurbo::Point::new(400.0, 300.0),
//!                      Modifiers::default(),
//!                      std::time::Instant::now());
//! session.tick(std::time::Instant::now());
//!
//! session.dispose(); // flushes pending saves before the dialog closes
//! # Ok(())
//! # }
//! ```

pub mod editing;
pub mod model;
pub mod persist;
pub mod provider;
pub mod render;
pub mod theme;

pub use editing::{
    EditorEvent, EditorSession, Modifiers, RouteListEntry, SelectTrigger, ViewMode,
};
pub use model::{NormPoint, RouteId, RoutePath, TopoId, TopoImage};
pub use persist::{PathStore, SaveError};
pub use provider::{TopoData, TopoDataProvider};
