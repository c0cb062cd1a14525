// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor session - owns all state for editing one topo's route paths.
//!
//! A session is created when the topo dialog opens and disposed when it
//! closes. It owns the topo image, the path set, the selection, the
//! viewport, and the debounced saver, and it is the only thing the host UI
//! talks to: pointer events and list clicks go in, draw state and a drained
//! event queue come out.
//!
//! Everything runs on the host's UI thread. The only asynchronous inputs
//! are the image-load and resize notifications, which must arrive before
//! the next pointer event is trusted.

mod pointer;

pub use pointer::Modifiers;

use crate::editing::selection::{RouteSelection, SelectTrigger};
use crate::editing::viewport::Viewport;
use crate::model::{PathSet, RouteId, RoutePath, TopoImage};
use crate::persist::{DebouncedSaver, PathStore};
use crate::provider::TopoData;
use kurbo::{Rect, Size};
use peniko::Color;
use std::time::Instant;

/// Read-only rendering vs. full interaction.
///
/// Climbers get `Viewer` (paths drawn, nothing editable); equippers get
/// `Editor` (handles, dragging, point creation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Viewer,
    Editor,
}

/// Notifications for the host UI, drained via
/// [`EditorSession::drain_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The selected route changed (or was cleared).
    SelectionChanged { selected: Option<RouteId> },
    /// A debounced save failed; the edit is retained locally and will be
    /// retried. Surface as a transient, non-blocking notification.
    SaveFailed { route_id: RouteId },
}

/// One row for the host's route-list widget.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteListEntry {
    pub route_id: RouteId,
    pub number: i32,
    pub label: String,
    pub color: Color,
    /// False while the route has no points yet.
    pub has_line: bool,
    pub selected: bool,
}

/// An in-progress handle drag. One pointer, one drag; nothing else can be
/// edited until it ends.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragState {
    pub(crate) route_id: RouteId,
    pub(crate) index: usize,
}

/// Editing state for one topo.
pub struct EditorSession {
    image: TopoImage,
    paths: PathSet,
    selection: RouteSelection,
    mode: ViewMode,
    viewport: Viewport,
    drag: Option<DragState>,
    saver: DebouncedSaver,
    store: Box<dyn PathStore>,
    events: Vec<EditorEvent>,
    disposed: bool,
}

impl EditorSession {
    /// Open a session over one provider snapshot.
    ///
    /// Routes are materialized into one [`RoutePath`] each (lazily empty if
    /// nothing was ever drawn), persisted points are clamped into the unit
    /// square, and the first route in list order starts out selected.
    pub fn new(data: TopoData, mode: ViewMode, store: Box<dyn PathStore>) -> Self {
        let paths = PathSet::load(
            data.routes
                .into_iter()
                .map(|r| RoutePath::new(r.id, r.number, r.label, r.points))
                .collect(),
        );
        let selection = RouteSelection::initial(paths.first_route());

        let mut viewport = Viewport::new();
        if let Some(size) = data.image.size {
            viewport.set_image_size(size);
        }

        tracing::info!(
            "opening session for {} with {} routes ({mode:?})",
            data.image.id,
            paths.len()
        );

        Self {
            image: data.image,
            paths,
            selection,
            mode,
            viewport,
            drag: None,
            saver: DebouncedSaver::new(),
            store,
            events: Vec::new(),
            disposed: false,
        }
    }

    // ========================================================================
    // STATE EXPOSED TO THE HOST
    // ========================================================================

    pub fn image(&self) -> &TopoImage {
        &self.image
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch between viewer and editor without reloading the topo. Any
    /// in-progress drag ends here, committed at the point's current
    /// position, the same as releasing the pointer.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode != self.mode {
            self.mode = mode;
            self.settle_drag();
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selected_route(&self) -> Option<RouteId> {
        self.selection.selected()
    }

    /// Paths in `number` order, for rendering.
    pub fn paths(&self) -> impl Iterator<Item = &RoutePath> {
        self.paths.iter()
    }

    pub fn path(&self, route_id: RouteId) -> Option<&RoutePath> {
        self.paths.get(route_id)
    }

    pub(crate) fn drag(&self) -> Option<DragState> {
        self.drag
    }

    /// Ordered rows for the external route-list widget.
    pub fn route_list(&self) -> Vec<RouteListEntry> {
        self.paths
            .iter()
            .map(|p| RouteListEntry {
                route_id: p.route_id,
                number: p.number,
                label: p.label.clone(),
                color: p.color,
                has_line: p.has_line(),
                selected: self.selection.is_selected(p.route_id),
            })
            .collect()
    }

    /// Drain queued events for the host to display.
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // LAYOUT AND IMAGE LIFECYCLE
    // ========================================================================

    /// Record a new container measurement. Must be called on every
    /// layout-resize notification; pointer events against a stale box are
    /// the main correctness hazard here.
    pub fn set_container_rect(&mut self, rect: Rect) {
        self.viewport.set_container(rect);
    }

    /// Record the image's intrinsic size once the host's loader reports it.
    /// Until then the session is in its loading sub-state and no points can
    /// be created.
    pub fn image_loaded(&mut self, size: Size) {
        self.image.size = Some(size);
        self.viewport.set_image_size(size);
    }

    // ========================================================================
    // SELECTION
    // ========================================================================

    /// Apply a selection request from the list or the canvas. List requests
    /// always take effect (including toggle-off); canvas requests only start
    /// a selection from the empty state.
    pub fn select_route(&mut self, route_id: RouteId, trigger: SelectTrigger) {
        if self.paths.get(route_id).is_none() {
            tracing::warn!("select request for unknown {route_id}");
            return;
        }
        if self.selection.select(route_id, trigger) {
            self.settle_drag();
            self.events.push(EditorEvent::SelectionChanged {
                selected: self.selection.selected(),
            });
        }
    }

    // ========================================================================
    // POINT EDITS (shared plumbing; gestures live in `pointer`)
    // ========================================================================

    /// Remove one point of the selected route by index, the dedicated
    /// control counterpart of modifier-clicking a handle. Removing the last
    /// point returns the path to the empty state.
    pub fn remove_point(&mut self, route_id: RouteId, index: usize, now: Instant) -> bool {
        if self.mode != ViewMode::Editor || !self.selection.is_selected(route_id) {
            return false;
        }
        let Some(path) = self.paths.get_mut(route_id) else {
            return false;
        };
        if index >= path.points.len() {
            return false;
        }
        path.points.remove(index);
        tracing::debug!("removed point {index} of {route_id}");
        self.commit(route_id, now);
        true
    }

    /// Queue the route's current points for a debounced save.
    pub(crate) fn commit(&mut self, route_id: RouteId, now: Instant) {
        if let Some(path) = self.paths.get(route_id) {
            self.saver.schedule(route_id, path.points.clone(), now);
        }
    }

    /// End any in-flight drag, committing the dragged point where it is.
    ///
    /// `pointer_move` mutates the path set live, so clearing the drag
    /// without a commit would leave a moved point visible but unsaved.
    fn settle_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            self.commit(drag.route_id, Instant::now());
        }
    }

    // ========================================================================
    // PERSISTENCE PUMP AND TEARDOWN
    // ========================================================================

    /// Pump the debounced saver. The host calls this from its frame or
    /// timer callback; failures become [`EditorEvent::SaveFailed`].
    pub fn tick(&mut self, now: Instant) {
        let failures = self.saver.poll(now, self.store.as_mut());
        self.push_save_failures(failures);
    }

    /// Routes with a parked failed save.
    pub fn failed_saves(&self) -> Vec<RouteId> {
        self.saver.failed_routes()
    }

    /// Re-attempt parked failed saves immediately (explicit retry from the
    /// host's notification UI).
    pub fn retry_failed_saves(&mut self) {
        let failures = self.saver.retry_failed(self.store.as_mut());
        self.push_save_failures(failures);
    }

    /// Tear down the session: commit any in-flight drag and synchronously
    /// flush every pending save. Nothing beyond the last debounce window is
    /// ever lost on close.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        self.settle_drag();
        let failures = self.saver.flush(self.store.as_mut());
        self.push_save_failures(failures);
        tracing::info!("session for {} disposed", self.image.id);
    }

    fn push_save_failures(&mut self, failures: Vec<RouteId>) {
        for route_id in failures {
            self.events.push(EditorEvent::SaveFailed { route_id });
        }
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        // Dropping without dispose() still must not lose edits.
        self.dispose();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::model::{NormPoint, TopoId};
    use crate::persist::SaveError;
    use crate::provider::RouteRecord;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Store double shared between the session and the test body.
    #[derive(Clone, Default)]
    pub struct SharedStore(pub Rc<RefCell<StoreInner>>);

    #[derive(Default)]
    pub struct StoreInner {
        pub rows: HashMap<RouteId, Vec<NormPoint>>,
        pub save_count: usize,
        pub fail: bool,
    }

    impl PathStore for SharedStore {
        fn save(&mut self, route_id: RouteId, points: &[NormPoint]) -> Result<(), SaveError> {
            let mut inner = self.0.borrow_mut();
            if inner.fail {
                return Err(SaveError::Unavailable("offline".into()));
            }
            inner.save_count += 1;
            inner.rows.insert(route_id, points.to_vec());
            Ok(())
        }
    }

    pub fn route(id: i64, number: i32, points: Vec<NormPoint>) -> RouteRecord {
        RouteRecord {
            id: RouteId(id),
            number,
            label: format!("route {id}"),
            points,
        }
    }

    /// A ready-to-edit session: 800x600 container over a 1600x1200 image.
    pub fn session_with(
        routes: Vec<RouteRecord>,
        mode: ViewMode,
    ) -> (EditorSession, SharedStore) {
        let store = SharedStore::default();
        let data = TopoData {
            image: TopoImage::new(TopoId(1), "https://example.test/topo.jpg", None),
            routes,
        };
        let mut session = EditorSession::new(data, mode, Box::new(store.clone()));
        session.set_container_rect(Rect::new(0.0, 0.0, 800.0, 600.0));
        session.image_loaded(Size::new(1600.0, 1200.0));
        (session, store)
    }

    pub fn trace_init() {
        use tracing_subscriber::EnvFilter;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}
