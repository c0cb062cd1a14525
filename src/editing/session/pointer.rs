// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer gesture handling for EditorSession.
//!
//! Translates pointer-down/move/up sequences on the canvas into point
//! insertion, dragging, and deletion on the selected path. Gestures are
//! resolved in priority order on pointer-down:
//!
//! 1. a handle of the selected path: start a drag, or remove the point on
//!    a modifier-click;
//! 2. any route's poly-line within tolerance: a canvas selection request
//!    (which the selection controller ignores while a route is selected);
//! 3. anywhere else inside the image: append a point to the selected path.
//!
//! Pointer events before the image has loaded or outside the rendered image
//! box are silently ignored; they are not errors.

use super::{DragState, EditorSession, ViewMode};
use crate::editing::hit_test;
use crate::editing::selection::SelectTrigger;
use crate::theme;
use kurbo::Point;
use std::time::Instant;

/// Modifier state accompanying a pointer-down.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// The point-removal modifier (alt/long-press, host's choice) is held.
    pub remove: bool,
}

impl EditorSession {
    /// Handle pointer-down at a client-pixel position.
    pub fn pointer_down(&mut self, pos: Point, modifiers: Modifiers, now: Instant) {
        if !self.viewport.is_ready() {
            tracing::debug!("pointer_down before layout/image ready, ignored");
            return;
        }

        if self.mode == ViewMode::Editor
            && let Some(route_id) = self.selected_route()
        {
            if self.handle_gesture_on_handle(route_id, pos, modifiers, now) {
                return;
            }
            if self.try_canvas_select(pos) {
                return;
            }
            self.append_point(route_id, pos, now);
            return;
        }

        // Viewer mode, or editor mode with nothing selected: a canvas click
        // may still identify a route (and from the empty state, select it).
        self.try_canvas_select(pos);
    }

    /// Handle pointer-move. Only meaningful mid-drag: the dragged point
    /// follows the pointer live, clamped to the image so leaving the valid
    /// area pins it to the boundary instead of destroying it.
    pub fn pointer_move(&mut self, pos: Point) {
        let Some(DragState { route_id, index }) = self.drag() else {
            return;
        };
        let Some(np) = self.viewport.to_normalized_clamped(pos) else {
            return;
        };
        if let Some(path) = self.paths.get_mut(route_id)
            && let Some(point) = path.points.get_mut(index)
        {
            *point = np;
        }
    }

    /// Handle pointer-up: a drag in progress ends and commits.
    pub fn pointer_up(&mut self, pos: Point, now: Instant) {
        self.pointer_move(pos);
        if let Some(DragState { route_id, .. }) = self.drag.take() {
            tracing::debug!("drag ended on {route_id}");
            self.commit(route_id, now);
        }
    }

    /// True if the gesture landed on a handle of the selected path (and was
    /// consumed as a drag start or a removal).
    fn handle_gesture_on_handle(
        &mut self,
        route_id: crate::model::RouteId,
        pos: Point,
        modifiers: Modifiers,
        now: Instant,
    ) -> bool {
        let Some(path) = self.paths.get(route_id) else {
            return false;
        };
        let Some(index) =
            hit_test::nearest_handle(&self.viewport, path, pos, theme::HANDLE_HIT_RADIUS)
        else {
            return false;
        };

        if modifiers.remove {
            self.remove_point(route_id, index, now);
        } else {
            tracing::debug!("drag started on point {index} of {route_id}");
            self.drag = Some(DragState { route_id, index });
        }
        true
    }

    /// Route the click to the selection controller if it lands within
    /// tolerance of any route's line. Returns `true` if a route was hit,
    /// whether or not the selection actually changed.
    fn try_canvas_select(&mut self, pos: Point) -> bool {
        let hit = hit_test::hit_route(
            &self.viewport,
            self.paths.iter(),
            pos,
            theme::PATH_HIT_TOLERANCE,
        );
        match hit {
            Some(route_id) => {
                self.select_route(route_id, SelectTrigger::Canvas);
                true
            }
            None => false,
        }
    }

    /// Append a point at the converted position to the end of the selected
    /// path. Clicks in the letterbox margins convert to `None` and add
    /// nothing.
    fn append_point(&mut self, route_id: crate::model::RouteId, pos: Point, now: Instant) {
        let Some(np) = self.viewport.to_normalized(pos) else {
            return;
        };
        if let Some(path) = self.paths.get_mut(route_id) {
            path.points.push(np);
            tracing::debug!("appended point {} to {route_id}", path.points.len() - 1);
            self.commit(route_id, now);
        }
    }
}
