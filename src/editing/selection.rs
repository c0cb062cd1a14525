// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! Which route's path is currently editable, and how that changes.
//!
//! The state itself is just an `Option<RouteId>`; the transition function is
//! the interesting part because two input sources compete with asymmetric
//! precedence. A click in the route list is an explicit, unambiguous intent
//! and always takes effect (including toggling the current route off). A
//! click on the canvas is ambiguous whenever paths overlap or run close
//! together, so it may only *start* a selection from the empty state. It is
//! never allowed to steal the selection away from the route being edited,
//! which would make precise point work on crowded topos unusable.

use crate::model::RouteId;

/// Where a selection request originated. The trigger is not stored; it only
/// determines the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectTrigger {
    /// The external route-list widget.
    List,
    /// A hit on a route's path on the canvas.
    Canvas,
}

/// Session-scoped selection state. Discarded on editor close; nothing about
/// the selection itself is ever persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteSelection {
    selected: Option<RouteId>,
}

impl RouteSelection {
    /// Initial state on editor open: the first route in list order if any
    /// exist, so the equipper has an immediately active target.
    pub fn initial(first_route: Option<RouteId>) -> Self {
        Self {
            selected: first_route,
        }
    }

    pub fn selected(&self) -> Option<RouteId> {
        self.selected
    }

    pub fn is_selected(&self, route_id: RouteId) -> bool {
        self.selected == Some(route_id)
    }

    /// Apply a selection request. Returns `true` if the state changed.
    pub fn select(&mut self, route_id: RouteId, trigger: SelectTrigger) -> bool {
        let next = match (trigger, self.selected) {
            // List click on the already-selected route toggles it off.
            (SelectTrigger::List, Some(current)) if current == route_id => None,
            // Any other list click switches unconditionally.
            (SelectTrigger::List, _) => Some(route_id),
            // Canvas clicks may only start a selection from empty state.
            (SelectTrigger::Canvas, None) => Some(route_id),
            // Canvas clicks never switch an existing selection.
            (SelectTrigger::Canvas, Some(current)) => Some(current),
        };

        if next == self.selected {
            return false;
        }
        tracing::debug!("selection {:?} -> {next:?} via {trigger:?}", self.selected);
        self.selected = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: RouteId = RouteId(101);
    const B: RouteId = RouteId(102);

    #[test]
    fn initial_selects_first_route_when_present() {
        assert_eq!(RouteSelection::initial(Some(A)).selected(), Some(A));
        assert_eq!(RouteSelection::initial(None).selected(), None);
    }

    #[test]
    fn list_click_on_selected_route_toggles_off() {
        let mut sel = RouteSelection::initial(Some(A));
        assert!(sel.select(A, SelectTrigger::List));
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn list_click_always_switches() {
        let mut sel = RouteSelection::initial(Some(A));
        assert!(sel.select(B, SelectTrigger::List));
        assert_eq!(sel.selected(), Some(B));

        let mut sel = RouteSelection::initial(None);
        assert!(sel.select(B, SelectTrigger::List));
        assert_eq!(sel.selected(), Some(B));
    }

    #[test]
    fn canvas_click_cannot_steal_selection() {
        let mut sel = RouteSelection::initial(Some(A));
        assert!(!sel.select(B, SelectTrigger::Canvas));
        assert_eq!(sel.selected(), Some(A));

        // Same route from canvas is a no-op too.
        assert!(!sel.select(A, SelectTrigger::Canvas));
        assert_eq!(sel.selected(), Some(A));
    }

    #[test]
    fn canvas_click_selects_from_empty_state() {
        let mut sel = RouteSelection::initial(None);
        assert!(sel.select(B, SelectTrigger::Canvas));
        assert_eq!(sel.selected(), Some(B));
    }

    #[test]
    fn list_switch_then_canvas_is_ignored() {
        // Scenario from the selection design: open with [101, 102], list
        // selects 102, canvas click on 101 changes nothing.
        let mut sel = RouteSelection::initial(Some(A));
        sel.select(B, SelectTrigger::List);
        assert_eq!(sel.selected(), Some(B));
        sel.select(A, SelectTrigger::Canvas);
        assert_eq!(sel.selected(), Some(B));
    }
}
