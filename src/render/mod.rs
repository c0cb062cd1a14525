// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! Rendering of the topo image, route lines, and point handles.
//!
//! The renderer is a pure function of session state onto a [`DrawSurface`]:
//! it holds nothing and decides nothing about pixels. Hosts implement the
//! surface once per platform (web canvas, native GUI, whatever) and the
//! core stays free of any concrete graphics API.

use crate::editing::session::{EditorSession, ViewMode};
use crate::model::TopoImage;
use crate::theme;
use kurbo::{Point, Rect};
use peniko::Color;

/// Minimal drawing capability the host provides.
///
/// All positions are client pixels, already projected by the session's
/// viewport; implementations just draw.
pub trait DrawSurface {
    fn clear(&mut self, color: Color);
    /// Draw the topo bitmap scaled into `dest` (the letterbox-fitted box).
    fn draw_image(&mut self, image: &TopoImage, dest: Rect);
    fn draw_polyline(&mut self, points: &[Point], color: Color, width: f64);
    fn draw_handle(&mut self, center: Point, radius: f64, color: Color);
    fn draw_label(&mut self, text: &str, anchor: Point, color: Color);
}

/// Paint one frame of the session onto the surface.
///
/// Draw order: background, image, unselected route lines, the selected
/// route's line (with a thicker stroke), labels, and (in editor mode
/// only) the selected route's point handles. Before layout and image load
/// there is nothing to project, so only the background is painted.
pub fn render(session: &EditorSession, surface: &mut dyn DrawSurface) {
    surface.clear(theme::CANVAS_BACKGROUND);

    let viewport = session.viewport();
    let Some(image_box) = viewport.image_box() else {
        return;
    };
    surface.draw_image(session.image(), image_box);

    let selected = session.selected_route();

    // Unselected lines first so the selected route always paints on top.
    for path in session.paths().filter(|p| Some(p.route_id) != selected) {
        draw_route(session, surface, path, false);
    }
    if let Some(route_id) = selected
        && let Some(path) = session.path(route_id)
    {
        draw_route(session, surface, path, true);

        if session.mode() == ViewMode::Editor {
            for &np in &path.points {
                if let Some(screen) = viewport.to_screen(np) {
                    surface.draw_handle(screen, theme::HANDLE_RADIUS, theme::HANDLE_FILL);
                }
            }
        }
    }
}

fn draw_route(
    session: &EditorSession,
    surface: &mut dyn DrawSurface,
    path: &crate::model::RoutePath,
    emphasized: bool,
) {
    let screen: Option<Vec<Point>> = path
        .points
        .iter()
        .map(|&np| session.viewport().to_screen(np))
        .collect();
    let Some(screen) = screen else {
        return;
    };
    let Some(&last) = screen.last() else {
        // No points yet: listed, but nothing on canvas.
        return;
    };

    if screen.len() >= 2 {
        let width = if emphasized {
            theme::SELECTED_STROKE_WIDTH
        } else {
            theme::PATH_STROKE_WIDTH
        };
        surface.draw_polyline(&screen, path.color, width);
    }

    surface.draw_label(&path.label, last + theme::LABEL_OFFSET, path.color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::session::test_support::{route, session_with};
    use crate::model::{NormPoint, RouteId, TopoId};

    /// Surface double that records draw calls.
    #[derive(Debug, Default)]
    struct Recording {
        ops: Vec<Op>,
    }

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Image(Rect),
        Polyline { len: usize, width: f64 },
        Handle(Point),
        Label(String),
    }

    impl DrawSurface for Recording {
        fn clear(&mut self, _color: Color) {
            self.ops.push(Op::Clear);
        }
        fn draw_image(&mut self, _image: &TopoImage, dest: Rect) {
            self.ops.push(Op::Image(dest));
        }
        fn draw_polyline(&mut self, points: &[Point], _color: Color, width: f64) {
            self.ops.push(Op::Polyline {
                len: points.len(),
                width,
            });
        }
        fn draw_handle(&mut self, center: Point, _radius: f64, _color: Color) {
            self.ops.push(Op::Handle(center));
        }
        fn draw_label(&mut self, text: &str, _anchor: Point, _color: Color) {
            self.ops.push(Op::Label(text.to_string()));
        }
    }

    fn two_point_route(id: i64, number: i32) -> crate::provider::RouteRecord {
        route(
            id,
            number,
            vec![NormPoint::new(0.25, 0.25), NormPoint::new(0.75, 0.75)],
        )
    }

    #[test]
    fn loading_session_paints_only_the_background() {
        let store = crate::editing::session::test_support::SharedStore::default();
        let data = crate::provider::TopoData {
            image: TopoImage::new(TopoId(1), "https://example.test/topo.jpg", None),
            routes: vec![two_point_route(101, 0)],
        };
        let session = EditorSession::new(data, ViewMode::Editor, Box::new(store));

        let mut surface = Recording::default();
        render(&session, &mut surface);
        assert_eq!(surface.ops, vec![Op::Clear]);
    }

    #[test]
    fn selected_route_gets_emphasis_and_paints_last() {
        let (session, _) = session_with(
            vec![two_point_route(101, 0), two_point_route(102, 1)],
            ViewMode::Viewer,
        );

        let mut surface = Recording::default();
        render(&session, &mut surface);

        let widths: Vec<f64> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Polyline { width, .. } => Some(*width),
                _ => None,
            })
            .collect();
        // Unselected 102 first, selected 101 on top with the thick stroke.
        assert_eq!(widths, vec![theme::PATH_STROKE_WIDTH, theme::SELECTED_STROKE_WIDTH]);
    }

    #[test]
    fn handles_only_in_editor_mode() {
        let (session, _) = session_with(vec![two_point_route(101, 0)], ViewMode::Viewer);
        let mut surface = Recording::default();
        render(&session, &mut surface);
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Handle(_))));

        let (session, _) = session_with(vec![two_point_route(101, 0)], ViewMode::Editor);
        let mut surface = Recording::default();
        render(&session, &mut surface);
        let handles: Vec<_> = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Handle(_)))
            .collect();
        assert_eq!(handles.len(), 2);
    }

    #[test]
    fn handles_are_drawn_only_for_the_selected_route() {
        let (mut session, _) = session_with(
            vec![two_point_route(101, 0), two_point_route(102, 1)],
            ViewMode::Editor,
        );
        session.select_route(RouteId(102), crate::editing::SelectTrigger::List);

        let mut surface = Recording::default();
        render(&session, &mut surface);
        // Two routes, but only 102's two handles.
        let handles = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Handle(_)))
            .count();
        assert_eq!(handles, 2);
    }

    #[test]
    fn empty_paths_draw_nothing_on_canvas() {
        let (session, _) = session_with(vec![route(101, 0, vec![])], ViewMode::Editor);
        let mut surface = Recording::default();
        render(&session, &mut surface);
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Polyline { .. })));
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Label(_))));
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Handle(_))));
    }

    #[test]
    fn image_is_drawn_into_the_fitted_box_before_paths() {
        let (session, _) = session_with(vec![two_point_route(101, 0)], ViewMode::Viewer);
        let mut surface = Recording::default();
        render(&session, &mut surface);

        assert_eq!(surface.ops[0], Op::Clear);
        assert_eq!(surface.ops[1], Op::Image(Rect::new(0.0, 0.0, 800.0, 600.0)));
    }

    #[test]
    fn single_point_route_shows_its_label() {
        let (session, _) = session_with(
            vec![route(101, 0, vec![NormPoint::new(0.5, 0.5)])],
            ViewMode::Viewer,
        );
        let mut surface = Recording::default();
        render(&session, &mut surface);
        assert!(surface
            .ops
            .iter()
            .any(|op| matches!(op, Op::Label(text) if text == "route 101")));
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Polyline { .. })));
    }
}
