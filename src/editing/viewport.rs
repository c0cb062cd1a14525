// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! Coordinate mapping between client pixels and normalized image space.
//!
//! Three spaces are involved: raw pointer/client coordinates, the box the
//! scaled image actually occupies inside the container (the container is
//! letterboxed `object-fit: contain` style, so the image is scaled uniformly
//! and blank margins appear on one axis), and normalized `[0,1]²` image
//! space with the origin at the image's top-left.
//!
//! The viewport is not usable until both the container has been measured and
//! the image's intrinsic size is known; until then every conversion returns
//! `None` and no points can be created. Both boxes must be refreshed on
//! every resize and on image load; a stale cached box is the main
//! correctness hazard in this subsystem.

use crate::model::NormPoint;
use kurbo::{Point, Rect, Size};

/// Bidirectional mapper between client pixels and normalized image space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport {
    /// Bounding box of the interactive surface in viewport pixels,
    /// re-measured on every resize.
    container: Option<Rect>,
    /// Intrinsic pixel size of the topo image, known after load.
    image_size: Option<Size>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new container measurement. Called on mount and on every
    /// layout-resize notification, before the next pointer event is trusted.
    pub fn set_container(&mut self, rect: Rect) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            tracing::debug!("ignoring degenerate container rect {rect:?}");
            self.container = None;
            return;
        }
        self.container = Some(rect);
    }

    /// Record the image's intrinsic size once the host has loaded it.
    pub fn set_image_size(&mut self, size: Size) {
        if size.width <= 0.0 || size.height <= 0.0 {
            tracing::debug!("ignoring degenerate image size {size:?}");
            self.image_size = None;
            return;
        }
        self.image_size = Some(size);
    }

    /// True once both boxes are known and conversions work.
    pub fn is_ready(&self) -> bool {
        self.container.is_some() && self.image_size.is_some()
    }

    /// The box within the container actually occupied by the image as
    /// displayed: uniform scale to fit, centered, margins on one axis.
    /// In viewport-pixel coordinates.
    pub fn image_box(&self) -> Option<Rect> {
        let container = self.container?;
        let image = self.image_size?;

        let scale = (container.width() / image.width).min(container.height() / image.height);
        let w = image.width * scale;
        let h = image.height * scale;
        let x = container.x0 + (container.width() - w) / 2.0;
        let y = container.y0 + (container.height() - h) / 2.0;
        Some(Rect::new(x, y, x + w, y + h))
    }

    /// Convert a client-pixel position to normalized image space.
    ///
    /// Returns `None` before the image has loaded and for positions outside
    /// the rendered image box; pointer events in the letterbox margins
    /// never produce points.
    pub fn to_normalized(&self, client: Point) -> Option<NormPoint> {
        let p = self.project(client)?;
        p.in_bounds().then_some(p)
    }

    /// Like [`to_normalized`](Self::to_normalized) but clamps to the nearest
    /// image boundary instead of rejecting. Used while dragging a point, so
    /// leaving the image pins the point to the edge rather than losing it.
    pub fn to_normalized_clamped(&self, client: Point) -> Option<NormPoint> {
        Some(self.project(client)?.clamped())
    }

    /// Inverse transform: normalized image space to client pixels. Used by
    /// the renderer to place points and by hit testing.
    pub fn to_screen(&self, p: NormPoint) -> Option<Point> {
        let image_box = self.image_box()?;
        Some(Point::new(
            image_box.x0 + p.x * image_box.width(),
            image_box.y0 + p.y * image_box.height(),
        ))
    }

    fn project(&self, client: Point) -> Option<NormPoint> {
        let image_box = self.image_box()?;
        Some(NormPoint::new(
            (client.x - image_box.x0) / image_box.width(),
            (client.y - image_box.y0) / image_box.height(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_viewport(container: Rect, image: Size) -> Viewport {
        let mut vp = Viewport::new();
        vp.set_container(container);
        vp.set_image_size(image);
        vp
    }

    #[test]
    fn conversions_are_noops_until_image_loads() {
        let mut vp = Viewport::new();
        vp.set_container(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert!(!vp.is_ready());
        assert_eq!(vp.to_normalized(Point::new(10.0, 10.0)), None);
        assert_eq!(vp.to_screen(NormPoint::new(0.5, 0.5)), None);
        assert_eq!(vp.image_box(), None);
    }

    #[test]
    fn matching_aspect_has_no_letterbox() {
        // 800x600 container, 1600x1200 image: uniform 2:1 scale, no margins.
        let vp = ready_viewport(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Size::new(1600.0, 1200.0),
        );
        assert_eq!(vp.image_box(), Some(Rect::new(0.0, 0.0, 800.0, 600.0)));

        // Client (100,100) is displayed-image fraction (0.125, 1/6), which is
        // the same fraction of the intrinsic size (pixel (200,200) of 1600x1200).
        let n = vp.to_normalized(Point::new(100.0, 100.0)).unwrap();
        assert!((n.x - 0.125).abs() < 1e-9);
        assert!((n.y - 100.0 / 600.0).abs() < 1e-9);

        let back = vp.to_screen(n).unwrap();
        assert!((back.x - 100.0).abs() < 1e-9);
        assert!((back.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn wide_container_letterboxes_horizontally() {
        // Square image in a wide container: margins left and right.
        let vp = ready_viewport(
            Rect::new(0.0, 0.0, 1000.0, 500.0),
            Size::new(2000.0, 2000.0),
        );
        assert_eq!(vp.image_box(), Some(Rect::new(250.0, 0.0, 750.0, 500.0)));

        // A click in the left margin never produces a point.
        assert_eq!(vp.to_normalized(Point::new(100.0, 250.0)), None);
        // Just inside the image box it does.
        assert!(vp.to_normalized(Point::new(251.0, 250.0)).is_some());
    }

    #[test]
    fn container_offset_is_subtracted() {
        let vp = ready_viewport(
            Rect::new(40.0, 30.0, 840.0, 630.0),
            Size::new(1600.0, 1200.0),
        );
        let n = vp.to_normalized(Point::new(40.0, 30.0)).unwrap();
        assert_eq!((n.x, n.y), (0.0, 0.0));
        let n = vp.to_normalized(Point::new(840.0, 630.0)).unwrap();
        assert_eq!((n.x, n.y), (1.0, 1.0));
    }

    #[test]
    fn round_trip_is_sub_pixel() {
        let vp = ready_viewport(
            Rect::new(12.0, 7.0, 912.0, 607.0),
            Size::new(3000.0, 2000.0),
        );
        let image_box = vp.image_box().unwrap();
        for &(fx, fy) in &[(0.1, 0.1), (0.5, 0.5), (0.9, 0.2), (0.33, 0.77)] {
            let client = Point::new(
                image_box.x0 + fx * image_box.width(),
                image_box.y0 + fy * image_box.height(),
            );
            let back = vp.to_screen(vp.to_normalized(client).unwrap()).unwrap();
            assert!((back.x - client.x).abs() < 0.001);
            assert!((back.y - client.y).abs() < 0.001);
        }
    }

    #[test]
    fn out_of_container_positions_are_rejected() {
        let vp = ready_viewport(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Size::new(1600.0, 1200.0),
        );
        assert_eq!(vp.to_normalized(Point::new(-1.0, 10.0)), None);
        assert_eq!(vp.to_normalized(Point::new(10.0, 601.0)), None);
    }

    #[test]
    fn clamped_conversion_pins_to_edge() {
        let vp = ready_viewport(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Size::new(1600.0, 1200.0),
        );
        let n = vp.to_normalized_clamped(Point::new(-50.0, 700.0)).unwrap();
        assert_eq!((n.x, n.y), (0.0, 1.0));
    }

    #[test]
    fn resize_changes_projection_but_not_normalized_points() {
        let mut vp = ready_viewport(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Size::new(1600.0, 1200.0),
        );
        let n = NormPoint::new(0.25, 0.5);
        let before = vp.to_screen(n).unwrap();

        vp.set_container(Rect::new(0.0, 0.0, 400.0, 300.0));
        let after = vp.to_screen(n).unwrap();

        // Same normalized point, different screen projection.
        assert_ne!(before, after);
        assert_eq!((after.x, after.y), (100.0, 150.0));
    }

    #[test]
    fn degenerate_container_resets_readiness() {
        let mut vp = ready_viewport(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Size::new(1600.0, 1200.0),
        );
        vp.set_container(Rect::new(0.0, 0.0, 0.0, 600.0));
        assert!(!vp.is_ready());
        assert_eq!(vp.to_normalized(Point::new(10.0, 10.0)), None);
    }
}
