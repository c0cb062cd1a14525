// Copyright 2026 the Topo Editor Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors and drawing constants
//!
//! All fixed colors use hexadecimal format: Color::from_rgb8(0xRR, 0xGG, 0xBB)

use crate::model::RouteId;
use peniko::Color;

// ============================================================================
// CANVAS
// ============================================================================

/// Letterbox margins around the rendered image.
pub const CANVAS_BACKGROUND: Color = Color::from_rgb8(0x20, 0x20, 0x20);

// ============================================================================
// PATH STROKES
// ============================================================================

/// Stroke width of an unselected route line, in screen pixels.
pub const PATH_STROKE_WIDTH: f64 = 2.0;

/// Stroke width of the selected route line.
pub const SELECTED_STROKE_WIDTH: f64 = 4.0;

// ============================================================================
// POINT HANDLES
// ============================================================================

/// Visual radius of a point handle, in screen pixels.
pub const HANDLE_RADIUS: f64 = 6.0;

/// Grab radius around a handle for pointer hit testing. Larger than the
/// visual radius so handles are comfortable to pick up on touch screens.
pub const HANDLE_HIT_RADIUS: f64 = 12.0;

pub const HANDLE_FILL: Color = Color::from_rgb8(0xff, 0xff, 0xff);

// ============================================================================
// HIT TESTING
// ============================================================================

/// Distance-to-segment tolerance for "clicked an existing path", in screen
/// pixels. Measured in screen space so it feels the same at any zoom.
pub const PATH_HIT_TOLERANCE: f64 = 8.0;

// ============================================================================
// LABELS
// ============================================================================

/// Offset of the grade/name label from the last path point, in screen
/// pixels (up and to the right, clear of the climber's line).
pub const LABEL_OFFSET: kurbo::Vec2 = kurbo::Vec2::new(8.0, -8.0);

// ============================================================================
// ROUTE COLORS
// ============================================================================

// Hue stepping by the golden-ratio conjugate spreads consecutive route ids
// evenly around the color wheel without clustering.
const HUE_STEP: f64 = 0.618_033_988_749_895;
const ROUTE_SATURATION: f64 = 0.75;
const ROUTE_VALUE: f64 = 0.95;

/// Stable display color for a route, derived from its id alone so the same
/// route renders the same color in every session and on every device.
pub fn route_color(id: RouteId) -> Color {
    let hue = (id.0 as f64 * HUE_STEP).rem_euclid(1.0) * 360.0;
    hsv_to_rgb(hue, ROUTE_SATURATION, ROUTE_VALUE)
}

/// Convert HSV (h in degrees, s/v in 0..1) to an opaque RGB color.
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Color {
    let c = v * s;
    let hp = (h / 60.0).rem_euclid(6.0);
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    Color::from_rgb8(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}
