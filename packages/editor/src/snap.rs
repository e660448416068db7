//! Center snapping for drag moves

use serde::{Deserialize, Serialize};
use std::fmt;
use storefront_content::Offset;

/// Bounding box in viewport pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }
}

/// Signed distance of the node mid-point from the viewport mid-point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapDelta {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for SnapDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x {:+.0}px  y {:+.0}px", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub offset: Offset,
    pub delta: SnapDelta,
    pub snapped_x: bool,
    pub snapped_y: bool,
}

/// Snap a candidate offset so the node centers on the viewport when close.
///
/// `rect` is the node's box measured while it sat at `base`.
pub fn snap_offset(candidate: Offset, base: Offset, rect: Rect, viewport: Viewport, threshold: f64) -> SnapResult {
    let (left, dx, snapped_x) = snap_axis(
        candidate.left,
        rect.center_x() + (candidate.left - base.left),
        viewport.center_x(),
        threshold,
    );
    let (top, dy, snapped_y) = snap_axis(
        candidate.top,
        rect.center_y() + (candidate.top - base.top),
        viewport.center_y(),
        threshold,
    );

    SnapResult {
        offset: Offset::new(left, top),
        delta: SnapDelta { x: dx, y: dy },
        snapped_x,
        snapped_y,
    }
}

fn snap_axis(offset: f64, mid: f64, target: f64, threshold: f64) -> (f64, f64, bool) {
    let distance = mid - target;
    if distance.abs() <= threshold {
        (offset - distance, 0.0, true)
    } else {
        (offset, distance, false)
    }
}
