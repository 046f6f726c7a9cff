//! Camera fit - center the canvas on a freshly arranged cluster
//!
//! The zoom is fixed rather than computed from the content size; only the
//! offset depends on the bounding box. With a host transform of
//! `screen = (world + offset) * zoom` the offset puts the cluster center at
//! the viewport center before zoom is applied.

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::host::Canvas;

/// Zoom applied after every load
pub const FIT_ZOOM: f32 = 0.8;

/// Offset and zoom for the host canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraFrame {
    pub offset: Vec2,
    pub zoom: f32,
}

impl CameraFrame {
    /// Push the frame to the canvas and request a full redraw.
    pub fn apply(&self, canvas: &mut dyn Canvas) {
        canvas.set_offset(self.offset);
        canvas.set_zoom(self.zoom);
        canvas.set_dirty(true, true);
        tracing::debug!(
            offset_x = self.offset.x,
            offset_y = self.offset.y,
            zoom = self.zoom,
            "camera frame applied"
        );
    }
}

/// Axis-aligned box around all rectangles; `None` for an empty input.
pub fn content_bounds(rects: &[Rect]) -> Option<Rect> {
    let mut iter = rects.iter().copied();
    let first = iter.next()?;

    let (mut min_x, mut min_y) = (first.min.x, first.min.y);
    let (mut max_x, mut max_y) = (first.max.x, first.max.y);
    for rect in iter {
        min_x = min_x.min(rect.min.x);
        min_y = min_y.min(rect.min.y);
        max_x = max_x.max(rect.max.x);
        max_y = max_y.max(rect.max.y);
    }

    Some(Rect::from_min_max(
        Pos2::new(min_x, min_y),
        Pos2::new(max_x, max_y),
    ))
}

/// Camera frame that centers `rects` in a viewport of `viewport` size.
///
/// Returns `None` when there is nothing to frame; callers skip the camera
/// step in that case.
pub fn fit_camera(rects: &[Rect], viewport: Vec2, zoom: f32) -> Option<CameraFrame> {
    let bounds = content_bounds(rects)?;
    let center = bounds.center();

    Some(CameraFrame {
        offset: Vec2::new(viewport.x / 2.0 - center.x, viewport.y / 2.0 - center.y),
        zoom,
    })
}
