//! Interaction state for one pan/zoom element: transform, drag session and
//! scale bounds. Knows nothing about the DOM; the caller feeds it
//! content-box coordinates and turns the returned [`Notification`]s into
//! events.

use crate::config::{ConfigPatch, PanZoomConfig};
use crate::drag::DragSession;
use crate::metrics::LocalPoint;
use crate::transform::Transform;

/// Multiplicative scale step per wheel notch.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
pub const WHEEL_ZOOM_IN: f64 = 1.1;

pub const EVENT_PANSTART: &str = "panzoom:panstart";
pub const EVENT_PANEND: &str = "panzoom:panend";
pub const EVENT_ZOOM: &str = "panzoom:zoom";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Notification {
    PanStart,
    PanEnd,
    Zoom(Transform),
}

impl Notification {
    pub fn event_name(&self) -> &'static str {
        match self {
            Notification::PanStart => EVENT_PANSTART,
            Notification::PanEnd => EVENT_PANEND,
            Notification::Zoom(_) => EVENT_ZOOM,
        }
    }

    /// JSON payload for the event `detail`, if any.
    pub fn detail_json(&self) -> Option<String> {
        match self {
            Notification::Zoom(t) => Some(t.to_json()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Viewport {
    config: PanZoomConfig,
    transform: Transform,
    max_scale: f64,
    drag: DragSession,
}

impl Viewport {
    pub fn new(config: PanZoomConfig) -> Self {
        let max_scale = upper_bound(config.min_scale, config.max_scale);
        let mut vp = Self {
            config,
            transform: Transform::default(),
            max_scale,
            drag: DragSession::default(),
        };
        vp.transform = vp.start_transform();
        vp
    }

    pub fn config(&self) -> &PanZoomConfig {
        &self.config
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.transform.x, self.transform.y)
    }

    pub fn min_scale(&self) -> f64 {
        self.config.min_scale
    }

    /// Active upper bound. Follows `maxScale` patches immediately.
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.min(self.max_scale).max(self.config.min_scale)
    }

    fn start_transform(&self) -> Transform {
        Transform::new(
            self.config.start_scale.max(self.config.min_scale),
            self.config.start_x,
            self.config.start_y,
        )
    }

    pub fn begin_drag(&mut self, at: LocalPoint) -> Option<Notification> {
        let opened = self.drag.begin(at, &self.transform);
        log::debug!("drag anchor ({}, {})", self.drag.anchor_x, self.drag.anchor_y);
        opened.then_some(Notification::PanStart)
    }

    /// Move the element with the pointer. Returns the new transform, or None
    /// when no drag is active.
    pub fn drag_to(&mut self, at: LocalPoint) -> Option<Transform> {
        let (x, y) = self.drag.track(at)?;
        self.transform.x = x;
        self.transform.y = y;
        Some(self.transform)
    }

    pub fn end_drag(&mut self) -> Option<Notification> {
        self.drag.end().then_some(Notification::PanEnd)
    }

    /// One wheel notch. Only the sign of `delta_y` matters: positive zooms
    /// out, anything else zooms in. `pointer` is only evaluated when the
    /// scale actually changes.
    pub fn wheel(&mut self, delta_y: f64, pointer: impl FnOnce() -> LocalPoint) -> Option<Notification> {
        if delta_y.is_nan() {
            return None;
        }
        let step = if delta_y > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        let old_scale = self.transform.scale;
        let new_scale = self.clamp_scale(old_scale * step);
        if new_scale == old_scale {
            return None;
        }
        let at = pointer();
        self.transform = self.transform.zoomed_at(new_scale, at.x, at.y);
        log::debug!("wheel zoom {old_scale} -> {new_scale} at ({}, {})", at.x, at.y);
        Some(Notification::Zoom(self.transform))
    }

    /// Set the scale about the current origin; translation is untouched.
    /// A non-finite target keeps the current scale.
    pub fn set_zoom(&mut self, target: f64) -> Notification {
        let target = if target.is_finite() { target } else { self.transform.scale };
        self.transform.scale = self.clamp_scale(target);
        Notification::Zoom(self.transform)
    }

    /// Unbounded translation. Non-finite components are ignored.
    pub fn set_pan(&mut self, x: f64, y: f64) -> Transform {
        if x.is_finite() {
            self.transform.x = x;
        }
        if y.is_finite() {
            self.transform.y = y;
        }
        self.transform
    }

    pub fn reset(&mut self) -> Notification {
        self.transform = self.start_transform();
        Notification::Zoom(self.transform)
    }

    /// Shallow-merge options. The current scale is not re-clamped.
    pub fn update_config(&mut self, patch: &ConfigPatch) {
        self.config.merge(patch);
        if patch.max_scale.is_some() || patch.min_scale.is_some() {
            self.max_scale = upper_bound(self.config.min_scale, self.config.max_scale);
        }
    }
}

fn upper_bound(min_scale: f64, max_scale: f64) -> f64 {
    if max_scale < min_scale {
        log::warn!("maxScale {max_scale} below minScale {min_scale}, raising it");
        min_scale
    } else {
        max_scale
    }
}
