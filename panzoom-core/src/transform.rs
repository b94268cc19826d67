use serde::Serialize;

/// Uniform scale followed by a translation, applied with origin at the
/// element's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transform {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

impl Transform {
    pub fn new(scale: f64, x: f64, y: f64) -> Self {
        Self { scale, x, y }
    }

    /// Rescale so the content point under `(mx, my)` (container content-box
    /// coordinates) stays under it after the change.
    pub fn zoomed_at(&self, new_scale: f64, mx: f64, my: f64) -> Transform {
        let ratio = new_scale / self.scale;
        Transform {
            scale: new_scale,
            x: mx - (mx - self.x) * ratio,
            y: my - (my - self.y) * ratio,
        }
    }

    /// CSS `transform` value: `matrix(s, 0, 0, s, x, y)`.
    pub fn css_matrix(&self) -> String {
        format!("matrix({}, 0, 0, {}, {}, {})", self.scale, self.scale, self.x, self.y)
    }

    /// JSON object used as the `detail` of zoom notifications.
    /// serde_json writes non-finite floats as `null`, so this cannot fail.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}
