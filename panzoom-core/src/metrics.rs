/// Point in the container's content-box coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalPoint {
    pub x: f64,
    pub y: f64,
}

impl LocalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Container padding and border widths, captured once at construction and
/// never re-measured.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerMetrics {
    pub padding_left: f64,
    pub padding_top: f64,
    pub border_left: f64,
    pub border_top: f64,
}

impl ContainerMetrics {
    /// Widths in px as read from the computed style. Values the browser
    /// could not provide (NaN from `parseFloat`) count as 0.
    pub fn new(padding_left: f64, padding_top: f64, border_left: f64, border_top: f64) -> Self {
        Self {
            padding_left: finite_or_zero(padding_left),
            padding_top: finite_or_zero(padding_top),
            border_left: finite_or_zero(border_left),
            border_top: finite_or_zero(border_top),
        }
    }

    /// Convert viewport (client) coordinates into content-box coordinates,
    /// given the container's bounding-box top-left corner.
    pub fn to_local(&self, client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> LocalPoint {
        LocalPoint {
            x: client_x - rect_left - self.border_left - self.padding_left,
            y: client_y - rect_top - self.border_top - self.padding_top,
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        log::warn!("unusable container metric {v}, using 0");
        0.0
    }
}
