pub mod config;
pub mod drag;
pub mod metrics;
pub mod transform;
pub mod viewport;

pub use config::{ConfigPatch, PanZoomConfig};
pub use drag::DragSession;
pub use metrics::{ContainerMetrics, LocalPoint};
pub use transform::Transform;
pub use viewport::{Notification, Viewport};
