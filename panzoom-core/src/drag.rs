use crate::metrics::LocalPoint;
use crate::transform::Transform;

/// Single-pointer drag. The anchor is the offset between the pointer and the
/// element's translation when the drag began.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragSession {
    pub active: bool,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

impl DragSession {
    /// Returns true when this opens a new session (false if one was already
    /// active, in which case it is re-anchored).
    pub fn begin(&mut self, at: LocalPoint, current: &Transform) -> bool {
        let was_active = self.active;
        self.active = true;
        self.anchor_x = at.x - current.x;
        self.anchor_y = at.y - current.y;
        !was_active
    }

    /// Translation for the pointer at `at`, or None when idle.
    pub fn track(&self, at: LocalPoint) -> Option<(f64, f64)> {
        self.active.then(|| (at.x - self.anchor_x, at.y - self.anchor_y))
    }

    /// Returns true if a session was closed.
    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_and_track() {
        let mut d = DragSession::default();
        assert!(d.begin(LocalPoint::new(10.0, 10.0), &Transform::new(1.0, 5.0, 5.0)));
        assert_eq!((d.anchor_x, d.anchor_y), (5.0, 5.0));
        assert_eq!(d.track(LocalPoint::new(20.0, 15.0)), Some((15.0, 10.0)));
    }

    #[test]
    fn test_idle_track_is_none() {
        let d = DragSession::default();
        assert_eq!(d.track(LocalPoint::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_end_twice() {
        let mut d = DragSession::default();
        d.begin(LocalPoint::default(), &Transform::default());
        assert!(d.end());
        assert!(!d.end());
    }

    #[test]
    fn test_begin_while_active_reanchors() {
        let mut d = DragSession::default();
        assert!(d.begin(LocalPoint::new(0.0, 0.0), &Transform::default()));
        assert!(!d.begin(LocalPoint::new(8.0, 4.0), &Transform::new(1.0, 2.0, 2.0)));
        assert_eq!((d.anchor_x, d.anchor_y), (6.0, 2.0));
    }
}
