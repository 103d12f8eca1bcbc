//! Drag - Swipe classification and pointer tracking
//!
//! Classification is a pure function of the horizontal displacement at
//! release. Positive displacement means the content was dragged right,
//! which reveals the previous slide.

/// Default swipe distance in logical pixels.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 100.0;

/// What a released drag asks the carousel to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Previous,
    Next,
    Stay,
}

/// Classify a release displacement against `threshold`.
///
/// Only displacements strictly beyond the threshold navigate. NaN never
/// navigates.
pub fn classify_drag(displacement_x: f32, threshold: f32) -> DragOutcome {
    if displacement_x > threshold {
        DragOutcome::Previous
    } else if displacement_x < -threshold {
        DragOutcome::Next
    } else {
        DragOutcome::Stay
    }
}

// =============================================================================
// DRAG TRACKER
// =============================================================================

/// Turns pointer positions into the displacement of one gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    origin: Option<f32>,
    last: f32,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture at `x`, discarding any gesture in progress.
    pub fn begin(&mut self, x: f32) {
        self.origin = Some(x);
        self.last = x;
    }

    /// Record a pointer move. Ignored when no gesture is active.
    pub fn move_to(&mut self, x: f32) {
        if self.origin.is_some() {
            self.last = x;
        }
    }

    /// Finish the gesture at `x` and return its total displacement.
    pub fn end(&mut self, x: f32) -> Option<f32> {
        let origin = self.origin.take()?;
        self.last = x;
        Some(x - origin)
    }

    /// Abandon the gesture without a displacement.
    pub fn cancel(&mut self) {
        self.origin = None;
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// Displacement so far (0 when idle).
    pub fn displacement(&self) -> f32 {
        self.origin.map(|origin| self.last - origin).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_beyond_threshold() {
        assert_eq!(classify_drag(150.0, DEFAULT_DRAG_THRESHOLD), DragOutcome::Previous);
        assert_eq!(classify_drag(-150.0, DEFAULT_DRAG_THRESHOLD), DragOutcome::Next);
    }

    #[test]
    fn test_classify_within_threshold() {
        assert_eq!(classify_drag(50.0, DEFAULT_DRAG_THRESHOLD), DragOutcome::Stay);
        assert_eq!(classify_drag(-50.0, DEFAULT_DRAG_THRESHOLD), DragOutcome::Stay);
        assert_eq!(classify_drag(0.0, DEFAULT_DRAG_THRESHOLD), DragOutcome::Stay);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(classify_drag(100.0, DEFAULT_DRAG_THRESHOLD), DragOutcome::Stay);
        assert_eq!(classify_drag(-100.0, DEFAULT_DRAG_THRESHOLD), DragOutcome::Stay);
        assert_eq!(classify_drag(100.5, DEFAULT_DRAG_THRESHOLD), DragOutcome::Previous);
    }

    #[test]
    fn test_classify_abnormal_values() {
        assert_eq!(classify_drag(f32::NAN, DEFAULT_DRAG_THRESHOLD), DragOutcome::Stay);
        assert_eq!(classify_drag(f32::INFINITY, DEFAULT_DRAG_THRESHOLD), DragOutcome::Previous);
        assert_eq!(classify_drag(f32::NEG_INFINITY, DEFAULT_DRAG_THRESHOLD), DragOutcome::Next);
    }

    #[test]
    fn test_tracker_gesture() {
        let mut tracker = DragTracker::new();
        assert!(!tracker.is_active());

        tracker.begin(200.0);
        tracker.move_to(150.0);
        assert_eq!(tracker.displacement(), -50.0);

        assert_eq!(tracker.end(40.0), Some(-160.0));
        assert!(!tracker.is_active());
        assert_eq!(tracker.displacement(), 0.0);
    }

    #[test]
    fn test_tracker_end_without_begin() {
        let mut tracker = DragTracker::new();
        tracker.move_to(30.0);
        assert_eq!(tracker.end(80.0), None);
    }

    #[test]
    fn test_tracker_cancel() {
        let mut tracker = DragTracker::new();
        tracker.begin(0.0);
        tracker.move_to(300.0);
        tracker.cancel();
        assert_eq!(tracker.end(300.0), None);
    }
}
