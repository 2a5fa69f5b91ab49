use crate::config::TouchScrollConfig;
use crate::surface::TouchPoint;

/// Axis decision for one gesture, made at most once per gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisLock {
    Horizontal,
    Vertical,
}

/// Per-gesture tracking state. Reset at every touch-start and at
/// end/cancel; never persisted across gestures.
#[derive(Debug, Clone, Copy, Default)]
struct GestureState {
    last_y: Option<f64>,
    initial_x: Option<f64>,
    initial_y: Option<f64>,
    axis: Option<AxisLock>,
}

/// Outcome of feeding one move event to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveVerdict {
    /// Selection mode is active, the touch list is empty, or no gesture is
    /// being tracked. The event is not ours.
    Ignored,
    /// Motion so far stays under the axis-lock threshold.
    Undecided,
    /// Locked horizontal: an outer navigation handler owns this gesture.
    Horizontal,
    /// Locked vertical, but travel since the baseline is under the noise
    /// floor.
    Jitter,
    /// Locked vertical with meaningful travel since the baseline.
    Vertical { delta_y: f64, y: f64 },
}

/// Classifies a stream of touch events into per-move verdicts.
///
/// The tracker never advances the vertical baseline itself when it emits:
/// the router decides whether a move commits (a zero-line normal-buffer move
/// must not, or sub-line travel would be lost instead of accumulating into
/// the next event).
#[derive(Debug)]
pub struct GestureTracker {
    axis_lock_threshold: f64,
    move_noise_floor: f64,
    state: GestureState,
}

impl GestureTracker {
    pub fn new(config: &TouchScrollConfig) -> Self {
        Self {
            axis_lock_threshold: config.axis_lock_threshold,
            move_noise_floor: config.move_noise_floor,
            state: GestureState::default(),
        }
    }

    /// Begin tracking at the first touch point. Ignored while selection mode
    /// is active or when the event carries no touches.
    pub fn touch_start(&mut self, touches: &[TouchPoint], selection_active: bool) {
        if selection_active || touches.is_empty() {
            return;
        }
        let touch = touches[0];
        self.state = GestureState {
            last_y: Some(touch.y),
            initial_x: Some(touch.x),
            initial_y: Some(touch.y),
            axis: None,
        };
    }

    /// Classify one move event. A move during selection mode stalls the
    /// gesture rather than resetting it; tracking resumes from the same
    /// baseline once selection ends.
    pub fn touch_move(&mut self, touches: &[TouchPoint], selection_active: bool) -> MoveVerdict {
        if selection_active || touches.is_empty() {
            return MoveVerdict::Ignored;
        }
        let (Some(last_y), Some(initial_x), Some(initial_y)) =
            (self.state.last_y, self.state.initial_x, self.state.initial_y)
        else {
            return MoveVerdict::Ignored;
        };

        let touch = touches[0];
        let delta_x = (touch.x - initial_x).abs();
        let delta_y = (touch.y - initial_y).abs();

        if self.state.axis.is_none()
            && (delta_x > self.axis_lock_threshold || delta_y > self.axis_lock_threshold)
        {
            // First crossing decides; a tie locks vertical.
            self.state.axis = Some(if delta_x > delta_y {
                AxisLock::Horizontal
            } else {
                AxisLock::Vertical
            });
        }

        match self.state.axis {
            None => MoveVerdict::Undecided,
            Some(AxisLock::Horizontal) => MoveVerdict::Horizontal,
            Some(AxisLock::Vertical) => {
                let move_delta_y = touch.y - last_y;
                if move_delta_y.abs() < self.move_noise_floor {
                    MoveVerdict::Jitter
                } else {
                    MoveVerdict::Vertical {
                        delta_y: move_delta_y,
                        y: touch.y,
                    }
                }
            }
        }
    }

    /// End and cancel both drop the gesture unconditionally.
    pub fn touch_end(&mut self) {
        self.state = GestureState::default();
    }

    /// Commit a new vertical baseline for an emitted move.
    pub fn advance_baseline(&mut self, y: f64) {
        if self.state.last_y.is_some() {
            self.state.last_y = Some(y);
        }
    }

    pub fn axis(&self) -> Option<AxisLock> {
        self.state.axis
    }
}
