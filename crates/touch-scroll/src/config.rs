use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for gesture classification and scroll routing.
///
/// Every field defaults, so host applications can splice a partial block into
/// their own layered configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchScrollConfig {
    /// Travel from the gesture origin (px, either axis) required before the
    /// gesture locks to an axis.
    pub axis_lock_threshold: f64,
    /// Per-move vertical travel (px) below which a vertically locked gesture
    /// emits nothing. Independent of the axis-lock threshold.
    pub move_noise_floor: f64,
    /// Pixels of travel per discrete wheel tick in alternate-buffer mode.
    pub wheel_tick_divisor: f64,
    /// Pixels per viewport line for the alternate-buffer local fallback.
    pub alternate_scroll_divisor: f64,
    /// Pixels per viewport line in normal-buffer mode. Finer than the
    /// alternate fallback: here the local scroll is the primary effect.
    pub normal_scroll_divisor: f64,
    /// How often to re-check for the rendering surface while the terminal
    /// engine is still mounting it.
    pub surface_poll_interval: Duration,
}

impl Default for TouchScrollConfig {
    fn default() -> Self {
        Self {
            axis_lock_threshold: 10.0,
            move_noise_floor: 10.0,
            wheel_tick_divisor: 20.0,
            alternate_scroll_divisor: 20.0,
            normal_scroll_divisor: 15.0,
            surface_poll_interval: Duration::from_millis(50),
        }
    }
}
