use crate::config::TouchScrollConfig;
use crate::surface::BufferMode;
use remote_input::wheel::WheelDirection;

/// A run of discrete wheel ticks delivered as one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelBurst {
    pub direction: WheelDirection,
    pub repeat: usize,
}

/// Side effects one classified move event should produce. Computed per event
/// and discarded; never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    /// Local viewport delta in lines; zero means no call.
    pub viewport_lines: isize,
    /// Wheel ticks for the remote program; alternate-buffer mode only.
    pub wheel: Option<WheelBurst>,
    /// Whether the gesture's vertical baseline moves to this event's
    /// position.
    pub advance_baseline: bool,
}

/// Maps one vertical move delta onto scroll effects for the current buffer.
///
/// Natural scrolling throughout: a finger travelling down (positive delta)
/// reveals older content.
pub fn route(delta_y: f64, mode: BufferMode, config: &TouchScrollConfig) -> ScrollCommand {
    match mode {
        BufferMode::Alternate => {
            // The foreground program owns scrolling and only understands
            // wheel reports. The viewport delta is an advisory fallback for
            // engines that still expose scrollback in alternate mode.
            let direction = if delta_y > 0.0 {
                WheelDirection::Up
            } else {
                WheelDirection::Down
            };
            let repeat = ((delta_y.abs() / config.wheel_tick_divisor).round() as usize).max(1);
            ScrollCommand {
                viewport_lines: (-delta_y / config.alternate_scroll_divisor).round() as isize,
                wheel: Some(WheelBurst { direction, repeat }),
                advance_baseline: true,
            }
        }
        BufferMode::Normal => {
            let lines = (-delta_y / config.normal_scroll_divisor).round() as isize;
            ScrollCommand {
                viewport_lines: lines,
                wheel: None,
                // A zero-line move keeps the baseline put so sub-line travel
                // still counts toward the next event.
                advance_baseline: lines != 0,
            }
        }
    }
}
