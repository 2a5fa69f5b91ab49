//! SGR mouse-wheel report encoding.
//!
//! One tick is the fixed report for wheel button 64 (up, toward older
//! content) or 65 (down), reported at column 1 row 1 — pointer position is
//! irrelevant for scroll semantics, so the coordinates never vary.

/// Report for one wheel-up click.
pub const WHEEL_UP_TICK: &str = "\x1b[<64;1;1M";

/// Report for one wheel-down click.
pub const WHEEL_DOWN_TICK: &str = "\x1b[<65;1;1M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

pub fn wheel_tick(direction: WheelDirection) -> &'static str {
    match direction {
        WheelDirection::Up => WHEEL_UP_TICK,
        WheelDirection::Down => WHEEL_DOWN_TICK,
    }
}

/// Concatenates `repeat` ticks into a single payload so a multi-tick burst
/// costs one send rather than one per tick.
pub fn wheel_burst(direction: WheelDirection, repeat: usize) -> String {
    wheel_tick(direction).repeat(repeat)
}
