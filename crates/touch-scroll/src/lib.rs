//! Touch-gesture-to-terminal-scroll bridge.
//!
//! Converts single-finger touch motion into either local scrollback
//! navigation inside the terminal viewport or discrete mouse-wheel reports
//! forwarded to the remote shell, depending on which screen buffer the
//! terminal currently occupies.
//!
//! Responsibilities:
//! - waiting for the terminal's rendering surface to mount, installing touch
//!   handling once it exists, and tearing everything down without leaking
//!   listeners or timers
//! - locking each gesture to a horizontal or vertical axis and filtering
//!   motion noise
//! - routing classified vertical deltas to the viewport, the remote program,
//!   or both, preserving natural-scrolling direction semantics

pub mod attach;
pub mod bridge;
pub mod config;
pub mod gesture;
pub mod router;
pub mod surface;

pub use attach::{attach, TouchScrollAttachment};
pub use bridge::{EventDisposition, SelectionGate, TouchScrollBridge};
pub use config::TouchScrollConfig;
pub use gesture::{AxisLock, GestureTracker, MoveVerdict};
pub use router::{route, ScrollCommand, WheelBurst};
pub use surface::{BufferMode, LocalSurface, SurfaceHost, TouchEvent, TouchPoint, TouchSurface};
