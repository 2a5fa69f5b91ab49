use std::sync::Arc;

use remote_input::wheel::wheel_burst;
use remote_input::{InputTransport, TransportStatus};
use tracing::{debug, trace};

use crate::config::TouchScrollConfig;
use crate::gesture::{GestureTracker, MoveVerdict};
use crate::router::{route, ScrollCommand};
use crate::surface::{TouchEvent, TouchPoint, TouchSurface};

/// Read-only selection-mode flag owned by the surrounding UI. While active
/// the bridge takes no action, so native text selection wins over scrolling.
pub trait SelectionGate: Send + Sync {
    fn selection_active(&self) -> bool;
}

impl<F> SelectionGate for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn selection_active(&self) -> bool {
        (self)()
    }
}

/// What the host adapter should do with the raw event after the bridge has
/// seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Leave native and outer handling alone. Horizontal swipes stay
    /// available to the host's own navigation this way.
    Release,
    /// The bridge claimed the event; the host should suppress its default
    /// handling.
    Consume,
}

/// Synchronous core of the bridge: classification, routing, and the two
/// best-effort side effects. Host adapters that need the per-event
/// disposition drive this directly; [`crate::attach`] wraps it in a worker.
pub struct TouchScrollBridge {
    tracker: GestureTracker,
    config: TouchScrollConfig,
    surface: Arc<dyn TouchSurface>,
    transport: Arc<dyn InputTransport>,
    selection: Arc<dyn SelectionGate>,
}

impl TouchScrollBridge {
    pub fn new(
        surface: Arc<dyn TouchSurface>,
        transport: Arc<dyn InputTransport>,
        selection: Arc<dyn SelectionGate>,
        config: TouchScrollConfig,
    ) -> Self {
        Self {
            tracker: GestureTracker::new(&config),
            config,
            surface,
            transport,
            selection,
        }
    }

    /// Feed one raw touch event through classification and routing.
    pub fn handle_event(&mut self, event: &TouchEvent) -> EventDisposition {
        match event {
            TouchEvent::Start { touches } => {
                self.tracker
                    .touch_start(touches, self.selection.selection_active());
                EventDisposition::Release
            }
            TouchEvent::Move { touches } => self.handle_move(touches),
            TouchEvent::End | TouchEvent::Cancel => {
                self.tracker.touch_end();
                EventDisposition::Release
            }
        }
    }

    fn handle_move(&mut self, touches: &[TouchPoint]) -> EventDisposition {
        match self
            .tracker
            .touch_move(touches, self.selection.selection_active())
        {
            MoveVerdict::Ignored | MoveVerdict::Horizontal => EventDisposition::Release,
            MoveVerdict::Undecided | MoveVerdict::Jitter => EventDisposition::Consume,
            MoveVerdict::Vertical { delta_y, y } => {
                // Buffer mode is read per event; a foreground program can
                // flip it between frames.
                let command = route(delta_y, self.surface.buffer_mode(), &self.config);
                self.dispatch(&command);
                if command.advance_baseline {
                    self.tracker.advance_baseline(y);
                }
                EventDisposition::Consume
            }
        }
    }

    /// Both effects are best-effort; nothing here may abort an in-progress
    /// gesture.
    fn dispatch(&self, command: &ScrollCommand) {
        if let Some(burst) = command.wheel {
            match self.transport.status() {
                TransportStatus::Open => {
                    let payload = wheel_burst(burst.direction, burst.repeat);
                    if let Err(err) = self.transport.send_input(&payload) {
                        debug!(target = "touch::router", error = %err, "wheel burst dropped");
                    }
                }
                status => {
                    // Stale by the time a reconnect lands; drop, don't queue.
                    trace!(
                        target = "touch::router",
                        ?status,
                        repeat = burst.repeat,
                        "wheel burst skipped"
                    );
                }
            }
        }
        if command.viewport_lines != 0 {
            self.surface.scroll_viewport(command.viewport_lines);
        }
    }
}
