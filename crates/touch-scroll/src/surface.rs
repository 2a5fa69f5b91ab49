use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Which screen the terminal currently occupies. Owned by the terminal
/// engine; callers query it fresh on every move event because a foreground
/// program can flip it between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferMode {
    /// Primary screen with scrollback history.
    Normal,
    /// Full-screen mode with no addressable scrollback; scrolling must be
    /// forwarded to the foreground program.
    Alternate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One raw touch event as delivered by the host surface. Multi-touch events
/// carry every active point; the bridge tracks the first.
#[derive(Debug, Clone, PartialEq)]
pub enum TouchEvent {
    Start { touches: Vec<TouchPoint> },
    Move { touches: Vec<TouchPoint> },
    End,
    Cancel,
}

/// Capability seam over the terminal engine's scrollable rendering surface.
pub trait TouchSurface: Send + Sync {
    /// One-time setup once the surface exists: disable the host's native
    /// touch handling and text selection on the surface and anything it
    /// renders into.
    fn prepare_for_touch(&self);

    /// Subscribe to the surface's raw touch stream. Dropping the receiver
    /// removes the listener.
    fn subscribe_touch(&self) -> broadcast::Receiver<TouchEvent>;

    fn buffer_mode(&self) -> BufferMode;

    /// Best-effort viewport scroll; negative moves toward older content.
    /// Implementations must swallow their own failures rather than panic.
    fn scroll_viewport(&self, lines: isize);
}

/// Locates the scrollable rendering surface inside a host that may still be
/// mounting it. `None` until the surface exists.
pub trait SurfaceHost: Send + Sync {
    fn find_scroll_surface(&self) -> Option<Arc<dyn TouchSurface>>;
}

impl<F> SurfaceHost for F
where
    F: Fn() -> Option<Arc<dyn TouchSurface>> + Send + Sync,
{
    fn find_scroll_surface(&self) -> Option<Arc<dyn TouchSurface>> {
        (self)()
    }
}

/// Simple in-memory surface for tests and headless embedding.
#[derive(Debug)]
pub struct LocalSurface {
    events: broadcast::Sender<TouchEvent>,
    mode: RwLock<BufferMode>,
    scrolls: Mutex<Vec<isize>>,
    prepared: AtomicUsize,
}

impl LocalSurface {
    pub fn new() -> Self {
        Self::with_mode(BufferMode::Normal)
    }

    pub fn with_mode(mode: BufferMode) -> Self {
        Self {
            events: broadcast::channel(64).0,
            mode: RwLock::new(mode),
            scrolls: Mutex::new(Vec::new()),
            prepared: AtomicUsize::new(0),
        }
    }

    pub fn set_buffer_mode(&self, mode: BufferMode) {
        *self.mode.write() = mode;
    }

    /// Feed one touch event to every subscriber. Silently dropped when no
    /// listener is attached, as a real surface's events would be.
    pub fn emit(&self, event: TouchEvent) {
        let _ = self.events.send(event);
    }

    /// Viewport scrolls received so far, in line deltas.
    pub fn scrolled(&self) -> Vec<isize> {
        self.scrolls.lock().clone()
    }

    pub fn prepare_count(&self) -> usize {
        self.prepared.load(Ordering::SeqCst)
    }
}

impl Default for LocalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchSurface for LocalSurface {
    fn prepare_for_touch(&self) {
        self.prepared.fetch_add(1, Ordering::SeqCst);
    }

    fn subscribe_touch(&self) -> broadcast::Receiver<TouchEvent> {
        self.events.subscribe()
    }

    fn buffer_mode(&self) -> BufferMode {
        *self.mode.read()
    }

    fn scroll_viewport(&self, lines: isize) {
        self.scrolls.lock().push(lines);
    }
}
