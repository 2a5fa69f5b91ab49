use std::sync::Arc;

use remote_input::InputTransport;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, warn};

use crate::bridge::{SelectionGate, TouchScrollBridge};
use crate::config::TouchScrollConfig;
use crate::surface::SurfaceHost;

/// Handle for one attach cycle.
///
/// Detaching is idempotent and safe whether or not the surface ever mounted;
/// dropping the handle detaches.
pub struct TouchScrollAttachment {
    shutdown: Option<mpsc::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl TouchScrollAttachment {
    /// Stops the worker: no event is processed after this returns. A payload
    /// already handed to the transport is not recalled.
    pub fn detach(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.try_send(());
        }
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }

    pub fn is_detached(&self) -> bool {
        self.worker.is_none()
    }
}

impl Drop for TouchScrollAttachment {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Waits for the host's rendering surface to mount, installs touch handling
/// once it exists, and routes gestures until detached.
///
/// The surface never appearing is not an error; the worker keeps polling at
/// `surface_poll_interval` until detach. Must be called from within a tokio
/// runtime.
pub fn attach(
    host: Arc<dyn SurfaceHost>,
    transport: Arc<dyn InputTransport>,
    selection: Arc<dyn SelectionGate>,
    config: TouchScrollConfig,
) -> TouchScrollAttachment {
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
    let poll_interval = config.surface_poll_interval;

    let worker = tokio::spawn(async move {
        let surface = loop {
            if let Some(surface) = host.find_scroll_surface() {
                break surface;
            }
            tokio::select! {
                _ = shutdown_rx.recv() => return,
                _ = time::sleep(poll_interval) => {}
            }
        };

        surface.prepare_for_touch();
        let mut events = surface.subscribe_touch();
        debug!(target = "touch::attach", "touch scroll attached");

        let mut bridge = TouchScrollBridge::new(surface, transport, selection, config);
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                event = events.recv() => match event {
                    Ok(event) => {
                        bridge.handle_event(&event);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(target = "touch::attach", skipped, "touch events lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
        debug!(target = "touch::attach", "touch scroll detached");
    });

    TouchScrollAttachment {
        shutdown: Some(shutdown_tx),
        worker: Some(worker),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{
        BufferMode, LocalSurface, TouchEvent, TouchPoint, TouchSurface,
    };
    use parking_lot::Mutex;
    use remote_input::LocalTransport;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    fn test_config() -> TouchScrollConfig {
        TouchScrollConfig {
            surface_poll_interval: Duration::from_millis(5),
            ..TouchScrollConfig::default()
        }
    }

    fn no_selection() -> Arc<dyn SelectionGate> {
        Arc::new(|| false)
    }

    /// Polls `probe` until it returns true or the deadline passes.
    async fn wait_for(probe: impl Fn() -> bool) {
        timeout(Duration::from_secs(2), async {
            while !probe() {
                sleep(Duration::from_millis(2)).await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    #[tokio::test]
    async fn attaches_once_the_surface_mounts() {
        let mounted: Arc<Mutex<Option<Arc<LocalSurface>>>> = Arc::new(Mutex::new(None));
        let host = {
            let mounted = mounted.clone();
            Arc::new(move || {
                mounted
                    .lock()
                    .clone()
                    .map(|surface| surface as Arc<dyn TouchSurface>)
            }) as Arc<dyn SurfaceHost>
        };
        let transport = Arc::new(LocalTransport::new());

        let mut attachment = attach(
            host,
            transport.clone(),
            no_selection(),
            test_config(),
        );

        // Let a few polls land before the surface exists.
        sleep(Duration::from_millis(20)).await;
        let surface = Arc::new(LocalSurface::with_mode(BufferMode::Alternate));
        *mounted.lock() = Some(surface.clone());

        {
            let surface = surface.clone();
            wait_for(move || surface.prepare_count() == 1).await;
        }

        surface.emit(TouchEvent::Start {
            touches: vec![TouchPoint::new(100.0, 100.0)],
        });
        surface.emit(TouchEvent::Move {
            touches: vec![TouchPoint::new(100.0, 145.0)],
        });

        {
            let transport = transport.clone();
            wait_for(move || !transport.sent().is_empty()).await;
        }
        assert_eq!(transport.sent(), ["\x1b[<64;1;1M\x1b[<64;1;1M"]);
        assert_eq!(surface.scrolled(), [-2]);

        attachment.detach();
        assert!(attachment.is_detached());
    }

    #[tokio::test]
    async fn detach_before_mount_stops_polling_and_is_idempotent() {
        let polls = Arc::new(AtomicUsize::new(0));
        let host = {
            let polls = polls.clone();
            Arc::new(move || -> Option<Arc<dyn TouchSurface>> {
                polls.fetch_add(1, Ordering::SeqCst);
                None
            }) as Arc<dyn SurfaceHost>
        };
        let transport = Arc::new(LocalTransport::new());

        let mut attachment = attach(host, transport, no_selection(), test_config());
        {
            let polls = polls.clone();
            wait_for(move || polls.load(Ordering::SeqCst) >= 2).await;
        }

        attachment.detach();
        attachment.detach();
        assert!(attachment.is_detached());

        let seen = polls.load(Ordering::SeqCst);
        sleep(Duration::from_millis(30)).await;
        assert_eq!(polls.load(Ordering::SeqCst), seen);
    }

    #[tokio::test]
    async fn dropping_the_handle_detaches() {
        let polls = Arc::new(AtomicUsize::new(0));
        let host = {
            let polls = polls.clone();
            Arc::new(move || -> Option<Arc<dyn TouchSurface>> {
                polls.fetch_add(1, Ordering::SeqCst);
                None
            }) as Arc<dyn SurfaceHost>
        };
        let transport = Arc::new(LocalTransport::new());

        {
            let _attachment = attach(host, transport, no_selection(), test_config());
            let polls = polls.clone();
            wait_for(move || polls.load(Ordering::SeqCst) >= 1).await;
        }

        let seen = polls.load(Ordering::SeqCst);
        sleep(Duration::from_millis(30)).await;
        assert_eq!(polls.load(Ordering::SeqCst), seen);
    }

    #[tokio::test]
    async fn selection_mode_suppresses_routing_end_to_end() {
        let surface = Arc::new(LocalSurface::with_mode(BufferMode::Alternate));
        let host = {
            let surface = surface.clone();
            Arc::new(move || Some(surface.clone() as Arc<dyn TouchSurface>))
                as Arc<dyn SurfaceHost>
        };
        let transport = Arc::new(LocalTransport::new());

        let mut attachment = attach(
            host,
            transport.clone(),
            Arc::new(|| true),
            test_config(),
        );

        {
            let surface = surface.clone();
            wait_for(move || surface.prepare_count() == 1).await;
        }
        surface.emit(TouchEvent::Start {
            touches: vec![TouchPoint::new(100.0, 100.0)],
        });
        surface.emit(TouchEvent::Move {
            touches: vec![TouchPoint::new(100.0, 200.0)],
        });
        surface.emit(TouchEvent::End);

        sleep(Duration::from_millis(30)).await;
        assert!(transport.sent().is_empty());
        assert!(surface.scrolled().is_empty());

        attachment.detach();
    }
}
