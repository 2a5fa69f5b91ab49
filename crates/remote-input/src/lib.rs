//! Remote input seam shared by touch-scroll adapters.
//!
//! Responsibilities:
//! - exposing the connection state of whatever carries input to the remote shell
//! - fire-and-forget delivery of opaque input payloads
//! - encoding SGR mouse-wheel reports for programs with mouse reporting enabled

pub mod wheel;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

/// Connection state of the underlying carrier, readable at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportStatus {
    Open,
    Connecting,
    Closed,
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("transport is not open")]
    NotOpen,
    #[error("transport send failed: {0}")]
    Failed(String),
}

pub type SendResult = Result<(), SendError>;

/// Carrier for input bytes headed to the remote shell process.
///
/// Sends are fire-and-forget: delivery is never awaited or acknowledged, and
/// the implementor supplies whatever envelope its wire requires around the
/// payload.
pub trait InputTransport: Send + Sync {
    fn status(&self) -> TransportStatus;

    fn send_input(&self, payload: &str) -> SendResult;
}

/// Simple in-memory transport for tests and non-network contexts.
#[derive(Debug)]
pub struct LocalTransport {
    status: RwLock<TransportStatus>,
    sent: Mutex<Vec<String>>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::with_status(TransportStatus::Open)
    }

    pub fn with_status(status: TransportStatus) -> Self {
        Self {
            status: RwLock::new(status),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn set_status(&self, status: TransportStatus) {
        *self.status.write() = status;
    }

    /// Payloads accepted so far, in send order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

impl Default for LocalTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl InputTransport for LocalTransport {
    fn status(&self) -> TransportStatus {
        *self.status.read()
    }

    fn send_input(&self, payload: &str) -> SendResult {
        if self.status() != TransportStatus::Open {
            return Err(SendError::NotOpen);
        }
        self.sent.lock().push(payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_transport_records_sends_in_order() {
        let transport = LocalTransport::new();
        transport.send_input("a").expect("send a");
        transport.send_input("b").expect("send b");
        assert_eq!(transport.sent(), ["a", "b"]);
    }

    #[test]
    fn closed_transport_rejects_sends() {
        let transport = LocalTransport::with_status(TransportStatus::Closed);
        let err = transport.send_input("x").expect_err("closed must reject");
        assert!(matches!(err, SendError::NotOpen));
        assert!(transport.sent().is_empty());

        transport.set_status(TransportStatus::Open);
        transport.send_input("x").expect("send after reopen");
        assert_eq!(transport.sent(), ["x"]);
    }

    #[test]
    fn connecting_counts_as_not_open() {
        let transport = LocalTransport::with_status(TransportStatus::Connecting);
        assert!(transport.send_input("x").is_err());
    }
}
