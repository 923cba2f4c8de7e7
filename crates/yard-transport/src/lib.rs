//! Socket transports for the Yard client.
//!
//! The session layer needs three things from a socket:
//!
//! - a reactive "latest inbound text" cell, which may be empty and is
//!   updated asynchronously ([`TextTransport::latest`]);
//! - an ordered stream of every inbound frame ([`TextTransport::frames`]);
//! - a fire-and-forget way to push a text frame ([`TextTransport::send_text`]).
//!
//! The cell is a [`tokio::sync::watch`] channel: readers always see the
//! most recent frame and can await the next change, older frames are
//! overwritten. The stream is a [`tokio::sync::broadcast`] channel fed by
//! the same reader, so frames sent back to back are all delivered, in
//! order. Reconnect and retry policy are not handled here.
//!
//! # Feature Flags
//!
//! - `websocket` (default): [`WebSocketTransport`] via `tokio-tungstenite`

mod error;
mod memory;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
pub use memory::{MemoryPeer, MemoryTransport};
#[cfg(feature = "websocket")]
pub use websocket::WebSocketTransport;

use std::fmt;

use tokio::sync::{broadcast, watch};

/// Frames a [`TextTransport::frames`] subscriber may fall behind by
/// before the oldest are dropped.
pub const FRAME_BUFFER: usize = 64;

/// Opaque identifier for a connection, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A bidirectional text socket seen from the client side.
pub trait TextTransport: Send + Sync + 'static {
    /// Returns a receiver for the most recent inbound text frame.
    ///
    /// The value is `None` until the first frame arrives. Every clone
    /// tracks changes independently.
    fn latest(&self) -> watch::Receiver<Option<String>>;

    /// Subscribes to every inbound text frame from now on, in arrival
    /// order.
    ///
    /// Frames received before the call are not replayed. The receiver
    /// reports `Closed` once the connection's reader has stopped, and
    /// `Lagged` if it fell more than [`FRAME_BUFFER`] frames behind.
    fn frames(&self) -> broadcast::Receiver<String>;

    /// Queues a text frame for sending.
    ///
    /// Returns as soon as the frame is queued. There is no delivery
    /// acknowledgement.
    ///
    /// # Errors
    /// [`TransportError::ConnectionClosed`] if the connection is gone.
    fn send_text(&self, text: String) -> Result<(), TransportError>;

    /// Returns the identifier of this connection.
    fn id(&self) -> ConnectionId;
}
