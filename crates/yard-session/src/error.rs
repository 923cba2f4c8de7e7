//! Error types for the session layer.

use yard_protocol::ProtocolError;
use yard_transport::TransportError;

/// Errors that can occur while talking to the game server.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The frame could not be queued on the socket.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A frame could not be encoded, or an inbound frame could not be
    /// decoded. Covers malformed JSON and known names whose body has the
    /// wrong shape.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The transport's inbound cell was dropped, so no further responses
    /// will ever arrive.
    #[error("inbound stream closed")]
    Closed,
}
