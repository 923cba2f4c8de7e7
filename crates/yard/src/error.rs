//! Unified error type for the Yard client.

use yard_map::MapError;
use yard_protocol::ProtocolError;
use yard_session::SessionError;
use yard_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attributes let `?` convert sub-crate errors directly.
#[derive(Debug, thiserror::Error)]
pub enum YardError {
    /// Connecting, sending, or a dropped socket.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A frame that could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level failure.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Bad map data or map configuration.
    #[error(transparent)]
    Map(#[from] MapError),

    /// The server answered a request with an `error` frame.
    #[error("server rejected request: {0}")]
    Rejected(String),

    /// No response arrived within the configured timeout.
    #[error("no response within {0:?}")]
    Timeout(std::time::Duration),

    /// The server answered with a frame other than the one expected.
    #[error("unexpected response [{0}]")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectionClosed("gone".into());
        let yard_err: YardError = err.into();
        assert!(matches!(yard_err, YardError::Transport(_)));
        assert!(yard_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::MissingBody("game".into());
        let yard_err: YardError = err.into();
        assert!(matches!(yard_err, YardError::Protocol(_)));
        assert_eq!(yard_err.to_string(), "frame [game] has no body");
    }

    #[test]
    fn test_from_session_error() {
        let yard_err: YardError = SessionError::Closed.into();
        assert!(matches!(yard_err, YardError::Session(_)));
    }

    #[test]
    fn test_from_map_error() {
        let err = MapError::InvalidStationRadius(0.0);
        let yard_err: YardError = err.into();
        assert!(matches!(yard_err, YardError::Map(_)));
    }

    #[test]
    fn test_rejected_display() {
        let err = YardError::Rejected("game is full".into());
        assert_eq!(err.to_string(), "server rejected request: game is full");
    }
}
