//! Error types for the protocol layer.
//!
//! Each Yard crate defines its own error enum. A `ProtocolError` always
//! means the problem is in turning frames into messages (or back), never
//! in networking or rendering.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A typed body could not be turned into JSON.
    ///
    /// Plain [`serde_json::Value`] bodies never hit this; it only shows up
    /// through [`ProtocolMessage::with_body`](crate::ProtocolMessage::with_body)
    /// for types whose `Serialize` impl can fail (e.g. maps with
    /// non-string keys).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The body portion of a frame was not valid JSON, or did not match
    /// the type the caller asked for.
    ///
    /// This is fatal for the frame it came from and is always returned
    /// to the caller of [`decode`](crate::decode).
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A typed body was requested from a frame that carried none.
    /// The string is the frame name.
    #[error("frame [{0}] has no body")]
    MissingBody(String),
}
