//! The message type that travels on the wire.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::ProtocolError;

/// Frame name used when a frame has no recognisable `[name]` token.
pub const UNKNOWN_NAME: &str = "?";

/// One decoded frame: a name and an optional JSON body.
///
/// The body is kept as a raw [`Value`] here. Turning it into a concrete
/// type is the job of the layer that knows what the name means (see
/// [`body_as`](Self::body_as)).
///
/// `name` must not contain `]` or whitespace. That is a property of the
/// wire format, not something this type checks.
///
/// A JSON `null` body and a missing body are the same thing on the wire,
/// so `body` is never `Some(Value::Null)` after decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolMessage {
    /// Frame name, without the surrounding brackets.
    pub name: String,
    /// Decoded JSON body, if the frame carried one.
    pub body: Option<Value>,
}

impl ProtocolMessage {
    /// Creates a message with no body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: None,
        }
    }

    /// Creates a message whose body is `body` serialized to JSON.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if `body` cannot be represented
    /// as JSON.
    pub fn with_body<T: Serialize>(
        name: impl Into<String>,
        body: &T,
    ) -> Result<Self, ProtocolError> {
        let value = serde_json::to_value(body).map_err(ProtocolError::Encode)?;
        Ok(Self {
            name: name.into(),
            body: (!value.is_null()).then_some(value),
        })
    }

    /// Deserializes the body into `T`.
    ///
    /// # Errors
    /// - [`ProtocolError::MissingBody`] if the frame had no body.
    /// - [`ProtocolError::Decode`] if the body has the wrong shape.
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T, ProtocolError> {
        let body = self
            .body
            .as_ref()
            .ok_or_else(|| ProtocolError::MissingBody(self.name.clone()))?;
        T::deserialize(body).map_err(ProtocolError::Decode)
    }

    /// Returns `true` if the frame name could not be read.
    pub fn is_unnamed(&self) -> bool {
        self.name == UNKNOWN_NAME
    }

    /// Encodes this message into its wire form.
    pub fn encode(&self) -> String {
        crate::encode(&self.name, self.body.as_ref())
    }
}

/// Display prints the wire form, so `tracing` fields and `to_string()`
/// show exactly what goes on the socket.
impl fmt::Display for ProtocolMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            Some(body) if !body.is_null() => write!(f, "[{}] {}", self.name, body),
            _ => write!(f, "[{}]", self.name),
        }
    }
}
