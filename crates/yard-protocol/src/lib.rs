//! Wire protocol for the Yard game socket.
//!
//! Every frame on the socket is a single line of UTF-8 text:
//!
//! ```text
//! [createGame] {"number_of_detectives":4}
//! [startGame]
//! ```
//!
//! This crate defines:
//!
//! - **Types** ([`ProtocolMessage`]): a frame name plus an optional JSON body.
//! - **Codec** ([`encode`], [`decode`], the [`FrameCodec`] trait and
//!   [`TextFrameCodec`]): conversion between frames and messages.
//! - **Errors** ([`ProtocolError`]): what can go wrong on the way.
//!
//! # Architecture
//!
//! The protocol layer sits between the transport (raw text frames) and
//! the session layer (typed requests and responses). It knows nothing
//! about sockets or game semantics.
//!
//! ```text
//! Transport (text) → Protocol (ProtocolMessage) → Session (typed variants)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{decode, encode, FrameCodec, TextFrameCodec};
pub use error::ProtocolError;
pub use types::{ProtocolMessage, UNKNOWN_NAME};
