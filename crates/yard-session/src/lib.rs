//! Game-session messaging for the Yard client.
//!
//! This crate turns the untyped frames of `yard-protocol` into the typed
//! handshake used to get a game going:
//!
//! 1. **Requests**: [`SessionRequest`] (create / join / start a game, plus
//!    the move envelopes).
//! 2. **Responses**: [`SessionResponse`], with an `Unrecognized` catch-all
//!    for names this crate does not model.
//! 3. **Client**: [`SessionClient`] sends requests over any
//!    [`TextTransport`](yard_transport::TextTransport);
//!    [`ResponseWatcher`] derives responses from the transport's latest
//!    inbound frame, and [`ResponseStream`] yields every response in
//!    arrival order.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session Layer (this crate)  ← typed requests / responses
//!     ↕
//! Protocol Layer              ← "[name] json" frames
//!     ↕
//! Transport Layer             ← latest-value cell + frame stream + send_text
//! ```

mod client;
mod error;
mod messages;

pub use client::{ResponseStream, ResponseWatcher, SessionClient};
pub use error::SessionError;
pub use messages::{
    names, CreateGame, DetectiveMove, DetectiveTicket, GameId, JoinGame, MisterXMove,
    MisterXTicket, Role, SessionRequest, SessionResponse,
};
