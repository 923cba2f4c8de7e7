//! # Yard
//!
//! Client library for the Yard board game.
//!
//! - [`GameClient`] opens the game socket and runs the session handshake
//!   (create / join / start a game) on top of `yard-session`.
//! - [`map`] re-exports the interactive board: viewport, renderer and
//!   input handling.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yard::prelude::*;
//!
//! # async fn run() -> Result<(), YardError> {
//! yard::init_tracing();
//!
//! let config = ClientConfig::default();
//! let mut client = GameClient::connect(&config).await?;
//! let game = client.create_game(4).await?;
//! client.join_game(game)?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;

pub use client::GameClient;
pub use config::ClientConfig;
pub use error::YardError;

pub use yard_map as map;
pub use yard_protocol as protocol;
pub use yard_session as session;
pub use yard_transport as transport;

/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG`
/// (default `info`).
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Common imports for client code.
pub mod prelude {
    pub use crate::{ClientConfig, GameClient, YardError};
    pub use yard_map::{
        CanvasSize, Canvas, CommandRecorder, InputEvent, MapConfig, MapData, MapView,
        PointerButton, StationId, TransitMode, ViewportState,
    };
    pub use yard_protocol::ProtocolMessage;
    pub use yard_session::{GameId, Role, SessionRequest, SessionResponse};
}
