//! `GameClient`: a session over a WebSocket with request helpers.
//!
//! ```text
//! GameClient::connect(config)
//!     └─ WebSocketTransport::connect(config.ws_url())
//!          └─ SessionClient ── send_request ──▶ socket
//!                           ◀── ResponseStream::recv ──
//! ```
//!
//! Responses are read from the transport's ordered frame stream, so a
//! burst such as `gameStarted`, `startMove`, `gameState` is seen frame by
//! frame. The server does not tag responses with request ids: a request
//! helper takes the next response that arrives, and frames the server
//! pushes afterwards stay queued for [`GameClient::next_response`]. Use
//! one `GameClient` per task and keep one request in flight.

use std::time::Duration;

use yard_session::{
    CreateGame, GameId, JoinGame, ResponseStream, Role, SessionClient, SessionRequest,
    SessionResponse,
};
use yard_transport::{TextTransport, WebSocketTransport};

use crate::{ClientConfig, YardError};

/// High-level client for one game session.
pub struct GameClient<T: TextTransport = WebSocketTransport> {
    session: SessionClient<T>,
    responses: ResponseStream,
    timeout: Duration,
}

impl GameClient<WebSocketTransport> {
    /// Opens the game socket derived from `config`.
    pub async fn connect(config: &ClientConfig) -> Result<Self, YardError> {
        let url = config.ws_url();
        let transport = WebSocketTransport::connect(&url).await?;
        tracing::debug!(%url, conn = %transport.id(), "session opened");
        Ok(Self::with_transport(transport, config.request_timeout()))
    }

    /// Closes the socket. Pending sends are flushed first.
    pub fn close(&self) -> Result<(), YardError> {
        self.session.transport().close()?;
        Ok(())
    }
}

impl<T: TextTransport> GameClient<T> {
    /// Wraps an already-open transport.
    ///
    /// Frames received before this call are not seen.
    pub fn with_transport(transport: T, timeout: Duration) -> Self {
        let session = SessionClient::new(transport);
        let responses = session.stream();
        Self {
            session,
            responses,
            timeout,
        }
    }

    /// Sends `request` without waiting for anything back.
    pub fn send(&self, request: &SessionRequest) -> Result<(), YardError> {
        self.session.send_request(request)?;
        Ok(())
    }

    /// Waits for the next response, whatever caused it. Responses are
    /// returned in the order the server sent them.
    ///
    /// `error` frames are returned as `Ok(SessionResponse::Error { .. })`.
    ///
    /// # Errors
    /// [`YardError::Timeout`] if nothing arrives in time, or the session
    /// error for a closed socket or an undecodable frame.
    pub async fn next_response(&mut self) -> Result<SessionResponse, YardError> {
        match tokio::time::timeout(self.timeout, self.responses.recv()).await {
            Ok(response) => Ok(response?),
            Err(_) => Err(YardError::Timeout(self.timeout)),
        }
    }

    /// Sends `request` and waits for the next response.
    ///
    /// An `error` frame is turned into [`YardError::Rejected`].
    pub async fn request(&mut self, request: &SessionRequest) -> Result<SessionResponse, YardError> {
        self.send(request)?;
        match self.next_response().await? {
            SessionResponse::Error { message } => {
                tracing::warn!(request = request.name(), %message, "request rejected");
                Err(YardError::Rejected(message))
            }
            response => Ok(response),
        }
    }

    /// Creates a game for `number_of_detectives` detectives and returns
    /// its id.
    pub async fn create_game(&mut self, number_of_detectives: usize) -> Result<GameId, YardError> {
        let request = SessionRequest::CreateGame(CreateGame {
            number_of_detectives,
        });
        match self.request(&request).await? {
            SessionResponse::Game { id } => {
                tracing::info!(game = %id, "game created");
                Ok(id)
            }
            other => Err(YardError::UnexpectedResponse(other.name().to_string())),
        }
    }

    /// Joins the game `id`.
    ///
    /// The server only answers a join when it fails, so this returns as
    /// soon as the frame is queued. A rejection shows up as the next
    /// response.
    pub fn join_game(&self, id: GameId) -> Result<(), YardError> {
        self.send(&SessionRequest::JoinGame(JoinGame { id }))
    }

    /// Starts the joined game and returns the role this player was dealt.
    pub async fn start_game(&mut self) -> Result<Role, YardError> {
        match self.request(&SessionRequest::StartGame).await? {
            SessionResponse::GameStarted { role } => {
                tracing::info!(?role, "game started");
                Ok(role)
            }
            other => Err(YardError::UnexpectedResponse(other.name().to_string())),
        }
    }

    /// Returns the underlying session client.
    pub fn session(&self) -> &SessionClient<T> {
        &self.session
    }
}
