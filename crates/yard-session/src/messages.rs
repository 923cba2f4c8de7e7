//! Typed session messages layered on [`ProtocolMessage`].
//!
//! Outbound frames are [`SessionRequest`]s, inbound frames are
//! [`SessionResponse`]s. Frame names are the camelCase variant names
//! (`CreateGame` → `[createGame]`), bodies are the variant payloads as
//! JSON.
//!
//! Only the envelope is modelled here. Move bodies are carried as data;
//! whether a move is legal is for the server to decide.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use yard_protocol::{ProtocolError, ProtocolMessage};

/// Frame names understood by the client.
pub mod names {
    pub const CREATE_GAME: &str = "createGame";
    pub const JOIN_GAME: &str = "joinGame";
    pub const START_GAME: &str = "startGame";
    pub const MOVE_MISTER_X: &str = "moveMisterX";
    pub const MOVE_DETECTIVE: &str = "moveDetective";
    pub const SUBMIT_MOVE: &str = "submitMove";

    pub const ERROR: &str = "error";
    pub const GAME: &str = "game";
    pub const GAME_STARTED: &str = "gameStarted";
    pub const START_MOVE: &str = "startMove";
    pub const END_MOVE: &str = "endMove";
    pub const GAME_ENDED: &str = "gameEnded";
}

// ---------------------------------------------------------------------------
// Identity and shared payload types
// ---------------------------------------------------------------------------

/// Identifier of a game lobby on the server. Serialized as a plain UUID
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub Uuid);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side a player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Detective,
    MisterX,
}

/// Ticket types Mister X can travel with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MisterXTicket {
    Taxi,
    Bus,
    Underground,
    Hidden,
}

/// Ticket types a detective can travel with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectiveTicket {
    Taxi,
    Bus,
    Underground,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGame {
    pub number_of_detectives: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinGame {
    pub id: GameId,
}

/// One step of a Mister X move. Two steps make a double move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisterXMove {
    pub station_id: u8,
    pub transport_type: MisterXTicket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectiveMove {
    pub color: String,
    pub station_id: u8,
    pub transport_type: DetectiveTicket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GameBody {
    id: GameId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RoleBody {
    role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct WinnerBody {
    winner: Role,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A frame the client sends to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRequest {
    CreateGame(CreateGame),
    JoinGame(JoinGame),
    StartGame,
    MoveMisterX(Vec<MisterXMove>),
    MoveDetective(DetectiveMove),
    SubmitMove,
}

impl SessionRequest {
    /// Returns the frame name for this request.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateGame(_) => names::CREATE_GAME,
            Self::JoinGame(_) => names::JOIN_GAME,
            Self::StartGame => names::START_GAME,
            Self::MoveMisterX(_) => names::MOVE_MISTER_X,
            Self::MoveDetective(_) => names::MOVE_DETECTIVE,
            Self::SubmitMove => names::SUBMIT_MOVE,
        }
    }

    /// Converts the request into a protocol message ready for encoding.
    ///
    /// # Errors
    /// [`ProtocolError::Encode`] if the payload cannot be serialized.
    pub fn to_message(&self) -> Result<ProtocolMessage, ProtocolError> {
        let name = self.name();
        match self {
            Self::CreateGame(body) => ProtocolMessage::with_body(name, body),
            Self::JoinGame(body) => ProtocolMessage::with_body(name, body),
            Self::MoveMisterX(body) => ProtocolMessage::with_body(name, body),
            Self::MoveDetective(body) => ProtocolMessage::with_body(name, body),
            Self::StartGame | Self::SubmitMove => Ok(ProtocolMessage::new(name)),
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// A frame the server sent to the client.
///
/// Names the client does not model end up in [`Unrecognized`](Self::Unrecognized)
/// with their raw body, so callers that know more than this crate can
/// still read them.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionResponse {
    /// The server rejected the last request.
    Error { message: String },
    /// A game was created or joined.
    Game { id: GameId },
    /// The game started; `role` is this client's side.
    GameStarted { role: Role },
    /// It is `role`'s turn to move.
    StartMove { role: Role },
    /// The current move is over.
    EndMove,
    /// The game is over.
    GameEnded { winner: Role },
    /// Any other frame, passed through as decoded.
    Unrecognized(ProtocolMessage),
}

impl SessionResponse {
    /// Classifies a decoded frame by name.
    ///
    /// # Errors
    /// [`ProtocolError::MissingBody`] or [`ProtocolError::Decode`] when a
    /// known name carries a missing or malformed body. Unknown names are
    /// never an error.
    pub fn from_message(message: ProtocolMessage) -> Result<Self, ProtocolError> {
        let response = match message.name.as_str() {
            names::ERROR => {
                let ErrorBody { message } = message.body_as()?;
                Self::Error { message }
            }
            names::GAME => {
                let GameBody { id } = message.body_as()?;
                Self::Game { id }
            }
            names::GAME_STARTED => {
                let RoleBody { role } = message.body_as()?;
                Self::GameStarted { role }
            }
            names::START_MOVE => {
                let RoleBody { role } = message.body_as()?;
                Self::StartMove { role }
            }
            names::END_MOVE => Self::EndMove,
            names::GAME_ENDED => {
                let WinnerBody { winner } = message.body_as()?;
                Self::GameEnded { winner }
            }
            _ => Self::Unrecognized(message),
        };
        Ok(response)
    }

    /// Converts the response back into a protocol message. Mostly useful
    /// for tests and in-process servers.
    pub fn to_message(&self) -> Result<ProtocolMessage, ProtocolError> {
        match self {
            Self::Error { message } => ProtocolMessage::with_body(
                names::ERROR,
                &ErrorBody {
                    message: message.clone(),
                },
            ),
            Self::Game { id } => ProtocolMessage::with_body(names::GAME, &GameBody { id: *id }),
            Self::GameStarted { role } => {
                ProtocolMessage::with_body(names::GAME_STARTED, &RoleBody { role: *role })
            }
            Self::StartMove { role } => {
                ProtocolMessage::with_body(names::START_MOVE, &RoleBody { role: *role })
            }
            Self::EndMove => Ok(ProtocolMessage::new(names::END_MOVE)),
            Self::GameEnded { winner } => {
                ProtocolMessage::with_body(names::GAME_ENDED, &WinnerBody { winner: *winner })
            }
            Self::Unrecognized(message) => Ok(message.clone()),
        }
    }

    /// Returns the frame name this response came from.
    pub fn name(&self) -> &str {
        match self {
            Self::Error { .. } => names::ERROR,
            Self::Game { .. } => names::GAME,
            Self::GameStarted { .. } => names::GAME_STARTED,
            Self::StartMove { .. } => names::START_MOVE,
            Self::EndMove => names::END_MOVE,
            Self::GameEnded { .. } => names::GAME_ENDED,
            Self::Unrecognized(message) => &message.name,
        }
    }
}
