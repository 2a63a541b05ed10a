//! The JSON message surface between clients and the server.

use serde::{Deserialize, Serialize};

use crate::{Card, PileId, PlayerView, RoomCode};

/// Everything a client can ask of the server.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON, e.g.
/// `{ "type": "Play", "card": 14, "pile": "B" }` — the friendliest shape
/// for a JavaScript client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientRequest {
    /// Create a new room and take the first seat.
    Host { name: String },
    /// Take a seat in an existing room.
    Join { code: RoomCode, name: String },
    /// Start the game in the actor's room.
    Start,
    /// Play a card from the actor's hand onto a pile.
    Play { card: Card, pile: PileId },
    /// Finish the actor's turn.
    EndTurn,
}

/// Everything the server says back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// The room was created; the code is what other players type in.
    Hosted { code: RoomCode },
    /// The join was accepted.
    Joined { code: RoomCode },
    /// An updated projection of the actor's room. Pushed whenever this
    /// actor's view changes, including changes caused by other players.
    View { view: PlayerView },
    /// A request was rejected. Sent only to the requesting actor; nobody
    /// else's view moves.
    Error { kind: ErrorKind, message: String },
}

/// The closed set of rejection reasons a client can receive.
///
/// All of these are per-actor and recoverable — none end the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    RoomNotFound,
    NameAlreadyTaken,
    RoomFull,
    NotActivePlayer,
    IllegalPhaseForEvent,
    InvalidCardOrPile,
}
