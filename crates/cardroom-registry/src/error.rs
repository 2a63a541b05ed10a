//! Error types for the room layer.

use cardroom_engine::EngineError;
use cardroom_protocol::{ErrorKind, RoomCode};

/// Errors that can occur routing events to rooms.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No live room carries this code.
    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    /// The room exists but the engine rejected the event. Recoverable
    /// and private to the requesting actor.
    #[error(transparent)]
    Rejected(#[from] EngineError),

    /// The room's command channel is gone — the actor task ended while
    /// a caller still held its handle. This is an infrastructure
    /// failure, not a game rule.
    #[error("room {0} is unavailable")]
    Unavailable(RoomCode),
}

impl RegistryError {
    /// The wire-level kind for errors a client should see.
    /// `None` marks a hard failure the transport handles itself.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::RoomNotFound(_) => Some(ErrorKind::RoomNotFound),
            Self::Rejected(e) => Some(e.kind()),
            Self::Unavailable(_) => None,
        }
    }
}
