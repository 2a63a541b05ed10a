//! Rule-violation errors returned by the engine.

use cardroom_protocol::ErrorKind;

use crate::Phase;

/// Why an event was rejected.
///
/// These are game-rule violations, not failures: the state the event was
/// applied to is returned to the caller untouched, and only the requesting
/// actor learns of the rejection. The engine never panics over one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A seated player already uses this name.
    #[error("the name {0:?} is already taken")]
    NameAlreadyTaken(String),

    /// The room is at its admission cap.
    #[error("the room is full")]
    RoomFull,

    /// The actor is not seated, or it is not their turn.
    #[error("it is not this player's turn")]
    NotActivePlayer,

    /// The event is not legal in the current phase.
    #[error("event is not legal in phase {0}")]
    IllegalPhaseForEvent(Phase),

    /// The named card is not in the actor's hand.
    #[error("no such card in hand")]
    InvalidCardOrPile,
}

impl EngineError {
    /// The wire-level error kind this maps onto.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NameAlreadyTaken(_) => ErrorKind::NameAlreadyTaken,
            Self::RoomFull => ErrorKind::RoomFull,
            Self::NotActivePlayer => ErrorKind::NotActivePlayer,
            Self::IllegalPhaseForEvent(_) => ErrorKind::IllegalPhaseForEvent,
            Self::InvalidCardOrPile => ErrorKind::InvalidCardOrPile,
        }
    }
}
