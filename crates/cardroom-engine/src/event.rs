//! Player-triggered events.

use cardroom_protocol::{ActorId, Card, PileId};

/// Everything a player can do to a game.
///
/// Each event names the actor asking; the engine decides whether that
/// actor may do the thing right now. Automatic transitions (bootstrap
/// draws, win detection) are not events — they run inside the settle pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Take a seat under `name`.
    Join { actor: ActorId, name: String },
    /// Shuffle the deck and begin play.
    Start { actor: ActorId },
    /// Move `card` from the actor's hand onto `pile`.
    Play {
        actor: ActorId,
        card: Card,
        pile: PileId,
    },
    /// Finish the turn after the play minimum is met.
    EndTurn { actor: ActorId },
}

impl GameEvent {
    /// The actor this event was requested by.
    pub fn actor(&self) -> ActorId {
        match self {
            Self::Join { actor, .. }
            | Self::Start { actor }
            | Self::Play { actor, .. }
            | Self::EndTurn { actor } => *actor,
        }
    }
}
