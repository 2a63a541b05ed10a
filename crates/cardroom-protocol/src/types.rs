//! Identity and game vocabulary types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Opaque identifier for one connected actor.
///
/// Minted by the connection layer, one per connection; the core never
/// interprets it beyond equality. `#[serde(transparent)]` keeps it a plain
/// number on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A-{}", self.0)
    }
}

/// A short, human-typeable code identifying a live room.
///
/// Codes are drawn from a restricted alphabet (see the registry crate);
/// this type only carries the value around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Game vocabulary
// ---------------------------------------------------------------------------

/// A card value. The deck is the full range `1..=99`, no duplicates.
pub type Card = u8;

/// Label of one of the four shared piles.
///
/// Unit variants serialize as `"A"`..`"D"`, which also makes them valid
/// JSON map keys in [`PlayerView::piles`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PileId {
    A,
    B,
    C,
    D,
}

impl PileId {
    /// All piles, in label order.
    pub const ALL: [PileId; 4] = [PileId::A, PileId::B, PileId::C, PileId::D];
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileId::A => write!(f, "A"),
            PileId::B => write!(f, "B"),
            PileId::C => write!(f, "C"),
            PileId::D => write!(f, "D"),
        }
    }
}

/// An action a player is currently allowed to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    PlayCard,
    EndTurn,
}

// ---------------------------------------------------------------------------
// PlayerView
// ---------------------------------------------------------------------------

/// The per-player, information-hiding projection of a room's game state.
///
/// Contains the requesting player's own hand and nothing of anyone
/// else's: other players appear in `players` by name only. `actions` is
/// non-empty only for the active player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Seated players, by name, in seating order.
    pub players: Vec<String>,
    /// The requesting player's hand.
    pub hand: Vec<Card>,
    /// Shared pile contents, oldest card first.
    pub piles: BTreeMap<PileId, Vec<Card>>,
    /// Whether the game has started.
    pub started: bool,
    /// Actions currently legal for this player.
    pub actions: Vec<PlayerAction>,
}

// =========================================================================
// Tests
// =========================================================================
