//! The game data model: configuration, phase machine, players, state.

use std::collections::BTreeMap;
use std::fmt;

use cardroom_protocol::{ActorId, Card, PileId};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GameConfig
// ---------------------------------------------------------------------------

/// Tunable parameters for one game instance.
///
/// Defaults match the house rules: 2–10 players, 6-card hands, a 99-card
/// deck. Tests shrink `deck_size` to reach endgames quickly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Minimum seated players before the game may start.
    pub min_players: usize,
    /// Admission cap; further joins are rejected, not queued.
    pub max_players: usize,
    /// Hand limit each draw step refills toward.
    pub max_hand_size: usize,
    /// The deck is the full range `1..=deck_size`.
    pub deck_size: Card,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 10,
            max_hand_size: 6,
            deck_size: 99,
        }
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The discrete state of a room's game machine.
///
/// ```text
/// LobbyForming ⇄ LobbyReady → LobbyFull
///        │            │           │
///        │         (start)     (start)
///        │            ▼           ▼
///        │         TurnStart ◄────────────┐
///        │            │ (auto, repeats)   │
///        │            ▼                   │
///        │       PlayRequired ⇄ PlayOptional
///        │            │        (end turn) ┘
///        │            ▼
///        │       FinishedWon   FinishedLost
/// ```
///
/// `TurnStart` is internal: the settle pass always exits it before a state
/// is returned, so callers only ever observe it mid-transition, never at
/// rest. `FinishedLost` is part of the phase vocabulary but no rule
/// currently reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Not enough players to start.
    LobbyForming,
    /// Enough players to start; more may still join.
    LobbyReady,
    /// At the admission cap; joins are rejected.
    LobbyFull,
    /// Internal draw-and-advance step; always auto-exits.
    TurnStart,
    /// The active player has not yet met the play minimum.
    PlayRequired,
    /// The minimum is met; the active player may play again or end the turn.
    PlayOptional,
    /// Terminal: deck and every hand emptied.
    FinishedWon,
    /// Terminal: reserved, currently unreachable.
    FinishedLost,
}

impl Phase {
    /// Returns `true` while new players may be admitted.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::LobbyForming | Self::LobbyReady)
    }

    /// Returns `true` when a play event can be legal.
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::PlayRequired | Self::PlayOptional)
    }

    /// Returns `true` once no further events are accepted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FinishedWon | Self::FinishedLost)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LobbyForming => "LobbyForming",
            Self::LobbyReady => "LobbyReady",
            Self::LobbyFull => "LobbyFull",
            Self::TurnStart => "TurnStart",
            Self::PlayRequired => "PlayRequired",
            Self::PlayOptional => "PlayOptional",
            Self::FinishedWon => "FinishedWon",
            Self::FinishedLost => "FinishedLost",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One seated player. Owned by the containing [`GameState`]; created on
/// admission and never removed mid-game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// The opaque connection identity this seat belongs to.
    pub id: ActorId,
    /// Display name, unique within the room.
    pub name: String,
    /// Cards currently held, in draw order.
    pub hand: Vec<Card>,
    /// Set once the bootstrap draw has filled this hand. Drives the
    /// first-round draw loop.
    pub drawn_initial_hand: bool,
}

impl Player {
    fn new(id: ActorId, name: String) -> Self {
        Self {
            id,
            name,
            hand: Vec::new(),
            drawn_initial_hand: false,
        }
    }
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// The aggregate root: everything true about one room's game.
///
/// Exactly one `GameState` is live per room. Transitions replace it
/// wholesale — [`apply`](crate::apply) clones, mutates the clone, and
/// returns it — so a reader never observes a half-applied event.
///
/// Card partition invariant: `draw_pile` ∪ every hand ∪ every pile is the
/// full range `1..=deck_size` with no duplicates, at all times once the
/// game has started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current machine phase.
    pub phase: Phase,
    /// Seated players in admission order.
    pub players: Vec<Player>,
    /// Index of the player whose turn it is. Valid once started.
    pub active_player: usize,
    /// Face-down deck; draws come off the front.
    pub draw_pile: Vec<Card>,
    /// The four shared piles, each an append-only play history.
    pub piles: BTreeMap<PileId, Vec<Card>>,
    /// Accepted plays since the current turn began.
    pub cards_played_this_turn: u32,
    /// Latched once `Start` is accepted.
    pub started: bool,
    /// Parameters this game was created with.
    pub config: GameConfig,
}

impl GameState {
    /// A fresh lobby with empty piles and no players.
    pub fn new(config: GameConfig) -> Self {
        let piles = PileId::ALL.iter().map(|p| (*p, Vec::new())).collect();
        Self {
            phase: Phase::LobbyForming,
            players: Vec::new(),
            active_player: 0,
            draw_pile: Vec::new(),
            piles,
            cards_played_this_turn: 0,
            started: false,
            config,
        }
    }

    /// The seat belonging to `actor`, if any.
    pub fn player(&self, actor: ActorId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == actor)
    }

    /// Returns `true` if `actor` holds a seat in this game.
    pub fn is_seated(&self, actor: ActorId) -> bool {
        self.player(actor).is_some()
    }

    /// Returns `true` if `actor` is the player whose turn it is.
    /// Always `false` before the game starts.
    pub fn is_active(&self, actor: ActorId) -> bool {
        self.started
            && self
                .players
                .get(self.active_player)
                .is_some_and(|p| p.id == actor)
    }

    pub(crate) fn add_player(&mut self, id: ActorId, name: String) {
        self.players.push(Player::new(id, name));
    }
}
