//! The cardroom game engine: a pure state machine over [`GameState`].
//!
//! Nothing here performs I/O or holds locks. One function,
//! [`apply`], takes the current state and an event and returns either a
//! brand-new state or an error — the input is never mutated, so a rejected
//! event leaves the room exactly as it was. After an event's direct effect,
//! [`apply`] runs a settle pass that resolves every automatic transition
//! (bootstrap draws, win detection, the required/optional play gate) before
//! the new state is handed back.
//!
//! # Key types
//!
//! - [`GameState`] / [`Phase`] / [`Player`] — the data model
//! - [`GameEvent`] — what players can do
//! - [`apply`] — the transition function
//! - [`project`] — the per-player, information-hiding view
//! - [`DeckShuffler`] — randomness seam, swappable for deterministic tests

mod engine;
mod error;
mod event;
mod shuffle;
mod state;
mod view;

pub use engine::apply;
pub use error::EngineError;
pub use event::GameEvent;
pub use shuffle::{DeckShuffler, SeededShuffler, ThreadRngShuffler};
pub use state::{GameConfig, GameState, Phase, Player};
pub use view::project;
