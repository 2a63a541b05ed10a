//! Room lifecycle for cardroom.
//!
//! Each room runs as an isolated Tokio task (actor model) owning that
//! room's [`GameState`](cardroom_engine::GameState) and its view
//! subscribers. Commands arrive over an mpsc channel, so events for one
//! room apply strictly in arrival order while different rooms proceed in
//! parallel.
//!
//! # Key types
//!
//! - [`RoomRegistry`] — allocates codes, spawns rooms, routes events
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`ViewSender`] — per-player channel views are pushed through
//! - [`RegistryError`] — what can go wrong at this layer

mod codes;
mod error;
mod registry;
mod room;

pub use codes::{is_valid_code, CODE_ALPHABET, CODE_LENGTH};
pub use error::RegistryError;
pub use registry::RoomRegistry;
pub use room::{RoomHandle, ViewSender};
