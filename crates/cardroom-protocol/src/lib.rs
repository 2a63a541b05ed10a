//! Shared types for cardroom's client/server boundary.
//!
//! This crate defines the "language" the rest of the workspace speaks:
//!
//! - **Identity** ([`ActorId`], [`RoomCode`]) — who is asking, and which
//!   room they mean.
//! - **Game vocabulary** ([`Card`], [`PileId`], [`PlayerAction`],
//!   [`PlayerView`]) — the filtered snapshot each player is allowed to see.
//! - **Messages** ([`ClientRequest`], [`ServerMessage`], [`ErrorKind`]) —
//!   the JSON surface the transport carries.
//!
//! It sits below every other crate and knows nothing about connections,
//! rooms, or game rules — only shapes.

mod messages;
mod types;

pub use messages::{ClientRequest, ErrorKind, ServerMessage};
pub use types::{ActorId, Card, PileId, PlayerAction, PlayerView, RoomCode};
