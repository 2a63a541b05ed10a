//! # cardroom
//!
//! A server-authoritative engine for a cooperative, turn-based card game.
//! Small groups meet in rooms addressed by four-letter codes; the server
//! owns all game truth and streams each player a filtered view of it over
//! a WebSocket.
//!
//! The interesting parts live below this crate: `cardroom-engine` holds
//! the pure state machine and view projection, `cardroom-registry` runs
//! one actor task per room. This crate is the outer shell — the accept
//! loop, the per-connection handler, and the process bootstrap.

mod error;
mod handler;
mod server;

pub use error::CardroomError;
pub use server::{CardroomServer, CardroomServerBuilder};

pub mod prelude {
    //! One-stop imports for embedding or testing the server.
    pub use crate::{CardroomError, CardroomServer, CardroomServerBuilder};
    pub use cardroom_engine::{
        DeckShuffler, GameConfig, SeededShuffler, ThreadRngShuffler,
    };
    pub use cardroom_protocol::{
        ActorId, Card, ClientRequest, ErrorKind, PileId, PlayerAction,
        PlayerView, RoomCode, ServerMessage,
    };
}
