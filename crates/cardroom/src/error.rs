//! Unified error type for the server crate.

use cardroom_registry::RegistryError;

/// Top-level error wrapping every layer a connection can fail in.
///
/// The `#[from]` attributes generate the `From` impls, so `?` converts
/// lower-layer errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum CardroomError {
    /// Socket-level I/O (bind, accept).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// WebSocket protocol failure on a connection.
    #[error(transparent)]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Outbound message serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A room-layer hard failure (not a game-rule rejection — those are
    /// answered on the wire, not raised).
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
