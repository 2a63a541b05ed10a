//! `CardroomServer` builder and accept loop.

use std::sync::Arc;

use cardroom_engine::{DeckShuffler, GameConfig, ThreadRngShuffler};
use cardroom_registry::RoomRegistry;
use tokio::net::TcpListener;

use crate::handler::handle_connection;
use crate::CardroomError;

/// Shared server state passed to each connection handler task.
pub(crate) struct ServerState {
    pub(crate) registry: RoomRegistry,
}

/// Builder for configuring and starting a cardroom server.
///
/// # Example
///
/// ```rust,ignore
/// let server = CardroomServer::builder()
///     .bind("0.0.0.0:8080")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct CardroomServerBuilder {
    bind_addr: String,
    game_config: GameConfig,
    shuffler: Arc<dyn DeckShuffler>,
}

impl CardroomServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            game_config: GameConfig::default(),
            shuffler: Arc::new(ThreadRngShuffler),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the game parameters every room is created with.
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = config;
        self
    }

    /// Replaces the deck shuffler. Tests inject a seeded one to make
    /// whole games reproducible end to end.
    pub fn shuffler(mut self, shuffler: Arc<dyn DeckShuffler>) -> Self {
        self.shuffler = shuffler;
        self
    }

    /// Binds the listener and builds the server.
    pub async fn build(self) -> Result<CardroomServer, CardroomError> {
        let listener = TcpListener::bind(&self.bind_addr).await?;
        tracing::info!(addr = %self.bind_addr, "cardroom listening");

        let state = Arc::new(ServerState {
            registry: RoomRegistry::new(self.shuffler, self.game_config),
        });

        Ok(CardroomServer { listener, state })
    }
}

impl Default for CardroomServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running cardroom server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct CardroomServer {
    listener: TcpListener,
    state: Arc<ServerState>,
}

impl CardroomServer {
    /// Creates a new builder.
    pub fn builder() -> CardroomServerBuilder {
        CardroomServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop: each connection gets its own handler task.
    /// Runs until the process is terminated.
    pub async fn run(self) -> Result<(), CardroomError> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    tracing::debug!(%addr, "accepted connection");
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_connection(stream, state).await
                        {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
