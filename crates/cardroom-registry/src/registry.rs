//! The registry: live codes → running rooms.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cardroom_engine::{DeckShuffler, GameConfig, GameEvent, GameState};
use cardroom_protocol::{ActorId, RoomCode};
use tokio::sync::Mutex;

use crate::codes::random_code;
use crate::room::spawn_room;
use crate::{RegistryError, RoomHandle, ViewSender};

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Owns the mapping from room code to live room.
///
/// Shared across connection handlers behind an `Arc`; all map access goes
/// through one lock, and code allocation happens inside that critical
/// section so two concurrent creations can never draw the same code.
/// Everything per-room is serialized by the room's own actor — the
/// registry only routes.
pub struct RoomRegistry {
    rooms: Mutex<HashMap<RoomCode, RoomHandle>>,
    shuffler: Arc<dyn DeckShuffler>,
    config: GameConfig,
    next_actor: AtomicU64,
}

impl RoomRegistry {
    /// Creates an empty registry. Every room it spawns uses `config` and
    /// draws decks from `shuffler`.
    pub fn new(shuffler: Arc<dyn DeckShuffler>, config: GameConfig) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            shuffler,
            config,
            next_actor: AtomicU64::new(1),
        }
    }

    /// Mints a fresh opaque actor identity. One per connection.
    pub fn mint_actor(&self) -> ActorId {
        ActorId(self.next_actor.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a room, seats the host, and returns the room's code.
    pub async fn create(
        &self,
        host_name: &str,
        actor: ActorId,
        subscriber: ViewSender,
    ) -> Result<RoomCode, RegistryError> {
        let handle = {
            let mut rooms = self.rooms.lock().await;
            let code = loop {
                let candidate = random_code();
                if !rooms.contains_key(&candidate) {
                    break candidate;
                }
            };
            let handle = spawn_room(
                code.clone(),
                GameState::new(self.config.clone()),
                Arc::clone(&self.shuffler),
                DEFAULT_CHANNEL_SIZE,
            );
            rooms.insert(code, handle.clone());
            handle
        };

        tracing::info!(room = %handle.code(), "room created");

        handle
            .seat(
                GameEvent::Join {
                    actor,
                    name: host_name.to_string(),
                },
                subscriber,
            )
            .await?;

        Ok(handle.code().clone())
    }

    /// Seats a player in an existing room.
    pub async fn join(
        &self,
        code: &RoomCode,
        name: &str,
        actor: ActorId,
        subscriber: ViewSender,
    ) -> Result<(), RegistryError> {
        let handle = self.get(code).await?;
        handle
            .seat(
                GameEvent::Join {
                    actor,
                    name: name.to_string(),
                },
                subscriber,
            )
            .await
    }

    /// Routes a game event to its room. Events for one room apply in
    /// arrival order; different rooms are independent.
    pub async fn dispatch(
        &self,
        code: &RoomCode,
        event: GameEvent,
    ) -> Result<(), RegistryError> {
        let handle = self.get(code).await?;
        handle.dispatch(event).await
    }

    /// Returns the handle for a live code.
    pub async fn get(
        &self,
        code: &RoomCode,
    ) -> Result<RoomHandle, RegistryError> {
        self.rooms
            .lock()
            .await
            .get(code)
            .cloned()
            .ok_or_else(|| RegistryError::RoomNotFound(code.clone()))
    }

    /// Shuts a room down and forgets its code.
    pub async fn destroy(
        &self,
        code: &RoomCode,
    ) -> Result<(), RegistryError> {
        let handle = self
            .rooms
            .lock()
            .await
            .remove(code)
            .ok_or_else(|| RegistryError::RoomNotFound(code.clone()))?;

        let _ = handle.shutdown().await;
        tracing::info!(room = %code, "room destroyed");
        Ok(())
    }

    /// Number of live rooms.
    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }
}
