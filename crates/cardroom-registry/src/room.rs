//! Room actor: an isolated Tokio task that owns one game.
//!
//! The actor is the only code that touches a room's `GameState`, which is
//! what serializes events: commands queue on the channel and apply one at
//! a time in arrival order. After every accepted event the actor
//! re-projects each subscriber's view and pushes the ones that changed.

use std::collections::HashMap;
use std::sync::Arc;

use cardroom_engine::{apply, project, DeckShuffler, GameEvent, GameState};
use cardroom_protocol::{ActorId, PlayerView, RoomCode};
use tokio::sync::{mpsc, oneshot};

use crate::RegistryError;

/// Channel a player's projected views are delivered through.
pub type ViewSender = mpsc::UnboundedSender<PlayerView>;

/// Commands sent to a room actor through its channel.
pub(crate) enum RoomCommand {
    /// Seat a new player: a join event plus their view subscription.
    Seat {
        event: GameEvent,
        subscriber: ViewSender,
        reply: oneshot::Sender<Result<(), RegistryError>>,
    },

    /// Apply a game event from an already-seated player.
    Dispatch {
        event: GameEvent,
        reply: oneshot::Sender<Result<(), RegistryError>>,
    },

    /// Request a copy of the current game state.
    Snapshot {
        reply: oneshot::Sender<GameState>,
    },

    /// Shut the room down.
    Shutdown,
}

/// Handle to a running room actor. Cheap to clone; the registry holds one
/// per live code.
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// The code this room answers to.
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub(crate) async fn seat(
        &self,
        event: GameEvent,
        subscriber: ViewSender,
    ) -> Result<(), RegistryError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Seat {
                event,
                subscriber,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RegistryError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RegistryError::Unavailable(self.code.clone()))?
    }

    /// Applies one event, waiting for the engine's verdict.
    pub async fn dispatch(
        &self,
        event: GameEvent,
    ) -> Result<(), RegistryError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Dispatch {
                event,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RegistryError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RegistryError::Unavailable(self.code.clone()))?
    }

    /// Returns a copy of the room's current state.
    pub async fn snapshot(&self) -> Result<GameState, RegistryError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RegistryError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RegistryError::Unavailable(self.code.clone()))
    }

    pub(crate) async fn shutdown(&self) -> Result<(), RegistryError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RegistryError::Unavailable(self.code.clone()))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    code: RoomCode,
    state: GameState,
    shuffler: Arc<dyn DeckShuffler>,
    subscribers: HashMap<ActorId, ViewSender>,
    /// Last view delivered per subscriber; unchanged views are not
    /// re-pushed.
    last_views: HashMap<ActorId, PlayerView>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    async fn run(mut self) {
        tracing::info!(room = %self.code, "room opened");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Seat {
                    event,
                    subscriber,
                    reply,
                } => {
                    let actor = event.actor();
                    let result = self.handle_event(event);
                    if result.is_ok() {
                        self.subscribers.insert(actor, subscriber);
                        self.push_views();
                        tracing::info!(
                            room = %self.code,
                            %actor,
                            players = self.state.players.len(),
                            "player seated"
                        );
                    }
                    let _ = reply.send(result);
                }
                RoomCommand::Dispatch { event, reply } => {
                    let result = self.handle_event(event);
                    if result.is_ok() {
                        self.push_views();
                    }
                    let _ = reply.send(result);
                }
                RoomCommand::Snapshot { reply } => {
                    let _ = reply.send(self.state.clone());
                }
                RoomCommand::Shutdown => {
                    tracing::info!(room = %self.code, "room shutting down");
                    break;
                }
            }

            // A finished room with nobody listening has no way back.
            if self.state.phase.is_terminal()
                && self.subscribers.values().all(|s| s.is_closed())
            {
                tracing::info!(room = %self.code, "room finished, reclaiming");
                break;
            }
        }

        tracing::info!(room = %self.code, "room closed");
    }

    /// Runs one event through the engine. The state advances only on
    /// `Ok`; a rejection leaves it untouched and is reported to the
    /// requesting actor alone.
    fn handle_event(
        &mut self,
        event: GameEvent,
    ) -> Result<(), RegistryError> {
        match apply(&self.state, &event, self.shuffler.as_ref()) {
            Ok(next) => {
                if next.phase != self.state.phase {
                    tracing::info!(
                        room = %self.code,
                        phase = %next.phase,
                        "phase changed"
                    );
                }
                self.state = next;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(
                    room = %self.code,
                    actor = %event.actor(),
                    error = %e,
                    "event rejected"
                );
                Err(RegistryError::Rejected(e))
            }
        }
    }

    /// Re-projects every subscriber's view and pushes the changed ones.
    /// Dropped receivers are skipped silently; membership never shrinks.
    fn push_views(&mut self) {
        for (actor, sender) in &self.subscribers {
            let Some(view) = project(&self.state, *actor) else {
                continue;
            };
            if self.last_views.get(actor) == Some(&view) {
                continue;
            }
            let _ = sender.send(view.clone());
            self.last_views.insert(*actor, view);
        }
    }
}

/// Spawns a new room actor task and returns a handle to it.
pub(crate) fn spawn_room(
    code: RoomCode,
    state: GameState,
    shuffler: Arc<dyn DeckShuffler>,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        code: code.clone(),
        state,
        shuffler,
        subscribers: HashMap::new(),
        last_views: HashMap::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle { code, sender: tx }
}
