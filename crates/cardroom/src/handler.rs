//! Per-connection handler: request routing and view delivery.
//!
//! Each accepted socket gets its own task running this handler. The flow:
//!   1. Upgrade to WebSocket, mint an opaque `ActorId` for the connection.
//!   2. Loop over two sources: requests arriving on the socket, and
//!      projected views arriving from whichever room this actor occupies.
//!   3. Rule rejections answer only this socket; the room and everyone
//!      else's views are untouched by them.

use std::sync::Arc;

use cardroom_engine::GameEvent;
use cardroom_protocol::{
    ActorId, ClientRequest, ErrorKind, PlayerView, RoomCode, ServerMessage,
};
use cardroom_registry::{RegistryError, ViewSender};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use crate::server::ServerState;
use crate::CardroomError;

type WsSink = SplitSink<WebSocketStream<TcpStream>, Message>;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    state: Arc<ServerState>,
) -> Result<(), CardroomError> {
    let ws = tokio_tungstenite::accept_async(stream).await?;
    let (mut ws_tx, mut ws_rx) = ws.split();

    let actor = state.registry.mint_actor();
    tracing::debug!(%actor, "connection established");

    // One view channel per connection; the room holds the sender once
    // this actor is seated somewhere.
    let (view_tx, mut view_rx) = mpsc::unbounded_channel::<PlayerView>();
    let mut room: Option<RoomCode> = None;

    loop {
        tokio::select! {
            incoming = ws_rx.next() => {
                let msg = match incoming {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        tracing::debug!(%actor, error = %e, "recv error");
                        break;
                    }
                    None => break,
                };

                let data = match msg {
                    m @ (Message::Text(_) | Message::Binary(_)) => {
                        m.into_data()
                    }
                    Message::Close(_) => break,
                    _ => continue, // ping/pong/frame
                };

                let request: ClientRequest =
                    match serde_json::from_slice(&data) {
                        Ok(req) => req,
                        Err(e) => {
                            tracing::debug!(
                                %actor, error = %e,
                                "undecodable request, ignoring"
                            );
                            continue;
                        }
                    };

                handle_request(
                    request, actor, &mut room, &view_tx, &state, &mut ws_tx,
                )
                .await?;
            }

            Some(view) = view_rx.recv() => {
                send(&mut ws_tx, &ServerMessage::View { view }).await?;
            }
        }
    }

    tracing::debug!(%actor, "connection closed");
    Ok(())
}

/// Routes one decoded request. Game-rule rejections are answered on the
/// wire; hard failures propagate and end the connection.
async fn handle_request(
    request: ClientRequest,
    actor: ActorId,
    room: &mut Option<RoomCode>,
    view_tx: &ViewSender,
    state: &Arc<ServerState>,
    ws_tx: &mut WsSink,
) -> Result<(), CardroomError> {
    match request {
        ClientRequest::Host { name } => {
            if room.is_some() {
                return send_error(
                    ws_tx,
                    ErrorKind::IllegalPhaseForEvent,
                    "connection already occupies a room",
                )
                .await;
            }
            match state
                .registry
                .create(&name, actor, view_tx.clone())
                .await
            {
                Ok(code) => {
                    *room = Some(code.clone());
                    send(ws_tx, &ServerMessage::Hosted { code }).await?;
                }
                Err(e) => answer_rejection(ws_tx, e).await?,
            }
        }

        ClientRequest::Join { code, name } => {
            if room.is_some() {
                return send_error(
                    ws_tx,
                    ErrorKind::IllegalPhaseForEvent,
                    "connection already occupies a room",
                )
                .await;
            }
            match state
                .registry
                .join(&code, &name, actor, view_tx.clone())
                .await
            {
                Ok(()) => {
                    *room = Some(code.clone());
                    send(ws_tx, &ServerMessage::Joined { code }).await?;
                }
                Err(e) => answer_rejection(ws_tx, e).await?,
            }
        }

        ClientRequest::Start => {
            dispatch(ws_tx, state, room, GameEvent::Start { actor }).await?;
        }

        ClientRequest::Play { card, pile } => {
            dispatch(
                ws_tx,
                state,
                room,
                GameEvent::Play { actor, card, pile },
            )
            .await?;
        }

        ClientRequest::EndTurn => {
            dispatch(ws_tx, state, room, GameEvent::EndTurn { actor })
                .await?;
        }
    }

    Ok(())
}

/// Forwards a game event to the connection's room. Success is silent —
/// the resulting view push is the acknowledgement.
async fn dispatch(
    ws_tx: &mut WsSink,
    state: &Arc<ServerState>,
    room: &Option<RoomCode>,
    event: GameEvent,
) -> Result<(), CardroomError> {
    let Some(code) = room else {
        return send_error(
            ws_tx,
            ErrorKind::RoomNotFound,
            "connection has not joined a room",
        )
        .await;
    };

    match state.registry.dispatch(code, event).await {
        Ok(()) => Ok(()),
        Err(e) => answer_rejection(ws_tx, e).await,
    }
}

/// Answers a registry error on the wire when it has a client-facing
/// kind, and escalates it otherwise.
async fn answer_rejection(
    ws_tx: &mut WsSink,
    err: RegistryError,
) -> Result<(), CardroomError> {
    match err.kind() {
        Some(kind) => send_error(ws_tx, kind, &err.to_string()).await,
        None => Err(err.into()),
    }
}

async fn send_error(
    ws_tx: &mut WsSink,
    kind: ErrorKind,
    message: &str,
) -> Result<(), CardroomError> {
    send(
        ws_tx,
        &ServerMessage::Error {
            kind,
            message: message.to_string(),
        },
    )
    .await
}

async fn send(
    ws_tx: &mut WsSink,
    msg: &ServerMessage,
) -> Result<(), CardroomError> {
    let text = serde_json::to_string(msg)?;
    ws_tx.send(Message::Text(text.into())).await?;
    Ok(())
}
