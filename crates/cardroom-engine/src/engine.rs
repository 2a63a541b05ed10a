//! The transition function and its settle pass.

use crate::{DeckShuffler, EngineError, GameConfig, GameEvent, GameState, Phase};

/// Applies one event to a state, returning the successor state.
///
/// On `Err` the input state is exactly what it was — rejection never
/// mutates. On `Ok` the returned state has already settled: every
/// automatic transition that follows the event (bootstrap draws, win
/// detection, the required/optional gate) has run, so the phase is stable
/// and observable.
///
/// `shuffler` is consulted only by [`GameEvent::Start`].
pub fn apply(
    state: &GameState,
    event: &GameEvent,
    shuffler: &dyn DeckShuffler,
) -> Result<GameState, EngineError> {
    let mut next = state.clone();

    match event {
        GameEvent::Join { actor, name } => {
            if state.phase == Phase::LobbyFull {
                return Err(EngineError::RoomFull);
            }
            if !state.phase.is_joinable() {
                return Err(EngineError::IllegalPhaseForEvent(state.phase));
            }
            if state.players.iter().any(|p| p.name == *name) {
                return Err(EngineError::NameAlreadyTaken(name.clone()));
            }
            if state.players.len() >= state.config.max_players {
                return Err(EngineError::RoomFull);
            }

            next.add_player(*actor, name.clone());
            next.phase = lobby_phase(next.players.len(), &next.config);
        }

        GameEvent::Start { actor } => {
            if !matches!(state.phase, Phase::LobbyReady | Phase::LobbyFull) {
                return Err(EngineError::IllegalPhaseForEvent(state.phase));
            }
            if !state.is_seated(*actor) {
                return Err(EngineError::NotActivePlayer);
            }

            next.draw_pile = shuffler.shuffled_deck(next.config.deck_size);
            next.started = true;
            next.phase = Phase::TurnStart;
        }

        GameEvent::Play { actor, card, pile } => {
            if !state.phase.is_playing() {
                return Err(EngineError::IllegalPhaseForEvent(state.phase));
            }
            if !state.is_active(*actor) {
                return Err(EngineError::NotActivePlayer);
            }
            // The pile label is validated by construction (closed enum);
            // only the card can be wrong here.
            let hand = &mut next.players[next.active_player].hand;
            let Some(pos) = hand.iter().position(|c| c == card) else {
                return Err(EngineError::InvalidCardOrPile);
            };
            let played = hand.remove(pos);
            next.piles.entry(*pile).or_default().push(played);
            next.cards_played_this_turn += 1;
        }

        GameEvent::EndTurn { actor } => {
            if state.phase != Phase::PlayOptional {
                return Err(EngineError::IllegalPhaseForEvent(state.phase));
            }
            if !state.is_active(*actor) {
                return Err(EngineError::NotActivePlayer);
            }

            next.phase = Phase::TurnStart;
        }
    }

    settle(&mut next);
    Ok(next)
}

/// The lobby phase implied by the seat count. Guard order matters:
/// full before ready before forming.
fn lobby_phase(seated: usize, config: &GameConfig) -> Phase {
    if seated >= config.max_players {
        Phase::LobbyFull
    } else if seated >= config.min_players {
        Phase::LobbyReady
    } else {
        Phase::LobbyForming
    }
}

/// Runs automatic transitions until the phase is stable.
///
/// Two situations re-evaluate here:
///
/// - `TurnStart` draws the active player to the hand limit and advances
///   the pointer, looping until every player has an initial hand. During
///   the very first round this bootstraps all hands in one pass; on later
///   entries a single step refills the departing player and moves on.
/// - After a play, the guards run in contractual priority order: the win
///   check strictly before the required/optional gate.
fn settle(state: &mut GameState) {
    loop {
        match state.phase {
            Phase::TurnStart => {
                turn_start_step(state);
                if state.players.iter().all(|p| p.drawn_initial_hand) {
                    state.phase = Phase::PlayRequired;
                    state.cards_played_this_turn = 0;
                }
            }

            Phase::PlayRequired | Phase::PlayOptional => {
                let all_empty = state.draw_pile.is_empty()
                    && state.players.iter().all(|p| p.hand.is_empty());
                if all_empty {
                    state.phase = Phase::FinishedWon;
                    continue;
                }

                let required: u32 =
                    if state.draw_pile.is_empty() { 1 } else { 2 };
                let gated = if state.cards_played_this_turn >= required {
                    Phase::PlayOptional
                } else {
                    Phase::PlayRequired
                };
                if gated == state.phase {
                    break;
                }
                state.phase = gated;
            }

            _ => break,
        }
    }
}

/// One draw-and-advance step: refill the active player's hand from the
/// front of the deck, mark their initial draw done, move the pointer.
fn turn_start_step(state: &mut GameState) {
    let limit = state.config.max_hand_size;
    let player = &mut state.players[state.active_player];

    let needed = limit.saturating_sub(player.hand.len());
    let take = needed.min(state.draw_pile.len());
    player.hand.extend(state.draw_pile.drain(..take));
    player.drawn_initial_hand = true;

    state.active_player = (state.active_player + 1) % state.players.len();
}
