//! Scenario tests for the game state machine, driven through `apply` with
//! a seeded shuffler so whole games are reproducible.

use std::collections::BTreeSet;

use cardroom_engine::{
    apply, EngineError, GameConfig, GameEvent, GameState, Phase,
    SeededShuffler,
};
use cardroom_protocol::{ActorId, Card, PileId};

// =========================================================================
// Helpers
// =========================================================================

fn actor(id: u64) -> ActorId {
    ActorId(id)
}

fn shuffler() -> SeededShuffler {
    SeededShuffler::new(42)
}

/// A lobby with `names` seated in order, actor ids 1..=n.
fn lobby(config: GameConfig, names: &[&str]) -> GameState {
    let mut state = GameState::new(config);
    for (i, name) in names.iter().enumerate() {
        state = apply(
            &state,
            &GameEvent::Join {
                actor: actor(i as u64 + 1),
                name: (*name).to_string(),
            },
            &shuffler(),
        )
        .expect("join should be accepted");
    }
    state
}

/// A started two-player game.
fn started(config: GameConfig) -> GameState {
    let state = lobby(config, &["Alice", "Bob"]);
    apply(&state, &GameEvent::Start { actor: actor(1) }, &shuffler())
        .expect("start should be accepted")
}

fn active_actor(state: &GameState) -> ActorId {
    state.players[state.active_player].id
}

fn first_card(state: &GameState) -> Card {
    state.players[state.active_player].hand[0]
}

/// Plays the active player's first card onto pile A.
fn play_one(state: &GameState) -> GameState {
    apply(
        state,
        &GameEvent::Play {
            actor: active_actor(state),
            card: first_card(state),
            pile: PileId::A,
        },
        &shuffler(),
    )
    .expect("play should be accepted")
}

/// Asserts the card partition: draw pile, hands, and piles together are
/// exactly `1..=deck_size`, pairwise disjoint.
fn assert_partition(state: &GameState) {
    let mut seen = BTreeSet::new();
    let mut total = 0usize;

    let mut take = |cards: &[Card]| {
        for c in cards {
            assert!(seen.insert(*c), "card {c} appears twice");
        }
        total += cards.len();
    };

    take(&state.draw_pile);
    for player in &state.players {
        take(&player.hand);
    }
    for pile in state.piles.values() {
        take(pile);
    }

    assert_eq!(total, state.config.deck_size as usize);
    assert_eq!(seen.first(), Some(&1));
    assert_eq!(seen.last(), Some(&state.config.deck_size));
}

fn assert_hand_limits(state: &GameState) {
    for player in &state.players {
        assert!(
            player.hand.len() <= state.config.max_hand_size,
            "{} holds {} cards",
            player.name,
            player.hand.len()
        );
    }
}

// =========================================================================
// Lobby admission
// =========================================================================

#[test]
fn test_two_joins_reach_lobby_ready() {
    let state = lobby(GameConfig::default(), &["Alice", "Bob"]);
    assert_eq!(state.phase, Phase::LobbyReady);
    assert_eq!(state.players.len(), 2);
}

#[test]
fn test_single_join_stays_forming() {
    let state = lobby(GameConfig::default(), &["Alice"]);
    assert_eq!(state.phase, Phase::LobbyForming);
}

#[test]
fn test_join_at_capacity_rejected_with_room_full() {
    let config = GameConfig {
        max_players: 3,
        ..GameConfig::default()
    };
    let state = lobby(config, &["Alice", "Bob", "Cara"]);
    assert_eq!(state.phase, Phase::LobbyFull);

    let before = state.clone();
    let result = apply(
        &state,
        &GameEvent::Join {
            actor: actor(4),
            name: "Dave".into(),
        },
        &shuffler(),
    );

    assert_eq!(result.unwrap_err(), EngineError::RoomFull);
    assert_eq!(state, before, "rejection must not move the state");
}

#[test]
fn test_duplicate_name_rejected() {
    let state = lobby(GameConfig::default(), &["Alice"]);
    let result = apply(
        &state,
        &GameEvent::Join {
            actor: actor(9),
            name: "Alice".into(),
        },
        &shuffler(),
    );
    assert_eq!(
        result.unwrap_err(),
        EngineError::NameAlreadyTaken("Alice".into())
    );
}

#[test]
fn test_join_after_start_rejected() {
    let state = started(GameConfig::default());
    let result = apply(
        &state,
        &GameEvent::Join {
            actor: actor(9),
            name: "Cara".into(),
        },
        &shuffler(),
    );
    assert!(matches!(
        result.unwrap_err(),
        EngineError::IllegalPhaseForEvent(_)
    ));
}

// =========================================================================
// Starting and the bootstrap draw
// =========================================================================

#[test]
fn test_start_deals_everyone_and_lands_in_play_required() {
    let state = started(GameConfig::default());

    assert_eq!(state.phase, Phase::PlayRequired);
    assert!(state.started);
    assert_eq!(state.cards_played_this_turn, 0);
    for player in &state.players {
        assert_eq!(player.hand.len(), 6);
        assert!(player.drawn_initial_hand);
    }
    assert_eq!(state.draw_pile.len(), 99 - 12);
    // The bootstrap wraps the pointer back to the first seat.
    assert_eq!(state.active_player, 0);
    assert_partition(&state);
    assert_hand_limits(&state);
}

#[test]
fn test_start_before_ready_rejected() {
    let state = lobby(GameConfig::default(), &["Alice"]);
    let result =
        apply(&state, &GameEvent::Start { actor: actor(1) }, &shuffler());
    assert_eq!(
        result.unwrap_err(),
        EngineError::IllegalPhaseForEvent(Phase::LobbyForming)
    );
}

#[test]
fn test_start_by_unseated_actor_rejected() {
    let state = lobby(GameConfig::default(), &["Alice", "Bob"]);
    let result =
        apply(&state, &GameEvent::Start { actor: actor(77) }, &shuffler());
    assert_eq!(result.unwrap_err(), EngineError::NotActivePlayer);
}

#[test]
fn test_start_from_lobby_full_is_legal() {
    let config = GameConfig {
        max_players: 2,
        ..GameConfig::default()
    };
    let state = lobby(config, &["Alice", "Bob"]);
    assert_eq!(state.phase, Phase::LobbyFull);

    let state =
        apply(&state, &GameEvent::Start { actor: actor(2) }, &shuffler())
            .unwrap();
    assert_eq!(state.phase, Phase::PlayRequired);
}

#[test]
fn test_short_deck_deals_first_seats_first() {
    // Deck of 8 between two players: the first seat draws a full hand,
    // the second gets the remainder.
    let config = GameConfig {
        deck_size: 8,
        ..GameConfig::default()
    };
    let state = started(config);

    assert_eq!(state.players[0].hand.len(), 6);
    assert_eq!(state.players[1].hand.len(), 2);
    assert!(state.draw_pile.is_empty());
    assert_partition(&state);
}

// =========================================================================
// Playing cards
// =========================================================================

#[test]
fn test_play_minimum_is_two_while_deck_holds_cards() {
    let state = started(GameConfig::default());

    let state = play_one(&state);
    assert_eq!(state.phase, Phase::PlayRequired);
    assert_eq!(state.cards_played_this_turn, 1);

    let state = play_one(&state);
    assert_eq!(state.phase, Phase::PlayOptional);
    assert_eq!(state.cards_played_this_turn, 2);
}

#[test]
fn test_play_by_non_active_player_rejected_and_state_unmoved() {
    let state = started(GameConfig::default());
    let before = state.clone();

    let bystander = state.players[1].id;
    let card = state.players[1].hand[0];
    let result = apply(
        &state,
        &GameEvent::Play {
            actor: bystander,
            card,
            pile: PileId::B,
        },
        &shuffler(),
    );

    assert_eq!(result.unwrap_err(), EngineError::NotActivePlayer);
    assert_eq!(state, before);
}

#[test]
fn test_play_card_not_in_hand_rejected() {
    let state = started(GameConfig::default());
    // Some card the active player does not hold.
    let foreign = state.players[1].hand[0];
    let result = apply(
        &state,
        &GameEvent::Play {
            actor: active_actor(&state),
            card: foreign,
            pile: PileId::C,
        },
        &shuffler(),
    );
    assert_eq!(result.unwrap_err(), EngineError::InvalidCardOrPile);
}

#[test]
fn test_played_cards_append_to_the_named_pile() {
    let state = started(GameConfig::default());
    let card = first_card(&state);
    let state = apply(
        &state,
        &GameEvent::Play {
            actor: active_actor(&state),
            card,
            pile: PileId::D,
        },
        &shuffler(),
    )
    .unwrap();

    assert_eq!(state.piles[&PileId::D], vec![card]);
    assert_partition(&state);
}

// =========================================================================
// Turn handover
// =========================================================================

#[test]
fn test_end_turn_refills_draws_and_resets_counter() {
    let state = started(GameConfig::default());
    let first = active_actor(&state);

    let state = play_one(&state);
    let state = play_one(&state);
    assert_eq!(state.phase, Phase::PlayOptional);

    let deck_before = state.draw_pile.len();
    let state =
        apply(&state, &GameEvent::EndTurn { actor: first }, &shuffler())
            .unwrap();

    assert_eq!(state.phase, Phase::PlayRequired);
    assert_eq!(state.cards_played_this_turn, 0);
    assert_ne!(active_actor(&state), first);
    // The departing player drew back up to the limit.
    assert_eq!(state.players[0].hand.len(), 6);
    assert_eq!(state.draw_pile.len(), deck_before - 2);
    assert_partition(&state);
    assert_hand_limits(&state);
}

#[test]
fn test_end_turn_before_minimum_rejected() {
    let state = started(GameConfig::default());
    let state = play_one(&state);
    assert_eq!(state.phase, Phase::PlayRequired);

    let result = apply(
        &state,
        &GameEvent::EndTurn {
            actor: active_actor(&state),
        },
        &shuffler(),
    );
    assert_eq!(
        result.unwrap_err(),
        EngineError::IllegalPhaseForEvent(Phase::PlayRequired)
    );
}

// =========================================================================
// Endgame
// =========================================================================

#[test]
fn test_draining_deck_and_hands_wins() {
    // Two cards total: the first seat draws both, the second draws none.
    let config = GameConfig {
        deck_size: 2,
        ..GameConfig::default()
    };
    let state = started(config);
    assert!(state.draw_pile.is_empty());
    assert_eq!(state.players[0].hand.len(), 2);

    // Deck is empty, so the minimum is one card.
    let state = play_one(&state);
    assert_eq!(state.phase, Phase::PlayOptional);

    // The last card in the room: win, not merely optional.
    let state = play_one(&state);
    assert_eq!(state.phase, Phase::FinishedWon);
    assert_partition(&state);
}

#[test]
fn test_no_win_while_any_hand_holds_cards() {
    let config = GameConfig {
        deck_size: 8,
        ..GameConfig::default()
    };
    let state = started(config);
    // Seat 0 holds 6, seat 1 holds 2, deck empty. Play seat 0 out.
    let mut state = state;
    for _ in 0..6 {
        state = play_one(&state);
        assert_ne!(state.phase, Phase::FinishedWon);
    }
    assert_eq!(state.phase, Phase::PlayOptional);
}

#[test]
fn test_terminal_phase_accepts_no_events() {
    let config = GameConfig {
        deck_size: 2,
        ..GameConfig::default()
    };
    let state = started(config);
    let state = play_one(&state);
    let state = play_one(&state);
    assert_eq!(state.phase, Phase::FinishedWon);

    let result = apply(
        &state,
        &GameEvent::EndTurn {
            actor: actor(1),
        },
        &shuffler(),
    );
    assert_eq!(
        result.unwrap_err(),
        EngineError::IllegalPhaseForEvent(Phase::FinishedWon)
    );
}

// =========================================================================
// Whole-game invariant sweep
// =========================================================================

/// Drives a full game to the win, checking the partition, hand limits,
/// and the turn-counter law after every accepted event.
#[test]
fn test_full_game_preserves_invariants_to_the_win() {
    let config = GameConfig {
        deck_size: 20,
        ..GameConfig::default()
    };
    let mut state = started(config);
    let mut steps = 0;

    while !state.phase.is_terminal() {
        let counter_before = state.cards_played_this_turn;
        let hand_len = state.players[state.active_player].hand.len();

        state = if state.phase == Phase::PlayOptional && hand_len == 0 {
            let next =
                apply(&state, &GameEvent::EndTurn { actor: active_actor(&state) }, &shuffler())
                    .unwrap();
            assert_eq!(next.cards_played_this_turn, 0);
            next
        } else {
            let next = play_one(&state);
            if !next.phase.is_terminal() {
                assert_eq!(
                    next.cards_played_this_turn,
                    counter_before + 1
                );
            }
            next
        };

        assert_partition(&state);
        assert_hand_limits(&state);

        steps += 1;
        assert!(steps < 200, "game failed to terminate");
    }

    assert_eq!(state.phase, Phase::FinishedWon);
    assert!(state.draw_pile.is_empty());
    assert!(state.players.iter().all(|p| p.hand.is_empty()));
}
