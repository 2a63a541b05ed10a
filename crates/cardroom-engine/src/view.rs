//! Per-player view projection.

use cardroom_protocol::{ActorId, PlayerAction, PlayerView};

use crate::{GameState, Phase};

/// Projects the state a single player is allowed to see.
///
/// Returns `None` if `actor` is not seated. The projection carries the
/// actor's own hand and everyone else's name only — no other hand content
/// crosses this boundary, which is what keeps the game playable over an
/// untrusted client. `actions` lists what the actor may legally do right
/// now; it is empty for everyone but the active player.
pub fn project(state: &GameState, actor: ActorId) -> Option<PlayerView> {
    let player = state.player(actor)?;

    let mut actions = Vec::new();
    if state.phase.is_playing() && state.is_active(actor) {
        actions.push(PlayerAction::PlayCard);
        if state.phase == Phase::PlayOptional {
            actions.push(PlayerAction::EndTurn);
        }
    }

    Some(PlayerView {
        players: state.players.iter().map(|p| p.name.clone()).collect(),
        hand: player.hand.clone(),
        piles: state.piles.clone(),
        started: state.started,
        actions,
    })
}

#[cfg(test)]
mod tests {
    use cardroom_protocol::ActorId;

    use super::*;
    use crate::GameConfig;

    fn lobby_with(names: &[&str]) -> GameState {
        let mut state = GameState::new(GameConfig::default());
        for (i, name) in names.iter().enumerate() {
            state.add_player(ActorId(i as u64 + 1), (*name).to_string());
        }
        state
    }

    #[test]
    fn test_project_unseated_actor_is_absent() {
        let state = lobby_with(&["Alice"]);
        assert!(project(&state, ActorId(99)).is_none());
    }

    #[test]
    fn test_project_roster_is_names_only() {
        let state = lobby_with(&["Alice", "Bob"]);
        let view = project(&state, ActorId(1)).unwrap();
        assert_eq!(view.players, ["Alice", "Bob"]);
        assert!(!view.started);
    }

    #[test]
    fn test_project_hides_other_hands() {
        let mut state = lobby_with(&["Alice", "Bob"]);
        state.players[1].hand = vec![10, 20, 30];

        let view = project(&state, ActorId(1)).unwrap();
        // Alice's view holds only her own (empty) hand; Bob's cards are
        // represented nowhere in it.
        assert!(view.hand.is_empty());
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("20"));
    }

    #[test]
    fn test_project_actions_empty_for_inactive_player() {
        let mut state = lobby_with(&["Alice", "Bob"]);
        state.started = true;
        state.phase = Phase::PlayRequired;
        state.active_player = 0;

        let view = project(&state, ActorId(2)).unwrap();
        assert!(view.actions.is_empty());
    }

    #[test]
    fn test_project_actions_follow_phase() {
        let mut state = lobby_with(&["Alice", "Bob"]);
        state.started = true;
        state.active_player = 0;

        state.phase = Phase::PlayRequired;
        let view = project(&state, ActorId(1)).unwrap();
        assert_eq!(view.actions, [PlayerAction::PlayCard]);

        state.phase = Phase::PlayOptional;
        let view = project(&state, ActorId(1)).unwrap();
        assert_eq!(
            view.actions,
            [PlayerAction::PlayCard, PlayerAction::EndTurn]
        );
    }
}
