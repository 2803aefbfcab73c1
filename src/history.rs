//! Rebuilding [`Player`] records from the recorded round results of a tournament.
//!
//! Nothing here is cached: the model is rebuilt from the full history for every pairing request,
//! so replaying the same history always yields the same players.

use std::collections::HashMap;

use crate::{
    error::PairingError,
    player::{Player, PlayerId, Score},
};

/// How a recorded game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    /// The first-seat player won.
    Player1Win,
    /// The second-seat player won.
    Player2Win,
    /// Both players drew.
    Draw,
}

impl MatchOutcome {
    /// Numeric code used by the round store (`1`, `2` or `3`).
    pub fn code(self) -> i32 {
        match self {
            MatchOutcome::Player1Win => 1,
            MatchOutcome::Player2Win => 2,
            MatchOutcome::Draw => 3,
        }
    }

    /// Points earned by `(player 1, player 2)`.
    pub fn points(self) -> (Score, Score) {
        match self {
            MatchOutcome::Player1Win => (Score::WIN, Score::ZERO),
            MatchOutcome::Player2Win => (Score::ZERO, Score::WIN),
            MatchOutcome::Draw => (Score::DRAW, Score::DRAW),
        }
    }
}

impl TryFrom<i32> for MatchOutcome {
    type Error = anyhow::Error;

    fn try_from(code: i32) -> anyhow::Result<Self> {
        match code {
            1 => Ok(MatchOutcome::Player1Win),
            2 => Ok(MatchOutcome::Player2Win),
            3 => Ok(MatchOutcome::Draw),
            other => anyhow::bail!("unknown match outcome code {other}"),
        }
    }
}

/// One game recorded for the tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    /// First-seat player.
    pub player_1: PlayerId,
    /// Second-seat player.
    pub player_2: PlayerId,
    /// `None` while the game has been paired but not reported yet.
    pub outcome: Option<MatchOutcome>,
}

impl RoundResult {
    /// A finished game.
    pub fn new(player_1: PlayerId, player_2: PlayerId, outcome: MatchOutcome) -> Self {
        Self {
            player_1,
            player_2,
            outcome: Some(outcome),
        }
    }

    /// A game that was paired but has no result yet.
    pub fn pending(player_1: PlayerId, player_2: PlayerId) -> Self {
        Self {
            player_1,
            player_2,
            outcome: None,
        }
    }
}

/// Builds one [`Player`] per enrolled id, in enrolled order.
///
/// Every result adds each side to the other's opponents, whether or not it has an outcome.
/// Scores come only from reported outcomes.
///
/// # Errors
/// - [`PairingError::DuplicatePlayer`] if an id is enrolled twice
/// - [`PairingError::SelfPairedResult`] if a result names the same player on both sides
/// - [`PairingError::UnknownPlayerInResult`] if a result names a player who is not enrolled
/// - [`PairingError::InvalidScore`] if a score no longer fits
pub fn rebuild_players(
    enrolled: &[PlayerId],
    results: &[RoundResult],
) -> Result<Vec<Player>, PairingError> {
    let mut index = HashMap::with_capacity(enrolled.len());
    let mut players = Vec::with_capacity(enrolled.len());
    for &id in enrolled {
        if index.insert(id, players.len()).is_some() {
            return Err(PairingError::DuplicatePlayer(id));
        }
        players.push(Player::new(id));
    }

    for result in results {
        if result.player_1 == result.player_2 {
            return Err(PairingError::SelfPairedResult(result.player_1));
        }
        let lookup = |id: PlayerId| {
            index
                .get(&id)
                .copied()
                .ok_or(PairingError::UnknownPlayerInResult(id))
        };
        let first = lookup(result.player_1)?;
        let second = lookup(result.player_2)?;

        players[first].record_opponent(result.player_2);
        players[second].record_opponent(result.player_1);

        if let Some(outcome) = result.outcome {
            let (points_1, points_2) = outcome.points();
            players[first].score = players[first].score.checked_add(points_1)?;
            players[second].score = players[second].score.checked_add(points_2)?;
        }
    }

    Ok(players)
}

#[cfg(test)]
mod history_tests {
    use super::*;

    #[test]
    fn fresh_players_have_nothing() {
        let players = rebuild_players(&[4, 2, 9], &[]).unwrap();
        assert_eq!(
            players.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![4, 2, 9]
        );
        assert!(players
            .iter()
            .all(|p| p.score == Score::ZERO && p.opponents.is_empty()));
    }

    #[test]
    fn scores_follow_outcomes() {
        let results = [
            RoundResult::new(1, 2, MatchOutcome::Player1Win),
            RoundResult::new(3, 4, MatchOutcome::Draw),
            RoundResult::new(1, 3, MatchOutcome::Player2Win),
            RoundResult::new(2, 4, MatchOutcome::Draw),
        ];
        let players = rebuild_players(&[1, 2, 3, 4], &results).unwrap();
        let scores: Vec<String> = players.iter().map(|p| p.score.to_string()).collect();
        assert_eq!(scores, vec!["1", "0.5", "1.5", "1"]);
        assert!(players[0].has_faced(2) && players[0].has_faced(3));
        assert!(players[3].has_faced(3) && players[3].has_faced(2));
    }

    #[test]
    fn second_player_draw_is_credited_to_the_second_player() {
        let players =
            rebuild_players(&[1, 2, 3], &[RoundResult::new(3, 1, MatchOutcome::Draw)]).unwrap();
        assert_eq!(players[0].score, Score::DRAW);
        assert_eq!(players[1].score, Score::ZERO);
        assert_eq!(players[2].score, Score::DRAW);
    }

    #[test]
    fn pending_results_count_as_faced() {
        let players = rebuild_players(&[1, 2], &[RoundResult::pending(2, 1)]).unwrap();
        assert!(players[0].has_faced(2));
        assert!(players[1].has_faced(1));
        assert_eq!(players[0].score, Score::ZERO);
    }

    #[test]
    fn replay_is_idempotent() {
        let results = [
            RoundResult::new(1, 2, MatchOutcome::Draw),
            RoundResult::new(3, 4, MatchOutcome::Player2Win),
        ];
        assert_eq!(
            rebuild_players(&[1, 2, 3, 4], &results),
            rebuild_players(&[1, 2, 3, 4], &results)
        );
    }

    #[test]
    fn rejects_malformed_history() {
        assert_eq!(
            rebuild_players(&[1, 2, 1], &[]),
            Err(PairingError::DuplicatePlayer(1))
        );
        assert_eq!(
            rebuild_players(&[1, 2], &[RoundResult::pending(2, 2)]),
            Err(PairingError::SelfPairedResult(2))
        );
        assert_eq!(
            rebuild_players(&[1, 2], &[RoundResult::new(1, 5, MatchOutcome::Draw)]),
            Err(PairingError::UnknownPlayerInResult(5))
        );
    }

    #[test]
    fn outcome_codes() {
        assert_eq!(MatchOutcome::try_from(3).unwrap(), MatchOutcome::Draw);
        assert_eq!(MatchOutcome::Player2Win.code(), 2);
        assert!(MatchOutcome::try_from(0).is_err());
    }
}
