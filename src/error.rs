//! Failures reported by the pairing engine.
//!
//! Two families exist. Infeasibility ([`PairingError::InfeasiblePairing`] and
//! [`PairingError::SearchBudgetExceeded`]) means the search ran and found nothing; retrying with
//! the same input reproduces the same failure. Everything else is invalid input, detected before
//! the search starts.

use thiserror::Error;

use crate::player::PlayerId;

/// Errors returned by reconstruction, validation and pairing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    /// No complete pairing without a rematch exists for these players.
    #[error("no valid pairing exists for {players} players without a rematch")]
    InfeasiblePairing {
        /// Number of players the search was asked to pair.
        players: usize,
    },

    /// The configured search budget ran out before a pairing was found.
    #[error("pairing search gave up after {steps} steps")]
    SearchBudgetExceeded {
        /// Tentative pairings tried before giving up.
        steps: u64,
    },

    /// The same id appears twice in the player list.
    #[error("player {0} is listed more than once")]
    DuplicatePlayer(PlayerId),

    /// A player lists itself among its opponents.
    #[error("player {0} lists itself as an opponent")]
    SelfOpponent(PlayerId),

    /// An opponent id is not part of the round's player list.
    #[error("player {player} has faced {opponent}, who is not enrolled")]
    UnknownOpponent {
        /// Player whose history is malformed.
        player: PlayerId,
        /// Opponent id with no matching player.
        opponent: PlayerId,
    },

    /// `player` lists `opponent`, but `opponent` does not list `player`.
    #[error("player {player} has faced {opponent}, but not the other way around")]
    AsymmetricHistory {
        /// Player listing the opponent.
        player: PlayerId,
        /// Opponent missing the reverse entry.
        opponent: PlayerId,
    },

    /// A round result names a player that is not enrolled.
    #[error("round result references player {0}, who is not enrolled")]
    UnknownPlayerInResult(PlayerId),

    /// A round result names the same player on both sides.
    #[error("round result pairs player {0} against themselves")]
    SelfPairedResult(PlayerId),

    /// A score that is negative, not finite, or not a multiple of a half point.
    #[error("invalid score: {0}")]
    InvalidScore(String),
}

impl PairingError {
    /// True for failures where the search ran and found no pairing.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            PairingError::InfeasiblePairing { .. } | PairingError::SearchBudgetExceeded { .. }
        )
    }

    /// True for failures caused by malformed input, raised before any search.
    pub fn is_invalid_input(&self) -> bool {
        !self.is_infeasible()
    }
}
