//! In-memory model of a tournament participant.

use std::{collections::HashSet, fmt, ops::Add};

use crate::error::PairingError;

/// Identity of a player, stable across the rounds of a tournament.
pub type PlayerId = i64;

/// Accumulated points, stored as a count of half points.
///
/// A win is worth one point, a draw half a point and a loss nothing, so every reachable score is
/// a multiple of `0.5`. Counting halves keeps the sum exact for the whole tournament.
///
/// `+` saturates at the maximum; use [`Score::checked_add`] to detect overflow.
#[derive(PartialEq, Eq, PartialOrd, Ord, Default, Debug, Clone, Copy, Hash)]
pub struct Score {
    halves: u32,
}

impl Score {
    /// No points.
    pub const ZERO: Score = Score { halves: 0 };
    /// Points awarded to each player for a draw.
    pub const DRAW: Score = Score { halves: 1 };
    /// Points awarded for a win.
    pub const WIN: Score = Score { halves: 2 };

    /// Creates a score from a number of half points.
    pub const fn from_halves(halves: u32) -> Self {
        Self { halves }
    }

    /// Converts a decimal point value such as `2.5` into a score.
    ///
    /// # Errors
    /// Returns [`PairingError::InvalidScore`] if `points` is negative, not finite, too large or
    /// not a multiple of `0.5`.
    pub fn from_points(points: f64) -> Result<Self, PairingError> {
        if !points.is_finite() || points < 0.0 {
            return Err(PairingError::InvalidScore(format!(
                "{points} is not a non-negative number"
            )));
        }
        let halves = points * 2.0;
        if halves.fract() != 0.0 {
            return Err(PairingError::InvalidScore(format!(
                "{points} is not a multiple of half a point"
            )));
        }
        if halves > f64::from(u32::MAX) {
            return Err(PairingError::InvalidScore(format!("{points} is too large")));
        }
        Ok(Self {
            halves: halves as u32,
        })
    }

    /// The score as a number of half points.
    pub fn halves(self) -> u32 {
        self.halves
    }

    /// The score in points, e.g. `1.5`.
    pub fn points(self) -> f64 {
        f64::from(self.halves) / 2.0
    }

    /// Adds two scores.
    ///
    /// # Errors
    /// Returns [`PairingError::InvalidScore`] if the sum does not fit.
    pub fn checked_add(self, rhs: Score) -> Result<Score, PairingError> {
        self.halves
            .checked_add(rhs.halves)
            .map(Score::from_halves)
            .ok_or_else(|| PairingError::InvalidScore(format!("{self} + {rhs} overflows")))
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score {
            halves: self.halves.saturating_add(rhs.halves),
        }
    }
}

impl std::ops::AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        self.halves = self.halves.saturating_add(rhs.halves);
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.halves / 2)?;
        if self.halves % 2 == 1 {
            write!(f, ".5")?;
        }
        Ok(())
    }
}

/// A participant as seen by the pairing engine.
///
/// Rebuilt from the round history before every pairing request, see
/// [`rebuild_players`](crate::history::rebuild_players).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Unique id within the tournament.
    pub id: PlayerId,
    /// Points accumulated so far.
    pub score: Score,
    /// Ids of every player already faced. Never contains `id` itself.
    pub opponents: HashSet<PlayerId>,
}

impl Player {
    /// A player who has not played yet.
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            score: Score::ZERO,
            opponents: HashSet::new(),
        }
    }

    /// Sets the score.
    pub fn with_score(mut self, score: Score) -> Self {
        self.score = score;
        self
    }

    /// Records every id in `opponents` as already faced.
    pub fn with_opponents(mut self, opponents: impl IntoIterator<Item = PlayerId>) -> Self {
        for opponent in opponents {
            self.record_opponent(opponent);
        }
        self
    }

    /// Marks `opponent` as already faced. A player never faces themselves, so their own id is
    /// ignored.
    pub fn record_opponent(&mut self, opponent: PlayerId) {
        if opponent != self.id {
            self.opponents.insert(opponent);
        }
    }

    /// True if this player already met `other`.
    pub fn has_faced(&self, other: PlayerId) -> bool {
        self.opponents.contains(&other)
    }

    /// Number of distinct opponents met so far.
    pub fn rounds_played(&self) -> usize {
        self.opponents.len()
    }
}

#[cfg(test)]
mod player_tests {
    use super::*;

    #[test]
    fn score_is_exact() {
        let mut score = Score::ZERO;
        for _ in 0..1000 {
            score += Score::DRAW;
        }
        assert_eq!(score, Score::from_halves(1000));
        assert_eq!(score.points(), 500.0);
    }

    #[test]
    fn score_from_points() {
        assert_eq!(Score::from_points(2.5), Ok(Score::from_halves(5)));
        assert_eq!(Score::from_points(0.0), Ok(Score::ZERO));
        assert!(Score::from_points(-1.0).is_err());
        assert!(Score::from_points(0.25).is_err());
        assert!(Score::from_points(f64::NAN).is_err());
    }

    #[test]
    fn score_addition_never_wraps() {
        let max = Score::from_halves(u32::MAX);
        assert_eq!(max + Score::WIN, max);
        let mut score = max;
        score += Score::DRAW;
        assert_eq!(score, max);
        assert!(matches!(
            max.checked_add(Score::DRAW),
            Err(PairingError::InvalidScore(_))
        ));
        assert_eq!(Score::DRAW.checked_add(Score::DRAW), Ok(Score::WIN));
    }

    #[test]
    fn score_display() {
        assert_eq!(Score::from_halves(3).to_string(), "1.5");
        assert_eq!(Score::WIN.to_string(), "1");
        assert_eq!(Score::DRAW.to_string(), "0.5");
        assert_eq!((Score::WIN + Score::WIN).to_string(), "2");
    }

    #[test]
    fn own_id_is_never_an_opponent() {
        let player = Player::new(7).with_opponents([3, 7, 3, 4]);
        assert_eq!(player.rounds_played(), 2);
        assert!(player.has_faced(3));
        assert!(!player.has_faced(7));
    }
}
