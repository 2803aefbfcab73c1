//! Backtracking search that splits an even list of players into head-to-head pairs, none of
//! which is a rematch.
//!
//! The search only looks for a *feasible* pairing, not a good one:
//! - the first remaining player is always the anchor, anchors are never permuted
//! - candidates for the anchor are tried in list order
//! - the first candidate whose remainder can be completed wins
//!
//! Given the same ordering and the same histories, the result is therefore always the same.
//! Score-aware seeding belongs to whoever orders the list, not here.
//!
//! Worst case is exponential in the number of players. A step budget can bound the work, see
//! [`pair_players`].

use std::collections::HashSet;

use crate::{
    error::PairingError,
    player::{Player, PlayerId},
};

/// One board of a round. `first` was listed before `second` in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pairing {
    /// First-seat player.
    pub first: PlayerId,
    /// Second-seat player.
    pub second: PlayerId,
}

impl Pairing {
    /// Pairs `first` against `second`.
    pub fn new(first: PlayerId, second: PlayerId) -> Self {
        Self { first, second }
    }

    /// True if `player` sits at this board.
    pub fn involves(&self, player: PlayerId) -> bool {
        self.first == player || self.second == player
    }
}

impl From<(PlayerId, PlayerId)> for Pairing {
    fn from((first, second): (PlayerId, PlayerId)) -> Self {
        Self::new(first, second)
    }
}

/// Snapshot of the players still to pair at one depth of the search.
struct Frame<'a> {
    remaining: Vec<&'a Player>,
    /// Index in `remaining` of the next candidate to try against `remaining[0]`.
    next_candidate: usize,
}

impl<'a> Frame<'a> {
    fn new(remaining: Vec<&'a Player>) -> Self {
        Self {
            remaining,
            next_candidate: 1,
        }
    }
}

fn can_meet(a: &Player, b: &Player) -> bool {
    !a.has_faced(b.id) && !b.has_faced(a.id)
}

/// Outcome of a successful search, with the work it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Pairs in anchor order.
    pub pairs: Vec<Pairing>,
    /// Tentative pairings tried, including abandoned ones.
    pub steps: u64,
    /// Number of times a tentative pairing was undone.
    pub backtracks: u64,
}

/// How a search run stopped.
pub(crate) enum SearchEnd {
    Paired(Vec<Pairing>),
    Exhausted,
    OutOfBudget,
}

pub(crate) struct SearchRun {
    pub(crate) end: SearchEnd,
    pub(crate) steps: u64,
    pub(crate) backtracks: u64,
}

/// Pairs every player in `players` exactly once, avoiding rematches.
///
/// Lists with fewer than two players pair trivially to nothing. With an odd count the last
/// player left over after everyone else is paired stays unpaired, so callers should remove a bye
/// first (see [`crate::bye`]).
///
/// `max_steps` bounds the number of tentative pairings; `None` searches exhaustively.
///
/// # Errors
/// - [`PairingError::InfeasiblePairing`] when every branch fails
/// - [`PairingError::SearchBudgetExceeded`] when `max_steps` runs out first
pub fn pair_players(
    players: &[Player],
    max_steps: Option<u64>,
) -> Result<SearchOutcome, PairingError> {
    let run = run_search(players, max_steps);
    match run.end {
        SearchEnd::Paired(pairs) => Ok(SearchOutcome {
            pairs,
            steps: run.steps,
            backtracks: run.backtracks,
        }),
        SearchEnd::Exhausted => Err(PairingError::InfeasiblePairing {
            players: players.len(),
        }),
        SearchEnd::OutOfBudget => Err(PairingError::SearchBudgetExceeded { steps: run.steps }),
    }
}

pub(crate) fn run_search(players: &[Player], max_steps: Option<u64>) -> SearchRun {
    let mut stack = vec![Frame::new(players.iter().collect())];
    let mut pairs: Vec<Pairing> = Vec::with_capacity(players.len() / 2);
    let mut steps = 0;
    let mut backtracks = 0;

    let end = loop {
        let Some(frame) = stack.last_mut() else {
            break SearchEnd::Exhausted;
        };
        if frame.remaining.len() < 2 {
            break SearchEnd::Paired(pairs);
        }

        let anchor = frame.remaining[0];
        let candidate = (frame.next_candidate..frame.remaining.len())
            .find(|&i| can_meet(anchor, frame.remaining[i]));

        match candidate {
            Some(i) => {
                if max_steps.is_some_and(|max| steps >= max) {
                    break SearchEnd::OutOfBudget;
                }
                steps += 1;
                frame.next_candidate = i + 1;
                pairs.push(Pairing::new(anchor.id, frame.remaining[i].id));

                // everyone but the anchor and its candidate, order preserved
                let rest = frame
                    .remaining
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != 0 && j != i)
                    .map(|(_, player)| *player)
                    .collect();
                stack.push(Frame::new(rest));
            }
            None => {
                // no candidate left at this depth: undo the choice that led here
                stack.pop();
                if pairs.pop().is_some() {
                    backtracks += 1;
                }
            }
        }
    };

    SearchRun {
        end,
        steps,
        backtracks,
    }
}

/// True if `pairs` covers every player of `players` exactly once without a rematch.
pub fn is_valid_pairing(players: &[Player], pairs: &[Pairing]) -> bool {
    if pairs.len() * 2 != players.len() {
        return false;
    }
    let mut seen = HashSet::with_capacity(players.len());
    for pair in pairs {
        if pair.first == pair.second || !seen.insert(pair.first) || !seen.insert(pair.second) {
            return false;
        }
    }
    players.iter().all(|p| seen.contains(&p.id))
        && pairs.iter().all(|pair| {
            let first = players.iter().find(|p| p.id == pair.first);
            let second = players.iter().find(|p| p.id == pair.second);
            matches!((first, second), (Some(a), Some(b)) if can_meet(a, b))
        })
}
