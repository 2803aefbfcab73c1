//! Orchestration of a single "start next round" request.
//!
//! This module defines the [`PairingEngine`] type. For each request it:
//!
//! - Rebuilds the players from the round history (when given raw history)
//! - Validates the player list
//! - Removes a bye player if the count is odd, following the configured [`ByePolicy`]
//! - Runs the pairing search on everyone else
//!
//! Nothing is persisted. On success the caller stores each returned pair as a new round with no
//! outcome, and records the bye if there is one. On failure nothing should be stored: the same
//! input always fails the same way, so retrying is pointless.
//!
//! The engine holds no shared state, so independent requests (e.g. for different tournaments)
//! can run concurrently. Serializing requests for the same tournament is up to the caller.

use tracing::{debug, info, instrument, trace, warn};

use crate::{
    bye::{assign_bye, bye_candidates, ByePolicy},
    configuration::Configuration,
    error::PairingError,
    history::{rebuild_players, RoundResult},
    logger::init_logger,
    player::{Player, PlayerId},
    search::{pair_players, run_search, Pairing, SearchEnd},
    validate::validate_players,
};

/// Pairings for the next round.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundPairing {
    /// Boards of the round, in search order.
    pub pairs: Vec<Pairing>,
    /// Player sitting out this round, if the count was odd.
    pub bye: Option<PlayerId>,
}

impl RoundPairing {
    /// Number of players who were given a board or the bye.
    pub fn player_count(&self) -> usize {
        self.pairs.len() * 2 + usize::from(self.bye.is_some())
    }

    /// The opponent of `player` this round, if they have one.
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        self.pairs.iter().find_map(|pair| {
            if pair.first == player {
                Some(pair.second)
            } else if pair.second == player {
                Some(pair.first)
            } else {
                None
            }
        })
    }
}

/// Computes the next round of a Swiss tournament.
#[derive(Debug, Clone, Default)]
pub struct PairingEngine {
    config: Configuration,
}

impl PairingEngine {
    /// Create a [`PairingEngine`] with the given [`Configuration`].
    ///
    /// If `config` enables logging, a file logger is installed. Failing to do so does not prevent
    /// the engine from working and is not reported; use [`try_new`](Self::try_new) to see it.
    pub fn new(config: Configuration) -> PairingEngine {
        if config.log {
            // failures are only surfaced by `try_new`
            let _ = init_logger();
        }
        Self::build(config)
    }

    /// Like [`new`](Self::new), but fails if logging is enabled and the logger cannot be
    /// installed.
    ///
    /// # Errors
    /// The log file cannot be created, or a global subscriber is already set.
    pub fn try_new(config: Configuration) -> anyhow::Result<PairingEngine> {
        if config.log {
            init_logger()?;
        }
        Ok(Self::build(config))
    }

    #[instrument(skip_all)]
    fn build(config: Configuration) -> PairingEngine {
        trace!(?config);
        PairingEngine { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Rebuilds the players of a tournament from its history, then pairs them.
    ///
    /// `enrolled` gives the player order the search follows; the last enrolled player gets the
    /// bye under [`ByePolicy::LastListed`].
    ///
    /// # Errors
    /// Any error of [`rebuild_players`] or [`pair_round`](Self::pair_round).
    pub fn start_next_round(
        &self,
        enrolled: &[PlayerId],
        results: &[RoundResult],
    ) -> Result<RoundPairing, PairingError> {
        let players = rebuild_players(enrolled, results)?;
        debug!(
            players = players.len(),
            results = results.len(),
            "rebuilt players from history"
        );
        self.pair_round(&players)
    }

    /// Pairs the given players, in list order, for the next round.
    ///
    /// Fewer than two players succeed with no boards (a single player gets the bye).
    ///
    /// # Errors
    /// - An invalid-input [`PairingError`] if the list is malformed, before any search
    /// - [`PairingError::InfeasiblePairing`] if no pairing without rematch exists
    /// - [`PairingError::SearchBudgetExceeded`] if the configured budget runs out
    #[instrument(skip_all, fields(players = players.len()))]
    pub fn pair_round(&self, players: &[Player]) -> Result<RoundPairing, PairingError> {
        validate_players(players)?;

        let result = match self.config.bye_policy {
            ByePolicy::LastListed => {
                let (rest, bye) = assign_bye(players);
                self.pair_rest(&rest, bye)
            }
            ByePolicy::Searched if players.len() % 2 == 1 => self.pair_with_searched_bye(players),
            ByePolicy::Searched => self.pair_rest(players, None),
        };

        match &result {
            Ok(round) => info!(
                pairs = round.pairs.len(),
                bye = ?round.bye,
                "round paired"
            ),
            Err(error) => warn!(%error, "round cannot be started"),
        }
        result
    }

    fn pair_rest(
        &self,
        rest: &[Player],
        bye: Option<PlayerId>,
    ) -> Result<RoundPairing, PairingError> {
        if let Some(bye) = bye {
            debug!(bye, "bye assigned");
        }
        let outcome = pair_players(rest, self.config.max_search_steps)?;
        debug!(
            steps = outcome.steps,
            backtracks = outcome.backtracks,
            "pairing search finished"
        );
        Ok(RoundPairing {
            pairs: outcome.pairs,
            bye,
        })
    }

    fn pair_with_searched_bye(&self, players: &[Player]) -> Result<RoundPairing, PairingError> {
        // the step budget is shared by every bye candidate
        let mut steps_left = self.config.max_search_steps;
        let mut spent = 0;

        for (rest, bye) in bye_candidates(players) {
            let run = run_search(&rest, steps_left);
            spent += run.steps;
            match run.end {
                SearchEnd::Paired(pairs) => {
                    debug!(
                        ?bye,
                        steps = spent,
                        backtracks = run.backtracks,
                        "pairing search finished"
                    );
                    return Ok(RoundPairing { pairs, bye });
                }
                SearchEnd::Exhausted => {
                    steps_left = steps_left.map(|left| left.saturating_sub(run.steps));
                    debug!(?bye, "no pairing with this bye, trying the previous player");
                }
                SearchEnd::OutOfBudget => {
                    return Err(PairingError::SearchBudgetExceeded { steps: spent });
                }
            }
        }

        Err(PairingError::InfeasiblePairing {
            players: players.len(),
        })
    }
}
