//! # Swiss Pairing
//!
//! Computes the next round of a Swiss-system tournament: given the players still in the
//! tournament and every game recorded so far, pair everyone with someone they have not met yet,
//! setting one player aside as the bye when the count is odd.
//!
//! It provides:
//! - Rebuilding players (score and past opponents) from round results ([`history`])
//! - Bye assignment with a static or searched policy ([`bye`])
//! - A deterministic backtracking pairing search ([`search`])
//! - The [`PairingEngine`](crate::engine::PairingEngine) wiring them together for one
//!   "start next round" request
//!
//! The engine is a pure computation: it reads nothing from storage and writes nothing back.
//! Persisting the returned pairs and crediting the bye is up to the caller.
//!
//! # Documentation Overview
//!
//! - For the search order and what "first feasible pairing" means, see the [`search`] module.
//! - For the failure taxonomy, see [`PairingError`](crate::error::PairingError).
//! - For bye handling and its policies, see [`ByePolicy`](crate::bye::ByePolicy).
//! - For tuning the engine (bye policy, search budget, logging), see
//!   [`Configuration`](crate::configuration::Configuration).
//!
//! # Usage Example
//!
//! ```
//! use swiss_pairing::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let engine = PairingEngine::new(Configuration::new());
//!
//!     // players in the order the search should follow, last one gets the bye if needed
//!     let enrolled = [1, 2, 3, 4, 5];
//!     let history = [
//!         RoundResult::new(1, 2, MatchOutcome::Player1Win),
//!         RoundResult::new(3, 4, MatchOutcome::Draw),
//!     ];
//!
//!     let round = engine.start_next_round(&enrolled, &history)?;
//!     assert_eq!(round.pairs, vec![Pairing::new(1, 3), Pairing::new(2, 4)]);
//!     assert_eq!(round.bye, Some(5));
//!
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]

pub use anyhow;
pub mod bye;
pub mod configuration;
pub mod engine;
pub mod error;
pub mod history;
mod logger;
pub mod player;
pub mod search;
mod validate;

/// Commonly used types for quick access.
///
/// Import this prelude to get started easily:
/// ```rust
/// use swiss_pairing::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bye::ByePolicy;
    pub use crate::configuration::Configuration;
    pub use crate::engine::{PairingEngine, RoundPairing};
    pub use crate::error::PairingError;
    pub use crate::history::{MatchOutcome, RoundResult};
    pub use crate::player::{Player, PlayerId, Score};
    pub use crate::search::Pairing;
}
