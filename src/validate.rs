use std::collections::HashMap;

use crate::{error::PairingError, player::Player};

/// Checks a round's player list before any bye or search work.
///
/// Must run on the full list: the bye player is still a legitimate past opponent of the others.
pub(crate) fn validate_players(players: &[Player]) -> Result<(), PairingError> {
    let mut by_id = HashMap::with_capacity(players.len());
    for player in players {
        if by_id.insert(player.id, player).is_some() {
            return Err(PairingError::DuplicatePlayer(player.id));
        }
    }

    for player in players {
        // sorted so the same input always reports the same error
        let mut opponents: Vec<_> = player.opponents.iter().copied().collect();
        opponents.sort_unstable();
        for opponent in opponents {
            if opponent == player.id {
                return Err(PairingError::SelfOpponent(player.id));
            }
            let Some(other) = by_id.get(&opponent) else {
                return Err(PairingError::UnknownOpponent {
                    player: player.id,
                    opponent,
                });
            };
            if !other.has_faced(player.id) {
                return Err(PairingError::AsymmetricHistory {
                    player: player.id,
                    opponent,
                });
            }
        }
    }

    Ok(())
}
