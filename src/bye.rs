//! Choosing the player who sits out a round with an odd number of players.
//!
//! The engine never decides who *deserves* the bye: callers control fairness through the order
//! of the list (e.g. by listing last whoever had the fewest byes so far).

use std::str::FromStr;

use crate::player::{Player, PlayerId};

/// How the bye player is chosen when the player count is odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByePolicy {
    /// The last listed player gets the bye. If the others cannot be paired the round fails, no
    /// other bye is tried.
    #[default]
    LastListed,
    /// The bye is part of the search: candidates are tried from the last listed player to the
    /// first, and the first one whose remainder can be paired gets the bye.
    Searched,
}

impl FromStr for ByePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last" | "last-listed" | "static" => Ok(ByePolicy::LastListed),
            "searched" | "search" => Ok(ByePolicy::Searched),
            other => anyhow::bail!("unknown bye policy '{other}' (expected 'last' or 'searched')"),
        }
    }
}

/// Removes the last listed player if the count is odd.
///
/// Returns the players left to pair, in their original order, and the bye player's id. An even
/// list is returned unchanged with no bye.
pub fn assign_bye(players: &[Player]) -> (Vec<Player>, Option<PlayerId>) {
    match players.len() % 2 {
        0 => (players.to_vec(), None),
        _ => without(players, players.len() - 1),
    }
}

/// Every possible bye in the order [`ByePolicy::Searched`] tries them.
///
/// Empty for an even list.
pub(crate) fn bye_candidates(
    players: &[Player],
) -> impl Iterator<Item = (Vec<Player>, Option<PlayerId>)> + '_ {
    let count = if players.len() % 2 == 1 { players.len() } else { 0 };
    (0..count).rev().map(move |i| without(players, i))
}

fn without(players: &[Player], index: usize) -> (Vec<Player>, Option<PlayerId>) {
    let rest = players
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .map(|(_, player)| player.clone())
        .collect();
    (rest, Some(players[index].id))
}

#[cfg(test)]
mod bye_tests {
    use super::*;

    fn fresh(ids: &[PlayerId]) -> Vec<Player> {
        ids.iter().map(|&id| Player::new(id)).collect()
    }

    fn ids(players: &[Player]) -> Vec<PlayerId> {
        players.iter().map(|p| p.id).collect()
    }

    #[test]
    fn even_count_has_no_bye() {
        let (rest, bye) = assign_bye(&fresh(&[1, 2, 3, 4]));
        assert_eq!(ids(&rest), vec![1, 2, 3, 4]);
        assert_eq!(bye, None);
    }

    #[test]
    fn odd_count_drops_the_last_player() {
        let (rest, bye) = assign_bye(&fresh(&[5, 1, 4, 2, 3]));
        assert_eq!(ids(&rest), vec![5, 1, 4, 2]);
        assert_eq!(bye, Some(3));
    }

    #[test]
    fn single_player_gets_the_bye() {
        let (rest, bye) = assign_bye(&fresh(&[9]));
        assert!(rest.is_empty());
        assert_eq!(bye, Some(9));
    }

    #[test]
    fn candidates_go_from_last_to_first() {
        let players = fresh(&[1, 2, 3]);
        let byes: Vec<_> = bye_candidates(&players).map(|(_, bye)| bye).collect();
        assert_eq!(byes, vec![Some(3), Some(2), Some(1)]);
        let (rest, _) = bye_candidates(&players).nth(1).unwrap();
        assert_eq!(ids(&rest), vec![1, 3]);
        assert_eq!(bye_candidates(&fresh(&[1, 2])).count(), 0);
    }

    #[test]
    fn policy_names() {
        assert_eq!("last".parse::<ByePolicy>().unwrap(), ByePolicy::LastListed);
        assert_eq!(" Searched ".parse::<ByePolicy>().unwrap(), ByePolicy::Searched);
        assert!("random".parse::<ByePolicy>().is_err());
    }
}
