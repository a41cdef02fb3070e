//! Winner Selection

use crate::core::rng::DeterministicRng;
use crate::game::player::Player;

/// Pick one active player with equal probability.
///
/// Returns `None` only when no player is active; the session never starts a
/// round with fewer than two players.
pub fn select_winner<'a>(players: &'a [Player], rng: &mut DeterministicRng) -> Option<&'a Player> {
    let active: Vec<&Player> = players.iter().filter(|p| p.active).collect();
    rng.choose(&active).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::point::Point;
    use crate::game::player::PlayerId;

    fn players(n: u32) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(PlayerId::new(i), Point::new(i as f64, 0.0)))
            .collect()
    }

    #[test]
    fn test_empty_has_no_winner() {
        let mut rng = DeterministicRng::new(1);
        assert!(select_winner(&[], &mut rng).is_none());
    }

    #[test]
    fn test_inactive_players_skipped() {
        let mut roster = players(3);
        roster[0].active = false;
        roster[2].active = false;

        let mut rng = DeterministicRng::new(8);
        for _ in 0..50 {
            assert_eq!(select_winner(&roster, &mut rng).unwrap().id, PlayerId::new(1));
        }
    }

    #[test]
    fn test_uniform_distribution() {
        const N: usize = 5;
        const TRIALS: usize = 5000;
        let roster = players(N as u32);
        let mut rng = DeterministicRng::new(0xC0FFEE);
        let mut counts = [0usize; N];

        for _ in 0..TRIALS {
            let winner = select_winner(&roster, &mut rng).unwrap();
            counts[winner.id.index() as usize] += 1;
        }

        let expected = TRIALS as f64 / N as f64;
        let chi_square: f64 = counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();

        // df = 4, p = 0.001
        assert!(chi_square < 18.467, "chi-square {chi_square} with counts {counts:?}");
    }
}
