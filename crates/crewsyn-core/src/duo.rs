//! Best-pair search over all unordered member pairs.

use serde::Serialize;

use crate::attributes::{Dimension, StatBlock};
use crate::error::SynergyError;
use crate::member::Member;

/// Score breakdown for one candidate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    /// Both members' harmony and communication, summed.
    pub harmony: f64,
    /// Sum of absolute per-dimension differences; rewards dissimilar
    /// profiles that cover each other's weak axes.
    pub complement: f64,
    pub total: f64,
}

/// The winning pair, in original collection order, with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuoResult {
    pub first: Member,
    pub second: Member,
    pub synergy_score: i64,
}

pub fn score_pair(a: &StatBlock, b: &StatBlock) -> PairScore {
    let harmony = a.harmony + b.harmony + a.communication + b.communication;
    let complement: f64 = Dimension::ALL
        .iter()
        .map(|dim| (a.get(*dim) - b.get(*dim)).abs())
        .sum();
    PairScore {
        harmony,
        complement,
        total: harmony * 2.0 + complement,
    }
}

/// Exhaustively score every unordered pair (i < j in collection order)
/// and return the best one.
///
/// Only strict improvement replaces the current best, so the first pair
/// reaching the maximum score in enumeration order wins ties. The final
/// score is rounded to the nearest integer.
pub fn find_best_duo(members: &[Member]) -> Result<DuoResult, SynergyError> {
    if members.len() < 2 {
        return Err(SynergyError::InsufficientMembers(members.len()));
    }

    let mut best: Option<(&Member, &Member, f64)> = None;
    for (i, a) in members.iter().enumerate() {
        for b in members.iter().skip(i + 1) {
            let total = score_pair(&a.stats, &b.stats).total;
            let improved = match best {
                Some((_, _, current)) => total > current,
                None => true,
            };
            if improved {
                best = Some((a, b, total));
            }
        }
    }

    // len >= 2 guarantees at least one scored pair.
    best.map_or(
        Err(SynergyError::InsufficientMembers(members.len())),
        |(a, b, total)| {
            Ok(DuoResult {
                first: a.clone(),
                second: b.clone(),
                synergy_score: total.round() as i64,
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Archetype, Role};

    #[test]
    fn fewer_than_two_members_is_insufficient() {
        assert_eq!(
            find_best_duo(&[]).unwrap_err(),
            SynergyError::InsufficientMembers(0)
        );

        let solo = vec![Member::new("m1", "Jin", Archetype::SpeedRacer, Role::Developer)];
        assert_eq!(
            find_best_duo(&solo).unwrap_err(),
            SynergyError::InsufficientMembers(1)
        );
    }

    #[test]
    fn worked_pair_score_example() {
        let a = StatBlock::new(12.0, 6.0, 6.0, 4.0, 7.0);
        let b = StatBlock::new(4.0, 9.0, 9.0, 10.0, 3.0);
        let score = score_pair(&a, &b);
        assert_eq!(score.harmony, 29.0);
        assert_eq!(score.complement, 24.0);
        assert_eq!(score.total, 82.0);
    }

    #[test]
    fn pair_scoring_is_symmetric() {
        let a = Archetype::SpeedRacer.base();
        let b = Archetype::PeaceMaker.base();
        assert_eq!(score_pair(&a, &b), score_pair(&b, &a));
    }

    #[test]
    fn two_members_return_that_pair_with_formula_score() {
        let members = vec![
            Member::new("m1", "Jin", Archetype::SpeedRacer, Role::Developer),
            Member::new("m2", "Mira", Archetype::PeaceMaker, Role::Hr),
        ];
        // (12,6,6,4,7) vs (4,6,8,14,3):
        // harmony = 4 + 14 + 6 + 8 = 32
        // complement = 8 + 0 + 2 + 10 + 4 = 24
        // score = 32 * 2 + 24 = 88
        let duo = find_best_duo(&members).expect("two members");
        assert_eq!(duo.first.id, "m1");
        assert_eq!(duo.second.id, "m2");
        assert_eq!(duo.synergy_score, 88);
    }

    #[test]
    fn best_pair_wins_over_weaker_pairs() {
        let members = vec![
            Member::new("m1", "Jin", Archetype::SpeedRacer, Role::Developer),
            Member::new("m2", "Mira", Archetype::DeepDiver, Role::Developer),
            Member::new("m3", "Noah", Archetype::PeaceMaker, Role::Hr),
        ];
        let duo = find_best_duo(&members).expect("three members");

        // Recompute all three pair scores and check the matcher agrees
        // with the maximum.
        let mut expected_best = f64::MIN;
        for (i, a) in members.iter().enumerate() {
            for b in members.iter().skip(i + 1) {
                expected_best = expected_best.max(score_pair(&a.stats, &b.stats).total);
            }
        }
        let winner = score_pair(&duo.first.stats, &duo.second.stats).total;
        assert_eq!(winner, expected_best);
    }

    #[test]
    fn ties_keep_the_first_pair_in_enumeration_order() {
        // Four identical members: every pair scores identically, so the
        // strict `>` comparison must keep the very first pair (0, 1).
        let members: Vec<Member> = (0..4)
            .map(|i| {
                Member::new(
                    format!("m{i}"),
                    format!("Member {i}"),
                    Archetype::SuperConnector,
                    Role::Planner,
                )
            })
            .collect();

        for _ in 0..10 {
            let duo = find_best_duo(&members).expect("four members");
            assert_eq!(duo.first.id, "m0");
            assert_eq!(duo.second.id, "m1");
        }
    }

    #[test]
    fn score_is_rounded_to_nearest_integer() {
        let members = vec![
            Member::new("m1", "Jin", Archetype::SpeedRacer, Role::Developer),
            Member::new("m2", "Mira", Archetype::PeaceMaker, Role::Hr),
        ];
        let duo = find_best_duo(&members).expect("two members");
        let raw = score_pair(&duo.first.stats, &duo.second.stats).total;
        assert_eq!(duo.synergy_score, raw.round() as i64);
    }
}
