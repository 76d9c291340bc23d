use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::{Dimension, StatBlock};
use crate::member::Member;

/// Ordinal team grade, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    C,
    B,
    A,
    S,
    SS,
    SSS,
}

impl Grade {
    /// Step function over the rounded overall average. Bands are
    /// inclusive on their lower bound and partition [0, inf).
    pub fn from_overall(overall: f64) -> Grade {
        if overall >= 12.0 {
            Grade::SSS
        } else if overall >= 11.0 {
            Grade::SS
        } else if overall >= 10.0 {
            Grade::S
        } else if overall >= 9.0 {
            Grade::A
        } else if overall >= 8.0 {
            Grade::B
        } else {
            Grade::C
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::C => "C",
            Grade::B => "B",
            Grade::A => "A",
            Grade::S => "S",
            Grade::SS => "SS",
            Grade::SSS => "SSS",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived team-level view: averages, overall scalar, and grade.
///
/// Recomputed in full on every call; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub team_size: usize,
    pub average: StatBlock,
    pub overall: f64,
    pub grade: Grade,
}

/// Round to one decimal place, half away from zero.
///
/// This is the pinned rounding rule for all team averages; the domain
/// is non-negative, so halves always round up.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Reduce a team to its summary.
///
/// The empty team is defined, not an error: zero vector, overall 0.0,
/// grade C. Each dimension is averaged and rounded independently; the
/// overall scalar is the rounded mean of the five already-rounded
/// averages, and the grade classifies that rounded overall.
pub fn aggregate(members: &[Member]) -> TeamSummary {
    let team_size = members.len();
    if team_size == 0 {
        return TeamSummary {
            team_size: 0,
            average: StatBlock::ZERO,
            overall: 0.0,
            grade: Grade::C,
        };
    }

    let mut total = StatBlock::ZERO;
    for member in members {
        total = total.add(&member.stats);
    }

    let count = team_size as f64;
    let average = StatBlock::new(
        round_to_tenth(total.execution / count),
        round_to_tenth(total.precision / count),
        round_to_tenth(total.communication / count),
        round_to_tenth(total.harmony / count),
        round_to_tenth(total.creativity / count),
    );

    let dimension_sum: f64 = Dimension::ALL.iter().map(|d| average.get(*d)).sum();
    let overall = round_to_tenth(dimension_sum / Dimension::ALL.len() as f64);

    TeamSummary {
        team_size,
        average,
        overall,
        grade: Grade::from_overall(overall),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Archetype, Role};

    #[test]
    fn empty_team_is_zero_c() {
        let summary = aggregate(&[]);
        assert_eq!(summary.team_size, 0);
        assert_eq!(summary.average, StatBlock::ZERO);
        assert_eq!(summary.overall, 0.0);
        assert_eq!(summary.grade, Grade::C);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 8.25 and 82.5 are exactly representable, so this pins the
        // half-way behavior rather than floating-point noise.
        assert_eq!(round_to_tenth(8.25), 8.3);
        assert_eq!(round_to_tenth(8.24), 8.2);
        assert_eq!(round_to_tenth(0.25), 0.3);
        assert_eq!(round_to_tenth(7.0), 7.0);
    }

    #[test]
    fn two_member_averages() {
        let members = vec![
            Member::new("m1", "Jin", Archetype::SpeedRacer, Role::Developer),
            Member::new("m2", "Mira", Archetype::DeepDiver, Role::Developer),
        ];
        // (12,6,6,4,7) and (5,13,4,6,7)
        let summary = aggregate(&members);
        assert_eq!(summary.average.execution, 8.5);
        assert_eq!(summary.average.precision, 9.5);
        assert_eq!(summary.average.communication, 5.0);
        assert_eq!(summary.average.harmony, 5.0);
        assert_eq!(summary.average.creativity, 7.0);
        assert_eq!(summary.overall, 7.0);
        assert_eq!(summary.grade, Grade::C);
    }

    #[test]
    fn three_member_averages_round_per_dimension() {
        let members = vec![
            Member::new("m1", "Jin", Archetype::SpeedRacer, Role::Developer),
            Member::new("m2", "Mira", Archetype::DeepDiver, Role::Developer),
            Member::new("m3", "Noah", Archetype::SuperConnector, Role::Marketing),
        ];
        // (12,6,6,4,7), (5,13,4,6,7), (9,4,13,6,8)
        let summary = aggregate(&members);
        assert_eq!(summary.average.execution, 8.7);
        assert_eq!(summary.average.precision, 7.7);
        assert_eq!(summary.average.communication, 7.7);
        assert_eq!(summary.average.harmony, 5.3);
        assert_eq!(summary.average.creativity, 7.3);
        // (8.7 + 7.7 + 7.7 + 5.3 + 7.3) / 5 = 7.34 -> 7.3
        assert_eq!(summary.overall, 7.3);
        assert_eq!(summary.grade, Grade::C);
    }

    #[test]
    fn grade_band_boundaries_are_inclusive() {
        assert_eq!(Grade::from_overall(7.9), Grade::C);
        assert_eq!(Grade::from_overall(8.0), Grade::B);
        assert_eq!(Grade::from_overall(9.0), Grade::A);
        assert_eq!(Grade::from_overall(10.0), Grade::S);
        assert_eq!(Grade::from_overall(11.0), Grade::SS);
        assert_eq!(Grade::from_overall(12.0), Grade::SSS);
        assert_eq!(Grade::from_overall(0.0), Grade::C);
        assert_eq!(Grade::from_overall(100.0), Grade::SSS);
    }

    #[test]
    fn grades_are_ordered() {
        assert!(Grade::C < Grade::B);
        assert!(Grade::B < Grade::A);
        assert!(Grade::A < Grade::S);
        assert!(Grade::S < Grade::SS);
        assert!(Grade::SS < Grade::SSS);
    }

    #[test]
    fn grade_serializes_as_band_name() {
        let json = serde_json::to_string(&Grade::SSS).expect("serialize");
        assert_eq!(json, "\"SSS\"");
    }
}
