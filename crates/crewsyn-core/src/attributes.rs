//! Closed attribute sets and their immutable stat tables.
//!
//! Every member has exactly one [`Archetype`] (base vector) and one
//! [`Role`] (bonus vector). The tables are process-wide constants with
//! no mutation API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SynergyError;

/// The five attribute axes, in fixed enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Execution,
    Precision,
    Communication,
    Harmony,
    Creativity,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Execution,
        Dimension::Precision,
        Dimension::Communication,
        Dimension::Harmony,
        Dimension::Creativity,
    ];

    /// Short wire code used in serialized stat blocks.
    pub fn code(self) -> &'static str {
        match self {
            Dimension::Execution => "SPD",
            Dimension::Precision => "DET",
            Dimension::Communication => "COM",
            Dimension::Harmony => "HAR",
            Dimension::Creativity => "CRE",
        }
    }

    /// Human-readable axis label.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Execution => "execution speed",
            Dimension::Precision => "precision",
            Dimension::Communication => "communication",
            Dimension::Harmony => "harmony",
            Dimension::Creativity => "creativity",
        }
    }
}

/// A fully-populated five-dimension attribute vector.
///
/// Used both for individual members (integer-valued by construction)
/// and for team averages (fractional).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(rename = "SPD")]
    pub execution: f64,
    #[serde(rename = "DET")]
    pub precision: f64,
    #[serde(rename = "COM")]
    pub communication: f64,
    #[serde(rename = "HAR")]
    pub harmony: f64,
    #[serde(rename = "CRE")]
    pub creativity: f64,
}

impl StatBlock {
    pub const ZERO: StatBlock = StatBlock::new(0.0, 0.0, 0.0, 0.0, 0.0);

    pub const fn new(
        execution: f64,
        precision: f64,
        communication: f64,
        harmony: f64,
        creativity: f64,
    ) -> Self {
        Self {
            execution,
            precision,
            communication,
            harmony,
            creativity,
        }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Execution => self.execution,
            Dimension::Precision => self.precision,
            Dimension::Communication => self.communication,
            Dimension::Harmony => self.harmony,
            Dimension::Creativity => self.creativity,
        }
    }

    /// Dimension-wise sum, constructed in one step.
    pub fn add(&self, other: &StatBlock) -> StatBlock {
        StatBlock::new(
            self.execution + other.execution,
            self.precision + other.precision,
            self.communication + other.communication,
            self.harmony + other.harmony,
            self.creativity + other.creativity,
        )
    }

    /// Highest-valued axis. Ties resolve to the earlier axis in
    /// [`Dimension::ALL`] order.
    pub fn top_dimension(&self) -> Dimension {
        let mut best = Dimension::Execution;
        for dim in Dimension::ALL {
            if self.get(dim) > self.get(best) {
                best = dim;
            }
        }
        best
    }

    /// Lowest-valued axis. Ties resolve to the earlier axis in
    /// [`Dimension::ALL`] order.
    pub fn bottom_dimension(&self) -> Dimension {
        let mut worst = Dimension::Execution;
        for dim in Dimension::ALL {
            if self.get(dim) < self.get(worst) {
                worst = dim;
            }
        }
        worst
    }
}

/// Personality-style category with an immutable base vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    SpeedRacer,
    DeepDiver,
    SuperConnector,
    PeaceMaker,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::SpeedRacer,
        Archetype::DeepDiver,
        Archetype::SuperConnector,
        Archetype::PeaceMaker,
    ];

    /// Base attribute vector for this archetype.
    pub fn base(self) -> StatBlock {
        match self {
            Archetype::SpeedRacer => StatBlock::new(10.0, 3.0, 6.0, 4.0, 7.0),
            Archetype::DeepDiver => StatBlock::new(3.0, 10.0, 4.0, 6.0, 7.0),
            Archetype::SuperConnector => StatBlock::new(7.0, 4.0, 10.0, 6.0, 8.0),
            Archetype::PeaceMaker => StatBlock::new(4.0, 6.0, 7.0, 10.0, 3.0),
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Archetype::SpeedRacer => "speed-racer",
            Archetype::DeepDiver => "deep-diver",
            Archetype::SuperConnector => "super-connector",
            Archetype::PeaceMaker => "peace-maker",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Archetype::SpeedRacer => "Speed Racer",
            Archetype::DeepDiver => "Deep Diver",
            Archetype::SuperConnector => "Super Connector",
            Archetype::PeaceMaker => "Peace Maker",
        }
    }
}

impl FromStr for Archetype {
    type Err = SynergyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Archetype::ALL
            .into_iter()
            .find(|a| a.slug() == value)
            .ok_or_else(|| SynergyError::InvalidAttribute(format!("unknown archetype: {value}")))
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Job-function category contributing a fixed bonus vector.
///
/// Axes a role does not boost carry zero in its bonus block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Developer,
    Planner,
    Designer,
    Hr,
    Marketing,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Developer,
        Role::Planner,
        Role::Designer,
        Role::Hr,
        Role::Marketing,
    ];

    /// Bonus attribute vector for this role.
    pub fn bonus(self) -> StatBlock {
        match self {
            Role::Developer => StatBlock::new(2.0, 3.0, 0.0, 0.0, 0.0),
            Role::Planner => StatBlock::new(0.0, 2.0, 3.0, 0.0, 0.0),
            Role::Designer => StatBlock::new(0.0, 1.0, 0.0, 0.0, 4.0),
            Role::Hr => StatBlock::new(0.0, 0.0, 1.0, 4.0, 0.0),
            Role::Marketing => StatBlock::new(2.0, 0.0, 3.0, 0.0, 0.0),
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Role::Developer => "developer",
            Role::Planner => "planner",
            Role::Designer => "designer",
            Role::Hr => "hr",
            Role::Marketing => "marketing",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Developer => "Developer",
            Role::Planner => "Planner",
            Role::Designer => "Designer",
            Role::Hr => "HR",
            Role::Marketing => "Marketing",
        }
    }
}

impl FromStr for Role {
    type Err = SynergyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.slug() == value)
            .ok_or_else(|| SynergyError::InvalidAttribute(format!("unknown role: {value}")))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_tables_match_fixed_values() {
        let b = Archetype::SpeedRacer.base();
        assert_eq!(
            (b.execution, b.precision, b.communication, b.harmony, b.creativity),
            (10.0, 3.0, 6.0, 4.0, 7.0)
        );

        let b = Archetype::PeaceMaker.base();
        assert_eq!(
            (b.execution, b.precision, b.communication, b.harmony, b.creativity),
            (4.0, 6.0, 7.0, 10.0, 3.0)
        );
    }

    #[test]
    fn bonus_tables_zero_untouched_axes() {
        let b = Role::Developer.bonus();
        assert_eq!((b.execution, b.precision), (2.0, 3.0));
        assert_eq!((b.communication, b.harmony, b.creativity), (0.0, 0.0, 0.0));

        let b = Role::Hr.bonus();
        assert_eq!((b.communication, b.harmony), (1.0, 4.0));
        assert_eq!((b.execution, b.precision, b.creativity), (0.0, 0.0, 0.0));
    }

    #[test]
    fn slugs_round_trip_through_from_str() {
        for archetype in Archetype::ALL {
            let parsed: Archetype = archetype.slug().parse().expect("known slug");
            assert_eq!(parsed, archetype);
        }
        for role in Role::ALL {
            let parsed: Role = role.slug().parse().expect("known slug");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unknown_slugs_are_invalid_attributes() {
        let err = "night-owl".parse::<Archetype>().unwrap_err();
        assert!(matches!(err, SynergyError::InvalidAttribute(_)));

        let err = "astronaut".parse::<Role>().unwrap_err();
        assert!(matches!(err, SynergyError::InvalidAttribute(_)));
    }

    #[test]
    fn serde_uses_kebab_slugs() {
        let json = serde_json::to_string(&Archetype::SuperConnector).expect("serialize");
        assert_eq!(json, "\"super-connector\"");

        let role: Role = serde_json::from_str("\"hr\"").expect("deserialize");
        assert_eq!(role, Role::Hr);
    }

    #[test]
    fn stat_block_serializes_with_dimension_codes() {
        let json = serde_json::to_value(Archetype::SpeedRacer.base()).expect("serialize");
        assert_eq!(json["SPD"], 10.0);
        assert_eq!(json["DET"], 3.0);
        assert_eq!(json["CRE"], 7.0);
    }

    #[test]
    fn top_and_bottom_dimensions() {
        let b = Archetype::SuperConnector.base();
        assert_eq!(b.top_dimension(), Dimension::Communication);
        assert_eq!(b.bottom_dimension(), Dimension::Precision);
    }

    #[test]
    fn dimension_ties_resolve_to_enumeration_order() {
        let flat = StatBlock::new(5.0, 5.0, 5.0, 5.0, 5.0);
        assert_eq!(flat.top_dimension(), Dimension::Execution);
        assert_eq!(flat.bottom_dimension(), Dimension::Execution);
    }
}
