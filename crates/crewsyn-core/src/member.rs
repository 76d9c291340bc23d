use serde::Serialize;

use crate::attributes::{Archetype, Role, StatBlock};

/// Combine an archetype's base vector with a role's bonus vector.
///
/// Pure and deterministic: the same pair always yields a bit-identical
/// block regardless of call site.
pub fn derive_stats(archetype: Archetype, role: Role) -> StatBlock {
    archetype.base().add(&role.bonus())
}

/// One crew member with a derived attribute vector.
///
/// Stats are fixed at construction; members are replaced, not edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub archetype: Archetype,
    pub role: Role,
    pub stats: StatBlock,
}

impl Member {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        archetype: Archetype,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            archetype,
            role,
            stats: derive_stats(archetype, role),
        }
    }
}
