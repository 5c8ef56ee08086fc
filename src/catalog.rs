//! Read-only static catalogs the engine evaluates against.

use crate::achievements::data::ALL_ACHIEVEMENTS;
use crate::achievements::types::AchievementDef;
use crate::boss::data::ALL_BOSSES;
use crate::boss::types::BossDefinition;
use crate::error::CatalogError;
use crate::rank::data::RANK_REQUIREMENTS;
use crate::rank::types::{Rank, RankRequirement};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub bosses: &'static [BossDefinition],
    pub achievements: &'static [AchievementDef],
    pub ranks: &'static [RankRequirement],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            bosses: ALL_BOSSES,
            achievements: ALL_ACHIEVEMENTS,
            ranks: RANK_REQUIREMENTS,
        }
    }

    pub fn boss(&self, id: &str) -> Option<&'static BossDefinition> {
        self.bosses.iter().find(|b| b.id == id)
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for boss in self.bosses {
            if !seen.insert(boss.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "boss",
                    id: boss.id.to_string(),
                });
            }
            if boss.base_target_count == 0 || boss.time_limit_secs <= 0 {
                return Err(CatalogError::InvalidBoss(boss.id.to_string()));
            }
        }

        let mut seen = HashSet::new();
        for def in self.achievements {
            if !seen.insert(def.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "achievement",
                    id: def.id.to_string(),
                });
            }
            let increasing = def
                .ranks
                .windows(2)
                .all(|pair| pair[1].requirement > pair[0].requirement);
            if def.ranks.is_empty() || !increasing {
                return Err(CatalogError::InvalidAchievement(def.id.to_string()));
            }
        }

        let expected = &Rank::ALL[1..];
        let listed: Vec<Rank> = self.ranks.iter().map(|r| r.rank).collect();
        if listed.as_slice() != expected {
            return Err(CatalogError::InvalidRankTable);
        }

        Ok(())
    }
}
