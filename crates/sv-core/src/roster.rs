use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::soul::{Soul, SoulId, SoulSeed};

/// The ordered set of souls for one viewing session.
///
/// Construction validates the invariants the simulation relies on: at least
/// one soul, unique IDs, non-empty trait lists, and at most one focused soul.
/// Order is preserved from the external loader; the planner's circular
/// placement uses each soul's index in this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    souls: Vec<Soul>,
    #[serde(skip)]
    by_id: HashMap<SoulId, usize>,
}

impl Roster {
    /// Build a roster from loader seeds, validating invariants.
    pub fn from_seeds(seeds: Vec<SoulSeed>) -> CoreResult<Self> {
        if seeds.is_empty() {
            return Err(CoreError::EmptyRoster);
        }
        let focused = seeds.iter().filter(|s| s.is_focused).count();
        if focused > 1 {
            return Err(CoreError::MultipleFocused(focused));
        }
        for seed in &seeds {
            if seed.traits.is_empty() {
                return Err(CoreError::EmptyTraits(seed.name.clone()));
            }
        }

        let mut by_id = HashMap::new();
        let mut souls = Vec::with_capacity(seeds.len());
        for (index, seed) in seeds.into_iter().enumerate() {
            if by_id.insert(seed.id, index).is_some() {
                return Err(CoreError::DuplicateSoul(seed.id));
            }
            souls.push(Soul::from_seed(seed));
        }
        Ok(Self { souls, by_id })
    }

    /// Number of souls in the roster.
    pub fn len(&self) -> usize {
        self.souls.len()
    }

    /// Whether the roster is empty. Always `false` for a validated roster;
    /// kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.souls.is_empty()
    }

    /// Iterate souls in loader order.
    pub fn iter(&self) -> impl Iterator<Item = &Soul> {
        self.souls.iter()
    }

    /// Iterate souls mutably in loader order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Soul> {
        self.souls.iter_mut()
    }

    /// Look up a soul by ID.
    pub fn get(&self, id: SoulId) -> Option<&Soul> {
        self.by_id.get(&id).and_then(|&i| self.souls.get(i))
    }

    /// Look up a soul mutably by ID.
    pub fn get_mut(&mut self, id: SoulId) -> Option<&mut Soul> {
        let index = *self.by_id.get(&id)?;
        self.souls.get_mut(index)
    }

    /// The focused soul, if one was designated.
    pub fn focused(&self) -> Option<&Soul> {
        self.souls.iter().find(|s| s.is_focused)
    }

    /// ID of the focused soul, if one was designated.
    pub fn focused_id(&self) -> Option<SoulId> {
        self.focused().map(|s| s.id)
    }

    /// Rebuild the ID index. Needed after deserializing, since the index is
    /// not part of the serialized form.
    pub fn reindex(&mut self) {
        self.by_id = self
            .souls
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id, i))
            .collect();
    }
}
