//! Engine-owned fighter storage

use super::cadence::Cadence;
use crate::fighter::FighterState;
use crate::profile::AttackProfile;
use crate::types::FighterId;

/// Everything the engine tracks for one side
#[derive(Debug, Clone)]
pub(crate) struct Combatant {
    pub state: FighterState,
    /// Explicit tuning; engine defaults apply when `None`
    pub profile: Option<AttackProfile>,
    pub cadence: Cadence,
}

impl Combatant {
    pub fn new(state: FighterState, profile: Option<AttackProfile>) -> Self {
        Combatant {
            state,
            profile: profile.map(AttackProfile::normalized),
            cadence: Cadence::default(),
        }
    }
}

/// Arena of enemy slots indexed by id
///
/// Slot `i` holds `FighterId(i + 1)`; id 0 belongs to the player. Slots are
/// never reused, so an id stays unique for the whole encounter.
#[derive(Debug, Clone, Default)]
pub(crate) struct Roster {
    slots: Vec<Option<Combatant>>,
}

impl Roster {
    pub fn new() -> Self {
        Roster { slots: Vec::new() }
    }

    /// Id the next insert will receive
    pub fn next_id(&self) -> FighterId {
        FighterId(self.slots.len() as u32 + 1)
    }

    pub fn insert(&mut self, combatant: Combatant) -> FighterId {
        let id = self.next_id();
        self.slots.push(Some(combatant));
        id
    }

    fn index(id: FighterId) -> Option<usize> {
        (id.0 as usize).checked_sub(1)
    }

    pub fn get(&self, id: FighterId) -> Option<&Combatant> {
        Self::index(id).and_then(|i| self.slots.get(i)).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, id: FighterId) -> Option<&mut Combatant> {
        Self::index(id)
            .and_then(|i| self.slots.get_mut(i))
            .and_then(|s| s.as_mut())
    }

    pub fn remove(&mut self, id: FighterId) -> Option<Combatant> {
        Self::index(id)
            .and_then(|i| self.slots.get_mut(i))
            .and_then(|s| s.take())
    }

    /// Snapshot of occupied ids in ascending order
    pub fn ids(&self) -> Vec<FighterId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FighterId, &Combatant)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|c| (FighterId(i as u32 + 1), c)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn any_alive(&self) -> bool {
        self.iter().any(|(_, c)| c.state.is_alive())
    }
}
