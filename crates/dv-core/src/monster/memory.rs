//! Creature memory (c_recall): what the player has learned about each kind

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::{Breaths, Capabilities, TemplateId, Treasure};

/// Knowledge about one monster template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recall {
    /// Capabilities seen in action
    pub capabilities: Capabilities,
    pub breaths: Breaths,
    /// Largest number of items seen dropped at once
    pub max_drop: u32,
    pub seen_gold: bool,
    pub seen_objects: bool,
    pub kills: u32,
}

impl Recall {
    /// Carry flags implied by the drops seen so far
    pub fn carried(&self) -> Treasure {
        let mut treasure = Treasure::empty();
        treasure.set(Treasure::CARRY_GOLD, self.seen_gold);
        treasure.set(Treasure::CARRY_OBJECT, self.seen_objects);
        treasure
    }
}

/// What one death actually dropped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropRecord {
    pub count: u32,
    pub gold: bool,
    pub objects: bool,
}

/// Per-template memory, the only runtime-mutable monster knowledge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatureMemory {
    entries: HashMap<TemplateId, Recall>,
}

impl CreatureMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_observed_capability(&mut self, template: TemplateId, capability: Capabilities) {
        if capability.is_empty() {
            return;
        }
        self.entries.entry(template).or_default().capabilities |= capability;
    }

    pub fn record_breath(&mut self, template: TemplateId, breath: Breaths) {
        self.entries.entry(template).or_default().breaths |= breath;
    }

    /// Merge a drop, keeping the better of what was known and what was seen
    pub fn record_drop(&mut self, template: TemplateId, drop: DropRecord) {
        let recall = self.entries.entry(template).or_default();
        recall.max_drop = recall.max_drop.max(drop.count);
        recall.seen_gold |= drop.gold;
        recall.seen_objects |= drop.objects;
    }

    pub fn record_kill(&mut self, template: TemplateId) {
        let recall = self.entries.entry(template).or_default();
        recall.kills = recall.kills.saturating_add(1);
    }

    pub fn recall(&self, template: TemplateId) -> Option<&Recall> {
        self.entries.get(&template)
    }

    pub fn knows(&self, template: TemplateId, capability: Capabilities) -> bool {
        self.recall(template)
            .is_some_and(|r| r.capabilities.contains(capability))
    }
}
