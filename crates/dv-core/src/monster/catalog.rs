//! Read-only monster template catalog

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use super::{PerMonst, TemplateId};
use crate::rng::GameRng;
use crate::world::EngineError;

/// All monster templates known to the game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonsterCatalog {
    templates: Vec<PerMonst>,
}

impl MonsterCatalog {
    pub fn new(templates: Vec<PerMonst>) -> Self {
        Self { templates }
    }

    pub fn get(&self, id: TemplateId) -> Result<&PerMonst, EngineError> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or(EngineError::UnknownTemplate { id })
    }

    pub fn by_name(&self, name: &str) -> Option<&PerMonst> {
        self.templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PerMonst> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Add templates, replacing any with the same id
    pub fn extend(&mut self, templates: impl IntoIterator<Item = PerMonst>) {
        for template in templates {
            self.templates.retain(|t| t.id != template.id);
            self.templates.push(template);
        }
    }

    /// Pick what a polymorphed monster turns into
    ///
    /// Draws uniformly from non-unique templates whose level lies within
    /// `band` of the original's, never the original itself.
    pub fn polymorph_target(
        &self,
        from: &PerMonst,
        band: u8,
        rng: &mut GameRng,
    ) -> Option<TemplateId> {
        let lo = from.level.saturating_sub(band);
        let hi = from.level.saturating_add(band);
        let candidates: Vec<TemplateId> = self
            .templates
            .iter()
            .filter(|t| t.id != from.id && !t.is_unique() && (lo..=hi).contains(&t.level))
            .map(|t| t.id)
            .collect();
        rng.choose(&candidates).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::Capabilities;

    fn catalog() -> MonsterCatalog {
        MonsterCatalog::new(vec![
            PerMonst::new(1, "jackal", 'C', 1),
            PerMonst::new(2, "cave spider", 'S', 2),
            PerMonst::new(3, "Bullroarer the Hobbit", 'h', 3)
                .with_capabilities(Capabilities::UNIQUE),
            PerMonst::new(4, "young blue dragon", 'd', 29),
        ])
    }

    #[test]
    fn test_lookup() {
        let cat = catalog();
        assert_eq!(cat.get(TemplateId(2)).unwrap().name, "cave spider");
        assert!(matches!(
            cat.get(TemplateId(99)),
            Err(EngineError::UnknownTemplate { id: TemplateId(99) })
        ));
        assert_eq!(cat.by_name("JACKAL").map(|t| t.id), Some(TemplateId(1)));
    }

    #[test]
    fn test_polymorph_band_excludes_uniques_and_self() {
        let cat = catalog();
        let jackal = cat.get(TemplateId(1)).unwrap().clone();
        let mut rng = GameRng::new(11);
        for _ in 0..30 {
            assert_eq!(cat.polymorph_target(&jackal, 5, &mut rng), Some(TemplateId(2)));
        }
    }

    #[test]
    fn test_polymorph_band_empty() {
        let cat = catalog();
        let dragon = cat.get(TemplateId(4)).unwrap().clone();
        assert_eq!(cat.polymorph_target(&dragon, 5, &mut GameRng::new(1)), None);
    }

    #[test]
    fn test_extend_replaces() {
        let mut cat = catalog();
        cat.extend([PerMonst::new(2, "giant white louse", 'l', 1)]);
        assert_eq!(cat.len(), 4);
        assert_eq!(cat.get(TemplateId(2)).unwrap().name, "giant white louse");
    }
}
