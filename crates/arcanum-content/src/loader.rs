//! RON content loader
//!
//! Content files are RON documents with optional sections, one per content
//! table. A file may carry any mix of sections, so data can be split by
//! domain (actions.ron, enemies.ron, ...) or shipped as one document.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use arcanum_core::{
    ActionDef, Content, DungeonDef, EnemyDef, HouseDef, HousingItemDef, SkillBonusEffect,
    SkillDef, SpellDef, UnlockEffect,
};

use crate::error::{Error, Result};

/// One RON content document; every section is optional
#[derive(Debug, Default, Deserialize)]
struct ContentFile {
    #[serde(default)]
    actions: Vec<ActionDef>,
    #[serde(default)]
    skills: Vec<SkillDef>,
    #[serde(default)]
    spells: Vec<SpellDef>,
    #[serde(default)]
    enemies: Vec<EnemyDef>,
    #[serde(default)]
    dungeons: Vec<DungeonDef>,
    #[serde(default)]
    houses: Vec<HouseDef>,
    #[serde(default)]
    housing_items: Vec<HousingItemDef>,
}

/// Accumulates content documents into one validated [`Content`] bundle
#[derive(Debug, Default)]
pub struct Loader {
    content: Content,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let source = fs::read_to_string(path)?;
        self.load_str(&source)
    }

    /// Load every `.ron` file in a directory (not recursive)
    pub fn load_dir(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let mut paths: Vec<_> = fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "ron"))
            .collect();
        // Deterministic load order regardless of directory iteration
        paths.sort();
        for path in paths {
            self.load_file(path)?;
        }
        Ok(())
    }

    /// Load a RON document from a string
    pub fn load_str(&mut self, source: &str) -> Result<()> {
        let file: ContentFile = ron::from_str(source)?;

        for def in file.actions {
            if self.content.actions.contains_key(&def.id) {
                return Err(Error::DuplicateDefinition(def.id.to_string()));
            }
            self.content.actions.insert(def.id.clone(), def);
        }
        for def in file.skills {
            if self.content.skills.contains_key(&def.id) {
                return Err(Error::DuplicateDefinition(def.id.to_string()));
            }
            self.content.skills.insert(def.id.clone(), def);
        }
        for def in file.spells {
            if self.content.spells.contains_key(&def.id) {
                return Err(Error::DuplicateDefinition(def.id.to_string()));
            }
            self.content.spells.insert(def.id.clone(), def);
        }
        for def in file.enemies {
            if self.content.enemies.contains_key(&def.id) {
                return Err(Error::DuplicateDefinition(def.id.to_string()));
            }
            self.content.enemies.insert(def.id.clone(), def);
        }
        for def in file.dungeons {
            if self.content.dungeons.contains_key(&def.id) {
                return Err(Error::DuplicateDefinition(def.id.to_string()));
            }
            self.content.dungeons.insert(def.id.clone(), def);
        }
        for def in file.houses {
            if self.content.houses.contains_key(&def.id) {
                return Err(Error::DuplicateDefinition(def.id.to_string()));
            }
            self.content.houses.insert(def.id.clone(), def);
        }
        for def in file.housing_items {
            if self.content.housing_items.contains_key(&def.id) {
                return Err(Error::DuplicateDefinition(def.id.to_string()));
            }
            self.content.housing_items.insert(def.id.clone(), def);
        }

        Ok(())
    }

    /// Validate cross references and hand over the content bundle
    pub fn finish(self) -> Result<Content> {
        validate(&self.content)?;
        Ok(self.content)
    }
}

/// Check that every cross-table reference resolves
fn validate(content: &Content) -> Result<()> {
    let dangling = |kind: &'static str, id: &dyn ToString, referrer: &dyn ToString| {
        Err(Error::DanglingReference {
            kind,
            id: id.to_string(),
            referrer: referrer.to_string(),
        })
    };

    for (id, def) in &content.actions {
        for skill in def.skill_xp.keys() {
            if content.skills.get(skill).is_none() {
                return dangling("skill", skill, id);
            }
        }
        if let Some(req) = &def.required_skill {
            if content.skills.get(&req.skill).is_none() {
                return dangling("skill", &req.skill, id);
            }
        }
        match &def.unlock_effect {
            Some(UnlockEffect::Action(target)) => {
                if content.actions.get(target).is_none() {
                    return dangling("action", target, id);
                }
            }
            Some(UnlockEffect::HousingItem(target)) => {
                if content.housing_items.get(target).is_none() {
                    return dangling("housing item", target, id);
                }
            }
            Some(UnlockEffect::SpellSlot { .. }) | None => {}
        }
    }

    for (id, def) in &content.skills {
        for bonus in &def.bonuses {
            match &bonus.effect {
                SkillBonusEffect::UnlockAction(target) => {
                    if content.actions.get(target).is_none() {
                        return dangling("action", target, id);
                    }
                }
                SkillBonusEffect::UnlockSkill(target) => {
                    if content.skills.get(target).is_none() {
                        return dangling("skill", target, id);
                    }
                }
                SkillBonusEffect::SpellSlot { .. } => {}
            }
        }
    }

    for (id, def) in &content.dungeons {
        for enemy in &def.enemies {
            if content.enemies.get(enemy).is_none() {
                return dangling("enemy", enemy, id);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_mixed_sections() {
        let mut loader = Loader::new();
        loader
            .load_str(
                r#"(
                    skills: [
                        (id: "arcane", name: "Arcane", xp_table: [0.0, 50.0]),
                    ],
                    actions: [
                        (
                            id: "gain-gold",
                            name: "Gain Gold",
                            category: Resource,
                            outputs: { "gold": 1.0 },
                            stamina_cost: 1.0,
                            skill_xp: { "arcane": 1.0 },
                            rank_curve: Standard,
                            starter: true,
                        ),
                    ],
                )"#,
            )
            .unwrap();
        let content = loader.finish().unwrap();
        assert_eq!(content.actions.len(), 1);
        assert_eq!(content.skills.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let doc = r#"(skills: [(id: "arcane", name: "Arcane", xp_table: [0.0])])"#;
        let mut loader = Loader::new();
        loader.load_str(doc).unwrap();
        let err = loader.load_str(doc).unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(_)));
    }

    #[test]
    fn test_dangling_skill_reference_rejected() {
        let mut loader = Loader::new();
        loader
            .load_str(
                r#"(
                    actions: [
                        (
                            id: "gain-gold",
                            name: "Gain Gold",
                            category: Resource,
                            skill_xp: { "arcane": 1.0 },
                        ),
                    ],
                )"#,
            )
            .unwrap();
        let err = loader.finish().unwrap_err();
        assert!(matches!(err, Error::DanglingReference { kind: "skill", .. }));
    }

    #[test]
    fn test_dangling_dungeon_enemy_rejected() {
        let mut loader = Loader::new();
        loader
            .load_str(
                r#"(
                    dungeons: [
                        (
                            id: "dark-forest",
                            name: "Dark Forest",
                            enemies: ["slime"],
                            difficulty: 1,
                            level_requirement: 1,
                        ),
                    ],
                )"#,
            )
            .unwrap();
        assert!(loader.finish().is_err());
    }
}
