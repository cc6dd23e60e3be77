use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::category::{Category, DrawType, MaterialKind, Opacity};
use crate::error::CatalogueError;

const BUILTIN_CATALOGUE: &str = include_str!("../assets/catalogue.toml");

/// Static metadata for one known block id.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockDefinition {
    pub id: String,
    pub display_name: String,
    pub category: Category,
    pub hardness: f32,
    pub light_emission: u8,
    pub can_rotate: bool,
}

impl BlockDefinition {
    #[inline]
    pub fn material_kind(&self) -> MaterialKind {
        self.category.material_kind()
    }
    #[inline]
    pub fn draw_type(&self) -> DrawType {
        self.category.draw_type()
    }
    #[inline]
    pub fn opacity(&self) -> Opacity {
        self.category.opacity()
    }
    #[inline]
    pub fn legacy_category(&self) -> &'static str {
        self.category.legacy_name()
    }
    pub fn is_opaque(&self) -> bool {
        self.opacity() == Opacity::Opaque
    }
    pub fn is_transparent(&self) -> bool {
        self.opacity() == Opacity::Transparent
    }
    pub fn is_solid(&self) -> bool {
        self.material_kind() == MaterialKind::Solid
    }
    pub fn is_fluid(&self) -> bool {
        self.material_kind() == MaterialKind::Fluid
    }
}

/// Pick-list label for an id: underscores become spaces.
pub fn display_name_for(id: &str) -> String {
    id.replace('_', " ")
}

/// Ordered set of block definitions grouped by category.
#[derive(Clone, Debug, Default)]
pub struct Catalogue {
    entries: Vec<BlockDefinition>,
    by_id: HashMap<String, usize>,
}

impl Catalogue {
    /// The catalogue compiled into this crate.
    pub fn builtin() -> Result<Self, CatalogueError> {
        Self::from_toml_str(BUILTIN_CATALOGUE)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, CatalogueError> {
        let file: CatalogueFile = toml::from_str(toml_str)?;
        let mut cat = Catalogue::default();
        for group in file.group {
            let category = Category::from_key(&group.category)
                .ok_or_else(|| CatalogueError::UnknownCategory(group.category.clone()))?;
            for id in group.ids {
                if id.is_empty() {
                    return Err(CatalogueError::EmptyId);
                }
                if cat.by_id.contains_key(&id) {
                    return Err(CatalogueError::DuplicateId(id));
                }
                cat.by_id.insert(id.clone(), cat.entries.len());
                cat.entries.push(BlockDefinition {
                    display_name: display_name_for(&id),
                    id,
                    category,
                    hardness: 1.0,
                    light_emission: 0,
                    can_rotate: category.can_rotate(),
                });
            }
        }

        let mut overrides: Vec<(String, OverrideDef)> = file.overrides.into_iter().collect();
        // Report orphans deterministically.
        overrides.sort_by(|a, b| a.0.cmp(&b.0));
        for (id, ov) in overrides {
            let Some(&i) = cat.by_id.get(&id) else {
                return Err(CatalogueError::OrphanOverride(id));
            };
            let def = &mut cat.entries[i];
            if let Some(name) = ov.display_name {
                def.display_name = name;
            }
            if let Some(h) = ov.hardness {
                def.hardness = h;
            }
            if let Some(l) = ov.light_emission {
                def.light_emission = l.min(15);
            }
            if let Some(r) = ov.can_rotate {
                def.can_rotate = r;
            }
        }
        Ok(cat)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&BlockDefinition> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Definitions in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.entries.iter()
    }

    pub fn ids_in_category(&self, category: Category) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |d| d.category == category)
            .map(|d| d.id.as_str())
    }

    /// Categories that have at least one block, in first-appearance order.
    pub fn categories(&self) -> Vec<Category> {
        let mut out: Vec<Category> = Vec::new();
        for d in &self.entries {
            if !out.contains(&d.category) {
                out.push(d.category);
            }
        }
        out
    }
}

// --- Config ---

#[derive(Deserialize)]
struct CatalogueFile {
    #[serde(default)]
    group: Vec<GroupDef>,
    #[serde(default)]
    overrides: HashMap<String, OverrideDef>,
}

#[derive(Deserialize)]
struct GroupDef {
    category: String,
    ids: Vec<String>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct OverrideDef {
    display_name: Option<String>,
    hardness: Option<f32>,
    light_emission: Option<u8>,
    can_rotate: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_parses_and_starts_with_empty() {
        let cat = Catalogue::builtin().expect("builtin catalogue");
        assert!(cat.len() > 250);
        assert_eq!(cat.iter().next().map(|d| d.id.as_str()), Some("Empty"));
        assert_eq!(cat.categories().len(), Category::COUNT);
    }

    #[test]
    fn overrides_apply() {
        let cat = Catalogue::builtin().unwrap();
        let lava = cat.get("Lava_Source").unwrap();
        assert_eq!(lava.light_emission, 15);
        assert!(lava.is_fluid());
        let obsidian = cat.get("Rock_Magma_Cooled").unwrap();
        assert_eq!(obsidian.display_name, "Obsidian");
        let trunk = cat.get("Wood_Oak_Trunk").unwrap();
        assert!(trunk.can_rotate);
        assert_eq!(trunk.display_name, "Wood Oak Trunk");
        assert_eq!(trunk.legacy_category(), "Wood");
    }

    #[test]
    fn structural_errors() {
        let dup = r#"
            [[group]]
            category = "rock"
            ids = ["A", "A"]
        "#;
        assert!(matches!(
            Catalogue::from_toml_str(dup),
            Err(CatalogueError::DuplicateId(id)) if id == "A"
        ));
        let bad = r#"
            [[group]]
            category = "lava_lamps"
            ids = ["A"]
        "#;
        assert!(matches!(
            Catalogue::from_toml_str(bad),
            Err(CatalogueError::UnknownCategory(_))
        ));
        let orphan = r#"
            [overrides.Nope]
            hardness = 2.0
        "#;
        assert!(matches!(
            Catalogue::from_toml_str(orphan),
            Err(CatalogueError::OrphanOverride(_))
        ));
    }
}
