use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use strata_blocks::BlockIdentity;

use crate::error::RecipeError;
use crate::recipe::{Mode, RecipeId, Row, TerrainRecipe, compare_by_name};

// (id, name, block, biome)
const BUILTIN: &[(&str, &str, &str, Option<&str>)] = &[
    ("grass", "Grass", "Soil_Grass", Some("Grassland")),
    ("lush_grass", "Lush Grass", "Soil_Grass_Lush", Some("Tropical")),
    ("dirt", "Dirt", "Soil_Dirt", None),
    ("sand", "Sand", "Soil_Sand", Some("Desert")),
    ("red_sand", "Red Sand", "Soil_Sand_Red", Some("Desert")),
    ("snow", "Snow", "Soil_Snow", Some("Tundra")),
    ("gravel", "Gravel", "Soil_Gravel", None),
    ("clay", "Clay", "Soil_Clay", None),
    ("mud", "Mud", "Soil_Mud", Some("Swamp")),
    ("stone", "Stone", "Rock_Stone", None),
    ("cobblestone", "Cobblestone", "Rock_Stone_Cobble", None),
    ("sandstone", "Sandstone", "Rock_Sandstone", Some("Desert")),
    ("basalt", "Basalt", "Rock_Basalt", Some("Volcanic")),
    ("bedrock", "Bedrock", "Rock_Bedrock", None),
    ("ice", "Ice", "Rock_Ice", Some("Tundra")),
];

/// A set of named terrain recipes, in definition order.
#[derive(Clone, Debug, Default)]
pub struct RecipeBook {
    recipes: Vec<TerrainRecipe>,
    by_id: HashMap<RecipeId, usize>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fifteen single-block soil and rock recipes.
    pub fn builtin() -> Self {
        let mut book = RecipeBook::new();
        for &(id, name, block, biome) in BUILTIN {
            let block = match BlockIdentity::of(block) {
                Ok(b) => b,
                Err(_) => continue,
            };
            book.push(TerrainRecipe::single(id, name, block, biome));
        }
        book
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RecipeError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| RecipeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let book = Self::from_toml_str(&s)?;
        log::info!(target: "terrain", "loaded {} recipes from {}", book.len(), path.display());
        Ok(book)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RecipeError> {
        let file: RecipeFile = toml::from_str(toml_str)?;
        let mut book = RecipeBook::new();
        for def in file.recipe {
            let id = RecipeId(def.id);
            if book.by_id.contains_key(&id) {
                return Err(RecipeError::DuplicateId(id.0));
            }
            if def.rows.is_empty() {
                return Err(RecipeError::NoRows(id.0));
            }
            let mut rows = Vec::with_capacity(def.rows.len());
            for (i, r) in def.rows.into_iter().enumerate() {
                let block = BlockIdentity::new(&r.block, r.rotation).map_err(|source| {
                    RecipeError::InvalidBlock {
                        recipe: id.0.clone(),
                        row: i,
                        source,
                    }
                })?;
                rows.push(Row::new(block, r.weight));
            }
            if def.mode != Mode::Simple && rows.iter().all(|r| r.weight == 0) {
                log::warn!(target: "terrain", "recipe {id} has zero total weight; it will always use its first row");
            }
            book.push(TerrainRecipe {
                name: def.name.unwrap_or_else(|| id.0.clone()),
                id,
                rows,
                mode: def.mode,
                scale: def.scale,
                biome: def.biome,
                colour: def.colour,
            });
        }
        Ok(book)
    }

    /// Adds or replaces a recipe by id.
    pub fn push(&mut self, recipe: TerrainRecipe) {
        match self.by_id.get(&recipe.id) {
            Some(&i) => self.recipes[i] = recipe,
            None => {
                self.by_id.insert(recipe.id.clone(), self.recipes.len());
                self.recipes.push(recipe);
            }
        }
    }

    /// Overlays `other` on this book; recipes with the same id are replaced.
    pub fn extend(&mut self, other: RecipeBook) {
        for r in other.recipes {
            self.push(r);
        }
    }

    pub fn get(&self, id: &str) -> Option<&TerrainRecipe> {
        self.by_id
            .get(&RecipeId(id.to_string()))
            .map(|&i| &self.recipes[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TerrainRecipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn sorted_by_name(&self) -> Vec<&TerrainRecipe> {
        let mut v: Vec<&TerrainRecipe> = self.recipes.iter().collect();
        v.sort_by(|a, b| compare_by_name(a, b));
        v
    }

    pub fn for_biome<'a>(&'a self, biome: &'a str) -> impl Iterator<Item = &'a TerrainRecipe> {
        self.recipes
            .iter()
            .filter(move |r| r.biome.as_deref() == Some(biome))
    }
}

// --- Config ---

#[derive(Deserialize)]
struct RecipeFile {
    #[serde(default)]
    recipe: Vec<RecipeDef>,
}

#[derive(Deserialize)]
struct RecipeDef {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    mode: Mode,
    #[serde(default = "default_scale")]
    scale: f32,
    #[serde(default)]
    biome: Option<String>,
    #[serde(default)]
    colour: Option<u32>,
    #[serde(default)]
    rows: Vec<RowDef>,
}

#[derive(Deserialize)]
struct RowDef {
    block: String,
    #[serde(default)]
    rotation: i32,
    #[serde(default = "default_weight")]
    weight: u32,
}

fn default_scale() -> f32 {
    1.0
}

fn default_weight() -> u32 {
    1000
}
