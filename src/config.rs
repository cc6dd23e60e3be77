use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

// --- Config ---

/// Chunk generation settings. Every field has a default, so an empty file is valid.
#[derive(Clone, Debug, Deserialize)]
pub struct GenerateConfig {
    #[serde(default = "default_seed")]
    pub seed: i64,
    #[serde(default)]
    pub surface: Surface,
    /// Layers of bedrock at the bottom of each column; none when unset.
    #[serde(default)]
    pub bedrock: Option<Bedrock>,
    /// Water source fluid fills columns up to this height.
    #[serde(default)]
    pub sea_level: Option<i32>,
    /// Overrides the biome the surface recipe implies.
    #[serde(default)]
    pub biome: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            surface: Surface::default(),
            bedrock: None,
            sea_level: None,
            biome: None,
            environment: None,
        }
    }
}

fn default_seed() -> i64 {
    1337
}

#[derive(Clone, Debug, Deserialize)]
pub struct Surface {
    #[serde(default = "default_height")]
    pub height: i32,
    /// Recipe id for the top `topsoil` voxels of each column.
    #[serde(default = "default_recipe")]
    pub recipe: String,
    #[serde(default = "default_topsoil")]
    pub topsoil: i32,
    /// Recipe id for everything below the topsoil.
    #[serde(default = "default_subsoil")]
    pub subsoil: String,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            height: default_height(),
            recipe: default_recipe(),
            topsoil: default_topsoil(),
            subsoil: default_subsoil(),
        }
    }
}

fn default_height() -> i32 {
    64
}
fn default_recipe() -> String {
    "grass".to_string()
}
fn default_topsoil() -> i32 {
    3
}
fn default_subsoil() -> String {
    "stone".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct Bedrock {
    #[serde(default = "default_bedrock_layers")]
    pub layers: i32,
    #[serde(default = "default_bedrock_recipe")]
    pub recipe: String,
}

fn default_bedrock_layers() -> i32 {
    1
}
fn default_bedrock_recipe() -> String {
    "bedrock".to_string()
}

impl GenerateConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = GenerateConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.seed, 1337);
        assert_eq!(cfg.surface.height, 64);
        assert_eq!(cfg.surface.recipe, "grass");
        assert!(cfg.bedrock.is_none());
    }

    #[test]
    fn partial_tables_fill_in() {
        let cfg = GenerateConfig::from_toml_str(
            r#"
            seed = -5
            sea_level = 70
            biome = "Desert"
            [surface]
            recipe = "sand"
            [bedrock]
        "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, -5);
        assert_eq!(cfg.sea_level, Some(70));
        assert_eq!(cfg.surface.recipe, "sand");
        assert_eq!(cfg.surface.subsoil, "stone");
        let bedrock = cfg.bedrock.unwrap();
        assert_eq!(bedrock.layers, 1);
        assert_eq!(bedrock.recipe, "bedrock");
        assert_eq!(cfg.biome.as_deref(), Some("Desert"));
    }
}
