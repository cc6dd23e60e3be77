use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use strata_blocks::BlockIdentity;

use crate::colour::block_colour;
use crate::rng::JavaRandom;

/// How a recipe picks among its rows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Always the first row.
    #[default]
    Simple,
    /// Independent weighted draw per voxel.
    Noise,
    /// Weighted draw per coarse cell, giving patches instead of speckle.
    Blobs,
    /// Row weights are layer thicknesses, selected by depth below the surface.
    Layered,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub block: BlockIdentity,
    /// Relative weight for `Noise`/`Blobs`, thickness for `Layered`.
    pub weight: u32,
}

impl Row {
    pub fn new(block: BlockIdentity, weight: u32) -> Self {
        Self { block, weight }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(pub String);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A declarative block list plus the rule for choosing among it.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainRecipe {
    pub id: RecipeId,
    pub name: String,
    pub rows: Vec<Row>,
    pub mode: Mode,
    pub scale: f32,
    pub biome: Option<String>,
    /// Explicit ARGB display colour.
    pub colour: Option<u32>,
}

impl TerrainRecipe {
    /// One block, `Simple` mode, weight 1000.
    pub fn single(id: &str, name: &str, block: BlockIdentity, biome: Option<&str>) -> Self {
        Self {
            id: RecipeId(id.to_string()),
            name: name.to_string(),
            rows: vec![Row::new(block, 1000)],
            mode: Mode::Simple,
            scale: 1.0,
            biome: biome.map(str::to_string),
            colour: None,
        }
    }

    pub fn primary_block(&self) -> BlockIdentity {
        match self.rows.first() {
            Some(r) => r.block.clone(),
            None => BlockIdentity::empty(),
        }
    }

    /// Explicit colour if set, otherwise derived from the primary block id.
    pub fn effective_colour(&self) -> u32 {
        match self.colour {
            Some(c) => c,
            None => block_colour(self.primary_block().id()),
        }
    }

    /// Block for a position. `x`/`y` are horizontal, `z` is depth below the surface.
    ///
    /// Pure in its inputs; never fails. An empty row list yields `Empty`.
    pub fn evaluate(&self, seed: i64, x: i32, y: i32, z: i32) -> BlockIdentity {
        let first = match self.rows.first() {
            Some(r) => &r.block,
            None => return BlockIdentity::empty(),
        };
        if self.rows.len() == 1 {
            return first.clone();
        }
        match self.mode {
            Mode::Simple => first.clone(),
            Mode::Noise => self.weighted(noise_seed(seed, x, y, z)),
            Mode::Blobs => self.weighted(blob_seed(seed, self.scale, x, y, z)),
            Mode::Layered => self.layered(z),
        }
    }

    fn weighted(&self, hash: i64) -> BlockIdentity {
        let total: u64 = self.rows.iter().map(|r| r.weight as u64).sum();
        if total == 0 || total > i32::MAX as u64 {
            return self.rows[0].block.clone();
        }
        let roll = JavaRandom::new(hash).next_int(total as i32) as u64;
        let mut cumulative = 0u64;
        for row in &self.rows {
            cumulative += row.weight as u64;
            if roll < cumulative {
                return row.block.clone();
            }
        }
        self.rows[0].block.clone()
    }

    fn layered(&self, depth: i32) -> BlockIdentity {
        let mut bottom = 0i64;
        for row in &self.rows {
            bottom += row.weight as i64;
            if (depth as i64) < bottom {
                return row.block.clone();
            }
        }
        self.rows[self.rows.len() - 1].block.clone()
    }
}

/// Pick-list order: case-insensitive by name.
pub fn compare_by_name(a: &TerrainRecipe, b: &TerrainRecipe) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

#[inline]
pub fn noise_seed(seed: i64, x: i32, y: i32, z: i32) -> i64 {
    seed.wrapping_add((x as i64).wrapping_mul(65537))
        .wrapping_add((y as i64).wrapping_mul(4099))
        .wrapping_add((z as i64).wrapping_mul(257))
}

/// Coarse-cell hash: horizontal axes bucket at `16 * scale`, depth at `8 * scale`.
#[inline]
pub fn blob_seed(seed: i64, scale: f32, x: i32, y: i32, z: i32) -> i64 {
    let scale = scale as f64;
    let sx = x as f64 / (16.0 * scale);
    let sy = y as f64 / (16.0 * scale);
    let sz = z as f64 / (8.0 * scale);
    seed.wrapping_add((sx * 314159.0) as i64)
        .wrapping_add((sy * 271828.0) as i64)
        .wrapping_add((sz * 141421.0) as i64)
}
