use std::collections::BTreeMap;
use std::error::Error;

use rayon::prelude::*;
use strata_blocks::{BlockIdentity, BlockRegistry, FULL_FLUID_LEVEL};
use strata_chunk::{CHUNK_HEIGHT, CHUNK_SIZE, VoxelChunk};
use strata_terrain::{RecipeBook, TerrainRecipe};

use crate::config::GenerateConfig;

/// Generation settings with every recipe id resolved against a book.
pub struct Plan<'a> {
    seed: i64,
    height: i32,
    topsoil: i32,
    surface: &'a TerrainRecipe,
    subsoil: &'a TerrainRecipe,
    bedrock: Option<(i32, &'a TerrainRecipe)>,
    sea_level: Option<i32>,
    biome: Option<&'a str>,
    environment: Option<&'a str>,
}

fn recipe<'a>(book: &'a RecipeBook, id: &str) -> Result<&'a TerrainRecipe, Box<dyn Error>> {
    book.get(id)
        .ok_or_else(|| format!("unknown recipe '{id}'").into())
}

impl<'a> Plan<'a> {
    pub fn new(cfg: &'a GenerateConfig, book: &'a RecipeBook) -> Result<Self, Box<dyn Error>> {
        let surface = recipe(book, &cfg.surface.recipe)?;
        let subsoil = recipe(book, &cfg.surface.subsoil)?;
        let bedrock = match &cfg.bedrock {
            Some(b) => Some((b.layers.max(0), recipe(book, &b.recipe)?)),
            None => None,
        };
        Ok(Self {
            seed: cfg.seed,
            height: cfg.surface.height.clamp(0, CHUNK_HEIGHT - 1),
            topsoil: cfg.surface.topsoil.max(0),
            surface,
            subsoil,
            bedrock,
            sea_level: cfg.sea_level.map(|s| s.clamp(0, CHUNK_HEIGHT - 1)),
            biome: cfg.biome.as_deref().or(surface.biome.as_deref()),
            environment: cfg.environment.as_deref(),
        })
    }

    fn block_at(&self, wx: i32, y: i32, wz: i32) -> BlockIdentity {
        if let Some((layers, bedrock)) = self.bedrock {
            if y < layers {
                return bedrock.evaluate(self.seed, wx, wz, y);
            }
        }
        let depth = self.height - y;
        if depth < self.topsoil {
            self.surface.evaluate(self.seed, wx, wz, depth)
        } else {
            self.subsoil.evaluate(self.seed, wx, wz, depth - self.topsoil)
        }
    }

    pub fn fill(&self, cx: i32, cz: i32) -> VoxelChunk {
        let mut chunk = VoxelChunk::new(cx, cz);
        let (ox, oz) = chunk.origin();
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let (wx, wz) = (ox + x, oz + z);
                for y in 0..=self.height {
                    let block = self.block_at(wx, y, wz);
                    chunk.set_block(x, y, z, &block);
                }
                if let Some(sea) = self.sea_level {
                    for y in self.height + 1..=sea {
                        chunk.set_fluid(x, y, z, "Water_Source", FULL_FLUID_LEVEL);
                    }
                }
                if let Some(biome) = self.biome {
                    chunk.set_biome(x, z, biome);
                }
                if let Some(env) = self.environment {
                    chunk.set_environment(x, z, env);
                }
            }
        }
        chunk
    }
}

/// Fills the `(2r+1)²` chunks centred on `(cx, cz)`, one rayon task per chunk.
pub fn generate_area(plan: &Plan<'_>, cx: i32, cz: i32, radius: i32) -> Vec<VoxelChunk> {
    let radius = radius.max(0);
    let coords: Vec<(i32, i32)> = (cz - radius..=cz + radius)
        .flat_map(|z| (cx - radius..=cx + radius).map(move |x| (x, z)))
        .collect();
    let chunks: Vec<VoxelChunk> = coords
        .par_iter()
        .map(|&(x, z)| plan.fill(x, z))
        .collect();
    log::info!(target: "generate", "generated {} chunks", chunks.len());
    chunks
}

/// Per-chunk counts keyed by registry palette index.
#[derive(Clone, Debug)]
pub struct ChunkSummary {
    pub cx: i32,
    pub cz: i32,
    pub highest: Option<i32>,
    pub blocks: BTreeMap<u32, (String, usize)>,
    pub fluid_voxels: usize,
}

pub fn summarize(chunk: &VoxelChunk, registry: &BlockRegistry) -> ChunkSummary {
    let mut blocks: BTreeMap<u32, (String, usize)> = BTreeMap::new();
    let mut fluid_voxels = 0;
    for section in chunk.sections() {
        let mut counts = vec![0usize; section.palette().len()];
        for &i in section.block_indices() {
            counts[i as usize] += 1;
        }
        for (block, n) in section.palette().iter().zip(counts) {
            if n == 0 || block.is_empty() {
                continue;
            }
            let entry = blocks
                .entry(registry.index_of(block.id()))
                .or_insert_with(|| (block.id().to_string(), 0));
            entry.1 += n;
        }
        fluid_voxels += section.fluid_ids().iter().filter(|&&f| f != 0).count();
    }
    ChunkSummary {
        cx: chunk.cx(),
        cz: chunk.cz(),
        highest: chunk.highest_non_air_overall(),
        blocks,
        fluid_voxels,
    }
}
