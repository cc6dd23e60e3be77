//! Ingest of block placements produced by content importers.

use strata_blocks::{BlockIdentity, BlockRegistry, FULL_FLUID_LEVEL, MaterialTranslator};

use crate::chunk::VoxelChunk;

/// One imported voxel: chunk-local position, a block name in any accepted form, and an
/// optional rotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockPlacement {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub name: String,
    pub rotation: Option<i32>,
}

impl BlockPlacement {
    pub fn new(x: i32, y: i32, z: i32, name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            z,
            name: name.into(),
            rotation: None,
        }
    }

    pub fn rotated(mut self, rotation: i32) -> Self {
        self.rotation = Some(rotation);
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementReport {
    pub placed: usize,
    /// Fluid sources routed to the fluid plane instead of the block palette.
    pub fluids: usize,
    pub out_of_bounds: usize,
    /// Placed with rotation 0 because the requested rotation was outside 0..=63.
    pub invalid_rotation: usize,
}

#[inline]
fn in_bounds(p: &BlockPlacement) -> bool {
    use crate::chunk::{CHUNK_HEIGHT, CHUNK_SIZE};
    (0..CHUNK_SIZE).contains(&p.x)
        && (0..CHUNK_SIZE).contains(&p.z)
        && (0..CHUNK_HEIGHT).contains(&p.y)
}

/// Writes `placements` into `chunk`, resolving names through `translator`.
///
/// Out-of-bounds entries are skipped without error.
pub fn apply_placements(
    chunk: &mut VoxelChunk,
    placements: &[BlockPlacement],
    translator: &MaterialTranslator,
    registry: &BlockRegistry,
) -> PlacementReport {
    let mut report = PlacementReport::default();
    for p in placements {
        if !in_bounds(p) {
            report.out_of_bounds += 1;
            continue;
        }
        let id = translator.resolve_name(registry, &p.name);
        let block = match BlockIdentity::new(id, p.rotation.unwrap_or(0)) {
            Ok(b) => b,
            Err(_) => {
                report.invalid_rotation += 1;
                match BlockIdentity::of(id) {
                    Ok(b) => b,
                    Err(_) => continue,
                }
            }
        };
        if block.is_fluid() {
            chunk.set_block(p.x, p.y, p.z, &BlockIdentity::empty());
            if chunk.set_fluid(p.x, p.y, p.z, block.id(), FULL_FLUID_LEVEL) {
                report.fluids += 1;
            }
            continue;
        }
        chunk.set_block(p.x, p.y, p.z, &block);
        report.placed += 1;
    }
    if report.out_of_bounds > 0 || report.invalid_rotation > 0 {
        log::warn!(
            target: "chunk",
            "chunk ({}, {}): skipped {} out-of-bounds placements, reset {} invalid rotations",
            chunk.cx(),
            chunk.cz(),
            report.out_of_bounds,
            report.invalid_rotation
        );
    }
    report
}
