//! Palette-compressed voxel sections, 320-high chunks, and placement ingest.
#![forbid(unsafe_code)]

pub mod chunk;
pub mod placement;
pub mod section;

pub use chunk::{
    BlockHealth, CHUNK_HEIGHT, CHUNK_SIZE, DEFAULT_BIOME, DEFAULT_ENVIRONMENT, DEFAULT_TINT,
    EntityKind, EntityRecord, PrefabMarker, SECTION_COUNT, VoxelChunk, pack_health_key,
    unpack_health_key,
};
pub use placement::{BlockPlacement, PlacementReport, apply_placements};
pub use section::{NO_FLUID, SECTION_SIZE, SECTION_VOLUME, Section, voxel_index};
