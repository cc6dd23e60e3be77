use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use hashbrown::HashMap;
use strata_blocks::BlockIdentity;

use crate::section::{FULL_SKY_LIGHT, SECTION_SIZE, Section};

pub const CHUNK_SIZE: i32 = 32;
pub const SECTION_COUNT: usize = 10;
pub const CHUNK_HEIGHT: i32 = SECTION_SIZE * SECTION_COUNT as i32;
const COLUMNS: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

pub const DEFAULT_BIOME: &str = "Grassland";
pub const DEFAULT_ENVIRONMENT: &str = "Default";
/// Lawn green, fully opaque.
pub const DEFAULT_TINT: u32 = 0xFF7C_FC00;

/// Damage state of one voxel. Voxels without an entry are at full health.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockHealth {
    /// In `[0, 1)`.
    pub health: f32,
    /// Milliseconds since the Unix epoch.
    pub last_damage_time: i64,
}

/// Packs chunk-local coordinates into a health-map key: `x | y << 5 | z << 14`.
#[inline]
pub fn pack_health_key(x: i32, y: i32, z: i32) -> u32 {
    ((x & 31) | ((y & 511) << 5) | ((z & 31) << 14)) as u32
}

#[inline]
pub fn unpack_health_key(key: u32) -> (i32, i32, i32) {
    let k = key as i32;
    (k & 31, (k >> 5) & 511, (k >> 14) & 31)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefabMarker {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub category: String,
    pub path: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// Any entity type the store does not treat specially.
    Generic { entity_type: String },
    SpawnMarker { marker_id: String },
}

impl EntityKind {
    pub fn type_name(&self) -> &str {
        match self {
            EntityKind::Generic { entity_type } => entity_type,
            EntityKind::SpawnMarker { .. } => "SpawnMarker",
        }
    }
}

/// An entity to export with the chunk; position is in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityRecord {
    pub kind: EntityKind,
    pub position: [f64; 3],
    /// Yaw, pitch, roll in degrees.
    pub rotation: [f32; 3],
    pub properties: BTreeMap<String, String>,
}

impl EntityRecord {
    pub fn new(kind: EntityKind, x: f64, y: f64, z: f64) -> Self {
        Self {
            kind,
            position: [x, y, z],
            rotation: [0.0; 3],
            properties: BTreeMap::new(),
        }
    }

    pub fn spawn_marker(marker_id: &str, x: f64, y: f64, z: f64) -> Self {
        Self::new(
            EntityKind::SpawnMarker {
                marker_id: marker_id.to_string(),
            },
            x,
            y,
            z,
        )
    }
}

#[inline]
fn in_columns(x: i32, z: i32) -> bool {
    (0..CHUNK_SIZE).contains(&x) && (0..CHUNK_SIZE).contains(&z)
}

#[inline]
fn in_chunk(x: i32, y: i32, z: i32) -> bool {
    in_columns(x, z) && (0..CHUNK_HEIGHT).contains(&y)
}

#[inline]
fn column(x: i32, z: i32) -> usize {
    (z * CHUNK_SIZE + x) as usize
}

/// A 32×320×32 column of voxels plus per-column metadata and sparse block damage.
///
/// Voxel accessors take chunk-local coordinates. Anything outside the chunk reads as a
/// default (air, no fluid, full sky light) and writes are ignored.
#[derive(Clone, Debug)]
pub struct VoxelChunk {
    cx: i32,
    cz: i32,
    sections: Vec<Section>,
    heightmap: Box<[i16]>,
    biomes: Box<[Option<Box<str>>]>,
    environments: Box<[Option<Box<str>>]>,
    tints: Box<[u32]>,
    spawn_densities: Box<[Option<f32>]>,
    spawn_tags: Box<[Option<Box<str>>]>,
    water_tints: Box<[Option<Box<str>>]>,
    prefab_markers: Vec<PrefabMarker>,
    entities: Vec<EntityRecord>,
    health: HashMap<u32, BlockHealth>,
}

impl VoxelChunk {
    pub fn new(cx: i32, cz: i32) -> Self {
        Self {
            cx,
            cz,
            sections: (0..SECTION_COUNT).map(|_| Section::new()).collect(),
            heightmap: vec![0i16; COLUMNS].into_boxed_slice(),
            biomes: vec![None; COLUMNS].into_boxed_slice(),
            environments: vec![None; COLUMNS].into_boxed_slice(),
            tints: vec![DEFAULT_TINT; COLUMNS].into_boxed_slice(),
            spawn_densities: vec![None; COLUMNS].into_boxed_slice(),
            spawn_tags: vec![None; COLUMNS].into_boxed_slice(),
            water_tints: vec![None; COLUMNS].into_boxed_slice(),
            prefab_markers: Vec::new(),
            entities: Vec::new(),
            health: HashMap::new(),
        }
    }

    #[inline]
    pub fn cx(&self) -> i32 {
        self.cx
    }

    #[inline]
    pub fn cz(&self) -> i32 {
        self.cz
    }

    /// World-space X/Z of local voxel (0, 0).
    pub fn origin(&self) -> (i32, i32) {
        (self.cx * CHUNK_SIZE, self.cz * CHUNK_SIZE)
    }

    pub fn contains_world(&self, wx: f64, wz: f64) -> bool {
        let (ox, oz) = self.origin();
        let (ox, oz) = (ox as f64, oz as f64);
        let size = CHUNK_SIZE as f64;
        wx >= ox && wx < ox + size && wz >= oz && wz < oz + size
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[inline]
    fn section(&self, y: i32) -> &Section {
        &self.sections[(y >> 5) as usize]
    }

    #[inline]
    fn section_mut(&mut self, y: i32) -> &mut Section {
        &mut self.sections[(y >> 5) as usize]
    }

    // --- voxels ---

    pub fn block(&self, x: i32, y: i32, z: i32) -> BlockIdentity {
        if !in_chunk(x, y, z) {
            return BlockIdentity::empty();
        }
        self.section(y).block(x, y, z).clone()
    }

    /// Writes a block and keeps the column height current.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: &BlockIdentity) {
        if !in_chunk(x, y, z) {
            return;
        }
        self.section_mut(y).set_block(x, y, z, block);
        let col = column(x, z);
        let height = self.heightmap[col] as i32;
        if !block.is_empty() {
            if y > height {
                self.heightmap[col] = y as i16;
            }
        } else if y == height {
            self.heightmap[col] = self.scan_down(x, y - 1, z).unwrap_or(0) as i16;
        }
    }

    fn scan_down(&self, x: i32, from_y: i32, z: i32) -> Option<i32> {
        (0..=from_y)
            .rev()
            .find(|&y| !self.section(y).block(x, y, z).is_empty())
    }

    pub fn rotation(&self, x: i32, y: i32, z: i32) -> u8 {
        if !in_chunk(x, y, z) {
            return 0;
        }
        self.section(y).rotation(x, y, z)
    }

    pub fn set_rotation(&mut self, x: i32, y: i32, z: i32, rotation: u8) {
        if in_chunk(x, y, z) {
            self.section_mut(y).set_rotation(x, y, z, rotation);
        }
    }

    pub fn fluid(&self, x: i32, y: i32, z: i32) -> Option<(&str, u8)> {
        if !in_chunk(x, y, z) {
            return None;
        }
        self.section(y).fluid(x, y, z)
    }

    pub fn set_fluid(&mut self, x: i32, y: i32, z: i32, name: &str, level: u8) -> bool {
        in_chunk(x, y, z) && self.section_mut(y).set_fluid(x, y, z, name, level)
    }

    pub fn clear_fluid(&mut self, x: i32, y: i32, z: i32) {
        if in_chunk(x, y, z) {
            self.section_mut(y).clear_fluid(x, y, z);
        }
    }

    pub fn block_light(&self, x: i32, y: i32, z: i32) -> u8 {
        if !in_chunk(x, y, z) {
            return 0;
        }
        self.section(y).block_light(x, y, z)
    }

    pub fn set_block_light(&mut self, x: i32, y: i32, z: i32, level: u8) {
        if in_chunk(x, y, z) {
            self.section_mut(y).set_block_light(x, y, z, level);
        }
    }

    /// Full sky light outside the chunk, including above the build limit.
    pub fn sky_light(&self, x: i32, y: i32, z: i32) -> u8 {
        if !in_chunk(x, y, z) {
            return FULL_SKY_LIGHT;
        }
        self.section(y).sky_light(x, y, z)
    }

    pub fn set_sky_light(&mut self, x: i32, y: i32, z: i32, level: u8) {
        if in_chunk(x, y, z) {
            self.section_mut(y).set_sky_light(x, y, z, level);
        }
    }

    pub fn has_rotations(&self) -> bool {
        self.sections.iter().any(Section::has_rotations)
    }

    // --- heights ---

    /// Recorded height of a column; 0 for empty columns and out-of-range coordinates.
    pub fn height(&self, x: i32, z: i32) -> i16 {
        if !in_columns(x, z) {
            return 0;
        }
        self.heightmap[column(x, z)]
    }

    pub fn set_height(&mut self, x: i32, z: i32, height: i16) {
        if in_columns(x, z) {
            self.heightmap[column(x, z)] = height;
        }
    }

    pub fn heightmap(&self) -> &[i16] {
        &self.heightmap
    }

    /// Top-down scan of one column.
    pub fn highest_non_air(&self, x: i32, z: i32) -> Option<i32> {
        if !in_columns(x, z) {
            return None;
        }
        self.scan_down(x, CHUNK_HEIGHT - 1, z)
    }

    pub fn highest_non_air_overall(&self) -> Option<i32> {
        (0..CHUNK_SIZE)
            .flat_map(|z| (0..CHUNK_SIZE).map(move |x| (x, z)))
            .filter_map(|(x, z)| self.highest_non_air(x, z))
            .max()
    }

    // --- column metadata ---

    pub fn biome(&self, x: i32, z: i32) -> &str {
        if !in_columns(x, z) {
            return DEFAULT_BIOME;
        }
        self.biomes[column(x, z)].as_deref().unwrap_or(DEFAULT_BIOME)
    }

    pub fn set_biome(&mut self, x: i32, z: i32, biome: &str) {
        if in_columns(x, z) {
            self.biomes[column(x, z)] = Some(biome.into());
        }
    }

    pub fn environment(&self, x: i32, z: i32) -> &str {
        if !in_columns(x, z) {
            return DEFAULT_ENVIRONMENT;
        }
        self.environments[column(x, z)]
            .as_deref()
            .unwrap_or(DEFAULT_ENVIRONMENT)
    }

    pub fn set_environment(&mut self, x: i32, z: i32, environment: &str) {
        if in_columns(x, z) {
            self.environments[column(x, z)] = Some(environment.into());
        }
    }

    /// ARGB grass tint.
    pub fn tint(&self, x: i32, z: i32) -> u32 {
        if !in_columns(x, z) {
            return DEFAULT_TINT;
        }
        self.tints[column(x, z)]
    }

    pub fn set_tint(&mut self, x: i32, z: i32, argb: u32) {
        if in_columns(x, z) {
            self.tints[column(x, z)] = argb;
        }
    }

    pub fn tints(&self) -> &[u32] {
        &self.tints
    }

    pub fn spawn_density(&self, x: i32, z: i32) -> Option<f32> {
        if !in_columns(x, z) {
            return None;
        }
        self.spawn_densities[column(x, z)]
    }

    pub fn set_spawn_density(&mut self, x: i32, z: i32, density: Option<f32>) {
        if in_columns(x, z) {
            self.spawn_densities[column(x, z)] = density;
        }
    }

    pub fn spawn_tag(&self, x: i32, z: i32) -> Option<&str> {
        if !in_columns(x, z) {
            return None;
        }
        self.spawn_tags[column(x, z)].as_deref()
    }

    pub fn set_spawn_tag(&mut self, x: i32, z: i32, tag: Option<&str>) {
        if in_columns(x, z) {
            self.spawn_tags[column(x, z)] = tag.map(Into::into);
        }
    }

    pub fn water_tint(&self, x: i32, z: i32) -> Option<&str> {
        if !in_columns(x, z) {
            return None;
        }
        self.water_tints[column(x, z)].as_deref()
    }

    pub fn set_water_tint(&mut self, x: i32, z: i32, tint: Option<&str>) {
        if in_columns(x, z) {
            self.water_tints[column(x, z)] = tint.map(Into::into);
        }
    }

    pub fn prefab_markers(&self) -> &[PrefabMarker] {
        &self.prefab_markers
    }

    pub fn add_prefab_marker(&mut self, marker: PrefabMarker) {
        self.prefab_markers.push(marker);
    }

    pub fn entities(&self) -> &[EntityRecord] {
        &self.entities
    }

    pub fn add_entity(&mut self, entity: EntityRecord) {
        self.entities.push(entity);
    }

    /// Keeps the records whose world position lies over this chunk; returns how many.
    pub fn place_entities(&mut self, entities: impl IntoIterator<Item = EntityRecord>) -> usize {
        let before = self.entities.len();
        for e in entities {
            if self.contains_world(e.position[0], e.position[2]) {
                self.entities.push(e);
            }
        }
        self.entities.len() - before
    }

    // --- block health ---

    /// Health of a voxel; 1.0 unless it has been damaged.
    pub fn health(&self, x: i32, y: i32, z: i32) -> f32 {
        if !in_chunk(x, y, z) {
            return 1.0;
        }
        self.health
            .get(&pack_health_key(x, y, z))
            .map_or(1.0, |h| h.health)
    }

    /// Clamps to `[0, 1]`; full health removes the entry. NaN is ignored.
    pub fn set_health_at(&mut self, x: i32, y: i32, z: i32, health: f32, time_ms: i64) {
        if !in_chunk(x, y, z) || health.is_nan() {
            return;
        }
        let key = pack_health_key(x, y, z);
        let health = health.clamp(0.0, 1.0);
        if health >= 1.0 {
            self.health.remove(&key);
        } else {
            self.health.insert(
                key,
                BlockHealth {
                    health,
                    last_damage_time: time_ms,
                },
            );
        }
    }

    /// [`set_health_at`](Self::set_health_at) stamped with the current wall-clock time.
    pub fn set_health(&mut self, x: i32, y: i32, z: i32, health: f32) {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        self.set_health_at(x, y, z, health, now);
    }

    pub fn health_record(&self, x: i32, y: i32, z: i32) -> Option<&BlockHealth> {
        if !in_chunk(x, y, z) {
            return None;
        }
        self.health.get(&pack_health_key(x, y, z))
    }

    pub fn health_entries(&self) -> impl Iterator<Item = (u32, &BlockHealth)> {
        self.health.iter().map(|(&k, v)| (k, v))
    }

    pub fn damaged_count(&self) -> usize {
        self.health.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_key_layout() {
        assert_eq!(pack_health_key(1, 0, 0), 1);
        assert_eq!(pack_health_key(0, 1, 0), 32);
        assert_eq!(pack_health_key(0, 0, 1), 1 << 14);
        assert_eq!(pack_health_key(31, 319, 31), 31 | (319 << 5) | (31 << 14));
        assert_eq!(unpack_health_key(pack_health_key(7, 300, 19)), (7, 300, 19));
    }

    #[test]
    fn heightmap_recomputes_downward() {
        let mut c = VoxelChunk::new(0, 0);
        let stone = BlockIdentity::stone();
        c.set_block(3, 10, 4, &stone);
        c.set_block(3, 40, 4, &stone);
        assert_eq!(c.height(3, 4), 40);
        c.set_block(3, 20, 4, &stone);
        assert_eq!(c.height(3, 4), 40);
        c.set_block(3, 40, 4, &BlockIdentity::empty());
        assert_eq!(c.height(3, 4), 20);
        c.set_block(3, 20, 4, &BlockIdentity::empty());
        c.set_block(3, 10, 4, &BlockIdentity::empty());
        assert_eq!(c.height(3, 4), 0);
        assert_eq!(c.highest_non_air(3, 4), None);
    }

    #[test]
    fn set_rotation_after_set_block_agrees_with_block() {
        let mut c = VoxelChunk::new(0, 0);
        c.set_block(1, 200, 1, &BlockIdentity::new("Wood_Oak_Trunk", 4).unwrap());
        c.set_rotation(1, 200, 1, 0);
        assert_eq!(c.rotation(1, 200, 1), 0);
        assert_eq!(c.block(1, 200, 1).rotation(), 0);
        assert!(!c.has_rotations());
        assert_eq!(c.height(1, 1), 200);
    }

    #[test]
    fn out_of_range_is_harmless() {
        let mut c = VoxelChunk::new(2, -1);
        c.set_block(0, 320, 0, &BlockIdentity::stone());
        c.set_block(-1, 0, 0, &BlockIdentity::stone());
        assert!(c.block(0, 320, 0).is_empty());
        assert_eq!(c.sky_light(0, 400, 0), 15);
        assert_eq!(c.sky_light(0, -1, 0), 15);
        assert_eq!(c.block_light(0, -1, 0), 0);
        assert_eq!(c.biome(32, 0), DEFAULT_BIOME);
        assert_eq!(c.environment(0, -3), DEFAULT_ENVIRONMENT);
        assert_eq!(c.tint(100, 100), DEFAULT_TINT);
        assert_eq!(c.health(0, 999, 0), 1.0);
        assert!(c.sections().iter().all(Section::is_empty));
        assert_eq!(c.origin(), (64, -32));
    }

    #[test]
    fn entities_keep_world_positions() {
        let mut c = VoxelChunk::new(1, 0);
        assert!(c.contains_world(32.0, 0.5));
        assert!(!c.contains_world(31.9, 0.5));
        let e = EntityRecord::spawn_marker("Spawn_Wolf", 40.5, 70.0, 3.25);
        assert_eq!(e.kind.type_name(), "SpawnMarker");
        c.add_entity(e.clone());
        assert_eq!(c.entities(), &[e]);
        let kept = c.place_entities([
            EntityRecord::spawn_marker("Spawn_Deer", 63.9, 64.0, 31.0),
            EntityRecord::spawn_marker("Spawn_Deer", 64.0, 64.0, 31.0),
            EntityRecord::new(
                EntityKind::Generic {
                    entity_type: "Item".into(),
                },
                33.0,
                80.0,
                -0.5,
            ),
        ]);
        assert_eq!(kept, 1);
        assert_eq!(c.entities().len(), 2);
    }
}
