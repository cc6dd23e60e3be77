use hashbrown::HashMap;
use strata_blocks::BlockIdentity;

pub const SECTION_SIZE: i32 = 32;
pub const SECTION_VOLUME: usize = 32 * 32 * 32;

/// Fluid palette slot 0 always names this.
pub const NO_FLUID: &str = "Empty";
pub const MAX_FLUID_PALETTE: usize = 256;

pub const FULL_SKY_LIGHT: u8 = 15;

/// Linear index of a voxel inside a section: Y-major, then Z, then X.
///
/// Coordinates are masked to 5 bits. Bulk export formats rely on this order.
#[inline]
pub fn voxel_index(x: i32, y: i32, z: i32) -> usize {
    (((y & 31) << 10) | ((z & 31) << 5) | (x & 31)) as usize
}

/// A 32×32×32 cube of voxels with its own block and fluid palettes.
#[derive(Clone, Debug)]
pub struct Section {
    palette: Vec<BlockIdentity>,
    lookup: HashMap<BlockIdentity, u32>,
    blocks: Box<[u32]>,
    rotations: Box<[u8]>,
    fluid_ids: Box<[u8]>,
    fluid_levels: Box<[u8]>,
    block_light: Box<[u8]>,
    sky_light: Box<[u8]>,
    fluid_palette: Vec<String>,
    fluid_lookup: HashMap<String, u8>,
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

impl Section {
    pub fn new() -> Self {
        let air = BlockIdentity::empty();
        let mut lookup = HashMap::new();
        lookup.insert(air.clone(), 0);
        let mut fluid_lookup = HashMap::new();
        fluid_lookup.insert(NO_FLUID.to_string(), 0);
        Self {
            palette: vec![air],
            lookup,
            blocks: vec![0u32; SECTION_VOLUME].into_boxed_slice(),
            rotations: vec![0u8; SECTION_VOLUME].into_boxed_slice(),
            fluid_ids: vec![0u8; SECTION_VOLUME].into_boxed_slice(),
            fluid_levels: vec![0u8; SECTION_VOLUME].into_boxed_slice(),
            block_light: vec![0u8; SECTION_VOLUME].into_boxed_slice(),
            sky_light: vec![FULL_SKY_LIGHT; SECTION_VOLUME].into_boxed_slice(),
            fluid_palette: vec![NO_FLUID.to_string()],
            fluid_lookup,
        }
    }

    fn palette_slot(&mut self, block: &BlockIdentity) -> u32 {
        if let Some(&i) = self.lookup.get(block) {
            return i;
        }
        let i = self.palette.len() as u32;
        self.palette.push(block.clone());
        self.lookup.insert(block.clone(), i);
        i
    }

    #[inline]
    pub fn block(&self, x: i32, y: i32, z: i32) -> &BlockIdentity {
        &self.palette[self.blocks[voxel_index(x, y, z)] as usize]
    }

    /// Stores `block` and its rotation; unseen blocks are appended to the palette.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: &BlockIdentity) {
        let slot = self.palette_slot(block);
        let i = voxel_index(x, y, z);
        self.blocks[i] = slot;
        self.rotations[i] = block.rotation();
    }

    #[inline]
    pub fn rotation(&self, x: i32, y: i32, z: i32) -> u8 {
        self.rotations[voxel_index(x, y, z)]
    }

    /// Rotates the voxel in place; the palette entry and the rotation plane stay in step.
    pub fn set_rotation(&mut self, x: i32, y: i32, z: i32, rotation: u8) {
        let rotation = rotation & 63;
        let i = voxel_index(x, y, z);
        let current = &self.palette[self.blocks[i] as usize];
        if current.rotation() != rotation {
            if let Ok(rotated) = current.with_rotation(rotation as i32) {
                self.blocks[i] = self.palette_slot(&rotated);
            }
        }
        self.rotations[i] = rotation;
    }

    /// Fluid name and level, or `None` when the voxel holds no fluid.
    pub fn fluid(&self, x: i32, y: i32, z: i32) -> Option<(&str, u8)> {
        let i = voxel_index(x, y, z);
        match self.fluid_ids[i] {
            0 => None,
            id => Some((self.fluid_palette[id as usize].as_str(), self.fluid_levels[i])),
        }
    }

    /// Returns false, leaving the voxel untouched, if `name` would overflow the fluid palette.
    /// [`NO_FLUID`] clears the voxel.
    pub fn set_fluid(&mut self, x: i32, y: i32, z: i32, name: &str, level: u8) -> bool {
        if name == NO_FLUID {
            self.clear_fluid(x, y, z);
            return true;
        }
        let id = match self.fluid_lookup.get(name) {
            Some(&id) => id,
            None => {
                if self.fluid_palette.len() >= MAX_FLUID_PALETTE {
                    log::warn!(target: "chunk", "fluid palette full, dropping fluid {name}");
                    return false;
                }
                let id = self.fluid_palette.len() as u8;
                self.fluid_palette.push(name.to_string());
                self.fluid_lookup.insert(name.to_string(), id);
                id
            }
        };
        let i = voxel_index(x, y, z);
        self.fluid_ids[i] = id;
        self.fluid_levels[i] = level & 15;
        true
    }

    pub fn clear_fluid(&mut self, x: i32, y: i32, z: i32) {
        let i = voxel_index(x, y, z);
        self.fluid_ids[i] = 0;
        self.fluid_levels[i] = 0;
    }

    #[inline]
    pub fn block_light(&self, x: i32, y: i32, z: i32) -> u8 {
        self.block_light[voxel_index(x, y, z)]
    }

    #[inline]
    pub fn set_block_light(&mut self, x: i32, y: i32, z: i32, level: u8) {
        self.block_light[voxel_index(x, y, z)] = level & 15;
    }

    #[inline]
    pub fn sky_light(&self, x: i32, y: i32, z: i32) -> u8 {
        self.sky_light[voxel_index(x, y, z)]
    }

    #[inline]
    pub fn set_sky_light(&mut self, x: i32, y: i32, z: i32, level: u8) {
        self.sky_light[voxel_index(x, y, z)] = level & 15;
    }

    /// True when every voxel is air; such sections need not be written out.
    pub fn is_empty(&self) -> bool {
        self.blocks
            .iter()
            .all(|&i| self.palette[i as usize].is_empty())
    }

    pub fn has_rotations(&self) -> bool {
        self.rotations.iter().any(|&r| r != 0)
    }

    pub fn has_fluids(&self) -> bool {
        self.fluid_ids.iter().any(|&f| f != 0)
    }

    // Raw planes for exporters, indexed by `voxel_index`.

    pub fn palette(&self) -> &[BlockIdentity] {
        &self.palette
    }
    pub fn block_indices(&self) -> &[u32] {
        &self.blocks
    }
    pub fn rotations(&self) -> &[u8] {
        &self.rotations
    }
    pub fn fluid_palette(&self) -> &[String] {
        &self.fluid_palette
    }
    pub fn fluid_ids(&self) -> &[u8] {
        &self.fluid_ids
    }
    pub fn fluid_levels(&self) -> &[u8] {
        &self.fluid_levels
    }
    pub fn block_light_plane(&self) -> &[u8] {
        &self.block_light
    }
    pub fn sky_light_plane(&self) -> &[u8] {
        &self.sky_light
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_section_is_empty_and_lit() {
        let s = Section::new();
        assert!(s.is_empty());
        assert_eq!(s.palette().len(), 1);
        assert_eq!(s.sky_light(5, 5, 5), 15);
        assert_eq!(s.block_light(5, 5, 5), 0);
        assert_eq!(s.fluid(0, 0, 0), None);
        assert_eq!(s.fluid_palette(), ["Empty".to_string()]);
    }

    #[test]
    fn palette_dedups_by_full_identity() {
        let mut s = Section::new();
        let log = BlockIdentity::new("Wood_Oak_Trunk", 4).unwrap();
        s.set_block(0, 0, 0, &log);
        s.set_block(1, 0, 0, &BlockIdentity::new("Wood_Oak_Trunk", 4).unwrap());
        s.set_block(2, 0, 0, &BlockIdentity::of("Wood_Oak_Trunk").unwrap());
        assert_eq!(s.palette().len(), 3);
        assert_eq!(s.rotation(0, 0, 0), 4);
        assert_eq!(s.rotation(2, 0, 0), 0);
        assert!(s.has_rotations());
        assert!(!s.is_empty());
    }

    #[test]
    fn fluid_palette_caps_at_256() {
        let mut s = Section::new();
        for n in 1..MAX_FLUID_PALETTE {
            assert!(s.set_fluid(0, 0, 0, &format!("Fluid_{n}"), 8));
        }
        assert_eq!(s.fluid_palette().len(), MAX_FLUID_PALETTE);
        assert!(!s.set_fluid(1, 0, 0, "One_Too_Many", 8));
        assert_eq!(s.fluid(1, 0, 0), None);
        // existing names still resolve
        assert!(s.set_fluid(1, 0, 0, "Fluid_7", 3));
        assert_eq!(s.fluid(1, 0, 0), Some(("Fluid_7", 3)));
    }

    #[test]
    fn planes_are_masked() {
        let mut s = Section::new();
        s.set_rotation(0, 0, 0, 0xFF);
        s.set_block_light(0, 0, 0, 0xFF);
        s.set_sky_light(0, 0, 0, 0x12);
        assert!(s.set_fluid(0, 0, 0, "Water_Source", 0x1F));
        assert_eq!(s.rotation(0, 0, 0), 63);
        assert_eq!(s.block_light(0, 0, 0), 15);
        assert_eq!(s.sky_light(0, 0, 0), 2);
        assert_eq!(s.fluid(0, 0, 0), Some(("Water_Source", 15)));
        s.clear_fluid(0, 0, 0);
        assert_eq!(s.fluid(0, 0, 0), None);
    }

    #[test]
    fn rotating_a_voxel_updates_its_palette_entry() {
        let mut s = Section::new();
        s.set_block(1, 1, 1, &BlockIdentity::new("Wood_Oak_Trunk", 4).unwrap());
        s.set_rotation(1, 1, 1, 0);
        assert_eq!(s.rotation(1, 1, 1), 0);
        assert_eq!(s.block(1, 1, 1).rotation(), 0);
        assert_eq!(s.block(1, 1, 1).id(), "Wood_Oak_Trunk");
        s.set_rotation(1, 1, 1, 16 | 4);
        assert_eq!(s.block(1, 1, 1).rotation(), 20);
        assert_eq!(s.rotation(1, 1, 1), 20);
        // exporters pairing palette entries with the plane see the same rotation
        let i = voxel_index(1, 1, 1);
        let slot = s.block_indices()[i] as usize;
        assert_eq!(s.palette()[slot].rotation(), s.rotations()[i]);
    }

    #[test]
    fn setting_no_fluid_clears() {
        let mut s = Section::new();
        assert!(s.set_fluid(2, 2, 2, "Water_Source", 8));
        assert!(s.set_fluid(2, 2, 2, NO_FLUID, 5));
        assert_eq!(s.fluid(2, 2, 2), None);
        assert_eq!(s.fluid_levels()[voxel_index(2, 2, 2)], 0);
        assert!(s.set_fluid(3, 2, 2, NO_FLUID, 7));
        assert_eq!(s.fluid_levels()[voxel_index(3, 2, 2)], 0);
    }
}
