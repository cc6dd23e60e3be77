//! Foreign material → native block translation.
//!
//! Lookup order for [`MaterialTranslator::to_block_id`]:
//! 1. source water/lava becomes `Empty` (fluids belong to the fluid plane);
//! 2. names in the native namespace pass through with the prefix stripped;
//! 3. the foreign name table, first as given, then with the foreign namespace added;
//! 4. the legacy numeric block type;
//! 5. `Rock_Stone`.

use std::collections::{BTreeMap, HashMap};

use crate::identity::{BlockIdentity, EMPTY_ID, LAVA_ID, STONE_ID, WATER_ID};
use crate::registry::BlockRegistry;
use crate::{FULL_FLUID_LEVEL, NATIVE_NAMESPACE};

pub const FOREIGN_NAMESPACE: &str = "minecraft:";

const FOREIGN_WATER: &str = "minecraft:water";
const FOREIGN_LAVA: &str = "minecraft:lava";

/// A material as the foreign system describes it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForeignMaterial {
    pub name: Option<String>,
    /// Legacy numeric type; negative when unknown.
    pub block_type: i32,
    pub properties: BTreeMap<String, String>,
}

impl ForeignMaterial {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            block_type: -1,
            properties: BTreeMap::new(),
        }
    }

    pub fn legacy(block_type: i32) -> Self {
        Self {
            name: None,
            block_type,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(|s| s.as_str())
    }

    /// `fluid` is namespaced; the bare name matches too.
    fn is_source_of(&self, fluid: &str) -> bool {
        let Some(name) = self.name.as_deref() else {
            return false;
        };
        let named = name == fluid || fluid.strip_prefix(FOREIGN_NAMESPACE) == Some(name);
        named && matches!(self.property("level"), None | Some("0"))
    }
}

/// Fluid to write into the fluid plane for a fluid material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FluidPlacement {
    pub name: &'static str,
    pub level: u8,
}

// Foreign name → native id. Registration order matters for the reverse table:
// the first foreign name registered for a native id is the one reported back.
const TABLE: &[(&str, &str)] = &[
    ("minecraft:air", EMPTY_ID),
    ("minecraft:cave_air", EMPTY_ID),
    ("minecraft:void_air", EMPTY_ID),
    ("minecraft:stone", STONE_ID),
    ("minecraft:dirt", "Soil_Dirt"),
    ("minecraft:grass_block", "Soil_Grass"),
    ("minecraft:sand", "Soil_Sand"),
    ("minecraft:red_sand", "Soil_Sand_Red"),
    ("minecraft:gravel", "Soil_Gravel"),
    ("minecraft:water", WATER_ID),
    ("minecraft:bedrock", "Rock_Bedrock"),
    ("minecraft:cobblestone", "Rock_Stone_Cobble"),
    ("minecraft:mossy_cobblestone", "Rock_Stone_Cobble_Mossy"),
    // logs
    ("minecraft:oak_log", "Wood_Oak_Trunk"),
    ("minecraft:spruce_log", "Wood_Fir_Trunk"),
    ("minecraft:birch_log", "Wood_Birch_Trunk"),
    ("minecraft:jungle_log", "Wood_Jungle_Trunk"),
    ("minecraft:acacia_log", "Wood_Palm_Trunk"),
    ("minecraft:dark_oak_log", "Wood_Oak_Trunk"),
    ("minecraft:mangrove_log", "Wood_Jungle_Trunk"),
    ("minecraft:cherry_log", "Wood_Maple_Trunk"),
    // leaves
    ("minecraft:oak_leaves", "Plant_Leaves_Oak"),
    ("minecraft:spruce_leaves", "Plant_Leaves_Fir"),
    ("minecraft:birch_leaves", "Plant_Leaves_Birch"),
    ("minecraft:jungle_leaves", "Plant_Leaves_Jungle"),
    ("minecraft:acacia_leaves", "Plant_Leaves_Palm"),
    ("minecraft:dark_oak_leaves", "Plant_Leaves_Oak"),
    ("minecraft:mangrove_leaves", "Plant_Leaves_Jungle"),
    ("minecraft:cherry_leaves", "Plant_Leaves_Maple"),
    ("minecraft:azalea_leaves", "Plant_Leaves_Oak"),
    // planks
    ("minecraft:oak_planks", "Wood_Hardwood_Planks"),
    ("minecraft:spruce_planks", "Wood_Softwood_Planks"),
    ("minecraft:birch_planks", "Wood_Softwood_Planks"),
    ("minecraft:jungle_planks", "Wood_Hardwood_Planks"),
    ("minecraft:acacia_planks", "Wood_Hardwood_Planks"),
    ("minecraft:dark_oak_planks", "Wood_Hardwood_Planks"),
    // stone variants
    ("minecraft:granite", "Rock_Shale"),
    ("minecraft:diorite", "Rock_Quartzite"),
    ("minecraft:andesite", "Rock_Slate"),
    ("minecraft:deepslate", "Rock_Slate"),
    ("minecraft:tuff", "Rock_Volcanic"),
    ("minecraft:calcite", "Rock_Calcite"),
    ("minecraft:dripstone_block", "Rock_Calcite"),
    ("minecraft:basalt", "Rock_Basalt"),
    ("minecraft:smooth_basalt", "Rock_Basalt"),
    ("minecraft:blackstone", "Rock_Volcanic"),
    // other terrain
    ("minecraft:clay", "Soil_Clay"),
    ("minecraft:mud", "Soil_Mud"),
    ("minecraft:muddy_mangrove_roots", "Soil_Mud"),
    ("minecraft:sandstone", "Rock_Sandstone"),
    ("minecraft:red_sandstone", "Rock_Sandstone_Red"),
    ("minecraft:snow", "Soil_Snow"),
    ("minecraft:snow_block", "Soil_Snow"),
    ("minecraft:powder_snow", "Soil_Snow"),
    ("minecraft:ice", "Rock_Ice"),
    ("minecraft:packed_ice", "Rock_Ice"),
    ("minecraft:blue_ice", "Rock_Ice"),
    ("minecraft:obsidian", "Rock_Magma_Cooled"),
    ("minecraft:crying_obsidian", "Rock_Magma_Cooled"),
    // ores
    ("minecraft:coal_ore", STONE_ID),
    ("minecraft:deepslate_coal_ore", "Rock_Slate"),
    ("minecraft:iron_ore", "Ore_Iron_Stone"),
    ("minecraft:deepslate_iron_ore", "Ore_Iron_Stone"),
    ("minecraft:gold_ore", "Ore_Gold_Stone"),
    ("minecraft:deepslate_gold_ore", "Ore_Gold_Stone"),
    ("minecraft:nether_gold_ore", "Ore_Gold_Stone"),
    ("minecraft:copper_ore", "Ore_Copper_Stone"),
    ("minecraft:deepslate_copper_ore", "Ore_Copper_Stone"),
    ("minecraft:diamond_ore", "Ore_Adamantite_Stone"),
    ("minecraft:deepslate_diamond_ore", "Ore_Adamantite_Stone"),
    ("minecraft:emerald_ore", "Ore_Mithril_Stone"),
    ("minecraft:deepslate_emerald_ore", "Ore_Mithril_Stone"),
    ("minecraft:lapis_ore", "Ore_Cobalt_Stone"),
    ("minecraft:deepslate_lapis_ore", "Ore_Cobalt_Stone"),
    ("minecraft:redstone_ore", "Ore_Thorium_Stone"),
    ("minecraft:deepslate_redstone_ore", "Ore_Thorium_Stone"),
    ("minecraft:nether_quartz_ore", "Rock_Quartzite"),
    ("minecraft:ancient_debris", "Ore_Onyxium_Stone"),
    ("minecraft:lava", LAVA_ID),
    // plants
    ("minecraft:grass", "Plant_Grass_Lush"),
    ("minecraft:short_grass", "Plant_Grass_Lush"),
    ("minecraft:tall_grass", "Plant_Grass_Lush"),
    ("minecraft:fern", "Plant_Fern"),
    ("minecraft:large_fern", "Plant_Fern"),
    ("minecraft:cactus", "Plant_Cactus_1"),
    ("minecraft:dandelion", "Plant_Flower_Common_Yellow"),
    ("minecraft:poppy", "Plant_Flower_Common_Yellow"),
];

fn legacy_block_type(block_type: i32) -> &'static str {
    match block_type {
        0 => EMPTY_ID,
        1 => STONE_ID,
        2 => "Soil_Grass",
        3 => "Soil_Dirt",
        4 => "Rock_Stone_Cobble",
        7 => "Rock_Bedrock",
        // flowing and still water/lava live in the fluid plane
        8..=11 => EMPTY_ID,
        12 => "Soil_Sand",
        13 => "Soil_Gravel",
        14 => "Ore_Gold_Stone",
        15 => "Ore_Iron_Stone",
        16 => STONE_ID,
        17 => "Wood_Oak_Trunk",
        18 => "Plant_Leaves_Oak",
        24 => "Rock_Sandstone",
        49 => "Rock_Magma_Cooled",
        56 => "Ore_Adamantite_Stone",
        78 => "Soil_Snow",
        79 => "Rock_Ice",
        82 => "Soil_Clay",
        _ => STONE_ID,
    }
}

/// Bidirectional foreign-name table plus the fallbacks around it.
#[derive(Clone, Debug)]
pub struct MaterialTranslator {
    forward: HashMap<&'static str, &'static str>,
    reverse: HashMap<&'static str, &'static str>,
}

impl Default for MaterialTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialTranslator {
    pub fn new() -> Self {
        let mut forward = HashMap::with_capacity(TABLE.len());
        let mut reverse = HashMap::new();
        for &(foreign, native) in TABLE {
            forward.insert(foreign, native);
            reverse.entry(native).or_insert(foreign);
        }
        Self { forward, reverse }
    }

    /// Number of foreign names in the table.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// `(foreign, native)` pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        TABLE.iter().copied()
    }

    fn lookup(&self, name: &str) -> Option<&'static str> {
        if let Some(native) = self.forward.get(name) {
            return Some(*native);
        }
        if name.starts_with(FOREIGN_NAMESPACE) {
            return None;
        }
        self.forward
            .get(format!("{FOREIGN_NAMESPACE}{name}").as_str())
            .copied()
    }

    /// Native block id for `material`. Never fails; worst case is `Rock_Stone`.
    pub fn to_block_id<'a>(&'a self, material: &'a ForeignMaterial) -> &'a str {
        if material.is_source_of(FOREIGN_WATER) || material.is_source_of(FOREIGN_LAVA) {
            return EMPTY_ID;
        }
        if let Some(name) = material.name.as_deref() {
            if let Some(native) = name.strip_prefix(NATIVE_NAMESPACE) {
                if !native.is_empty() {
                    return native;
                }
            }
            if let Some(native) = self.lookup(name) {
                return native;
            }
            log::debug!(
                target: "translate",
                "no table entry for {name}, using legacy type {}",
                material.block_type
            );
        }
        legacy_block_type(material.block_type)
    }

    pub fn to_block_identity(&self, material: &ForeignMaterial) -> BlockIdentity {
        BlockIdentity::from_valid(self.to_block_id(material), 0, None)
    }

    pub fn to_block_identity_with_rotation(&self, material: &ForeignMaterial) -> BlockIdentity {
        BlockIdentity::from_valid(
            self.to_block_id(material),
            derive_rotation(material),
            None,
        )
    }

    /// Fluid name and level for water/lava materials, `None` for everything else.
    pub fn fluid_of(&self, material: &ForeignMaterial) -> Option<FluidPlacement> {
        let name = match material.name.as_deref()? {
            FOREIGN_WATER | "water" => WATER_ID,
            FOREIGN_LAVA | "lava" => LAVA_ID,
            _ => return None,
        };
        // Foreign levels count down from a source (0); 8 and above are falling columns.
        let level = match material.property("level").and_then(|l| l.parse::<u8>().ok()) {
            None | Some(0) => FULL_FLUID_LEVEL,
            Some(l) if l < FULL_FLUID_LEVEL => FULL_FLUID_LEVEL - l,
            Some(_) => FULL_FLUID_LEVEL,
        };
        Some(FluidPlacement { name, level })
    }

    /// First foreign name registered for `block_id`.
    pub fn foreign_name_of(&self, block_id: &str) -> Option<&'static str> {
        self.reverse.get(block_id).copied()
    }

    pub fn is_known_block(&self, registry: &BlockRegistry, block_id: &str) -> bool {
        !block_id.is_empty() && (registry.contains(block_id) || self.reverse.contains_key(block_id))
    }

    /// Resolves a block name as found in imported content: native ids as is, native
    /// namespace stripped, foreign names through the table, else `Rock_Stone`.
    pub fn resolve_name<'a>(&'a self, registry: &BlockRegistry, name: &'a str) -> &'a str {
        if self.is_known_block(registry, name) {
            return name;
        }
        if let Some(native) = name.strip_prefix(NATIVE_NAMESPACE) {
            if !native.is_empty() {
                return native;
            }
        }
        match self.lookup(name) {
            Some(native) => native,
            None => {
                log::debug!(target: "translate", "unresolved block name {name}, using {STONE_ID}");
                STONE_ID
            }
        }
    }
}

/// Rotation implied by a foreign material's orientation properties.
///
/// Only the first recognised category is used: `axis`, then `facing`, then `half`.
pub fn derive_rotation(material: &ForeignMaterial) -> u8 {
    match material.property("axis") {
        Some("y") => return 0,
        Some("x") => return 4,
        Some("z") => return 1,
        _ => {}
    }
    match material.property("facing") {
        Some("north") | Some("up") => return 0,
        Some("south") => return 8,
        Some("east") => return 4,
        Some("west") => return 12,
        Some("down") => return 32,
        _ => {}
    }
    match material.property("half") {
        Some("top") => 32,
        _ => 0,
    }
}

/// Fixed small-integer ids used by the legacy palette format.
///
/// Independent of [`BlockRegistry::index_of`]; the two numberings do not agree.
pub fn legacy_numeric_index(block_id: &str) -> u8 {
    match block_id {
        "Empty" => 0,
        "Rock_Stone" => 1,
        "Soil_Grass" => 2,
        "Soil_Dirt" => 3,
        "Rock_Stone_Cobble" => 4,
        "Rock_Bedrock" => 5,
        "Water_Source" => 6,
        "Lava_Source" => 7,
        "Soil_Sand" => 8,
        "Soil_Gravel" => 9,
        "Ore_Gold_Stone" => 10,
        "Ore_Iron_Stone" => 11,
        "Ore_Copper_Stone" => 12,
        "Ore_Adamantite_Stone" => 13,
        "Wood_Oak_Trunk" => 14,
        "Plant_Leaves_Oak" => 15,
        "Wood_Softwood_Planks" => 16,
        "Wood_Hardwood_Planks" => 17,
        "Rock_Sandstone" => 18,
        "Rock_Magma_Cooled" => 19,
        "Soil_Snow" => 20,
        "Rock_Ice" => 21,
        "Soil_Clay" => 22,
        "Rock_Shale" => 23,
        "Rock_Slate" => 24,
        "Rock_Quartzite" => 25,
        "Rock_Basalt" => 26,
        "Rock_Volcanic" => 27,
        "Rock_Marble" => 28,
        "Rock_Calcite" => 29,
        "Rock_Chalk" => 30,
        "Soil_Mud" => 31,
        "Soil_Sand_Red" => 32,
        "Soil_Sand_White" => 33,
        "Rock_Sandstone_Red" => 34,
        "Rock_Sandstone_White" => 35,
        "Wood_Birch_Trunk" => 36,
        "Wood_Fir_Trunk" => 37,
        "Wood_Jungle_Trunk" => 38,
        "Wood_Palm_Trunk" => 39,
        "Plant_Leaves_Birch" => 40,
        "Plant_Leaves_Fir" => 41,
        "Plant_Leaves_Jungle" => 42,
        "Plant_Leaves_Palm" => 43,
        "Ore_Silver_Stone" => 44,
        "Ore_Cobalt_Stone" => 45,
        "Ore_Mithril_Stone" => 46,
        "Ore_Thorium_Stone" => 47,
        "Ore_Onyxium_Stone" => 48,
        "Plant_Grass_Lush" => 49,
        "Plant_Fern" => 50,
        "Plant_Flower_Common_Yellow" => 51,
        "Plant_Cactus_1" => 52,
        _ => 1,
    }
}
