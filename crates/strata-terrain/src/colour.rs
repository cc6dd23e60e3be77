//! Display colours for recipes without an explicit one.

enum Rule {
    Prefix(&'static str),
    Contains(&'static str),
    Exact(&'static str),
}

use Rule::{Contains, Exact, Prefix};

// First match wins. Specific prefixes come before their generic family prefix, and
// every prefix family is checked before the substring families below it.
const RULES: &[(Rule, u32)] = &[
    (Prefix("Rock_Stone"), 0x808080),
    (Prefix("Rock_Bedrock"), 0x2d2d2d),
    (Prefix("Rock_Ice"), 0xa0d0ff),
    (Prefix("Rock_Sandstone"), 0xd4c099),
    (Prefix("Rock_Shale"), 0x5a5a5a),
    (Prefix("Rock_Slate"), 0x4a4a4a),
    (Prefix("Rock_Basalt"), 0x3a3a3a),
    (Prefix("Rock_Marble"), 0xf0f0f0),
    (Prefix("Rock_Quartzite"), 0xe0e0e0),
    (Prefix("Rock_Calcite"), 0xdbd7ca),
    (Prefix("Rock_Chalk"), 0xffffff),
    (Prefix("Rock_Volcanic"), 0x2a2a2a),
    (Prefix("Rock_"), 0x707070),
    (Prefix("Soil_Grass_Lush"), 0x00a000),
    (Prefix("Soil_Grass"), 0x59a52c),
    (Prefix("Soil_Dirt"), 0x8b5a2b),
    (Prefix("Soil_Sand_Red"), 0xc4633c),
    (Prefix("Soil_Sand_White"), 0xf4e8c6),
    (Prefix("Soil_Sand"), 0xdbc497),
    (Prefix("Soil_Gravel"), 0x909090),
    (Prefix("Soil_Clay"), 0x9ea4ae),
    (Prefix("Soil_Mud"), 0x5a4a3a),
    (Prefix("Soil_Snow"), 0xfffafa),
    (Prefix("Soil_"), 0x8b5a2b),
    // wood
    (Contains("Oak"), 0x8b7355),
    (Contains("Birch"), 0xd5c9a6),
    (Contains("Fir"), 0x5d4e37),
    (Contains("Cedar"), 0x5d4e37),
    (Contains("Redwood"), 0x8b4513),
    (Contains("Palm"), 0x9e8b61),
    (Contains("Jungle"), 0x6b4423),
    (Prefix("Wood_"), 0x8b7355),
    // plants
    (Contains("Leaves"), 0x228b22),
    (Contains("Grass"), 0x32cd32),
    (Contains("Fern"), 0x32cd32),
    (Contains("Flower"), 0xffff00),
    (Contains("Cactus"), 0x2e8b57),
    (Prefix("Plant_"), 0x228b22),
    // ores
    (Contains("Iron"), 0xd4a574),
    (Contains("Gold"), 0xffd700),
    (Contains("Copper"), 0xb87333),
    (Contains("Silver"), 0xc0c0c0),
    (Contains("Cobalt"), 0x0047ab),
    (Contains("Mithril"), 0x4682b4),
    (Contains("Adamantite"), 0x006400),
    (Contains("Thorium"), 0x98fb98),
    (Contains("Onyxium"), 0x0a0a0a),
    (Prefix("Ore_"), 0x808080),
    // fluids
    (Contains("Water"), 0x3366ff),
    (Contains("Lava"), 0xff4500),
    (Exact("Empty"), 0x000000),
];

const FALLBACK: u32 = 0xa0a0a0;

/// RGB display colour for a block id.
pub fn block_colour(id: &str) -> u32 {
    RULES
        .iter()
        .find(|(rule, _)| match rule {
            Prefix(p) => id.starts_with(p),
            Contains(s) => id.contains(s),
            Exact(e) => id == *e,
        })
        .map(|&(_, c)| c)
        .unwrap_or(FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_prefix_before_family() {
        assert_eq!(block_colour("Rock_Stone_Cobble"), 0x808080);
        assert_eq!(block_colour("Rock_Magma_Cooled"), 0x707070);
        assert_eq!(block_colour("Soil_Grass_Lush"), 0x00a000);
        assert_eq!(block_colour("Soil_Sand_Red"), 0xc4633c);
        assert_eq!(block_colour("Soil_Roots"), 0x8b5a2b);
    }

    #[test]
    fn substring_families_in_order() {
        // "Oak" is checked before "Leaves"
        assert_eq!(block_colour("Plant_Leaves_Oak"), 0x8b7355);
        assert_eq!(block_colour("Plant_Leaves_Maple"), 0x228b22);
        assert_eq!(block_colour("Wood_Maple_Trunk"), 0x8b7355);
        assert_eq!(block_colour("Wood_Cedar_Trunk"), 0x5d4e37);
        assert_eq!(block_colour("Plant_Fern"), 0x32cd32);
        assert_eq!(block_colour("Ore_Gold_Stone"), 0xffd700);
        assert_eq!(block_colour("Ore_Tin_Stone"), 0x808080);
        assert_eq!(block_colour("Water_Source"), 0x3366ff);
        assert_eq!(block_colour("Lava_Source"), 0xff4500);
    }

    #[test]
    fn empty_and_fallback() {
        assert_eq!(block_colour("Empty"), 0x000000);
        assert_eq!(block_colour("Empty_Ish"), FALLBACK);
        assert_eq!(block_colour("Glass_Clear"), FALLBACK);
    }
}
