//! Block categories and the per-category traits derived from them.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Solid,
    Fluid,
    Foliage,
    Empty,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DrawType {
    Cube,
    Cross,
    Fluid,
    Custom,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Opacity {
    Opaque,
    SemiTransparent,
    Transparent,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Empty,
    Rock,
    RockCobble,
    RockBrick,
    Ice,
    Crystal,
    Soil,
    Grass,
    Sand,
    Snow,
    Gravel,
    WoodTrunk,
    WoodPlanks,
    Leaves,
    Foliage,
    Flower,
    Crop,
    Cactus,
    Mushroom,
    Ore,
    Fluid,
    Metal,
    Glass,
    Cloth,
    Light,
    Furniture,
    Decoration,
    Structure,
    Misc,
}

struct Traits {
    key: &'static str,
    legacy: &'static str,
    material: MaterialKind,
    draw: DrawType,
    opacity: Opacity,
    can_rotate: bool,
}

const fn t(
    key: &'static str,
    legacy: &'static str,
    material: MaterialKind,
    draw: DrawType,
    opacity: Opacity,
    can_rotate: bool,
) -> Traits {
    Traits {
        key,
        legacy,
        material,
        draw,
        opacity,
        can_rotate,
    }
}

use DrawType as D;
use MaterialKind as M;
use Opacity as O;

// Indexed by `Category as usize`; keep in declaration order.
const TRAITS: [Traits; Category::COUNT] = [
    t("empty", "Misc", M::Empty, D::Custom, O::Transparent, false),
    t("rock", "Rock", M::Solid, D::Cube, O::Opaque, false),
    t("rock_cobble", "Rock", M::Solid, D::Cube, O::Opaque, false),
    t("rock_brick", "Brick", M::Solid, D::Cube, O::Opaque, true),
    t("ice", "Rock", M::Solid, D::Cube, O::Transparent, false),
    t("crystal", "Rock", M::Solid, D::Custom, O::SemiTransparent, true),
    t("soil", "Soil", M::Solid, D::Cube, O::Opaque, false),
    t("grass", "Soil", M::Solid, D::Cube, O::Opaque, false),
    t("sand", "Soil", M::Solid, D::Cube, O::Opaque, false),
    t("snow", "Soil", M::Solid, D::Cube, O::Opaque, false),
    t("gravel", "Soil", M::Solid, D::Cube, O::Opaque, false),
    t("wood_trunk", "Wood", M::Solid, D::Cube, O::Opaque, true),
    t("wood_planks", "Wood", M::Solid, D::Cube, O::Opaque, true),
    t("leaves", "Plant", M::Foliage, D::Cube, O::SemiTransparent, false),
    t("foliage", "Plant", M::Foliage, D::Cross, O::Transparent, false),
    t("flower", "Plant", M::Foliage, D::Cross, O::Transparent, false),
    t("crop", "Plant", M::Foliage, D::Cross, O::Transparent, false),
    t("cactus", "Plant", M::Solid, D::Cube, O::Opaque, false),
    t("mushroom", "Plant", M::Foliage, D::Cross, O::Transparent, false),
    t("ore", "Ore", M::Solid, D::Cube, O::Opaque, false),
    t("fluid", "Fluid", M::Fluid, D::Fluid, O::Transparent, false),
    t("metal", "Metal", M::Solid, D::Cube, O::Opaque, false),
    t("glass", "Glass", M::Solid, D::Cube, O::Transparent, false),
    t("cloth", "Cloth", M::Solid, D::Cube, O::Opaque, false),
    t("light", "Light", M::Solid, D::Custom, O::SemiTransparent, true),
    t("furniture", "Decoration", M::Solid, D::Custom, O::SemiTransparent, true),
    t("decoration", "Decoration", M::Solid, D::Custom, O::SemiTransparent, true),
    t("structure", "Structure", M::Solid, D::Custom, O::Opaque, true),
    t("misc", "Misc", M::Solid, D::Cube, O::Opaque, false),
];

// Prefix order matters: first match wins.
const LEGACY_PREFIXES: &[(&str, &str)] = &[
    ("Rock_", "Rock"),
    ("Soil_", "Soil"),
    ("Wood_", "Wood"),
    ("Plant_", "Plant"),
    ("Ore_", "Ore"),
    ("Water_", "Fluid"),
    ("Lava_", "Fluid"),
    ("Metal_", "Metal"),
    ("Glass_", "Glass"),
    ("Brick_", "Brick"),
    ("Cloth_", "Cloth"),
    ("Light_", "Light"),
    ("Decoration_", "Decoration"),
    ("Structure_", "Structure"),
];

impl Category {
    pub const COUNT: usize = 29;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Empty,
        Category::Rock,
        Category::RockCobble,
        Category::RockBrick,
        Category::Ice,
        Category::Crystal,
        Category::Soil,
        Category::Grass,
        Category::Sand,
        Category::Snow,
        Category::Gravel,
        Category::WoodTrunk,
        Category::WoodPlanks,
        Category::Leaves,
        Category::Foliage,
        Category::Flower,
        Category::Crop,
        Category::Cactus,
        Category::Mushroom,
        Category::Ore,
        Category::Fluid,
        Category::Metal,
        Category::Glass,
        Category::Cloth,
        Category::Light,
        Category::Furniture,
        Category::Decoration,
        Category::Structure,
        Category::Misc,
    ];

    #[inline]
    fn traits(self) -> &'static Traits {
        &TRAITS[self as usize]
    }

    /// Snake-case key used in catalogue files.
    pub fn key(self) -> &'static str {
        self.traits().key
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.key() == key)
    }

    /// The coarser grouping older palettes and pick-lists use.
    pub fn legacy_name(self) -> &'static str {
        self.traits().legacy
    }

    pub fn material_kind(self) -> MaterialKind {
        self.traits().material
    }

    pub fn draw_type(self) -> DrawType {
        self.traits().draw
    }

    pub fn opacity(self) -> Opacity {
        self.traits().opacity
    }

    pub fn can_rotate(self) -> bool {
        self.traits().can_rotate
    }
}

/// Legacy group for an arbitrary id, inferred from its prefix (`Misc` if none match).
pub fn legacy_category_for_id(id: &str) -> &'static str {
    LEGACY_PREFIXES
        .iter()
        .find(|(prefix, _)| id.starts_with(prefix))
        .map(|(_, name)| *name)
        .unwrap_or("Misc")
}
