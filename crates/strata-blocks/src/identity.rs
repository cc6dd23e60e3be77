use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::error::BlockError;

pub const EMPTY_ID: &str = "Empty";
pub const STONE_ID: &str = "Rock_Stone";
pub const DIRT_ID: &str = "Soil_Dirt";
pub const GRASS_ID: &str = "Soil_Grass";
pub const SAND_ID: &str = "Soil_Sand";
pub const GRAVEL_ID: &str = "Soil_Gravel";
pub const BEDROCK_ID: &str = "Rock_Bedrock";
pub const WATER_ID: &str = "Water_Source";
pub const LAVA_ID: &str = "Lava_Source";

pub const MAX_ROTATION: i32 = 63;

/// Optional extension properties carried by a block, kept in key order.
pub type Properties = BTreeMap<String, String>;

#[derive(Debug, PartialEq, Eq, Hash)]
struct Inner {
    id: Box<str>,
    rotation: u8,
    properties: Option<Properties>,
}

/// Immutable block value: namespaced id, 6-bit rotation and optional properties.
///
/// Rotation packs three quarter-turn axis components as `rx * 16 + ry * 4 + rz`.
/// Identities without properties and with rotation 0 come from a shared pool, so
/// cloning the millions of references a chunk holds is a pointer copy of the same
/// allocation per id.
#[derive(Clone)]
pub struct BlockIdentity(Arc<Inner>);

fn intern_pool() -> &'static Mutex<HashMap<Box<str>, BlockIdentity>> {
    static POOL: OnceLock<Mutex<HashMap<Box<str>, BlockIdentity>>> = OnceLock::new();
    POOL.get_or_init(|| Mutex::new(HashMap::new()))
}

fn interned(id: &str) -> BlockIdentity {
    let mut pool = intern_pool().lock();
    if let Some(b) = pool.get(id) {
        return b.clone();
    }
    let b = BlockIdentity(Arc::new(Inner {
        id: id.into(),
        rotation: 0,
        properties: None,
    }));
    pool.insert(id.into(), b.clone());
    b
}

impl BlockIdentity {
    /// Block with the given rotation and no properties.
    pub fn new(id: &str, rotation: i32) -> Result<Self, BlockError> {
        Self::from_parts(id, rotation, None)
    }

    /// Block with rotation 0 and no properties (always interned).
    pub fn of(id: &str) -> Result<Self, BlockError> {
        Self::from_parts(id, 0, None)
    }

    pub fn from_parts(
        id: &str,
        rotation: i32,
        properties: Option<Properties>,
    ) -> Result<Self, BlockError> {
        if id.is_empty() {
            return Err(BlockError::InvalidArgument(
                "block id cannot be empty".to_string(),
            ));
        }
        if !(0..=MAX_ROTATION).contains(&rotation) {
            return Err(BlockError::InvalidArgument(format!(
                "rotation must be 0-63, got {rotation}"
            )));
        }
        Ok(Self::from_valid(id, rotation as u8, properties))
    }

    /// Build from per-axis quarter turns; each component is masked to 2 bits.
    pub fn from_axes(id: &str, rx: i32, ry: i32, rz: i32) -> Result<Self, BlockError> {
        Self::new(id, (rx & 3) * 16 + (ry & 3) * 4 + (rz & 3))
    }

    // Caller guarantees a non-empty id and rotation <= 63.
    pub(crate) fn from_valid(id: &str, rotation: u8, properties: Option<Properties>) -> Self {
        debug_assert!(!id.is_empty() && rotation as i32 <= MAX_ROTATION);
        if rotation == 0 && properties.is_none() {
            return interned(id);
        }
        BlockIdentity(Arc::new(Inner {
            id: id.into(),
            rotation,
            properties,
        }))
    }

    pub fn empty() -> Self {
        interned(EMPTY_ID)
    }
    pub fn stone() -> Self {
        interned(STONE_ID)
    }
    pub fn dirt() -> Self {
        interned(DIRT_ID)
    }
    pub fn grass() -> Self {
        interned(GRASS_ID)
    }
    pub fn sand() -> Self {
        interned(SAND_ID)
    }
    pub fn gravel() -> Self {
        interned(GRAVEL_ID)
    }
    pub fn bedrock() -> Self {
        interned(BEDROCK_ID)
    }
    pub fn water() -> Self {
        interned(WATER_ID)
    }
    pub fn lava() -> Self {
        interned(LAVA_ID)
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.0.id
    }

    #[inline]
    pub fn rotation(&self) -> u8 {
        self.0.rotation
    }

    #[inline]
    pub fn rotation_x(&self) -> u8 {
        (self.0.rotation >> 4) & 3
    }

    #[inline]
    pub fn rotation_y(&self) -> u8 {
        (self.0.rotation >> 2) & 3
    }

    #[inline]
    pub fn rotation_z(&self) -> u8 {
        self.0.rotation & 3
    }

    pub fn properties(&self) -> Option<&Properties> {
        self.0.properties.as_ref()
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.0
            .properties
            .as_ref()
            .and_then(|p| p.get(key))
            .map(|s| s.as_str())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        &*self.0.id == EMPTY_ID
    }

    pub fn is_fluid(&self) -> bool {
        self.0.id.contains("_Source")
    }

    /// True when both values share one allocation (interned or cloned).
    #[inline]
    pub fn ptr_eq(&self, other: &BlockIdentity) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn with_rotation(&self, rotation: i32) -> Result<Self, BlockError> {
        if rotation == self.0.rotation as i32 {
            return Ok(self.clone());
        }
        Self::from_parts(&self.0.id, rotation, self.0.properties.clone())
    }

    pub fn with_properties(&self, properties: Option<Properties>) -> Self {
        Self::from_valid(&self.0.id, self.0.rotation, properties)
    }
}

impl PartialEq for BlockIdentity {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl Eq for BlockIdentity {}

impl Hash for BlockIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for BlockIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.0.properties, self.0.rotation) {
            (None, 0) => write!(f, "{}", self.0.id),
            (None, r) => write!(f, "{}[rot={}]", self.0.id, r),
            (Some(p), r) => write!(f, "{}[rot={}, props={:?}]", self.0.id, r, p),
        }
    }
}

impl fmt::Debug for BlockIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockIdentity({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(BlockIdentity::stone().to_string(), "Rock_Stone");
        let r = BlockIdentity::new("Wood_Oak_Trunk", 4).unwrap();
        assert_eq!(r.to_string(), "Wood_Oak_Trunk[rot=4]");
        let p = BlockIdentity::from_parts(
            "Plant_Fern",
            0,
            Some(Properties::from([("tint".to_string(), "dark".to_string())])),
        )
        .unwrap();
        assert_eq!(p.to_string(), "Plant_Fern[rot=0, props={\"tint\": \"dark\"}]");
    }

    #[test]
    fn rotated_blocks_are_not_pooled() {
        let a = BlockIdentity::new("Wood_Oak_Trunk", 4).unwrap();
        let b = BlockIdentity::new("Wood_Oak_Trunk", 4).unwrap();
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn with_rotation_same_value_is_identity() {
        let a = BlockIdentity::stone();
        assert!(a.with_rotation(0).unwrap().ptr_eq(&a));
        let back = a.with_rotation(16).unwrap().with_rotation(0).unwrap();
        assert!(back.ptr_eq(&a));
    }

    #[test]
    fn fluid_ids() {
        assert!(BlockIdentity::water().is_fluid());
        assert!(BlockIdentity::lava().is_fluid());
        assert!(!BlockIdentity::stone().is_fluid());
        assert!(BlockIdentity::empty().is_empty());
    }
}
