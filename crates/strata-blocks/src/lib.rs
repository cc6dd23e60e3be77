//! Block identities, the block registry and catalogue, and foreign material translation.
#![forbid(unsafe_code)]

pub mod catalogue;
pub mod category;
pub mod error;
pub mod identity;
pub mod registry;
pub mod translate;

/// Prefix marking a name that is already a native block id.
pub const NATIVE_NAMESPACE: &str = "hytale:";

/// Fluid level of a full source block.
pub const FULL_FLUID_LEVEL: u8 = 8;

pub use catalogue::{BlockDefinition, Catalogue};
pub use category::{Category, DrawType, MaterialKind, Opacity, legacy_category_for_id};
pub use error::{BlockError, CatalogueError};
pub use identity::{BlockIdentity, Properties};
pub use registry::{BlockRegistry, ExternalNamespace};
pub use translate::{
    FluidPlacement, ForeignMaterial, MaterialTranslator, derive_rotation, legacy_numeric_index,
};
