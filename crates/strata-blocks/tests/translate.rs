use strata_blocks::{
    BlockIdentity, BlockRegistry, Catalogue, ForeignMaterial, MaterialTranslator,
    derive_rotation, legacy_numeric_index,
};

#[test]
fn unknown_name_with_legacy_type_two_is_grass() {
    let t = MaterialTranslator::new();
    let mut m = ForeignMaterial::named("somemod:mystery_block");
    m.block_type = 2;
    assert_eq!(t.to_block_id(&m), "Soil_Grass");
    assert_eq!(t.to_block_id(&ForeignMaterial::legacy(2)), "Soil_Grass");
}

#[test]
fn unknown_name_without_type_is_stone() {
    let t = MaterialTranslator::new();
    assert_eq!(t.to_block_id(&ForeignMaterial::named("somemod:thing")), "Rock_Stone");
}

#[test]
fn native_namespace_passes_through() {
    let t = MaterialTranslator::new();
    assert_eq!(t.to_block_id(&ForeignMaterial::named("hytale:Soil_Dirt")), "Soil_Dirt");
    assert_eq!(
        t.to_block_id(&ForeignMaterial::named("hytale:Custom_Not_Catalogued")),
        "Custom_Not_Catalogued"
    );
    // an empty suffix is not a usable id
    assert_eq!(t.to_block_id(&ForeignMaterial::named("hytale:")), "Rock_Stone");
}

#[test]
fn table_and_bare_names() {
    let t = MaterialTranslator::new();
    assert_eq!(t.to_block_id(&ForeignMaterial::named("minecraft:spruce_log")), "Wood_Fir_Trunk");
    assert_eq!(t.to_block_id(&ForeignMaterial::named("diamond_ore")), "Ore_Adamantite_Stone");
    assert_eq!(t.to_block_id(&ForeignMaterial::named("minecraft:cave_air")), "Empty");
}

#[test]
fn fluids_route_to_the_fluid_plane() {
    let t = MaterialTranslator::new();
    let water = ForeignMaterial::named("minecraft:water");
    assert_eq!(t.to_block_id(&water), "Empty");
    let f = t.fluid_of(&water).unwrap();
    assert_eq!((f.name, f.level), ("Water_Source", 8));

    let flowing = ForeignMaterial::named("minecraft:lava").with_property("level", "3");
    assert_eq!(t.to_block_id(&flowing), "Lava_Source");
    let f = t.fluid_of(&flowing).unwrap();
    assert_eq!((f.name, f.level), ("Lava_Source", 5));

    let falling = ForeignMaterial::named("minecraft:water").with_property("level", "9");
    assert_eq!(t.fluid_of(&falling).unwrap().level, 8);
    assert!(t.fluid_of(&ForeignMaterial::named("minecraft:stone")).is_none());
}

#[test]
fn bare_fluid_names_match_namespaced_ones() {
    let t = MaterialTranslator::new();
    for (bare, fluid) in [("water", "Water_Source"), ("lava", "Lava_Source")] {
        let m = ForeignMaterial::named(bare);
        assert_eq!(t.to_block_id(&m), "Empty");
        assert_eq!(t.fluid_of(&m).unwrap().name, fluid);
        let flowing = ForeignMaterial::named(bare).with_property("level", "2");
        assert_eq!(t.to_block_id(&flowing), fluid);
    }
}

#[test]
fn rotation_from_properties() {
    let log = |axis: &str| ForeignMaterial::named("minecraft:oak_log").with_property("axis", axis);
    assert_eq!(derive_rotation(&log("y")), 0);
    assert_eq!(derive_rotation(&log("x")), 4);
    assert_eq!(derive_rotation(&log("z")), 1);

    let facing = |f: &str| ForeignMaterial::named("minecraft:oak_stairs").with_property("facing", f);
    assert_eq!(derive_rotation(&facing("north")), 0);
    assert_eq!(derive_rotation(&facing("south")), 8);
    assert_eq!(derive_rotation(&facing("east")), 4);
    assert_eq!(derive_rotation(&facing("west")), 12);
    assert_eq!(derive_rotation(&facing("down")), 32);

    let slab = ForeignMaterial::named("minecraft:stone_slab").with_property("half", "top");
    assert_eq!(derive_rotation(&slab), 32);

    // axis wins over facing; categories are not combined
    let both = log("z").with_property("facing", "south").with_property("half", "top");
    assert_eq!(derive_rotation(&both), 1);
    // an unrecognised axis value falls through to facing
    let odd = log("w").with_property("facing", "west");
    assert_eq!(derive_rotation(&odd), 12);
    assert_eq!(derive_rotation(&ForeignMaterial::named("minecraft:stone")), 0);
}

#[test]
fn identity_with_rotation() {
    let t = MaterialTranslator::new();
    let m = ForeignMaterial::named("minecraft:birch_log").with_property("axis", "x");
    assert_eq!(
        t.to_block_identity_with_rotation(&m),
        BlockIdentity::new("Wood_Birch_Trunk", 4).unwrap()
    );
    assert!(t.to_block_identity(&m).ptr_eq(&BlockIdentity::of("Wood_Birch_Trunk").unwrap()));
}

#[test]
fn legacy_numeric_table_is_independent() {
    assert_eq!(legacy_numeric_index("Empty"), 0);
    assert_eq!(legacy_numeric_index("Rock_Stone"), 1);
    assert_eq!(legacy_numeric_index("Water_Source"), 6);
    assert_eq!(legacy_numeric_index("Plant_Cactus_1"), 52);
    assert_eq!(legacy_numeric_index("Rock_Aqua"), 1);
    assert_eq!(legacy_numeric_index(""), 1);
}

#[test]
fn every_table_target_is_catalogued() {
    let reg = BlockRegistry::new(Catalogue::builtin().unwrap());
    let t = MaterialTranslator::new();
    for (foreign, native) in t.entries() {
        assert!(reg.contains(native), "{foreign} -> {native} missing from catalogue");
    }
}

#[test]
fn resolve_name_for_imported_content() {
    let reg = BlockRegistry::new(Catalogue::builtin().unwrap());
    let t = MaterialTranslator::new();
    assert_eq!(t.resolve_name(&reg, "Rock_Basalt"), "Rock_Basalt");
    assert_eq!(t.resolve_name(&reg, "hytale:Soil_Mud"), "Soil_Mud");
    assert_eq!(t.resolve_name(&reg, "minecraft:granite"), "Rock_Shale");
    assert_eq!(t.resolve_name(&reg, "gibberish"), "Rock_Stone");
    assert!(t.is_known_block(&reg, "Soil_Sand_White"));
    assert!(!t.is_known_block(&reg, "gibberish"));
    assert!(!t.is_known_block(&reg, ""));
}
