use strata_blocks::{BlockError, BlockIdentity, Properties};
use proptest::prelude::*;

fn block_id() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,6}(_[A-Z][a-z]{1,6}){0,2}"
}

proptest! {
    // rotation splits into three 2-bit axis parts and recombines exactly
    #[test]
    fn rotation_axes_round_trip(id in block_id(), rot in 0i32..=63) {
        let b = BlockIdentity::new(&id, rot).unwrap();
        let (rx, ry, rz) = (b.rotation_x() as i32, b.rotation_y() as i32, b.rotation_z() as i32);
        prop_assert_eq!(rx, (rot >> 4) & 3);
        prop_assert_eq!(ry, (rot >> 2) & 3);
        prop_assert_eq!(rz, rot & 3);
        prop_assert_eq!(rx * 16 + ry * 4 + rz, rot);
        let again = BlockIdentity::from_axes(&id, rx, ry, rz).unwrap();
        prop_assert_eq!(again, b);
    }

    #[test]
    fn out_of_range_rotation_is_rejected(id in block_id(), rot in prop_oneof![i32::MIN..0, 64..i32::MAX]) {
        let is_invalid = matches!(BlockIdentity::new(&id, rot), Err(BlockError::InvalidArgument(_)));
        prop_assert!(is_invalid);
    }

    // plain blocks share one allocation; equality is structural either way
    #[test]
    fn plain_blocks_are_interned(id in block_id()) {
        let a = BlockIdentity::of(&id).unwrap();
        let b = BlockIdentity::new(&id, 0).unwrap();
        prop_assert!(a.ptr_eq(&b));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn properties_participate_in_equality(id in block_id(), k in "[a-z]{1,5}", v in "[a-z]{1,5}") {
        let props = Properties::from([(k.clone(), v.clone())]);
        let a = BlockIdentity::from_parts(&id, 0, Some(props.clone())).unwrap();
        let b = BlockIdentity::from_parts(&id, 0, Some(props)).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert!(!a.ptr_eq(&b));
        prop_assert_eq!(a.property(&k), Some(v.as_str()));
        prop_assert_ne!(a, BlockIdentity::of(&id).unwrap());
    }
}

#[test]
fn empty_id_is_rejected() {
    assert_eq!(
        BlockIdentity::new("", 0),
        Err(BlockError::InvalidArgument(
            "block id cannot be empty".to_string()
        ))
    );
}

#[test]
fn hash_is_structural() {
    use std::collections::HashSet;
    let mut set = HashSet::new();
    set.insert(BlockIdentity::new("Wood_Oak_Trunk", 4).unwrap());
    assert!(set.contains(&BlockIdentity::new("Wood_Oak_Trunk", 4).unwrap()));
    assert!(!set.contains(&BlockIdentity::new("Wood_Oak_Trunk", 1).unwrap()));
}
