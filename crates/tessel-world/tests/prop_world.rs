use proptest::prelude::*;
use tessel_blocks::{BlockPlacementData, BlockUri, DefaultBlockBuilder, DefinitionsConfig, FamilyRegistry};
use tessel_geom::{BlockPos, Side, SideMask, Vec3};
use tessel_world::World;

const DEFS: &str = r#"
[[families]]
uri = "core:pipe"
connections = "all"
[families.sections.no_connections]
[families.sections.one_connection]
[families.sections.line_connection]
[families.sections.2d_corner]
[families.sections.2d_t]
[families.sections.3d_corner]
[families.sections.cross]
[families.sections.4d_side]
[families.sections.5d_side]
[families.sections.all]
"#;

fn registry() -> FamilyRegistry {
    let cfg: DefinitionsConfig = toml::from_str(DEFS).expect("defs");
    FamilyRegistry::from_config(cfg, &DefaultBlockBuilder).expect("registry")
}

fn cell() -> impl Strategy<Value = (i32, i32, i32)> {
    (-3i32..=3, -3i32..=3, -3i32..=3)
}

proptest! {
    // After any sequence of placements and removals every pipe matches its neighborhood
    #[test]
    fn pipes_match_neighbors_after_edits(
        places in prop::collection::vec(cell(), 1..40),
        breaks in prop::collection::vec(cell(), 0..10),
    ) {
        let reg = registry();
        let pipe = reg.family(&"core:pipe".parse::<BlockUri>().unwrap()).unwrap();
        let mut world = World::new(4, 4, 4);
        for (x, y, z) in &places {
            let data = BlockPlacementData::new(
                BlockPos::new(*x, *y, *z),
                Side::Top,
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::ZERO,
            );
            prop_assert!(world.place(&reg, pipe, &data).is_some());
        }
        for (x, y, z) in &breaks {
            world.break_block(&reg, BlockPos::new(*x, *y, *z));
        }
        for (x, y, z) in &places {
            let pos = BlockPos::new(*x, *y, *z);
            let Some(block) = world.get(pos) else { continue };
            let expected: SideMask = pos
                .neighbors()
                .filter(|(_, n)| world.get(*n).is_some())
                .map(|(s, _)| s)
                .collect();
            let id = expected.to_string();
            prop_assert_eq!(block.uri().identifier(), Some(id.as_str()));
            prop_assert!(world.update_neighbors(&reg, pos).is_empty());
        }
    }
}
