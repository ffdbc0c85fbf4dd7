use std::error::Error;
use std::fmt::Write as _;

use tessel_blocks::{Block, BlockFamily, BlockPlacementData, BlockUri, FamilyRegistry};
use tessel_geom::{BlockPos, Side, SideMask, Vec3};
use tessel_world::World;

pub type CmdResult = Result<String, Box<dyn Error>>;

fn describe(reg: &FamilyRegistry, block: &Block) -> String {
    let id = reg
        .id_of(block)
        .map(|i| i.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} (id {}, {}, section {}, rotation {}, solid {}, emission {})",
        block.uri(),
        id,
        block.display_name(),
        block.section().unwrap_or("base"),
        block.rotation(),
        block.is_solid(),
        block.emission()
    )
}

fn family<'a>(reg: &'a FamilyRegistry, uri: &str) -> Result<&'a BlockFamily, Box<dyn Error>> {
    let uri: BlockUri = uri.parse()?;
    reg.family(&uri)
        .ok_or_else(|| format!("no family `{}`", uri.family_uri()).into())
}

/// One line per family, then its distinct variants indented.
pub fn list(reg: &FamilyRegistry, verbose: bool) -> CmdResult {
    let mut out = String::new();
    for fam in reg.families() {
        let blocks = fam.blocks();
        writeln!(
            out,
            "{} [{}] {} variant(s){}",
            fam.uri(),
            fam.kind(),
            blocks.len(),
            if fam.categories().is_empty() {
                String::new()
            } else {
                format!(" categories: {}", fam.categories().join(", "))
            }
        )?;
        if verbose {
            for b in blocks {
                writeln!(out, "  {}", describe(reg, b))?;
            }
        }
    }
    Ok(out)
}

pub fn lookup(reg: &FamilyRegistry, uri: &str) -> CmdResult {
    match reg.block_by_uri(uri) {
        Some(b) => Ok(describe(reg, b)),
        None => Err(format!("no block for `{}`", uri).into()),
    }
}

/// Resolves a placement. `neighbors` are filled with the family's archetype first.
pub fn place(
    reg: &FamilyRegistry,
    family_uri: &str,
    data: &BlockPlacementData,
    neighbors: &[Side],
) -> CmdResult {
    let fam = family(reg, family_uri)?;
    let mut world = World::default();
    for side in neighbors {
        world.set(data.pos.offset(*side), fam.archetype().clone());
    }
    match world.place(reg, fam, data) {
        Some(b) => Ok(describe(reg, &b)),
        None => Err(format!("{} rejects this placement", fam.uri()).into()),
    }
}

/// Connection variant for a block of `family_uri` whose listed neighbors connect.
pub fn connect(
    reg: &FamilyRegistry,
    family_uri: &str,
    neighbors: &[Side],
    neighbor_uri: Option<&str>,
) -> CmdResult {
    let fam = family(reg, family_uri)?;
    if !fam.updates_with_neighbors() {
        return Err(format!("{} ({}) does not connect to neighbors", fam.uri(), fam.kind()).into());
    }
    let neighbor = match neighbor_uri {
        Some(u) => reg
            .block_by_uri(u)
            .ok_or_else(|| format!("no block for `{}`", u))?
            .clone(),
        None => fam.archetype().clone(),
    };
    let pos = BlockPos::new(0, 0, 0);
    let mut world = World::default();
    for side in neighbors {
        world.set(pos.offset(*side), neighbor.clone());
    }
    let requested: SideMask = neighbors.iter().copied().collect();
    let block = fam
        .get_block_for_neighbor_update(pos, fam.archetype(), &world)
        .ok_or_else(|| format!("{} has no variant for neighbors {}", fam.uri(), requested))?;
    Ok(format!("neighbors {} -> {}", requested, describe(reg, &block)))
}

pub fn placement_data(pos: BlockPos, attach: Side, view: Vec3, hit: Vec3) -> BlockPlacementData {
    BlockPlacementData::new(pos, attach, view, hit)
}
