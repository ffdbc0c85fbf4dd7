//! In-memory block store with placement and neighbor-update propagation.
#![forbid(unsafe_code)]

use hashbrown::HashMap;
use tessel_blocks::{Block, BlockFamily, BlockPlacementData, FamilyRegistry, WorldView};
use tessel_geom::BlockPos;

pub type ChunkKey = (i32, i32, i32);

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldStats {
    pub chunk_entries: usize,
    pub blocks: usize,
    pub rev_entries: usize,
}

/// Chunk-keyed block store with per-chunk change stamps.
#[derive(Debug, Clone)]
pub struct World {
    sx: i32,
    sy: i32,
    sz: i32,
    // Map per-chunk: key=(cx,cy,cz) -> world position -> Block
    inner: HashMap<ChunkKey, HashMap<BlockPos, Block>>,
    // Latest change stamp affecting each chunk. Entries outlive emptied
    // chunks so a removal stays visible through `rev`.
    rev: HashMap<ChunkKey, u64>,
    counter: u64,
}

impl Default for World {
    fn default() -> Self {
        World::new(16, 16, 16)
    }
}

impl World {
    pub fn new(sx: i32, sy: i32, sz: i32) -> Self {
        Self {
            sx: sx.max(1),
            sy: sy.max(1),
            sz: sz.max(1),
            inner: HashMap::new(),
            rev: HashMap::new(),
            counter: 0,
        }
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            chunk_entries: self.inner.len(),
            blocks: self.inner.values().map(|m| m.len()).sum(),
            rev_entries: self.rev.len(),
        }
    }

    #[inline]
    pub fn chunk_key(&self, pos: BlockPos) -> ChunkKey {
        (
            pos.x.div_euclid(self.sx),
            pos.y.div_euclid(self.sy),
            pos.z.div_euclid(self.sz),
        )
    }

    pub fn get(&self, pos: BlockPos) -> Option<&Block> {
        self.inner.get(&self.chunk_key(pos))?.get(&pos)
    }

    /// Stores `block` at `pos`, returning what was there.
    pub fn set(&mut self, pos: BlockPos, block: Block) -> Option<Block> {
        let k = self.chunk_key(pos);
        self.bump(k);
        self.inner.entry(k).or_default().insert(pos, block)
    }

    /// Clears `pos`. An emptied chunk is dropped but keeps its change stamp.
    pub fn remove(&mut self, pos: BlockPos) -> Option<Block> {
        let k = self.chunk_key(pos);
        let chunk = self.inner.get_mut(&k)?;
        let old = chunk.remove(&pos)?;
        if chunk.is_empty() {
            self.inner.remove(&k);
        }
        self.bump(k);
        Some(old)
    }

    /// Resolves the variant of `family` for `data`, stores it and refreshes
    /// connecting neighbors. `None` when the family rejects the placement.
    pub fn place(
        &mut self,
        registry: &FamilyRegistry,
        family: &BlockFamily,
        data: &BlockPlacementData,
    ) -> Option<Block> {
        let Some(block) = family.get_block_for_placement(data, &*self).cloned() else {
            log::debug!("{}: placement at {} rejected", family.uri(), data.pos);
            return None;
        };
        self.set(data.pos, block.clone());
        self.update_neighbors(registry, data.pos);
        Some(block)
    }

    /// Removes the block at `pos` and refreshes connecting neighbors.
    pub fn break_block(&mut self, registry: &FamilyRegistry, pos: BlockPos) -> Option<Block> {
        let old = self.remove(pos)?;
        self.update_neighbors(registry, pos);
        Some(old)
    }

    /// Re-resolves every neighbor of `pos` whose family connects to neighbors.
    /// Returns the positions whose block changed.
    pub fn update_neighbors(&mut self, registry: &FamilyRegistry, pos: BlockPos) -> Vec<BlockPos> {
        let mut changed = Vec::new();
        for (_, npos) in pos.neighbors() {
            let Some(old) = self.get(npos).cloned() else {
                continue;
            };
            let Some(family) = registry.family_of(&old) else {
                log::warn!("{}: block at {} has no registered family", old.uri(), npos);
                continue;
            };
            if !family.updates_with_neighbors() {
                continue;
            }
            match family.get_block_for_neighbor_update(npos, &old, &*self) {
                Some(new) if new != old => {
                    log::debug!("{}: {} -> {}", npos, old.uri(), new.uri());
                    self.set(npos, new);
                    changed.push(npos);
                }
                Some(_) => {}
                None => log::debug!("{}: no variant for neighborhood at {}", family.uri(), npos),
            }
        }
        changed
    }

    /// All blocks stored for one chunk.
    pub fn snapshot_for_chunk(&self, key: ChunkKey) -> Vec<(BlockPos, Block)> {
        let mut out: Vec<(BlockPos, Block)> = self
            .inner
            .get(&key)
            .map(|m| m.iter().map(|(p, b)| (*p, b.clone())).collect())
            .unwrap_or_default();
        out.sort_by_key(|(p, _)| *p);
        out
    }

    // Marks the chunk and returns a new monotonically increasing stamp.
    fn bump(&mut self, key: ChunkKey) -> u64 {
        self.counter = self.counter.wrapping_add(1).max(1);
        self.rev.insert(key, self.counter);
        self.counter
    }

    /// Latest change stamp for a chunk; 0 if never touched.
    pub fn rev(&self, key: ChunkKey) -> u64 {
        self.rev.get(&key).copied().unwrap_or(0)
    }
}

impl WorldView for World {
    fn block_at(&self, pos: BlockPos) -> Option<&Block> {
        self.get(pos)
    }
}
