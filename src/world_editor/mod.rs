//! Block placement against an external world.
//!
//! This module provides the `WorldEditor` struct which resolves materials into
//! concrete blocks and forwards them, one batch per `place` call, to a
//! [`WorldInterface`].
//!
//! # Module Structure
//!
//! - `http` - GDMC HTTP interface client
//! - `memory` - In-memory world used by tests and dry runs

pub mod http;
pub mod memory;

pub use http::GdmcClient;
pub use memory::MemoryWorld;

use crate::block_definitions::{Block, Material};
use crate::coordinate::Coord;
use crate::error::GenerationError;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// The narrow surface the generator needs from a world.
pub trait WorldInterface {
    /// Fails with [`GenerationError::Connection`] when the world cannot be reached.
    fn check_connection(&mut self) -> Result<(), GenerationError>;

    /// Fails with [`GenerationError::NotConfigured`] when no build area is set.
    fn build_area(&mut self) -> Result<BuildArea, GenerationError>;

    /// Terrain surface heights covering `area`.
    fn heightmap(&mut self, area: &BuildArea) -> Result<HeightMap, GenerationError>;

    /// Writes resolved blocks; later entries win over earlier ones.
    fn place_blocks(&mut self, blocks: &[(Coord, Block)]) -> Result<(), GenerationError>;
}

/// The rectangular region the operator designated for building.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArea {
    pub min: Coord,
    pub max: Coord,
}

impl BuildArea {
    pub fn new(corner1: Coord, corner2: Coord) -> Self {
        Self {
            min: Coord::new(
                corner1.x.min(corner2.x),
                corner1.y.min(corner2.y),
                corner1.z.min(corner2.z),
            ),
            max: Coord::new(
                corner1.x.max(corner2.x),
                corner1.y.max(corner2.y),
                corner1.z.max(corner2.z),
            ),
        }
    }

    /// Horizontal center at the area's floor height.
    pub fn center(&self) -> Coord {
        Coord::new(
            (self.min.x + self.max.x) / 2,
            self.min.y,
            (self.min.z + self.max.z) / 2,
        )
    }

    pub fn size_x(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn size_z(&self) -> i32 {
        self.max.z - self.min.z + 1
    }

    pub fn contains_xz(&self, x: i32, z: i32) -> bool {
        (self.min.x..=self.max.x).contains(&x) && (self.min.z..=self.max.z).contains(&z)
    }
}

/// Surface heights of a build area, indexed in world coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    min_x: i32,
    min_z: i32,
    /// `heights[x][z]`, relative to `(min_x, min_z)`.
    heights: Vec<Vec<i32>>,
}

impl HeightMap {
    pub fn new(min_x: i32, min_z: i32, heights: Vec<Vec<i32>>) -> Self {
        Self {
            min_x,
            min_z,
            heights,
        }
    }

    /// A map of constant height covering `area`.
    pub fn flat(area: &BuildArea, height: i32) -> Self {
        let heights = vec![vec![height; area.size_z() as usize]; area.size_x() as usize];
        Self::new(area.min.x, area.min.z, heights)
    }

    pub fn get(&self, x: i32, z: i32) -> Option<i32> {
        let dx = usize::try_from(x - self.min_x).ok()?;
        let dz = usize::try_from(z - self.min_z).ok()?;
        self.heights.get(dx)?.get(dz).copied()
    }

    pub fn max(&self) -> Option<i32> {
        self.heights.iter().flatten().copied().max()
    }

    pub fn min(&self) -> Option<i32> {
        self.heights.iter().flatten().copied().min()
    }

    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    pub fn min_z(&self) -> i32 {
        self.min_z
    }

    pub fn size_x(&self) -> usize {
        self.heights.len()
    }

    pub fn size_z(&self) -> usize {
        self.heights.first().map_or(0, Vec::len)
    }
}

/// The main world editor struct for placing blocks.
///
/// Owns the run's single random stream: structures draw their one-time
/// decisions from [`WorldEditor::rng`] and palettes are sampled from the same
/// stream while placing.
pub struct WorldEditor<W: WorldInterface> {
    world: W,
    rng: ChaCha8Rng,
    batches: usize,
    blocks: usize,
}

impl<W: WorldInterface> WorldEditor<W> {
    pub fn new(world: W, rng: ChaCha8Rng) -> Self {
        Self {
            world,
            rng,
            batches: 0,
            blocks: 0,
        }
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Paints every position with `material`, sampling palettes per position.
    ///
    /// An empty position list is not sent and does not count as a batch.
    pub fn place<M: Into<Material>>(
        &mut self,
        positions: &[Coord],
        material: M,
    ) -> Result<(), GenerationError> {
        if positions.is_empty() {
            return Ok(());
        }
        let material: Material = material.into();

        let mut resolved: Vec<(Coord, Block)> = Vec::with_capacity(positions.len());
        for &position in positions {
            if let Some(block) = material.resolve(&mut self.rng) {
                resolved.push((position, block.clone()));
            }
        }
        if resolved.is_empty() {
            log::warn!("Skipping batch of {} positions: empty palette", positions.len());
            return Ok(());
        }

        log::debug!(
            "Placing {} blocks, first {} at {}",
            resolved.len(),
            resolved[0].1.id(),
            resolved[0].0
        );
        self.world.place_blocks(&resolved)?;
        self.batches += 1;
        self.blocks += resolved.len();
        Ok(())
    }

    /// Single-position shorthand for [`WorldEditor::place`].
    pub fn place_block<M: Into<Material>>(
        &mut self,
        position: Coord,
        material: M,
    ) -> Result<(), GenerationError> {
        self.place(&[position], material)
    }

    /// Number of non-empty placement batches sent so far.
    pub fn batch_count(&self) -> usize {
        self.batches
    }

    pub fn block_count(&self) -> usize {
        self.blocks
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_definitions::{base_palette, AIR, STONE_BRICKS};
    use crate::deterministic_rng::run_rng;

    fn editor() -> WorldEditor<MemoryWorld> {
        let area = BuildArea::new(Coord::new(0, 0, 0), Coord::new(15, 255, 15));
        WorldEditor::new(MemoryWorld::flat(area, 64), run_rng(Some(1)))
    }

    #[test]
    fn test_build_area_normalizes_corners() {
        let area = BuildArea::new(Coord::new(10, 80, -5), Coord::new(-10, 60, 5));
        assert_eq!(area.min, Coord::new(-10, 60, -5));
        assert_eq!(area.max, Coord::new(10, 80, 5));
        assert_eq!(area.center(), Coord::new(0, 60, 0));
        assert_eq!(area.size_x(), 21);
        assert!(area.contains_xz(10, -5));
        assert!(!area.contains_xz(11, 0));
    }

    #[test]
    fn test_heightmap_world_indexing() {
        let map = HeightMap::new(100, -20, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
        assert_eq!(map.get(100, -20), Some(1));
        assert_eq!(map.get(102, -19), Some(6));
        assert_eq!(map.get(99, -20), None);
        assert_eq!(map.get(100, -18), None);
        assert_eq!(map.max(), Some(6));
        assert_eq!(map.min(), Some(1));
        assert_eq!((map.size_x(), map.size_z()), (3, 2));
    }

    #[test]
    fn test_place_counts_batches_and_last_write_wins() {
        let mut editor = editor();
        let p = Coord::new(1, 70, 1);
        editor.place(&[p, p + Coord::new(1, 0, 0)], &*STONE_BRICKS).unwrap();
        editor.place(&[], &*STONE_BRICKS).unwrap();
        editor.place_block(p, &AIR).unwrap();

        assert_eq!(editor.batch_count(), 2);
        assert_eq!(editor.block_count(), 3);
        assert!(editor.world().block_at(p).unwrap().is_air());
        assert_eq!(
            editor.world().block_at(p + Coord::new(1, 0, 0)).unwrap().name,
            "stone_bricks"
        );
    }

    #[test]
    fn test_palette_sampled_per_position() {
        let mut editor = editor();
        let positions: Vec<Coord> = (0..200).map(|x| Coord::new(x, 70, 0)).collect();
        editor.place(&positions, base_palette()).unwrap();

        let distinct: std::collections::BTreeSet<String> = positions
            .iter()
            .filter_map(|p| editor.world().block_at(*p))
            .map(|b| b.name.clone())
            .collect();
        assert!(distinct.len() > 1);
        assert!(distinct.iter().all(|name| name.contains("stone_bricks")));
    }
}
