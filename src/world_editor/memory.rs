use super::{BuildArea, HeightMap, WorldInterface};
use crate::block_definitions::Block;
use crate::coordinate::Coord;
use crate::error::GenerationError;
use fnv::FnvHashMap;

/// A world that lives in a hash map.
///
/// Used for dry runs and to inspect generated structures in tests. It can be
/// switched into the two failure states a real world interface reports.
#[derive(Debug, Clone)]
pub struct MemoryWorld {
    area: Option<BuildArea>,
    heightmap: HeightMap,
    reachable: bool,
    blocks: FnvHashMap<Coord, Block>,
}

impl MemoryWorld {
    pub fn new(area: BuildArea, heightmap: HeightMap) -> Self {
        Self {
            area: Some(area),
            heightmap,
            reachable: true,
            blocks: FnvHashMap::default(),
        }
    }

    /// Flat terrain at `height` everywhere in `area`.
    pub fn flat(area: BuildArea, height: i32) -> Self {
        let heightmap = HeightMap::flat(&area, height);
        Self::new(area, heightmap)
    }

    /// A world whose operator has not set a build area.
    pub fn unconfigured() -> Self {
        Self {
            area: None,
            heightmap: HeightMap::new(0, 0, Vec::new()),
            reachable: true,
            blocks: FnvHashMap::default(),
        }
    }

    /// A world that refuses every connection.
    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    pub fn block_at(&self, position: Coord) -> Option<&Block> {
        self.blocks.get(&position)
    }

    pub fn blocks(&self) -> &FnvHashMap<Coord, Block> {
        &self.blocks
    }

    /// Positions currently holding a block called `name` (any namespace).
    pub fn positions_of(&self, name: &str) -> Vec<Coord> {
        let mut positions: Vec<Coord> = self
            .blocks
            .iter()
            .filter(|(_, block)| block.name == name)
            .map(|(position, _)| *position)
            .collect();
        positions.sort();
        positions
    }

    fn ensure_reachable(&self) -> Result<(), GenerationError> {
        if self.reachable {
            Ok(())
        } else {
            Err(GenerationError::Connection(
                "in-memory world is marked unreachable".to_string(),
            ))
        }
    }
}

impl WorldInterface for MemoryWorld {
    fn check_connection(&mut self) -> Result<(), GenerationError> {
        self.ensure_reachable()
    }

    fn build_area(&mut self) -> Result<BuildArea, GenerationError> {
        self.ensure_reachable()?;
        self.area
            .ok_or_else(|| GenerationError::NotConfigured("no build area set".to_string()))
    }

    fn heightmap(&mut self, _area: &BuildArea) -> Result<HeightMap, GenerationError> {
        self.ensure_reachable()?;
        Ok(self.heightmap.clone())
    }

    fn place_blocks(&mut self, blocks: &[(Coord, Block)]) -> Result<(), GenerationError> {
        self.ensure_reachable()?;
        for (position, block) in blocks {
            self.blocks.insert(*position, block.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_states() {
        let mut world = MemoryWorld::unconfigured();
        assert!(world.check_connection().is_ok());
        assert!(matches!(
            world.build_area(),
            Err(GenerationError::NotConfigured(_))
        ));

        let area = BuildArea::new(Coord::new(0, 0, 0), Coord::new(3, 10, 3));
        let mut world = MemoryWorld::flat(area, 4).unreachable();
        assert!(matches!(
            world.check_connection(),
            Err(GenerationError::Connection(_))
        ));
    }

    #[test]
    fn test_flat_heightmap_covers_area() {
        let area = BuildArea::new(Coord::new(-2, 0, 5), Coord::new(2, 10, 9));
        let mut world = MemoryWorld::flat(area, 63);
        let map = world.heightmap(&area).unwrap();
        assert_eq!(map.get(-2, 5), Some(63));
        assert_eq!(map.get(2, 9), Some(63));
        assert_eq!(map.get(3, 9), None);
    }
}
