use super::trunk::{Trunk, TrunkKind};
use super::Structure;
use crate::block_definitions::{BEACON, DIAMOND_BLOCK, SPRUCE_LEAVES, SPRUCE_LOG};
use crate::coordinate::Coord;
use crate::error::GenerationError;
use crate::generators::cuboid;
use crate::world_editor::{WorldEditor, WorldInterface};
use rand::Rng;

/// Spruce tree with a round canopy, standing on a diamond pedestal with a
/// beacon at its origin.
#[derive(Debug, Clone)]
pub struct BigTree {
    pub origin: Coord,
    pub max_trunk_height: i32,
    trunk: Trunk,
}

impl BigTree {
    pub fn new<R: Rng + ?Sized>(origin: Coord, max_trunk_height: i32, rng: &mut R) -> Self {
        Self {
            origin,
            max_trunk_height,
            trunk: Trunk::grow(TrunkKind::BigTree, max_trunk_height, rng),
        }
    }

    pub fn trunk_height(&self) -> i32 {
        self.trunk.height()
    }

    pub fn trunk(&self) -> Vec<Coord> {
        self.trunk.positions(self.origin)
    }

    pub fn leaves(&self) -> Vec<Coord> {
        let th = self.trunk_height();
        let mut positions = Vec::new();
        for x in -8..=8 {
            for z in -8..=8 {
                if x * x + z * z >= 49 {
                    continue;
                }
                for y in th - 10..th + 3 {
                    positions.push(self.origin + Coord::new(x, y, z));
                }
            }
        }
        positions
    }

    pub fn pedestal(&self) -> Vec<Coord> {
        cuboid(
            self.origin + Coord::new(-1, -1, -1),
            self.origin + Coord::new(1, -1, 1),
        )
    }
}

impl Structure for BigTree {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.leaves(), &SPRUCE_LEAVES)?;
        editor.place(&self.trunk(), &SPRUCE_LOG)?;
        editor.place(&self.pedestal(), &DIAMOND_BLOCK)?;
        editor.place_block(self.origin, &BEACON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::UP;
    use crate::test_utilities::memory_editor;

    #[test]
    fn test_beacon_sits_on_diamond() {
        let mut editor = memory_editor(11);
        let origin = Coord::new(0, 80, 0);
        let tree = BigTree::new(origin, 20, editor.rng());
        tree.place(&mut editor).unwrap();

        let world = editor.world();
        assert_eq!(world.block_at(origin).unwrap().name, "beacon");
        assert_eq!(world.block_at(origin - UP).unwrap().name, "diamond_block");
        assert_eq!(world.positions_of("diamond_block").len(), 9);
    }

    #[test]
    fn test_canopy_follows_trunk_height() {
        let mut editor = memory_editor(5);
        let tree = BigTree::new(Coord::new(0, 80, 0), 20, editor.rng());
        let th = tree.trunk_height();
        let leaves = tree.leaves();
        assert_eq!(leaves.iter().map(|p| p.y).max(), Some(80 + th + 2));
        assert_eq!(leaves.iter().map(|p| p.y).min(), Some(80 + th - 10));
        assert!(leaves.iter().all(|p| p.x.abs() < 7 && p.z.abs() < 7));
    }
}
