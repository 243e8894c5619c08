use super::{InteriorFrame, LanternChains};
use crate::block_definitions::{
    Block, CRYING_OBSIDIAN, END_PORTAL, END_ROD, END_STONE_BRICKS, END_STONE_BRICK_SLAB,
    OBSIDIAN, PURPUR_BLOCK, PURPUR_PILLAR, SOUL_LANTERN,
};
use crate::coordinate::{Coord, UP};
use crate::district::Facing;
use crate::error::GenerationError;
use crate::generators::cuboid;
use crate::structures::tower::Tower;
use crate::structures::Structure;
use crate::world_editor::{WorldEditor, WorldInterface};
use fnv::FnvHashSet;
use itertools::iproduct;
use rand::Rng;

const LANTERNS: usize = 6;
const MAX_CHAIN_LENGTH: i32 = 4;
const PILLAR_OFFSET: i32 = 5;

/// Crying obsidian where the bit is set, obsidian elsewhere, one bit per
/// perimeter block.
const PERIMETER_PATTERN: u32 = 0b1011_0010_1110_0101_0011_0110;

/// A lit end portal set into the floor.
#[derive(Debug, Clone)]
pub struct Teleporter {
    pub origin: Coord,
}

impl Teleporter {
    pub fn new(origin: Coord) -> Self {
        Self { origin }
    }

    pub fn portal(&self) -> Vec<Coord> {
        cuboid(self.origin + Coord::new(-1, 0, -1), self.origin + Coord::new(1, 0, 1))
    }

    /// The twelve frame blocks, each facing the portal.
    pub fn frame(&self) -> Vec<(Coord, Facing)> {
        let o = self.origin;
        (-1..=1)
            .flat_map(|i| {
                [
                    (o + Coord::new(i, 0, -2), Facing::South),
                    (o + Coord::new(i, 0, 2), Facing::North),
                    (o + Coord::new(-2, 0, i), Facing::East),
                    (o + Coord::new(2, 0, i), Facing::West),
                ]
            })
            .collect()
    }

    /// Square ring around the frame; `true` marks crying obsidian.
    pub fn perimeter(&self) -> Vec<(Coord, bool)> {
        iproduct!(-3..=3, -3..=3)
            .filter(|&(x, z): &(i32, i32)| x.abs() == 3 || z.abs() == 3)
            .enumerate()
            .map(|(i, (x, z))| {
                let crying = (PERIMETER_PATTERN >> (i % 24)) & 1 == 1;
                (self.origin + Coord::new(x, 0, z), crying)
            })
            .collect()
    }
}

impl Structure for Teleporter {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        let (crying, plain): (Vec<_>, Vec<_>) = self.perimeter().into_iter().partition(|(_, c)| *c);
        let positions = |ring: Vec<(Coord, bool)>| -> Vec<Coord> { ring.into_iter().map(|(p, _)| p).collect() };
        editor.place(&positions(crying), &CRYING_OBSIDIAN)?;
        editor.place(&positions(plain), &OBSIDIAN)?;
        for (position, facing) in self.frame() {
            let frame = Block::minecraft("end_portal_frame")
                .facing(facing)
                .with_state("eye", "true");
            editor.place_block(position, frame)?;
        }
        editor.place(&self.portal(), &END_PORTAL)
    }
}

/// The last room: end stone, purpur pillars and a portal to the End.
#[derive(Debug, Clone)]
pub struct EndGameInterior {
    pub frame: InteriorFrame,
    pub teleporter: Teleporter,
    pub lanterns: LanternChains,
}

impl EndGameInterior {
    pub fn new<R: Rng + ?Sized>(tower: &Tower, rng: &mut R) -> Self {
        let frame = InteriorFrame::new(tower);
        let teleporter = Teleporter::new(frame.origin);
        let invalid: FnvHashSet<Coord> = Self::pillar_columns(&frame)
            .chain(Self::rod_columns(&frame))
            .map(|p| p + UP * frame.height)
            .collect();
        let lanterns = LanternChains::plan(&frame, LANTERNS, MAX_CHAIN_LENGTH, &invalid, rng);
        Self {
            frame,
            teleporter,
            lanterns,
        }
    }

    fn pillar_columns(frame: &InteriorFrame) -> impl Iterator<Item = Coord> + '_ {
        iproduct!([-PILLAR_OFFSET, PILLAR_OFFSET], [-PILLAR_OFFSET, PILLAR_OFFSET])
            .map(move |(x, z)| frame.origin + Coord::new(x, 0, z))
    }

    /// Four purpur pillars from the floor to the ceiling.
    pub fn pillars(&self) -> Vec<Coord> {
        Self::pillar_columns(&self.frame)
            .flat_map(|p| (1..self.frame.height).map(move |y| p + UP * y))
            .collect()
    }

    fn rod_columns(frame: &InteriorFrame) -> impl Iterator<Item = Coord> + '_ {
        iproduct!([-2, 2], [-2, 2]).map(move |(x, z)| frame.origin + Coord::new(x, 0, z))
    }

    /// End rods under the ceiling, diagonally above the portal frame.
    pub fn rods(&self) -> Vec<Coord> {
        Self::rod_columns(&self.frame)
            .map(|p| p + UP * (self.frame.height - 1))
            .collect()
    }
}

impl Structure for EndGameInterior {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        self.frame
            .place_shell(editor, &END_STONE_BRICKS, &PURPUR_BLOCK, &END_STONE_BRICK_SLAB)?;
        editor.place(&self.pillars(), &PURPUR_PILLAR)?;
        editor.place(&self.rods(), &END_ROD)?;
        self.lanterns.place(editor, &SOUL_LANTERN)?;
        self.teleporter.place(editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deterministic_rng::run_rng;
    use crate::district::District;
    use crate::test_utilities::{example_tower, memory_editor};

    #[test]
    fn test_frame_faces_portal() {
        let teleporter = Teleporter::new(Coord::new(0, 84, 0));
        let frame = teleporter.frame();
        assert_eq!(frame.len(), 12);
        for (position, facing) in frame {
            let toward = match facing {
                Facing::North => Coord::new(0, 0, -1),
                Facing::South => Coord::new(0, 0, 1),
                Facing::East => Coord::new(1, 0, 0),
                Facing::West => Coord::new(-1, 0, 0),
            };
            assert!(teleporter.portal().contains(&(position + toward)));
        }
    }

    #[test]
    fn test_perimeter_is_fixed() {
        let teleporter = Teleporter::new(Coord::new(0, 84, 0));
        let perimeter = teleporter.perimeter();
        assert_eq!(perimeter.len(), 24);
        let crying = perimeter.iter().filter(|(_, c)| *c).count();
        assert_eq!(crying, PERIMETER_PATTERN.count_ones() as usize);

        // the pattern does not depend on the random stream
        let tower = example_tower(District::SouthEast, 30, 30);
        let a = EndGameInterior::new(&tower, &mut run_rng(Some(1)));
        let b = EndGameInterior::new(&tower, &mut run_rng(Some(2)));
        assert_eq!(a.teleporter.perimeter(), b.teleporter.perimeter());
    }

    #[test]
    fn test_placement() {
        let tower = example_tower(District::SouthWest, -30, 30);
        let mut editor = memory_editor(12);
        let interior = EndGameInterior::new(&tower, editor.rng());
        interior.place(&mut editor).unwrap();
        let world = editor.world();

        assert_eq!(world.positions_of("end_portal").len(), 9);
        let frames = world.positions_of("end_portal_frame");
        assert_eq!(frames.len(), 12);
        assert!(frames
            .iter()
            .all(|p| world.block_at(*p).and_then(|b| b.state("eye")) == Some("true")));
        assert_eq!(world.positions_of("purpur_pillar").len(), 4 * 6);
        assert_eq!(world.positions_of("soul_lantern").len(), 6);
    }
}
