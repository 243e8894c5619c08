use super::{InteriorFrame, LanternChains};
use crate::block_definitions::{
    base_slab_palette, bed, chest_block, Block, AIR, BARREL, BIRCH_LOG, BIRCH_PLANKS, BIRCH_SLAB,
    BOOKSHELF, CRAFTING_TABLE, FURNACE, GLASS_PANE, GLOWSTONE, LANTERN, OAK_PLANKS, WHITE_CARPET,
};
use crate::coordinate::Coord;
use crate::district::District;
use crate::error::GenerationError;
use crate::generators::cuboid;
use crate::structures::tower::Tower;
use crate::structures::Structure;
use crate::world_editor::{WorldEditor, WorldInterface};
use fnv::FnvHashSet;
use rand::Rng;

const LANTERNS: usize = 4;
const MAX_CHAIN_LENGTH: i32 = 3;

/// Outer wall extent of the house along the two local axes.
const LENGTH: i32 = 7;
const DEPTH: i32 = 6;
const WALL_HEIGHT: i32 = 3;
/// Local `u` of the wall separating the bedroom from the workshop.
const DIVIDER: i32 = 4;

const CHEST_ITEMS: [(u8, &str); 4] = [
    (0, "minecraft:bread"),
    (1, "minecraft:filled_map"),
    (2, "minecraft:compass"),
    (13, "minecraft:music_disc_cat"),
];

/// A small birch house with a bedroom and a workshop.
///
/// Positions are given in a local frame `(u, y, v)` where `u` and `v` grow
/// towards the house's district. The wall at `u = 1` faces the room center.
#[derive(Debug, Clone)]
pub struct BirchHouse {
    pub origin: Coord,
    pub district: District,
}

impl BirchHouse {
    pub fn new(origin: Coord, district: District) -> Self {
        Self { origin, district }
    }

    fn at(&self, u: i32, y: i32, v: i32) -> Coord {
        self.origin + Coord::new(self.district.x_sign() * u, y, self.district.z_sign() * v)
    }

    /// Columns covered by the house at height `y`.
    pub fn footprint(&self, y: i32) -> Vec<Coord> {
        cuboid(self.at(1, y, 1), self.at(LENGTH, y, DEPTH))
    }

    fn is_corner(u: i32, v: i32) -> bool {
        (u == 1 || u == LENGTH) && (v == 1 || v == DEPTH)
    }

    pub fn pillars(&self) -> Vec<Coord> {
        let mut positions = Vec::new();
        for (u, v) in [(1, 1), (1, DEPTH), (LENGTH, 1), (LENGTH, DEPTH)] {
            positions.extend((1..=WALL_HEIGHT).map(|y| self.at(u, y, v)));
        }
        positions
    }

    /// Outer walls and the divider, without the corner pillars.
    pub fn walls(&self) -> Vec<Coord> {
        let mut positions = Vec::new();
        for u in 1..=LENGTH {
            for v in 1..=DEPTH {
                let outer = u == 1 || u == LENGTH || v == 1 || v == DEPTH;
                if !(outer || u == DIVIDER) || Self::is_corner(u, v) {
                    continue;
                }
                positions.extend((1..=WALL_HEIGHT).map(|y| self.at(u, y, v)));
            }
        }
        positions
    }

    pub fn roof(&self) -> Vec<Coord> {
        self.footprint(WALL_HEIGHT + 1)
    }

    /// Front door and the door between the two rooms.
    pub fn doorways(&self) -> Vec<Coord> {
        [1, DIVIDER]
            .into_iter()
            .flat_map(|u| [self.at(u, 1, 3), self.at(u, 2, 3)])
            .collect()
    }

    pub fn windows(&self) -> Vec<Coord> {
        [2, 3, 5, 6].into_iter().map(|u| self.at(u, 2, 1)).collect()
    }

    pub fn lights(&self) -> Vec<Coord> {
        vec![self.at(2, WALL_HEIGHT + 1, 4), self.at(6, WALL_HEIGHT + 1, 4)]
    }

    pub fn carpet(&self) -> Vec<Coord> {
        cuboid(self.at(2, 1, 2), self.at(3, 1, 3))
    }

    /// Foot and head of the bed, head towards the back wall.
    pub fn bed(&self) -> [(Coord, Block); 2] {
        let facing = self.district.z_facing();
        [
            (self.at(3, 1, 4), bed("red", facing, false)),
            (self.at(3, 1, 5), bed("red", facing, true)),
        ]
    }

    /// Chest, crafting table, furnace, barrel and bookshelf.
    pub fn fixtures(&self) -> Vec<(Coord, Block)> {
        let towards_divider = self.district.x_facing();
        vec![
            (self.at(2, 1, 5), chest_block(towards_divider, &CHEST_ITEMS)),
            (self.at(6, 1, 2), Block::clone(&CRAFTING_TABLE)),
            (self.at(6, 1, 3), Block::clone(&FURNACE).facing(towards_divider.opposite())),
            (self.at(6, 1, 5), Block::clone(&BARREL)),
            (self.at(5, 1, 5), Block::clone(&BOOKSHELF)),
        ]
    }
}

impl Structure for BirchHouse {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.footprint(0), &BIRCH_PLANKS)?;
        editor.place(&self.pillars(), &BIRCH_LOG)?;
        editor.place(&self.walls(), &BIRCH_PLANKS)?;
        editor.place(&self.roof(), &BIRCH_SLAB)?;
        editor.place(&self.lights(), &GLOWSTONE)?;
        editor.place(&self.doorways(), &AIR)?;
        editor.place(&self.windows(), &GLASS_PANE)?;
        editor.place(&self.carpet(), &WHITE_CARPET)?;
        for (position, block) in self.bed().into_iter().chain(self.fixtures()) {
            editor.place_block(position, block)?;
        }
        Ok(())
    }
}

/// A homely room: oak floor and a birch house in the tower's own quadrant.
#[derive(Debug, Clone)]
pub struct NostalgicInterior {
    pub frame: InteriorFrame,
    pub house: BirchHouse,
    pub lanterns: LanternChains,
}

impl NostalgicInterior {
    pub fn new<R: Rng + ?Sized>(tower: &Tower, rng: &mut R) -> Self {
        let frame = InteriorFrame::new(tower);
        let house = BirchHouse::new(frame.origin, frame.district);
        let invalid: FnvHashSet<Coord> = house.footprint(frame.height).into_iter().collect();
        let lanterns = LanternChains::plan(&frame, LANTERNS, MAX_CHAIN_LENGTH, &invalid, rng);
        Self {
            frame,
            house,
            lanterns,
        }
    }
}

impl Structure for NostalgicInterior {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        self.frame
            .place_shell(editor, &OAK_PLANKS, &BIRCH_LOG, base_slab_palette("top"))?;
        self.lanterns.place(editor, &LANTERN)?;
        self.house.place(editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::{example_tower, memory_editor};

    #[test]
    fn test_house_fits_the_room() {
        for district in District::ALL {
            let tower = example_tower(district, district.x_sign() * 30, district.z_sign() * 30);
            let frame = InteriorFrame::new(&tower);
            let house = BirchHouse::new(frame.origin, district);
            let floor: FnvHashSet<Coord> = frame.floor().into_iter().collect();
            assert!(house.footprint(0).iter().all(|p| floor.contains(p)));

            // clear of both entrance axes
            let o = frame.origin;
            assert!(house.footprint(0).iter().all(|p| p.x != o.x && p.z != o.z));
        }
    }

    #[test]
    fn test_bed_and_fixtures() {
        let house = BirchHouse::new(Coord::new(0, 84, 0), District::SouthEast);
        let [(foot, foot_block), (head, head_block)] = house.bed();
        assert_eq!(foot, Coord::new(3, 85, 4));
        assert_eq!(head, Coord::new(3, 85, 5));
        assert_eq!(foot_block.state("part"), Some("foot"));
        assert_eq!(head_block.state("facing"), Some("south"));

        let mut editor = memory_editor(3);
        house.place(&mut editor).unwrap();
        let world = editor.world();
        assert_eq!(world.block_at(head).map(|b| b.name.as_str()), Some("red_bed"));
        assert_eq!(world.positions_of("crafting_table").len(), 1);
        assert_eq!(world.positions_of("glass_pane").len(), 4);
        let chest = world.block_at(Coord::new(2, 85, 5)).unwrap();
        assert!(chest.data.as_deref().unwrap_or("").contains("minecraft:compass"));
        // doorways are open
        assert!(world.block_at(Coord::new(1, 85, 3)).unwrap().is_air());
        assert!(world.block_at(Coord::new(4, 86, 3)).unwrap().is_air());
    }

    #[test]
    fn test_lanterns_avoid_the_house() {
        let tower = example_tower(District::NorthWest, -30, -30);
        let mut editor = memory_editor(8);
        let interior = NostalgicInterior::new(&tower, editor.rng());
        let roof: FnvHashSet<Coord> = interior.house.footprint(interior.frame.height).into_iter().collect();
        assert_eq!(interior.lanterns.chains().len(), 4);
        assert!(interior.lanterns.chains().iter().all(|c| !roof.contains(&c[0])));

        interior.place(&mut editor).unwrap();
        assert_eq!(editor.world().positions_of("lantern").len(), 4);
    }
}
