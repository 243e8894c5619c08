use super::{InteriorFrame, LanternChains};
use crate::block_definitions::{
    base_slab_palette, potted, sign_block, Block, SignMount, AIR, LANTERN, SOUL_LANTERN,
};
use crate::coordinate::{Coord, UP};
use crate::district::District;
use crate::error::GenerationError;
use crate::generators::{cuboid, line, triangle};
use crate::structures::tower::Tower;
use crate::structures::Structure;
use crate::world_editor::{WorldEditor, WorldInterface};
use fnv::FnvHashSet;
use rand::seq::SliceRandom;
use rand::Rng;

const GARDEN_SIZE: i32 = 6;
const ROOTS_PER_GARDEN: usize = 5;
const VINES_PER_GARDEN: usize = 5;
const LANTERNS: usize = 5;
const MAX_CHAIN_LENGTH: i32 = 2;

/// The two nether woods.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExoticWood {
    Crimson,
    Warped,
}

impl ExoticWood {
    pub fn name(self) -> &'static str {
        match self {
            ExoticWood::Crimson => "crimson",
            ExoticWood::Warped => "warped",
        }
    }

    fn block(self, suffix: &str) -> Block {
        Block::minecraft(&format!("{}_{suffix}", self.name()))
    }

    pub fn planks(self) -> Block {
        self.block("planks")
    }

    pub fn slab(self) -> Block {
        self.block("slab").with_state("type", "bottom")
    }

    pub fn fence(self) -> Block {
        self.block("fence")
    }

    pub fn nylium(self) -> Block {
        self.block("nylium")
    }

    pub fn hyphae(self) -> Block {
        self.block("hyphae").with_state("axis", "y")
    }

    pub fn roots(self) -> Block {
        self.block("roots")
    }

    pub fn fungus(self) -> &'static str {
        match self {
            ExoticWood::Crimson => "crimson_fungus",
            ExoticWood::Warped => "warped_fungus",
        }
    }

    /// Weeping vines hang from the hyphae, twisting vines climb from the
    /// nylium.
    pub fn vines(self) -> Block {
        match self {
            ExoticWood::Crimson => Block::minecraft("weeping_vines"),
            ExoticWood::Warped => Block::minecraft("twisting_vines"),
        }
    }

    pub fn lantern(self) -> &'static Block {
        match self {
            ExoticWood::Crimson => &*LANTERN,
            ExoticWood::Warped => &*SOUL_LANTERN,
        }
    }
}

/// A small table with a potted fungus in the middle of the room.
#[derive(Debug, Clone)]
pub struct Table {
    pub origin: Coord,
    pub wood: ExoticWood,
}

impl Table {
    pub fn new(origin: Coord, wood: ExoticWood) -> Self {
        Self { origin, wood }
    }

    pub fn base(&self) -> Vec<Coord> {
        cuboid(self.origin + Coord::new(-1, -1, -1), self.origin + Coord::new(1, -1, 1))
    }

    pub fn cutout(&self) -> Vec<Coord> {
        cuboid(self.origin + Coord::new(-1, 0, -1), self.origin + Coord::new(1, 0, 1))
    }

    pub fn legs(&self) -> Vec<Coord> {
        [(-1, -1), (-1, 1), (1, -1), (1, 1)]
            .into_iter()
            .map(|(x, z)| self.origin + Coord::new(x, 0, z))
            .collect()
    }

    pub fn top(&self) -> Vec<Coord> {
        cuboid(self.origin + Coord::new(-1, 1, -1), self.origin + Coord::new(1, 1, 1))
    }

    pub fn pot(&self) -> Coord {
        self.origin + UP * 2
    }
}

impl Structure for Table {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.base(), self.wood.planks())?;
        editor.place(&self.cutout(), &AIR)?;
        editor.place(&self.legs(), self.wood.fence())?;
        editor.place(&self.top(), self.wood.slab())?;
        editor.place_block(self.pot(), potted(self.wood.fungus()))
    }
}

/// A fenced triangular nylium bed in one quadrant of the room, with a hyphae
/// canopy under the ceiling.
///
/// The origin is the bed's corner closest to the room center.
#[derive(Debug, Clone)]
pub struct Garden {
    pub origin: Coord,
    pub height: i32,
    pub district: District,
    pub wood: ExoticWood,
    roots: Vec<Coord>,
    vines: Vec<Vec<Coord>>,
}

impl Garden {
    pub fn new<R: Rng + ?Sized>(
        origin: Coord,
        height: i32,
        district: District,
        wood: ExoticWood,
        rng: &mut R,
    ) -> Self {
        let mut garden = Self {
            origin,
            height,
            district,
            wood,
            roots: Vec::new(),
            vines: Vec::new(),
        };

        let nylium = garden.nylium();
        garden.roots = nylium
            .choose_multiple(rng, ROOTS_PER_GARDEN)
            .map(|&p| p + UP)
            .collect();

        let vine_origins: Vec<Coord> = match wood {
            ExoticWood::Crimson => garden.hyphae(),
            ExoticWood::Warped => nylium,
        }
        .choose_multiple(rng, VINES_PER_GARDEN)
        .copied()
        .collect();
        // weeping vines grow down, twisting vines up
        let step = match wood {
            ExoticWood::Crimson => Coord::new(0, -1, 0),
            ExoticWood::Warped => UP,
        };
        garden.vines = vine_origins
            .into_iter()
            .map(|o| {
                let length = rng.gen_range(3..7);
                (1..length).map(|i| o + step * i).collect()
            })
            .collect();
        garden
    }

    fn signs(&self) -> (i32, i32) {
        (self.district.x_sign(), self.district.z_sign())
    }

    pub fn nylium(&self) -> Vec<Coord> {
        let (xs, zs) = self.signs();
        triangle(self.origin + Coord::new(xs, 0, zs), GARDEN_SIZE, self.district)
    }

    pub fn hyphae(&self) -> Vec<Coord> {
        self.nylium()
            .into_iter()
            .map(|p| p + UP * self.height)
            .collect()
    }

    /// Plank edges on the floor and ceiling plus the two outer corner posts.
    pub fn bounds(&self) -> Vec<Coord> {
        let (o, h) = (self.origin, self.height);
        let (xs, zs) = self.signs();
        let mut positions = Vec::new();
        for y in [0, h] {
            positions.extend(line(o + Coord::new(0, y, 0), o + Coord::new(xs * GARDEN_SIZE, y, 0)));
            positions.extend(line(o + Coord::new(0, y, 0), o + Coord::new(0, y, zs * GARDEN_SIZE)));
        }
        for (x, z) in [(0, GARDEN_SIZE), (GARDEN_SIZE, 0)] {
            positions.extend(line(
                o + Coord::new(xs * x, 1, zs * z),
                o + Coord::new(xs * x, h - 1, zs * z),
            ));
        }
        positions
    }

    /// Fence posts every other block along both inner edges.
    pub fn fences(&self) -> Vec<Coord> {
        let (o, h) = (self.origin, self.height);
        let (xs, zs) = self.signs();
        let mut positions = Vec::new();
        for i in (0..GARDEN_SIZE - 1).step_by(2) {
            positions.extend(line(o + Coord::new(xs * i, 1, 0), o + Coord::new(xs * i, h - 1, 0)));
            positions.extend(line(o + Coord::new(0, 1, zs * i), o + Coord::new(0, h - 1, zs * i)));
        }
        positions
    }

    pub fn roots(&self) -> &[Coord] {
        &self.roots
    }

    pub fn vines(&self) -> &[Vec<Coord>] {
        &self.vines
    }
}

impl Structure for Garden {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.nylium(), self.wood.nylium())?;
        editor.place(&self.hyphae(), self.wood.hyphae())?;
        editor.place(&self.bounds(), self.wood.planks())?;
        editor.place(&self.fences(), self.wood.fence())?;
        editor.place(&self.roots, self.wood.roots())?;
        let vines: Vec<Coord> = self.vines.iter().flatten().copied().collect();
        editor.place(&vines, self.wood.vines())
    }
}

/// Nether garden room: four gardens around a central table.
#[derive(Debug, Clone)]
pub struct ExoticWoodInterior {
    pub frame: InteriorFrame,
    pub wood: ExoticWood,
    pub gardens: Vec<Garden>,
    pub table: Table,
    pub lanterns: LanternChains,
}

impl ExoticWoodInterior {
    pub fn new<R: Rng + ?Sized>(tower: &Tower, wood: ExoticWood, rng: &mut R) -> Self {
        let frame = InteriorFrame::new(tower);
        let gardens: Vec<Garden> = District::ALL
            .into_iter()
            .map(|district| {
                let offset = Coord::new(district.x_sign() * 3, 0, district.z_sign() * 3);
                Garden::new(frame.origin + offset, frame.height, district, wood, rng)
            })
            .collect();

        let invalid: FnvHashSet<Coord> = gardens
            .iter()
            .flat_map(|garden| garden.hyphae().into_iter().chain(garden.bounds()))
            .collect();
        let lanterns = LanternChains::plan(&frame, LANTERNS, MAX_CHAIN_LENGTH, &invalid, rng);

        Self {
            table: Table::new(frame.origin, wood),
            frame,
            wood,
            gardens,
            lanterns,
        }
    }

    /// Wall signs above both entrances.
    pub fn signs(&self) -> [(Coord, Block); 2] {
        let (o, r, district) = (self.frame.origin, self.frame.radius, self.frame.district);
        let sign = |facing| {
            sign_block(
                self.wood.name(),
                SignMount::Wall(facing),
                ["When", "You're Lost", "in the", "Darkness"],
                "black",
                true,
            )
        };
        [
            (o + Coord::new(-district.x_sign() * r, 4, 0), sign(district.x_facing())),
            (o + Coord::new(0, 4, -district.z_sign() * r), sign(district.z_facing())),
        ]
    }
}

impl Structure for ExoticWoodInterior {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        self.frame
            .place_shell(editor, self.wood.slab(), self.wood.planks(), base_slab_palette("top"))?;
        self.lanterns.place(editor, self.wood.lantern())?;
        for (position, sign) in self.signs() {
            editor.place_block(position, sign)?;
        }
        for garden in &self.gardens {
            garden.place(editor)?;
        }
        self.table.place(editor)
    }
}
