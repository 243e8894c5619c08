//! The castle in the middle of the complex and the entrance platform that
//! leads into it from above.

use super::big_tree::BigTree;
use super::trunk::{Trunk, TrunkKind};
use super::Structure;
use crate::block_definitions::{
    chest_block, sign_block, stained_glass_pane, Block, Material, SignMount, AIR, BEACON,
    END_STONE_BRICKS, END_STONE_BRICK_WALL, GLASS, LAVA, MAGMA_BLOCK, NETHERITE_BLOCK,
    SPRUCE_LEAVES, SPRUCE_LOG, WATER,
};
use crate::coordinate::{Coord, UP};
use crate::district::{District, Facing};
use crate::error::GenerationError;
use crate::generators::{cone, cuboid, cylinder, disk, line, pyramid, CylinderKind};
use crate::world_editor::{HeightMap, WorldEditor, WorldInterface};
use rand::Rng;

/// Floor coordinates each turned into lava with probability one half.
fn lava_floor<R: Rng + ?Sized>(origin: Coord, width: i32, rng: &mut R) -> Vec<Coord> {
    cuboid(
        origin + Coord::new(-width + 1, 1, -width + 1),
        origin + Coord::new(width - 1, 1, width - 1),
    )
    .into_iter()
    .filter(|_| rng.gen::<f64>() < 0.5)
    .collect()
}

/// Square shell of the castle: floors, roof slab, corner pillars and walls.
#[derive(Debug, Clone)]
pub struct CastleOutline {
    pub origin: Coord,
    pub material: Material,
    pub wall_height: i32,
    pub basement_height: i32,
    /// Distance from the center to the walls.
    pub width: i32,
}

impl CastleOutline {
    pub fn new(
        origin: Coord,
        material: impl Into<Material>,
        wall_height: i32,
        basement_height: i32,
        width: i32,
    ) -> Self {
        Self {
            origin,
            material: material.into(),
            wall_height,
            basement_height,
            width,
        }
    }

    pub fn corner(&self, district: District) -> Coord {
        self.origin + Coord::new(district.x_sign() * self.width, 0, district.z_sign() * self.width)
    }

    /// Corners in nw, sw, se, ne order.
    pub fn corners(&self) -> [Coord; 4] {
        District::ALL.map(|district| self.corner(district))
    }

    fn slab(&self, y: i32) -> Vec<Coord> {
        let w = self.width;
        cuboid(
            self.origin + Coord::new(-w, y, -w),
            self.origin + Coord::new(w, y, w),
        )
    }

    pub fn main_floor(&self) -> Vec<Coord> {
        self.slab(0)
    }

    pub fn basement_floor(&self) -> Vec<Coord> {
        self.slab(-self.basement_height)
    }

    pub fn roof(&self) -> Vec<Coord> {
        self.slab(self.wall_height)
    }

    pub fn corner_pillars(&self) -> Vec<Coord> {
        self.corners()
            .iter()
            .flat_map(|&corner| {
                cylinder(
                    corner + Coord::new(-3, -self.basement_height, -3),
                    corner + Coord::new(3, self.wall_height, 3),
                    CylinderKind::Hollow,
                )
            })
            .collect()
    }

    pub fn cone_bases(&self) -> Vec<Coord> {
        self.corners()
            .iter()
            .flat_map(|&corner| disk(corner + UP * (self.wall_height + 1), 4))
            .collect()
    }

    /// Walls between consecutive corners, from the basement floor to the roof.
    pub fn walls(&self) -> Vec<Coord> {
        let corners = self.corners();
        (0..corners.len())
            .flat_map(|i| {
                let next = corners[(i + 1) % corners.len()];
                cuboid(
                    corners[i] - UP * self.basement_height,
                    next + UP * self.wall_height,
                )
            })
            .collect()
    }

    /// Main hall, basement and the walkway ring on the roof.
    pub fn hollow_out(&self) -> [Vec<Coord>; 3] {
        let o = self.origin;
        let (w, wh, bh) = (self.width, self.wall_height, self.basement_height);
        [
            cuboid(o + Coord::new(-w + 1, 1, -w + 1), o + Coord::new(w - 1, wh - 1, w - 1)),
            cuboid(o + Coord::new(-w + 1, -bh + 1, -w + 1), o + Coord::new(w - 1, -1, w - 1)),
            cuboid(o + Coord::new(-w + 3, wh, -w + 3), o + Coord::new(w - 3, wh, w - 3)),
        ]
    }

    fn extension(&self, heightmap: &HeightMap) -> (Vec<Coord>, i32) {
        let bottom = self.origin.y - self.basement_height;
        let mut positions = Vec::new();
        let mut depth = 0;
        for corner in self.corners() {
            let footprint = cylinder(
                corner.with_y(bottom) + Coord::new(-3, 0, -3),
                corner.with_y(bottom) + Coord::new(3, 0, 3),
                CylinderKind::Hollow,
            );
            for p in footprint {
                let Some(ground) = heightmap.get(p.x, p.z) else {
                    continue;
                };
                if ground < bottom {
                    positions.extend(line(p.with_y(ground), p.with_y(bottom - 1)));
                    depth = depth.max(bottom - ground);
                }
            }
        }
        (positions, depth)
    }

    /// Extends the corner pillars down to the terrain and returns the largest
    /// extension depth.
    pub fn extend<W: WorldInterface>(
        &self,
        editor: &mut WorldEditor<W>,
        heightmap: &HeightMap,
    ) -> Result<i32, GenerationError> {
        let (positions, depth) = self.extension(heightmap);
        editor.place(&positions, &self.material)?;
        Ok(depth)
    }
}

impl Structure for CastleOutline {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.main_floor(), &self.material)?;
        editor.place(&self.basement_floor(), &self.material)?;
        editor.place(&self.roof(), &self.material)?;
        editor.place(&self.corner_pillars(), &self.material)?;
        editor.place(&self.cone_bases(), &self.material)?;
        editor.place(&self.walls(), &self.material)?;
        for pass in self.hollow_out() {
            editor.place(&pass, &AIR)?;
        }
        Ok(())
    }
}

/// Hidden basement: a beacon over a lava floor and a small parkour course
/// ending at a chest.
///
/// The origin is the center of the basement floor.
#[derive(Debug, Clone)]
pub struct CastleBasement {
    pub origin: Coord,
    pub beacon_color: String,
    pub width: i32,
    lava: Vec<Coord>,
}

impl CastleBasement {
    pub fn new<R: Rng + ?Sized>(origin: Coord, beacon_color: &str, width: i32, rng: &mut R) -> Self {
        Self {
            origin,
            beacon_color: beacon_color.to_string(),
            width,
            lava: lava_floor(origin, width, rng),
        }
    }

    fn at(&self, x: i32, y: i32, z: i32) -> Coord {
        self.origin + Coord::new(x, y, z)
    }

    pub fn lava(&self) -> &[Coord] {
        &self.lava
    }

    pub fn landing(&self) -> Vec<Coord> {
        cuboid(self.at(-1, 1, -1), self.at(1, 5, 1))
    }

    pub fn parkour_base(&self) -> Vec<Coord> {
        let mut positions: Vec<Coord> = [3, 5, 7].iter().map(|&x| self.at(x, 1, 0)).collect();
        positions.push(self.at(7, 1, -7));
        positions.extend(cuboid(self.at(7, 4, -7), self.at(9, 4, -9)));
        positions
    }

    pub fn parkour_walls(&self) -> Vec<Coord> {
        let mut positions = Vec::new();
        for x in [3, 5, 7] {
            for y in 2..6 {
                if x == 7 && y == 5 {
                    continue;
                }
                positions.push(self.at(x, y, 0));
            }
        }
        for z in [0, -2, -4] {
            positions.push(self.at(9, 4, z));
        }
        positions.extend([
            self.at(9, 5, -5),
            self.at(7, 2, -7),
            self.at(7, 3, -7),
            self.at(8, 5, -7),
        ]);
        positions.extend(line(self.at(7, 5, -7), self.at(7, 5, -9)));
        positions
    }

    pub fn chest_position(&self) -> Coord {
        self.at(8, 5, -9)
    }

    /// The reward: water buckets and empty buckets spelling 42 in binary.
    pub fn chest(&self) -> Block {
        let answer = format!("{:09b}", 42);
        let items: Vec<(u8, &str)> = answer
            .chars()
            .zip(9u8..)
            .map(|(bit, slot)| (slot, if bit == '1' { "water_bucket" } else { "bucket" }))
            .collect();
        chest_block(Facing::East, &items)
    }

    pub fn sign(&self) -> Block {
        sign_block(
            "spruce",
            SignMount::Standing(11),
            ["", "THE ANSWER IS", "(obviously)", ""],
            "black",
            true,
        )
    }
}

impl Structure for CastleBasement {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.lava, &LAVA)?;
        editor.place(&self.landing(), &NETHERITE_BLOCK)?;
        editor.place_block(self.at(0, 2, 0), &BEACON)?;
        editor.place_block(self.at(0, 3, 0), stained_glass_pane(&self.beacon_color))?;
        editor.place_block(self.at(0, 4, 0), &AIR)?;
        editor.place_block(self.at(0, 5, 0), &WATER)?;
        editor.place(&self.parkour_base(), &END_STONE_BRICKS)?;
        editor.place(&self.parkour_walls(), &END_STONE_BRICK_WALL)?;
        editor.place_block(self.chest_position(), self.chest())?;
        editor.place_block(self.at(8, 5, -8), self.sign())
    }
}

/// Hollow glass pyramid with magma cones over the corner pillars and a
/// skylight at the apex.
#[derive(Debug, Clone)]
pub struct CastleRoof {
    pub origin: Coord,
    pub corners: [Coord; 4],
    pub material: Material,
    pub height: i32,
}

impl CastleRoof {
    pub fn new(origin: Coord, corners: [Coord; 4], material: impl Into<Material>, height: i32) -> Self {
        Self {
            origin,
            corners,
            material: material.into(),
            height,
        }
    }

    pub fn pyramid(&self) -> Vec<Coord> {
        pyramid(self.origin, self.height, true)
    }

    pub fn cones(&self) -> Vec<Coord> {
        self.corners
            .iter()
            .flat_map(|corner| cone(Coord::new(corner.x, self.origin.y + 1, corner.z), 4, false))
            .collect()
    }
}

impl Structure for CastleRoof {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.pyramid(), &self.material)?;
        editor.place(&self.cones(), &MAGMA_BLOCK)?;
        editor.place_block(self.origin + UP * (self.height - 1), &AIR)?;
        editor.place_block(self.origin + UP * (self.height - 2), &GLASS)
    }
}

/// Spruce tree in the castle hall on an end stone pedestal.
///
/// Constructed from the pedestal origin; the tree origin sits three blocks
/// higher, on top of the pedestal.
#[derive(Debug, Clone)]
pub struct CastleTree {
    pub origin: Coord,
    pub max_trunk_height: i32,
    trunk: Trunk,
}

impl CastleTree {
    pub fn new<R: Rng + ?Sized>(pedestal_origin: Coord, max_trunk_height: i32, rng: &mut R) -> Self {
        Self {
            origin: pedestal_origin + UP * 3,
            max_trunk_height,
            trunk: Trunk::grow(TrunkKind::CastleTree, max_trunk_height, rng),
        }
    }

    pub fn trunk_height(&self) -> i32 {
        self.trunk.height()
    }

    pub fn pedestal(&self) -> Vec<Coord> {
        cuboid(
            self.origin + Coord::new(-2, -3, -2),
            self.origin + Coord::new(2, -1, 2),
        )
    }

    /// Cross-shaped cutout: the pedestal's corner columns and its center.
    pub fn pedestal_cutout(&self) -> Vec<Coord> {
        [(-1, -1), (-1, 1), (1, -1), (1, 1), (0, 0)]
            .iter()
            .flat_map(|&(x, z)| {
                line(
                    self.origin + Coord::new(2 * x, -3, 2 * z),
                    self.origin + Coord::new(2 * x, -1, 2 * z),
                )
            })
            .collect()
    }

    pub fn leaves(&self) -> Vec<Coord> {
        let th = self.trunk_height();
        cylinder(
            self.origin + Coord::new(-8, th - 9, -8),
            self.origin + Coord::new(8, th + 5, 8),
            CylinderKind::Solid,
        )
    }

    pub fn trunk(&self) -> Vec<Coord> {
        self.trunk.positions(self.origin)
    }
}

impl Structure for CastleTree {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.pedestal(), &END_STONE_BRICKS)?;
        editor.place(&self.pedestal_cutout(), &AIR)?;
        editor.place(&self.leaves(), &SPRUCE_LEAVES)?;
        editor.place(&self.trunk(), &SPRUCE_LOG)
    }
}

/// The tree growing in the castle hall.
#[derive(Debug, Clone)]
pub enum CentralTree {
    Castle(CastleTree),
    Big(BigTree),
}

impl CentralTree {
    pub fn origin(&self) -> Coord {
        match self {
            CentralTree::Castle(tree) => tree.origin,
            CentralTree::Big(tree) => tree.origin,
        }
    }
}

impl Structure for CentralTree {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        match self {
            CentralTree::Castle(tree) => tree.place(editor),
            CentralTree::Big(tree) => tree.place(editor),
        }
    }
}

/// The castle in the middle of the towers. Its origin is the outline origin.
#[derive(Debug, Clone)]
pub struct Castle {
    pub outline: CastleOutline,
    pub basement: CastleBasement,
    pub roof: CastleRoof,
    pub tree: CentralTree,
    lava: Vec<Coord>,
}

impl Castle {
    pub fn new<R: Rng + ?Sized>(
        outline: CastleOutline,
        basement: CastleBasement,
        roof: CastleRoof,
        tree: CentralTree,
        rng: &mut R,
    ) -> Self {
        let (w, h) = (outline.width, outline.wall_height);
        let mut lava = lava_floor(outline.origin, w, rng);
        for (x, z) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
            lava.push(outline.origin + Coord::new(x * (w - 1), h - 1, z * (w - 1)));
            lava.push(outline.origin + Coord::new(x * (w + 1), h - 1, z * (w + 1)));
        }
        Self {
            outline,
            basement,
            roof,
            tree,
            lava,
        }
    }

    pub fn origin(&self) -> Coord {
        self.outline.origin
    }

    pub fn lava(&self) -> &[Coord] {
        &self.lava
    }
}

impl Structure for Castle {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        self.outline.place(editor)?;
        self.basement.place(editor)?;
        self.roof.place(editor)?;
        editor.place(&self.lava, &LAVA)?;
        self.tree.place(editor)?;
        // drop hole into the basement
        editor.place_block(self.origin(), &AIR)?;
        log::debug!("Placed castle at {}", self.origin());
        Ok(())
    }
}

/// Landing platform on a castle corner, reached from the roof of the
/// diagonally opposite tower.
#[derive(Debug, Clone)]
pub struct CastleEntrance {
    pub origin: Coord,
    pub district: District,
    pub material: Material,
}

impl CastleEntrance {
    pub fn new(origin: Coord, district: District, material: impl Into<Material>) -> Self {
        Self {
            origin,
            district,
            material: material.into(),
        }
    }

    /// Points towards the castle center.
    fn x_sign(&self) -> i32 {
        -self.district.x_sign()
    }

    fn z_sign(&self) -> i32 {
        -self.district.z_sign()
    }

    fn at(&self, x: i32, y: i32, z: i32) -> Coord {
        self.origin + Coord::new(self.x_sign() * x, y, self.z_sign() * z)
    }

    pub fn platforms(&self) -> Vec<Coord> {
        let mut positions = disk(self.origin, 3);
        positions.extend(disk(self.origin + UP * 4, 3));
        positions
    }

    pub fn guard(&self) -> Vec<Coord> {
        cylinder(
            self.origin + Coord::new(-3, 5, -3),
            self.origin + Coord::new(3, 5, 3),
            CylinderKind::Tube,
        )
    }

    pub fn marking(&self) -> Vec<Coord> {
        let mut positions = line(self.at(-3, 0, -1), self.at(-3, 4, -1));
        positions.extend(line(self.at(-1, 0, -3), self.at(-1, 4, -3)));
        positions.push(self.at(-2, 0, -2));
        positions.push(self.at(-2, 4, -2));
        positions
    }

    pub fn cutouts(&self) -> Vec<Coord> {
        let mut positions = line(self.at(-2, 1, -2), self.at(-2, 3, -2));
        positions.extend(cuboid(self.origin + UP, self.at(2, 3, 2)));
        positions
    }

    pub fn pole(&self) -> Vec<Coord> {
        line(self.origin + UP, self.origin + UP * 3)
    }

    pub fn sign_position(&self) -> Coord {
        self.at(2, 1, 2)
    }

    pub fn sign(&self) -> Block {
        let rotation = match self.district {
            District::SouthWest => 2,
            District::NorthWest => 6,
            District::NorthEast => 10,
            District::SouthEast => 14,
        };
        sign_block(
            "spruce",
            SignMount::Standing(rotation),
            ["Look", "for", "the", "Light"],
            "black",
            true,
        )
    }
}

impl Structure for CastleEntrance {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.platforms(), &self.material)?;
        editor.place(&self.guard(), &self.material)?;
        editor.place(&self.marking(), &MAGMA_BLOCK)?;
        editor.place(&self.cutouts(), &AIR)?;
        editor.place(&self.pole(), &MAGMA_BLOCK)?;
        editor.place_block(self.sign_position(), self.sign())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_definitions::{base_palette, TINTED_GLASS};
    use crate::deterministic_rng::run_rng;
    use crate::test_utilities::memory_editor;
    use crate::world_editor::BuildArea;

    fn outline() -> CastleOutline {
        CastleOutline::new(Coord::new(0, 84, 0), base_palette(), 30, 10, 10)
    }

    #[test]
    fn test_corners_in_district_order() {
        let corners = outline().corners();
        assert_eq!(
            corners,
            [
                Coord::new(-10, 84, -10),
                Coord::new(-10, 84, 10),
                Coord::new(10, 84, 10),
                Coord::new(10, 84, -10),
            ]
        );
    }

    #[test]
    fn test_outline_is_hollow() {
        let mut editor = memory_editor(1);
        let outline = outline();
        outline.place(&mut editor).unwrap();
        let world = editor.world();

        assert!(world.block_at(Coord::new(0, 90, 0)).unwrap().is_air());
        assert!(world.block_at(Coord::new(0, 80, 0)).unwrap().is_air());
        assert!(!world.block_at(Coord::new(0, 84, 0)).unwrap().is_air());
        assert!(!world.block_at(Coord::new(0, 74, 0)).unwrap().is_air());
        // roof walkway ring is open, its rim is not
        assert!(world.block_at(Coord::new(7, 114, 0)).unwrap().is_air());
        assert!(!world.block_at(Coord::new(9, 114, 0)).unwrap().is_air());
        // walls
        assert!(!world.block_at(Coord::new(10, 100, 3)).unwrap().is_air());
    }

    #[test]
    fn test_pillar_extension() {
        let outline = outline();
        let area = BuildArea::new(Coord::new(-20, 0, -20), Coord::new(20, 100, 20));
        let (positions, depth) = outline.extension(&HeightMap::flat(&area, 64));
        assert_eq!(depth, 10);
        assert!(positions.iter().all(|p| (64..74).contains(&p.y)));
        assert!(!positions.is_empty());
    }

    #[test]
    fn test_chest_encodes_42() {
        let basement = CastleBasement::new(Coord::new(0, 74, 0), "black", 10, &mut run_rng(Some(1)));
        let data = basement.chest().data.unwrap();
        // 42 = 0b000101010
        let expected = [
            "bucket", "bucket", "bucket", "water_bucket", "bucket", "water_bucket", "bucket",
            "water_bucket", "bucket",
        ];
        for (i, item) in expected.iter().enumerate() {
            let entry = format!("{{Slot:{}b,id:\"{}\",Count:1b}}", 9 + i, item);
            assert!(data.contains(&entry), "missing {entry}");
        }
    }

    #[test]
    fn test_basement_place() {
        let mut editor = memory_editor(2);
        let origin = Coord::new(0, 74, 0);
        let basement = CastleBasement::new(origin, "black", 10, editor.rng());
        basement.place(&mut editor).unwrap();
        let world = editor.world();

        assert!(basement.lava().iter().all(|p| p.y == 75 && p.x.abs() < 10 && p.z.abs() < 10));
        assert_eq!(world.block_at(origin + UP * 2).unwrap().name, "beacon");
        assert_eq!(
            world.block_at(origin + UP * 3).unwrap().name,
            "black_stained_glass_pane"
        );
        assert_eq!(world.block_at(origin + UP * 5).unwrap().name, "water");
        assert_eq!(world.block_at(basement.chest_position()).unwrap().name, "chest");
        assert_eq!(
            world.block_at(origin + Coord::new(8, 5, -8)).unwrap().name,
            "spruce_sign"
        );
    }

    #[test]
    fn test_castle_tree_pedestal() {
        let mut editor = memory_editor(8);
        let tree = CastleTree::new(Coord::new(0, 85, 0), 20, editor.rng());
        assert_eq!(tree.origin, Coord::new(0, 88, 0));
        assert_eq!(tree.pedestal().len(), 5 * 3 * 5);
        assert_eq!(tree.pedestal_cutout().len(), 15);

        tree.place(&mut editor).unwrap();
        let world = editor.world();
        assert!(world.block_at(Coord::new(2, 86, 2)).unwrap().is_air());
        assert!(world.block_at(Coord::new(0, 86, 0)).unwrap().is_air());
        assert_eq!(world.block_at(Coord::new(1, 86, 0)).unwrap().name, "end_stone_bricks");
        assert_eq!(tree.trunk().len(), tree.trunk().iter().collect::<std::collections::BTreeSet<_>>().len());
    }

    #[test]
    fn test_castle_place_order() {
        let mut editor = memory_editor(4);
        let outline = outline();
        let basement = CastleBasement::new(
            outline.origin - UP * outline.basement_height,
            "black",
            outline.width,
            editor.rng(),
        );
        let roof = CastleRoof::new(
            outline.origin + UP * (outline.wall_height + 1),
            outline.corners(),
            &TINTED_GLASS,
            8,
        );
        let tree = CentralTree::Castle(CastleTree::new(outline.origin + UP, 20, editor.rng()));
        let castle = Castle::new(outline, basement, roof, tree, editor.rng());
        castle.place(&mut editor).unwrap();
        let world = editor.world();

        assert!(world.block_at(castle.origin()).unwrap().is_air());
        let apex = castle.roof.origin + UP * (castle.roof.height - 1);
        assert!(world.block_at(apex).unwrap().is_air());
        assert_eq!(world.block_at(apex - UP).unwrap().name, "glass");
        assert_eq!(castle.lava().iter().filter(|p| p.y == 84 + 29).count(), 8);
    }

    #[test]
    fn test_entrance_points_inwards() {
        let entrance = CastleEntrance::new(Coord::new(10, 104, 10), District::SouthEast, base_palette());
        // south-east corner: the sign sits towards the castle center
        assert_eq!(entrance.sign_position(), Coord::new(8, 105, 8));
        assert_eq!(entrance.sign().state("rotation"), Some("14"));
        assert_eq!(entrance.pole().len(), 3);

        let mut editor = memory_editor(1);
        entrance.place(&mut editor).unwrap();
        let world = editor.world();
        assert_eq!(world.block_at(Coord::new(10, 105, 10)).unwrap().name, "magma_block");
        assert_eq!(world.block_at(Coord::new(12, 104, 12)).unwrap().name, "magma_block");
        assert!(world.block_at(Coord::new(9, 106, 9)).unwrap().is_air());
    }
}
