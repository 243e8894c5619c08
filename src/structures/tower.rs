//! Towers: base, room, roof, roof access, the exterior stairway, and the
//! composite [`Tower`].

use super::Structure;
use crate::block_definitions::{
    stained_glass, Block, Material, Palette, AIR, BEACON, LADDER, NETHERITE_BLOCK,
};
use crate::coordinate::{Coord, UP};
use crate::district::{Axis, District, Facing};
use crate::error::GenerationError;
use crate::generators::{cone, cuboid, cylinder, line, pyramid, CylinderKind};
use crate::world_editor::{HeightMap, WorldEditor, WorldInterface};
use std::f64::consts::{FRAC_PI_2, PI};

/// A tube from the ground up to the tower room.
#[derive(Debug, Clone)]
pub struct TowerBase {
    pub origin: Coord,
    pub material: Material,
    pub height: i32,
    pub radius: i32,
}

impl TowerBase {
    pub fn new(origin: Coord, material: impl Into<Material>, height: i32, radius: i32) -> Self {
        Self {
            origin,
            material: material.into(),
            height,
            radius,
        }
    }

    pub fn walls(&self) -> Vec<Coord> {
        let r = self.radius;
        cylinder(
            self.origin + Coord::new(-r, 0, -r),
            self.origin + Coord::new(r, self.height, r),
            CylinderKind::Tube,
        )
    }

    /// Columns that fill the gap between the wall footprint and lower terrain.
    fn extension(&self, heightmap: &HeightMap) -> (Vec<Coord>, i32) {
        let footprint = cylinder(
            self.origin + Coord::new(-self.radius, 0, -self.radius),
            self.origin + Coord::new(self.radius, 0, self.radius),
            CylinderKind::Tube,
        );
        let mut positions = Vec::new();
        let mut depth = 0;
        for p in footprint {
            let Some(ground) = heightmap.get(p.x, p.z) else {
                continue;
            };
            if ground < p.y {
                positions.extend(line(p.with_y(ground), p.with_y(p.y - 1)));
                depth = depth.max(p.y - ground);
            }
        }
        (positions, depth)
    }

    /// Extends the walls down to the terrain and returns the largest
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

impl Structure for TowerBase {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.walls(), &self.material)
    }
}

/// The main room, a hollow cylinder on top of the base.
#[derive(Debug, Clone)]
pub struct TowerRoom {
    pub origin: Coord,
    pub material: Material,
    pub height: i32,
    pub radius: i32,
}

impl TowerRoom {
    pub fn new(origin: Coord, material: impl Into<Material>, height: i32, radius: i32) -> Self {
        Self {
            origin,
            material: material.into(),
            height,
            radius,
        }
    }

    pub fn walls(&self) -> Vec<Coord> {
        let r = self.radius;
        cylinder(
            self.origin + Coord::new(-r, 0, -r),
            self.origin + Coord::new(r, self.height, r),
            CylinderKind::Hollow,
        )
    }
}

impl Structure for TowerRoom {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.walls(), &self.material)
    }
}

/// Flat roof with guards, a beacon on a netherite pyramid and a hollow cone
/// the beam shines through.
#[derive(Debug, Clone)]
pub struct TowerRoof {
    pub origin: Coord,
    pub base_material: Material,
    pub cone_material: Material,
    pub beacon_color: String,
    pub height: i32,
    pub radius: i32,
}

impl TowerRoof {
    pub fn new(
        origin: Coord,
        base_material: impl Into<Material>,
        cone_material: impl Into<Material>,
        beacon_color: &str,
        height: i32,
        radius: i32,
    ) -> Self {
        Self {
            origin,
            base_material: base_material.into(),
            cone_material: cone_material.into(),
            beacon_color: beacon_color.to_string(),
            height,
            radius,
        }
    }

    pub fn floor(&self) -> Vec<Coord> {
        let r = self.radius;
        cylinder(
            self.origin + Coord::new(-r, 0, -r),
            self.origin + Coord::new(r, 0, r),
            CylinderKind::Solid,
        )
    }

    pub fn guards(&self) -> Vec<Coord> {
        let r = self.radius;
        cylinder(
            self.origin + Coord::new(-r, -1, -r),
            self.origin + Coord::new(r, 1, r),
            CylinderKind::Tube,
        )
    }

    pub fn beacon_pyramid(&self) -> Vec<Coord> {
        pyramid(self.origin + UP, 4, false)
    }

    pub fn cone(&self) -> Vec<Coord> {
        cone(self.origin + UP, self.height, true)
    }

    pub fn beacon(&self) -> Coord {
        self.origin + UP * 4
    }
}

impl Structure for TowerRoof {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.floor(), &self.base_material)?;
        editor.place(&self.guards(), &self.base_material)?;
        editor.place(&self.beacon_pyramid(), &NETHERITE_BLOCK)?;
        editor.place_block(self.beacon(), &BEACON)?;
        editor.place(&self.cone(), &self.cone_material)?;
        editor.place_block(self.origin + UP * self.height, &AIR)?;
        editor.place_block(
            self.origin + UP * (self.height - 1),
            stained_glass(&self.beacon_color),
        )
    }
}

/// Ladder shaft from the room up to the roof, topped by three rows of stairs
/// and a gate sheltering the hatch.
///
/// The origin is the topmost block of the central ladder column.
#[derive(Debug, Clone)]
pub struct TowerRoofAccess {
    pub origin: Coord,
    pub district: District,
    pub base_material: Material,
    pub stair_material: Palette,
    pub gate_material: Material,
    pub room_height: i32,
}

impl TowerRoofAccess {
    pub fn new(
        origin: Coord,
        district: District,
        base_material: impl Into<Material>,
        stair_material: Palette,
        gate_material: impl Into<Material>,
        room_height: i32,
    ) -> Self {
        Self {
            origin,
            district,
            base_material: base_material.into(),
            stair_material,
            gate_material: gate_material.into(),
            room_height,
        }
    }

    pub fn facing(&self) -> Facing {
        self.district.x_facing()
    }

    /// Points inwards, away from the wall the shaft is built against.
    fn x_sign(&self) -> i32 {
        -self.district.x_sign()
    }

    fn offset(&self, x: i32, y: i32, z: i32) -> Coord {
        self.origin + Coord::new(self.x_sign() * x, y, z)
    }

    pub fn platform(&self) -> Vec<Coord> {
        cuboid(self.offset(0, -1, -4), self.offset(1, -1, 4))
    }

    pub fn ladder(&self) -> Vec<Coord> {
        cuboid(
            self.offset(0, -self.room_height + 1, -1),
            self.offset(0, -1, 1),
        )
    }

    /// The three stair rows; the first two face inwards, the last outwards.
    pub fn stairs(&self) -> [Vec<Coord>; 3] {
        [
            cuboid(self.offset(1, -1, -1), self.offset(1, -1, 1)),
            cuboid(self.offset(2, 0, -1), self.offset(2, 0, 1)),
            cuboid(self.offset(-1, 0, -1), self.offset(-1, 0, 1)),
        ]
    }

    pub fn gate(&self) -> Vec<Coord> {
        cuboid(self.offset(0, 1, -2), self.offset(2, 3, 2))
    }

    pub fn gaps(&self) -> [Vec<Coord>; 2] {
        [
            cuboid(self.offset(0, 1, -1), self.offset(2, 2, 1)),
            cuboid(self.offset(0, 0, -1), self.offset(1, 0, 1)),
        ]
    }
}

impl Structure for TowerRoofAccess {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        let inwards = self.facing().opposite();
        editor.place(&self.platform(), &self.base_material)?;
        editor.place(&self.ladder(), Block::clone(&LADDER).facing(inwards))?;

        let [first, second, third] = self.stairs();
        editor.place(&first, self.stair_material.facing(inwards))?;
        editor.place(&second, self.stair_material.facing(inwards))?;
        editor.place(&third, self.stair_material.facing(self.facing()))?;

        editor.place(&self.gate(), &self.gate_material)?;
        for gap in self.gaps() {
            editor.place(&gap, &AIR)?;
        }
        Ok(())
    }
}

const STEPS_PER_TURN: i32 = 5;
/// Steps occupy the ring `radius - 1 < dist < radius + STAIR_REACH`.
const STAIR_REACH: f64 = 4.0;

/// One step of the stairway: its blocks and the direction they ascend to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StairStep {
    pub positions: Vec<Coord>,
    pub headroom: Vec<Coord>,
    pub facing: Facing,
}

/// Spiral staircase wound around the outside of a tower base.
///
/// Every quarter turn descends five steps. The stairway starts next to the
/// tower's x entrance at room floor level and winds clockwise for western
/// towers, counter-clockwise for eastern ones.
#[derive(Debug, Clone)]
pub struct TowerStairway {
    pub material: Palette,
    pub levels: i32,
    steps: Vec<StairStep>,
}

/// One quarter turn in a local frame: the quadrant from +x towards +z, split
/// into five angular slices.
fn stair_unit(radius: i32) -> Vec<(Vec<(i32, i32)>, Facing)> {
    let reach = radius + STAIR_REACH as i32;
    let slice = FRAC_PI_2 / STEPS_PER_TURN as f64;
    let mut unit: Vec<(Vec<(i32, i32)>, Facing)> = (0..STEPS_PER_TURN)
        .map(|j| {
            // descending towards +z, so the stairs ascend against the winding
            let facing = if (j as f64 + 0.5) * slice < PI / 4.0 {
                Facing::North
            } else {
                Facing::East
            };
            (Vec::new(), facing)
        })
        .collect();

    for dx in 0..=reach {
        for dz in 0..=reach {
            let dist = f64::from(dx * dx + dz * dz).sqrt();
            if dist <= f64::from(radius - 1) || dist >= f64::from(radius) + STAIR_REACH {
                continue;
            }
            let theta = f64::from(dz).atan2(f64::from(dx));
            if theta >= FRAC_PI_2 {
                continue;
            }
            let j = ((theta / slice) as usize).min(STEPS_PER_TURN as usize - 1);
            unit[j].0.push((dx, dz));
        }
    }
    unit
}

impl TowerStairway {
    pub fn new(base: &TowerBase, district: District, material: Palette, levels: i32) -> Self {
        let clockwise = district.x_sign() < 0;
        let center = base.origin;
        let top = base.origin.y + base.height;
        // unit 0 starts at the x entrance, which faces away from the district
        let start_turns = if district.x_sign() < 0 { 0 } else { 2 };
        let unit = stair_unit(base.radius);

        let rotate = |(dx, dz): (i32, i32), turns: i32| -> (i32, i32) {
            (0..turns).fold((dx, dz), |(x, z), _| if clockwise { (-z, x) } else { (z, -x) })
        };
        let turn_facing = |facing: Facing, turns: i32| -> Facing {
            (0..turns).fold(facing, |f, _| {
                if clockwise {
                    f.clockwise()
                } else {
                    f.counter_clockwise()
                }
            })
        };

        let mut steps = Vec::new();
        for level in 0..levels.max(0) {
            let turns = (start_turns + level) % 4;
            for (j, (cells, facing)) in unit.iter().enumerate() {
                let y = top - level * STEPS_PER_TURN - j as i32;
                // the counter-clockwise stairway is the mirror image in z
                let local_facing = if clockwise {
                    *facing
                } else {
                    match facing {
                        Facing::North => Facing::South,
                        other => *other,
                    }
                };

                let mut positions = Vec::with_capacity(cells.len());
                let mut headroom = Vec::new();
                for &(dx, dz) in cells {
                    let dz = if clockwise { dz } else { -dz };
                    let (x, z) = rotate((dx, dz), turns);
                    let p = Coord::new(center.x + x, y, center.z + z);
                    positions.push(p);
                    if dx * dx + dz * dz >= (base.radius + 2).pow(2) {
                        headroom.extend((1..=3).map(|h| p + UP * h));
                    }
                }
                steps.push(StairStep {
                    positions,
                    headroom,
                    facing: turn_facing(local_facing, turns),
                });
            }
        }

        Self {
            material,
            levels,
            steps,
        }
    }

    pub fn steps(&self) -> &[StairStep] {
        &self.steps
    }
}

impl Structure for TowerStairway {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        for step in &self.steps {
            editor.place(&step.positions, self.material.facing(step.facing))?;
            editor.place(&step.headroom, &AIR)?;
        }
        Ok(())
    }
}

/// A tower in one of the four districts.
///
/// The tower origin is the room origin. Its two entrances face away from the
/// district, towards the neighbouring towers.
#[derive(Debug, Clone)]
pub struct Tower {
    pub district: District,
    pub base: TowerBase,
    pub room: TowerRoom,
    pub roof: TowerRoof,
    pub roof_access: TowerRoofAccess,
}

impl Tower {
    pub fn new(
        district: District,
        base: TowerBase,
        room: TowerRoom,
        roof: TowerRoof,
        roof_access: TowerRoofAccess,
    ) -> Self {
        Self {
            district,
            base,
            room,
            roof,
            roof_access,
        }
    }

    pub fn origin(&self) -> Coord {
        self.room.origin
    }

    fn entrance_x_sign(&self) -> i32 {
        -self.district.x_sign()
    }

    fn entrance_z_sign(&self) -> i32 {
        -self.district.z_sign()
    }

    /// Floor-level point in the middle of the entrance on `axis`.
    pub fn entrance_origin(&self, axis: Axis) -> Coord {
        let r = self.room.radius;
        match axis {
            Axis::X => self.origin() + Coord::new(self.entrance_x_sign() * r, 0, 0),
            Axis::Z => self.origin() + Coord::new(0, 0, self.entrance_z_sign() * r),
        }
    }

    pub fn entrances(&self) -> [Vec<Coord>; 2] {
        let o = self.origin();
        let r = self.room.radius;
        let (xs, zs) = (self.entrance_x_sign(), self.entrance_z_sign());
        [
            cuboid(o + Coord::new(xs * r, 1, -1), o + Coord::new(xs * r, 3, 1)),
            cuboid(o + Coord::new(-1, 1, zs * r), o + Coord::new(1, 3, zs * r)),
        ]
    }
}

impl Structure for Tower {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        self.base.place(editor)?;
        self.room.place(editor)?;
        self.roof.place(editor)?;
        self.roof_access.place(editor)?;
        for entrance in self.entrances() {
            editor.place(&entrance, &AIR)?;
        }
        log::debug!("Placed {} tower at {}", self.district, self.origin());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_definitions::{base_palette, base_stair_palette, CRYING_OBSIDIAN};
    use crate::test_utilities::memory_editor;
    use crate::world_editor::BuildArea;

    fn tower(district: District, base_origin: Coord) -> Tower {
        let base = TowerBase::new(base_origin, base_palette(), 20, 10);
        let room = TowerRoom::new(base.origin + UP * base.height, base_palette(), 8, 11);
        let roof = TowerRoof::new(
            room.origin + UP * room.height,
            base_palette(),
            &CRYING_OBSIDIAN,
            "purple",
            10,
            13,
        );
        let access = TowerRoofAccess::new(
            roof.origin + Coord::new(district.x_sign() * (room.radius - 1), 0, 0),
            district,
            base_palette(),
            base_stair_palette(),
            &CRYING_OBSIDIAN,
            room.height,
        );
        Tower::new(district, base, room, roof, access)
    }

    #[test]
    fn test_entrances_face_away_from_district() {
        let t = tower(District::NorthWest, Coord::new(0, 64, 0));
        assert_eq!(t.origin(), Coord::new(0, 84, 0));
        assert_eq!(t.entrance_origin(Axis::X), Coord::new(11, 84, 0));
        assert_eq!(t.entrance_origin(Axis::Z), Coord::new(0, 84, 11));

        let t = tower(District::SouthEast, Coord::new(0, 64, 0));
        assert_eq!(t.entrance_origin(Axis::X), Coord::new(-11, 84, 0));
        assert_eq!(t.entrance_origin(Axis::Z), Coord::new(0, 84, -11));
    }

    #[test]
    fn test_place_cuts_entrances_and_lights_beacon() {
        let mut editor = memory_editor(3);
        let t = tower(District::SouthWest, Coord::new(0, 64, 0));
        t.place(&mut editor).unwrap();
        let world = editor.world();

        for entrance in t.entrances() {
            for p in entrance {
                assert!(world.block_at(p).unwrap().is_air(), "{p} not cut");
            }
        }
        assert_eq!(world.block_at(t.roof.beacon()).unwrap().name, "beacon");
        let top = t.roof.origin + UP * t.roof.height;
        assert!(world.block_at(top).unwrap().is_air());
        assert_eq!(
            world.block_at(top - UP).unwrap().name,
            "purple_stained_glass"
        );
    }

    #[test]
    fn test_roof_access_orientation() {
        let t = tower(District::NorthEast, Coord::new(0, 64, 0));
        let access = &t.roof_access;
        assert_eq!(access.origin, t.roof.origin + Coord::new(10, 0, 0));
        assert_eq!(access.facing(), Facing::East);
        // the platform extends inwards, towards -x for an eastern tower
        assert!(access.platform().iter().all(|p| p.x <= access.origin.x));
        assert_eq!(access.ladder().len(), 3 * (t.room.height - 1) as usize);

        let mut editor = memory_editor(1);
        access.place(&mut editor).unwrap();
        let ladder = editor.world().block_at(access.origin - UP).unwrap();
        assert_eq!(ladder.name, "ladder");
        assert_eq!(ladder.state("facing"), Some("west"));
    }

    #[test]
    fn test_extension_reaches_terrain() {
        let base = TowerBase::new(Coord::new(0, 70, 0), base_palette(), 20, 10);
        let area = BuildArea::new(Coord::new(-20, 0, -20), Coord::new(20, 100, 20));
        let mut heights = HeightMap::flat(&area, 64);
        assert_eq!(base.extension(&heights).1, 6);

        heights = HeightMap::new(
            -20,
            -20,
            (0..41).map(|x| vec![if x < 20 { 60 } else { 66 }; 41]).collect(),
        );
        let (positions, depth) = base.extension(&heights);
        assert_eq!(depth, 10);
        assert!(positions.iter().all(|p| p.y < 70 && p.y >= 60));

        let flush = HeightMap::flat(&area, 70);
        assert_eq!(base.extension(&flush), (Vec::new(), 0));
    }

    #[test]
    fn test_stairway_descends_in_ring() {
        let t = tower(District::NorthWest, Coord::new(0, 64, 0));
        let stairway = TowerStairway::new(&t.base, t.district, base_stair_palette(), 4);
        let steps = stairway.steps();
        assert_eq!(steps.len(), 20);

        let top = t.origin().y;
        for (i, step) in steps.iter().enumerate() {
            assert!(!step.positions.is_empty());
            for p in &step.positions {
                assert_eq!(p.y, top - i as i32);
                let dist = f64::from(p.x * p.x + p.z * p.z).sqrt();
                assert!(dist > 9.0 && dist < 14.0, "{p} outside ring");
            }
        }
        // the first step sits in front of the x entrance (east for nw)
        assert!(steps[0].positions.iter().all(|p| p.x > 0));
    }

    #[test]
    fn test_stairway_winding_mirrors() {
        let west = tower(District::SouthWest, Coord::new(0, 64, 0));
        let east = tower(District::SouthEast, Coord::new(0, 64, 0));
        let cw = TowerStairway::new(&west.base, west.district, base_stair_palette(), 1);
        let ccw = TowerStairway::new(&east.base, east.district, base_stair_palette(), 1);

        let mut a: Vec<Coord> = cw.steps()[2].positions.clone();
        // the counter-clockwise stairway is the x mirror image
        let mut b: Vec<Coord> = ccw.steps()[2]
            .positions
            .iter()
            .map(|p| Coord::new(-p.x, p.y, p.z))
            .collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
        assert_eq!(cw.steps()[0].facing, Facing::North);
        assert_eq!(ccw.steps()[0].facing, Facing::North);
    }

    #[test]
    fn test_stairway_steps_do_not_overlap() {
        let t = tower(District::NorthEast, Coord::new(5, 64, -3));
        let stairway = TowerStairway::new(&t.base, t.district, base_stair_palette(), 5);
        let mut all: Vec<Coord> = stairway
            .steps()
            .iter()
            .flat_map(|s| s.positions.iter().copied())
            .collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), total);
    }
}
