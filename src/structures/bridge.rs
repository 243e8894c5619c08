use super::tower::Tower;
use super::Structure;
use crate::block_definitions::{Material, Palette};
use crate::coordinate::Coord;
use crate::district::{Axis, Facing};
use crate::error::GenerationError;
use crate::world_editor::{WorldEditor, WorldInterface};
use rand::Rng;

/// A walkway between the facing entrances of two towers.
///
/// The towers must differ in exactly one district component; the bridge runs
/// along the axis of that component. Per step along the axis the walkway's
/// perpendicular offset is interpolated between the two entrances.
#[derive(Debug, Clone)]
pub struct Bridge {
    pub axis: Axis,
    pub from: Coord,
    pub to: Coord,
    pub has_roof: bool,
    pub base_material: Material,
    pub stair_material: Palette,
    base: Vec<Coord>,
    stairs: [Vec<Coord>; 4],
}

impl Bridge {
    pub fn new<R: Rng + ?Sized>(
        towers: (&Tower, &Tower),
        base_material: impl Into<Material>,
        stair_material: Palette,
        has_roof: bool,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        let (a, b) = towers;
        let axis = a.district.shared_axis(b.district)?;
        let along = |t: &Tower| match axis {
            Axis::X => t.origin().x,
            Axis::Z => t.origin().z,
        };
        let (first, second) = if along(a) <= along(b) { (a, b) } else { (b, a) };

        let mut bridge = Self {
            axis,
            from: first.entrance_origin(axis),
            to: second.entrance_origin(axis),
            has_roof,
            base_material: base_material.into(),
            stair_material,
            base: Vec::new(),
            stairs: Default::default(),
        };
        bridge.plan(rng);
        Ok(bridge)
    }

    /// `(along, across)` components of a point for this bridge's axis.
    fn split(&self, p: Coord) -> (i32, i32) {
        match self.axis {
            Axis::X => (p.x, p.z),
            Axis::Z => (p.z, p.x),
        }
    }

    /// Point at `along`/`across` and `k` blocks above the entrance floor.
    fn p(&self, along: i32, across: i32, k: i32) -> Coord {
        let y = self.from.y + k;
        match self.axis {
            Axis::X => Coord::new(along, y, across),
            Axis::Z => Coord::new(across, y, along),
        }
    }

    /// Interpolated cross offset at `along`, rounded half to even.
    fn across_at(&self, along: i32) -> i32 {
        let (fa, fb) = self.split(self.from);
        let (ta, tb) = self.split(self.to);
        let t = f64::from(along - fa) / f64::from(ta - fa);
        (f64::from(fb) + f64::from(tb - fb) * t).round_ties_even() as i32
    }

    /// Steps strictly between the two entrances.
    pub fn walk_range(&self) -> std::ops::Range<i32> {
        let (fa, _) = self.split(self.from);
        let (ta, _) = self.split(self.to);
        fa + 1..ta
    }

    fn plan<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut base = Vec::new();
        let mut stairs: [Vec<Coord>; 4] = Default::default();

        for a in self.walk_range() {
            let b = self.across_at(a);
            base.push(self.p(a, b, -1));
            base.extend((b - 2..=b + 2).map(|j| self.p(a, j, 0)));
            base.push(self.p(a, b - 2, 1));
            base.push(self.p(a, b + 2, 1));
            stairs[0].push(self.p(a, b - 1, -1));
            stairs[1].push(self.p(a, b + 1, -1));

            if self.has_roof {
                base.extend((b - 1..=b + 1).map(|j| self.p(a, j, 4)));
                base.push(self.p(a, b, 5));
                if rng.gen::<f64>() < 0.5 {
                    let side = if rng.gen_bool(0.5) { 1 } else { -1 };
                    base.push(self.p(a, b + side * 2, 2));
                    base.push(self.p(a, b + side * 2, 3));
                }
                stairs[2].extend([self.p(a, b - 2, 4), self.p(a, b - 1, 5)]);
                stairs[3].extend([self.p(a, b + 2, 4), self.p(a, b + 1, 5)]);
            }
        }

        self.base = base;
        self.stairs = stairs;
    }

    pub fn base(&self) -> &[Coord] {
        &self.base
    }

    pub fn stairs(&self) -> &[Vec<Coord>; 4] {
        &self.stairs
    }

    /// Facings of the two stair sides; the roof eaves reuse them.
    pub fn stair_facings(&self) -> (Facing, Facing) {
        match self.axis {
            Axis::X => (Facing::South, Facing::North),
            Axis::Z => (Facing::East, Facing::West),
        }
    }
}

impl Structure for Bridge {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        editor.place(&self.base, &self.base_material)?;
        let (left, right) = self.stair_facings();
        for (i, positions) in self.stairs.iter().enumerate() {
            let facing = if i % 2 == 0 { left } else { right };
            // walkway trims hang below the deck, roof eaves sit on top
            let half = if i < 2 { "top" } else { "bottom" };
            let material = self.stair_material.facing(facing).with_state("half", half);
            editor.place(positions, material)?;
        }
        log::debug!("Placed bridge from {} to {}", self.from, self.to);
        Ok(())
    }
}
