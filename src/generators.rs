//! Primitive shape generators.
//!
//! Every generator is a pure function returning the materialized list of block
//! positions covered by the shape. Most callers filter or re-scan the result
//! (collision sets, point picking), so eager `Vec`s are the default.

use crate::bresenham::bresenham_line;
use crate::coordinate::{Coord, UP};
use crate::district::District;
use fnv::FnvHashSet;
use itertools::iproduct;

/// How much of a cylinder's cross-section to keep.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum CylinderKind {
    /// Every point inside the ellipse.
    #[default]
    Solid,
    /// Thin outer shell per layer: points with at least one orthogonal
    /// neighbour outside the ellipse.
    Hollow,
    /// Closed side wall with open ends: points with any of their eight
    /// neighbours outside the ellipse, so the wall has no diagonal gaps.
    Tube,
}

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const SURROUNDING: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn ordered(a: Coord, b: Coord) -> (Coord, Coord) {
    (
        Coord::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
        Coord::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
    )
}

/// All integer points on the segment between `a` and `b`, inclusive.
pub fn line(a: Coord, b: Coord) -> Vec<Coord> {
    bresenham_line(a, b)
}

/// All points of the axis-aligned box spanned by two corners, in any order.
pub fn cuboid(corner1: Coord, corner2: Coord) -> Vec<Coord> {
    let (min, max) = ordered(corner1, corner2);
    iproduct!(min.x..=max.x, min.y..=max.y, min.z..=max.z)
        .map(|(x, y, z)| Coord::new(x, y, z))
        .collect()
}

/// Horizontal cross-section of the ellipse fitting the rectangle
/// `[min_x, max_x] x [min_z, max_z]`.
fn ellipse(min_x: i32, min_z: i32, max_x: i32, max_z: i32, kind: CylinderKind) -> Vec<(i32, i32)> {
    let cx = (min_x + max_x) as f64 / 2.0;
    let cz = (min_z + max_z) as f64 / 2.0;
    let rx = (max_x - min_x + 1) as f64 / 2.0;
    let rz = (max_z - min_z + 1) as f64 / 2.0;

    let inside = |x: i32, z: i32| -> bool {
        let u = (x as f64 - cx) / rx;
        let v = (z as f64 - cz) / rz;
        u * u + v * v <= 1.0
    };

    iproduct!(min_x..=max_x, min_z..=max_z)
        .filter(|&(x, z)| inside(x, z))
        .filter(|&(x, z)| match kind {
            CylinderKind::Solid => true,
            CylinderKind::Hollow => ORTHOGONAL
                .iter()
                .any(|&(dx, dz)| !inside(x + dx, z + dz)),
            CylinderKind::Tube => SURROUNDING
                .iter()
                .any(|&(dx, dz)| !inside(x + dx, z + dz)),
        })
        .collect()
}

/// Vertical cylinder with the elliptical cross-section fitting the box spanned
/// by the two corners.
pub fn cylinder(corner1: Coord, corner2: Coord, kind: CylinderKind) -> Vec<Coord> {
    let (min, max) = ordered(corner1, corner2);
    let section = ellipse(min.x, min.z, max.x, max.z, kind);

    let mut points = Vec::with_capacity(section.len() * (max.y - min.y + 1) as usize);
    for y in min.y..=max.y {
        points.extend(section.iter().map(|&(x, z)| Coord::new(x, y, z)));
    }
    points
}

/// Flat solid disk of the given radius centered on `center`.
pub fn disk(center: Coord, radius: i32) -> Vec<Coord> {
    let r = Coord::new(radius, 0, radius);
    cylinder(center - r, center + r, CylinderKind::Solid)
}

/// Step pyramid growing upwards from `origin`.
///
/// Layer `y` is a square of half-width `height - y - 1`, so the base is
/// `2 * height - 1` wide and the apex is the single point
/// `origin + (0, height - 1, 0)`. A hollow pyramid keeps the outer ring of
/// each layer only.
pub fn pyramid(origin: Coord, height: i32, hollow: bool) -> Vec<Coord> {
    let mut points = Vec::new();
    for y in 0..height {
        let half = height - y - 1;
        for (x, z) in iproduct!(-half..=half, -half..=half) {
            if hollow && x.abs() != half && z.abs() != half {
                continue;
            }
            points.push(origin + Coord::new(x, y, z));
        }
    }
    points
}

/// Like [`pyramid`], but with a round cross-section per layer.
///
/// A hollow cone drops every point that has another cone point directly above
/// it, which removes the fill nobody can see from outside.
pub fn cone(origin: Coord, height: i32, hollow: bool) -> Vec<Coord> {
    let mut points = Vec::new();
    for y in 0..height {
        let half = height - y - 1;
        points.extend(cylinder(
            origin + Coord::new(-half, y, -half),
            origin + Coord::new(half, y, half),
            CylinderKind::Solid,
        ));
    }

    if hollow {
        let all: FnvHashSet<Coord> = points.iter().copied().collect();
        points.retain(|p| !all.contains(&(*p + UP)));
    }
    points
}

/// Right triangle in the horizontal plane through `origin`.
///
/// Both legs are `size` blocks long (origin included) and extend towards the
/// quadrant named by `direction`.
pub fn triangle(origin: Coord, size: i32, direction: District) -> Vec<Coord> {
    let (xs, zs) = (direction.x_sign(), direction.z_sign());
    let mut points = Vec::new();
    for x in 0..size {
        for z in 0..size - x {
            points.push(origin + Coord::new(x * xs, 0, z * zs));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(points: &[Coord]) -> BTreeSet<Coord> {
        points.iter().copied().collect()
    }

    #[test]
    fn test_cuboid_corner_order_independent() {
        let cases = [
            (Coord::new(0, 0, 0), Coord::new(3, 2, 1)),
            (Coord::new(5, -3, 2), Coord::new(-1, 4, -2)),
            (Coord::new(7, 7, 7), Coord::new(7, 7, 7)),
        ];
        for (a, b) in cases {
            assert_eq!(set(&cuboid(a, b)), set(&cuboid(b, a)));
            // mixed per-axis ordering
            let c = Coord::new(a.x, b.y, a.z);
            let d = Coord::new(b.x, a.y, b.z);
            assert_eq!(set(&cuboid(a, b)), set(&cuboid(c, d)));
        }
        assert_eq!(cuboid(Coord::new(0, 0, 0), Coord::new(3, 2, 1)).len(), 4 * 3 * 2);
    }

    #[test]
    fn test_line_is_inclusive_and_axis_aligned() {
        let l = line(Coord::new(0, 5, 0), Coord::new(0, 5, -4));
        assert_eq!(l.len(), 5);
        assert_eq!(l.first(), Some(&Coord::new(0, 5, 0)));
        assert_eq!(l.last(), Some(&Coord::new(0, 5, -4)));
    }

    #[test]
    fn test_hollow_cylinder_is_shell_of_solid() {
        for r in 1..=13 {
            let c1 = Coord::new(-r, 0, -r);
            let c2 = Coord::new(r, 3, r);
            let solid = set(&cylinder(c1, c2, CylinderKind::Solid));
            let hollow = set(&cylinder(c1, c2, CylinderKind::Hollow));
            assert!(hollow.is_subset(&solid));
            for p in &hollow {
                let all_present = ORTHOGONAL
                    .iter()
                    .all(|&(dx, dz)| hollow.contains(&(*p + Coord::new(dx, 0, dz))));
                assert!(!all_present, "{p} is not on the shell (r = {r})");
            }
        }
    }

    #[test]
    fn test_tube_contains_hollow_shell() {
        let c1 = Coord::new(-10, 0, -10);
        let c2 = Coord::new(10, 5, 10);
        let tube = set(&cylinder(c1, c2, CylinderKind::Tube));
        let hollow = set(&cylinder(c1, c2, CylinderKind::Hollow));
        assert!(hollow.is_subset(&tube));
        // open ends: the center column is never part of a tube
        assert!(!tube.contains(&Coord::new(0, 0, 0)));
        assert!(!tube.contains(&Coord::new(0, 5, 0)));
    }

    #[test]
    fn test_cylinder_corner_order_independent() {
        let a = Coord::new(4, 0, -2);
        let b = Coord::new(-3, 6, 5);
        for kind in [CylinderKind::Solid, CylinderKind::Hollow, CylinderKind::Tube] {
            assert_eq!(set(&cylinder(a, b, kind)), set(&cylinder(b, a, kind)));
        }
    }

    #[test]
    fn test_disk_radius_zero_is_single_point() {
        let c = Coord::new(1, 2, 3);
        assert_eq!(disk(c, 0), vec![c]);
    }

    #[test]
    fn test_pyramid_counts_and_apex() {
        let origin = Coord::new(10, 64, -5);
        for height in 1..=6 {
            let points = pyramid(origin, height, false);
            let expected: i32 = (0..height).map(|y| (2 * (height - y) - 1).pow(2)).sum();
            assert_eq!(points.len() as i32, expected);

            let top = points.iter().map(|p| p.y).max().unwrap();
            let apex: Vec<_> = points.iter().filter(|p| p.y == top).collect();
            assert_eq!(apex, vec![&(origin + Coord::new(0, height - 1, 0))]);
        }
        assert_eq!(pyramid(origin, 3, false).len(), 25 + 9 + 1);
    }

    #[test]
    fn test_hollow_pyramid_rings() {
        let points = pyramid(Coord::new(0, 0, 0), 3, true);
        // ring of width 5, ring of width 3, apex
        assert_eq!(points.len(), 16 + 8 + 1);
    }

    #[test]
    fn test_degenerate_sizes_are_empty() {
        let o = Coord::new(0, 0, 0);
        assert!(pyramid(o, 0, false).is_empty());
        assert!(pyramid(o, -2, true).is_empty());
        assert!(cone(o, 0, true).is_empty());
        assert!(triangle(o, 0, District::NorthWest).is_empty());
        assert!(triangle(o, -1, District::SouthEast).is_empty());
    }

    #[test]
    fn test_hollow_cone_has_nothing_directly_above() {
        for height in 1..=10 {
            let points = cone(Coord::new(0, 0, 0), height, true);
            let all = set(&points);
            for p in &points {
                assert!(!all.contains(&(*p + UP)));
            }
        }
    }

    #[test]
    fn test_hollow_cone_keeps_apex() {
        let points = cone(Coord::new(2, 10, 2), 5, true);
        assert!(points.contains(&Coord::new(2, 14, 2)));
        assert!(!points.contains(&Coord::new(2, 10, 2)));
    }

    #[test]
    fn test_triangle_shape() {
        let origin = Coord::new(0, 0, 0);
        let points = triangle(origin, 3, District::NorthEast);
        assert_eq!(points.len(), 3 + 2 + 1);
        assert!(points.iter().all(|p| p.x >= 0 && p.z <= 0 && p.y == 0));
        assert!(points.contains(&Coord::new(2, 0, 0)));
        assert!(points.contains(&Coord::new(0, 0, -2)));
        assert!(!points.contains(&Coord::new(1, 0, -2)));
    }
}
