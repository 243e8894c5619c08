use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Integer block position in the world. `y` is the vertical axis.
#[derive(Debug, Default, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Unit vector pointing up.
pub const UP: Coord = Coord { x: 0, y: 1, z: 0 };
/// Unit vector along +x (east).
pub const EAST: Coord = Coord { x: 1, y: 0, z: 0 };

impl Coord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Same position with a different height.
    pub const fn with_y(self, y: i32) -> Self {
        Self { x: self.x, y, z: self.z }
    }

    /// Horizontal euclidean distance to `other`, ignoring height.
    pub fn distance_xz(&self, other: Coord) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dz = (self.z - other.z) as f64;
        (dx * dx + dz * dz).sqrt()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for Coord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

// below are associated arithmetic operators
impl Add for Coord {
    type Output = Coord;

    fn add(self, other: Coord) -> Coord {
        Coord {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Coord {
    fn add_assign(&mut self, other: Coord) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, other: Coord) -> Coord {
        Coord {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl SubAssign for Coord {
    fn sub_assign(&mut self, other: Coord) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl Mul<i32> for Coord {
    type Output = Coord;

    fn mul(self, k: i32) -> Coord {
        Coord {
            x: self.x * k,
            y: self.y * k,
            z: self.z * k,
        }
    }
}

impl Mul<Coord> for i32 {
    type Output = Coord;

    fn mul(self, c: Coord) -> Coord {
        c * self
    }
}

impl Neg for Coord {
    type Output = Coord;

    fn neg(self) -> Coord {
        Coord {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Coord::new(1, 2, 3);
        let b = Coord::new(-4, 0, 10);
        assert_eq!(a + b, Coord::new(-3, 2, 13));
        assert_eq!(a - b, Coord::new(5, 2, -7));
        assert_eq!(a * 3, Coord::new(3, 6, 9));
        assert_eq!(4 * UP, Coord::new(0, 4, 0));
        assert_eq!(-a, Coord::new(-1, -2, -3));
    }

    #[test]
    fn test_distance_ignores_height() {
        let a = Coord::new(0, 100, 0);
        let b = Coord::new(3, -7, 4);
        assert!((a.distance_xz(b) - 5.0).abs() < f64::EPSILON);
    }
}
