//! Compass-quadrant districts and the sign conventions derived from them.
//!
//! North is -z, south is +z, west is -x and east is +x. A district's signs point
//! from the complex center towards that district.

use crate::error::GenerationError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum District {
    NorthWest,
    SouthWest,
    SouthEast,
    NorthEast,
}

impl District {
    /// Fixed iteration order used throughout layout (nw, sw, se, ne).
    pub const ALL: [District; 4] = [
        District::NorthWest,
        District::SouthWest,
        District::SouthEast,
        District::NorthEast,
    ];

    pub fn code(self) -> &'static str {
        match self {
            District::NorthWest => "nw",
            District::SouthWest => "sw",
            District::SouthEast => "se",
            District::NorthEast => "ne",
        }
    }

    pub fn x_sign(self) -> i32 {
        match self {
            District::NorthWest | District::SouthWest => -1,
            District::SouthEast | District::NorthEast => 1,
        }
    }

    pub fn z_sign(self) -> i32 {
        match self {
            District::NorthWest | District::NorthEast => -1,
            District::SouthWest | District::SouthEast => 1,
        }
    }

    /// The diagonally opposite district.
    pub fn opposite(self) -> District {
        match self {
            District::NorthWest => District::SouthEast,
            District::SouthWest => District::NorthEast,
            District::SouthEast => District::NorthWest,
            District::NorthEast => District::SouthWest,
        }
    }

    /// Horizontal direction the district's west/east component points to.
    pub fn x_facing(self) -> Facing {
        if self.x_sign() < 0 {
            Facing::West
        } else {
            Facing::East
        }
    }

    /// Horizontal direction the district's north/south component points to.
    pub fn z_facing(self) -> Facing {
        if self.z_sign() < 0 {
            Facing::North
        } else {
            Facing::South
        }
    }

    /// Axis along which a straight connection between two districts runs.
    ///
    /// Districts sharing their east/west component are stacked along z, those
    /// sharing their north/south component along x. Anything else has no shared
    /// axis.
    pub fn shared_axis(self, other: District) -> Result<Axis, GenerationError> {
        let same_x = self.x_sign() == other.x_sign();
        let same_z = self.z_sign() == other.z_sign();
        match (same_x, same_z) {
            (true, false) => Ok(Axis::Z),
            (false, true) => Ok(Axis::X),
            _ => Err(GenerationError::geometry(format!(
                "districts {self} and {other} must share exactly one axis"
            ))),
        }
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for District {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nw" => Ok(District::NorthWest),
            "sw" => Ok(District::SouthWest),
            "se" => Ok(District::SouthEast),
            "ne" => Ok(District::NorthEast),
            other => Err(GenerationError::geometry(format!(
                "invalid district/direction tag: {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Z,
}

/// Horizontal block facing, as used by directional block states.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    pub fn as_str(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::East => "east",
            Facing::South => "south",
            Facing::West => "west",
        }
    }

    pub fn opposite(self) -> Facing {
        match self {
            Facing::North => Facing::South,
            Facing::East => Facing::West,
            Facing::South => Facing::North,
            Facing::West => Facing::East,
        }
    }

    /// Rotate a quarter turn clockwise when seen from above.
    pub fn clockwise(self) -> Facing {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    pub fn counter_clockwise(self) -> Facing {
        self.clockwise().opposite()
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
