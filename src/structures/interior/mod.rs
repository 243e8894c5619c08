//! Furnishings for the tower rooms.
//!
//! Every interior shares the same frame (floor, plinth, ceiling) derived from
//! the tower room, and hangs lantern chains from ceiling points that do not
//! collide with its own set-pieces.

pub mod endgame;
pub mod exotic_wood;
pub mod nostalgic;

pub use endgame::{EndGameInterior, Teleporter};
pub use exotic_wood::{ExoticWood, ExoticWoodInterior, Garden, Table};
pub use nostalgic::{BirchHouse, NostalgicInterior};

use super::tower::Tower;
use super::Structure;
use crate::block_definitions::{Block, Material, CHAIN};
use crate::coordinate::{Coord, UP};
use crate::district::District;
use crate::error::GenerationError;
use crate::generators::{cylinder, disk, CylinderKind};
use crate::world_editor::{WorldEditor, WorldInterface};
use fnv::FnvHashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// The four room themes handed out to the towers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InteriorKind {
    Nostalgic,
    Crimson,
    Warped,
    EndGame,
}

impl InteriorKind {
    pub const ALL: [InteriorKind; 4] = [
        InteriorKind::Nostalgic,
        InteriorKind::Crimson,
        InteriorKind::Warped,
        InteriorKind::EndGame,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InteriorKind::Nostalgic => "nostalgic",
            InteriorKind::Crimson => "crimson",
            InteriorKind::Warped => "warped",
            InteriorKind::EndGame => "endgame",
        }
    }
}

impl fmt::Display for InteriorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Floor, plinth and ceiling of a tower room, one block inside its walls.
#[derive(Debug, Clone)]
pub struct InteriorFrame {
    pub origin: Coord,
    pub district: District,
    pub radius: i32,
    pub height: i32,
}

impl InteriorFrame {
    pub fn new(tower: &Tower) -> Self {
        Self {
            origin: tower.origin(),
            district: tower.district,
            radius: tower.room.radius - 1,
            height: tower.room.height - 1,
        }
    }

    pub fn floor(&self) -> Vec<Coord> {
        disk(self.origin, self.radius)
    }

    pub fn plinth(&self) -> Vec<Coord> {
        let r = Coord::new(self.radius, 0, self.radius);
        cylinder(self.origin - r, self.origin + r, CylinderKind::Tube)
    }

    /// The ceiling disk without the column the roof ladder runs through.
    pub fn ceiling(&self) -> Vec<Coord> {
        let ladder_x = self.origin.x + self.district.x_sign() * self.radius;
        disk(self.origin + UP * self.height, self.radius)
            .into_iter()
            .filter(|p| p.x != ladder_x)
            .collect()
    }

    /// Ceiling points far enough from the wall to hang a lantern from.
    pub fn lantern_candidates(&self) -> Vec<Coord> {
        disk(self.origin + UP * self.height, self.radius - 3)
    }

    pub fn place_shell<W: WorldInterface>(
        &self,
        editor: &mut WorldEditor<W>,
        floor: impl Into<Material>,
        plinth: impl Into<Material>,
        ceiling: impl Into<Material>,
    ) -> Result<(), GenerationError> {
        editor.place(&self.floor(), floor)?;
        editor.place(&self.plinth(), plinth)?;
        editor.place(&self.ceiling(), ceiling)
    }
}

/// Chains hanging from distinct ceiling points, each ending in a lantern.
#[derive(Debug, Clone, Default)]
pub struct LanternChains {
    chains: Vec<Vec<Coord>>,
}

impl LanternChains {
    /// Picks up to `count` distinct candidates outside `invalid` and gives
    /// each a chain of `1..=max_length` links.
    pub fn plan<R: Rng + ?Sized>(
        frame: &InteriorFrame,
        count: usize,
        max_length: i32,
        invalid: &FnvHashSet<Coord>,
        rng: &mut R,
    ) -> Self {
        let candidates: Vec<Coord> = frame
            .lantern_candidates()
            .into_iter()
            .filter(|c| !invalid.contains(c))
            .collect();
        let tops: Vec<Coord> = candidates.choose_multiple(rng, count).copied().collect();
        let chains = tops
            .into_iter()
            .map(|top| {
                let length = rng.gen_range(1..=max_length.max(1));
                (0..length).map(|i| top - UP * i).collect()
            })
            .collect();
        Self { chains }
    }

    pub fn chains(&self) -> &[Vec<Coord>] {
        &self.chains
    }

    pub fn links(&self) -> Vec<Coord> {
        self.chains.iter().flatten().copied().collect()
    }

    /// One lantern below the lowest link of every chain.
    pub fn lanterns(&self) -> Vec<Coord> {
        self.chains
            .iter()
            .filter_map(|chain| chain.last().map(|&p| p - UP))
            .collect()
    }

    pub fn place<W: WorldInterface>(
        &self,
        editor: &mut WorldEditor<W>,
        lantern: &Block,
    ) -> Result<(), GenerationError> {
        editor.place(&self.links(), &CHAIN)?;
        editor.place(&self.lanterns(), lantern)
    }
}

/// A furnished tower room.
#[derive(Debug, Clone)]
pub enum Interior {
    ExoticWood(ExoticWoodInterior),
    Nostalgic(NostalgicInterior),
    EndGame(EndGameInterior),
}

impl Interior {
    pub fn new<R: Rng + ?Sized>(kind: InteriorKind, tower: &Tower, rng: &mut R) -> Self {
        match kind {
            InteriorKind::Nostalgic => Interior::Nostalgic(NostalgicInterior::new(tower, rng)),
            InteriorKind::Crimson => {
                Interior::ExoticWood(ExoticWoodInterior::new(tower, ExoticWood::Crimson, rng))
            }
            InteriorKind::Warped => {
                Interior::ExoticWood(ExoticWoodInterior::new(tower, ExoticWood::Warped, rng))
            }
            InteriorKind::EndGame => Interior::EndGame(EndGameInterior::new(tower, rng)),
        }
    }

    pub fn kind(&self) -> InteriorKind {
        match self {
            Interior::ExoticWood(interior) => match interior.wood {
                ExoticWood::Crimson => InteriorKind::Crimson,
                ExoticWood::Warped => InteriorKind::Warped,
            },
            Interior::Nostalgic(_) => InteriorKind::Nostalgic,
            Interior::EndGame(_) => InteriorKind::EndGame,
        }
    }

    pub fn frame(&self) -> &InteriorFrame {
        match self {
            Interior::ExoticWood(interior) => &interior.frame,
            Interior::Nostalgic(interior) => &interior.frame,
            Interior::EndGame(interior) => &interior.frame,
        }
    }

    pub fn lanterns(&self) -> &LanternChains {
        match self {
            Interior::ExoticWood(interior) => &interior.lanterns,
            Interior::Nostalgic(interior) => &interior.lanterns,
            Interior::EndGame(interior) => &interior.lanterns,
        }
    }
}

impl Structure for Interior {
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError> {
        match self {
            Interior::ExoticWood(interior) => interior.place(editor)?,
            Interior::Nostalgic(interior) => interior.place(editor)?,
            Interior::EndGame(interior) => interior.place(editor)?,
        }
        let frame = self.frame();
        log::debug!("Placed {} interior in the {} tower at {}", self.kind(), frame.district, frame.origin);
        Ok(())
    }
}
