//! Structural parts and the composite structures built from them.
//!
//! Parts own an origin plus scalar parameters and derive every position list
//! from those. Randomness is resolved once when a part is planned, so
//! [`Structure::place`] only replays the plan against the world.

pub mod big_tree;
pub mod bridge;
pub mod castle;
pub mod interior;
pub mod tower;
pub mod trunk;

use crate::error::GenerationError;
use crate::world_editor::{WorldEditor, WorldInterface};

pub trait Structure {
    /// Paints the structure's position lists in a fixed order. Later lists
    /// overwrite earlier ones where they overlap.
    fn place<W: WorldInterface>(&self, editor: &mut WorldEditor<W>) -> Result<(), GenerationError>;
}
