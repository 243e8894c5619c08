//! Procedural generation of a themed tower and castle complex through the
//! GDMC HTTP world interface.
//!
//! Four towers are sampled around the build area center, each with a themed
//! room, and a castle sits in the middle with bridges joining the towers. All
//! placement goes through [`world_editor::WorldEditor`], which works against
//! any [`world_editor::WorldInterface`] backend.

pub mod args;
pub mod block_definitions;
pub mod bresenham;
pub mod coordinate;
pub mod deterministic_rng;
pub mod district;
pub mod error;
pub mod generators;
pub mod layout;
pub mod overview;
pub mod structures;
#[cfg(test)]
mod test_utilities;
pub mod world_editor;
