use crate::block_definitions::{base_palette, base_stair_palette, CRYING_OBSIDIAN};
use crate::coordinate::{Coord, UP};
use crate::deterministic_rng::run_rng;
use crate::district::District;
use crate::structures::tower::{Tower, TowerBase, TowerRoof, TowerRoofAccess, TowerRoom};
use crate::world_editor::{BuildArea, MemoryWorld, WorldEditor};

/// Build area used by the structure tests, centered on the origin.
pub fn example_area() -> BuildArea {
    BuildArea::new(Coord::new(-100, -64, -100), Coord::new(100, 319, 100))
}

/// Editor over a flat in-memory world large enough for the whole complex.
pub fn memory_editor(seed: u64) -> WorldEditor<MemoryWorld> {
    WorldEditor::new(MemoryWorld::flat(example_area(), 64), run_rng(Some(seed)))
}

/// A full-size tower standing on the flat test terrain at `(x, 64, z)`.
pub fn example_tower(district: District, x: i32, z: i32) -> Tower {
    let base = TowerBase::new(Coord::new(x, 64, z), base_palette(), 20, 10);
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
