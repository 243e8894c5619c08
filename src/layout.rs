//! Where everything goes, and in which order it is placed.
//!
//! Towers are sampled inside four fixed sectors around the build area center.
//! The castle sits at the mean of the tower origins, bridges join neighbouring
//! towers, and the nostalgic tower gets the stairway up from the ground while
//! the castle corner diagonally across from it gets the entrance platform.

use crate::args::Args;
use crate::block_definitions::{
    base_palette, base_stair_palette, concrete, sign_block, SignMount, CRYING_OBSIDIAN,
    TINTED_GLASS,
};
use crate::coordinate::{Coord, UP};
use crate::district::District;
use crate::error::GenerationError;
use crate::generators::line;
use crate::structures::big_tree::BigTree;
use crate::structures::bridge::Bridge;
use crate::structures::castle::{
    Castle, CastleBasement, CastleEntrance, CastleOutline, CastleRoof, CastleTree, CentralTree,
};
use crate::structures::interior::{Interior, InteriorKind};
use crate::structures::tower::{
    Tower, TowerBase, TowerRoof, TowerRoofAccess, TowerRoom, TowerStairway,
};
use crate::structures::Structure;
use crate::world_editor::{BuildArea, HeightMap, WorldEditor, WorldInterface};
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::SliceRandom;
use rand::Rng;

/// Tower sectors relative to the center as `(min_x, min_z, max_x, max_z)`,
/// max exclusive.
pub const TOWER_SECTORS: [(District, [i32; 4]); 4] = [
    (District::NorthWest, [-35, -35, -25, -25]),
    (District::SouthWest, [-35, 25, -25, 35]),
    (District::SouthEast, [25, 25, 35, 35]),
    (District::NorthEast, [25, -35, 35, -25]),
];

pub const TOWER_BASE_HEIGHT: i32 = 20;
pub const TOWER_BASE_RADIUS: i32 = 10;
pub const TOWER_ROOM_HEIGHT: i32 = 8;
pub const TOWER_ROOM_RADIUS: i32 = 11;
pub const TOWER_ROOF_HEIGHT: i32 = 10;
pub const TOWER_ROOF_RADIUS: i32 = 13;
pub const TOWER_BEACON_COLOR: &str = "purple";

pub const CASTLE_WALL_HEIGHT: i32 = 30;
pub const CASTLE_BASEMENT_HEIGHT: i32 = 10;
pub const CASTLE_WIDTH: i32 = 10;
pub const CASTLE_ROOF_HEIGHT: i32 = 8;
pub const CASTLE_BEACON_COLOR: &str = "black";
pub const CASTLE_ENTRANCE_ELEVATION: i32 = 20;
pub const TREE_MAX_TRUNK_HEIGHT: i32 = 20;

/// Blocks of descent per stairway quarter turn.
pub const STAIRWAY_LEVEL_HEIGHT: i32 = 5;

/// Bridged tower pairs, as indices into [`TOWER_SECTORS`].
pub const BRIDGES: [(usize, usize); 4] = [(0, 1), (0, 3), (1, 2), (3, 2)];

pub const DEV_POLE_OFFSET: i32 = 50;
pub const DEV_POLE_HEIGHT: i32 = 10;
/// Pole colors in [`District::ALL`] order.
pub const DEV_POLE_COLORS: [&str; 4] = ["blue", "yellow", "green", "red"];

const STAGES: u64 = 6;

/// A placed tower with its room theme and the depth its base was extended by.
#[derive(Debug, Clone)]
pub struct TowerSite {
    pub tower: Tower,
    pub interior: InteriorKind,
    pub extension: i32,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub center: Coord,
    pub towers: Vec<(District, Coord)>,
    pub interiors: Vec<(District, InteriorKind)>,
    pub castle: Coord,
    pub stairway: District,
    pub castle_entrance: District,
    pub roofless_bridge: (District, District),
    pub batches: usize,
    pub blocks: usize,
}

/// Shuffles the themes until the nostalgic and endgame rooms are two
/// positions apart, which puts them in diagonally opposite towers.
pub fn assign_interiors<R: Rng + ?Sized>(rng: &mut R) -> [InteriorKind; 4] {
    let mut kinds = InteriorKind::ALL;
    loop {
        kinds.shuffle(rng);
        let position = |kind: InteriorKind| kinds.iter().position(|&k| k == kind);
        if let (Some(nostalgic), Some(endgame)) =
            (position(InteriorKind::Nostalgic), position(InteriorKind::EndGame))
        {
            if nostalgic.abs_diff(endgame) == 2 {
                return kinds;
            }
        }
    }
}

/// Uniform pick inside a sector, at the center's height.
pub fn sample_tower_origin<R: Rng + ?Sized>(center: Coord, sector: [i32; 4], rng: &mut R) -> Coord {
    let [min_x, min_z, max_x, max_z] = sector;
    let x = center.x + rng.gen_range(min_x..max_x);
    let z = center.z + rng.gen_range(min_z..max_z);
    Coord::new(x, center.y, z)
}

/// All parts of a tower standing on `base_origin`.
pub fn plan_tower(district: District, base_origin: Coord) -> Tower {
    let base = TowerBase::new(base_origin, base_palette(), TOWER_BASE_HEIGHT, TOWER_BASE_RADIUS);
    let room = TowerRoom::new(
        base.origin + UP * base.height,
        base_palette(),
        TOWER_ROOM_HEIGHT,
        TOWER_ROOM_RADIUS,
    );
    let roof = TowerRoof::new(
        room.origin + UP * room.height,
        base_palette(),
        &CRYING_OBSIDIAN,
        TOWER_BEACON_COLOR,
        TOWER_ROOF_HEIGHT,
        TOWER_ROOF_RADIUS,
    );
    let roof_access = TowerRoofAccess::new(
        roof.origin + Coord::new(district.x_sign() * (room.radius - 1), 0, 0),
        district,
        base_palette(),
        base_stair_palette(),
        &CRYING_OBSIDIAN,
        room.height,
    );
    Tower::new(district, base, room, roof, roof_access)
}

/// Mean of the four tower origins, truncated towards zero.
pub fn relative_center(towers: &[TowerSite]) -> Result<Coord, GenerationError> {
    if towers.len() != 4 {
        return Err(GenerationError::geometry(format!(
            "expected 4 towers, got {}",
            towers.len()
        )));
    }
    let sum = towers
        .iter()
        .fold(Coord::new(0, 0, 0), |acc, site| acc + site.tower.origin());
    Ok(Coord::new(sum.x / 4, sum.y / 4, sum.z / 4))
}

/// The castle centered on `center`, with either tree in its hall.
pub fn plan_castle<R: Rng + ?Sized>(center: Coord, rng: &mut R) -> Castle {
    let outline = CastleOutline::new(
        center,
        base_palette(),
        CASTLE_WALL_HEIGHT,
        CASTLE_BASEMENT_HEIGHT,
        CASTLE_WIDTH,
    );
    let basement = CastleBasement::new(
        center - UP * CASTLE_BASEMENT_HEIGHT,
        CASTLE_BEACON_COLOR,
        CASTLE_WIDTH,
        rng,
    );
    let roof = CastleRoof::new(
        center + UP * (CASTLE_WALL_HEIGHT + 1),
        outline.corners(),
        &TINTED_GLASS,
        CASTLE_ROOF_HEIGHT,
    );
    // the big tree's pedestal sits above the drop hole
    let tree = if rng.gen_bool(0.5) {
        CentralTree::Castle(CastleTree::new(center + UP, TREE_MAX_TRUNK_HEIGHT, rng))
    } else {
        CentralTree::Big(BigTree::new(center + UP * 2, TREE_MAX_TRUNK_HEIGHT, rng))
    };
    Castle::new(outline, basement, roof, tree, rng)
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(STAGES);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:45.white/black}] {pos}/{len} stages {msg}")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }
    pb
}

/// White outline of the build area and four colored poles with district
/// labels.
fn build_bounds<W: WorldInterface>(
    editor: &mut WorldEditor<W>,
    area: &BuildArea,
    center: Coord,
) -> Result<(), GenerationError> {
    let y = center.y;
    let (min, max) = (area.min.with_y(y), area.max.with_y(y));
    let mut outline = line(min, Coord::new(max.x, y, min.z));
    outline.extend(line(Coord::new(max.x, y, min.z), max));
    outline.extend(line(max, Coord::new(min.x, y, max.z)));
    outline.extend(line(Coord::new(min.x, y, max.z), min));
    editor.place(&outline, concrete("white"))?;

    for (district, color) in District::ALL.into_iter().zip(DEV_POLE_COLORS) {
        let foot = center
            + Coord::new(
                district.x_sign() * DEV_POLE_OFFSET,
                0,
                district.z_sign() * DEV_POLE_OFFSET,
            );
        editor.place(&line(foot, foot + UP * DEV_POLE_HEIGHT), concrete(color))?;
        let label = district.code().to_uppercase();
        let sign = sign_block("birch", SignMount::Standing(8), ["", label.as_str(), "", ""], "black", false);
        editor.place_block(foot + UP * (DEV_POLE_HEIGHT + 1), sign)?;
    }
    Ok(())
}

/// Runs the whole pipeline: towers, castle, bridges, entry points, interiors.
pub fn generate<W: WorldInterface>(
    editor: &mut WorldEditor<W>,
    area: &BuildArea,
    heightmap: &HeightMap,
    args: &Args,
) -> Result<GenerationReport, GenerationError> {
    let base = heightmap
        .max()
        .ok_or_else(|| GenerationError::Interface("the heightmap is empty".to_string()))?;
    let center = area.center().with_y(base);
    log::info!("Build area {} .. {}, center {}", area.min, area.max, center);

    let pb = progress_bar();

    pb.set_message("bounds");
    if args.dev {
        build_bounds(editor, area, center)?;
    }
    pb.inc(1);

    pb.set_message("towers");
    let interiors = assign_interiors(editor.rng());
    let mut sites = Vec::with_capacity(TOWER_SECTORS.len());
    for ((district, sector), interior) in TOWER_SECTORS.into_iter().zip(interiors) {
        let origin = sample_tower_origin(center, sector, editor.rng());
        let tower = plan_tower(district, origin);
        tower.place(editor)?;
        let extension = tower.base.extend(editor, heightmap)?;
        log::info!("Tower {district} at {} with {interior} interior", tower.origin());
        sites.push(TowerSite {
            tower,
            interior,
            extension,
        });
    }
    pb.inc(1);

    pb.set_message("castle");
    let castle = plan_castle(relative_center(&sites)?, editor.rng());
    castle.place(editor)?;
    castle.outline.extend(editor, heightmap)?;
    log::info!("Castle at {}", castle.origin());
    pb.inc(1);

    pb.set_message("bridges");
    let roofless = editor.rng().gen_range(0..BRIDGES.len());
    let mut roofless_bridge = (District::NorthWest, District::SouthWest);
    for (i, &(a, b)) in BRIDGES.iter().enumerate() {
        let (a, b) = (&sites[a].tower, &sites[b].tower);
        let bridge = Bridge::new(
            (a, b),
            base_palette(),
            base_stair_palette(),
            i != roofless,
            editor.rng(),
        )?;
        bridge.place(editor)?;
        if i == roofless {
            roofless_bridge = (a.district, b.district);
        }
    }
    log::info!("Bridges placed, {}-{} without roof", roofless_bridge.0, roofless_bridge.1);
    pb.inc(1);

    pb.set_message("entry points");
    let entry = sites
        .iter()
        .find(|site| site.interior == InteriorKind::Nostalgic)
        .ok_or_else(|| GenerationError::geometry("no tower has the nostalgic interior"))?;
    let levels = (entry.tower.base.height + entry.extension) / STAIRWAY_LEVEL_HEIGHT;
    let stairway = TowerStairway::new(
        &entry.tower.base,
        entry.tower.district,
        base_stair_palette(),
        levels,
    );
    stairway.place(editor)?;
    let entrance_district = entry.tower.district.opposite();
    let entrance = CastleEntrance::new(
        castle.outline.corner(entrance_district) + UP * CASTLE_ENTRANCE_ELEVATION,
        entrance_district,
        base_palette(),
    );
    entrance.place(editor)?;
    log::info!(
        "Stairway with {levels} levels on the {} tower, castle entrance at {}",
        entry.tower.district,
        entrance.origin
    );
    pb.inc(1);

    pb.set_message("interiors");
    for site in &sites {
        let interior = Interior::new(site.interior, &site.tower, editor.rng());
        interior.place(editor)?;
    }
    pb.inc(1);
    pb.finish();

    Ok(GenerationReport {
        center,
        towers: sites
            .iter()
            .map(|site| (site.tower.district, site.tower.origin()))
            .collect(),
        interiors: sites
            .iter()
            .map(|site| (site.tower.district, site.interior))
            .collect(),
        castle: castle.origin(),
        stairway: entry.tower.district,
        castle_entrance: entrance_district,
        roofless_bridge,
        batches: editor.batch_count(),
        blocks: editor.block_count(),
    })
}
