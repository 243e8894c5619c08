#![allow(unused)]

//! Blocks, weighted palettes and the [`Material`] paint value handed to the
//! world editor.

use crate::district::Facing;
use once_cell::sync::Lazy;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    pub namespace: String,
    pub name: String,
    /// Block state properties such as `facing` or `half`.
    pub states: BTreeMap<String, String>,
    /// Optional block entity data in SNBT notation.
    pub data: Option<String>,
}

impl Block {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            states: BTreeMap::new(),
            data: None,
        }
    }

    pub fn minecraft(name: &str) -> Self {
        Self::new("minecraft", name)
    }

    /// Namespaced id, e.g. `minecraft:stone_bricks`.
    pub fn id(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }

    pub fn with_state(mut self, key: &str, value: &str) -> Self {
        self.states.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_data(mut self, snbt: String) -> Self {
        self.data = Some(snbt);
        self
    }

    pub fn facing(self, facing: Facing) -> Self {
        self.with_state("facing", facing.as_str())
    }

    pub fn state(&self, key: &str) -> Option<&str> {
        self.states.get(key).map(String::as_str)
    }

    pub fn is_air(&self) -> bool {
        self.namespace == "minecraft" && self.name == "air"
    }
}

// Lazy static blocks
pub static AIR: Lazy<Block> = Lazy::new(|| Block::minecraft("air"));
pub static BARREL: Lazy<Block> = Lazy::new(|| Block::minecraft("barrel").with_state("facing", "up"));
pub static BEACON: Lazy<Block> = Lazy::new(|| Block::minecraft("beacon"));
pub static BIRCH_LOG: Lazy<Block> = Lazy::new(|| Block::minecraft("birch_log").with_state("axis", "y"));
pub static BIRCH_PLANKS: Lazy<Block> = Lazy::new(|| Block::minecraft("birch_planks"));
pub static BIRCH_SLAB: Lazy<Block> = Lazy::new(|| Block::minecraft("birch_slab").with_state("type", "bottom"));
pub static BOOKSHELF: Lazy<Block> = Lazy::new(|| Block::minecraft("bookshelf"));
pub static CHAIN: Lazy<Block> = Lazy::new(|| Block::minecraft("chain").with_state("axis", "y"));
pub static CRAFTING_TABLE: Lazy<Block> = Lazy::new(|| Block::minecraft("crafting_table"));
pub static CRACKED_STONE_BRICKS: Lazy<Block> = Lazy::new(|| Block::minecraft("cracked_stone_bricks"));
pub static CRYING_OBSIDIAN: Lazy<Block> = Lazy::new(|| Block::minecraft("crying_obsidian"));
pub static DIAMOND_BLOCK: Lazy<Block> = Lazy::new(|| Block::minecraft("diamond_block"));
pub static END_PORTAL: Lazy<Block> = Lazy::new(|| Block::minecraft("end_portal"));
pub static END_ROD: Lazy<Block> = Lazy::new(|| Block::minecraft("end_rod").with_state("facing", "down"));
pub static END_STONE_BRICK_SLAB: Lazy<Block> = Lazy::new(|| Block::minecraft("end_stone_brick_slab").with_state("type", "top"));
pub static END_STONE_BRICK_WALL: Lazy<Block> = Lazy::new(|| Block::minecraft("end_stone_brick_wall"));
pub static END_STONE_BRICKS: Lazy<Block> = Lazy::new(|| Block::minecraft("end_stone_bricks"));
pub static FURNACE: Lazy<Block> = Lazy::new(|| Block::minecraft("furnace"));
pub static GLASS: Lazy<Block> = Lazy::new(|| Block::minecraft("glass"));
pub static GLASS_PANE: Lazy<Block> = Lazy::new(|| Block::minecraft("glass_pane"));
pub static GLOWSTONE: Lazy<Block> = Lazy::new(|| Block::minecraft("glowstone"));
pub static LADDER: Lazy<Block> = Lazy::new(|| Block::minecraft("ladder"));
pub static LANTERN: Lazy<Block> = Lazy::new(|| Block::minecraft("lantern").with_state("hanging", "true"));
pub static LAVA: Lazy<Block> = Lazy::new(|| Block::minecraft("lava"));
pub static MAGMA_BLOCK: Lazy<Block> = Lazy::new(|| Block::minecraft("magma_block"));
pub static MOSSY_STONE_BRICKS: Lazy<Block> = Lazy::new(|| Block::minecraft("mossy_stone_bricks"));
pub static NETHERITE_BLOCK: Lazy<Block> = Lazy::new(|| Block::minecraft("netherite_block"));
pub static OAK_PLANKS: Lazy<Block> = Lazy::new(|| Block::minecraft("oak_planks"));
pub static OBSIDIAN: Lazy<Block> = Lazy::new(|| Block::minecraft("obsidian"));
pub static PURPUR_BLOCK: Lazy<Block> = Lazy::new(|| Block::minecraft("purpur_block"));
pub static PURPUR_PILLAR: Lazy<Block> = Lazy::new(|| Block::minecraft("purpur_pillar").with_state("axis", "y"));
pub static SOUL_LANTERN: Lazy<Block> = Lazy::new(|| Block::minecraft("soul_lantern").with_state("hanging", "true"));
pub static SPRUCE_LEAVES: Lazy<Block> = Lazy::new(|| Block::minecraft("spruce_leaves").with_state("persistent", "true"));
pub static SPRUCE_LOG: Lazy<Block> = Lazy::new(|| Block::minecraft("spruce_log").with_state("axis", "y"));
pub static STONE_BRICKS: Lazy<Block> = Lazy::new(|| Block::minecraft("stone_bricks"));
pub static TINTED_GLASS: Lazy<Block> = Lazy::new(|| Block::minecraft("tinted_glass"));
pub static WATER: Lazy<Block> = Lazy::new(|| Block::minecraft("water"));
pub static WHITE_CARPET: Lazy<Block> = Lazy::new(|| Block::minecraft("white_carpet"));

/// `<color>_concrete`
pub fn concrete(color: &str) -> Block {
    Block::minecraft(&format!("{color}_concrete"))
}

/// `<color>_stained_glass`
pub fn stained_glass(color: &str) -> Block {
    Block::minecraft(&format!("{color}_stained_glass"))
}

/// `<color>_stained_glass_pane`
pub fn stained_glass_pane(color: &str) -> Block {
    Block::minecraft(&format!("{color}_stained_glass_pane"))
}

/// Flower pot holding `plant`.
pub fn potted(plant: &str) -> Block {
    Block::minecraft(&format!("potted_{plant}"))
}

/// One half of a bed. `facing` points from foot to head.
pub fn bed(color: &str, facing: Facing, head: bool) -> Block {
    Block::minecraft(&format!("{color}_bed"))
        .facing(facing)
        .with_state("part", if head { "head" } else { "foot" })
}

/// Where a sign is attached.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SignMount {
    /// Free-standing sign with a 0..16 rotation.
    Standing(u8),
    /// Sign hanging on a wall, text facing the given direction.
    Wall(Facing),
}

/// A sign block with glowing-capable front text.
pub fn sign_block(wood: &str, mount: SignMount, lines: [&str; 4], color: &str, glowing: bool) -> Block {
    let block = match mount {
        SignMount::Standing(rotation) => Block::minecraft(&format!("{wood}_sign"))
            .with_state("rotation", &(rotation % 16).to_string()),
        SignMount::Wall(facing) => Block::minecraft(&format!("{wood}_wall_sign")).facing(facing),
    };

    let messages: Vec<String> = lines
        .iter()
        .map(|line| {
            let component = serde_json::json!({ "text": line }).to_string();
            format!("'{}'", component.replace('\\', "\\\\").replace('\'', "\\'"))
        })
        .collect();
    let data = format!(
        "{{front_text:{{color:\"{}\",has_glowing_text:{}b,messages:[{}]}}}}",
        color,
        u8::from(glowing),
        messages.join(",")
    );
    block.with_data(data)
}

/// A chest filled with `(slot, item id)` pairs, one item each.
pub fn chest_block(facing: Facing, items: &[(u8, &str)]) -> Block {
    let items: Vec<String> = items
        .iter()
        .map(|(slot, id)| format!("{{Slot:{slot}b,id:\"{id}\",Count:1b}}"))
        .collect();
    Block::minecraft("chest")
        .facing(facing)
        .with_data(format!("{{Items:[{}]}}", items.join(",")))
}

/// A weighted list of blocks; each painted position samples one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    blocks: Vec<Block>,
}

impl Palette {
    /// Weights are expressed by repetition, so `(stone, 7), (moss, 3)` paints
    /// 70% stone.
    pub fn weighted(entries: &[(&Block, usize)]) -> Self {
        let blocks = entries
            .iter()
            .flat_map(|(block, weight)| std::iter::repeat((*block).clone()).take(*weight))
            .collect();
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Copy of the palette with `key=value` set on every entry.
    pub fn with_state(&self, key: &str, value: &str) -> Self {
        Self {
            blocks: self
                .blocks
                .iter()
                .map(|block| block.clone().with_state(key, value))
                .collect(),
        }
    }

    pub fn facing(&self, facing: Facing) -> Self {
        self.with_state("facing", facing.as_str())
    }

    /// Uniform pick with replacement. `None` only for an empty palette.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Block> {
        match self.blocks.len() {
            0 => None,
            1 => self.blocks.first(),
            n => self.blocks.get(rng.gen_range(0..n)),
        }
    }
}

/// 70% stone bricks, 20% cracked stone bricks, 10% mossy stone bricks.
pub fn base_palette() -> Palette {
    Palette::weighted(&[
        (&STONE_BRICKS, 7),
        (&CRACKED_STONE_BRICKS, 2),
        (&MOSSY_STONE_BRICKS, 1),
    ])
}

/// 80% stone brick slabs, 20% mossy stone brick slabs, of the given `type`
/// (`bottom`, `top` or `double`).
pub fn base_slab_palette(slab_type: &str) -> Palette {
    Palette::weighted(&[
        (&Block::minecraft("stone_brick_slab"), 8),
        (&Block::minecraft("mossy_stone_brick_slab"), 2),
    ])
    .with_state("type", slab_type)
}

/// 80% stone brick stairs, 20% mossy stone brick stairs, bottom half.
pub fn base_stair_palette() -> Palette {
    Palette::weighted(&[
        (&Block::minecraft("stone_brick_stairs"), 8),
        (&Block::minecraft("mossy_stone_brick_stairs"), 2),
    ])
    .with_state("half", "bottom")
}

/// Paint value for a batch of positions: a fixed block, or a palette sampled
/// independently per position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Material {
    Block(Block),
    Palette(Palette),
}

impl Material {
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Block> {
        match self {
            Material::Block(block) => Some(block),
            Material::Palette(palette) => palette.sample(rng),
        }
    }
}

impl From<Block> for Material {
    fn from(block: Block) -> Self {
        Material::Block(block)
    }
}

impl From<&Block> for Material {
    fn from(block: &Block) -> Self {
        Material::Block(block.clone())
    }
}

impl From<&Lazy<Block>> for Material {
    fn from(block: &Lazy<Block>) -> Self {
        Material::Block(Block::clone(block))
    }
}

impl From<Palette> for Material {
    fn from(palette: Palette) -> Self {
        Material::Palette(palette)
    }
}

impl From<&Palette> for Material {
    fn from(palette: &Palette) -> Self {
        Material::Palette(palette.clone())
    }
}

impl From<&Material> for Material {
    fn from(material: &Material) -> Self {
        material.clone()
    }
}
