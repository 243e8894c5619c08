//! Randomized trunk thinning shared by the trees.
//!
//! The trunk starts as a 5x5 cross-section without its four corners and its
//! center, and grows upwards one layer at a time. Before a layer is copied,
//! the occupied cell farthest from the center may be cleared; the chance of
//! clearing rises quickly with every layer because the drop rate is squared.

use crate::coordinate::Coord;
use rand::Rng;

const RADIUS: i32 = 2;

/// Tree flavors differ in their starting drop rate and in how fast it decays.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrunkKind {
    BigTree,
    CastleTree,
}

impl TrunkKind {
    fn initial_drop_rate(self) -> f64 {
        match self {
            TrunkKind::BigTree => 0.75,
            TrunkKind::CastleTree => 0.99,
        }
    }

    /// Number of times the drop rate is squared after each layer.
    fn squarings(self) -> u32 {
        match self {
            TrunkKind::BigTree => 1,
            TrunkKind::CastleTree => 2,
        }
    }
}

/// Occupied cells per grown layer, as `(dx, dz)` offsets from the trunk axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trunk {
    layers: Vec<Vec<(i32, i32)>>,
}

fn initial_section() -> Vec<(i32, i32)> {
    let mut section = Vec::with_capacity(20);
    for dx in -RADIUS..=RADIUS {
        for dz in -RADIUS..=RADIUS {
            let corner = dx.abs() == RADIUS && dz.abs() == RADIUS;
            let center = dx == 0 && dz == 0;
            if !corner && !center {
                section.push((dx, dz));
            }
        }
    }
    section
}

impl Trunk {
    pub fn grow<R: Rng + ?Sized>(kind: TrunkKind, max_height: i32, rng: &mut R) -> Self {
        let mut section = initial_section();
        let mut drop_rate = kind.initial_drop_rate();
        let mut layers = Vec::new();

        for _ in 0..max_height {
            if section.len() <= 1 {
                break;
            }
            if rng.gen::<f64>() < 1.0 - drop_rate {
                let farthest = section
                    .iter()
                    .map(|&(dx, dz)| dx * dx + dz * dz)
                    .max()
                    .unwrap_or(0);
                let candidates: Vec<usize> = section
                    .iter()
                    .enumerate()
                    .filter(|(_, &(dx, dz))| dx * dx + dz * dz == farthest)
                    .map(|(i, _)| i)
                    .collect();
                let pick = candidates[rng.gen_range(0..candidates.len())];
                section.remove(pick);
            }
            for _ in 0..kind.squarings() {
                drop_rate *= drop_rate;
            }
            layers.push(section.clone());
        }

        Self { layers }
    }

    /// Number of grown layers.
    pub fn height(&self) -> i32 {
        self.layers.len() as i32
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Vec::len).collect()
    }

    /// Log positions with layer 0 at `origin`.
    pub fn positions(&self, origin: Coord) -> Vec<Coord> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(y, layer)| {
                layer
                    .iter()
                    .map(move |&(dx, dz)| origin + Coord::new(dx, y as i32, dz))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deterministic_rng::run_rng;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_initial_section() {
        let section = initial_section();
        assert_eq!(section.len(), 20);
        assert!(!section.contains(&(0, 0)));
        assert!(!section.contains(&(2, 2)));
        assert!(section.contains(&(2, 1)));
    }

    #[test]
    fn test_layer_sizes_non_increasing() {
        for seed in 0..50 {
            for kind in [TrunkKind::BigTree, TrunkKind::CastleTree] {
                let trunk = Trunk::grow(kind, 20, &mut run_rng(Some(seed)));
                let sizes = trunk.layer_sizes();
                assert!(sizes.windows(2).all(|w| w[1] <= w[0]), "{sizes:?}");
                assert!(trunk.height() <= 20);
                // nothing grows on top of a single remaining column
                if let Some((_, below_top)) = sizes.split_last() {
                    assert!(below_top.iter().all(|&s| s > 1), "{sizes:?}");
                }
            }
        }
    }

    #[test]
    fn test_always_clearing_stops_at_single_column() {
        // A stream of zeros clears a cell on every layer.
        let mut rng = StepRng::new(0, 0);
        let trunk = Trunk::grow(TrunkKind::BigTree, 20, &mut rng);
        assert_eq!(trunk.height(), 19);
        assert_eq!(trunk.layer_sizes().last(), Some(&1));
        assert_eq!(trunk.layer_sizes()[0], 19);
    }

    #[test]
    fn test_farthest_cells_go_first() {
        let mut rng = StepRng::new(0, 0);
        let trunk = Trunk::grow(TrunkKind::BigTree, 20, &mut rng);
        // The 8 cells at distance sqrt(5) are cleared before any closer one.
        let after_eight = &trunk.layers[7];
        assert!(after_eight
            .iter()
            .all(|&(dx, dz)| dx * dx + dz * dz <= 4));
    }

    #[test]
    fn test_same_stream_same_trunk() {
        let a = Trunk::grow(TrunkKind::CastleTree, 20, &mut run_rng(Some(99)));
        let b = Trunk::grow(TrunkKind::CastleTree, 20, &mut run_rng(Some(99)));
        assert_eq!(a, b);
        let origin = Coord::new(5, 70, 5);
        assert_eq!(a.positions(origin), b.positions(origin));
    }

    #[test]
    fn test_positions_stack_layers() {
        let trunk = Trunk::grow(TrunkKind::BigTree, 3, &mut run_rng(Some(1)));
        let origin = Coord::new(0, 10, 0);
        let positions = trunk.positions(origin);
        let total: usize = trunk.layer_sizes().iter().sum();
        assert_eq!(positions.len(), total);
        assert!(positions.iter().all(|p| (10..13).contains(&p.y)));
    }
}
