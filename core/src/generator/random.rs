use super::*;

/// Places mines uniformly at random, without replacement, from a seeded RNG.
///
/// The same seed and config always produce the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;
        use rand::seq::index;

        let total_tiles = usize::from(config.total_tiles());
        let mines = usize::from(config.mines());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut mine_mask: Array2<bool> = Array2::default(config.bounds().to_nd_index());
        for tile_index in index::sample(&mut rng, total_tiles, mines) {
            mine_mask[coords_of(tile_index, config.width()).to_nd_index()] = true;
        }

        log::debug!(
            "Placed {} mines on a {}x{} board, seed: {}",
            mines,
            config.width(),
            config.height(),
            self.seed
        );
        MineLayout::from_mine_mask(config, mine_mask)
    }
}
