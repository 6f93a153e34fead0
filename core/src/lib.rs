#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod board;
mod difficulty;
mod error;
mod generator;
mod tile;
mod types;

/// Dimensions and mine count of a game. Always satisfies `0 < mines < width * height`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    width: Coord,
    height: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    width: Coord,
    height: Coord,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.width, raw.height, raw.mines)
    }
}

impl GameConfig {
    pub(crate) const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 || mines == 0 || mines >= mult(width, height) {
            return Err(GameError::InvalidConfiguration {
                width,
                height,
                mines,
            });
        }
        Ok(Self::new_unchecked(width, height, mines))
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_tiles(&self) -> CellCount {
        self.total_tiles() - self.mines
    }

    /// Bounds in `(row, col)` order, as used by [`NeighborIter`].
    pub const fn bounds(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub(crate) fn validate_index(&self, index: usize) -> Result<Coord2> {
        if index < usize::from(self.total_tiles()) {
            Ok(coords_of(index, self.width))
        } else {
            Err(GameError::IndexOutOfBounds {
                index,
                len: self.total_tiles(),
            })
        }
    }
}

/// Where the mines are. Fixed for the lifetime of a board.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MineLayout {
    config: GameConfig,
    mine_mask: Array2<bool>,
}

impl MineLayout {
    /// Builds a layout with mines at exactly the given tile indices. Duplicates are ignored.
    pub fn from_mine_indices(width: Coord, height: Coord, mine_indices: &[usize]) -> Result<Self> {
        let total_tiles = mult(width, height);
        let mut mine_mask: Array2<bool> = Array2::default((height, width).to_nd_index());

        for &index in mine_indices {
            if index >= usize::from(total_tiles) {
                return Err(GameError::IndexOutOfBounds {
                    index,
                    len: total_tiles,
                });
            }
            mine_mask[coords_of(index, width).to_nd_index()] = true;
        }

        // bounded by total_tiles, which fits in CellCount
        let mines = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        let config = GameConfig::new(width, height, mines)?;
        Ok(Self { config, mine_mask })
    }

    pub(crate) fn from_mine_mask(config: GameConfig, mine_mask: Array2<bool>) -> Self {
        Self { config, mine_mask }
    }

    pub fn game_config(&self) -> GameConfig {
        self.config
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.config.bounds())
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// What a single click did to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    NoChange,
    Flagged,
    Unflagged,
    Revealed,
    HitMine,
    Won,
}

impl ClickOutcome {
    /// Whether the caller needs to re-read the board.
    pub const fn has_update(self) -> bool {
        use ClickOutcome::*;
        match self {
            NoChange => false,
            Flagged => true,
            Unflagged => true,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
