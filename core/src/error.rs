use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: a {width}x{height} board cannot hold {mines} mines")]
    InvalidConfiguration {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
    #[error("Tile index {index} is out of bounds for a board of {len} tiles")]
    IndexOutOfBounds { index: usize, len: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
