use serde::{Deserialize, Serialize};

/// Player-facing state of a single tile, handed out by [`Board::tiles`](crate::Board::tiles).
///
/// Tiles are only ever mutated by the board; what callers get is a copy taken at query time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    index: usize,
    mine: bool,
    revealed: bool,
    flagged: bool,
    exploded: bool,
    adjacent_mines: u8,
}

impl Tile {
    pub(crate) const fn new(index: usize, mine: bool, adjacent_mines: u8) -> Self {
        Self {
            index,
            mine,
            revealed: false,
            flagged: false,
            exploded: false,
            adjacent_mines,
        }
    }

    /// Row-major position on the board, `row * width + col`.
    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Whether this is the mine whose reveal ended the game.
    pub const fn is_exploded(&self) -> bool {
        self.exploded
    }

    /// Number of mines among the up-to-8 surrounding tiles.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// Hidden tiles, flagged or not, are the only ones a click can still change.
    pub const fn is_unrevealed(&self) -> bool {
        !self.revealed
    }

    pub(crate) fn reveal(&mut self) {
        debug_assert!(!self.flagged, "flagged tiles are never revealed");
        self.revealed = true;
    }

    pub(crate) fn explode(&mut self) {
        self.revealed = true;
        self.exploded = true;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        debug_assert!(!self.revealed, "revealed tiles cannot carry a flag");
        self.flagged = flagged;
    }
}
