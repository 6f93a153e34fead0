use core::fmt::Write;
use minsweeper_core::{Board, Tile};

fn tile_char(tile: &Tile) -> char {
    if tile.is_flagged() {
        'F'
    } else if !tile.is_revealed() {
        '*'
    } else if tile.is_exploded() {
        'X'
    } else if tile.is_mine() {
        'b'
    } else if tile.adjacent_mines() == 0 {
        '.'
    } else {
        char::from(b'0' + tile.adjacent_mines())
    }
}

/// Renders the board as text, with a status line and row/column labels.
pub fn render(board: &Board) -> String {
    let width = usize::from(board.width());
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(
        out,
        "{:?} | mines left: {}",
        board.state(),
        board.mines_left()
    );

    out.push_str("    ");
    for col in 0..width {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for (row, tiles) in board.tiles().chunks(width).enumerate() {
        let _ = write!(out, "{:>3} ", row);
        for tile in tiles {
            let _ = write!(out, "{:>3}", tile_char(tile));
        }
        out.push('\n');
    }
    out
}
