//! Tic-tac-toe board primitives with a bit-packed board representation.
//!
//! # Board Encoding (32-bit)
//!
//! ```text
//! Bits 31-14: Board state (9 cells × 2 bits per cell, row-major, top-left highest)
//! Bits 13-0:  Padding (always zero)
//!
//! Each cell (2 bits):
//!   00 = open
//!   01 = X
//!   10 = O
//!   11 = never produced; treated as open when scanning
//!
//! Cell indices (row-major order) and the bits they occupy:
//!   (0,0)=0 [31:30]  (0,1)=1 [29:28]  (0,2)=2 [27:26]
//!   (1,0)=3 [25:24]  (1,1)=4 [23:22]  (1,2)=5 [21:20]
//!   (2,0)=6 [19:18]  (2,1)=7 [17:16]  (2,2)=8 [15:14]
//! ```
//!
//! # Line Encoding (6-bit)
//!
//! ```text
//! Three cells in the same 2-bit encoding, first cell highest:
//!   row i      -> cells (i,0) (i,1) (i,2)
//!   column j   -> row j of the transposed board
//!   diagonals  -> cells 0,4,8 (main) or 2,4,6 (anti)
//! ```
//!
//! Every operation takes a `Board` by value and returns a new one. Nothing here
//! checks whether a position is reachable in a real game; that is left to the
//! search code sitting on top.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub mod line;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use line::{Diagonal, Line};

/// Player identifier. The discriminant is the 2-bit cell code.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    X = 1,
    O = 2,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert from a cell code (1 or 2) to Player.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Player> {
        match bits {
            1 => Some(Player::X),
            2 => Some(Player::O),
            _ => None,
        }
    }

    /// Character used when rendering this player's cells.
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => '0',
        }
    }
}

/// Position on the 3x3 board (0-8).
///
/// Layout:
/// ```text
///   0 1 2
///   3 4 5
///   6 7 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos(pub u8);

impl Pos {
    /// Create a position from row and column (0-2 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < 3 && col < 3);
        Pos(row * 3 + col)
    }

    /// Get the row (0-2).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    /// Check if this is a valid position (0-8).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < 9
    }

    /// Iterate over all 9 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..9).map(Pos)
    }
}

/// Errors from the checked constructors of [`Board`].
///
/// The bit operations themselves never fail; these only come from turning
/// foreign input (slices, raw integers, text) into a board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// A cell slice did not have exactly nine entries.
    #[display("Expected 9 cells, got {}", _0)]
    CellCount(usize),

    /// A raw value had bits set in the 14-bit padding.
    #[display("Padding bits set in {:#010x}", _0)]
    ReservedBits(u32),

    /// Board text contained a character other than `X`, `0`, `O` or `.`.
    #[display("Unexpected symbol {:?} in board text", _0)]
    Symbol(char),

    /// Board text was not three rows of three cells.
    #[display("Board text must be 3 rows of 3 cells")]
    Shape,
}

impl std::error::Error for BoardError {}

/// Compact board state - fits in a single u32.
///
/// See module documentation for encoding details.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Board(pub u32);

impl Board {
    /// Bits per cell.
    const CELL_BITS: u32 = 2;
    /// Mask for a single cell (0b11).
    const CELL_MASK: u32 = 0b11;
    /// Low bits that are never used by any cell.
    const PADDING_BITS: u32 = 14;
    const PADDING_MASK: u32 = (1 << Self::PADDING_BITS) - 1;
    /// Shift of the top-left cell.
    const TOP_SHIFT: u32 = 30;

    /// The empty board.
    pub const EMPTY: Board = Board(0);

    /// Create a new empty board.
    #[inline]
    pub fn new() -> Board {
        Self::EMPTY
    }

    /// Create a board from a raw u32 encoding without checking the padding.
    #[inline]
    pub fn from_u32(bits: u32) -> Board {
        debug_assert_eq!(bits & Self::PADDING_MASK, 0, "padding bits set");
        Board(bits)
    }

    /// Get the raw u32 encoding.
    #[inline]
    pub fn to_u32(self) -> u32 {
        self.0
    }

    // ========== Codec ==========

    /// Pack nine cell codes (0 = open, 1 = X, 2 = O) in row-major order.
    ///
    /// Values outside 0-2 are not checked and end up in the bit field as-is.
    pub fn parse(cells: [u8; 9]) -> Board {
        let packed = cells
            .iter()
            .fold(0u32, |acc, &c| (acc << Self::CELL_BITS) | u32::from(c));
        Board(packed << Self::PADDING_BITS)
    }

    /// Bit offset of a cell's 2-bit field.
    #[inline]
    const fn shift(pos: Pos) -> u32 {
        Self::TOP_SHIFT - pos.0 as u32 * Self::CELL_BITS
    }

    /// Get the raw 2 bits of the cell at the given position.
    #[inline]
    pub fn cell(self, pos: Pos) -> u32 {
        (self.0 >> Self::shift(pos)) & Self::CELL_MASK
    }

    /// Get the player occupying a cell, if any.
    #[inline]
    pub fn owner(self, pos: Pos) -> Option<Player> {
        Player::from_bits(self.cell(pos) as u8)
    }

    /// Check if a cell counts as open.
    ///
    /// Both `00` and `11` count; `11` only arises from playing twice on the
    /// same cell.
    #[inline]
    pub fn is_open(self, pos: Pos) -> bool {
        matches!(self.cell(pos), 0b00 | 0b11)
    }

    /// The open cells in ascending row-major order.
    pub fn open(self) -> Vec<Pos> {
        Pos::all().filter(|&pos| self.is_open(pos)).collect()
    }

    /// Render as three lines of `X`, `0` and `.`, each ending in a newline.
    pub fn render(self) -> String {
        let mut out = String::with_capacity(12);
        for pos in Pos::all() {
            out.push(self.owner(pos).map_or('.', Player::symbol));
            if pos.col() == 2 {
                out.push('\n');
            }
        }
        out
    }

    // ========== Moves ==========

    /// Place `player` at (`row`, `col`), returning the new board.
    ///
    /// The cell is OR'd in without an occupancy check: playing on an occupied
    /// cell leaves it as `11`. Callers must only play on open cells.
    pub fn play(self, player: Player, row: u8, col: u8) -> Board {
        debug_assert!(row < 3 && col < 3);
        // 62 - 6r - 2c wraps to the same offset as 30 - 6r - 2c.
        let shift = (62 - 6 * i32::from(row) - 2 * i32::from(col)).rem_euclid(32) as u32;
        if (self.0 >> shift) & Self::CELL_MASK != 0 {
            warn!(row, col, ?player, board = self.0, "play on an occupied cell");
        }
        Board(self.0 | (player as u32) << shift)
    }

    /// Same as [`Board::play`], addressed by position.
    #[inline]
    pub fn play_at(self, player: Player, pos: Pos) -> Board {
        self.play(player, pos.row(), pos.col())
    }

    // ========== Symmetry ==========

    /// Position mapping for the table-driven transforms.
    /// Each array maps new_pos -> old_pos.
    const IDENTITY: [u8; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];
    const ROTATE_90: [u8; 9] = [6, 3, 0, 7, 4, 1, 8, 5, 2];
    const TRANSPOSE: [u8; 9] = [0, 3, 6, 1, 4, 7, 2, 5, 8];

    /// Cell value mappings, indexed by the old 2-bit value.
    const SAME: [u32; 4] = [0b00, 0b01, 0b10, 0b11];
    const SWAP: [u32; 4] = [0b00, 0b10, 0b01, 0b11];

    /// Move every cell from `mapping[new]` to `new`, passing its value
    /// through `values`, in one combining pass.
    fn remap(self, mapping: &[u8; 9], values: &[u32; 4]) -> Board {
        let mut result = 0u32;
        for new_pos in Pos::all() {
            let old_pos = Pos(mapping[new_pos.0 as usize]);
            result |= values[self.cell(old_pos) as usize] << Self::shift(new_pos);
        }
        Board(result)
    }

    /// Extract row `i` (0 = top) as a line.
    #[inline]
    pub fn row(self, i: u8) -> Line {
        debug_assert!(i < 3);
        let shift = 26 - 6 * u32::from(i);
        Line::new(((self.0 >> shift) & Line::MASK as u32) as u8)
    }

    /// Extract column `j` (0 = left) as a line, top cell first.
    #[inline]
    pub fn column(self, j: u8) -> Line {
        self.transpose().row(j)
    }

    /// Extract a diagonal as a line, top cell first.
    pub fn diagonal(self, which: Diagonal) -> Line {
        let bits = which
            .cells()
            .iter()
            .fold(0u32, |acc, &pos| (acc << Self::CELL_BITS) | self.cell(pos));
        Line::new(bits as u8)
    }

    /// All 8 lines: rows 0-2, columns 0-2, main diagonal, anti-diagonal.
    pub fn lines(self) -> [Line; 8] {
        let t = self.transpose();
        [
            self.row(0),
            self.row(1),
            self.row(2),
            t.row(0),
            t.row(1),
            t.row(2),
            self.diagonal(Diagonal::Main),
            self.diagonal(Diagonal::Anti),
        ]
    }

    /// Flip about the horizontal axis: row 0 and row 2 swap.
    pub fn horizontal_flip(self) -> Board {
        let r = |i| u32::from(self.row(i).bits());
        Board(r(2) << 26 | r(1) << 20 | r(0) << 14)
    }

    /// Rotate 90° clockwise about the center cell: (r, c) moves to (c, 2 - r).
    pub fn rotate90(self) -> Board {
        self.remap(&Self::ROTATE_90, &Self::SAME)
    }

    /// Reflect across the main diagonal: (r, c) moves to (c, r).
    ///
    /// Equal to `self.horizontal_flip().rotate90()`.
    pub fn transpose(self) -> Board {
        self.remap(&Self::TRANSPOSE, &Self::SAME)
    }

    /// Swap X and O on every occupied cell. Open cells (and `11`) stay put.
    pub fn exchange_players(self) -> Board {
        self.remap(&Self::IDENTITY, &Self::SWAP)
    }

    /// All 8 spatial images of this board.
    ///
    /// Order: identity, 90°, 180°, 270°, then the horizontal flip followed by
    /// the same three rotations.
    pub fn symmetries(self) -> [Board; 8] {
        let flipped = self.horizontal_flip();
        let mut result = [self; 8];
        result[4] = flipped;
        for t in 1..4 {
            result[t] = result[t - 1].rotate90();
            result[t + 4] = result[t + 3].rotate90();
        }
        result
    }

    // ========== Line Queries ==========

    /// The owner of the first complete line, if any.
    pub fn winner(self) -> Option<Player> {
        self.lines().iter().find_map(|line| line.complete())
    }

    /// Number of lines where `player` has two cells and the third is open.
    pub fn threats(self, player: Player) -> usize {
        self.lines()
            .iter()
            .filter(|line| line.pending() == Some(player))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<u32> for Board {
    type Error = BoardError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        if bits & Self::PADDING_MASK != 0 {
            debug!(bits, "rejected board with padding bits set");
            return Err(BoardError::ReservedBits(bits));
        }
        Ok(Board(bits))
    }
}

impl From<Board> for u32 {
    fn from(board: Board) -> u32 {
        board.0
    }
}

impl TryFrom<&[u8]> for Board {
    type Error = BoardError;

    fn try_from(cells: &[u8]) -> Result<Self, Self::Error> {
        let cells: [u8; 9] = cells
            .try_into()
            .map_err(|_| BoardError::CellCount(cells.len()))?;
        Ok(Board::parse(cells))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse the text produced by [`Board::render`]. `O` is accepted as well as `0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.strip_suffix('\n').unwrap_or(s).split('\n').collect();
        if rows.len() != 3 {
            return Err(BoardError::Shape);
        }
        let mut cells = [0u8; 9];
        let mut i = 0;
        for row in rows {
            if row.chars().count() != 3 {
                return Err(BoardError::Shape);
            }
            for ch in row.chars() {
                cells[i] = match ch {
                    '.' => 0,
                    'X' => Player::X as u8,
                    '0' | 'O' => Player::O as u8,
                    other => return Err(BoardError::Symbol(other)),
                };
                i += 1;
            }
        }
        Ok(Board::parse(cells))
    }
}
