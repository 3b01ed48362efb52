//! Six-bit line values and the classifiers run over them.
//!
//! A line is three 2-bit cells taken from a row, a column (a row of the
//! transposed board) or a diagonal. The first cell sits in bits 5-4.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Player, Pos};

/// Which diagonal to extract.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Diagonal {
    /// Top-left to bottom-right: cells 0, 4, 8.
    Main,
    /// Top-right to bottom-left: cells 2, 4, 6.
    Anti,
}

impl Diagonal {
    /// The cells on this diagonal, top row first.
    #[inline]
    pub fn cells(self) -> [Pos; 3] {
        match self {
            Diagonal::Main => [Pos(0), Pos(4), Pos(8)],
            Diagonal::Anti => [Pos(2), Pos(4), Pos(6)],
        }
    }
}

/// Three cells in a row, column or diagonal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Line(pub u8);

impl Line {
    /// Mask for the 6 line bits.
    pub const MASK: u8 = 0x3F;

    /// X.X, XX. and .XX
    const PENDING_X: [u8; 3] = [0b01_00_01, 0b01_01_00, 0b00_01_01];
    /// 0.0, 00. and .00
    const PENDING_O: [u8; 3] = [0b10_00_10, 0b10_10_00, 0b00_10_10];

    /// The six (line, open-cell mask) pairs recognised as a block, with the
    /// player that made it. The mask marks the blocker's bit in the cell that
    /// was open before the block.
    const BLOCKS: [(u8, u8, Player); 6] = [
        (0b10_10_01, 0b00_00_01, Player::X), // 00X
        (0b10_01_10, 0b00_01_00, Player::X), // 0X0
        (0b01_10_10, 0b01_00_00, Player::X), // X00
        (0b01_10_01, 0b00_10_00, Player::O), // X0X
        (0b01_01_10, 0b00_00_10, Player::O), // XX0
        (0b10_01_01, 0b10_00_00, Player::O), // 0XX
    ];

    /// Create a line, dropping anything above the 6 line bits.
    #[inline]
    pub const fn new(bits: u8) -> Line {
        Line(bits & Self::MASK)
    }

    /// Pack three cell codes, first cell highest.
    #[inline]
    pub const fn from_cells(cells: [u8; 3]) -> Line {
        Line::new((cells[0] & 0b11) << 4 | (cells[1] & 0b11) << 2 | (cells[2] & 0b11))
    }

    /// Get the raw 6 bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The three 2-bit cell codes, first cell first.
    #[inline]
    pub const fn cells(self) -> [u8; 3] {
        [(self.0 >> 4) & 0b11, (self.0 >> 2) & 0b11, self.0 & 0b11]
    }

    /// The player owning all three cells, if any.
    #[inline]
    pub fn complete(self) -> Option<Player> {
        match self.0 {
            0b01_01_01 => Some(Player::X),
            0b10_10_10 => Some(Player::O),
            _ => None,
        }
    }

    /// The player holding two cells with the third open, if any.
    ///
    /// Only exact two-and-an-open-cell patterns count; a mixed line or a
    /// single placed cell does not.
    #[inline]
    pub fn pending(self) -> Option<Player> {
        if Self::PENDING_X.contains(&self.0) {
            Some(Player::X)
        } else if Self::PENDING_O.contains(&self.0) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// The player whose single cell blocks the other player's two, given the
    /// mask of the cell that was taken.
    ///
    /// This is a lookup over six fixed patterns, not a general test: any
    /// pair outside the table gives `None`.
    pub fn blocking(self, open_mask: u8) -> Option<Player> {
        Self::BLOCKS
            .iter()
            .find(|&&(line, mask, _)| line == self.0 && mask == open_mask)
            .map(|&(_, _, player)| player)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for code in self.cells() {
            let ch = Player::from_bits(code).map_or('.', Player::symbol);
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
