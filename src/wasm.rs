//! WASM bindings for tictactoe-core
//!
//! Provides a JavaScript-friendly API over the packed board.

use wasm_bindgen::prelude::*;
use crate::{Board, Player, Pos};

/// WASM-friendly wrapper around Board
#[wasm_bindgen]
pub struct WasmBoard {
    inner: Board,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Create a new empty board
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmBoard {
        WasmBoard { inner: Board::new() }
    }

    /// Create board from 9 cell codes (0 open, 1 X, 2 O)
    #[wasm_bindgen(js_name = fromCells)]
    pub fn from_cells(cells: Vec<u8>) -> Result<WasmBoard, JsError> {
        let inner = Board::try_from(cells.as_slice())?;
        Ok(WasmBoard { inner })
    }

    /// Create board from u32 encoding
    #[wasm_bindgen(js_name = fromU32)]
    pub fn from_u32(bits: u32) -> Result<WasmBoard, JsError> {
        let inner = Board::try_from(bits)?;
        Ok(WasmBoard { inner })
    }

    /// Get u32 encoding of board
    #[wasm_bindgen(js_name = toU32)]
    pub fn to_u32(&self) -> u32 {
        self.inner.to_u32()
    }

    /// Open cells as indices 0-8
    pub fn open(&self) -> Vec<u8> {
        self.inner.open().into_iter().map(|pos| pos.0).collect()
    }

    /// Three rows of X, 0 and .
    pub fn render(&self) -> String {
        self.inner.render()
    }

    /// Play at (row, col). Does not check that the cell is open.
    pub fn play(&mut self, is_x: bool, row: u8, col: u8) {
        let player = if is_x { Player::X } else { Player::O };
        self.inner = self.inner.play(player, row, col);
    }

    /// Whether the cell at (row, col) is open
    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self, row: u8, col: u8) -> bool {
        self.inner.is_open(Pos::from_row_col(row, col))
    }

    #[wasm_bindgen(js_name = rotate90)]
    pub fn rotate90(&self) -> WasmBoard {
        WasmBoard { inner: self.inner.rotate90() }
    }

    #[wasm_bindgen(js_name = horizontalFlip)]
    pub fn horizontal_flip(&self) -> WasmBoard {
        WasmBoard { inner: self.inner.horizontal_flip() }
    }

    pub fn transpose(&self) -> WasmBoard {
        WasmBoard { inner: self.inner.transpose() }
    }

    #[wasm_bindgen(js_name = exchangePlayers)]
    pub fn exchange_players(&self) -> WasmBoard {
        WasmBoard { inner: self.inner.exchange_players() }
    }

    /// Check for winner. Returns 0 (none), 1 (X), or 2 (O)
    pub fn winner(&self) -> u8 {
        self.inner.winner().map_or(0, |p| p as u8)
    }

    /// All 8 lines as JSON array of
    /// { bits, complete: 0|1|2, pending: 0|1|2 }
    pub fn lines(&self) -> Result<JsValue, JsValue> {
        let lines: Vec<WasmLine> = self.inner.lines().iter().map(|&line| WasmLine {
            bits: line.bits(),
            complete: line.complete().map_or(0, |p| p as u8),
            pending: line.pending().map_or(0, |p| p as u8),
        }).collect();
        Ok(serde_wasm_bindgen::to_value(&lines)?)
    }

    /// Clone the board
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_board(&self) -> WasmBoard {
        WasmBoard { inner: self.inner }
    }
}

impl Default for WasmBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable line summary for JavaScript
#[derive(serde::Serialize)]
struct WasmLine {
    bits: u8,
    complete: u8,
    pending: u8,
}
