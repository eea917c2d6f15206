use wasm_bindgen::prelude::*;

use serde::Serialize;
use twinboard_core::{
    BoardId, ClickOutcome, GameConfig, GameSession, IgnoreReason, Piece, PieceType, PlacementPolicy,
    ShakmatyRules, Square,
};

/// Initialize panic hook for readable error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// A projection cell for JS consumers: `{ type: "n", color: "b" }`.
#[derive(Serialize)]
struct JsPiece {
    #[serde(rename = "type")]
    piece_type: char,
    color: char,
}

impl From<Piece> for JsPiece {
    fn from(piece: Piece) -> Self {
        Self {
            piece_type: piece.piece_type.to_code(),
            color: piece.color.to_code(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsOutcome {
    kind: &'static str,
    reason: Option<&'static str>,
    captured: Option<char>,
    transfer: Option<String>,
}

impl From<ClickOutcome> for JsOutcome {
    fn from(outcome: ClickOutcome) -> Self {
        match outcome {
            ClickOutcome::Selected => Self {
                kind: "selected",
                reason: None,
                captured: None,
                transfer: None,
            },
            ClickOutcome::Moved { captured, transfer } => Self {
                kind: "moved",
                reason: None,
                captured: captured.map(PieceType::to_code),
                transfer: transfer.map(|square| square.to_string()),
            },
            ClickOutcome::Ignored(reason) => Self {
                kind: "ignored",
                reason: Some(match reason {
                    IgnoreReason::EmptySquare => "empty-square",
                    IgnoreReason::OtherBoard => "other-board",
                    IgnoreReason::IllegalMove => "illegal-move",
                }),
                captured: None,
                transfer: None,
            },
        }
    }
}

#[derive(Serialize)]
struct JsSelection {
    board: &'static str,
    square: String,
}

/// The two-board game, exported to the browser renderer. One instance
/// per page; every square click funnels through [`click`].
///
/// [`click`]: TwinboardGame::click
#[wasm_bindgen]
pub struct TwinboardGame {
    session: GameSession<ShakmatyRules>,
}

#[wasm_bindgen]
impl TwinboardGame {
    /// Standard start on the top board, empty bottom board, default
    /// rules: promotion to queen, reserves entering at a1, occupants
    /// overwritten.
    #[wasm_bindgen(constructor)]
    pub fn new() -> TwinboardGame {
        Self {
            session: GameSession::new(),
        }
    }

    /// Configured game. `promotion` is a piece code (`"q"`, `"n"`, ...),
    /// `placement` is `"overwrite"` or `"nearest-free"`, `entry` is the
    /// algebraic square reserve pieces enter at.
    #[wasm_bindgen(js_name = "withOptions")]
    pub fn with_options(
        promotion: &str,
        placement: &str,
        entry: &str,
    ) -> Result<TwinboardGame, JsError> {
        let promotion: PieceType = promotion.parse().map_err(|e| JsError::new(&format!("{e}")))?;
        let placement = PlacementPolicy::from_code(placement).ok_or_else(|| {
            JsError::new(&format!(
                "invalid placement policy: {placement:?} (expected \"overwrite\" or \"nearest-free\")"
            ))
        })?;
        let entry_square: Square = entry.parse().map_err(|e| JsError::new(&format!("{e}")))?;
        Ok(Self {
            session: GameSession::with_config(GameConfig {
                promotion,
                entry_square,
                placement,
            }),
        })
    }

    /// Handle a click at `square` on `board` (`"top"` or `"bottom"`).
    /// Returns `{ kind, reason?, captured?, transfer? }`.
    pub fn click(&mut self, board: &str, square: &str) -> Result<JsValue, JsError> {
        let board: BoardId = board.parse().map_err(|e| JsError::new(&format!("{e}")))?;
        let square: Square = square.parse().map_err(|e| JsError::new(&format!("{e}")))?;
        let outcome = JsOutcome::from(self.session.handle_square_click(board, square));
        serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsError::new(&e.to_string()))
    }

    /// The board's 8x8 grid in render order (rank 8 row first), cells
    /// `null` or `{ type, color }`.
    pub fn projection(&self, board: &str) -> Result<JsValue, JsError> {
        let board: BoardId = board.parse().map_err(|e| JsError::new(&format!("{e}")))?;
        let grid: Vec<Vec<Option<JsPiece>>> = self
            .session
            .board(board)
            .projection()
            .iter()
            .rev()
            .map(|row| row.iter().map(|cell| cell.map(JsPiece::from)).collect())
            .collect();
        serde_wasm_bindgen::to_value(&grid).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Legal destinations of the current selection as algebraic squares,
    /// e.g. `["e3", "e4"]`. Empty when nothing is selected.
    pub fn highlights(&self) -> Result<JsValue, JsError> {
        let squares: Vec<String> = self
            .session
            .highlights()
            .iter()
            .map(Square::to_string)
            .collect();
        serde_wasm_bindgen::to_value(&squares).map_err(|e| JsError::new(&e.to_string()))
    }

    /// `null`, or `{ board, square }` for the current selection.
    pub fn selection(&self) -> Result<JsValue, JsError> {
        let selection = self.session.selection().map(|selection| JsSelection {
            board: selection.board.to_code(),
            square: selection.square.to_string(),
        });
        serde_wasm_bindgen::to_value(&selection).map_err(|e| JsError::new(&e.to_string()))
    }

    /// `"w"` or `"b"`: the side to move on the given board.
    pub fn turn(&self, board: &str) -> Result<String, JsError> {
        let board: BoardId = board.parse().map_err(|e| JsError::new(&format!("{e}")))?;
        Ok(self.session.board(board).rules().turn().to_code().to_string())
    }
}

impl Default for TwinboardGame {
    fn default() -> Self {
        Self::new()
    }
}
