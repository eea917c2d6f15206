//! The game session: two board sessions, the click-driven selection
//! state machine, and configuration.

use crate::board::BoardSession;
use crate::rules::{RulesEngine, ShakmatyRules};
use crate::transfer::{transfer_captured, PlacementPolicy};
use crate::types::{BoardId, DestinationList, PieceType, Square};

/// Behavior knobs. The defaults reproduce the upstream app exactly:
/// auto-promotion to queen, reserves entering at `a1`, occupants
/// overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Piece a promoting pawn becomes; requested on every move attempt,
    /// never prompted for.
    pub promotion: PieceType,
    /// Canonical square where reserve pieces enter the other board.
    pub entry_square: Square,
    pub placement: PlacementPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            promotion: PieceType::Queen,
            entry_square: Square::new_unchecked(0, 0),
            placement: PlacementPolicy::Overwrite,
        }
    }
}

/// The currently chosen piece awaiting a destination click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub board: BoardId,
    pub square: Square,
}

/// Why a click changed nothing. All of these are silent no-ops at the
/// UI; the variant exists so tests and boundaries can observe them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No piece on the clicked square while nothing was selected.
    EmptySquare,
    /// Click landed on the board the selection does not belong to.
    OtherBoard,
    /// The rules engine rejected the move; selection persists.
    IllegalMove,
}

/// What a call to [`GameSession::handle_square_click`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected,
    Moved {
        captured: Option<PieceType>,
        /// Landing square of the transferred reserve piece; `None` for a
        /// non-capturing move or when placement was rejected.
        transfer: Option<Square>,
    },
    Ignored(IgnoreReason),
}

/// The whole game state as one explicit value: both boards, the single
/// process-wide selection, its highlight set, and the configuration.
/// All mutation happens inside one `handle_square_click` call, so the
/// `&mut self` receiver is the entire concurrency story.
#[derive(Debug, Clone)]
pub struct GameSession<R> {
    top: BoardSession<R>,
    bottom: BoardSession<R>,
    selection: Option<Selection>,
    highlights: DestinationList,
    config: GameConfig,
}

impl GameSession<ShakmatyRules> {
    /// Standard start on the top board, empty bottom board.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::from_engines(ShakmatyRules::new(), ShakmatyRules::empty(), config)
    }
}

impl Default for GameSession<ShakmatyRules> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RulesEngine> GameSession<R> {
    /// Build a session over arbitrary engines, for tests and for
    /// substituting another rules implementation.
    pub fn from_engines(top: R, bottom: R, config: GameConfig) -> Self {
        Self {
            top: BoardSession::new(BoardId::Top, top),
            bottom: BoardSession::new(BoardId::Bottom, bottom),
            selection: None,
            highlights: DestinationList::new(),
            config,
        }
    }

    pub fn board(&self, id: BoardId) -> &BoardSession<R> {
        match id {
            BoardId::Top => &self.top,
            BoardId::Bottom => &self.bottom,
        }
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Legal destinations of the selected piece; empty when nothing is
    /// selected. Recomputed atomically with every selection change.
    pub fn highlights(&self) -> &[Square] {
        &self.highlights
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The single input boundary. Handles one click to completion: start
    /// a selection, attempt a move on the selected board, or ignore.
    pub fn handle_square_click(&mut self, board: BoardId, square: Square) -> ClickOutcome {
        match self.selection {
            None => self.select(board, square),
            Some(selection) if selection.board != board => {
                tracing::trace!(board = %board, square = %square, "ignored: selection on other board");
                ClickOutcome::Ignored(IgnoreReason::OtherBoard)
            }
            Some(selection) => self.attempt_move(selection, square),
        }
    }

    fn select(&mut self, board: BoardId, square: Square) -> ClickOutcome {
        if self.board(board).piece_at(square).is_none() {
            tracing::trace!(board = %board, square = %square, "ignored: empty square");
            return ClickOutcome::Ignored(IgnoreReason::EmptySquare);
        }

        // A piece with no legal moves is still selectable; its highlight
        // set is just empty.
        self.highlights = self.board(board).rules().moves(square);
        self.selection = Some(Selection { board, square });
        tracing::debug!(
            board = %board,
            square = %square,
            destinations = self.highlights.len(),
            "selection started"
        );
        ClickOutcome::Selected
    }

    fn attempt_move(&mut self, selection: Selection, destination: Square) -> ClickOutcome {
        let promotion = self.config.promotion;
        let session = self.board_mut(selection.board);
        let Some(played) = session
            .rules_mut()
            .try_move(selection.square, destination, promotion)
        else {
            tracing::trace!(
                board = %selection.board,
                from = %selection.square,
                to = %destination,
                "ignored: illegal move"
            );
            return ClickOutcome::Ignored(IgnoreReason::IllegalMove);
        };
        session.refresh_projection();

        self.selection = None;
        self.highlights.clear();
        tracing::debug!(
            board = %selection.board,
            from = %played.from,
            to = %played.to,
            piece = %played.piece.to_code(),
            captured = ?played.captured,
            "move committed"
        );

        let transfer = played.captured.and_then(|captured| {
            let entry = self.config.entry_square;
            let policy = self.config.placement;
            transfer_captured(
                selection.board,
                captured,
                self.board_mut(selection.board.other()),
                entry,
                policy,
            )
        });

        ClickOutcome::Moved {
            captured: played.captured,
            transfer,
        }
    }

    fn board_mut(&mut self, id: BoardId) -> &mut BoardSession<R> {
        match id {
            BoardId::Top => &mut self.top,
            BoardId::Bottom => &mut self.bottom,
        }
    }
}
