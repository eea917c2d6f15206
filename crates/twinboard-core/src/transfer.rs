//! Capture transfer: a piece captured on one board is reborn as a
//! reserve piece on the other board.

use crate::board::BoardSession;
use crate::placement::nearest_free_square;
use crate::rules::RulesEngine;
use crate::types::{BoardId, Color, Piece, PieceType, Square};

/// How a reserve piece lands on the target board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementPolicy {
    /// Place on the entry square unconditionally; an existing occupant
    /// is destroyed. Legacy behavior, kept for compatibility testing.
    #[default]
    Overwrite,
    /// Ring-search from the entry square for the nearest free square;
    /// reject the transfer when the board is full.
    NearestFree,
}

impl PlacementPolicy {
    pub const fn to_code(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::NearestFree => "nearest-free",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "overwrite" => Some(Self::Overwrite),
            "nearest-free" => Some(Self::NearestFree),
            _ => None,
        }
    }
}

/// Color of a reserve piece, fixed by which board captured: black for a
/// capture on the top board, white for a capture on the bottom board.
/// A deliberate asymmetric rule of the variant; the captured piece's
/// original color plays no part.
pub const fn reserve_color(capturing: BoardId) -> Color {
    match capturing {
        BoardId::Top => Color::Black,
        BoardId::Bottom => Color::White,
    }
}

/// Materialize a captured piece of type `captured` onto `target`, the
/// board opposite the capture. Returns the landing square, or `None`
/// when the policy rejected placement.
pub fn transfer_captured<R: RulesEngine>(
    capturing: BoardId,
    captured: PieceType,
    target: &mut BoardSession<R>,
    entry_square: Square,
    policy: PlacementPolicy,
) -> Option<Square> {
    let piece = Piece::new(captured, reserve_color(capturing));
    let landing = match policy {
        PlacementPolicy::Overwrite => Some(entry_square),
        PlacementPolicy::NearestFree => {
            nearest_free_square(entry_square, |square| target.piece_at(square).is_some())
        }
    };

    match landing {
        Some(square) => {
            target.rules_mut().put(piece, square);
            target.refresh_projection();
            tracing::debug!(
                capturing = %capturing,
                piece = %piece.piece_type.to_code(),
                color = %piece.color.to_code(),
                landing = %square,
                "capture transferred"
            );
            Some(square)
        }
        None => {
            tracing::debug!(
                capturing = %capturing,
                piece = %captured.to_code(),
                "transfer rejected: no free square on target board"
            );
            None
        }
    }
}
