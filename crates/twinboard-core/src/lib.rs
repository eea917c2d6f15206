pub mod board;
pub mod game;
pub mod placement;
pub mod rules;
pub mod transfer;
pub mod types;

pub use board::{BoardSession, Projection};
pub use game::{ClickOutcome, GameConfig, GameSession, IgnoreReason, Selection};
pub use placement::nearest_free_square;
pub use rules::{MovePlayed, RulesEngine, ShakmatyRules};
pub use transfer::{reserve_color, transfer_captured, PlacementPolicy};
pub use types::{BoardId, Color, DestinationList, ParseError, Piece, PieceType, Square};
