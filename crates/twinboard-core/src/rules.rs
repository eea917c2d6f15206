//! The move-legality boundary.
//!
//! The core never implements chess rules itself; it consumes them through
//! the [`RulesEngine`] capability set, one instance per board. The shipped
//! implementation wraps shakmaty.

use shakmaty::{
    CastlingMode, Chess, EnPassantMode, File, FromSetup, Move, Position, PositionError, Rank, Role,
    Setup,
};

use crate::types::{Color, DestinationList, Piece, PieceType, Square};

/// Record of a committed move, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlayed {
    pub color: Color,
    pub piece: PieceType,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceType>,
    pub promotion: Option<PieceType>,
}

/// Capability set required of a standard-chess rules implementation.
///
/// Any conforming engine can be substituted; the game session only ever
/// talks to this trait.
pub trait RulesEngine {
    /// Piece currently on `square`, if any.
    fn get(&self, square: Square) -> Option<Piece>;

    /// Attempt `from` -> `to` for the side to move. Returns `None` and
    /// leaves the position untouched if the move is illegal. `promotion`
    /// names the piece a promoting pawn becomes.
    fn try_move(&mut self, from: Square, to: Square, promotion: PieceType) -> Option<MovePlayed>;

    /// Destinations legally reachable by the piece at `square`. Empty if
    /// the square is empty, the piece belongs to the side not on move, or
    /// the piece has no legal move.
    fn moves(&self, square: Square) -> DestinationList;

    /// Force-place a piece, bypassing move legality. Used only for
    /// reserve-piece transfer and test arrangement.
    fn put(&mut self, piece: Piece, square: Square);

    /// Remove all pieces and reset the side to move to white.
    fn clear(&mut self);
}

/// shakmaty-backed [`RulesEngine`].
///
/// Authoritative state is a [`Setup`] so that `put` and `clear` can
/// produce placements no legal game reaches (the transfer target board
/// normally has no kings). Legality queries materialize a [`Chess`] from
/// the setup; a setup that fails validation beyond the tolerated kinds
/// has no side to move legally, so `moves` is empty and `try_move`
/// returns `None`.
#[derive(Debug, Clone)]
pub struct ShakmatyRules {
    setup: Setup,
}

impl ShakmatyRules {
    /// Standard chess starting position.
    pub fn new() -> Self {
        Self {
            setup: Setup::default(),
        }
    }

    /// Empty board, white to move.
    pub fn empty() -> Self {
        Self {
            setup: Setup::empty(),
        }
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        from_engine_color(self.setup.turn)
    }

    fn position(&self) -> Option<Chess> {
        Chess::from_setup(self.setup.clone(), CastlingMode::Standard)
            .or_else(PositionError::ignore_too_much_material)
            .or_else(PositionError::ignore_impossible_check)
            .or_else(PositionError::ignore_invalid_castling_rights)
            .or_else(PositionError::ignore_invalid_ep_square)
            .ok()
    }
}

impl Default for ShakmatyRules {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for ShakmatyRules {
    fn get(&self, square: Square) -> Option<Piece> {
        self.setup
            .board
            .piece_at(to_engine_square(square))
            .map(from_engine_piece)
    }

    fn try_move(&mut self, from: Square, to: Square, promotion: PieceType) -> Option<MovePlayed> {
        let pos = self.position()?;
        let wanted = to_role(promotion);
        let mv = pos
            .legal_moves()
            .iter()
            .find(|m| {
                click_squares(m) == Some((from, to)) && m.promotion().map_or(true, |r| r == wanted)
            })
            .cloned()?;

        let record = MovePlayed {
            color: from_engine_color(pos.turn()),
            piece: from_role(mv.role()),
            from,
            to,
            captured: mv.capture().map(from_role),
            promotion: mv.promotion().map(from_role),
        };

        // Round-trip through the position so castling rights and the
        // en-passant square stay exact.
        let mut next = pos;
        next.play_unchecked(&mv);
        self.setup = next.into_setup(EnPassantMode::Legal);
        Some(record)
    }

    fn moves(&self, square: Square) -> DestinationList {
        let mut destinations = DestinationList::new();
        let Some(pos) = self.position() else {
            return destinations;
        };
        for mv in &pos.legal_moves() {
            let Some((from, to)) = click_squares(mv) else {
                continue;
            };
            // The four promotion choices collapse to one destination.
            if from == square && !destinations.contains(&to) {
                destinations.push(to);
            }
        }
        destinations
    }

    fn put(&mut self, piece: Piece, square: Square) {
        self.setup
            .board
            .set_piece_at(to_engine_square(square), to_engine_piece(piece));
    }

    fn clear(&mut self) {
        self.setup = Setup::empty();
    }
}

/// The (from, to) pair a click-driven UI uses for a move. Castling is
/// clicked as king origin to king destination (e1 -> g1 style), not the
/// engine's king-takes-rook encoding. Drops have no origin and do not
/// occur in standard chess.
fn click_squares(mv: &Move) -> Option<(Square, Square)> {
    match *mv {
        Move::Castle { king, rook } => {
            let file = if rook < king { File::C } else { File::G };
            Some((
                from_engine_square(king),
                from_engine_square(shakmaty::Square::from_coords(file, king.rank())),
            ))
        }
        _ => Some((from_engine_square(mv.from()?), from_engine_square(mv.to()))),
    }
}

fn to_engine_square(square: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(
        File::new(u32::from(square.file)),
        Rank::new(u32::from(square.rank)),
    )
}

fn from_engine_square(square: shakmaty::Square) -> Square {
    Square::new_unchecked(u32::from(square.file()) as u8, u32::from(square.rank()) as u8)
}

const fn to_role(piece_type: PieceType) -> Role {
    match piece_type {
        PieceType::Pawn => Role::Pawn,
        PieceType::Knight => Role::Knight,
        PieceType::Bishop => Role::Bishop,
        PieceType::Rook => Role::Rook,
        PieceType::Queen => Role::Queen,
        PieceType::King => Role::King,
    }
}

const fn from_role(role: Role) -> PieceType {
    match role {
        Role::Pawn => PieceType::Pawn,
        Role::Knight => PieceType::Knight,
        Role::Bishop => PieceType::Bishop,
        Role::Rook => PieceType::Rook,
        Role::Queen => PieceType::Queen,
        Role::King => PieceType::King,
    }
}

const fn to_engine_color(color: Color) -> shakmaty::Color {
    match color {
        Color::White => shakmaty::Color::White,
        Color::Black => shakmaty::Color::Black,
    }
}

const fn from_engine_color(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

fn to_engine_piece(piece: Piece) -> shakmaty::Piece {
    shakmaty::Piece {
        color: to_engine_color(piece.color),
        role: to_role(piece.piece_type),
    }
}

fn from_engine_piece(piece: shakmaty::Piece) -> Piece {
    Piece::new(from_role(piece.role), from_engine_color(piece.color))
}
