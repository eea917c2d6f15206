use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),
    #[error("invalid board: {0:?} (expected \"top\" or \"bottom\")")]
    InvalidBoard(String),
    #[error("invalid piece code: {0:?}")]
    InvalidPiece(String),
    #[error("invalid color code: {0:?}")]
    InvalidColor(String),
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn to_code(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'w' => Some(Self::White),
            'b' => Some(Self::Black),
            _ => None,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, ParseError> {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => {
                Self::from_code(code).ok_or_else(|| ParseError::InvalidColor(input.to_string()))
            }
            _ => Err(ParseError::InvalidColor(input.to_string())),
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    pub const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    pub const fn to_code(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

impl FromStr for PieceType {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, ParseError> {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_code(code.to_ascii_lowercase())
                .ok_or_else(|| ParseError::InvalidPiece(input.to_string())),
            _ => Err(ParseError::InvalidPiece(input.to_string())),
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }
}

/// A square on the 8x8 grid. File 0 is the a-file, rank 0 is rank 1,
/// so `a1` is `(0, 0)` and `h8` is `(7, 7)`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    pub const fn new_unchecked(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let bytes = input.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].checked_sub(b'a')?;
        let rank = bytes[1].checked_sub(b'1')?;
        Self::new(file, rank)
    }

    /// All 64 squares, a1..h1, a2..h2, up to h8.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Self { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, ParseError> {
        Self::parse(input).ok_or_else(|| ParseError::InvalidSquare(input.to_string()))
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardId {
    Top = 0,
    Bottom = 1,
}

impl BoardId {
    pub const fn to_code(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_code())
    }
}

impl FromStr for BoardId {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, ParseError> {
        match input {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(ParseError::InvalidBoard(input.to_string())),
        }
    }
}

/// Legal destinations of a single piece. A queen in the open reaches at
/// most 27 squares, so the list never spills.
pub type DestinationList = ArrayVec<Square, 28>;
