use crate::piece::Color::{Black, White};
use crate::piece::PieceType::{Bishop, King, Knight, Pawn, Queen, Rook};
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceType {
    pub fn is_bishop_like(&self) -> bool {
        matches!(self, Bishop | Queen)
    }
    pub fn is_rook_like(&self) -> bool {
        matches!(self, Queen | Rook)
    }
    pub fn is_minor(&self) -> bool {
        matches!(self, Knight | Bishop)
    }

    /// Material worth in centipawns
    /// ```
    /// use pawnstorm::piece::PieceType;
    /// assert_eq!(PieceType::Pawn.value(), 100);
    /// assert_eq!(PieceType::Queen.value(), 900);
    /// ```
    pub fn value(&self) -> i32 {
        match self {
            Pawn => 100,
            Knight => 320,
            Bishop => 330,
            Rook => 500,
            Queen => 900,
            King => 20000,
        }
    }
}
impl Display for PieceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Pawn => "p",
                Knight => "n",
                Bishop => "b",
                Rook => "r",
                Queen => "q",
                King => "k",
            }
        )
    }
}
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}
impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            White => Black,
            Black => White,
        }
    }

    /// Row delta of a pawn push
    pub fn forward(&self) -> isize {
        match self {
            White => 1,
            Black => -1,
        }
    }

    /// Row the pawns of this color start on
    pub fn pawn_row(&self) -> usize {
        match self {
            White => 1,
            Black => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            White => "White",
            Black => "Black",
        }
    }
}
impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self == &Black { "b" } else { "w" })
    }
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece { piece_type, color }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let piece_type = match c.to_ascii_lowercase() {
            'p' => Pawn,
            'n' => Knight,
            'b' => Bishop,
            'r' => Rook,
            'q' => Queen,
            'k' => King,
            _ => return None,
        };
        let color = if c.is_lowercase() { Black } else { White };
        Some(Piece { piece_type, color })
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.piece_type.to_string();
        write!(
            f,
            "{}",
            if self.color == White {
                s.to_uppercase()
            } else {
                s
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_letters() {
        assert_eq!(Piece::from_char('N'), Some(Piece::new(Knight, White)));
        assert_eq!(Piece::from_char('q'), Some(Piece::new(Queen, Black)));
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::new(Rook, White).to_string(), "R");
        assert_eq!(Piece::new(Rook, Black).to_string(), "r");
    }

    #[test]
    fn pawn_geometry() {
        assert_eq!(White.forward(), 1);
        assert_eq!(Black.forward(), -1);
        assert_eq!(White.pawn_row(), 1);
        assert_eq!(Black.pawn_row(), 6);
        assert_eq!(White.opposite(), Black);
    }
}
