use crate::square::{self, file_of, rank_of, square_representation, Square};
use std::fmt::{Display, Formatter};

/// Moves are stored as a 2bytes word: 6 bits of origin followed by 6 bits of target.
/// There are no flag bits, castling, en passant and promotion are not played.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    pub fn new(origin: Square, target: Square) -> Move {
        debug_assert!(square::is_valid(origin) && square::is_valid(target));
        Move(((origin as u16) << 6) | target as u16)
    }

    /// Builds a move from (row, col) pairs, row 0 being White's back rank
    /// ```
    /// use pawnstorm::Move;
    /// let mv = Move::from_coords(1, 4, 3, 4);
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn from_coords(from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> Move {
        Self::new(
            square::from_coords(from_row, from_col),
            square::from_coords(to_row, to_col),
        )
    }

    pub fn origin(&self) -> Square {
        (self.0 >> 6) as Square
    }
    pub fn target(&self) -> Square {
        (self.0 & 0b111111) as Square
    }

    pub fn from_row(&self) -> usize {
        rank_of(self.origin())
    }
    pub fn from_col(&self) -> usize {
        file_of(self.origin())
    }
    pub fn to_row(&self) -> usize {
        rank_of(self.target())
    }
    pub fn to_col(&self) -> usize {
        file_of(self.target())
    }

    /// Parses a move formatted in long algebraic notation.
    /// ```
    /// use pawnstorm::Move;
    /// assert_eq!(Move::parse("g1f3"), Some(Move::new(6, 21)));
    /// assert_eq!(Move::parse("e7e8q"), None);
    /// assert_eq!(Move::parse("e2"), None);
    /// ```
    pub fn parse(mv: &str) -> Option<Move> {
        if mv.len() != 4 || !mv.is_ascii() {
            return None;
        }
        let origin = square::parse_square(&mv[0..2])?;
        let target = square::parse_square(&mv[2..4])?;
        Some(Move::new(origin, target))
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let o = square_representation(self.origin()).unwrap_or_else(|| String::from("**"));
        let t = square_representation(self.target()).unwrap_or_else(|| String::from("**"));
        write!(f, "{}{}", o, t)
    }
}

#[cfg(test)]
mod tests {
    use super::Move;

    #[test]
    fn coordinates_survive_packing() {
        let mv = Move::from_coords(7, 6, 5, 5);
        assert_eq!(mv.origin(), 62);
        assert_eq!(mv.target(), 45);
        assert_eq!((mv.from_row(), mv.from_col()), (7, 6));
        assert_eq!((mv.to_row(), mv.to_col()), (5, 5));
        assert_eq!(mv.to_string(), "g8f6");
    }

    #[test]
    fn corners() {
        let mv = Move::new(63, 0);
        assert_eq!(mv.origin(), 63);
        assert_eq!(mv.target(), 0);
        assert_eq!(Move::parse("h8a1"), Some(mv));
    }
}
