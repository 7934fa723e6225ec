/// Squares are indexed row-major from White's back rank: a1 = 0, h1 = 7, a8 = 56
pub type Square = usize;

pub fn rank_of(sq: Square) -> usize {
    sq / 8
}
pub fn file_of(sq: Square) -> usize {
    sq % 8
}
pub fn vertical_symmetry(sq: Square) -> Square {
    8 * (7 - rank_of(sq)) + file_of(sq)
}

/// Builds a square from its (row, col) coordinates.
/// Coordinates outside of 0..8 are a caller bug.
/// ```
/// use pawnstorm::square::from_coords;
/// assert_eq!(from_coords(0, 4), 4);
/// assert_eq!(from_coords(7, 0), 56);
/// ```
pub fn from_coords(row: usize, col: usize) -> Square {
    debug_assert!(row < 8 && col < 8, "coordinates ({}, {}) are off the board", row, col);
    row * 8 + col
}

/// Offsets a square by a (row, col) delta, returning None when it would leave the board
/// ```
/// use pawnstorm::square::offset;
/// assert_eq!(offset(0, 1, 1), Some(9));
/// assert_eq!(offset(7, 0, 1), None);
/// ```
pub fn offset(sq: Square, d_row: isize, d_col: isize) -> Option<Square> {
    let row = rank_of(sq) as isize + d_row;
    let col = file_of(sq) as isize + d_col;
    if (0..8).contains(&row) && (0..8).contains(&col) {
        Some((row * 8 + col) as Square)
    } else {
        None
    }
}

/// Parses a square from a given string slice,
/// only caring that the first two characters form a valid square representation
/// ```
/// use pawnstorm::square::parse_square;
/// assert_eq!(parse_square("e4"), Some(28));
/// assert_eq!(parse_square("d2someotherstuff"), Some(11));
/// assert_eq!(parse_square("randoma1stuff"), None);
/// assert_eq!(parse_square("k9"), None);
/// ```
pub fn parse_square(s: &str) -> Option<Square> {
    let mut chars_iter = s.chars();
    let file = match chars_iter.next()? {
        c @ 'a'..='h' => c as usize - 'a' as usize,
        _ => return None,
    };
    let rank = match chars_iter.next()?.to_digit(10) {
        Some(i) if (1..=8).contains(&i) => (i - 1) as usize,
        _ => return None,
    };
    Some(rank * 8 + file)
}

/// Returns the string representation of a square
/// ```
/// use pawnstorm::square::square_representation;
/// assert_eq!(square_representation(28), Some(String::from("e4")));
/// assert_eq!(square_representation(11), Some(String::from("d2")));
/// assert_eq!(square_representation(65), None);
/// ```
pub fn square_representation(sq: Square) -> Option<String> {
    if !is_valid(sq) {
        return None;
    }
    let rank = ('1'..='8').nth(rank_of(sq))?;
    let file = ('a'..='h').nth(file_of(sq))?;
    let mut repr = file.to_string();
    repr.push(rank);
    Some(repr)
}

/// Checks whether a given square is in bounds (0..64) or not
/// ```
/// use pawnstorm::square::is_valid;
/// assert!(is_valid(12));
/// assert!(!is_valid(64));
/// ```
pub fn is_valid(sq: Square) -> bool {
    sq < 64
}
