use crate::r#move::Move;
use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fifteen queens with every line open plus a king, an upper bound for
/// any side of at most 16 pieces
pub const MAX_MOVELIST_CAPACITY: usize = 15 * 27 + 8;

#[derive(Clone, Debug, PartialEq)]
pub struct MoveList(ArrayVec<Move, MAX_MOVELIST_CAPACITY>);
impl Default for MoveList {
    fn default() -> Self {
        MoveList(ArrayVec::new())
    }
}
impl MoveList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn push(&mut self, m: Move) {
        self.0.push(m)
    }
    pub fn contains(&self, m: &Move) -> bool {
        self.0.contains(m)
    }

    /// Puts the moves in a random order, drawn from `rng`
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.as_mut_slice().shuffle(rng)
    }

    /// Moves starting from the given square
    pub fn from_square(&self, sq: usize) -> impl Iterator<Item = &Move> + '_ {
        self.0.iter().filter(move |m| m.origin() == sq)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }
}
impl From<Vec<Move>> for MoveList {
    fn from(v: Vec<Move>) -> Self {
        let mut mv_list = MoveList::default();
        for m in v {
            mv_list.push(m)
        }
        mv_list
    }
}
impl std::fmt::Display for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        let mut s = String::new();
        for m in self.0.iter() {
            s.push_str(&format!("{} ", m))
        }
        write!(f, "{}", s.trim())
    }
}
impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> MoveList {
        MoveList::from(vec![
            Move::new(12, 28),
            Move::new(12, 20),
            Move::new(6, 21),
            Move::new(1, 18),
        ])
    }

    #[test]
    fn display_and_filter() {
        let list = sample();
        assert_eq!(list.to_string(), "e2e4 e2e3 g1f3 b1c3");
        assert_eq!(list.from_square(12).count(), 2);
        assert_eq!(list.from_square(0).count(), 0);
    }

    #[test]
    fn shuffle_keeps_the_moves() {
        let mut list = sample();
        list.shuffle(&mut StdRng::seed_from_u64(3));
        assert_eq!(list.len(), 4);
        for m in &sample() {
            assert!(list.contains(m));
        }

        let mut again = sample();
        again.shuffle(&mut StdRng::seed_from_u64(3));
        assert_eq!(list, again);
    }
}
