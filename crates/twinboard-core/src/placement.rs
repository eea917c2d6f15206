//! Nearest-unoccupied-square search for reserve placement.

use crate::types::Square;

/// Find the unoccupied square nearest to `origin`, searching expanding
/// square rings of Chebyshev distance `d = 0, 1, ..., 7`. Within a ring,
/// offsets `(dr, dc)` with `max(|dr|, |dc|) = d` are visited row-major
/// over `dr` then `dc` (`dr` is a rank delta, `dc` a file delta), and
/// off-board offsets are skipped. Returns `None` when the whole grid is
/// occupied.
pub fn nearest_free_square<F>(origin: Square, mut is_occupied: F) -> Option<Square>
where
    F: FnMut(Square) -> bool,
{
    for d in 0..8i16 {
        for dr in -d..=d {
            for dc in -d..=d {
                if dr.abs() != d && dc.abs() != d {
                    continue;
                }
                let rank = i16::from(origin.rank) + dr;
                let file = i16::from(origin.file) + dc;
                if !(0..8).contains(&rank) || !(0..8).contains(&file) {
                    continue;
                }
                let square = Square::new_unchecked(file as u8, rank as u8);
                if !is_occupied(square) {
                    return Some(square);
                }
            }
        }
    }
    None
}
