use arrayvec::ArrayVec;

use crate::{color::Color, role::Role, square::Square};

/// A chess piece with [`Color`], [`Role`] and move history flags.
///
/// `moved` is set on the first relocation and gates the pawn double-step.
/// `promoted` marks a queen that began life as a pawn.
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    pub moved: bool,
    pub promoted: bool,
}

impl Piece {
    /// The piece letter, uppercase for white and lowercase for black.
    pub const fn char(self) -> char {
        match self.color {
            Color::White => self.role.upper_char(),
            Color::Black => self.role.char(),
        }
    }
}

/// A container for destination squares that can be stored inline on the
/// stack.
///
/// The capacity is limited, but there is enough space to hold the
/// candidate destinations of any piece (a queen reaches at most 27
/// squares).
pub type MoveList = ArrayVec<Square, 28>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char() {
        assert_eq!(Role::Queen.of(Color::White).char(), 'Q');
        assert_eq!(Role::Knight.of(Color::Black).char(), 'n');
    }
}
