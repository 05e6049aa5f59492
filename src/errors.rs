use core::fmt;

use std::error::Error;

use crate::{color::Color, square::Square};

/// Error when a requested move cannot be applied.
///
/// Rule violations are detected before any mutation, so the board is
/// always left unchanged when one of these is returned.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MoveError {
    /// The source square is empty, the destination is not in the piece's
    /// legal move set, or a jump sequence contains an invalid step.
    IllegalMove { from: Square, to: Square },
    /// The selected piece does not belong to the player whose turn it is.
    WrongPieceOwner { at: Square, turn: Color },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MoveError::IllegalMove { from, to } => {
                write!(f, "illegal move from {from} to {to}")
            }
            MoveError::WrongPieceOwner { at, turn } => {
                write!(f, "piece at {at} does not belong to {turn}")
            }
        }
    }
}

impl Error for MoveError {}
