//! Turn-level session state for a chess game.

use crate::{board::Board, color::Color, errors::MoveError, square::Square};

/// A chess game session: the board plus the side to move.
///
/// The session enforces ownership of the moved piece and alternates the
/// turn; everything else is delegated to [`Board`]. Front ends drive a
/// game by calling [`Game::play`] and re-prompting on error.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Game {
    board: Board,
    turn: Color,
}

impl Game {
    /// Starts a game from the standard position, white to move.
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            turn: Color::White,
        }
    }

    /// Resumes a game from an existing board and side to move.
    pub fn from_board(board: Board, turn: Color) -> Game {
        Game { board, turn }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Validates and plays a move for the side to move, then passes the
    /// turn.
    ///
    /// Fails with [`MoveError::WrongPieceOwner`] if the piece at `from`
    /// belongs to the opponent, before any legality check runs.
    pub fn play(&mut self, from: Square, to: Square) -> Result<(), MoveError> {
        match self.board.piece_at(from) {
            None => return Err(MoveError::IllegalMove { from, to }),
            Some(piece) if piece.color != self.turn => {
                return Err(MoveError::WrongPieceOwner {
                    at: from,
                    turn: self.turn,
                })
            }
            Some(_) => (),
        }
        self.board.play(from, to)?;
        self.turn = !self.turn;
        Ok(())
    }

    /// Tests whether either side has run out of legal moves.
    pub fn over(&self) -> bool {
        self.board.is_checkmate(Color::White) || self.board.is_checkmate(Color::Black)
    }

    /// The winning side, if the game is over.
    pub fn winner(&self) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|&color| self.board.is_checkmate(color))
            .map(|loser| !loser)
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_turn_alternates() {
        let mut game = Game::new();
        assert_eq!(game.turn(), Color::White);
        game.play(sq("e2"), sq("e4")).unwrap();
        assert_eq!(game.turn(), Color::Black);
        game.play(sq("e7"), sq("e5")).unwrap();
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_wrong_owner() {
        let mut game = Game::new();
        let before = game.clone();
        assert_eq!(
            game.play(sq("e7"), sq("e5")),
            Err(MoveError::WrongPieceOwner {
                at: sq("e7"),
                turn: Color::White,
            })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_failed_move_keeps_turn() {
        let mut game = Game::new();
        assert!(game.play(sq("e2"), sq("e6")).is_err());
        assert_eq!(game.turn(), Color::White);
        game.play(sq("e2"), sq("e4")).unwrap();
    }

    #[test]
    fn test_fools_mate() {
        let mut game = Game::new();
        game.play(sq("f2"), sq("f3")).unwrap();
        game.play(sq("e7"), sq("e5")).unwrap();
        game.play(sq("g2"), sq("g4")).unwrap();
        game.play(sq("d8"), sq("h4")).unwrap();
        assert!(game.over());
        assert_eq!(game.winner(), Some(Color::Black));
    }
}
