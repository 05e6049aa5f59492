//! The draughts (checkers) variant.
//!
//! A single piece type: men slide and jump along the two forward
//! diagonals, kings along all four. Jumps capture the piece on the
//! intermediate square, and a chain of jumps is validated as a unit
//! before any of it is applied. White plays the traditional red side,
//! moving down the board from rank 7 towards rank 0.

use core::fmt;
use core::fmt::Write as _;

use crate::{
    color::{ByColor, Color},
    errors::MoveError,
    square::Square,
    types::MoveList,
};

/// First two directions are forward for black, last two for white.
static DIRECTIONS: [(i8, i8); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];

/// A draughts piece. The `king` flag grants four-directional movement.
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    pub fn new(color: Color) -> Piece {
        Piece { color, king: false }
    }

    /// The piece letter, uppercase for white and lowercase for black.
    pub fn char(self) -> char {
        let ch = if self.king { 'k' } else { 'm' };
        self.color.fold(ch.to_ascii_uppercase(), ch)
    }

    fn directions(self) -> &'static [(i8, i8)] {
        if self.king {
            &DIRECTIONS
        } else {
            self.color.fold(&DIRECTIONS[2..], &DIRECTIONS[..2])
        }
    }

    /// The rank on which this piece promotes to king.
    fn back_rank(self) -> i8 {
        self.color.fold(0, 7)
    }
}

/// A draughts board: the piece grid, plus the cursor and pending
/// selection used by interactive front ends.
///
/// `Clone` produces a fully independent deep copy; jump sequences are
/// validated by replaying them against such a copy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Eq, PartialEq)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
    cursor: Square,
    selection: Vec<Square>,
}

impl Board {
    /// Creates an empty board.
    pub fn empty() -> Board {
        Board {
            grid: [[None; 8]; 8],
            cursor: Square::new(0, 0),
            selection: Vec::new(),
        }
    }

    /// Creates a board with the standard starting pattern: twelve men
    /// per side on the dark squares of each side's three home ranks.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for sq in Square::all() {
            if (sq.file() + sq.rank()) % 2 == 1 {
                if sq.rank() < 3 {
                    board.set_piece_at(sq, Piece::new(Color::Black));
                } else if sq.rank() > 4 {
                    board.set_piece_at(sq, Piece::new(Color::White));
                }
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.rank() as usize][sq.file() as usize]
    }

    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.grid[sq.rank() as usize][sq.file() as usize] = Some(piece);
    }

    #[inline]
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.grid[sq.rank() as usize][sq.file() as usize].take()
    }

    /// All pieces in row-major scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// All pieces of the given color, in row-major scan order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Remaining piece counts per side.
    pub fn count(&self) -> ByColor<usize> {
        ByColor::new_with(|color| self.pieces_of(color).count())
    }

    /// One-square diagonal moves onto empty squares.
    pub fn slides_from(&self, from: Square) -> MoveList {
        let mut moves = MoveList::new();
        if let Some(piece) = self.piece_at(from) {
            for &(df, dr) in piece.directions() {
                if let Some(to) = from.offset(df, dr) {
                    if self.piece_at(to).is_none() {
                        moves.push(to);
                    }
                }
            }
        }
        moves
    }

    /// Two-square diagonal moves over an opposing piece onto an empty
    /// square.
    pub fn jumps_from(&self, from: Square) -> MoveList {
        let mut moves = MoveList::new();
        if let Some(piece) = self.piece_at(from) {
            for &(df, dr) in piece.directions() {
                let jumped = from.offset(df, dr);
                let to = from.offset(df * 2, dr * 2);
                if let (Some(jumped), Some(to)) = (jumped, to) {
                    if self.piece_at(to).is_none()
                        && self
                            .piece_at(jumped)
                            .is_some_and(|other| other.color != piece.color)
                    {
                        moves.push(to);
                    }
                }
            }
        }
        moves
    }

    /// All single-move destinations, slides and jumps together. Used by
    /// front ends to highlight a selected piece.
    pub fn destinations_from(&self, from: Square) -> MoveList {
        let mut moves = self.slides_from(from);
        moves.extend(self.jumps_from(from));
        moves
    }

    /// Tests whether any piece of the given color has a jump available.
    ///
    /// Capture is not enforced on application; this query lets a front
    /// end implement the forced-capture convention on top.
    pub fn has_jump(&self, color: Color) -> bool {
        self.pieces_of(color)
            .any(|(from, _)| !self.jumps_from(from).is_empty())
    }

    /// Tests whether the given color has any move at all.
    pub fn has_move(&self, color: Color) -> bool {
        self.pieces_of(color)
            .any(|(from, _)| !self.destinations_from(from).is_empty())
    }

    /// Validates and applies a move sequence for the piece at `from`.
    ///
    /// A one-element sequence is a slide or a single jump. A longer
    /// sequence is a jump chain: every step must be a legal jump from
    /// the position reached by the previous step, validated against a
    /// disposable board copy before anything is applied, so a rejected
    /// sequence leaves the board exactly as it was.
    pub fn perform_moves(&mut self, from: Square, sequence: &[Square]) -> Result<(), MoveError> {
        match *sequence {
            [] => Err(MoveError::IllegalMove { from, to: from }),
            [to] => {
                if self.slides_from(from).contains(&to) {
                    self.relocate(from, to);
                } else if self.jumps_from(from).contains(&to) {
                    self.apply_jump(from, to);
                } else {
                    return Err(MoveError::IllegalMove { from, to });
                }
                Ok(())
            }
            _ => {
                self.clone().replay_jumps(from, sequence)?;
                self.replay_jumps(from, sequence)
            }
        }
    }

    fn replay_jumps(&mut self, from: Square, sequence: &[Square]) -> Result<(), MoveError> {
        let mut pos = from;
        for &to in sequence {
            if !self.jumps_from(pos).contains(&to) {
                return Err(MoveError::IllegalMove { from: pos, to });
            }
            self.apply_jump(pos, to);
            pos = to;
        }
        Ok(())
    }

    fn apply_jump(&mut self, from: Square, to: Square) {
        let jumped = Square::new(
            (from.file() + to.file()) / 2,
            (from.rank() + to.rank()) / 2,
        );
        self.remove_piece_at(jumped);
        self.relocate(from, to);
    }

    fn relocate(&mut self, from: Square, to: Square) {
        if let Some(mut piece) = self.remove_piece_at(from) {
            if to.rank() == piece.back_rank() {
                piece.king = true;
            }
            self.set_piece_at(to, piece);
        }
    }

    /// The cursor used by interactive front ends.
    pub fn cursor(&self) -> Square {
        self.cursor
    }

    pub fn set_cursor(&mut self, sq: Square) {
        self.cursor = sq;
    }

    /// Squares selected for a move in progress.
    pub fn selection(&self) -> &[Square] {
        &self.selection
    }

    pub fn select(&mut self, sq: Square) {
        self.selection.push(sq);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                f.write_char(
                    self.piece_at(Square::new(file, rank))
                        .map_or('.', Piece::char),
                )?;
                f.write_char(if file < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

/// A draughts game session: the board plus the side to move.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Game {
    board: Board,
    turn: Color,
}

impl Game {
    /// Starts a game from the standard pattern, black to move.
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            turn: Color::Black,
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

    /// Validates and plays a move sequence for the side to move, then
    /// passes the turn.
    pub fn play(&mut self, from: Square, sequence: &[Square]) -> Result<(), MoveError> {
        let to = sequence.last().copied().unwrap_or(from);
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
        self.board.perform_moves(from, sequence)?;
        self.turn = !self.turn;
        Ok(())
    }

    /// Tests whether the side to move has no piece or no move left.
    pub fn over(&self) -> bool {
        !self.board.has_move(self.turn)
    }

    /// The winning side, if the game is over.
    pub fn winner(&self) -> Option<Color> {
        if self.over() {
            Some(!self.turn)
        } else {
            None
        }
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
    fn test_standard_setup() {
        let board = Board::new();
        let count = board.count();
        assert_eq!(count.white, 12);
        assert_eq!(count.black, 12);
        assert_eq!(board.piece_at(sq("b1")), Some(Piece::new(Color::Black)));
        assert_eq!(board.piece_at(sq("a8")), Some(Piece::new(Color::White)));
        assert_eq!(board.piece_at(sq("b8")), None);
        // Only dark squares are occupied.
        assert!(board
            .pieces()
            .all(|(sq, _)| (sq.file() + sq.rank()) % 2 == 1));
    }

    #[test]
    fn test_man_slides_forward_only() {
        let mut board = Board::empty();
        board.set_piece_at(sq("c3"), Piece::new(Color::Black));
        let slides = board.slides_from(sq("c3"));
        assert_eq!(slides.len(), 2);
        assert!(slides.contains(&sq("b4")));
        assert!(slides.contains(&sq("d4")));
    }

    #[test]
    fn test_slide_blocked() {
        let mut board = Board::empty();
        board.set_piece_at(sq("c3"), Piece::new(Color::Black));
        board.set_piece_at(sq("d4"), Piece::new(Color::White));
        let slides = board.slides_from(sq("c3"));
        assert_eq!(slides.as_slice(), &[sq("b4")]);
    }

    #[test]
    fn test_jump_requires_enemy_and_empty_landing() {
        let mut board = Board::empty();
        board.set_piece_at(sq("c3"), Piece::new(Color::Black));
        board.set_piece_at(sq("d4"), Piece::new(Color::White));
        assert_eq!(board.jumps_from(sq("c3")).as_slice(), &[sq("e5")]);

        // Jumping over an own piece is not allowed.
        board.set_piece_at(sq("b4"), Piece::new(Color::Black));
        assert!(!board.jumps_from(sq("c3")).contains(&sq("a5")));

        // Nor is landing on an occupied square.
        board.set_piece_at(sq("e5"), Piece::new(Color::Black));
        assert!(board.jumps_from(sq("c3")).is_empty());
    }

    #[test]
    fn test_single_jump_captures() {
        let mut board = Board::empty();
        board.set_piece_at(sq("c3"), Piece::new(Color::Black));
        board.set_piece_at(sq("d4"), Piece::new(Color::White));
        board.perform_moves(sq("c3"), &[sq("e5")]).unwrap();
        assert_eq!(board.piece_at(sq("c3")), None);
        assert_eq!(board.piece_at(sq("d4")), None);
        assert_eq!(board.piece_at(sq("e5")), Some(Piece::new(Color::Black)));
    }

    #[test]
    fn test_compound_jump() {
        let mut board = Board::empty();
        board.set_piece_at(sq("c3"), Piece::new(Color::Black));
        board.set_piece_at(sq("d4"), Piece::new(Color::White));
        board.set_piece_at(sq("f6"), Piece::new(Color::White));
        board
            .perform_moves(sq("c3"), &[sq("e5"), sq("g7")])
            .unwrap();
        assert_eq!(board.piece_at(sq("d4")), None);
        assert_eq!(board.piece_at(sq("f6")), None);
        assert_eq!(board.piece_at(sq("g7")), Some(Piece::new(Color::Black)));
    }

    #[test]
    fn test_invalid_step_rejects_whole_sequence() {
        let mut board = Board::empty();
        board.set_piece_at(sq("c3"), Piece::new(Color::Black));
        board.set_piece_at(sq("d4"), Piece::new(Color::White));
        // No piece on f6, so the second jump is invalid.
        let before = board.clone();
        assert_eq!(
            board.perform_moves(sq("c3"), &[sq("e5"), sq("g7")]),
            Err(MoveError::IllegalMove {
                from: sq("e5"),
                to: sq("g7"),
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_promotion_grants_king_movement() {
        let mut board = Board::empty();
        board.set_piece_at(sq("b7"), Piece::new(Color::Black));
        board.perform_moves(sq("b7"), &[sq("a8")]).unwrap();
        let piece = board.piece_at(sq("a8")).unwrap();
        assert!(piece.king);
        // A king may move backwards on the next query.
        assert!(board.slides_from(sq("a8")).contains(&sq("b7")));
    }

    #[test]
    fn test_promotion_mid_chain() {
        let mut board = Board::empty();
        board.set_piece_at(sq("d6"), Piece::new(Color::Black));
        board.set_piece_at(sq("e7"), Piece::new(Color::White));
        board.set_piece_at(sq("g7"), Piece::new(Color::White));
        // The first jump lands on the back row; the second is backwards
        // and only legal because the piece is a king by then.
        board
            .perform_moves(sq("d6"), &[sq("f8"), sq("h6")])
            .unwrap();
        let piece = board.piece_at(sq("h6")).unwrap();
        assert!(piece.king);
        assert_eq!(board.count().white, 0);
    }

    #[test]
    fn test_has_jump() {
        let mut board = Board::empty();
        board.set_piece_at(sq("c3"), Piece::new(Color::Black));
        assert!(!board.has_jump(Color::Black));
        board.set_piece_at(sq("d4"), Piece::new(Color::White));
        assert!(board.has_jump(Color::Black));
        assert!(board.has_jump(Color::White));
    }

    #[test]
    fn test_game_turns_and_ownership() {
        let mut game = Game::new();
        assert_eq!(game.turn(), Color::Black);
        // a6 holds a white man; black may not move it.
        assert_eq!(game.board().piece_at(sq("a6")), Some(Piece::new(Color::White)));
        let before = game.clone();
        assert_eq!(
            game.play(sq("a6"), &[sq("b5")]),
            Err(MoveError::WrongPieceOwner {
                at: sq("a6"),
                turn: Color::Black,
            })
        );
        assert_eq!(game, before);
        game.play(sq("b3"), &[sq("a4")]).unwrap();
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_winner_when_no_pieces_left() {
        let mut board = Board::empty();
        board.set_piece_at(sq("e5"), Piece::new(Color::White));
        let game = Game::from_board(board, Color::Black);
        assert!(game.over());
        assert_eq!(game.winner(), Some(Color::White));
    }
}
