//! The chess board and its movement rules.

use core::fmt;
use core::fmt::Write as _;

use std::error::Error;

use bitflags::bitflags;

use crate::{
    color::Color,
    errors::MoveError,
    role::Role,
    square::Square,
    types::{MoveList, Piece},
};

/// An 8×8 grid of optional pieces.
pub type Grid = [[Option<Piece>; 8]; 8];

static ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
static BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];
static KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
static KNIGHT_STEPS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

static BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

bitflags! {
    /// Reasons for a [`SetupError`].
    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    pub struct SetupErrorKinds: u32 {
        /// There are no pieces on the board.
        const EMPTY_BOARD = 1 << 0;
        /// A side has no king.
        const MISSING_KING = 1 << 1;
        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 2;
        /// There are pawns on the first or last rank.
        const PAWNS_ON_BACKRANK = 1 << 3;
    }
}

/// Error when reconstructing a board from an invalid grid.
#[derive(Clone, Debug)]
pub struct SetupError {
    kinds: SetupErrorKinds,
}

impl SetupError {
    pub fn kinds(&self) -> SetupErrorKinds {
        self.kinds
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.kinds.contains(SetupErrorKinds::EMPTY_BOARD) {
            "empty board"
        } else if self.kinds.contains(SetupErrorKinds::MISSING_KING) {
            "missing king"
        } else if self.kinds.contains(SetupErrorKinds::TOO_MANY_KINGS) {
            "too many kings"
        } else {
            "pawns on backrank"
        })
    }
}

impl Error for SetupError {}

/// A chess board: the piece grid, plus the cursor and pending selection
/// used by interactive front ends.
///
/// The board is the sole owner of its pieces. `Clone` produces a fully
/// independent deep copy, which the legality check uses as a disposable
/// scratch board.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Eq, PartialEq)]
pub struct Board {
    grid: Grid,
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

    /// Creates a board with the standard starting arrangement.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for (file, &role) in BACK_RANK.iter().enumerate() {
            let file = file as i8;
            board.set_piece_at(Square::new(file, 0), role.of(Color::White));
            board.set_piece_at(Square::new(file, 1), Role::Pawn.of(Color::White));
            board.set_piece_at(Square::new(file, 6), Role::Pawn.of(Color::Black));
            board.set_piece_at(Square::new(file, 7), role.of(Color::Black));
        }
        board
    }

    /// Reconstructs a board from an externally supplied grid, e.g. after
    /// deserialization by a persistence layer.
    pub fn from_grid(grid: Grid) -> Result<Board, SetupError> {
        let board = Board {
            grid,
            cursor: Square::new(0, 0),
            selection: Vec::new(),
        };

        let mut kinds = SetupErrorKinds::empty();

        if board.pieces().next().is_none() {
            kinds |= SetupErrorKinds::EMPTY_BOARD;
        }

        for color in Color::ALL {
            match board
                .pieces_of(color)
                .filter(|(_, piece)| piece.role == Role::King)
                .count()
            {
                0 => kinds |= SetupErrorKinds::MISSING_KING,
                1 => (),
                _ => kinds |= SetupErrorKinds::TOO_MANY_KINGS,
            }
        }

        if board
            .pieces()
            .any(|(sq, piece)| piece.role == Role::Pawn && (sq.rank() == 0 || sq.rank() == 7))
        {
            kinds |= SetupErrorKinds::PAWNS_ON_BACKRANK;
        }

        if kinds.is_empty() {
            Ok(board)
        } else {
            Err(SetupError { kinds })
        }
    }

    /// The underlying grid, for snapshotting.
    pub fn grid(&self) -> &Grid {
        &self.grid
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

    /// The square of the given side's king.
    ///
    /// Kings are never captured in this rule set, only immobilized, so a
    /// well-formed game always has both kings on the board.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.role == Role::King)
            .map(|(sq, _)| sq)
    }

    /// Destinations reachable by the piece's raw movement geometry,
    /// ignoring whether the move would leave its own king in check.
    pub fn candidate_moves(&self, from: Square) -> MoveList {
        let mut moves = MoveList::new();
        let Some(piece) = self.piece_at(from) else {
            return moves;
        };
        match piece.role {
            Role::Rook => self.slider_moves(from, piece.color, &ROOK_DIRS, &mut moves),
            Role::Bishop => self.slider_moves(from, piece.color, &BISHOP_DIRS, &mut moves),
            Role::Queen => {
                self.slider_moves(from, piece.color, &ROOK_DIRS, &mut moves);
                self.slider_moves(from, piece.color, &BISHOP_DIRS, &mut moves);
            }
            Role::King => self.stepper_moves(from, piece.color, &KING_STEPS, &mut moves),
            Role::Knight => self.stepper_moves(from, piece.color, &KNIGHT_STEPS, &mut moves),
            Role::Pawn => self.pawn_moves(from, piece, &mut moves),
        }
        moves
    }

    /// Candidate destinations that do not leave the mover's own king in
    /// check.
    pub fn legal_moves(&self, from: Square) -> MoveList {
        let mut moves = self.candidate_moves(from);
        if let Some(piece) = self.piece_at(from) {
            moves.retain(|&mut to| !self.leaves_in_check(from, to, piece.color));
        }
        moves
    }

    /// Tests whether any opposing piece's candidate moves include the
    /// king's square.
    ///
    /// # Panics
    ///
    /// Panics if the given side has no king. A missing king means the
    /// board state is corrupted.
    pub fn in_check(&self, color: Color) -> bool {
        let king = self.king_of(color).expect("king on board");
        self.pieces_of(!color)
            .any(|(from, _)| self.candidate_moves(from).contains(&king))
    }

    /// Tests whether the given side has no legal move at all.
    ///
    /// Stalemate is deliberately not distinguished: a side with no legal
    /// moves is reported the same way whether or not it is in check.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.pieces_of(color)
            .all(|(from, _)| self.legal_moves(from).is_empty())
    }

    /// Validates and applies a move.
    ///
    /// Fails with [`MoveError::IllegalMove`] if `from` is empty or `to`
    /// is not in the piece's legal move set, leaving the board unchanged.
    /// A pawn reaching the last rank is replaced by a promoted queen.
    pub fn play(&mut self, from: Square, to: Square) -> Result<(), MoveError> {
        if self.piece_at(from).is_none() || !self.legal_moves(from).contains(&to) {
            return Err(MoveError::IllegalMove { from, to });
        }
        self.play_unchecked(from, to);
        Ok(())
    }

    /// Applies a move without checking legality.
    ///
    /// The scratch-board check test relies on this to avoid recursing
    /// into legal move enumeration.
    pub fn play_unchecked(&mut self, from: Square, to: Square) {
        if let Some(mut piece) = self.remove_piece_at(from) {
            piece.moved = true;
            if piece.role == Role::Pawn && to.rank() == piece.color.fold(7, 0) {
                piece.role = Role::Queen;
                piece.promoted = true;
            }
            self.set_piece_at(to, piece);
        }
    }

    fn leaves_in_check(&self, from: Square, to: Square, color: Color) -> bool {
        let mut scratch = self.clone();
        scratch.play_unchecked(from, to);
        scratch.in_check(color)
    }

    fn slider_moves(&self, from: Square, color: Color, dirs: &[(i8, i8)], moves: &mut MoveList) {
        for &(df, dr) in dirs {
            let mut sq = from;
            while let Some(next) = sq.offset(df, dr) {
                match self.piece_at(next) {
                    None => moves.push(next),
                    Some(other) => {
                        if other.color != color {
                            moves.push(next);
                        }
                        break;
                    }
                }
                sq = next;
            }
        }
    }

    fn stepper_moves(&self, from: Square, color: Color, steps: &[(i8, i8)], moves: &mut MoveList) {
        for &(df, dr) in steps {
            if let Some(to) = from.offset(df, dr) {
                if self.piece_at(to).map_or(true, |other| other.color != color) {
                    moves.push(to);
                }
            }
        }
    }

    fn pawn_moves(&self, from: Square, piece: Piece, moves: &mut MoveList) {
        let dir = piece.color.fold(1, -1);

        if let Some(ahead) = from.offset(0, dir) {
            if self.piece_at(ahead).is_none() {
                moves.push(ahead);
                if !piece.moved {
                    if let Some(two_ahead) = ahead.offset(0, dir) {
                        if self.piece_at(two_ahead).is_none() {
                            moves.push(two_ahead);
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            if let Some(diag) = from.offset(df, dir) {
                if let Some(other) = self.piece_at(diag) {
                    if other.color != piece.color {
                        moves.push(diag);
                    }
                }
            }
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
