//! A library for chess and draughts board state, move generation and
//! rules.
//!
//! The core is a pure state-and-rules API: no rendering, input handling
//! or file I/O. A front end selects a piece, asks the board for its
//! legal destinations, and applies the chosen move; every rule violation
//! is detected before any mutation.
//!
//! # Examples
//!
//! Play moves on a chess board:
//!
//! ```
//! use tabula::{Board, Color, Square};
//!
//! let mut board = Board::new();
//! board.play(Square::new(4, 1), Square::new(4, 3))?; // e2-e4
//! assert!(!board.in_check(Color::Black));
//! # Ok::<_, tabula::MoveError>(())
//! ```
//!
//! Enumerate legal destinations for a selected piece:
//!
//! ```
//! use tabula::Board;
//!
//! let board = Board::new();
//! let moves = board.legal_moves("b1".parse()?);
//! assert_eq!(moves.len(), 2);
//! # Ok::<_, tabula::ParseSquareError>(())
//! ```
//!
//! Play a jump chain in the draughts variant:
//!
//! ```
//! use tabula::draughts;
//!
//! let mut board = draughts::Board::new();
//! board.perform_moves("b3".parse()?, &["a4".parse()?])?;
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   boards, pieces and sessions, so a persistence layer can snapshot
//!   and restore a game.

#![warn(missing_debug_implementations)]

mod color;
mod errors;
mod role;
mod square;
mod types;

pub mod board;
pub mod draughts;
pub mod game;

pub use board::{Board, Grid, SetupError, SetupErrorKinds};
pub use color::{ByColor, Color, ParseColorError};
pub use errors::MoveError;
pub use game::Game;
pub use role::Role;
pub use square::{ParseSquareError, Square};
pub use types::{MoveList, Piece};
