use core::fmt;

use std::{error::Error, str::FromStr};

/// A square of the 8×8 grid, packed as `file | rank << 3`.
///
/// Both coordinates are in `0..8`. Constructing a square from untrusted
/// coordinates goes through [`Square::from_coords`]; indexing with
/// out-of-range coordinates is a programming error, caught by a debug
/// assertion in [`Square::new`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from zero-based file and rank coordinates.
    ///
    /// # Panics
    ///
    /// Debug-asserts that both coordinates are in `0..8`.
    #[inline]
    pub fn new(file: i8, rank: i8) -> Square {
        debug_assert!(0 <= file && file < 8);
        debug_assert!(0 <= rank && rank < 8);
        Square((file | (rank << 3)) as u8)
    }

    /// Creates a square if both coordinates are in `0..8`.
    #[inline]
    pub fn from_coords(file: i8, rank: i8) -> Option<Square> {
        if 0 <= file && file < 8 && 0 <= rank && rank < 8 {
            Some(Square::new(file, rank))
        } else {
            None
        }
    }

    /// Creates a square from its row-major index.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn file(self) -> i8 {
        (self.0 & 7) as i8
    }

    #[inline]
    pub const fn rank(self) -> i8 {
        (self.0 >> 3) as i8
    }

    /// The square displaced by the given file and rank deltas, if still
    /// on the board.
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        Square::from_coords(self.file() + df, self.rank() + dr)
    }

    /// All squares in row-major order (`a1`, `b1`, ..., `h8`).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file() as u8) as char,
            (b'1' + self.rank() as u8) as char
        )
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string().to_uppercase())
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => Ok(Square::new(
                file as i8 - 'a' as i8,
                rank as i8 - '1' as i8,
            )),
            _ => Err(ParseSquareError),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Square, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("square index in 0..64")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Square, E>
            where
                E: serde::de::Error,
            {
                u8::try_from(value)
                    .ok()
                    .and_then(Square::from_index)
                    .ok_or_else(|| E::custom("square index out of range"))
            }
        }

        deserializer.deserialize_u8(SquareVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        for file in 0..8 {
            for rank in 0..8 {
                let square = Square::new(file, rank);
                assert_eq!(square.file(), file);
                assert_eq!(square.rank(), rank);
            }
        }
    }

    #[test]
    fn test_offset() {
        assert_eq!(Square::new(0, 0).offset(1, 1), Some(Square::new(1, 1)));
        assert_eq!(Square::new(0, 0).offset(-1, 0), None);
        assert_eq!(Square::new(7, 7).offset(0, 1), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("a1".parse::<Square>().unwrap(), Square::new(0, 0));
        assert_eq!("h8".parse::<Square>().unwrap(), Square::new(7, 7));
        assert!("i9".parse::<Square>().is_err());
        assert!("a11".parse::<Square>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Square::new(4, 1).to_string(), "e2");
    }
}
