use serde::Serialize;

use crate::error::GameError;

pub const BOARD_SIZE: usize = 8;

/// Side to move. Black always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Wire code used in snapshots: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Color::Black => 1,
            Color::White => 2,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, GameError> {
        match code {
            1 => Ok(Color::Black),
            2 => Ok(Color::White),
            other => Err(GameError::InvalidColor(other)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Man,
    King,
}

/// A checker or disk. Reversi disks are always men.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Self {
            color,
            rank: Rank::Man,
        }
    }

    pub const fn king(color: Color) -> Self {
        Self {
            color,
            rank: Rank::King,
        }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    /// Converts to the snapshot cell code: 1/2 for men, 3/4 for kings.
    pub fn code(self) -> u8 {
        match self.rank {
            Rank::Man => self.color.code(),
            Rank::King => self.color.code() + 2,
        }
    }
}

/// A board cell, `x` is the column and `y` the row (row 0 on top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Bounds-checked conversion for coordinates arriving from outside the engine.
    pub fn try_new(x: i32, y: i32) -> Result<Self, GameError> {
        if in_bounds(x, y) {
            Ok(Self::new(x as u8, y as u8))
        } else {
            Err(GameError::OutOfBounds { x, y })
        }
    }

    /// Steps by `(dx, dy)`; `None` when the result leaves the board.
    pub fn offset(self, dx: i8, dy: i8) -> Option<Coord> {
        let x = self.x as i32 + dx as i32;
        let y = self.y as i32 + dy as i32;
        in_bounds(x, y).then(|| Coord::new(x as u8, y as u8))
    }

    /// Row-major index, 0..=63.
    pub fn index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }
}

fn in_bounds(x: i32, y: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y)
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Color),
    Draw,
}

impl Outcome {
    /// Decides a game on piece counts.
    pub fn from_counts(black: u8, white: u8) -> Self {
        if black > white {
            Outcome::Winner(Color::Black)
        } else if white > black {
            Outcome::Winner(Color::White)
        } else {
            Outcome::Draw
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::Winner(Color::Black) => "black wins",
            Outcome::Winner(Color::White) => "white wins",
            Outcome::Draw => "draw",
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Row-major cell codes: 0=empty, 1=black, 2=white, 3=black king, 4=white king.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous turn change skipped a player without moves.
    /// - Always `false` for checkers.
    pub is_pass: bool,
    /// Cells flipped or captured by the previous move.
    pub flipped: Vec<Coord>,
    /// `"black wins"`, `"white wins"`, `"draw"`, or absent while the game runs.
    pub result: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_stays_on_board() {
        let corner = Coord::new(0, 0);

        assert_eq!(corner.offset(1, 1), Some(Coord::new(1, 1)));
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(Coord::new(7, 7).offset(0, 1), None);
    }

    #[test]
    fn try_new_rejects_off_board_coordinates() {
        assert_eq!(Coord::try_new(3, 4).unwrap(), Coord::new(3, 4));

        let err = Coord::try_new(8, 0).unwrap_err();
        assert_eq!(err.to_string(), "coordinate (8, 0) is off the board");
        assert!(Coord::try_new(0, -1).is_err());
    }

    #[test]
    fn color_codes_round_trip() {
        assert_eq!(Color::from_code(Color::White.code()).unwrap(), Color::White);
        assert!(Color::from_code(0).is_err());
    }

    #[test]
    fn piece_codes_distinguish_kings() {
        assert_eq!(Piece::man(Color::Black).code(), 1);
        assert_eq!(Piece::man(Color::White).code(), 2);
        assert_eq!(Piece::king(Color::Black).code(), 3);
        assert_eq!(Piece::king(Color::White).code(), 4);
    }

    #[test]
    fn outcome_messages_follow_counts() {
        assert_eq!(Outcome::from_counts(10, 3).message(), "black wins");
        assert_eq!(Outcome::from_counts(3, 10).message(), "white wins");
        assert_eq!(Outcome::from_counts(5, 5).message(), "draw");
    }
}
