use crate::error::GameError;
use crate::types::{BOARD_SIZE, Color, Coord, Piece};

pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// 8x8 grid of optional pieces, indexed `[y][x]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Creates the shared opening position:
    /// black on (3,3) and (4,4), white on (4,3) and (3,4).
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.set_piece(Coord::new(3, 3), Some(Piece::man(Color::Black)));
        board.set_piece(Coord::new(4, 4), Some(Piece::man(Color::Black)));
        board.set_piece(Coord::new(4, 3), Some(Piece::man(Color::White)));
        board.set_piece(Coord::new(3, 4), Some(Piece::man(Color::White)));
        board
    }

    /// Full checkers setup: twelve men per side on the dark squares,
    /// black on rows 0-2 and white on rows 5-7.
    pub fn standard_checkers() -> Self {
        let mut board = Self::empty();
        for y in 0..BOARD_SIZE as u8 {
            let color = match y {
                0..=2 => Color::Black,
                5..=7 => Color::White,
                _ => continue,
            };
            for x in 0..BOARD_SIZE as u8 {
                if (x + y) % 2 == 1 {
                    board.set_piece(Coord::new(x, y), Some(Piece::man(color)));
                }
            }
        }
        board
    }

    /// Parses an 8-row diagram: `.` empty, `b`/`w` men, `B`/`W` kings.
    /// Whitespace inside a row and blank lines are ignored.
    pub fn parse(diagram: &str) -> Result<Self, GameError> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE {
            return Err(GameError::InvalidDiagram(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(GameError::InvalidDiagram(format!(
                    "row {y} has {} cells, expected {BOARD_SIZE}",
                    row.len()
                )));
            }
            for (x, &symbol) in row.iter().enumerate() {
                let piece = match symbol {
                    '.' => None,
                    'b' => Some(Piece::man(Color::Black)),
                    'w' => Some(Piece::man(Color::White)),
                    'B' => Some(Piece::king(Color::Black)),
                    'W' => Some(Piece::king(Color::White)),
                    other => {
                        return Err(GameError::InvalidDiagram(format!(
                            "unknown cell symbol {other:?} at ({x}, {y})"
                        )));
                    }
                };
                board.cells[y][x] = piece;
            }
        }
        Ok(board)
    }

    pub fn piece(&self, at: Coord) -> Option<Piece> {
        self.cells[at.y as usize][at.x as usize]
    }

    pub fn set_piece(&mut self, at: Coord, value: Option<Piece>) {
        self.cells[at.y as usize][at.x as usize] = value;
    }

    pub fn is_empty_at(&self, at: Coord) -> bool {
        self.piece(at).is_none()
    }

    /// Iterates over every piece of `color` in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(y, row)| {
            row.iter().enumerate().filter_map(move |(x, cell)| match cell {
                Some(piece) if piece.color == color => {
                    Some((Coord::new(x as u8, y as u8), *piece))
                }
                _ => None,
            })
        })
    }

    pub fn count(&self, color: Color) -> u8 {
        self.pieces(color).count() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        self.cells.iter().flatten().filter(|cell| cell.is_none()).count() as u8
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Converts board to `[u8; 64]` using the snapshot cell codes.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut out = [0u8; NUM_SQUARES];
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                out[y * BOARD_SIZE + x] = cell.map_or(0, Piece::code);
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Board plus whose turn it is and whether the game has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Color,
    over: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self::with_board(Board::new(), Color::Black)
    }

    pub fn with_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            over: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn piece(&self, at: Coord) -> Option<Piece> {
        self.board.piece(at)
    }

    pub fn set_piece(&mut self, at: Coord, value: Option<Piece>) {
        self.board.set_piece(at, value);
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Once set, `over` stays set; passing `false` afterwards has no effect.
    pub fn set_over(&mut self, over: bool) {
        self.over |= over;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
