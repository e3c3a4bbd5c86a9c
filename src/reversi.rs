use serde::Serialize;

use crate::board::{Board, GameState};
use crate::types::{Color, Coord, Outcome, Piece};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Scan order used by the move generator.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpRight,
        Direction::UpLeft,
        Direction::DownRight,
        Direction::DownLeft,
    ];

    /// `(dx, dy)` step; up is toward row 0.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (1, -1),
            Direction::DownLeft => (-1, 1),
            Direction::DownRight => (1, 1),
        }
    }
}

/// One flanking line: placing `color` on `landing` flips `captured`,
/// which run from next to `origin` out toward `landing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReversiMove {
    pub origin: Coord,
    pub color: Color,
    pub direction: Direction,
    pub captured: Vec<Coord>,
    pub landing: Coord,
}

/// Every flanking line available to `color`, one record per origin disk and
/// direction. Several records may share a landing cell.
pub fn legal_moves_for_color(board: &Board, color: Color) -> Vec<ReversiMove> {
    board
        .pieces(color)
        .flat_map(|(origin, _)| {
            Direction::ALL
                .into_iter()
                .filter_map(move |direction| scan(board, origin, color, direction))
        })
        .collect()
}

fn scan(board: &Board, origin: Coord, color: Color, direction: Direction) -> Option<ReversiMove> {
    let (dx, dy) = direction.delta();
    let mut captured = Vec::new();
    let mut at = origin;

    loop {
        at = at.offset(dx, dy)?;
        match board.piece(at) {
            None if captured.is_empty() => return None,
            None => {
                return Some(ReversiMove {
                    origin,
                    color,
                    direction,
                    captured,
                    landing: at,
                });
            }
            Some(piece) if piece.color == color => return None,
            Some(_) => captured.push(at),
        }
    }
}

pub fn has_legal_move(board: &Board, color: Color) -> bool {
    !legal_moves_for_color(board, color).is_empty()
}

/// Distinct landing cells, in row-major order.
pub fn landings(moves: &[ReversiMove]) -> Vec<Coord> {
    let mut cells: Vec<Coord> = moves.iter().map(|mv| mv.landing).collect();
    cells.sort_by_key(|at| at.index());
    cells.dedup();
    cells
}

/// Union of the captures of every record landing on `at`.
pub fn captures_at(moves: &[ReversiMove], at: Coord) -> Vec<Coord> {
    let mut cells: Vec<Coord> = moves
        .iter()
        .filter(|mv| mv.landing == at)
        .flat_map(|mv| mv.captured.iter().copied())
        .collect();
    cells.sort_by_key(|c| c.index());
    cells.dedup();
    cells
}

/// Flips every captured disk and places the mover on the landing cell.
pub fn apply_move(board: &mut Board, mv: &ReversiMove) {
    let disk = Some(Piece::man(mv.color));
    for &capture in &mv.captured {
        board.set_piece(capture, disk);
    }
    board.set_piece(mv.landing, disk);
}

/// Result of handing the turn over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnChange {
    /// The opponent moves next.
    Advanced,
    /// The opponent had no move; the same color moves again.
    Passed,
    /// Neither color can move.
    Stalled,
}

/// A reversi game: board, turn and the rules that move between them.
#[derive(Debug, Clone, Default)]
pub struct ReversiGame {
    state: GameState,
}

impl ReversiGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board(board: Board, turn: Color) -> Self {
        Self {
            state: GameState::with_board(board, turn),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn piece(&self, at: Coord) -> Option<Piece> {
        self.state.piece(at)
    }

    pub fn turn(&self) -> Color {
        self.state.turn()
    }

    pub fn piece_count(&self, color: Color) -> u8 {
        self.state.board().count(color)
    }

    pub fn legal_moves_for_color(&self, color: Color) -> Vec<ReversiMove> {
        legal_moves_for_color(self.state.board(), color)
    }

    pub fn legal_moves(&self) -> Vec<ReversiMove> {
        self.legal_moves_for_color(self.state.turn())
    }

    pub fn apply_move(&mut self, mv: &ReversiMove) {
        apply_move(self.state.board_mut(), mv);
    }

    /// Applies, as one placement, every current-turn record landing on `at`.
    /// Returns how many records were applied; 0 means the click matched
    /// nothing and the board is unchanged.
    pub fn apply_all_moves_to(&mut self, at: Coord) -> usize {
        let moves: Vec<ReversiMove> = self
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.landing == at)
            .collect();
        for mv in &moves {
            self.apply_move(mv);
        }
        moves.len()
    }

    /// Hands the turn to the opponent if it can move, otherwise keeps it.
    pub fn next_turn(&mut self) -> TurnChange {
        let current = self.state.turn();
        let next = current.opponent();
        let board = self.state.board();

        if has_legal_move(board, next) {
            self.state.set_turn(next);
            TurnChange::Advanced
        } else if has_legal_move(board, current) {
            log::debug!("{} has no legal move, {} plays again", next.name(), current.name());
            TurnChange::Passed
        } else {
            TurnChange::Stalled
        }
    }

    /// Decides the game once the board is full or neither side can move.
    /// Latches `over` on a result.
    pub fn check_for_victory(&mut self) -> Option<Outcome> {
        let board = self.state.board();
        let terminal = board.is_full()
            || (!has_legal_move(board, Color::Black) && !has_legal_move(board, Color::White));
        if !terminal {
            return None;
        }

        let outcome = Outcome::from_counts(board.count(Color::Black), board.count(Color::White));
        if !self.state.is_over() {
            log::debug!("reversi game over: {}", outcome.message());
        }
        self.state.set_over(true);
        Some(outcome)
    }
}
