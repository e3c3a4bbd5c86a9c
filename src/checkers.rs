use serde::Serialize;

use crate::board::{Board, GameState};
use crate::types::{BOARD_SIZE, Color, Coord, GameSnapshot, Outcome, Piece, Rank};

const BLACK_MAN_DIRECTIONS: [(i8, i8); 2] = [(-1, 1), (1, 1)];
const WHITE_MAN_DIRECTIONS: [(i8, i8); 2] = [(-1, -1), (1, -1)];
const KING_DIRECTIONS: [(i8, i8); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];

/// A checkers move for a single piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CheckersMove {
    /// One diagonal step onto an empty cell.
    Slide { to: Coord },
    /// One or more chained captures; `captures[i]` is jumped on the way to `landings[i]`.
    Jump {
        landings: Vec<Coord>,
        captures: Vec<Coord>,
    },
}

impl CheckersMove {
    /// Cell the piece ends on; `None` for a jump without landings.
    pub fn destination(&self) -> Option<Coord> {
        match self {
            CheckersMove::Slide { to } => Some(*to),
            CheckersMove::Jump { landings, .. } => landings.last().copied(),
        }
    }

    pub fn captures(&self) -> &[Coord] {
        match self {
            CheckersMove::Slide { .. } => &[],
            CheckersMove::Jump { captures, .. } => captures,
        }
    }
}

/// Diagonals a piece may slide or jump along. Black men head for row 7,
/// white men for row 0.
fn directions(piece: Piece) -> &'static [(i8, i8)] {
    match (piece.rank, piece.color) {
        (Rank::King, _) => &KING_DIRECTIONS,
        (Rank::Man, Color::Black) => &BLACK_MAN_DIRECTIONS,
        (Rank::Man, Color::White) => &WHITE_MAN_DIRECTIONS,
    }
}

fn promotion_row(color: Color) -> u8 {
    match color {
        Color::Black => BOARD_SIZE as u8 - 1,
        Color::White => 0,
    }
}

/// Lists every slide and jump available to `piece` standing on `from`.
///
/// The piece is taken as given; the board cell at `from` is not consulted.
/// Partial jump chains are returned as moves in their own right, and capturing
/// is never forced.
pub fn legal_moves(board: &Board, piece: Piece, from: Coord) -> Vec<CheckersMove> {
    let mut moves = Vec::new();

    for &(dx, dy) in directions(piece) {
        if let Some(to) = from.offset(dx, dy)
            && board.is_empty_at(to)
        {
            moves.push(CheckersMove::Slide { to });
        }
    }

    let mut chain = JumpChain::default();
    collect_jumps(board, piece, from, &mut chain, &mut moves);

    moves
}

#[derive(Debug, Default)]
struct JumpChain {
    landings: Vec<Coord>,
    captures: Vec<Coord>,
}

impl JumpChain {
    fn to_move(&self) -> CheckersMove {
        CheckersMove::Jump {
            landings: self.landings.clone(),
            captures: self.captures.clone(),
        }
    }
}

fn collect_jumps(
    board: &Board,
    piece: Piece,
    at: Coord,
    chain: &mut JumpChain,
    moves: &mut Vec<CheckersMove>,
) {
    for &(dx, dy) in directions(piece) {
        let (Some(capture), Some(landing)) = (at.offset(dx, dy), at.offset(2 * dx, 2 * dy)) else {
            continue;
        };
        if !board.is_empty_at(landing) {
            continue;
        }
        match board.piece(capture) {
            Some(victim) if victim.color != piece.color => {}
            _ => continue,
        }
        // Each piece is jumped at most once, and a revisited landing would loop forever.
        if chain.captures.contains(&capture) || chain.landings.contains(&landing) {
            continue;
        }

        chain.captures.push(capture);
        chain.landings.push(landing);
        moves.push(chain.to_move());

        collect_jumps(board, piece, landing, chain, moves);

        chain.captures.pop();
        chain.landings.pop();
    }
}

/// Commits `mv` for the piece on `from` and promotes it if it reached its far row.
/// Returns `false` and leaves the board alone when `from` is empty or the move
/// has nowhere to end.
pub fn apply_move(board: &mut Board, from: Coord, mv: &CheckersMove) -> bool {
    let Some(piece) = board.piece(from) else {
        log::warn!("ignoring checkers move from empty cell {from:?}");
        return false;
    };
    let Some(to) = mv.destination() else {
        log::warn!("ignoring jump without landings from {from:?}");
        return false;
    };

    for &capture in mv.captures() {
        board.set_piece(capture, None);
    }

    board.set_piece(from, None);
    board.set_piece(to, Some(promote(piece, to)));
    true
}

fn promote(piece: Piece, at: Coord) -> Piece {
    if !piece.is_king() && at.y == promotion_row(piece.color) {
        Piece::king(piece.color)
    } else {
        piece
    }
}

/// A checkers game: board, turn and the rules that move between them.
#[derive(Debug, Clone, Default)]
pub struct CheckersGame {
    state: GameState,
    flipped: Vec<Coord>,
    result: Option<Outcome>,
}

impl CheckersGame {
    /// Starts from the shared center opening.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the full twelve-a-side layout.
    pub fn standard() -> Self {
        Self::with_board(Board::standard_checkers(), Color::Black)
    }

    pub fn with_board(board: Board, turn: Color) -> Self {
        Self {
            state: GameState::with_board(board, turn),
            flipped: Vec::new(),
            result: None,
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

    pub fn legal_moves(&self, piece: Piece, from: Coord) -> Vec<CheckersMove> {
        legal_moves(self.state.board(), piece, from)
    }

    /// Legal moves for whatever stands on `from`; empty for an empty cell.
    pub fn legal_moves_at(&self, from: Coord) -> Vec<CheckersMove> {
        match self.state.piece(from) {
            Some(piece) => self.legal_moves(piece, from),
            None => Vec::new(),
        }
    }

    /// Every `(origin, move)` pair available to `color`.
    pub fn all_legal_moves(&self, color: Color) -> Vec<(Coord, CheckersMove)> {
        let board = self.state.board();
        board
            .pieces(color)
            .flat_map(|(from, piece)| {
                legal_moves(board, piece, from)
                    .into_iter()
                    .map(move |mv| (from, mv))
            })
            .collect()
    }

    /// Applies `mv` and records its captures for the next snapshot.
    /// Returns `false` when the move could not be applied.
    pub fn apply_move(&mut self, from: Coord, mv: &CheckersMove) -> bool {
        if !apply_move(self.state.board_mut(), from, mv) {
            return false;
        }
        self.flipped = mv.captures().to_vec();
        true
    }

    /// Moves the active player's piece from `from` to `to` if some legal move
    /// ends there, preferring the one with the most captures. Finishes the
    /// turn: victory check, then turn change while the game continues.
    /// Returns `false` and leaves the game untouched when nothing matches.
    pub fn try_move(&mut self, from: Coord, to: Coord) -> bool {
        if self.state.is_over() {
            return false;
        }
        match self.state.piece(from) {
            Some(piece) if piece.color == self.state.turn() => {}
            _ => return false,
        }

        let chosen = self
            .legal_moves_at(from)
            .into_iter()
            .filter(|mv| mv.destination() == Some(to))
            .fold(None::<CheckersMove>, |best, mv| match best {
                Some(best) if best.captures().len() >= mv.captures().len() => Some(best),
                _ => Some(mv),
            });
        let Some(mv) = chosen else {
            return false;
        };

        if !self.apply_move(from, &mv) {
            return false;
        }
        if self.check_for_victory().is_none() {
            self.next_turn();
        }
        true
    }

    pub fn next_turn(&mut self) {
        let next = self.state.turn().opponent();
        self.state.set_turn(next);
    }

    /// A side with no pieces left loses. Latches `over` on a result.
    pub fn check_for_victory(&mut self) -> Option<Outcome> {
        let outcome = if self.piece_count(Color::White) == 0 {
            Outcome::Winner(Color::Black)
        } else if self.piece_count(Color::Black) == 0 {
            Outcome::Winner(Color::White)
        } else {
            return None;
        };

        if !self.state.is_over() {
            log::debug!("checkers game over: {}", outcome.message());
        }
        self.state.set_over(true);
        self.result = Some(outcome);
        Some(outcome)
    }

    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let board = self.state.board();
        GameSnapshot {
            board: board.to_array().to_vec(),
            current_player: self.state.turn().code(),
            black_count: board.count(Color::Black),
            white_count: board.count(Color::White),
            is_game_over: self.state.is_over(),
            is_pass: false,
            flipped: self.flipped.clone(),
            result: self.result.map(Outcome::message),
        }
    }
}
