use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, GameState};
use crate::config::AgentConfig;
use crate::error::ConfigError;
use crate::game::MoveSelector;
use crate::reversi::{self, ReversiMove};
use crate::types::{BOARD_SIZE, Coord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SquareKind {
    Corner,
    /// Touches its corner, including diagonally.
    CornerAdjacent,
    /// Two steps out from its corner.
    Buffer,
    Open,
}

#[derive(Debug, Clone, Copy)]
struct SquareClass {
    corner: Coord,
    kind: SquareKind,
    /// Even offset from the corner on both axes.
    parity: bool,
}

static SQUARES: Lazy<[[SquareClass; BOARD_SIZE]; BOARD_SIZE]> = Lazy::new(|| {
    let mut table = [[classify(0, 0); BOARD_SIZE]; BOARD_SIZE];
    for (y, row) in table.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = classify(x as u8, y as u8);
        }
    }
    table
});

/// Relates a cell to the corner of its quadrant.
fn classify(x: u8, y: u8) -> SquareClass {
    let half = BOARD_SIZE as u8 / 2;
    let last = BOARD_SIZE as u8 - 1;
    let corner = Coord::new(
        if x < half { 0 } else { last },
        if y < half { 0 } else { last },
    );

    let dx = x.abs_diff(corner.x);
    let dy = y.abs_diff(corner.y);
    let kind = match dx.max(dy) {
        0 => SquareKind::Corner,
        1 => SquareKind::CornerAdjacent,
        2 => SquareKind::Buffer,
        _ => SquareKind::Open,
    };

    SquareClass {
        corner,
        kind,
        parity: dx % 2 == 0 && dy % 2 == 0,
    }
}

/// One-ply positional player for reversi.
///
/// Each candidate cell starts from the number of disks it would flip, then:
/// corners take a fixed high score, cells touching an empty corner are
/// divided down, cells two steps from their corner are multiplied up, and
/// cells on the corner's odd/even lattice get a small bonus. A corner always
/// outranks a non-corner whatever the configured scores. Equal scores are
/// settled by a coin flip against the current pick.
pub struct HeuristicAgent {
    config: AgentConfig,
    rng: StdRng,
}

impl HeuristicAgent {
    pub fn new(config: AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(clock_seed);
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Scores placing on `at` when it would flip `flips` disks.
    pub fn score_cell(&self, board: &Board, at: Coord, flips: usize) -> f32 {
        let class = SQUARES[at.y as usize][at.x as usize];
        let mut score = flips as f32;

        match class.kind {
            SquareKind::Corner => return self.config.corner_score,
            SquareKind::CornerAdjacent if board.is_empty_at(class.corner) => {
                score /= self.config.corner_adjacent_divisor;
            }
            SquareKind::Buffer => score *= self.config.buffer_multiplier,
            SquareKind::CornerAdjacent | SquareKind::Open => {}
        }

        if class.parity {
            score += self.config.parity_bonus;
        }
        score
    }

    /// Picks a landing cell for the side to move, or `None` if it has no move.
    pub fn choose_move(&mut self, state: &GameState) -> Option<Coord> {
        let moves = reversi::legal_moves_for_color(state.board(), state.turn());
        self.pick(state.board(), &moves)
    }

    fn pick(&mut self, board: &Board, moves: &[ReversiMove]) -> Option<Coord> {
        let mut best: Option<(Coord, (bool, f32))> = None;

        for at in reversi::landings(moves) {
            let is_corner = SQUARES[at.y as usize][at.x as usize].kind == SquareKind::Corner;
            let key = (
                is_corner,
                self.score_cell(board, at, reversi::captures_at(moves, at).len()),
            );
            best = match best {
                None => Some((at, key)),
                Some((_, top)) if key > top => Some((at, key)),
                Some((_, top))
                    if key == top && self.rng.random_bool(self.config.swap_probability) =>
                {
                    Some((at, key))
                }
                kept => kept,
            };
        }

        if let Some((at, (_, score))) = best {
            log::debug!("heuristic agent picks {at:?} (score {score})");
        }
        best.map(|(at, _)| at)
    }
}

impl Default for HeuristicAgent {
    fn default() -> Self {
        let config = AgentConfig::default();
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MoveSelector for HeuristicAgent {
    fn select_move(&mut self, state: &GameState, moves: &[ReversiMove]) -> Option<Coord> {
        self.pick(state.board(), moves)
    }
}

fn clock_seed() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Piece};

    fn agent_with(swap_probability: f64) -> HeuristicAgent {
        HeuristicAgent::new(AgentConfig {
            swap_probability,
            seed: Some(7),
            ..AgentConfig::default()
        })
        .expect("valid config")
    }

    #[test]
    fn classify_uses_the_quadrant_corner() {
        let class = classify(6, 1);
        assert_eq!(class.corner, Coord::new(7, 0));
        assert_eq!(class.kind, SquareKind::CornerAdjacent);

        assert_eq!(classify(5, 5).kind, SquareKind::Buffer);
        assert_eq!(classify(3, 4).kind, SquareKind::Open);
        assert_eq!(classify(7, 7).kind, SquareKind::Corner);
    }

    #[test]
    fn corner_scores_are_fixed() {
        let agent = agent_with(0.5);
        let board = Board::empty();

        assert_eq!(agent.score_cell(&board, Coord::new(0, 0), 1), 100.0);
        assert_eq!(agent.score_cell(&board, Coord::new(7, 7), 9), 100.0);
    }

    #[test]
    fn cells_next_to_an_empty_corner_are_penalised() {
        let agent = agent_with(0.5);
        let mut board = Board::empty();

        assert_eq!(agent.score_cell(&board, Coord::new(1, 1), 5), 0.5);

        board.set_piece(Coord::new(0, 0), Some(Piece::man(Color::White)));
        assert_eq!(agent.score_cell(&board, Coord::new(1, 1), 5), 5.0);
    }

    #[test]
    fn buffer_cells_are_boosted_and_parity_adds_a_bonus() {
        let agent = agent_with(0.5);
        let board = Board::empty();

        // (2,2): buffer and even offsets.
        assert_eq!(agent.score_cell(&board, Coord::new(2, 2), 3), 6.5);
        // (2,1): buffer, odd row offset.
        assert_eq!(agent.score_cell(&board, Coord::new(2, 1), 3), 6.0);
        // (3,3): open, odd offsets.
        assert_eq!(agent.score_cell(&board, Coord::new(3, 3), 2), 2.0);
    }

    #[test]
    fn corner_beats_a_bigger_capture() {
        let board = Board::parse(
            "
            .wb.....
            ........
            ........
            ........
            bwwww...
            ........
            ........
            ........
            ",
        )
        .unwrap();
        let state = GameState::with_board(board, Color::Black);

        assert_eq!(agent_with(0.5).choose_move(&state), Some(Coord::new(0, 0)));
    }

    #[test]
    fn corner_wins_even_with_a_low_corner_score() {
        let board = Board::parse(
            "
            .wb.....
            ........
            ........
            ........
            bwwww...
            ........
            ........
            ........
            ",
        )
        .unwrap();
        let state = GameState::with_board(board, Color::Black);
        let mut agent = HeuristicAgent::new(AgentConfig {
            corner_score: 1.0,
            seed: Some(7),
            ..AgentConfig::default()
        })
        .expect("valid config");

        // (5,4) flips four disks and outscores the corner's fixed 1.0.
        assert!(agent.score_cell(state.board(), Coord::new(5, 4), 4) > 1.0);
        assert_eq!(agent.choose_move(&state), Some(Coord::new(0, 0)));
    }

    #[test]
    fn ties_keep_or_swap_according_to_probability() {
        let state = GameState::new();

        // All four opening moves score the same.
        assert_eq!(agent_with(0.0).choose_move(&state), Some(Coord::new(4, 2)));
        assert_eq!(agent_with(1.0).choose_move(&state), Some(Coord::new(3, 5)));

        let landings = reversi::landings(&reversi::legal_moves_for_color(
            state.board(),
            Color::Black,
        ));
        let mut agent = agent_with(0.5);
        for _ in 0..20 {
            let pick = agent.choose_move(&state).expect("opening has moves");
            assert!(landings.contains(&pick));
        }
    }

    #[test]
    fn no_moves_means_no_choice() {
        let state = GameState::with_board(Board::empty(), Color::White);
        assert_eq!(HeuristicAgent::default().choose_move(&state), None);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AgentConfig {
            swap_probability: -0.1,
            ..AgentConfig::default()
        };
        assert!(HeuristicAgent::new(config).is_err());
    }
}
