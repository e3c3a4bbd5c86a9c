use crate::board::GameState;
use crate::error::GameError;
use crate::reversi::{self, ReversiGame, ReversiMove, TurnChange};
use crate::types::{Color, Coord, GameSnapshot, Outcome};

/// Picks a landing cell for the side to move. Returns `None` only when
/// `moves` is empty.
pub trait MoveSelector: Send + Sync {
    fn select_move(&mut self, state: &GameState, moves: &[ReversiMove]) -> Option<Coord>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, _state: &GameState, moves: &[ReversiMove]) -> Option<Coord> {
        reversi::landings(moves).first().copied()
    }
}

/// Who controls each color. In player-vs-AI the human plays black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    PlayerVsPlayer,
    #[default]
    PlayerVsAi,
    AiVsAi,
}

impl PlayMode {
    pub fn from_code(code: u8) -> Result<Self, GameError> {
        match code {
            0 => Ok(PlayMode::PlayerVsPlayer),
            1 => Ok(PlayMode::PlayerVsAi),
            2 => Ok(PlayMode::AiVsAi),
            other => Err(GameError::InvalidPlayMode(other)),
        }
    }

    pub fn is_ai(self, color: Color) -> bool {
        match self {
            PlayMode::PlayerVsPlayer => false,
            PlayMode::PlayerVsAi => color == Color::White,
            PlayMode::AiVsAi => true,
        }
    }
}

/// One reversi game as the page sees it: clicks from the human, turns for
/// the agent, and what the last placement changed.
pub struct ReversiSession {
    game: ReversiGame,
    mode: PlayMode,
    is_pass: bool,
    flipped: Vec<Coord>,
    result: Option<Outcome>,
    selector: Box<dyn MoveSelector>,
}

impl ReversiSession {
    pub fn new(mode: PlayMode, selector: Box<dyn MoveSelector>) -> Self {
        Self::with_game(ReversiGame::new(), mode, selector)
    }

    /// Starts from an arbitrary position; it may already be decided. When the
    /// side to move is stuck but its opponent is not, the turn passes at once.
    pub fn with_game(mut game: ReversiGame, mode: PlayMode, selector: Box<dyn MoveSelector>) -> Self {
        let result = game.check_for_victory();
        let is_pass = result.is_none()
            && !reversi::has_legal_move(game.state().board(), game.turn())
            && game.next_turn() == TurnChange::Advanced;
        if is_pass {
            log::debug!("starting position passes to {}", game.turn().name());
        }
        Self {
            game,
            mode,
            is_pass,
            flipped: Vec::new(),
            result,
            selector,
        }
    }

    pub fn game(&self) -> &ReversiGame {
        &self.game
    }

    pub fn is_over(&self) -> bool {
        self.game.state().is_over()
    }

    pub fn is_pass(&self) -> bool {
        self.is_pass
    }

    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    /// Moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<ReversiMove> {
        if self.is_over() {
            Vec::new()
        } else {
            self.game.legal_moves()
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.is_over() && self.mode.is_ai(self.game.turn())
    }

    /// Human placement. Clicks on cells without a move, during the agent's
    /// turn, or after the game ended are ignored and return `false`.
    pub fn click(&mut self, at: Coord) -> bool {
        if self.is_over() || self.is_ai_turn() {
            return false;
        }
        self.place(at)
    }

    /// Lets the selector play for the side to move when that side is
    /// agent-controlled. Returns the cell played.
    pub fn play_ai_turn(&mut self) -> Option<Coord> {
        if !self.is_ai_turn() {
            return None;
        }

        let moves = self.game.legal_moves();
        let at = self.selector.select_move(self.game.state(), &moves)?;
        if !moves.iter().any(|mv| mv.landing == at) {
            log::warn!("selector picked {at:?}, which has no legal move");
            return None;
        }

        log::debug!("{} plays {at:?}", self.game.turn().name());
        self.place(at).then_some(at)
    }

    pub fn reset(&mut self) {
        self.game = ReversiGame::new();
        self.is_pass = false;
        self.flipped.clear();
        self.result = None;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let board = self.game.state().board();
        GameSnapshot {
            board: board.to_array().to_vec(),
            current_player: self.game.turn().code(),
            black_count: board.count(Color::Black),
            white_count: board.count(Color::White),
            is_game_over: self.is_over(),
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
            result: self.result.map(Outcome::message),
        }
    }

    fn place(&mut self, at: Coord) -> bool {
        let flipped = reversi::captures_at(&self.game.legal_moves(), at);
        if self.game.apply_all_moves_to(at) == 0 {
            return false;
        }

        self.flipped = flipped;
        self.is_pass = self.game.next_turn() == TurnChange::Passed;
        self.result = self.game.check_for_victory();
        true
    }
}
