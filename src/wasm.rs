//! JS-facing classes. Coordinates arriving from the page are bounds-checked
//! here; everything past this layer trusts its inputs.

use wasm_bindgen::prelude::*;

use crate::ai::HeuristicAgent;
use crate::board::Board;
use crate::checkers::CheckersGame;
use crate::config::AgentConfig;
use crate::error::GameError;
use crate::game::{PlayMode, ReversiSession};
use crate::reversi::{self, ReversiGame};
use crate::types::{Color, Coord};

fn to_js_error(err: GameError) -> JsValue {
    JsError::new(&err.to_string()).into()
}

fn coord(x: i32, y: i32) -> Result<Coord, JsValue> {
    Coord::try_new(x, y).map_err(to_js_error)
}

fn color(code: u8) -> Result<Color, JsValue> {
    Color::from_code(code).map_err(to_js_error)
}

fn agent_from_js(config: JsValue) -> Result<HeuristicAgent, JsValue> {
    let config: AgentConfig = if config.is_undefined() || config.is_null() {
        AgentConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    HeuristicAgent::new(config).map_err(|err| to_js_error(err.into()))
}

#[wasm_bindgen(js_name = Checkers)]
pub struct CheckersHandle {
    game: CheckersGame,
    standard: bool,
}

#[wasm_bindgen(js_class = Checkers)]
impl CheckersHandle {
    /// `standard` selects the twelve-a-side layout instead of the center opening.
    #[wasm_bindgen(constructor)]
    pub fn new(standard: bool) -> CheckersHandle {
        Self {
            game: Self::fresh(standard),
            standard,
        }
    }

    #[wasm_bindgen(js_name = fromDiagram)]
    pub fn from_diagram(diagram: &str, turn: u8) -> Result<CheckersHandle, JsValue> {
        let board = Board::parse(diagram).map_err(to_js_error)?;
        Ok(Self {
            game: CheckersGame::with_board(board, color(turn)?),
            standard: false,
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.game.snapshot())?)
    }

    /// Moves for the piece standing on `(x, y)`; empty for an empty cell.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self, x: i32, y: i32) -> Result<JsValue, JsValue> {
        let moves = self.game.legal_moves_at(coord(x, y)?);
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// Drops the active player's piece from one cell onto another. Returns
    /// `false` when no legal move matches.
    #[wasm_bindgen(js_name = movePiece)]
    pub fn move_piece(&mut self, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> Result<bool, JsValue> {
        let from = coord(from_x, from_y)?;
        let to = coord(to_x, to_y)?;
        Ok(self.game.try_move(from, to))
    }

    #[wasm_bindgen(js_name = pieceCount)]
    pub fn piece_count(&self, color_code: u8) -> Result<u8, JsValue> {
        Ok(self.game.piece_count(color(color_code)?))
    }

    pub fn reset(&mut self) {
        self.game = Self::fresh(self.standard);
    }

    fn fresh(standard: bool) -> CheckersGame {
        if standard {
            CheckersGame::standard()
        } else {
            CheckersGame::new()
        }
    }
}

#[wasm_bindgen(js_name = Reversi)]
pub struct ReversiHandle {
    session: ReversiSession,
}

#[wasm_bindgen(js_class = Reversi)]
impl ReversiHandle {
    /// `mode`: 0 player vs player, 1 player (black) vs AI, 2 AI vs AI.
    /// `config` is an optional agent configuration object.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: u8, config: JsValue) -> Result<ReversiHandle, JsValue> {
        let mode = PlayMode::from_code(mode).map_err(to_js_error)?;
        let agent = agent_from_js(config)?;
        Ok(Self {
            session: ReversiSession::new(mode, Box::new(agent)),
        })
    }

    #[wasm_bindgen(js_name = fromDiagram)]
    pub fn from_diagram(diagram: &str, turn: u8, mode: u8, config: JsValue) -> Result<ReversiHandle, JsValue> {
        let board = Board::parse(diagram).map_err(to_js_error)?;
        let mode = PlayMode::from_code(mode).map_err(to_js_error)?;
        let game = ReversiGame::with_board(board, color(turn)?);
        Ok(Self {
            session: ReversiSession::with_game(game, mode, Box::new(agent_from_js(config)?)),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.snapshot())?)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.legal_moves())?)
    }

    /// Disks a click on `(x, y)` would flip, for hover highlighting.
    #[wasm_bindgen(js_name = capturesAt)]
    pub fn captures_at(&self, x: i32, y: i32) -> Result<JsValue, JsValue> {
        let at = coord(x, y)?;
        let captures = reversi::captures_at(&self.session.legal_moves(), at);
        Ok(serde_wasm_bindgen::to_value(&captures)?)
    }

    pub fn click(&mut self, x: i32, y: i32) -> Result<bool, JsValue> {
        Ok(self.session.click(coord(x, y)?))
    }

    #[wasm_bindgen(js_name = isAiTurn)]
    pub fn is_ai_turn(&self) -> bool {
        self.session.is_ai_turn()
    }

    /// Plays the agent's move; resolves to the cell played or `undefined`.
    #[wasm_bindgen(js_name = playAiTurn)]
    pub fn play_ai_turn(&mut self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.play_ai_turn())?)
    }

    #[wasm_bindgen(js_name = pieceCount)]
    pub fn piece_count(&self, color_code: u8) -> Result<u8, JsValue> {
        Ok(self.session.game().piece_count(color(color_code)?))
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }
}
