use checkers_reversi::ai::HeuristicAgent;
use checkers_reversi::board::Board;
use checkers_reversi::checkers::{CheckersGame, CheckersMove};
use checkers_reversi::config::AgentConfig;
use checkers_reversi::game::{FirstLegalMoveSelector, PlayMode, ReversiSession};
use checkers_reversi::reversi::{self, ReversiGame};
use checkers_reversi::types::{BOARD_SIZE, Color, Coord, Piece, Rank};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEEDS: [u64; 6] = [1, 2, 3, 17, 99, 2024];

fn seeded_agent(seed: u64) -> HeuristicAgent {
    HeuristicAgent::new(AgentConfig {
        seed: Some(seed),
        ..AgentConfig::default()
    })
    .expect("default config is valid")
}

#[test]
fn black_man_in_the_opening_only_slides_forward() {
    let game = CheckersGame::new();
    let moves = game.legal_moves(Piece::man(Color::Black), Coord::new(3, 4));

    assert_eq!(
        moves,
        vec![
            CheckersMove::Slide { to: Coord::new(2, 5) },
            CheckersMove::Slide { to: Coord::new(4, 5) },
        ]
    );
}

#[test]
fn reversi_opening_offers_four_single_flips() {
    let game = ReversiGame::new();
    let moves = game.legal_moves();

    assert_eq!(moves.len(), 4);
    assert!(moves.iter().all(|mv| mv.captured.len() == 1));
    assert_eq!(
        reversi::landings(&moves),
        vec![
            Coord::new(4, 2),
            Coord::new(5, 3),
            Coord::new(2, 4),
            Coord::new(3, 5),
        ]
    );
}

#[test]
fn random_reversi_playouts_keep_the_placement_rules() {
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session =
            ReversiSession::new(PlayMode::PlayerVsPlayer, Box::new(FirstLegalMoveSelector));
        let mut placements = 0;

        while !session.is_over() {
            let landings = reversi::landings(&session.legal_moves());
            assert!(!landings.is_empty(), "seed {seed}: running game without moves");
            let at = landings[rng.random_range(0..landings.len())];

            let mover = session.game().turn();
            let before = session.snapshot();
            assert_eq!(session.game().piece(at), None, "seed {seed}: landing on {at:?}");

            assert!(session.click(at));
            let after = session.snapshot();
            placements += 1;

            assert_eq!(
                after.black_count as u32 + after.white_count as u32,
                before.black_count as u32 + before.white_count as u32 + 1
            );
            assert!(!after.flipped.is_empty());
            for &cell in after.flipped.iter().chain([at].iter()) {
                assert_eq!(session.game().piece(cell), Some(Piece::man(mover)));
            }

            if !after.is_game_over {
                let expected = if after.is_pass { mover } else { mover.opponent() };
                assert_eq!(session.game().turn(), expected, "seed {seed}");
            }
        }

        assert!(placements <= BOARD_SIZE * BOARD_SIZE - 4);
        assert!(session.result().is_some());
    }
}

#[test]
fn agents_play_reversi_to_a_result() {
    for seed in SEEDS {
        let mut session = ReversiSession::new(PlayMode::AiVsAi, Box::new(seeded_agent(seed)));

        while session.play_ai_turn().is_some() {}

        let state = session.snapshot();
        assert!(state.is_game_over, "seed {seed}: agent stopped early");
        assert!(state.result.is_some());
        assert!(state.black_count as usize + state.white_count as usize <= BOARD_SIZE * BOARD_SIZE);
    }
}

#[test]
fn random_checkers_playouts_keep_the_move_rules() {
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = CheckersGame::standard();

        for _ in 0..300 {
            let mover = game.turn();
            let moves = game.all_legal_moves(mover);
            if game.state().is_over() || moves.is_empty() {
                break;
            }

            let (from, mv) = &moves[rng.random_range(0..moves.len())];
            let to = mv.destination().expect("generated moves end somewhere");
            let piece = game.piece(*from).expect("move origin holds a piece");
            let opponent_before = game.piece_count(mover.opponent());

            assert_eq!(game.piece(to), None, "seed {seed}: landing on {to:?}");
            assert!(game.try_move(*from, to));

            let captured = game.snapshot().flipped;
            assert_eq!(game.piece(*from), None);
            for cell in &captured {
                assert_eq!(game.piece(*cell), None, "seed {seed}: {cell:?} survived a jump");
            }
            assert_eq!(
                game.piece_count(mover.opponent()) as usize,
                opponent_before as usize - captured.len()
            );

            let landed = game.piece(to).expect("mover stands on the destination");
            assert_eq!(landed.color, mover);
            let far_row = match mover {
                Color::Black => BOARD_SIZE as u8 - 1,
                Color::White => 0,
            };
            if piece.rank == Rank::King || to.y == far_row {
                assert_eq!(landed.rank, Rank::King);
            } else {
                assert_eq!(landed.rank, Rank::Man);
            }

            if !game.state().is_over() {
                assert_eq!(game.turn(), mover.opponent());
            }
        }
    }
}

#[test]
fn capturing_the_last_piece_ends_checkers() {
    let board = Board::parse(
        "
        ........
        ........
        ..b.....
        ...w....
        ........
        ........
        ........
        ........
        ",
    )
    .unwrap();
    let mut game = CheckersGame::with_board(board, Color::White);

    assert!(game.try_move(Coord::new(3, 3), Coord::new(1, 1)));

    let state = game.snapshot();
    assert!(state.is_game_over);
    assert_eq!(state.result, Some("white wins"));
    assert_eq!(state.flipped, vec![Coord::new(2, 2)]);
    assert!(!game.try_move(Coord::new(1, 1), Coord::new(0, 0)));
}
