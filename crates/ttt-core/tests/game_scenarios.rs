// crates/ttt-core/tests/game_scenarios.rs
use ttt_core::{GameState, Marker, Move, MoveError, Status};

/// Scripted games: `#name:` starts a scenario, `#expect:` is the final
/// status, every other non-empty line is a move sent by whoever is current.
const SCENARIOS: &str = "\
#name: first player completes column 1
#expect: X
A1
A2
B1
B2
C1

#name: second player completes the anti-diagonal
#expect: O
A1
A3
A2
B2
C3
C1

#name: full board draw
#expect: draw
A1
A2
A3
B2
B1
B3
C2
C1
C3

#name: rejections in between do not cost the turn
#expect: X
A1
A1
D1
B0
Z
A2
B1
B2
C1
";

struct Scenario {
    name: String,
    expect: String,
    moves: Vec<String>,
}

fn load_scenarios() -> Vec<Scenario> {
    let mut scenarios: Vec<Scenario> = Vec::new();
    for line in SCENARIOS.lines() {
        let line = line.trim();
        if let Some(name) = line.strip_prefix("#name:") {
            scenarios.push(Scenario {
                name: name.trim().to_string(),
                expect: String::new(),
                moves: Vec::new(),
            });
        } else if let Some(expect) = line.strip_prefix("#expect:") {
            scenarios.last_mut().unwrap().expect = expect.trim().to_string();
        } else if !line.is_empty() {
            scenarios.last_mut().unwrap().moves.push(line.to_string());
        }
    }
    scenarios
}

#[test]
fn scripted_games_reach_expected_status() {
    let scenarios = load_scenarios();
    assert_eq!(scenarios.len(), 4);

    for scenario in scenarios {
        let mut game = GameState::new();
        let mut rejected = 0;

        for raw in &scenario.moves {
            let turn_before = game.current();
            match raw.parse::<Move>().and_then(|mv| game.play(mv)) {
                Ok(_) => {}
                Err(_) => {
                    rejected += 1;
                    assert_eq!(game.current(), turn_before, "{}: turn moved on reject", scenario.name);
                }
            }
        }

        let expected = match scenario.expect.as_str() {
            "X" => Status::Won(Marker::X),
            "O" => Status::Won(Marker::O),
            "draw" => Status::Draw,
            other => panic!("unknown expectation {other}"),
        };
        assert_eq!(game.status(), expected, "scenario: {}", scenario.name);

        if scenario.name.starts_with("rejections") {
            assert_eq!(rejected, 4);
        }
    }
}

#[test]
fn every_rejection_kind_reprompts_same_player() {
    let mut game = GameState::new();
    game.play("B2".parse().unwrap()).unwrap();

    let board = game.board().clone();
    for (input, err) in [
        ("B", MoveError::Length),
        ("B22", MoveError::Length),
        ("D2", MoveError::RowOutOfBounds),
        ("b2", MoveError::RowOutOfBounds),
        ("B9", MoveError::ColumnOutOfBounds),
    ] {
        assert_eq!(input.parse::<Move>(), Err(err));
    }
    assert_eq!(game.play("B2".parse().unwrap()), Err(MoveError::Occupied));

    assert_eq!(game.board(), &board);
    assert_eq!(game.current(), Marker::O);
}
