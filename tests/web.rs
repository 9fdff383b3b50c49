#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Object, Reflect};
use reversi_engine::bindings::{Opponent, ReversiGame};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn snapshot_of_new_game() {
    let game = ReversiGame::new(0);
    let snapshot = game.snapshot().unwrap();

    assert_eq!(get(&snapshot, "current_player").as_f64(), Some(1.0));
    assert_eq!(Array::from(&get(&snapshot, "board")).length(), 64);
    assert_eq!(Array::from(&get(&snapshot, "legal_moves")).length(), 4);
    assert_eq!(get(&snapshot, "is_game_over").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn play_accepts_move_objects() {
    let mut game = ReversiGame::new(0);
    let input = Object::new();
    Reflect::set(&input, &"kind".into(), &"place".into()).unwrap();
    Reflect::set(&input, &"row".into(), &JsValue::from(4)).unwrap();
    Reflect::set(&input, &"column".into(), &JsValue::from(2)).unwrap();

    assert_eq!(game.play(input.into()).unwrap(), "5C");
    assert_eq!(game.ai_move().unwrap().len(), 2);
}

#[wasm_bindgen_test]
fn errors_become_strings() {
    let mut game = ReversiGame::new(0);

    let err = game.place(0, 0).unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("illegal move at 1A"));

    let err = game.pass().unwrap_err();
    assert!(err.as_string().unwrap().contains("pass is not allowed"));
}

#[wasm_bindgen_test]
fn random_opponent_moves_from_seed() {
    let mut game = ReversiGame::with_opponent(Opponent::Random, 0, 3);

    assert_eq!(game.ai_move().unwrap().len(), 2);
    assert_eq!(get(&game.snapshot().unwrap(), "empty_count").as_f64(), Some(59.0));
}
