//! Property and scenario tests for the sequencer as a whole

use proptest::prelude::*;
use rstest::rstest;

use crate::mock::{verses, EngineCall, MockEngine};
use crate::{AyahSequencer, PlaybackStatus, ResourceId};

fn loaded(len: usize) -> (AyahSequencer<MockEngine>, MockEngine) {
    let engine = MockEngine::new();
    let mut sequencer = AyahSequencer::new(engine.clone());
    sequencer.load_chapter(verses(len));
    (sequencer, engine)
}

fn confirm_latest(sequencer: &mut AyahSequencer<MockEngine>, engine: &MockEngine) {
    if let Some(id) = engine.last_loaded() {
        engine.confirm_start(id);
    }
    sequencer.pump();
}

fn complete_latest(sequencer: &mut AyahSequencer<MockEngine>, engine: &MockEngine) {
    if let Some(id) = engine.last_loaded() {
        engine.complete(id);
    }
    sequencer.pump();
}

fn first_loaded(engine: &MockEngine) -> Option<ResourceId> {
    engine.calls().into_iter().find_map(|call| match call {
        EngineCall::Load(id, _) => Some(id),
        _ => None,
    })
}

#[test]
fn test_last_verse_completion_goes_idle() {
    let (mut sequencer, engine) = loaded(3);
    sequencer.play(2);
    confirm_latest(&mut sequencer, &engine);

    complete_latest(&mut sequencer, &engine);

    assert_eq!(sequencer.status(), PlaybackStatus::Idle);
    assert_eq!(engine.live_resources(), 0);
}

#[test]
fn test_repeat_one_replays_same_verse() {
    let (mut sequencer, engine) = loaded(3);
    sequencer.play(1);
    confirm_latest(&mut sequencer, &engine);
    sequencer.set_repeat(true);
    let first = engine.last_loaded();

    complete_latest(&mut sequencer, &engine);
    confirm_latest(&mut sequencer, &engine);

    assert_eq!(sequencer.status(), PlaybackStatus::CuedPlaying);
    assert_eq!(sequencer.current_index(), Some(1));
    // Replayed from the beginning on a fresh resource
    assert_ne!(engine.last_loaded(), first);
    assert_eq!(engine.last_loaded_url(), verses(3)[1].audio.clone());
}

#[test]
fn test_completion_advances_to_next_verse() {
    let (mut sequencer, engine) = loaded(3);
    sequencer.play(0);
    confirm_latest(&mut sequencer, &engine);

    complete_latest(&mut sequencer, &engine);
    confirm_latest(&mut sequencer, &engine);

    assert_eq!(sequencer.status(), PlaybackStatus::CuedPlaying);
    assert_eq!(sequencer.current_index(), Some(1));
}

#[test]
fn test_completion_before_silent_verse_pauses() {
    let engine = MockEngine::new();
    let mut sequencer = AyahSequencer::new(engine.clone());
    let mut list = verses(3);
    list[1].audio = None;
    sequencer.load_chapter(list);

    sequencer.play(0);
    confirm_latest(&mut sequencer, &engine);
    let finished = engine.last_loaded();
    complete_latest(&mut sequencer, &engine);

    assert!(!sequencer.is_playing());
    assert_eq!(sequencer.status(), PlaybackStatus::CuedPaused);
    assert_eq!(sequencer.current_index(), Some(0));
    assert_eq!(engine.live_resources(), 0);

    // Toggle replays the finished verse on a fresh resource
    sequencer.toggle();
    confirm_latest(&mut sequencer, &engine);
    assert_eq!(sequencer.status(), PlaybackStatus::CuedPlaying);
    assert_eq!(sequencer.current_index(), Some(0));
    assert_ne!(engine.last_loaded(), finished);
}

#[rstest]
#[case(-1)]
#[case(5)]
#[case(i64::MAX)]
fn test_out_of_range_play_is_idle(#[case] index: i64) {
    let (mut sequencer, engine) = loaded(5);
    sequencer.play(index);
    sequencer.pump();

    assert_eq!(sequencer.status(), PlaybackStatus::Idle);
    assert_eq!(engine.load_count(), 0);
}

#[test]
fn test_toggle_from_idle_plays_first_verse() {
    let (mut sequencer, engine) = loaded(4);
    sequencer.toggle();
    confirm_latest(&mut sequencer, &engine);

    assert_eq!(sequencer.status(), PlaybackStatus::CuedPlaying);
    assert_eq!(sequencer.current_index(), Some(0));
}

#[test]
fn test_load_chapter_resets_while_playing() {
    let (mut sequencer, engine) = loaded(4);
    sequencer.play(3);
    confirm_latest(&mut sequencer, &engine);
    sequencer.set_repeat(true);

    sequencer.load_chapter(verses(2));

    assert_eq!(sequencer.status(), PlaybackStatus::Idle);
    assert_eq!(sequencer.verses().len(), 2);
    assert_eq!(engine.live_resources(), 0);
    assert!(matches!(engine.calls().last(), Some(EngineCall::Release(_))));
    // Repeat is a user preference and survives the chapter change
    assert!(sequencer.repeat_one());
}

#[derive(Debug, Clone)]
enum Op {
    Load(usize),
    Play(i64),
    Toggle,
    Next,
    Previous,
    Stop,
    Repeat(bool),
    Confirm,
    Reject,
    Complete,
    Fail,
    CompleteStale,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8).prop_map(Op::Load),
        (-3i64..10).prop_map(Op::Play),
        Just(Op::Toggle),
        Just(Op::Next),
        Just(Op::Previous),
        Just(Op::Stop),
        any::<bool>().prop_map(Op::Repeat),
        Just(Op::Confirm),
        Just(Op::Reject),
        Just(Op::Complete),
        Just(Op::Fail),
        Just(Op::CompleteStale),
    ]
}

fn apply(sequencer: &mut AyahSequencer<MockEngine>, engine: &MockEngine, op: &Op) {
    match *op {
        Op::Load(len) => sequencer.load_chapter(verses(len)),
        Op::Play(index) => sequencer.play(index),
        Op::Toggle => sequencer.toggle(),
        Op::Next => sequencer.next(),
        Op::Previous => sequencer.previous(),
        Op::Stop => sequencer.stop(),
        Op::Repeat(on) => sequencer.set_repeat(on),
        Op::Confirm => {
            if let Some(id) = engine.last_loaded() {
                engine.confirm_start(id);
            }
        }
        Op::Reject => {
            if let Some(id) = engine.last_loaded() {
                engine.reject_start(id, "NotAllowedError");
            }
        }
        Op::Complete => {
            if let Some(id) = engine.last_loaded() {
                engine.complete(id);
            }
        }
        Op::Fail => {
            if let Some(id) = engine.last_loaded() {
                engine.fail(id, "decode error");
            }
        }
        Op::CompleteStale => {
            if let Some(id) = first_loaded(engine) {
                if Some(id) != engine.last_loaded() {
                    engine.complete(id);
                }
            }
        }
    }
    sequencer.pump();
}

proptest! {
    #[test]
    fn prop_never_two_live_resources(ops in prop::collection::vec(op(), 1..60)) {
        let (mut sequencer, engine) = loaded(5);
        for op in &ops {
            apply(&mut sequencer, &engine, op);
            prop_assert!(engine.live_resources() <= 1);
        }
        prop_assert!(engine.max_live() <= 1);
    }

    #[test]
    fn prop_state_stays_consistent(ops in prop::collection::vec(op(), 1..60)) {
        let (mut sequencer, engine) = loaded(5);
        for op in &ops {
            apply(&mut sequencer, &engine, op);

            let len = sequencer.verses().len();
            if let Some(index) = sequencer.current_index() {
                prop_assert!(index < len);
            }
            if sequencer.is_playing() {
                prop_assert!(sequencer.current_index().is_some());
                prop_assert_eq!(engine.live_resources(), 1);
            }
        }
    }

    #[test]
    fn prop_valid_play_ends_playing(len in 1usize..40, seed in any::<usize>()) {
        let index = seed % len;
        let (mut sequencer, engine) = loaded(len);

        sequencer.play(index as i64);
        confirm_latest(&mut sequencer, &engine);

        prop_assert_eq!(sequencer.status(), PlaybackStatus::CuedPlaying);
        prop_assert_eq!(sequencer.current_index(), Some(index));
    }

    #[test]
    fn prop_invalid_play_ends_idle(len in 0usize..40, offset in 0i64..100, negative in any::<bool>()) {
        let index = if negative { -1 - offset } else { len as i64 + offset };
        let (mut sequencer, engine) = loaded(len);

        sequencer.play(index);
        sequencer.pump();

        prop_assert_eq!(sequencer.status(), PlaybackStatus::Idle);
        prop_assert_eq!(engine.live_resources(), 0);
    }

    #[test]
    fn prop_repeat_completion_keeps_index(len in 1usize..40, seed in any::<usize>()) {
        let index = seed % len;
        let (mut sequencer, engine) = loaded(len);
        sequencer.set_repeat(true);
        sequencer.play(index as i64);
        confirm_latest(&mut sequencer, &engine);

        complete_latest(&mut sequencer, &engine);

        prop_assert_eq!(sequencer.current_index(), Some(index));
    }

    #[test]
    fn prop_load_chapter_always_idle(ops in prop::collection::vec(op(), 0..30), len in 0usize..10) {
        let (mut sequencer, engine) = loaded(5);
        for op in &ops {
            apply(&mut sequencer, &engine, op);
        }

        sequencer.load_chapter(verses(len));

        prop_assert_eq!(sequencer.status(), PlaybackStatus::Idle);
        prop_assert_eq!(engine.live_resources(), 0);
    }
}
