use std::time::Duration;

use winit::keyboard::KeyCode;

use crate::config::ChatConfig;

use super::controller::{ChatOverlay, CLOSED_PLACEHOLDER, OPEN_PLACEHOLDER};
use super::input_field::InputField;
use super::responder::IndexSource;
use super::slots::MessageKind;

const SECOND: Duration = Duration::from_secs(1);

struct FirstLineSource;

impl IndexSource for FirstLineSource {
    fn next_index(&mut self, _len: usize) -> usize {
        0
    }
}

fn config_with(max_messages: usize, reply_script: &[&str]) -> ChatConfig {
    let config = ChatConfig {
        max_messages,
        pool_capacity: max_messages + 1,
        reply_script: reply_script.iter().map(ToString::to_string).collect(),
        ..ChatConfig::default()
    };
    config.validate().expect("test config is valid");
    config
}

fn overlay_with(max_messages: usize, reply_script: &[&str]) -> ChatOverlay {
    ChatOverlay::with_index_source(&config_with(max_messages, reply_script), Box::new(FirstLineSource))
}

fn field() -> InputField {
    InputField::new(OPEN_PLACEHOLDER)
}

fn entry_texts(overlay: &ChatOverlay) -> Vec<String> {
    overlay.entries().map(|r| r.text().to_string()).collect()
}

fn close_by_idling(overlay: &mut ChatOverlay, field: &mut InputField) {
    field.unfocus();
    for _ in 0..10 {
        overlay.tick(Duration::from_secs(10), field);
    }
    assert!(!overlay.is_open());
}

#[test]
fn submission_echoes_local_line_and_scripted_reply() {
    let mut overlay = overlay_with(10, &["hi"]);
    let mut field = field();

    overlay.submit("hello", &mut field);

    assert_eq!(entry_texts(&overlay), vec!["You: hello", "Rev: hi"]);
    let kinds: Vec<MessageKind> = overlay.entries().map(|r| r.kind()).collect();
    assert_eq!(kinds, vec![MessageKind::Local, MessageKind::Remote]);
}

#[test]
fn capacity_three_keeps_last_three_submissions_in_order() {
    let mut overlay = overlay_with(3, &[]);
    let mut field = field();

    for text in ["a", "b", "c", "d"] {
        overlay.submit(text, &mut field);
    }

    assert_eq!(entry_texts(&overlay), vec!["You: b", "You: c", "You: d"]);

    let offsets: Vec<i32> = overlay.entries().map(|r| r.offset_px()).collect();
    let shift = ChatConfig::default().shift_px();
    assert_eq!(offsets, vec![2 * shift, shift, 0]);
}

#[test]
fn log_length_is_min_of_submissions_and_capacity() {
    let mut overlay = overlay_with(3, &[]);
    let mut field = field();

    for count in 1..=6 {
        overlay.submit(&format!("m{count}"), &mut field);
        assert_eq!(overlay.log_len(), count.min(3));
    }
}

#[test]
fn six_one_second_ticks_close_after_the_fifth() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();
    field.unfocus();

    for tick in 1..=6 {
        overlay.tick(SECOND, &mut field);
        if tick < 5 {
            assert!(overlay.is_open(), "closed early on tick {tick}");
        } else {
            assert!(!overlay.is_open(), "still open on tick {tick}");
        }
    }
    assert_eq!(field.placeholder(), CLOSED_PLACEHOLDER);
}

#[test]
fn submission_while_closed_changes_nothing() {
    let mut overlay = overlay_with(10, &["hi"]);
    let mut field = field();
    close_by_idling(&mut overlay, &mut field);

    let free_before = overlay.pool().free_count();
    overlay.submit("dropped", &mut field);

    assert_eq!(overlay.log_len(), 0);
    assert_eq!(overlay.pool().free_count(), free_before);
    assert!(!overlay.is_open());
}

#[test]
fn blank_submission_does_not_reset_the_idle_timer() {
    let mut overlay = overlay_with(10, &["hi"]);
    let mut field = field();
    field.unfocus();

    overlay.tick(Duration::from_secs(3), &mut field);
    let idle_before = overlay.idle();

    overlay.submit("", &mut field);
    overlay.submit("   \t", &mut field);

    assert_eq!(overlay.idle(), idle_before);
    assert_eq!(overlay.log_len(), 0);
}

#[test]
fn focused_field_suspends_auto_hide_indefinitely() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();
    field.focus();

    for _ in 0..100 {
        overlay.tick(SECOND, &mut field);
    }
    assert!(overlay.is_open());

    field.unfocus();
    for _ in 0..5 {
        overlay.tick(SECOND, &mut field);
    }
    assert!(!overlay.is_open());
}

#[test]
fn enter_while_closed_reopens_and_focuses_the_field() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();
    close_by_idling(&mut overlay, &mut field);

    overlay.handle_key_code(KeyCode::Enter, false, &mut field);

    assert!(overlay.is_open());
    assert!(field.is_focused());
    assert_eq!(field.placeholder(), OPEN_PLACEHOLDER);
    assert_eq!(overlay.idle(), Duration::ZERO);
}

#[test]
fn numpad_enter_also_activates_from_closed() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();
    close_by_idling(&mut overlay, &mut field);

    overlay.handle_key_code(KeyCode::NumpadEnter, false, &mut field);
    assert!(overlay.is_open());
}

#[test]
fn held_enter_repeats_do_not_activate() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();
    close_by_idling(&mut overlay, &mut field);

    overlay.handle_key_code(KeyCode::Enter, true, &mut field);
    assert!(!overlay.is_open());
}

#[test]
fn enter_while_open_and_unfocused_grabs_focus_and_resets_idle() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();
    field.unfocus();
    overlay.tick(Duration::from_secs(4), &mut field);

    overlay.handle_key_code(KeyCode::Enter, false, &mut field);

    assert!(field.is_focused());
    assert_eq!(overlay.idle(), Duration::ZERO);
    assert_eq!(overlay.log_len(), 0);
}

#[test]
fn enter_while_focused_submits_the_buffer() {
    let mut overlay = overlay_with(10, &["hi"]);
    let mut field = field();
    field.focus();
    field.push_printable("hello");

    overlay.handle_key_code(KeyCode::Enter, false, &mut field);

    assert_eq!(entry_texts(&overlay), vec!["You: hello", "Rev: hi"]);
    assert_eq!(field.text(), "");
    assert!(field.is_focused());
}

#[test]
fn typing_counts_as_activity_and_resets_idle() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();
    field.unfocus();
    overlay.tick(Duration::from_secs(4), &mut field);

    field.focus();
    overlay.append_text("h", &mut field);

    assert_eq!(overlay.idle(), Duration::ZERO);
    assert_eq!(field.text(), "h");
}

#[test]
fn control_only_text_does_not_count_as_activity() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();
    field.focus();
    // Accumulate idle while unfocused, then refocus before typing.
    field.unfocus();
    overlay.tick(Duration::from_secs(2), &mut field);
    field.focus();

    overlay.append_text("\r", &mut field);

    assert_eq!(overlay.idle(), Duration::from_secs(2));
}

#[test]
fn backspace_edits_count_as_activity() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();
    field.focus();
    overlay.append_text("hi", &mut field);
    field.unfocus();
    overlay.tick(Duration::from_secs(2), &mut field);
    field.focus();

    overlay.handle_key_code(KeyCode::Backspace, false, &mut field);

    assert_eq!(field.text(), "h");
    assert_eq!(overlay.idle(), Duration::ZERO);
}

#[test]
fn escape_drops_focus_and_idle_resumes_where_it_left_off() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();
    field.unfocus();
    overlay.tick(Duration::from_secs(3), &mut field);

    field.focus();
    overlay.handle_key_code(KeyCode::Escape, false, &mut field);
    assert!(!field.is_focused());

    overlay.tick(Duration::from_secs(2), &mut field);
    assert!(!overlay.is_open());
}

#[test]
fn typing_while_unfocused_is_ignored() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();
    field.unfocus();

    overlay.append_text("ghost", &mut field);

    assert_eq!(field.text(), "");
    assert_eq!(overlay.idle(), Duration::ZERO);
}

#[test]
fn pool_accounting_stays_balanced_through_a_full_session() {
    let mut overlay = overlay_with(3, &["hi"]);
    let mut field = field();

    for round in 0..12 {
        overlay.submit(&format!("line {round}"), &mut field);
        let pool = overlay.pool();
        assert_eq!(pool.free_count() + pool.active_count(), pool.total_count());
        assert!(overlay.log_len() <= overlay.max_messages());
    }
}

#[test]
fn empty_reply_script_leaves_only_local_lines() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();

    overlay.submit("anyone there?", &mut field);

    assert_eq!(entry_texts(&overlay), vec!["You: anyone there?"]);
}

#[test]
fn programmatic_open_counts_as_activity() {
    let mut overlay = overlay_with(10, &[]);
    let mut field = field();
    field.unfocus();
    overlay.tick(Duration::from_secs(4), &mut field);

    overlay.open(&mut field);

    assert_eq!(overlay.idle(), Duration::ZERO);
    assert!(field.is_focused());
}
