use std::time::Duration;

use tracing::{debug, info};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config::ChatConfig;

use super::input_field::InputField;
use super::log::MessageLog;
use super::responder::{AutoResponder, IndexSource, ThreadRngIndexSource};
use super::slots::{MessageKind, SlotPool, SlotRecord};
use super::visibility::{ChatVisibility, VisibilityMachine};

pub(crate) const LOCAL_PREFIX: &str = "You: ";
pub const OPEN_PLACEHOLDER: &str = "Enter chat...";
pub const CLOSED_PLACEHOLDER: &str = "Press enter to open chat";

/// Orchestrates the chat surface: routes key events, appends submitted
/// lines, drives the auto-responder, and runs the visibility machine once
/// per frame. The input field is owned by the caller; this type only
/// issues clear/focus/placeholder commands against it.
pub struct ChatOverlay {
    pool: SlotPool,
    log: MessageLog,
    visibility: VisibilityMachine,
    responder: AutoResponder,
}

impl ChatOverlay {
    /// `config` must already have passed `ChatConfig::validate`.
    pub fn new(config: &ChatConfig) -> Self {
        Self::with_index_source(config, Box::new(ThreadRngIndexSource))
    }

    pub fn with_index_source(config: &ChatConfig, source: Box<dyn IndexSource>) -> Self {
        Self {
            pool: SlotPool::new(config.pool_capacity),
            log: MessageLog::new(config.max_messages, config.shift_px()),
            visibility: VisibilityMachine::new(config.idle_hide()),
            responder: AutoResponder::with_source(config.reply_script.clone(), source),
        }
    }

    pub fn handle_key_event(&mut self, key_event: &KeyEvent, field: &mut InputField) {
        if key_event.state != ElementState::Pressed {
            return;
        }
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return;
        };
        self.handle_key_code(code, key_event.repeat, field);
    }

    pub fn handle_text_input(&mut self, key_event: &KeyEvent, field: &mut InputField) {
        if key_event.state != ElementState::Pressed {
            return;
        }
        let Some(text) = key_event.text.as_ref() else {
            return;
        };
        self.append_text(text, field);
    }

    pub(crate) fn handle_key_code(&mut self, code: KeyCode, repeat: bool, field: &mut InputField) {
        match code {
            KeyCode::Enter | KeyCode::NumpadEnter if !repeat => self.handle_activate(field),
            KeyCode::Escape if field.is_focused() => field.unfocus(),
            KeyCode::Backspace if self.visibility.is_open() && field.is_focused() => {
                if field.backspace() {
                    self.visibility.note_activity();
                }
            }
            _ => {}
        }
    }

    pub(crate) fn append_text(&mut self, text: &str, field: &mut InputField) {
        if !self.visibility.is_open() || !field.is_focused() {
            return;
        }
        if field.push_printable(text) {
            self.visibility.note_activity();
        }
    }

    /// Programmatic open: shows the surface, focuses the field, and counts
    /// as qualifying activity.
    pub fn open(&mut self, field: &mut InputField) {
        if self.visibility.open() {
            info!("chat_opened");
        }
        field.focus();
        field.set_placeholder(OPEN_PLACEHOLDER);
    }

    /// Completed-line submission. Silently absorbed while the surface is
    /// closed or when the text is blank; a blank line must not touch the
    /// idle timer.
    pub fn submit(&mut self, text: &str, field: &mut InputField) {
        if !self.visibility.is_open() {
            return;
        }
        if text.trim().is_empty() {
            return;
        }

        self.log
            .append(&mut self.pool, &format!("{LOCAL_PREFIX}{text}"), MessageKind::Local);
        self.responder.respond(&mut self.pool, &mut self.log);
        field.clear();
        field.focus();
        self.visibility.note_activity();
        debug!(log_len = self.log.len(), "chat_line_submitted");
    }

    /// Runs the visibility machine with the unscaled frame delta.
    pub fn tick(&mut self, raw_dt: Duration, field: &mut InputField) {
        if self.visibility.tick(raw_dt, field.is_focused()) {
            field.set_placeholder(CLOSED_PLACEHOLDER);
            info!("chat_auto_hidden");
        }
    }

    fn handle_activate(&mut self, field: &mut InputField) {
        match self.visibility.state() {
            ChatVisibility::Closed => self.open(field),
            ChatVisibility::Open if field.is_focused() => {
                let text = field.text().to_owned();
                self.submit(&text, field);
            }
            ChatVisibility::Open => {
                field.focus();
                self.visibility.note_activity();
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    pub fn visibility(&self) -> ChatVisibility {
        self.visibility.state()
    }

    pub fn idle(&self) -> Duration {
        self.visibility.idle()
    }

    /// Oldest-first view over the active lines.
    pub fn entries(&self) -> impl Iterator<Item = &SlotRecord> {
        self.log.records(&self.pool)
    }

    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    pub fn max_messages(&self) -> usize {
        self.log.max_messages()
    }

    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    pub fn reply_lines(&self) -> usize {
        self.responder.script_len()
    }
}
