use std::collections::VecDeque;

use super::slots::{MessageKind, SlotId, SlotPool, SlotRecord};

/// Capacity-bounded, oldest-evicted sequence of active chat lines.
///
/// The newest entry always sits at offset zero (the anchor); every older
/// entry carries the cumulative shift applied when newer lines arrived.
#[derive(Debug)]
pub struct MessageLog {
    entries: VecDeque<SlotId>,
    max_messages: usize,
    shift_px: i32,
}

impl MessageLog {
    /// `max_messages` must be validated non-zero by config before the log
    /// is constructed; see `ChatConfig::validate`.
    pub fn new(max_messages: usize, shift_px: i32) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_messages),
            max_messages,
            shift_px,
        }
    }

    pub fn append(&mut self, pool: &mut SlotPool, text: &str, kind: MessageKind) {
        for id in &self.entries {
            pool.record_mut(*id).push_offset(self.shift_px);
        }

        let id = pool.acquire();
        pool.record_mut(id).set_message(text, kind);
        self.entries.push_back(id);

        if self.entries.len() > self.max_messages {
            if let Some(oldest) = self.entries.pop_front() {
                pool.release(oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    /// Oldest-first view over the active slot records.
    pub fn records<'a>(&'a self, pool: &'a SlotPool) -> impl Iterator<Item = &'a SlotRecord> {
        self.entries.iter().map(|id| pool.record(*id))
    }
}
