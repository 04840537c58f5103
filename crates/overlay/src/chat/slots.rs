use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Local,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

/// One reusable display line. Records are created once and cycled between
/// the pool's free list and the message log; storage never shrinks.
#[derive(Debug)]
pub struct SlotRecord {
    text: String,
    kind: MessageKind,
    offset_px: i32,
    active: bool,
}

impl SlotRecord {
    fn idle() -> Self {
        Self {
            text: String::new(),
            kind: MessageKind::Local,
            offset_px: 0,
            active: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn offset_px(&self) -> i32 {
        self.offset_px
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_message(&mut self, text: &str, kind: MessageKind) {
        self.text.clear();
        self.text.push_str(text);
        self.kind = kind;
        self.offset_px = 0;
    }

    pub(crate) fn push_offset(&mut self, shift_px: i32) {
        self.offset_px = self.offset_px.saturating_add(shift_px);
    }
}

#[derive(Debug)]
pub struct SlotPool {
    slots: Vec<SlotRecord>,
    free: Vec<SlotId>,
}

impl SlotPool {
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity).map(|_| SlotRecord::idle()).collect();
        let free = (0..capacity).rev().map(SlotId).collect();
        Self { slots, free }
    }

    /// Hands out a free slot, growing storage by one when the free list is
    /// empty so the caller never has to handle exhaustion.
    pub fn acquire(&mut self) -> SlotId {
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                let id = SlotId(self.slots.len());
                self.slots.push(SlotRecord::idle());
                debug!(total_slots = self.slots.len(), "slot_pool_grew");
                id
            }
        };
        self.slots[id.0].active = true;
        id
    }

    pub fn release(&mut self, id: SlotId) {
        let record = &mut self.slots[id.0];
        if !record.active {
            return;
        }
        record.text.clear();
        record.offset_px = 0;
        record.active = false;
        self.free.push(id);
    }

    pub fn record(&self, id: SlotId) -> &SlotRecord {
        &self.slots[id.0]
    }

    pub(crate) fn record_mut(&mut self, id: SlotId) -> &mut SlotRecord {
        &mut self.slots[id.0]
    }

    pub fn total_count(&self) -> usize {
        self.slots.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
