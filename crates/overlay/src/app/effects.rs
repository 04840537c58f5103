use std::time::Duration;

const FLASH_REVERT_DELAY: Duration = Duration::from_millis(350);

pub const DAMAGE_FLASH_COLOR: [u8; 4] = [200, 40, 40, 90];

/// Single-slot deferred revert. Scheduling while a revert is pending
/// replaces it, so a re-triggered effect extends instead of stacking.
#[derive(Debug, Default)]
pub struct RevertTimer {
    remaining: Option<Duration>,
}

impl RevertTimer {
    pub fn schedule(&mut self, delay: Duration) {
        self.remaining = Some(delay);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Returns true exactly once, on the tick the pending revert fires.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };

        let remaining = remaining.saturating_sub(dt);
        if remaining.is_zero() {
            self.remaining = None;
            return true;
        }
        self.remaining = Some(remaining);
        false
    }
}

/// Full-frame tint effects layered over the rendered scene. Ticked from
/// the unscaled frame delta so reverts land even while the host sim is
/// paused.
#[derive(Debug, Default)]
pub struct ScreenEffects {
    tint: Option<[u8; 4]>,
    revert: RevertTimer,
}

impl ScreenEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger_flash(&mut self, color: [u8; 4]) {
        self.tint = Some(color);
        self.revert.schedule(FLASH_REVERT_DELAY);
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.revert.tick(dt) {
            self.tint = None;
        }
    }

    pub fn tint(&self) -> Option<[u8; 4]> {
        self.tint
    }
}
