use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatVisibility {
    Open,
    Closed,
}

/// Idle-driven open/closed state for the chat surface.
///
/// The idle counter only advances while the surface is open and the input
/// field does not hold focus; focus suspends accumulation without
/// resetting it. Every qualifying activity resets the counter to zero.
#[derive(Debug)]
pub struct VisibilityMachine {
    state: ChatVisibility,
    idle: Duration,
    hide_after: Duration,
}

impl VisibilityMachine {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            state: ChatVisibility::Open,
            idle: Duration::ZERO,
            hide_after,
        }
    }

    pub fn state(&self) -> ChatVisibility {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ChatVisibility::Open
    }

    pub fn idle(&self) -> Duration {
        self.idle
    }

    /// Qualifying activity: submitted text, changed text, focus gained.
    pub fn note_activity(&mut self) {
        self.idle = Duration::ZERO;
    }

    /// Activate transition. Returns true when the surface was closed and
    /// is now open; counts as activity either way.
    pub fn open(&mut self) -> bool {
        self.idle = Duration::ZERO;
        if self.state == ChatVisibility::Closed {
            self.state = ChatVisibility::Open;
            return true;
        }
        false
    }

    /// Advances the idle counter by an unscaled frame delta. Returns true
    /// on the tick that crosses the hide threshold and closes the surface.
    pub fn tick(&mut self, dt: Duration, input_focused: bool) -> bool {
        if self.state != ChatVisibility::Open || input_focused {
            return false;
        }

        self.idle = self.idle.saturating_add(dt);
        if self.idle >= self.hide_after {
            self.state = ChatVisibility::Closed;
            self.idle = Duration::ZERO;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn starts_open_with_zero_idle() {
        let machine = VisibilityMachine::new(Duration::from_secs(5));
        assert!(machine.is_open());
        assert_eq!(machine.idle(), Duration::ZERO);
    }

    #[test]
    fn closes_on_the_tick_that_reaches_the_threshold() {
        let mut machine = VisibilityMachine::new(Duration::from_secs(5));

        for tick in 1..=6 {
            let closed = machine.tick(SECOND, false);
            if tick < 5 {
                assert!(!closed, "closed early on tick {tick}");
                assert!(machine.is_open());
            } else if tick == 5 {
                assert!(closed, "expected close on tick 5");
                assert!(!machine.is_open());
            } else {
                assert!(!closed, "close must fire once");
            }
        }
    }

    #[test]
    fn activity_before_threshold_keeps_surface_open_indefinitely() {
        let mut machine = VisibilityMachine::new(Duration::from_secs(5));

        for _ in 0..50 {
            assert!(!machine.tick(Duration::from_secs(4), false));
            machine.note_activity();
        }
        assert!(machine.is_open());
    }

    #[test]
    fn focus_suspends_idle_accumulation_without_resetting() {
        let mut machine = VisibilityMachine::new(Duration::from_secs(5));

        machine.tick(Duration::from_secs(3), false);
        assert_eq!(machine.idle(), Duration::from_secs(3));

        for _ in 0..100 {
            assert!(!machine.tick(SECOND, true));
        }
        assert_eq!(machine.idle(), Duration::from_secs(3));
        assert!(machine.is_open());

        assert!(machine.tick(Duration::from_secs(2), false));
        assert!(!machine.is_open());
    }

    #[test]
    fn no_countdown_runs_while_closed() {
        let mut machine = VisibilityMachine::new(Duration::from_secs(5));
        while machine.is_open() {
            machine.tick(Duration::from_secs(10), false);
        }

        for _ in 0..10 {
            assert!(!machine.tick(Duration::from_secs(10), false));
        }
        assert!(!machine.is_open());
    }

    #[test]
    fn open_transitions_from_closed_and_resets_idle() {
        let mut machine = VisibilityMachine::new(Duration::from_secs(5));
        machine.tick(Duration::from_secs(10), false);
        assert!(!machine.is_open());

        assert!(machine.open());
        assert!(machine.is_open());
        assert_eq!(machine.idle(), Duration::ZERO);
    }

    #[test]
    fn open_while_already_open_counts_as_activity_only() {
        let mut machine = VisibilityMachine::new(Duration::from_secs(5));
        machine.tick(Duration::from_secs(3), false);

        assert!(!machine.open());
        assert_eq!(machine.idle(), Duration::ZERO);
        assert!(machine.is_open());
    }

    #[test]
    fn fractional_deltas_accumulate_to_the_threshold() {
        let mut machine = VisibilityMachine::new(Duration::from_millis(500));
        let mut closed = false;
        for _ in 0..30 {
            closed |= machine.tick(Duration::from_millis(16), false);
        }
        assert!(!closed);
        assert!(machine.tick(Duration::from_millis(32), false));
    }
}
