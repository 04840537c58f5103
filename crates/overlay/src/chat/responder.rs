use rand::Rng;
use tracing::debug;

use super::log::MessageLog;
use super::slots::{MessageKind, SlotPool};

pub(crate) const REMOTE_PREFIX: &str = "Rev: ";

/// Seam for the responder's line selection so tests can substitute a
/// deterministic pick. Callers guarantee `len > 0`.
pub trait IndexSource {
    fn next_index(&mut self, len: usize) -> usize;
}

#[derive(Debug, Default)]
pub struct ThreadRngIndexSource;

impl IndexSource for ThreadRngIndexSource {
    fn next_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Scripted reply source. Picks one canned line per submission and feeds
/// it back into the log as a remote entry.
pub struct AutoResponder {
    script: Vec<String>,
    source: Box<dyn IndexSource>,
}

impl AutoResponder {
    pub fn new(script: Vec<String>) -> Self {
        Self::with_source(script, Box::new(ThreadRngIndexSource))
    }

    pub fn with_source(script: Vec<String>, source: Box<dyn IndexSource>) -> Self {
        Self { script, source }
    }

    /// An empty script degrades to silence rather than failing the tick.
    pub fn respond(&mut self, pool: &mut SlotPool, log: &mut MessageLog) {
        if self.script.is_empty() {
            debug!("auto_reply_skipped_empty_script");
            return;
        }

        let index = self.source.next_index(self.script.len());
        let line = &self.script[index];
        log.append(pool, &format!("{REMOTE_PREFIX}{line}"), MessageKind::Remote);
    }

    pub fn script_len(&self) -> usize {
        self.script.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) struct SequenceIndexSource {
        picks: Vec<usize>,
        cursor: usize,
    }

    impl SequenceIndexSource {
        pub(crate) fn new(picks: Vec<usize>) -> Self {
            Self { picks, cursor: 0 }
        }
    }

    impl IndexSource for SequenceIndexSource {
        fn next_index(&mut self, len: usize) -> usize {
            let pick = self.picks[self.cursor % self.picks.len()];
            self.cursor += 1;
            pick % len
        }
    }

    fn script(lines: &[&str]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_script_is_a_silent_no_op() {
        let mut pool = SlotPool::new(2);
        let mut log = MessageLog::new(2, 29);
        let mut responder = AutoResponder::new(Vec::new());

        responder.respond(&mut pool, &mut log);

        assert!(log.is_empty());
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn reply_is_prefixed_and_tagged_remote() {
        let mut pool = SlotPool::new(2);
        let mut log = MessageLog::new(2, 29);
        let mut responder = AutoResponder::with_source(
            script(&["hi"]),
            Box::new(SequenceIndexSource::new(vec![0])),
        );

        responder.respond(&mut pool, &mut log);

        let record = log.records(&pool).next().expect("one entry");
        assert_eq!(record.text(), "Rev: hi");
        assert_eq!(record.kind(), MessageKind::Remote);
    }

    #[test]
    fn injected_source_drives_line_selection() {
        let mut pool = SlotPool::new(4);
        let mut log = MessageLog::new(3, 29);
        let mut responder = AutoResponder::with_source(
            script(&["alpha", "beta", "gamma"]),
            Box::new(SequenceIndexSource::new(vec![2, 0, 1])),
        );

        for _ in 0..3 {
            responder.respond(&mut pool, &mut log);
        }

        let texts: Vec<&str> = log.records(&pool).map(|r| r.text()).collect();
        assert_eq!(texts, vec!["Rev: gamma", "Rev: alpha", "Rev: beta"]);
    }

    #[test]
    fn single_line_script_always_picks_it() {
        let mut pool = SlotPool::new(2);
        let mut log = MessageLog::new(1, 29);
        let mut responder = AutoResponder::new(script(&["hi"]));

        responder.respond(&mut pool, &mut log);

        let record = log.records(&pool).next().expect("one entry");
        assert_eq!(record.text(), "Rev: hi");
    }
}
