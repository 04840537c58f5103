use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub tps: f32,
    pub avg_frame_ms: f32,
    pub worst_frame_ms: f32,
}

/// Interval accumulator behind the periodic `loop_metrics` log line.
#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    interval_start: Instant,
    interval: Duration,
    frames: u32,
    host_ticks: u32,
    frame_time_sum: Duration,
    frame_time_worst: Duration,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval_start: Instant::now(),
            interval,
            frames: 0,
            host_ticks: 0,
            frame_time_sum: Duration::ZERO,
            frame_time_worst: Duration::ZERO,
        }
    }

    pub(crate) fn record_frame(&mut self, frame_dt: Duration) {
        self.frames = self.frames.saturating_add(1);
        self.frame_time_sum = self.frame_time_sum.saturating_add(frame_dt);
        self.frame_time_worst = self.frame_time_worst.max(frame_dt);
    }

    pub(crate) fn record_host_tick(&mut self) {
        self.host_ticks = self.host_ticks.saturating_add(1);
    }

    pub(crate) fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed < self.interval {
            return None;
        }

        let elapsed_seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let avg_frame_ms = if self.frames == 0 {
            0.0
        } else {
            self.frame_time_sum.as_secs_f32() / self.frames as f32 * 1000.0
        };
        let snapshot = LoopMetricsSnapshot {
            fps: self.frames as f32 / elapsed_seconds,
            tps: self.host_ticks as f32 / elapsed_seconds,
            avg_frame_ms,
            worst_frame_ms: self.frame_time_worst.as_secs_f32() * 1000.0,
        };

        self.interval_start = now;
        self.frames = 0;
        self.host_ticks = 0;
        self.frame_time_sum = Duration::ZERO;
        self.frame_time_worst = Duration::ZERO;
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_snapshot_before_the_interval_elapses() {
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1));
        let base = Instant::now();
        accumulator.record_frame(Duration::from_millis(16));

        assert!(accumulator
            .maybe_snapshot(base + Duration::from_millis(400))
            .is_none());
    }

    #[test]
    fn snapshot_reports_rates_and_frame_times() {
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1));
        let base = Instant::now();

        accumulator.record_frame(Duration::from_millis(10));
        accumulator.record_frame(Duration::from_millis(30));
        for _ in 0..4 {
            accumulator.record_host_tick();
        }

        let snapshot = accumulator
            .maybe_snapshot(base + Duration::from_secs(1))
            .expect("snapshot due");

        assert!((snapshot.fps - 2.0).abs() < 0.1);
        assert!((snapshot.tps - 4.0).abs() < 0.1);
        assert!((snapshot.avg_frame_ms - 20.0).abs() < 0.01);
        assert!((snapshot.worst_frame_ms - 30.0).abs() < 0.01);
    }

    #[test]
    fn counters_reset_between_intervals() {
        let mut accumulator = MetricsAccumulator::new(Duration::from_secs(1));
        let base = Instant::now();
        accumulator.record_frame(Duration::from_millis(16));
        accumulator.record_host_tick();

        let _ = accumulator
            .maybe_snapshot(base + Duration::from_secs(1))
            .expect("first snapshot");
        let second = accumulator
            .maybe_snapshot(base + Duration::from_secs(60))
            .expect("second snapshot");

        assert_eq!(second.tps, 0.0);
        assert_eq!(second.avg_frame_ms, 0.0);
        assert_eq!(second.worst_frame_ms, 0.0);
    }
}
