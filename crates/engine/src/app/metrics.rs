use std::time::{Duration, Instant};

use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub frame_time_ms: f32,
}

/// Rolls frame timings into periodic snapshots. One snapshot is produced
/// (and logged) per elapsed interval.
pub(crate) struct MetricsAccumulator {
    interval: Duration,
    window_start: Instant,
    frames_in_window: u32,
    frame_time_sum: Duration,
    last_snapshot: LoopMetricsSnapshot,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            window_start: now,
            frames_in_window: 0,
            frame_time_sum: Duration::ZERO,
            last_snapshot: LoopMetricsSnapshot::default(),
        }
    }

    pub(crate) fn record_frame(
        &mut self,
        now: Instant,
        frame_time: Duration,
    ) -> Option<LoopMetricsSnapshot> {
        self.frames_in_window = self.frames_in_window.saturating_add(1);
        self.frame_time_sum = self.frame_time_sum.saturating_add(frame_time);

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }

        let elapsed_secs = elapsed.as_secs_f32().max(f32::EPSILON);
        let snapshot = LoopMetricsSnapshot {
            fps: self.frames_in_window as f32 / elapsed_secs,
            frame_time_ms: self.frame_time_sum.as_secs_f32() * 1000.0
                / self.frames_in_window.max(1) as f32,
        };
        self.last_snapshot = snapshot;
        self.window_start = now;
        self.frames_in_window = 0;
        self.frame_time_sum = Duration::ZERO;
        info!(
            fps = snapshot.fps,
            frame_time_ms = snapshot.frame_time_ms,
            "frame_metrics"
        );
        Some(snapshot)
    }

    pub(crate) fn last_snapshot(&self) -> LoopMetricsSnapshot {
        self.last_snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_snapshot_before_interval_elapses() {
        let start = Instant::now();
        let mut metrics = MetricsAccumulator::new(Duration::from_secs(1), start);
        let result = metrics.record_frame(
            start + Duration::from_millis(500),
            Duration::from_millis(16),
        );
        assert!(result.is_none());
        assert_eq!(metrics.last_snapshot(), LoopMetricsSnapshot::default());
    }

    #[test]
    fn snapshot_averages_frames_over_window() {
        let start = Instant::now();
        let mut metrics = MetricsAccumulator::new(Duration::from_secs(1), start);
        for i in 1..=9 {
            let result = metrics.record_frame(
                start + Duration::from_millis(i * 100),
                Duration::from_millis(10),
            );
            assert!(result.is_none());
        }
        let snapshot = metrics
            .record_frame(start + Duration::from_secs(1), Duration::from_millis(10))
            .expect("snapshot at window end");
        assert!((snapshot.fps - 10.0).abs() < 0.5);
        assert!((snapshot.frame_time_ms - 10.0).abs() < 0.5);
    }

    #[test]
    fn window_resets_after_snapshot() {
        let start = Instant::now();
        let mut metrics = MetricsAccumulator::new(Duration::from_secs(1), start);
        metrics
            .record_frame(start + Duration::from_secs(1), Duration::from_millis(16))
            .expect("first snapshot");
        let result = metrics.record_frame(
            start + Duration::from_millis(1100),
            Duration::from_millis(16),
        );
        assert!(result.is_none());
    }
}
