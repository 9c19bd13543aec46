//! Wall-clock frame statistics for the window runner.
//!
//! The simulation itself advances by a fixed logical step per frame and never
//! reads the clock. This only measures how fast frames are being produced.
//!
//! # Example
//!
//! ```ignore
//! use attractool::time::FrameStats;
//!
//! let mut stats = FrameStats::new();
//!
//! // Once per presented frame:
//! if let Some(fps) = stats.record() {
//!     println!("FPS: {fps:.1}");
//! }
//! ```

use std::time::{Duration, Instant};

/// Default interval between FPS samples.
pub const FPS_SAMPLE_INTERVAL: Duration = Duration::from_secs(2);

/// Counts presented frames and periodically derives a frame rate.
#[derive(Debug)]
pub struct FrameStats {
    start: Instant,
    /// Total frames since start.
    frame_count: u64,
    /// Last computed FPS.
    fps: f32,
    /// Frame count at last FPS sample.
    sample_frame_count: u64,
    /// Time of last FPS sample.
    sample_time: Instant,
    sample_interval: Duration,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::with_interval(FPS_SAMPLE_INTERVAL)
    }

    /// Sample the frame rate every `interval` instead of the default.
    pub fn with_interval(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_count: 0,
            fps: 0.0,
            sample_frame_count: 0,
            sample_time: now,
            sample_interval: interval,
        }
    }

    /// Count one frame.
    ///
    /// Returns the new FPS value when a sample interval has just elapsed.
    pub fn record(&mut self) -> Option<f32> {
        self.record_at(Instant::now())
    }

    fn record_at(&mut self, now: Instant) -> Option<f32> {
        self.frame_count += 1;

        let since = now.duration_since(self.sample_time);
        if since < self.sample_interval || since.is_zero() {
            return None;
        }
        let frames = self.frame_count - self.sample_frame_count;
        self.fps = frames as f32 / since.as_secs_f32();
        self.sample_frame_count = self.frame_count;
        self.sample_time = now;
        Some(self.fps)
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recently sampled frames per second, 0 before the first sample.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Time since the counter was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = FrameStats::new();
        assert_eq!(stats.frame(), 0);
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn test_fps_sampled_after_interval() {
        let mut stats = FrameStats::with_interval(Duration::from_secs(1));
        let start = stats.sample_time;

        for i in 1..60 {
            assert_eq!(stats.record_at(start + Duration::from_millis(i * 10)), None);
        }
        let fps = stats.record_at(start + Duration::from_secs(2)).unwrap();

        assert_eq!(stats.frame(), 60);
        assert!((fps - 30.0).abs() < 1e-3);
        assert_eq!(stats.fps(), fps);
    }

    #[test]
    fn test_counter_resets_each_sample() {
        let mut stats = FrameStats::with_interval(Duration::from_millis(100));
        let start = stats.sample_time;
        stats.record_at(start + Duration::from_millis(100));
        let fps = stats.record_at(start + Duration::from_millis(300)).unwrap();
        assert!((fps - 5.0).abs() < 1e-3);
    }
}
