//! Frame timing

use std::time::Instant;

/// Frame timer driven by the render loop
///
/// `tick` is called once per drawn frame; the timer tracks the delta to the previous
/// frame, the total run time and a frame counter used for periodic FPS reports.
#[derive(Debug)]
pub struct FrameTimer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    report_window_start: f32,
    report_window_frames: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer starting now
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            report_window_start: 0.0,
            report_window_frames: 0,
        }
    }

    /// Advance the timer by one frame
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.advance(now.duration_since(self.last_frame).as_secs_f32());
        self.last_frame = now;
    }

    fn advance(&mut self, delta: f32) {
        self.delta_time = delta;
        self.total_time += delta;
        self.frame_count += 1;
        self.report_window_frames += 1;
    }

    /// Time between the two most recent ticks, in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total time accumulated across ticks, in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average FPS over the window since the last report, once `interval` seconds have passed
    ///
    /// Returns `None` until the interval elapses, then starts a new window.
    pub fn take_fps_report(&mut self, interval: f32) -> Option<f32> {
        let window = self.total_time - self.report_window_start;
        if window < interval || window <= 0.0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let fps = self.report_window_frames as f32 / window;
        self.report_window_start = self.total_time;
        self.report_window_frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fps_report_waits_for_interval() {
        let mut timer = FrameTimer::new();
        for _ in 0..30 {
            timer.advance(0.025);
        }
        assert!(timer.take_fps_report(1.0).is_none());

        for _ in 0..20 {
            timer.advance(0.025);
        }
        let fps = timer.take_fps_report(1.0).expect("interval elapsed");
        assert_relative_eq!(fps, 40.0, epsilon = 0.1);
        assert_eq!(timer.frame_count(), 50);

        // A new window starts after each report
        assert!(timer.take_fps_report(1.0).is_none());
    }
}
