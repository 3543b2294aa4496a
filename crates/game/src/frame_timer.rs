use std::collections::VecDeque;
use std::time::Duration;

/// Rolling window of recent frame durations.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    window: VecDeque<Duration>,
    capacity: usize,
    total: Duration,
}

impl FrameTimer {
    /// A window of at most `capacity` frames. Zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            total: Duration::ZERO,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        if self.window.len() == self.capacity {
            if let Some(oldest) = self.window.pop_front() {
                self.total -= oldest;
            }
        }
        self.window.push_back(dt);
        self.total += dt;
    }

    pub fn count(&self) -> usize {
        self.window.len()
    }

    pub fn average(&self) -> Duration {
        match self.window.len() {
            0 => Duration::ZERO,
            n => self.total / n as u32,
        }
    }

    pub fn max(&self) -> Duration {
        self.window.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.window.iter().copied().min().unwrap_or(Duration::ZERO)
    }

    /// Frames per second implied by the average frame time.
    pub fn fps(&self) -> f64 {
        let avg = self.average().as_secs_f64();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(120)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_timer_reports_zero() {
        let timer = FrameTimer::new(4);
        assert_eq!(timer.count(), 0);
        assert_eq!(timer.average(), Duration::ZERO);
        assert_eq!(timer.fps(), 0.0);
    }

    #[test]
    fn stats_over_window() {
        let mut timer = FrameTimer::new(3);
        timer.record(Duration::from_millis(10));
        timer.record(Duration::from_millis(20));
        timer.record(Duration::from_millis(30));

        assert_eq!(timer.count(), 3);
        assert_eq!(timer.average(), Duration::from_millis(20));
        assert_eq!(timer.max(), Duration::from_millis(30));
        assert_eq!(timer.min(), Duration::from_millis(10));
        assert!((timer.fps() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn oldest_frames_fall_out() {
        let mut timer = FrameTimer::new(2);
        timer.record(Duration::from_millis(10));
        timer.record(Duration::from_millis(20));
        timer.record(Duration::from_millis(30));

        assert_eq!(timer.count(), 2);
        assert_eq!(timer.average(), Duration::from_millis(25));
        assert_eq!(timer.min(), Duration::from_millis(20));
    }
}
