//! Fixed-rate frame pacing for runtimes without `requestAnimationFrame`.

use std::time::Duration;

use crate::platform::FrameClock;

/// Roughly one 60 Hz display frame.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerClock {
    interval: Duration,
}

impl Default for TimerClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl TimerClock {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameClock for TimerClock {
    async fn next_frame(&self) {
        #[cfg(target_arch = "wasm32")]
        gloo_timers::future::sleep(self.interval).await;
        #[cfg(not(target_arch = "wasm32"))]
        tokio::time::sleep(self.interval).await;
    }
}
