use std::time::{Duration, Instant};

/// Per-frame wall clock: measures the elapsed time the scene update consumes
/// and optionally holds each frame to a target rate.
pub struct FrameClock {
    frame_start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_start: Instant::now(),
        }
    }

    /// Time since the previous restart; begins the next frame.
    pub fn restart(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.frame_start;
        self.frame_start = now;
        elapsed
    }

    /// Sleep out the remainder of the frame when a framerate cap is set.
    pub fn pace(&self, framerate: Option<u32>) {
        let Some(framerate) = framerate else { return };
        if framerate == 0 {
            return;
        }

        const ACCURACY: Duration = Duration::from_micros(100);
        let limit = Duration::from_secs_f32(1.0 / framerate as f32);
        let spent = self.frame_start.elapsed();

        if let Some(sleep) = limit.checked_sub(spent + ACCURACY) {
            std::thread::sleep(sleep);
        }
        while self.frame_start.elapsed() < limit {
            std::thread::yield_now();
        }
    }
}
