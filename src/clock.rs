//! Frame pacing
//!
//! Keeps the loop near the target frame rate by sleeping away whatever is
//! left of each frame, and keeps a rolling window of frame times for the
//! on-demand stats report.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::consts::{MIN_FRAME_DELAY, NUM_FRAME_TIMES, TARGET_FRAME_TIME};

/// Frame-time summary over the sample window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub target: Duration,
    pub average: Duration,
    pub max: Duration,
    pub samples: usize,
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "target {:.3} ms, average {:.3} ms, max {:.3} ms over {} frames",
            self.target.as_secs_f64() * 1000.0,
            self.average.as_secs_f64() * 1000.0,
            self.max.as_secs_f64() * 1000.0,
            self.samples
        )
    }
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    target: Duration,
    samples: VecDeque<Duration>,
    last_frame: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(TARGET_FRAME_TIME))
    }
}

impl FrameClock {
    pub fn new(target: Duration) -> Self {
        Self {
            target,
            samples: VecDeque::with_capacity(NUM_FRAME_TIMES),
            last_frame: None,
        }
    }

    /// Clock for `fps` frames per second; nonsense rates fall back to 60
    pub fn from_fps(fps: f64) -> Self {
        if fps.is_finite() && fps > 0.0 {
            Self::new(Duration::from_secs_f64(1.0 / fps))
        } else {
            log::warn!("Invalid target frame rate {}, using 60", fps);
            Self::default()
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    /// Record one frame's duration and return how long to sleep before the
    /// next one. The delay never drops below `MIN_FRAME_DELAY`.
    pub fn record_frame(&mut self, actual: Duration) -> Duration {
        if self.samples.len() == NUM_FRAME_TIMES {
            self.samples.pop_front();
        }
        self.samples.push_back(actual);

        let floor = Duration::from_secs_f64(MIN_FRAME_DELAY);
        self.target.saturating_sub(actual).max(floor)
    }

    /// Sleep off the rest of the current frame
    pub fn pace(&mut self) {
        if let Some(last) = self.last_frame {
            let delay = self.record_frame(last.elapsed());
            std::thread::sleep(delay);
        }
        self.last_frame = Some(Instant::now());
    }

    pub fn stats(&self) -> FrameStats {
        let total: Duration = self.samples.iter().sum();
        let count = self.samples.len();
        let average = match u32::try_from(count) {
            Ok(n) if n > 0 => total / n,
            _ => Duration::ZERO,
        };

        FrameStats {
            target: self.target,
            average,
            max: self.samples.iter().copied().max().unwrap_or_default(),
            samples: count,
        }
    }
}
