use crate::types::Millis;

/// Clock-source contract: monotonic milliseconds since the match began.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Time derived from a frame counter, so animation timing replays exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedStepClock {
    frame_rate: u32,
    frames: u64,
}

impl FixedStepClock {
    pub fn new(frame_rate: u32) -> Self {
        FixedStepClock {
            frame_rate: frame_rate.max(1),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance one frame and return the new time.
    pub fn tick(&mut self) -> Millis {
        self.frames += 1;
        self.now_ms()
    }
}

impl Clock for FixedStepClock {
    fn now_ms(&self) -> Millis {
        self.frames * 1000 / self.frame_rate as u64
    }
}
