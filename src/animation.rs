/// Sprite-sheet frame timing shared by every animated entity.

/// What happens after the last frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    /// Wrap back to frame 0.
    Loop,
    /// Keep counting past `max_frame`; the owner decides when it is done.
    Once,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClock {
    pub frame: u32,
    pub max_frame: u32,
    /// Sprite-sheet row.
    pub row: u32,
    pub playback: Playback,
    interval_ms: f64,
    timer_ms: f64,
}

impl AnimationClock {
    pub fn new(fps: f64, max_frame: u32, playback: Playback) -> Self {
        AnimationClock {
            frame: 0,
            max_frame,
            row: 0,
            playback,
            interval_ms: 1000.0 / fps,
            timer_ms: 0.0,
        }
    }

    /// Restart on a new row with a new frame bound.
    pub fn reset(&mut self, max_frame: u32, row: u32) {
        self.frame = 0;
        self.max_frame = max_frame;
        self.row = row;
    }

    /// Advance the timer by `delta_ms`.  Returns `true` on the tick that
    /// moves to the next frame.
    ///
    /// The frame changes only once the accumulated time has already passed
    /// the interval, so the delta of the advancing tick is discarded.
    pub fn tick(&mut self, delta_ms: f64) -> bool {
        if self.timer_ms > self.interval_ms {
            self.timer_ms = 0.0;
            self.frame = match self.playback {
                Playback::Loop if self.frame >= self.max_frame => 0,
                _ => self.frame + 1,
            };
            true
        } else {
            self.timer_ms += delta_ms.max(0.0);
            false
        }
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.max_frame
    }

    pub fn is_past_end(&self) -> bool {
        self.frame > self.max_frame
    }
}
