use web_time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Milliseconds since the clock was created.
    ///
    /// Same unit and origin semantics as a browser `DOMHighResTimeStamp`.
    pub timestamp_ms: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Used by hosts whose scheduler does not hand out a frame timestamp.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            frame_index: 0,
        }
    }

    /// Milliseconds elapsed since the clock was created, without advancing it.
    pub fn elapsed_ms(&self) -> f64 {
        Instant::now()
            .saturating_duration_since(self.origin)
            .as_secs_f64()
            * 1000.0
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let ft = FrameTime {
            timestamp_ms: self.elapsed_ms(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
