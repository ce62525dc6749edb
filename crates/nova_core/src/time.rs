//! Frame timing passed explicitly into per-frame updates

/// Per-frame time context.
///
/// The caller owns the clock and advances this once per frame; systems read
/// it instead of a process-wide time singleton.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame (unscaled)
    pub delta: f32,
    /// Seconds since the first frame (unscaled)
    pub total: f32,
    /// Frames advanced so far
    pub frame: u64,
    /// Multiplier for slow-motion / fast-forward (1.0 = normal)
    pub time_scale: f32,
}

impl FrameTime {
    pub const fn new() -> Self {
        Self {
            delta: 0.0,
            total: 0.0,
            frame: 0,
            time_scale: 1.0,
        }
    }

    /// A context for a single frame of `delta` seconds
    pub fn from_delta(delta: f32) -> Self {
        let mut time = Self::new();
        time.advance(delta);
        time
    }

    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }

    /// Record a frame of `delta` seconds of wall-clock time
    pub fn advance(&mut self, delta: f32) {
        self.delta = delta;
        self.total += delta;
        self.frame += 1;
    }

    /// Delta time with the time scale applied
    #[inline]
    pub fn scaled_delta(&self) -> f32 {
        self.delta * self.time_scale
    }
}

impl Default for FrameTime {
    fn default() -> Self {
        Self::new()
    }
}
