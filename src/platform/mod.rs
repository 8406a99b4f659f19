//! Host-facing plumbing: logging setup and frame pacing

/// Initialize the `log` backend for the current platform. Safe to call more
/// than once.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::try_init();
    }
}

/// Frame admission at a fixed target rate.
///
/// Frames arriving faster than the target are skipped, not accumulated, so
/// the simulation never runs ahead of the target rate. Oversized deltas pass
/// straight through to the integrators: a host stalled for seconds (e.g. a
/// backgrounded tab) can tunnel the body through thin terrain. Call
/// [`FramePacer::reset`] when resuming to avoid exactly that.
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_ms: f64,
    last_ms: f64,
}

impl FramePacer {
    pub fn new(target_fps: f64) -> Self {
        Self {
            frame_ms: 1000.0 / target_fps,
            last_ms: 0.0,
        }
    }

    /// Feed a host timestamp in milliseconds. `Some(dt)` admits the frame
    /// with its delta in seconds; `None` coalesces an early frame.
    pub fn admit(&mut self, now_ms: f64) -> Option<f32> {
        let delta_ms = now_ms - self.last_ms;
        if delta_ms < self.frame_ms {
            return None;
        }
        // Snap to the frame grid so drift does not accumulate.
        self.last_ms = now_ms - (now_ms % self.frame_ms);
        Some((delta_ms / 1000.0) as f32)
    }

    /// Re-anchor after a pause so the next delta is not the pause length.
    pub fn reset(&mut self, now_ms: f64) {
        self.last_ms = now_ms;
    }
}
