//! Tap gate for terminal environments.
//!
//! Terminals without key-release events deliver a held key as repeated
//! presses. The gate drops taps that arrive too soon after the last accepted
//! one, so holding Space does not machine-gun blocks onto the stack.

/// Default minimum spacing between accepted taps.
pub const DEFAULT_TAP_INTERVAL_MS: u32 = 60;

#[derive(Debug, Clone)]
pub struct TapGate {
    min_interval_ms: u32,
    last_accepted_ms: Option<u64>,
}

impl TapGate {
    pub fn new() -> Self {
        Self::with_interval_ms(DEFAULT_TAP_INTERVAL_MS)
    }

    pub fn with_interval_ms(min_interval_ms: u32) -> Self {
        Self {
            min_interval_ms,
            last_accepted_ms: None,
        }
    }

    pub fn min_interval_ms(&self) -> u32 {
        self.min_interval_ms
    }

    /// Whether a tap at `now_ms` goes through. Rejected taps do not extend
    /// the window.
    pub fn accept(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            if now_ms.saturating_sub(last) < self.min_interval_ms as u64 {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }

    pub fn reset(&mut self) {
        self.last_accepted_ms = None;
    }
}

impl Default for TapGate {
    fn default() -> Self {
        Self::new()
    }
}
