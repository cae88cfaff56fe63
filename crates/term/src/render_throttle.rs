//! Redraw throttling for frames that are not animating.
//!
//! While the block slides or debris falls every frame is drawn. Menu, pause
//! and game-over screens only change on input, so an unchanged fingerprint is
//! redrawn at a slow heartbeat instead.

/// Default minimum interval between redraws of an unchanged static frame.
pub const DEFAULT_STATIC_INTERVAL_MS: u64 = 250;

#[derive(Debug, Clone, Copy)]
struct LastDraw {
    at_ms: u64,
    fingerprint: u64,
}

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    static_interval_ms: u64,
    last: Option<LastDraw>,
}

impl RenderThrottle {
    pub fn new(static_interval_ms: u64) -> Self {
        Self {
            static_interval_ms,
            last: None,
        }
    }

    /// Returns true when a frame should be drawn now, and records it.
    ///
    /// Animating frames always draw. A static frame draws when its
    /// fingerprint changed or the heartbeat interval has elapsed.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let due = match self.last {
            None => true,
            Some(_) if !is_static => true,
            Some(last) => {
                last.fingerprint != fingerprint
                    || now_ms.saturating_sub(last.at_ms) >= self.static_interval_ms
            }
        };
        if due {
            self.last = Some(LastDraw {
                at_ms: now_ms,
                fingerprint,
            });
        }
        due
    }

    /// Force the next call to render (after a resize, for example).
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for RenderThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_STATIC_INTERVAL_MS)
    }
}
