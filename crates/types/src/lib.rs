//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core simulation, terminal rendering, input mapping).
//!
//! # Play Field
//!
//! World coordinates are logical "pixels" with the origin at the top-left of
//! the visible play field:
//!
//! - **Width**: 320 (`GAME_WIDTH`)
//! - **Height**: 400 (`GAME_HEIGHT`)
//! - **Stack level height**: 20 (`BLOCK_HEIGHT`)
//! - **Sliding block row**: y = 80 (`ACTIVE_BLOCK_Y`)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds. Each integrator runs on its own fixed
//! period and is driven from a single frame tick:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 10 | Game loop frame period |
//! | `BLOCK_TICK_MS` | 30 | Sliding block motion step |
//! | `SWAY_TICK_MS` | 50 | Tower sway step |
//! | `DEBRIS_TICK_MS` | 30 | Debris fall step |
//!
//! # Examples
//!
//! ```
//! use stack_slide_types::{GameAction, Phase, GAME_WIDTH};
//!
//! let action = GameAction::from_str("TAP").unwrap();
//! assert_eq!(action, GameAction::Tap);
//! assert_eq!(Phase::Menu.as_str(), "menu");
//! assert_eq!(GAME_WIDTH, 320.0);
//! ```

/// Play field width in world units
pub const GAME_WIDTH: f32 = 320.0;

/// Visible play field height in world units
pub const GAME_HEIGHT: f32 = 400.0;

/// Height of one stack level
pub const BLOCK_HEIGHT: f32 = 20.0;

/// Screen y (top edge) of the sliding block; debris spawns here too
pub const ACTIVE_BLOCK_Y: f32 = 80.0;

/// Debris at or below this screen y is discarded
pub const DEBRIS_CULL_Y: f32 = 600.0;

/// Tower height after which the view starts scrolling down
pub const VIEW_SCROLL_START: f32 = 200.0;

/// Game loop frame period (10ms)
pub const FRAME_MS: u32 = 10;

/// Sliding block integrator period (30ms)
pub const BLOCK_TICK_MS: u32 = 30;

/// Tower sway integrator period (50ms)
pub const SWAY_TICK_MS: u32 = 50;

/// Debris integrator period (30ms)
pub const DEBRIS_TICK_MS: u32 = 30;

/// Vertical velocity of a freshly spawned debris fragment (per debris tick)
pub const DEBRIS_INITIAL_VY: f32 = 2.0;

/// Debris velocity increment per debris tick
pub const DEBRIS_GRAVITY: f32 = 0.5;

/// Debris rotation increment per debris tick, in degrees
pub const DEBRIS_SPIN_DEG: f32 = 5.0;

/// Maximum number of live debris fragments
pub const MAX_DEBRIS: usize = 32;

/// Maximum number of queued audio cues between drains
pub const MAX_CUES: usize = 8;

/// Block colours as 0xRRGGBB, cycled by block id
pub const PALETTE: [u32; 10] = [
    0xef4444, 0xf97316, 0xeab308, 0x22c55e, 0x14b8a6, 0x3b82f6, 0x8b5cf6, 0xec4899, 0xf43f5e,
    0x06b6d4,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_field_defaults() {
        assert_eq!(GAME_WIDTH, 320.0);
        assert_eq!(GAME_HEIGHT, 400.0);
        assert_eq!(BLOCK_HEIGHT, 20.0);
        assert_eq!(ACTIVE_BLOCK_Y, 80.0);
        assert_eq!(BLOCK_TICK_MS, 30);
        assert_eq!(SWAY_TICK_MS, 50);
        assert_eq!(DEBRIS_TICK_MS, 30);
        assert_eq!(PALETTE.len(), 10);
    }

    #[test]
    fn action_round_trips_through_str() {
        for action in [GameAction::Tap, GameAction::Pause, GameAction::Restart] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
        assert_eq!(GameAction::from_str("jump"), None);
    }
}

/// Top-level game phase
///
/// The cycle is `Menu → Playing → Dead`, and a tap from `Dead` starts a
/// fresh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    Dead,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Playing => "playing",
            Phase::Dead => "dead",
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// Keyboard, mouse and any scripted driver all funnel into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Drop the sliding block while playing, otherwise start a run
    Tap,
    /// Toggle pause while playing
    Pause,
    /// Start a fresh run from any phase
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stack_slide_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("pause"), Some(GameAction::Pause));
    /// assert_eq!(GameAction::from_str("Restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tap" => Some(GameAction::Tap),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Tap => "tap",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// How a dropped block landed on the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Aligned within tolerance; snapped to the block below
    Perfect,
    /// Partial overlap; overhangs were cut off
    Trimmed,
    /// No usable overlap; the run ends
    Missed,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Perfect => "perfect",
            Placement::Trimmed => "trimmed",
            Placement::Missed => "missed",
        }
    }
}

/// Core-side event emitted after every drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropEvent {
    pub placement: Placement,
    /// Raw horizontal overlap with the block below (may be negative).
    pub overlap: f32,
    /// Width of the placed block (0 on a miss).
    pub width: f32,
    pub points: u32,
    /// Perfect streak after this drop.
    pub streak: u32,
    /// Number of debris fragments spawned.
    pub debris: u8,
    pub game_over: bool,
}

/// Oscillator shape for a synthesized tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Sawtooth,
}

/// One short synthesized tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub waveform: Waveform,
    pub duration_ms: u32,
    /// Offset from the cue start.
    pub delay_ms: u32,
}

/// Audio feedback requested by the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    /// Ordinary (trimmed) placement
    Place { freq_hz: f32 },
    /// Perfect placement chime
    Perfect,
    /// Block fell off the stack
    Fall,
}
