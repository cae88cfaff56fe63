//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the stacking rules, state management, and simulation logic.
//! It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed and inputs produce identical runs
//! - **Testable**: Unit tests for every rule and integrator
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: No allocation on the tick and snapshot paths
//!
//! # Module Structure
//!
//! - [`geometry`]: horizontal spans and overlap arithmetic
//! - [`motion`]: bouncing slider used for the active block and the tower sway
//! - [`resolve`]: classifies a drop as perfect, trimmed or missed
//! - [`scoring`]: placement points and the perfect streak
//! - [`debris`]: falling offcuts with gravity and spin
//! - [`cue`]: audio cues expressed as tone sequences
//! - [`rules`]: tunable rulesets and the built-in variants
//! - [`game_state`]: the `Menu → Playing → Dead` lifecycle
//! - [`snapshot`]: render-ready copy of the state in screen coordinates
//!
//! # Example
//!
//! ```
//! use stack_slide_core::GameState;
//! use stack_slide_types::{GameAction, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::Tap); // start from the menu
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! game.tick(300);
//! game.apply_action(GameAction::Tap); // drop the sliding block
//! assert!(game.take_last_event().is_some());
//! ```
//!
//! # Timing
//!
//! The game uses fixed-period integrators fed by one elapsed-time call:
//! - **Block slide**: every 30ms
//! - **Tower sway**: every 50ms
//! - **Debris**: every 30ms, also after the run ends
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with elapsed time.

pub mod cue;
pub mod debris;
pub mod game_state;
pub mod geometry;
pub mod motion;
pub mod resolve;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod snapshot;

pub use stack_slide_types as types;

// Re-export commonly used types for convenience
pub use cue::{cue_duration_ms, tones};
pub use debris::{Debris, DebrisField};
pub use game_state::{color_for, ActiveBlock, Block, GameState, MAX_CATCH_UP_MS};
pub use geometry::Span;
pub use motion::{block_step, Slider};
pub use resolve::{resolve_drop, Resolution};
pub use rng::SimpleRng;
pub use rules::{PerfectRule, RulesError, Ruleset, SwayRules, Variant};
pub use scoring::{score_placement, ScoreResult};
pub use snapshot::{BlockSnapshot, DebrisSnapshot, GameSnapshot, VISIBLE_LEVELS};
