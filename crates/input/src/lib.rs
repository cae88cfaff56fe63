//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events into [`crate::types::GameAction`] and
//! provides a tap gate that absorbs terminal auto-repeat (most terminals do
//! not report key releases, so a held key arrives as a stream of presses).

pub mod handler;
pub mod map;

pub use stack_slide_types as types;

pub use handler::TapGate;
pub use map::{handle_key_event, handle_mouse_event, should_quit};
