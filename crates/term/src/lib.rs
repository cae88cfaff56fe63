//! Terminal front end for the stacking game.
//!
//! `GameView` paints a [`core::GameSnapshot`] into a plain cell
//! [`FrameBuffer`]; `TerminalRenderer` flushes that buffer through crossterm,
//! re-emitting only the runs of cells that changed since the last frame.
//! `RenderThrottle` decides when a frame is worth drawing at all: the menu,
//! pause and game-over screens sit still, so they redraw on change or on a
//! slow heartbeat.

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use stack_slide_core as core;
pub use stack_slide_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport, FIELD_COLS, FIELD_ROWS};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
