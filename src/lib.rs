//! Stack & Slide (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `stack_slide::{core,input,term,types}` and adds the
//! process-level pieces used by the binary: command-line configuration and
//! file logging.

pub mod config;
pub mod logging;

pub use stack_slide_core as core;
pub use stack_slide_input as input;
pub use stack_slide_term as term;
pub use stack_slide_types as types;
