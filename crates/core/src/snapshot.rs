//! Render-ready copy of the game state in screen coordinates.

use arrayvec::ArrayVec;

use crate::geometry::Span;
use crate::types::{Phase, BLOCK_HEIGHT, GAME_HEIGHT, MAX_DEBRIS};

/// Maximum number of stack levels carried in a snapshot.
pub const VISIBLE_LEVELS: usize = 24;

/// Screen y (top edge) of stack level `level` under the given view offset.
pub fn level_screen_y(level: usize, view_offset: f32) -> f32 {
    GAME_HEIGHT - (level as f32 + 1.0) * BLOCK_HEIGHT + view_offset
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockSnapshot {
    pub level: u32,
    /// Screen x of the left edge (tower offset applied).
    pub x: f32,
    /// Screen y of the top edge.
    pub y: f32,
    pub width: f32,
    pub color: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebrisSnapshot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub rotation: f32,
    pub color: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub paused: bool,
    pub score: u32,
    pub best: u32,
    pub streak: u32,
    pub height: u32,
    pub new_best: bool,
    pub rules_name: &'static str,
    pub seed: u32,
    pub episode_id: u32,
    /// Slide distance per block tick.
    pub speed: f32,
    pub tower_offset: f32,
    pub view_offset: f32,
    /// Visible stack levels, bottom to top.
    pub stack: ArrayVec<BlockSnapshot, VISIBLE_LEVELS>,
    pub active: Option<BlockSnapshot>,
    /// Screen span of the top block, drawn as a guide on the active row.
    pub guide: Option<Span>,
    pub debris: ArrayVec<DebrisSnapshot, MAX_DEBRIS>,
    pub animating: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.phase = Phase::Menu;
        self.paused = false;
        self.score = 0;
        self.best = 0;
        self.streak = 0;
        self.height = 0;
        self.new_best = false;
        self.rules_name = "";
        self.seed = 0;
        self.episode_id = 0;
        self.speed = 0.0;
        self.tower_offset = 0.0;
        self.view_offset = 0.0;
        self.stack.clear();
        self.active = None;
        self.guide = None;
        self.debris.clear();
        self.animating = false;
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing && !self.paused
    }

    /// Hash of the fields that change between otherwise static frames.
    ///
    /// Positions are left out: they only move while `animating` is set.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new();
        h.write(&[self.phase as u8, self.paused as u8, self.new_best as u8]);
        h.write(&self.score.to_le_bytes());
        h.write(&self.best.to_le_bytes());
        h.write(&self.streak.to_le_bytes());
        h.write(&self.height.to_le_bytes());
        h.write(&self.episode_id.to_le_bytes());
        h.write(&(self.debris.len() as u32).to_le_bytes());
        h.write(self.rules_name.as_bytes());
        h.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Menu,
            paused: false,
            score: 0,
            best: 0,
            streak: 0,
            height: 0,
            new_best: false,
            rules_name: "",
            seed: 0,
            episode_id: 0,
            speed: 0.0,
            tower_offset: 0.0,
            view_offset: 0.0,
            stack: ArrayVec::new(),
            active: None,
            guide: None,
            debris: ArrayVec::new(),
            animating: false,
        }
    }
}

/// FNV-1a 64-bit.
struct Fnv1a64 {
    state: u64,
}

impl Fnv1a64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x00000100000001B3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }

    fn finish(&self) -> u64 {
        self.state
    }
}
