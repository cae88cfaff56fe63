//! Game state module - manages the complete game state
//!
//! This module ties together all core components: rules, motion, the drop
//! resolver, scoring, debris and cues. It owns the `Menu → Playing → Dead`
//! lifecycle and the fixed-timestep integrators.

use arrayvec::ArrayVec;

use crate::cue::place_freq;
use crate::debris::{Debris, DebrisField};
use crate::geometry::Span;
use crate::motion::{block_step, Slider};
use crate::resolve::{resolve_drop, Resolution};
use crate::rng::SimpleRng;
use crate::rules::{Ruleset, RulesError};
use crate::scoring::{is_new_best, score_placement};
use crate::types::*;

/// Stack capacity reserved up front so ordinary runs never reallocate.
const STACK_RESERVE: usize = 64;

/// Longest stretch of time a single `tick` simulates; anything beyond is dropped.
pub const MAX_CATCH_UP_MS: u32 = 1_000;

/// Palette index for a block id.
pub fn color_for(id: u32) -> u8 {
    (id % PALETTE.len() as u32) as u8
}

/// A block resting on the stack, in tower-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub id: u32,
    pub x: f32,
    pub width: f32,
    pub color: u8,
}

impl Block {
    pub fn span(&self) -> Span {
        Span::new(self.x, self.width)
    }
}

/// The block currently sliding above the stack.
///
/// Its horizontal position lives in the motion integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveBlock {
    pub id: u32,
    pub width: f32,
    pub color: u8,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    rules: Ruleset,
    rng: SimpleRng,
    seed: u32,
    phase: Phase,
    paused: bool,
    /// Placed blocks, base first.
    stack: Vec<Block>,
    active: Option<ActiveBlock>,
    /// Horizontal motion of the active block (world x of its left edge).
    slider: Slider,
    /// Horizontal offset of the whole tower.
    sway: Slider,
    debris: DebrisField,
    score: u32,
    best: u32,
    streak: u32,
    new_best: bool,
    /// Placement-driven slide speed (before the height bonus).
    speed: f32,
    block_timer_ms: u32,
    sway_timer_ms: u32,
    debris_timer_ms: u32,
    /// Monotonic run id (increments on every start after the first).
    episode_id: u32,
    started_once: bool,
    /// Last drop event (consumed by observers).
    last_event: Option<DropEvent>,
    cues: ArrayVec<Cue, MAX_CUES>,
}

impl GameState {
    /// Create a new game in the menu with the default rules
    pub fn new(seed: u32) -> Self {
        Self::with_rules(seed, Ruleset::default())
    }

    /// Create a new game in the menu, refusing rules that fail validation.
    pub fn try_with_rules(seed: u32, rules: Ruleset) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self::with_rules(seed, rules))
    }

    /// Create a new game in the menu with the given rules
    ///
    /// The rules are trusted as-is; the presets always validate. Use
    /// [`GameState::try_with_rules`] for rules built at runtime.
    pub fn with_rules(seed: u32, rules: Ruleset) -> Self {
        Self {
            rules,
            rng: SimpleRng::new(seed),
            seed,
            phase: Phase::Menu,
            paused: false,
            stack: Vec::with_capacity(STACK_RESERVE),
            active: None,
            slider: Slider::default(),
            sway: Slider::default(),
            debris: DebrisField::new(),
            score: 0,
            best: 0,
            streak: 0,
            new_best: false,
            speed: rules.base_speed,
            block_timer_ms: 0,
            sway_timer_ms: 0,
            debris_timer_ms: 0,
            episode_id: 0,
            started_once: false,
            last_event: None,
            cues: ArrayVec::new(),
        }
    }

    /// Start a fresh run: base block centred, first block sliding in from the left.
    ///
    /// Falling debris from the previous run is discarded; the best score is kept.
    pub fn start(&mut self) {
        if self.started_once {
            self.episode_id = self.episode_id.wrapping_add(1);
        }
        self.started_once = true;

        let base = self.rules.base_width;
        self.stack.clear();
        self.stack.push(Block {
            id: 0,
            x: GAME_WIDTH / 2.0 - base / 2.0,
            width: base,
            color: color_for(0),
        });
        self.active = Some(ActiveBlock {
            id: 1,
            width: base,
            color: color_for(1),
        });
        self.slider = Slider::new(0.0, true, 0.0, (GAME_WIDTH - base).max(0.0));

        let amplitude = self.rules.sway.map(|s| s.amplitude).unwrap_or(0.0);
        self.sway = Slider::new(0.0, true, -amplitude, amplitude);

        self.debris.clear();
        self.cues.clear();
        self.score = 0;
        self.streak = 0;
        self.new_best = false;
        self.speed = self.rules.base_speed;
        self.block_timer_ms = 0;
        self.sway_timer_ms = 0;
        self.debris_timer_ms = 0;
        self.paused = false;
        self.last_event = None;
        self.phase = Phase::Playing;

        log::info!(
            "run {} started (rules={}, seed={})",
            self.episode_id,
            self.rules.name,
            self.seed
        );
    }

    pub fn rules(&self) -> &Ruleset {
        &self.rules
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::Dead
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Whether the last finished run set (or tied) the best score.
    pub fn new_best(&self) -> bool {
        self.new_best
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Placed blocks, base first.
    pub fn stack(&self) -> &[Block] {
        &self.stack
    }

    /// Blocks placed by the player (the base block does not count).
    pub fn height(&self) -> u32 {
        self.stack.len().saturating_sub(1) as u32
    }

    pub fn active(&self) -> Option<ActiveBlock> {
        self.active
    }

    /// World span of the sliding block.
    pub fn active_span(&self) -> Option<Span> {
        self.active.map(|a| Span::new(self.slider.pos(), a.width))
    }

    pub fn active_moving_right(&self) -> bool {
        self.slider.moving_right()
    }

    /// Current horizontal displacement of the tower.
    pub fn tower_offset(&self) -> f32 {
        if self.rules.sway.is_some() {
            self.sway.pos()
        } else {
            0.0
        }
    }

    /// Downward scroll applied to the stack once it outgrows the lower half.
    pub fn view_offset(&self) -> f32 {
        (self.stack.len() as f32 * BLOCK_HEIGHT - VIEW_SCROLL_START).max(0.0)
    }

    pub fn debris(&self) -> &DebrisField {
        &self.debris
    }

    /// Slide distance per block tick at the current height.
    pub fn block_step(&self) -> f32 {
        block_step(
            self.speed,
            self.stack.len(),
            self.rules.height_speed,
            self.rules.max_step,
        )
    }

    fn sway_step(&self) -> f32 {
        match self.rules.sway {
            Some(sway) => sway.base_speed + self.stack.len() as f32 * sway.height_speed,
            None => 0.0,
        }
    }

    /// Whether the next `tick` can change what is on screen.
    pub fn is_animating(&self) -> bool {
        !self.paused && (self.phase == Phase::Playing || !self.debris.is_empty())
    }

    /// Main game tick - advance every integrator by `elapsed_ms`.
    ///
    /// Each integrator consumes whole periods from its own accumulator, so the
    /// simulation is independent of the frame rate. Returns whether anything moved.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.paused {
            return false;
        }
        let elapsed_ms = elapsed_ms.min(MAX_CATCH_UP_MS);

        let mut moved = false;

        // Debris keeps falling after game over.
        if self.debris.is_empty() {
            self.debris_timer_ms = 0;
        } else {
            self.debris_timer_ms = self.debris_timer_ms.saturating_add(elapsed_ms);
            while self.debris_timer_ms >= DEBRIS_TICK_MS {
                self.debris_timer_ms -= DEBRIS_TICK_MS;
                self.debris.step();
                moved = true;
            }
        }

        if self.phase != Phase::Playing {
            return moved;
        }

        self.block_timer_ms = self.block_timer_ms.saturating_add(elapsed_ms);
        while self.block_timer_ms >= BLOCK_TICK_MS {
            self.block_timer_ms -= BLOCK_TICK_MS;
            if self.active.is_some() {
                let step = self.block_step();
                self.slider.step(step);
                moved = true;
            }
        }

        if self.rules.sway.is_some() {
            self.sway_timer_ms = self.sway_timer_ms.saturating_add(elapsed_ms);
            while self.sway_timer_ms >= SWAY_TICK_MS {
                self.sway_timer_ms -= SWAY_TICK_MS;
                let step = self.sway_step();
                self.sway.step(step);
                moved = true;
            }
        }

        moved
    }

    /// Drop the sliding block onto the stack.
    ///
    /// Returns `None` when there is nothing to drop (not playing, or paused).
    pub fn drop_block(&mut self) -> Option<DropEvent> {
        if self.phase != Phase::Playing || self.paused {
            return None;
        }
        let active = self.active?;
        let top = *self.stack.last()?;

        let offset = self.tower_offset();
        let active_span = Span::new(self.slider.pos(), active.width);
        let Resolution {
            placement,
            overlap,
            placed,
            debris,
        } = resolve_drop(active_span, top.span().shifted(offset), &self.rules);

        for piece in &debris {
            self.debris.spawn(Debris::new(
                piece.left,
                ACTIVE_BLOCK_Y,
                piece.width,
                active.color,
            ));
        }

        let scored = score_placement(placement, self.streak, &self.rules);
        self.score = self.score.saturating_add(scored.points);
        self.streak = scored.streak;

        let mut event = DropEvent {
            placement,
            overlap,
            width: 0.0,
            points: scored.points,
            streak: scored.streak,
            debris: debris.len() as u8,
            game_over: false,
        };

        match placed {
            None => {
                self.push_cue(Cue::Fall);
                self.active = None;
                self.end_run();
                event.game_over = true;
            }
            Some(span) => {
                // A perfect drop snaps to the block below, so reuse its stored x.
                let x = if placement == Placement::Perfect {
                    top.x
                } else {
                    span.left - offset
                };
                self.stack.push(Block {
                    id: active.id,
                    x,
                    width: span.width,
                    color: active.color,
                });
                event.width = span.width;

                if placement == Placement::Perfect {
                    self.push_cue(Cue::Perfect);
                } else {
                    let freq_hz = place_freq(self.rng.next_f32());
                    self.push_cue(Cue::Place { freq_hz });
                }

                if span.width < self.rules.min_width {
                    self.active = None;
                    self.end_run();
                    event.game_over = true;
                } else {
                    self.spawn_next(active.id.wrapping_add(1), span.width);
                }
            }
        }

        log::debug!(
            "drop {}: overlap={:.1} width={:.1} points={} streak={} score={}",
            placement.as_str(),
            overlap,
            event.width,
            event.points,
            event.streak,
            self.score
        );

        self.last_event = Some(event);
        Some(event)
    }

    /// Put the next block at the edge it slides away from.
    fn spawn_next(&mut self, id: u32, width: f32) {
        let moving_right = self.rng.next_bool();
        let max = (GAME_WIDTH - width).max(0.0);
        let x = if moving_right { 0.0 } else { max };

        self.active = Some(ActiveBlock {
            id,
            width,
            color: color_for(id),
        });
        self.slider = Slider::new(x, moving_right, 0.0, max);
        self.block_timer_ms = 0;
        self.speed = (self.speed + self.rules.speed_step).min(self.rules.max_speed);
    }

    fn end_run(&mut self) {
        self.phase = Phase::Dead;
        self.best = self.best.max(self.score);
        self.new_best = is_new_best(self.score, self.best);
        log::info!(
            "run {} over: score={} height={} best={}",
            self.episode_id,
            self.score,
            self.height(),
            self.best
        );
    }

    fn push_cue(&mut self, cue: Cue) {
        log::trace!("cue {:?}", cue);
        if self.cues.is_full() {
            self.cues.remove(0);
        }
        self.cues.push(cue);
    }

    /// Take and clear the last drop event.
    pub fn take_last_event(&mut self) -> Option<DropEvent> {
        self.last_event.take()
    }

    /// Take all queued audio cues, oldest first.
    pub fn take_cues(&mut self) -> ArrayVec<Cue, MAX_CUES> {
        std::mem::take(&mut self.cues)
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Tap => match self.phase {
                Phase::Playing => self.drop_block().is_some(),
                Phase::Menu | Phase::Dead => {
                    self.start();
                    true
                }
            },
            GameAction::Pause => {
                if self.phase != Phase::Playing {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                self.start();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::GameSnapshot) {
        use crate::snapshot::{level_screen_y, BlockSnapshot, DebrisSnapshot, VISIBLE_LEVELS};

        let offset = self.tower_offset();
        let view = self.view_offset();

        out.phase = self.phase;
        out.paused = self.paused;
        out.score = self.score;
        out.best = self.best;
        out.streak = self.streak;
        out.height = self.height();
        out.new_best = self.new_best;
        out.rules_name = self.rules.name;
        out.seed = self.seed;
        out.episode_id = self.episode_id;
        out.speed = self.block_step();
        out.tower_offset = offset;
        out.view_offset = view;

        let n = self.stack.len();
        let first = (0..n)
            .find(|&i| level_screen_y(i, view) < GAME_HEIGHT)
            .unwrap_or(n)
            .max(n.saturating_sub(VISIBLE_LEVELS));
        out.stack.clear();
        for (i, b) in self.stack.iter().enumerate().skip(first) {
            out.stack.push(BlockSnapshot {
                level: i as u32,
                x: b.x + offset,
                y: level_screen_y(i, view),
                width: b.width,
                color: b.color,
            });
        }

        let playing = self.phase == Phase::Playing;
        out.active = match (playing, self.active) {
            (true, Some(a)) => Some(BlockSnapshot {
                level: n as u32,
                x: self.slider.pos(),
                y: ACTIVE_BLOCK_Y,
                width: a.width,
                color: a.color,
            }),
            _ => None,
        };
        out.guide = match (playing, self.stack.last()) {
            (true, Some(top)) => Some(top.span().shifted(offset)),
            _ => None,
        };

        out.debris.clear();
        for d in self.debris.iter() {
            out.debris.push(DebrisSnapshot {
                x: d.x,
                y: d.y,
                width: d.width,
                rotation: d.rotation,
                color: d.color,
            });
        }

        out.animating = self.is_animating();
    }

    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        let mut s = crate::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
