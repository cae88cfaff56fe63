//! Rules module - tunable constants for each game variant
//!
//! Every variant of the game shares the same simulation and differs only in
//! the numbers collected in [`Ruleset`]: block widths, slide speeds, the
//! perfect-placement predicate and the point values.

use thiserror::Error;

use crate::types::GAME_WIDTH;

/// Predicate deciding whether an overlap counts as a perfect placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerfectRule {
    /// Perfect when `|overlap - top_width| < tolerance`.
    AbsoluteDelta(f32),
    /// Perfect when `overlap / top_width >= fraction`.
    Coverage(f32),
}

impl PerfectRule {
    pub fn is_perfect(&self, overlap: f32, top_width: f32) -> bool {
        match *self {
            PerfectRule::AbsoluteDelta(tol) => (overlap - top_width).abs() < tol,
            PerfectRule::Coverage(frac) => top_width > 0.0 && overlap / top_width >= frac,
        }
    }
}

/// Horizontal sway of the whole tower while playing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwayRules {
    /// Maximum offset to either side.
    pub amplitude: f32,
    /// Step per sway tick with an empty stack.
    pub base_speed: f32,
    /// Extra step per stacked level.
    pub height_speed: f32,
}

/// Complete set of variant constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ruleset {
    pub name: &'static str,
    /// Width of the base block and the first sliding block.
    pub base_width: f32,
    /// Placed blocks narrower than this end the run.
    pub min_width: f32,
    /// Initial slide step per block tick.
    pub base_speed: f32,
    /// Speed gained per successful placement.
    pub speed_step: f32,
    /// Cap on the placement-driven speed.
    pub max_speed: f32,
    /// Extra slide step per stacked level.
    pub height_speed: f32,
    /// Cap on the total slide step per block tick.
    pub max_step: f32,
    /// Overlaps at or below this count as a miss.
    pub miss_threshold: f32,
    pub perfect: PerfectRule,
    pub perfect_base: u32,
    pub perfect_streak_bonus: u32,
    pub trim_points: u32,
    pub sway: Option<SwayRules>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulesError {
    #[error("base width {0} must be in (0, 320]")]
    BaseWidth(f32),
    #[error("min width {min} must be non-negative and below base width {base}")]
    MinWidth { min: f32, base: f32 },
    #[error("speeds must be positive with max speed >= base speed")]
    Speed,
    #[error("miss threshold {0} must be non-negative")]
    MissThreshold(f32),
    #[error("perfect tolerance must be positive (coverage within (0, 1])")]
    Perfect,
    #[error("sway amplitude and speeds must be non-negative")]
    Sway,
}

impl Ruleset {
    /// Check that the constants describe a playable game.
    pub fn validate(&self) -> Result<(), RulesError> {
        if !(self.base_width > 0.0 && self.base_width <= GAME_WIDTH) {
            return Err(RulesError::BaseWidth(self.base_width));
        }
        if !(self.min_width >= 0.0 && self.min_width < self.base_width) {
            return Err(RulesError::MinWidth {
                min: self.min_width,
                base: self.base_width,
            });
        }
        if !(self.base_speed > 0.0
            && self.max_speed >= self.base_speed
            && self.speed_step >= 0.0
            && self.height_speed >= 0.0
            && self.max_step > 0.0)
        {
            return Err(RulesError::Speed);
        }
        if !(self.miss_threshold >= 0.0) {
            return Err(RulesError::MissThreshold(self.miss_threshold));
        }
        let perfect_ok = match self.perfect {
            PerfectRule::AbsoluteDelta(tol) => tol > 0.0,
            PerfectRule::Coverage(frac) => frac > 0.0 && frac <= 1.0,
        };
        if !perfect_ok {
            return Err(RulesError::Perfect);
        }
        if let Some(sway) = self.sway {
            if !(sway.amplitude >= 0.0 && sway.base_speed >= 0.0 && sway.height_speed >= 0.0) {
                return Err(RulesError::Sway);
            }
        }
        Ok(())
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Variant::StackSlide.ruleset()
    }
}

/// Named rule presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Swaying tower, tight absolute tolerance.
    ///
    /// The per-tick block step is capped at 24 units. Without the cap it
    /// grows by 0.3 per level; the cap first bites around level 54.
    #[default]
    StackSlide,
    /// Still tower, slightly faster block, forgiving tolerance.
    Classic,
    /// Coverage-based perfects and a miss threshold.
    Precision,
    /// Wide, slow and gentle.
    Zen,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::StackSlide,
        Variant::Classic,
        Variant::Precision,
        Variant::Zen,
    ];

    /// Parse a variant from its kebab-case name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stack_slide_core::Variant;
    ///
    /// assert_eq!(Variant::from_str("stack-slide"), Some(Variant::StackSlide));
    /// assert_eq!(Variant::from_str("ZEN"), Some(Variant::Zen));
    /// assert_eq!(Variant::from_str("skyscraper"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stack-slide" | "stackslide" => Some(Variant::StackSlide),
            "classic" => Some(Variant::Classic),
            "precision" => Some(Variant::Precision),
            "zen" => Some(Variant::Zen),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::StackSlide => "stack-slide",
            Variant::Classic => "classic",
            Variant::Precision => "precision",
            Variant::Zen => "zen",
        }
    }

    pub fn ruleset(&self) -> Ruleset {
        match self {
            Variant::StackSlide => Ruleset {
                name: "stack-slide",
                base_width: 120.0,
                min_width: 10.0,
                base_speed: 3.0,
                speed_step: 0.1,
                max_speed: 8.0,
                height_speed: 0.3,
                max_step: 24.0,
                miss_threshold: 0.0,
                perfect: PerfectRule::AbsoluteDelta(3.0),
                perfect_base: 50,
                perfect_streak_bonus: 10,
                trim_points: 10,
                sway: Some(SwayRules {
                    amplitude: 30.0,
                    base_speed: 0.5,
                    height_speed: 0.05,
                }),
            },
            Variant::Classic => Ruleset {
                name: "classic",
                base_width: 120.0,
                min_width: 10.0,
                base_speed: 4.0,
                speed_step: 0.15,
                max_speed: 10.0,
                height_speed: 0.2,
                max_step: 24.0,
                miss_threshold: 0.0,
                perfect: PerfectRule::AbsoluteDelta(5.0),
                perfect_base: 25,
                perfect_streak_bonus: 5,
                trim_points: 10,
                sway: None,
            },
            Variant::Precision => Ruleset {
                name: "precision",
                base_width: 100.0,
                min_width: 12.0,
                base_speed: 3.5,
                speed_step: 0.1,
                max_speed: 9.0,
                height_speed: 0.25,
                max_step: 22.0,
                miss_threshold: 4.0,
                perfect: PerfectRule::Coverage(0.97),
                perfect_base: 100,
                perfect_streak_bonus: 20,
                trim_points: 10,
                sway: None,
            },
            Variant::Zen => Ruleset {
                name: "zen",
                base_width: 160.0,
                min_width: 6.0,
                base_speed: 2.0,
                speed_step: 0.05,
                max_speed: 5.0,
                height_speed: 0.1,
                max_step: 10.0,
                miss_threshold: 0.0,
                perfect: PerfectRule::Coverage(0.9),
                perfect_base: 30,
                perfect_streak_bonus: 5,
                trim_points: 5,
                sway: Some(SwayRules {
                    amplitude: 15.0,
                    base_speed: 0.25,
                    height_speed: 0.02,
                }),
            },
        }
    }
}
