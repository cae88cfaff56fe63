//! Scoring module - placement points and the perfect streak
//!
//! - A perfect placement earns `perfect_base + streak * perfect_streak_bonus`
//!   and extends the streak.
//! - A trimmed placement earns `trim_points` and resets the streak.
//! - A miss earns nothing; the run ends, so the streak is left as it was.

use crate::rules::Ruleset;
use crate::types::Placement;

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    /// Streak after this placement.
    pub streak: u32,
}

/// Points for a perfect placement given the streak before it.
pub fn perfect_points(streak: u32, rules: &Ruleset) -> u32 {
    rules
        .perfect_base
        .saturating_add(streak.saturating_mul(rules.perfect_streak_bonus))
}

/// Score a placement given the streak before it.
pub fn score_placement(placement: Placement, streak: u32, rules: &Ruleset) -> ScoreResult {
    match placement {
        Placement::Perfect => ScoreResult {
            points: perfect_points(streak, rules),
            streak: streak.saturating_add(1),
        },
        Placement::Trimmed => ScoreResult {
            points: rules.trim_points,
            streak: 0,
        },
        Placement::Missed => ScoreResult { points: 0, streak },
    }
}

/// Whether a finished run's score deserves the "new best" banner.
///
/// `best` must already include this run.
pub fn is_new_best(score: u32, best: u32) -> bool {
    score > 0 && score >= best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Variant;

    #[test]
    fn perfect_scales_with_streak() {
        let rules = Variant::StackSlide.ruleset();
        assert_eq!(perfect_points(0, &rules), 50);
        assert_eq!(perfect_points(1, &rules), 60);
        assert_eq!(perfect_points(5, &rules), 100);
    }

    #[test]
    fn trimmed_resets_streak() {
        let rules = Variant::StackSlide.ruleset();
        let r = score_placement(Placement::Trimmed, 4, &rules);
        assert_eq!(r, ScoreResult { points: 10, streak: 0 });
    }

    #[test]
    fn perfect_extends_streak() {
        let rules = Variant::StackSlide.ruleset();
        let r = score_placement(Placement::Perfect, 2, &rules);
        assert_eq!(r, ScoreResult { points: 70, streak: 3 });
    }

    #[test]
    fn miss_scores_nothing() {
        let rules = Variant::Precision.ruleset();
        let r = score_placement(Placement::Missed, 2, &rules);
        assert_eq!(r, ScoreResult { points: 0, streak: 2 });
    }

    #[test]
    fn new_best_requires_positive_score() {
        assert!(!is_new_best(0, 0));
        assert!(is_new_best(40, 40));
        assert!(!is_new_best(30, 40));
    }
}
