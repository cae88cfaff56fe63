//! Drop resolver - decides how the sliding block lands
//!
//! Works purely in world coordinates: the caller applies the tower offset to
//! the top block before asking, and converts the placed span back to
//! tower-relative coordinates afterwards.

use arrayvec::ArrayVec;

use crate::geometry::Span;
use crate::rules::Ruleset;
use crate::types::Placement;

/// Outcome of dropping `active` onto `top`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub placement: Placement,
    /// Signed overlap between the two spans.
    pub overlap: f32,
    /// Span of the new stack block; `None` on a miss.
    pub placed: Option<Span>,
    /// Parts of the active block that fall away.
    pub debris: ArrayVec<Span, 2>,
}

/// Classify a drop and compute the resulting geometry.
pub fn resolve_drop(active: Span, top: Span, rules: &Ruleset) -> Resolution {
    let overlap = active.overlap(&top);
    let mut debris = ArrayVec::new();

    if overlap <= rules.miss_threshold {
        debris.push(active);
        return Resolution {
            placement: Placement::Missed,
            overlap,
            placed: None,
            debris,
        };
    }

    if rules.perfect.is_perfect(overlap, top.width) {
        return Resolution {
            placement: Placement::Perfect,
            overlap,
            placed: Some(top),
            debris,
        };
    }

    let (left, right) = active.overhangs(&top);
    debris.extend(left.into_iter().chain(right));

    Resolution {
        placement: Placement::Trimmed,
        overlap,
        placed: active.intersection(&top),
        debris,
    }
}
