//! Horizontal interval arithmetic for blocks.

/// A horizontal extent `[left, left + width)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    pub left: f32,
    pub width: f32,
}

impl Span {
    pub const fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Signed overlap length with `other`.
    ///
    /// Zero when the spans only touch, negative when there is a gap.
    pub fn overlap(&self, other: &Span) -> f32 {
        self.right().min(other.right()) - self.left.max(other.left)
    }

    /// The shared part of both spans, if it has positive width.
    pub fn intersection(&self, other: &Span) -> Option<Span> {
        let width = self.overlap(other);
        if width <= 0.0 {
            return None;
        }
        Some(Span::new(self.left.max(other.left), width))
    }

    /// Parts of `self` sticking out past `base` on the left and on the right.
    pub fn overhangs(&self, base: &Span) -> (Option<Span>, Option<Span>) {
        let left = (self.left < base.left).then(|| {
            let end = self.right().min(base.left);
            Span::new(self.left, end - self.left)
        });
        let right = (self.right() > base.right()).then(|| {
            let start = self.left.max(base.right());
            Span::new(start, self.right() - start)
        });
        (left, right)
    }

    /// Same span moved by `dx`.
    pub fn shifted(&self, dx: f32) -> Span {
        Span::new(self.left + dx, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_of_nested_and_disjoint_spans() {
        let a = Span::new(100.0, 120.0);
        assert_eq!(a.overlap(&Span::new(110.0, 50.0)), 50.0);
        assert_eq!(a.overlap(&Span::new(220.0, 40.0)), 0.0);
        assert_eq!(a.overlap(&Span::new(0.0, 50.0)), -50.0);
    }

    #[test]
    fn intersection_requires_positive_width() {
        let a = Span::new(0.0, 100.0);
        assert_eq!(a.intersection(&Span::new(60.0, 100.0)), Some(Span::new(60.0, 40.0)));
        assert_eq!(a.intersection(&Span::new(100.0, 10.0)), None);
    }

    #[test]
    fn overhangs_on_both_sides() {
        let wide = Span::new(0.0, 100.0);
        let base = Span::new(20.0, 50.0);
        let (l, r) = wide.overhangs(&base);
        assert_eq!(l, Some(Span::new(0.0, 20.0)));
        assert_eq!(r, Some(Span::new(70.0, 30.0)));
    }

    #[test]
    fn overhang_of_disjoint_span_is_clipped_to_itself() {
        let block = Span::new(0.0, 30.0);
        let base = Span::new(100.0, 50.0);
        let (l, r) = block.overhangs(&base);
        assert_eq!(l, Some(block));
        assert_eq!(r, None);
    }

    #[test]
    fn no_overhang_when_contained() {
        let block = Span::new(30.0, 10.0);
        let base = Span::new(20.0, 50.0);
        assert_eq!(block.overhangs(&base), (None, None));
    }
}
