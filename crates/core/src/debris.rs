//! Debris module - cosmetic falling fragments
//!
//! Trimmed overhangs and missed blocks fall off the screen under constant
//! acceleration while spinning. Storage is a fixed-capacity array so stepping
//! never allocates.

use arrayvec::ArrayVec;

use crate::types::{
    DEBRIS_CULL_Y, DEBRIS_GRAVITY, DEBRIS_INITIAL_VY, DEBRIS_SPIN_DEG, MAX_DEBRIS,
};

/// One falling fragment, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debris {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub color: u8,
    /// Degrees, clockwise.
    pub rotation: f32,
    pub vy: f32,
}

impl Debris {
    pub fn new(x: f32, y: f32, width: f32, color: u8) -> Self {
        Self {
            x,
            y,
            width,
            color,
            rotation: 0.0,
            vy: DEBRIS_INITIAL_VY,
        }
    }

    /// One debris tick: fall, accelerate, spin.
    pub fn step(&mut self) {
        self.y += self.vy;
        self.vy += DEBRIS_GRAVITY;
        self.rotation += DEBRIS_SPIN_DEG;
    }

    pub fn is_off_screen(&self) -> bool {
        self.y >= DEBRIS_CULL_Y
    }
}

/// All live fragments, oldest first.
#[derive(Debug, Clone, Default)]
pub struct DebrisField {
    pieces: ArrayVec<Debris, MAX_DEBRIS>,
}

impl DebrisField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment, evicting the oldest when full.
    pub fn spawn(&mut self, debris: Debris) {
        if self.pieces.is_full() {
            self.pieces.remove(0);
        }
        self.pieces.push(debris);
    }

    /// Advance every fragment one tick and drop those that left the screen.
    pub fn step(&mut self) {
        for p in self.pieces.iter_mut() {
            p.step();
        }
        self.pieces.retain(|p| !p.is_off_screen());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Debris> {
        self.pieces.iter()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_applies_constant_acceleration() {
        let mut d = Debris::new(10.0, 80.0, 20.0, 3);
        d.step();
        assert_eq!(d.y, 82.0);
        assert_eq!(d.vy, 2.5);
        assert_eq!(d.rotation, 5.0);
        d.step();
        assert_eq!(d.y, 84.5);
        assert_eq!(d.vy, 3.0);
        assert_eq!(d.rotation, 10.0);
    }

    #[test]
    fn fragments_are_culled_below_screen() {
        let mut field = DebrisField::new();
        field.spawn(Debris::new(0.0, 80.0, 10.0, 0));

        let mut ticks = 0;
        while !field.is_empty() {
            field.step();
            ticks += 1;
            assert!(ticks < 100, "debris never left the screen");
        }
        // y(n) = 80 + 2n + 0.25 n (n - 1) first reaches 600 at n = 43.
        assert_eq!(ticks, 43);
    }

    #[test]
    fn full_field_evicts_oldest() {
        let mut field = DebrisField::new();
        for i in 0..MAX_DEBRIS + 3 {
            field.spawn(Debris::new(i as f32, 80.0, 1.0, 0));
        }
        assert_eq!(field.len(), MAX_DEBRIS);
        assert_eq!(field.iter().next().map(|d| d.x), Some(3.0));
    }
}
