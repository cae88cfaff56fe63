//! Motion module - bouncing one-dimensional integrator
//!
//! Both the sliding block and the tower sway move back and forth between two
//! bounds at a speed chosen by the caller on every step.

/// Position bouncing between `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pos: f32,
    /// +1.0 moving towards `max`, -1.0 towards `min`.
    dir: f32,
    min: f32,
    max: f32,
}

impl Slider {
    pub fn new(pos: f32, moving_right: bool, min: f32, max: f32) -> Self {
        Self {
            pos,
            dir: if moving_right { 1.0 } else { -1.0 },
            min,
            max,
        }
    }

    pub fn pos(&self) -> f32 {
        self.pos
    }

    pub fn moving_right(&self) -> bool {
        self.dir > 0.0
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Advance by `amount`, clamping and reversing at either bound.
    pub fn step(&mut self, amount: f32) {
        let next = self.pos + self.dir * amount;
        if next > self.max {
            self.dir = -1.0;
            self.pos = self.max;
        } else if next < self.min {
            self.dir = 1.0;
            self.pos = self.min;
        } else {
            self.pos = next;
        }
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new(0.0, true, 0.0, 0.0)
    }
}

/// Slide step per block tick: grows with stack height, capped at `max_step`.
pub fn block_step(speed: f32, levels: usize, height_speed: f32, max_step: f32) -> f32 {
    (speed + levels as f32 * height_speed).min(max_step)
}
