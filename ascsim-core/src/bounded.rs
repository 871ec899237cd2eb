use serde::{Deserialize, Serialize};

/// A value clamped to a range (for continuous meters).
/// Used for: suspicion (0 to 3), legitimacy (0 to 2.5), etc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounded {
    value: f64,
    min: f64,
    max: f64,
}

impl Bounded {
    pub fn new(value: f64, min: f64, max: f64) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn get(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn add(&mut self, delta: f64) {
        self.value = (self.value + delta).clamp(self.min, self.max);
    }

    pub fn set(&mut self, value: f64) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Ratio from 0.0 to 1.0.
    /// Returns 0 if max == min.
    pub fn ratio(&self) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (self.value - self.min) / range
    }
}

// Factory functions for the four faction meters.
pub fn new_suspicion() -> Bounded {
    Bounded::new(0.0, 0.0, 3.0)
}

pub fn new_autonomy() -> Bounded {
    Bounded::new(0.0, 0.0, 3.0)
}

pub fn new_legitimacy() -> Bounded {
    Bounded::new(1.0, 0.0, 2.5)
}

pub fn new_hard_power() -> Bounded {
    Bounded::new(0.5, 0.0, 2.5)
}
