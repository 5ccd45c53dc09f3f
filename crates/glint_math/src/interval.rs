/// A range of ray parameters `t` searched for intersections.
///
/// Candidate roots are tested with [`Interval::contains_left_open`], so a hit
/// exactly at `min` is rejected and a hit exactly at `max` is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is within (min, max].
    pub fn contains_left_open(&self, x: f32) -> bool {
        self.min < x && x <= self.max
    }

    /// Same lower bound, new upper bound.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}
