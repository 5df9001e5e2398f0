/// Window `[min, max]` of accepted ray parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Nothing fits inside (`min > max`).
    pub const EMPTY: Interval = Interval::new(f64::INFINITY, f64::NEG_INFINITY);

    /// Every finite value fits inside.
    pub const UNIVERSE: Interval = Interval::new(f64::NEG_INFINITY, f64::INFINITY);

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the window; negative for an empty one.
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Closed membership: `min <= x <= max`.
    pub fn contains(&self, x: f64) -> bool {
        (self.min..=self.max).contains(&x)
    }

    /// Open membership: `min < x < max`.
    ///
    /// Hit tests use this one, so a window with `min == max` accepts
    /// nothing.
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Pull `x` into the window. NaN is passed through unchanged.
    pub fn clamp(&self, x: f64) -> f64 {
        if x < self.min {
            self.min
        } else if x > self.max {
            self.max
        } else {
            x
        }
    }

    /// Copy with `max` replaced, for shrinking a closest-hit search.
    pub fn with_max(&self, max: f64) -> Interval {
        Interval::new(self.min, max)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}
