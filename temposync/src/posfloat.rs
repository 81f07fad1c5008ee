use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    ops::Deref,
};

/// A finite, strictly-positive `f32`.
///
/// Both `speed` and `sample_rate` (in its `f32` form, used for Hz/period
/// arithmetic) are quantities that break the engine if they're zero,
/// negative, NaN, or infinite. Rather than sprinkle `assert!`s through the
/// driver, invalid values are rejected once, at construction.
#[derive(Clone, Copy, PartialEq)]
pub struct PositiveF32(f32);

impl PositiveF32 {
    /// Try to create a new `PositiveF32` from an `f32`.
    pub fn new(x: f32) -> Result<PositiveF32, &'static str> {
        if !x.is_finite() {
            Err("value must be finite")
        } else if !(x > 0.0) {
            Err("value must be positive")
        } else {
            Ok(PositiveF32(x))
        }
    }
    /// Create a new `PositiveF32` from an `f32`, which you *promise* is
    /// finite and strictly positive.
    ///
    /// # Safety
    ///
    /// `x` must be finite and strictly positive.
    pub const unsafe fn new_unchecked(x: f32) -> PositiveF32 {
        PositiveF32(x)
    }
    pub fn get(&self) -> f32 {
        self.0
    }
}

impl Display for PositiveF32 {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl Debug for PositiveF32 {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl Eq for PositiveF32 {}

impl PartialOrd for PositiveF32 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Same-sign finite f32s have a total ordering.
impl Ord for PositiveF32 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.to_bits().cmp(&other.0.to_bits())
    }
}

impl Deref for PositiveF32 {
    type Target = f32;
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl TryFrom<u32> for PositiveF32 {
    type Error = &'static str;
    fn try_from(value: u32) -> Result<PositiveF32, &'static str> {
        if value == 0 {
            Err("value must be positive")
        } else {
            Ok(PositiveF32(value as f32))
        }
    }
}
