use derive_more::{Add, AddAssign, Display, Div, From, Into, Mul, MulAssign, Sub, SubAssign, Sum};

/// Tolerance used when comparing text sizes that were produced by repeated
/// stepping, so `max - k * step` still compares equal to `min`.
const SIZE_EPSILON: f32 = 1e-3;

/// A length in device pixels, used for text sizes and glyph metrics.
///
/// Placement rectangles live on the integer pixel grid (see [`Rect`](crate::Rect)),
/// while text sizes are fractional because the minimum size is derived from the
/// display density.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    Sum,
    Display,
    From,
    Into,
)]
#[display("{_0}px")]
pub struct Px(pub f32);

impl Px {
    /// Round down to the nearest multiple of `step`. A non-positive step
    /// leaves the value untouched.
    pub fn floor_to_multiple(self, step: Px) -> Px {
        if step.0 <= 0.0 {
            return self;
        }
        Px((self.0 / step.0 + SIZE_EPSILON).floor() * step.0)
    }

    /// Smallest whole pixel count that covers this length
    pub fn ceil_pixels(self) -> i32 {
        self.0.ceil() as i32
    }

    /// Whether `self` is at least `other`, allowing for accumulated rounding
    pub fn at_least(self, other: Px) -> bool {
        self.0 + SIZE_EPSILON >= other.0
    }

    pub fn max(self, other: Px) -> Px {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }

    pub fn is_finite_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

/// Descending text sizes `from, from - step, from - 2 * step, ...` down to and
/// including `floor`. Yields nothing when `step` is not positive.
pub(crate) fn stepped_sizes(from: Px, step: Px, floor: Px) -> impl Iterator<Item = Px> {
    let usable = step.is_finite_positive();
    (0u32..)
        .map(move |k| from - step * k as f32)
        .take_while(move |size| usable && size.at_least(floor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_to_multiples_of_the_step() {
        assert_eq!(Px(47.0).floor_to_multiple(Px(10.0)), Px(40.0));
        assert_eq!(Px(40.0).floor_to_multiple(Px(10.0)), Px(40.0));
        assert_eq!(Px(7.0).floor_to_multiple(Px(0.0)), Px(7.0));
    }

    #[test]
    fn ceil_pixels_covers_fractional_lengths() {
        assert_eq!(Px(10.0).ceil_pixels(), 10);
        assert_eq!(Px(10.2).ceil_pixels(), 11);
        assert_eq!(Px(0.25).ceil_pixels(), 1);
    }

    #[test]
    fn stepped_sizes_include_the_floor() {
        let sizes: Vec<Px> = stepped_sizes(Px(40.0), Px(10.0), Px(10.0)).collect();
        assert_eq!(sizes, vec![Px(40.0), Px(30.0), Px(20.0), Px(10.0)]);

        let fractional: Vec<Px> = stepped_sizes(Px(31.5), Px(10.5), Px(10.5)).collect();
        assert_eq!(fractional.len(), 3);
    }

    #[test]
    fn stepped_sizes_with_zero_step_is_empty() {
        assert_eq!(stepped_sizes(Px(40.0), Px(0.0), Px(0.0)).count(), 0);
    }
}
