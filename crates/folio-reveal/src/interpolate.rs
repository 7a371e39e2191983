//! Interpolation between property values and whole property states.

use crate::types::{AnimatableValue, PropertyState};

/// Types that can be interpolated between two values.
///
/// `t = 0.0` yields `self`, `t = 1.0` yields `to`. Values outside [0, 1] are
/// allowed so overshooting easings extrapolate.
pub trait Interpolate: Sized {
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

#[inline]
fn lerp(from: f64, to: f64, t: f32) -> f64 {
    from + (to - from) * f64::from(t)
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp(*self, *to, t)
    }
}

impl Interpolate for AnimatableValue {
    /// Values of the same kind and unit interpolate linearly. Mismatched
    /// values switch to `to` only once the transition completes.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        match (self, to) {
            (Self::Number { value: from }, Self::Number { value: to_val }) => Self::Number {
                value: from.interpolate(to_val, t),
            },
            (
                Self::Length { value: from, unit },
                Self::Length {
                    value: to_val,
                    unit: to_unit,
                },
            ) if unit == to_unit => Self::Length {
                value: from.interpolate(to_val, t),
                unit: *unit,
            },
            _ if t >= 1.0 => *to,
            _ => *self,
        }
    }
}

impl Interpolate for PropertyState {
    /// Interpolate every property mentioned by either state.
    ///
    /// A property missing on one side uses its resting value there, so a
    /// `to` state of `{opacity: 1}` still moves a `from` of `{opacity: 0, y: 40}`
    /// back to `y: 0`.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        let mut out = PropertyState::new();
        for property in self.properties().into_iter().chain(to.properties()) {
            if out.get(property).is_some() {
                continue;
            }
            let from_val = self
                .get(property)
                .copied()
                .unwrap_or_else(|| property.default_value());
            let to_val = to
                .get(property)
                .copied()
                .unwrap_or_else(|| property.default_value());
            out.set(property, from_val.interpolate(&to_val, t));
        }
        out
    }
}
