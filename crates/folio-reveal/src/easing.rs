//! Easing curves for reveal timing.
//!
//! Supported curves:
//! - Linear (`none`)
//! - CSS `ease`, `ease-in`, `ease-out`, `ease-in-out` and `cubic-bezier(..)`
//! - CSS `steps(..)`
//! - Power curves `power1`..`power4` in `.in`, `.out` and `.inOut` flavours
//! - `back.out(overshoot)`
//!
//! # Usage
//!
//! ```
//! use folio_reveal::easing::EasingFunction;
//!
//! let ease: EasingFunction = "power3.out".parse().unwrap();
//! let progress = ease.evaluate(0.5);
//! assert!(progress > 0.5);
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RevealError;

/// Overshoot GSAP uses for a bare `back.out`.
pub const DEFAULT_BACK_OVERSHOOT: f32 = 1.70158;

/// Position for stepped easing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    /// Jump at the start of each interval (CSS `jump-start` / `start`).
    Start,
    /// Jump at the end of each interval (CSS `jump-end` / `end`).
    End,
}

impl Default for StepPosition {
    fn default() -> Self {
        Self::End
    }
}

/// Easing function mapping linear progress (0.0 to 1.0) to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    /// No easing (`none` / `linear`).
    Linear,

    /// CSS `ease`, `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Ease,

    /// CSS `ease-in`, `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,

    /// CSS `ease-out`, `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,

    /// CSS `ease-in-out`, `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,

    /// Custom cubic bezier curve with control points (x1, y1) and (x2, y2).
    /// x values must be in [0, 1].
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },

    /// Stepped easing with discrete jumps.
    Steps { count: u32, position: StepPosition },

    /// Accelerating power curve. `power` 1..=4 maps to exponents 2..=5.
    PowerIn { power: u8 },

    /// Decelerating power curve, the "smoothed deceleration" used by most reveals.
    PowerOut { power: u8 },

    /// Power curve accelerating then decelerating.
    PowerInOut { power: u8 },

    /// Decelerating curve that overshoots the target and settles back.
    BackOut { overshoot: f32 },
}

impl Default for EasingFunction {
    fn default() -> Self {
        Self::PowerOut { power: 3 }
    }
}

impl EasingFunction {
    /// Evaluate the easing function at the given progress.
    ///
    /// Input is clamped to [0, 1]; output may leave that range for
    /// overshooting curves (`back.out`, some beziers).
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(*x1, *y1, *x2, *y2, t),
            Self::Steps { count, position } => stepped(*count, *position, t),
            Self::PowerIn { power } => t.powi(exponent(*power)),
            Self::PowerOut { power } => 1.0 - (1.0 - t).powi(exponent(*power)),
            Self::PowerInOut { power } => {
                let e = exponent(*power);
                if t < 0.5 {
                    (2.0 * t).powi(e) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(e) / 2.0
                }
            }
            Self::BackOut { overshoot } => {
                let p = t - 1.0;
                p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
            }
        }
    }

    /// Create a custom cubic bezier easing function.
    ///
    /// # Panics
    /// Panics if x1 or x2 are outside [0, 1].
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "Bezier x values must be in [0, 1]"
        );
        Self::CubicBezier { x1, y1, x2, y2 }
    }

    /// Create a stepped easing function.
    ///
    /// # Panics
    /// Panics if steps is 0.
    pub fn steps(steps: u32, position: StepPosition) -> Self {
        assert!(steps >= 1, "Steps must be at least 1");
        Self::Steps {
            count: steps,
            position,
        }
    }

    /// `power{n}.out`, the decelerating curve.
    pub fn power_out(power: u8) -> Self {
        Self::PowerOut {
            power: power.clamp(1, 4),
        }
    }

    /// `back.out(overshoot)`.
    pub fn back_out(overshoot: f32) -> Self {
        Self::BackOut { overshoot }
    }
}

fn exponent(power: u8) -> i32 {
    i32::from(power.clamp(1, 4)) + 1
}

impl FromStr for EasingFunction {
    type Err = RevealError;

    /// Parse GSAP-style (`power3.out`, `back.out(1.7)`, `none`) and
    /// CSS-style (`ease-in-out`, `cubic-bezier(..)`, `steps(..)`) names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let unknown = || RevealError::UnknownEasing {
            name: s.to_string(),
        };

        match name {
            "none" | "linear" => return Ok(Self::Linear),
            "ease" => return Ok(Self::Ease),
            "ease-in" => return Ok(Self::EaseIn),
            "ease-out" => return Ok(Self::EaseOut),
            "ease-in-out" => return Ok(Self::EaseInOut),
            "back" | "back.out" => return Ok(Self::back_out(DEFAULT_BACK_OVERSHOOT)),
            _ => {}
        }

        if let Some(rest) = name.strip_prefix("power") {
            let (level, flavour) = rest.split_once('.').unwrap_or((rest, "out"));
            let power = match level.parse::<u8>() {
                Ok(p @ 1..=4) => p,
                _ => return Err(unknown()),
            };
            return match flavour {
                "in" => Ok(Self::PowerIn { power }),
                "out" => Ok(Self::PowerOut { power }),
                "inOut" => Ok(Self::PowerInOut { power }),
                _ => Err(unknown()),
            };
        }

        if let Some(args) = call_args(name, "back.out") {
            let overshoot = args.trim().parse::<f32>().map_err(|_| unknown())?;
            return Ok(Self::back_out(overshoot));
        }

        if let Some(args) = call_args(name, "cubic-bezier") {
            let points: Vec<f32> = args
                .split(',')
                .map(|p| p.trim().parse::<f32>())
                .collect::<Result<_, _>>()
                .map_err(|_| unknown())?;
            let [x1, y1, x2, y2] = points[..] else {
                return Err(unknown());
            };
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(unknown());
            }
            return Ok(Self::CubicBezier { x1, y1, x2, y2 });
        }

        if let Some(args) = call_args(name, "steps") {
            let mut parts = args.split(',').map(str::trim);
            let count = parts
                .next()
                .and_then(|c| c.parse::<u32>().ok())
                .filter(|c| *c >= 1)
                .ok_or_else(unknown)?;
            let position = match parts.next() {
                None | Some("end") | Some("jump-end") => StepPosition::End,
                Some("start") | Some("jump-start") => StepPosition::Start,
                Some(_) => return Err(unknown()),
            };
            return Ok(Self::Steps { count, position });
        }

        Err(unknown())
    }
}

/// `name(args)` → `args`.
fn call_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?.strip_prefix('(')?.strip_suffix(')')
}

/// Evaluate a cubic bezier curve at progress x.
///
/// Newton-Raphson finds the curve parameter for the input x, then the y
/// coordinate at that parameter is returned.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x1, x2, progress);
    bezier_axis(y1, y2, t)
}

fn solve_bezier_x(x1: f32, x2: f32, target_x: f32) -> f32 {
    let mut t = target_x;

    for _ in 0..8 {
        let x = bezier_axis(x1, x2, t) - target_x;
        if x.abs() < 1e-6 {
            break;
        }

        let dx = bezier_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }

        t = (t - x / dx).clamp(0.0, 1.0);
    }

    t
}

/// One axis of the curve: 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_axis(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

/// d/dt of `bezier_axis`.
#[inline]
fn bezier_derivative(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

fn stepped(steps: u32, position: StepPosition, t: f32) -> f32 {
    if steps == 0 {
        return t;
    }

    let steps_f = steps as f32;
    match position {
        StepPosition::Start => (t * steps_f).ceil() / steps_f,
        StepPosition::End => (t * steps_f).floor() / steps_f,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_linear() {
        let ease = EasingFunction::Linear;
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(0.25), 0.25));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));
    }

    #[test]
    fn test_css_curves_hit_endpoints() {
        for ease in [
            EasingFunction::Ease,
            EasingFunction::EaseIn,
            EasingFunction::EaseOut,
            EasingFunction::EaseInOut,
        ] {
            assert!(approx_eq(ease.evaluate(0.0), 0.0), "{ease:?}");
            assert!(approx_eq(ease.evaluate(1.0), 1.0), "{ease:?}");
        }

        let mid = EasingFunction::EaseInOut.evaluate(0.5);
        assert!(approx_eq(mid, 0.5));
    }

    #[test]
    fn test_power_out_decelerates() {
        let ease = EasingFunction::power_out(3);
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));
        // 1 - 0.5^4
        assert!(approx_eq(ease.evaluate(0.5), 0.9375));
        assert!(ease.evaluate(0.25) > EasingFunction::power_out(1).evaluate(0.25));
    }

    #[test]
    fn test_power_in_out_is_symmetric() {
        let ease = EasingFunction::PowerInOut { power: 2 };
        assert!(approx_eq(ease.evaluate(0.5), 0.5));
        assert!(approx_eq(ease.evaluate(0.2) + ease.evaluate(0.8), 1.0));
        assert!(EasingFunction::PowerIn { power: 2 }.evaluate(0.5) < 0.5);
    }

    #[test]
    fn test_back_out_overshoots() {
        let ease = EasingFunction::back_out(2.0);
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));
        let peak = (1..100)
            .map(|i| ease.evaluate(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "back.out should overshoot, peak {peak}");
    }

    #[test]
    fn test_steps() {
        let end = EasingFunction::steps(4, StepPosition::End);
        assert!(approx_eq(end.evaluate(0.24), 0.0));
        assert!(approx_eq(end.evaluate(0.25), 0.25));
        assert!(approx_eq(end.evaluate(0.99), 0.75));

        let start = EasingFunction::steps(4, StepPosition::Start);
        assert!(approx_eq(start.evaluate(0.01), 0.25));
        assert!(approx_eq(start.evaluate(0.76), 1.0));
    }

    #[test]
    fn test_clamping() {
        let ease = EasingFunction::Ease;
        assert!(approx_eq(ease.evaluate(-0.5), 0.0));
        assert!(approx_eq(ease.evaluate(1.5), 1.0));
    }

    #[test]
    fn test_default_is_power3_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::PowerOut { power: 3 });
        assert_eq!(StepPosition::default(), StepPosition::End);
    }

    #[test]
    fn test_parse_names() {
        let parse = |s: &str| s.parse::<EasingFunction>().unwrap();
        assert_eq!(parse("none"), EasingFunction::Linear);
        assert_eq!(parse("power3.out"), EasingFunction::PowerOut { power: 3 });
        assert_eq!(parse("power2"), EasingFunction::PowerOut { power: 2 });
        assert_eq!(parse("power1.inOut"), EasingFunction::PowerInOut { power: 1 });
        assert_eq!(parse("back.out(1.7)"), EasingFunction::BackOut { overshoot: 1.7 });
        assert_eq!(
            parse("back.out"),
            EasingFunction::BackOut {
                overshoot: DEFAULT_BACK_OVERSHOOT
            }
        );
        assert_eq!(parse(" ease-in-out "), EasingFunction::EaseInOut);
        assert_eq!(
            parse("cubic-bezier(0.4, 0, 0.2, 1)"),
            EasingFunction::CubicBezier {
                x1: 0.4,
                y1: 0.0,
                x2: 0.2,
                y2: 1.0
            }
        );
        assert_eq!(
            parse("steps(3, start)"),
            EasingFunction::Steps {
                count: 3,
                position: StepPosition::Start
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for bad in [
            "elastic.out",
            "power7.out",
            "power2.sideways",
            "back.out(x)",
            "cubic-bezier(1.5, 0, 0.2, 1)",
            "cubic-bezier(0.1, 0.2)",
            "steps(0)",
        ] {
            let err = bad.parse::<EasingFunction>().unwrap_err();
            assert_eq!(
                err,
                RevealError::UnknownEasing {
                    name: bad.to_string()
                }
            );
        }
    }

    #[test]
    #[should_panic(expected = "Bezier x values must be in [0, 1]")]
    fn test_invalid_bezier() {
        EasingFunction::cubic_bezier(-0.1, 0.0, 0.5, 1.0);
    }

    #[test]
    #[should_panic(expected = "Steps must be at least 1")]
    fn test_invalid_steps() {
        EasingFunction::steps(0, StepPosition::End);
    }
}
