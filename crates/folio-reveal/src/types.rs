//! Core reveal types and data structures.
//!
//! This module defines the fundamental types shared by the orchestrator:
//! - `TargetId`: Non-owning reference to a renderable element
//! - `AnimatableProperty` / `AnimatableValue`: What gets animated, and to what
//! - `PropertyState`: A named set of property values (`from` / `to` states)
//! - `SessionId` / `WatchId`: Identifiers for registrations

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Non-owning reference to an element owned by the render layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TargetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&TargetId> for TargetId {
    fn from(id: &TargetId) -> Self {
        id.clone()
    }
}

/// Identifier of an orchestrator session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl SessionId {
    /// Generate a new unique session ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of one trigger watch (or scrub track) inside the orchestrator.
///
/// IDs increase monotonically, so ordering by ID is registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WatchId(pub u64);

impl WatchId {
    /// Generate a new unique watch ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for WatchId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit attached to a length-like value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Px,
    Percent,
    Deg,
}

impl Unit {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
            Self::Deg => "deg",
        }
    }
}

/// A numeric-or-unit property value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimatableValue {
    /// Unitless number (opacity, scale, dash offset).
    Number { value: f64 },
    /// Number with a unit (translation in px, width in %, rotation in deg).
    Length { value: f64, unit: Unit },
}

impl AnimatableValue {
    pub fn px(value: f64) -> Self {
        Self::Length {
            value,
            unit: Unit::Px,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self::Length {
            value,
            unit: Unit::Percent,
        }
    }

    pub fn deg(value: f64) -> Self {
        Self::Length {
            value,
            unit: Unit::Deg,
        }
    }

    /// The numeric part, regardless of unit.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number { value } | Self::Length { value, .. } => *value,
        }
    }

    pub fn unit(&self) -> Option<Unit> {
        match self {
            Self::Number { .. } => None,
            Self::Length { unit, .. } => Some(*unit),
        }
    }

    /// True when both values share a kind and unit and differ by at most `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.unit() == other.unit() && (self.as_f64() - other.as_f64()).abs() <= tolerance
    }
}

impl From<f64> for AnimatableValue {
    fn from(value: f64) -> Self {
        Self::Number { value }
    }
}

impl fmt::Display for AnimatableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value } => write!(f, "{value}"),
            Self::Length { value, unit } => write!(f, "{value}{}", unit.suffix()),
        }
    }
}

/// Visual properties a reveal can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatableProperty {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
    RotateX,
    Blur,
    StrokeDashOffset,
    Width,
    Height,
}

impl AnimatableProperty {
    /// Resting value of the property when a state does not mention it.
    pub fn default_value(&self) -> AnimatableValue {
        match self {
            Self::Opacity | Self::Scale => AnimatableValue::from(1.0),
            Self::TranslateX | Self::TranslateY | Self::Blur => AnimatableValue::px(0.0),
            Self::RotateX => AnimatableValue::deg(0.0),
            Self::StrokeDashOffset => AnimatableValue::from(0.0),
            Self::Width | Self::Height => AnimatableValue::percent(100.0),
        }
    }

    /// CSS-facing name, used in log output.
    pub fn css_name(&self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::TranslateX => "x",
            Self::TranslateY => "y",
            Self::Scale => "scale",
            Self::RotateX => "rotateX",
            Self::Blur => "blur",
            Self::StrokeDashOffset => "strokeDashoffset",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

/// A named set of animatable property values, e.g. a reveal's `from` or `to` state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyState {
    values: HashMap<AnimatableProperty, AnimatableValue>,
}

impl PropertyState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, property: AnimatableProperty, value: impl Into<AnimatableValue>) -> Self {
        self.values.insert(property, value.into());
        self
    }

    /// Shorthand for `opacity`.
    pub fn opacity(self, value: f64) -> Self {
        self.with(AnimatableProperty::Opacity, value)
    }

    /// Shorthand for `x` in pixels.
    pub fn x(self, px: f64) -> Self {
        self.with(AnimatableProperty::TranslateX, AnimatableValue::px(px))
    }

    /// Shorthand for `y` in pixels.
    pub fn y(self, px: f64) -> Self {
        self.with(AnimatableProperty::TranslateY, AnimatableValue::px(px))
    }

    /// Shorthand for uniform `scale`.
    pub fn scale(self, value: f64) -> Self {
        self.with(AnimatableProperty::Scale, value)
    }

    /// Shorthand for `rotateX` in degrees.
    pub fn rotate_x(self, deg: f64) -> Self {
        self.with(AnimatableProperty::RotateX, AnimatableValue::deg(deg))
    }

    /// Shorthand for blur radius in pixels.
    pub fn blur(self, px: f64) -> Self {
        self.with(AnimatableProperty::Blur, AnimatableValue::px(px))
    }

    pub fn set(&mut self, property: AnimatableProperty, value: AnimatableValue) {
        self.values.insert(property, value);
    }

    pub fn get(&self, property: AnimatableProperty) -> Option<&AnimatableValue> {
        self.values.get(&property)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AnimatableProperty, &AnimatableValue)> {
        self.values.iter()
    }

    /// Properties present in this state, sorted.
    pub fn properties(&self) -> Vec<AnimatableProperty> {
        let mut props: Vec<_> = self.values.keys().copied().collect();
        props.sort();
        props
    }

    /// Overwrite values with those of `other`.
    pub fn merge(&mut self, other: &PropertyState) {
        for (property, value) in other.iter() {
            self.values.insert(*property, *value);
        }
    }

    /// True when every property of `expected` is present here and within `tolerance`.
    pub fn matches(&self, expected: &PropertyState, tolerance: f64) -> bool {
        expected.iter().all(|(property, value)| {
            self.get(*property)
                .is_some_and(|actual| actual.approx_eq(value, tolerance))
        })
    }
}

impl fmt::Display for PropertyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, property) in self.properties().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if let Some(value) = self.get(property) {
                write!(f, "{}: {}", property.css_name(), value)?;
            }
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_uniqueness() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
        assert!(b > a);

        let w1 = WatchId::new();
        let w2 = WatchId::new();
        assert!(w2 > w1);
    }

    #[test]
    fn test_value_constructors() {
        assert_eq!(AnimatableValue::px(4.0).unit(), Some(Unit::Px));
        assert_eq!(AnimatableValue::percent(50.0).as_f64(), 50.0);
        assert_eq!(AnimatableValue::from(0.5).unit(), None);
        assert_eq!(AnimatableValue::deg(-10.0).to_string(), "-10deg");
    }

    #[test]
    fn test_approx_eq_requires_same_unit() {
        let a = AnimatableValue::px(10.0);
        assert!(a.approx_eq(&AnimatableValue::px(10.0005), 0.001));
        assert!(!a.approx_eq(&AnimatableValue::percent(10.0), 0.001));
        assert!(!a.approx_eq(&AnimatableValue::from(10.0), 0.001));
    }

    #[test]
    fn test_property_state_builders() {
        let state = PropertyState::new().opacity(0.0).y(40.0).rotate_x(-10.0);
        assert_eq!(state.len(), 3);
        assert_eq!(
            state.get(AnimatableProperty::TranslateY),
            Some(&AnimatableValue::px(40.0))
        );
        assert_eq!(
            state.properties(),
            vec![
                AnimatableProperty::Opacity,
                AnimatableProperty::TranslateY,
                AnimatableProperty::RotateX
            ]
        );
        assert_eq!(state.to_string(), "{opacity: 0, y: 40px, rotateX: -10deg}");
    }

    #[test]
    fn test_property_state_matches() {
        let actual = PropertyState::new().opacity(0.9999).y(0.0).scale(1.0);
        let expected = PropertyState::new().opacity(1.0).y(0.0);
        assert!(actual.matches(&expected, 0.001));
        assert!(!actual.matches(&PropertyState::new().blur(0.0), 0.001));
    }

    #[test]
    fn test_default_values() {
        assert_eq!(AnimatableProperty::Opacity.default_value().as_f64(), 1.0);
        assert_eq!(
            AnimatableProperty::Width.default_value(),
            AnimatableValue::percent(100.0)
        );
    }

    #[test]
    fn test_value_serialization() {
        let json = serde_json::to_string(&AnimatableValue::percent(85.0)).unwrap();
        assert!(json.contains("\"type\":\"length\""));
        assert!(json.contains("\"unit\":\"percent\""));
        let parsed: AnimatableValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, AnimatableValue::percent(85.0));
    }
}
