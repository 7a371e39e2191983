//! Trigger zones and crossing detection.
//!
//! A trigger zone is bounded by two [`TriggerPosition`]s, each pairing an
//! edge of the trigger element with a line across the viewport (`"top 80%"`
//! means "when the element's top reaches 80% down the viewport"). Each frame
//! the zone reports whether the scroll offset is before, inside or after it,
//! and state changes are turned into [`Crossing`]s that drive the
//! [`ToggleActions`] of a watch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RevealError;
use crate::types::TargetId;

/// Scroll source: the window's vertical scroll offset and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, height: f64) -> Self {
        Self { scroll_y, height }
    }
}

/// Document-space vertical extent of an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64,
}

impl ElementBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn edge_y(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top,
            Edge::Center => self.top + self.height / 2.0,
            Edge::Bottom => self.bottom(),
        }
    }
}

/// Edge of the trigger element a position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

/// An element edge meeting a viewport line given as a fraction of viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerPosition {
    pub edge: Edge,
    /// 0.0 is the top of the viewport, 1.0 the bottom.
    pub viewport: f64,
}

impl TriggerPosition {
    pub fn top(viewport: f64) -> Self {
        Self {
            edge: Edge::Top,
            viewport,
        }
    }

    pub fn center(viewport: f64) -> Self {
        Self {
            edge: Edge::Center,
            viewport,
        }
    }

    pub fn bottom(viewport: f64) -> Self {
        Self {
            edge: Edge::Bottom,
            viewport,
        }
    }

    /// Scroll offset at which the element edge sits exactly on the viewport line.
    pub fn scroll_offset(&self, bounds: &ElementBounds, viewport_height: f64) -> f64 {
        bounds.edge_y(self.edge) - self.viewport * viewport_height
    }
}

impl fmt::Display for TriggerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = match self.edge {
            Edge::Top => "top",
            Edge::Center => "center",
            Edge::Bottom => "bottom",
        };
        write!(f, "{edge} {}%", self.viewport * 100.0)
    }
}

impl FromStr for TriggerPosition {
    type Err = RevealError;

    /// Parse `"<edge> <viewport>"`, e.g. `"top 80%"`, `"bottom top"`, `"center center"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RevealError::InvalidTriggerPosition {
            position: s.to_string(),
        };
        let mut parts = s.split_whitespace();
        let (Some(edge), Some(line), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let edge = match edge {
            "top" => Edge::Top,
            "center" => Edge::Center,
            "bottom" => Edge::Bottom,
            _ => return Err(invalid()),
        };
        let viewport = match line {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            pct => pct
                .strip_suffix('%')
                .and_then(|n| n.parse::<f64>().ok())
                .map(|n| n / 100.0)
                .ok_or_else(invalid)?,
        };

        Ok(Self { edge, viewport })
    }
}

/// Which element a zone is measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerAnchor {
    /// The entry's own target.
    Own,
    /// A parent shared by sibling entries; all of them are evaluated against it.
    Shared { parent: TargetId },
    /// Entered as soon as the group is registered; never left.
    Mount,
}

/// Start and end of the range in which an element counts as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerZone {
    pub anchor: TriggerAnchor,
    pub start: TriggerPosition,
    pub end: TriggerPosition,
}

impl Default for TriggerZone {
    fn default() -> Self {
        Self {
            anchor: TriggerAnchor::Own,
            start: TriggerPosition::top(0.8),
            end: TriggerPosition::bottom(0.0),
        }
    }
}

impl TriggerZone {
    /// Zone measured against the entry's own target.
    pub fn own() -> Self {
        Self::default()
    }

    /// Zone measured against a shared parent element.
    pub fn shared(parent: impl Into<TargetId>) -> Self {
        Self {
            anchor: TriggerAnchor::Shared {
                parent: parent.into(),
            },
            ..Self::default()
        }
    }

    /// Zone that is entered on registration, for intro timelines.
    pub fn on_mount() -> Self {
        Self {
            anchor: TriggerAnchor::Mount,
            ..Self::default()
        }
    }

    pub fn start(mut self, start: TriggerPosition) -> Self {
        self.start = start;
        self
    }

    pub fn end(mut self, end: TriggerPosition) -> Self {
        self.end = end;
        self
    }

    /// Where the scroll offset sits relative to this zone for the given trigger bounds.
    ///
    /// An end above the start collapses the zone to a single line.
    pub fn state_at(&self, bounds: &ElementBounds, viewport: &Viewport) -> ZoneState {
        let start = self.start.scroll_offset(bounds, viewport.height);
        let end = self.end.scroll_offset(bounds, viewport.height).max(start);
        if viewport.scroll_y < start {
            ZoneState::Before
        } else if viewport.scroll_y < end {
            ZoneState::Active
        } else {
            ZoneState::After
        }
    }
}

/// Linear progress of the scroll offset through the range `start..end`, in [0, 1].
///
/// A collapsed range is a step at `start`.
pub fn progress_between(
    start: &TriggerPosition,
    end: &TriggerPosition,
    bounds: &ElementBounds,
    viewport: &Viewport,
) -> f64 {
    let start = start.scroll_offset(bounds, viewport.height);
    let end = end.scroll_offset(bounds, viewport.height);
    if end <= start {
        return if viewport.scroll_y >= start { 1.0 } else { 0.0 };
    }
    ((viewport.scroll_y - start) / (end - start)).clamp(0.0, 1.0)
}

/// Position of the scroll offset relative to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneState {
    Before,
    Active,
    After,
}

/// A boundary crossing between two zone states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossing {
    /// Scrolling down past the start.
    Enter,
    /// Scrolling down past the end.
    Leave,
    /// Scrolling up past the end.
    EnterBack,
    /// Scrolling up past the start.
    LeaveBack,
}

/// Crossings between two consecutive observations, in the order they happened.
///
/// Jumping over the whole zone in one frame yields both crossings, so a fast
/// programmatic scroll still fires the enter action. The first observation
/// of a watch is treated as coming from `Before`.
pub fn crossings(previous: Option<ZoneState>, current: ZoneState) -> Vec<Crossing> {
    use ZoneState::*;

    match (previous.unwrap_or(Before), current) {
        (Before, Active) => vec![Crossing::Enter],
        (Before, After) => vec![Crossing::Enter, Crossing::Leave],
        (Active, After) => vec![Crossing::Leave],
        (After, Active) => vec![Crossing::EnterBack],
        (After, Before) => vec![Crossing::EnterBack, Crossing::LeaveBack],
        (Active, Before) => vec![Crossing::LeaveBack],
        _ => Vec::new(),
    }
}

/// What a watch's timeline does on a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleAction {
    None,
    /// Play forward from the current position.
    Play,
    /// Play backward from the current position.
    Reverse,
    /// Jump to the start and play forward.
    Restart,
    /// Jump to the start and stop.
    Reset,
    /// Jump to the end and stop.
    Complete,
}

impl FromStr for ToggleAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "play" => Ok(Self::Play),
            "reverse" => Ok(Self::Reverse),
            "restart" => Ok(Self::Restart),
            "reset" => Ok(Self::Reset),
            "complete" => Ok(Self::Complete),
            _ => Err(()),
        }
    }
}

/// Actions for the four crossings, in `enter leave enter-back leave-back` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    pub fn new(
        on_enter: ToggleAction,
        on_leave: ToggleAction,
        on_enter_back: ToggleAction,
        on_leave_back: ToggleAction,
    ) -> Self {
        Self {
            on_enter,
            on_leave,
            on_enter_back,
            on_leave_back,
        }
    }

    pub fn action_for(&self, crossing: Crossing) -> ToggleAction {
        match crossing {
            Crossing::Enter => self.on_enter,
            Crossing::Leave => self.on_leave,
            Crossing::EnterBack => self.on_enter_back,
            Crossing::LeaveBack => self.on_leave_back,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = RevealError;

    /// Parse four space separated actions, e.g. `"play none none reverse"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actions: Vec<ToggleAction> = s
            .split_whitespace()
            .map(str::parse::<ToggleAction>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| RevealError::InvalidToggleActions {
                actions: s.to_string(),
            })?;
        match actions[..] {
            [enter, leave, enter_back, leave_back] => {
                Ok(Self::new(enter, leave, enter_back, leave_back))
            }
            _ => Err(RevealError::InvalidToggleActions {
                actions: s.to_string(),
            }),
        }
    }
}

/// How a reveal reacts to scrolling back out of its zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RepeatPolicy {
    /// Play on the first entry and stay revealed.
    PlayOnce,
    /// Play on entry, reverse when scrolling back above the start.
    #[default]
    PlayReverseOnExit,
    /// Explicit actions for every crossing.
    Custom { actions: ToggleActions },
}

impl RepeatPolicy {
    pub fn toggle_actions(&self) -> ToggleActions {
        use ToggleAction::*;

        match self {
            Self::PlayOnce => ToggleActions::new(Play, None, None, None),
            Self::PlayReverseOnExit => ToggleActions::new(Play, None, None, Reverse),
            Self::Custom { actions } => *actions,
        }
    }
}
