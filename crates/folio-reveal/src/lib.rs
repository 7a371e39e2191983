//! Scroll-triggered reveal animations for the portfolio page.
//!
//! This crate provides:
//! - **Orchestrator**: one shared facility that watches trigger zones and
//!   plays each section's reveals forward on enter and back on exit
//! - **Sessions**: lifetime-scoped handles that release everything a section
//!   registered, on `dispose()` or drop
//! - **Scrub entries**: values bound continuously to the scroll offset
//! - **Easing Functions**: CSS timing functions plus power and back curves
//! - **Reveal Events**: crossings and tween lifecycle, polled after each frame
//! - **Presets**: the reveal groups of every page section
//!
//! # Architecture
//!
//! ```text
//! ScrollRevealOrchestrator
//!   ├── Watches (trigger zone + toggle actions + playhead)
//!   │     └── Tracks (one staggered entry each)
//!   └── Scrub tracks (progress follows scroll)
//!
//! OrchestratorSession
//!   └── Releases its watches and scrub tracks
//!
//! RenderHost
//!   └── Resolves element bounds and receives animated values
//! ```

pub mod easing;
pub mod entry;
pub mod error;
pub mod events;
pub mod host;
pub mod interpolate;
pub mod orchestrator;
pub mod presets;
pub mod session;
pub mod trigger;
pub mod tween;
pub mod types;

pub use easing::{EasingFunction, StepPosition};
pub use entry::{GroupEntry, RevealEntry, RevealGroup, ScrubEntry};
pub use error::RevealError;
pub use events::{DEFAULT_EVENT_CAPACITY, EventQueue, RevealEventKind, TriggerEvent, TweenEvent};
pub use host::{RenderHost, SimulatedPage};
pub use interpolate::Interpolate;
pub use orchestrator::ScrollRevealOrchestrator;
pub use presets::{element_id, part_id, PageContent, Presets};
pub use session::OrchestratorSession;
pub use trigger::{
    Crossing, Edge, ElementBounds, RepeatPolicy, ToggleAction, ToggleActions, TriggerAnchor,
    TriggerPosition, TriggerZone, Viewport, ZoneState,
};
pub use tween::{PlayDirection, Playhead, TrackTiming, TweenSpec};
pub use types::{
    AnimatableProperty, AnimatableValue, PropertyState, SessionId, TargetId, Unit, WatchId,
};
