//! Declarative reveal groups.
//!
//! A section describes its animations as a [`RevealGroup`]: an ordered list
//! of discrete [`RevealEntry`]s, which play between two states when a
//! trigger zone is crossed, and continuous [`ScrubEntry`]s, whose progress
//! follows the scroll offset.

use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::trigger::{RepeatPolicy, TriggerPosition, TriggerZone};
use crate::tween::TweenSpec;
use crate::types::{PropertyState, TargetId};

/// One element revealed by a trigger crossing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealEntry {
    pub target: TargetId,
    pub from: PropertyState,
    pub to: PropertyState,
    pub zone: TriggerZone,
    pub policy: RepeatPolicy,
    pub spec: TweenSpec,
    /// Position in the stagger sequence. Defaults to the entry's position
    /// among the resolved members of its batch, or among the group's
    /// resolved reveal entries when it has no batch.
    pub stagger_index: Option<usize>,
    /// Entries added together by [`RevealGroup::batch`]. A batch gets its own
    /// watch and timeline.
    pub batch: Option<usize>,
    /// Overrides the group's stagger interval for this entry.
    pub stagger_ms: Option<f32>,
    /// Start of the entry on its watch's timeline, before stagger.
    pub offset_ms: f32,
}

impl RevealEntry {
    /// Entry that fades in from transparent, triggered by its own target.
    pub fn new(target: impl Into<TargetId>) -> Self {
        Self {
            target: target.into(),
            from: PropertyState::new().opacity(0.0),
            to: PropertyState::new().opacity(1.0),
            zone: TriggerZone::default(),
            policy: RepeatPolicy::default(),
            spec: TweenSpec::default(),
            stagger_index: None,
            batch: None,
            stagger_ms: None,
            offset_ms: 0.0,
        }
    }

    pub fn from(mut self, state: PropertyState) -> Self {
        self.from = state;
        self
    }

    pub fn to(mut self, state: PropertyState) -> Self {
        self.to = state;
        self
    }

    pub fn zone(mut self, zone: TriggerZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn policy(mut self, policy: RepeatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn spec(mut self, spec: TweenSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn duration_ms(mut self, duration_ms: f32) -> Self {
        self.spec.duration_ms = duration_ms;
        self
    }

    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.spec.easing = easing;
        self
    }

    pub fn stagger_index(mut self, index: usize) -> Self {
        self.stagger_index = Some(index);
        self
    }

    pub fn stagger_ms(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = Some(stagger_ms);
        self
    }

    pub fn in_batch(mut self, batch: usize) -> Self {
        self.batch = Some(batch);
        self
    }

    /// Place the entry at a fixed time on its timeline (mount timelines).
    pub fn at_ms(mut self, offset_ms: f32) -> Self {
        self.offset_ms = offset_ms;
        self
    }

    pub fn with_target(mut self, target: impl Into<TargetId>) -> Self {
        self.target = target.into();
        self
    }

    /// Timeline start for a resolved stagger index.
    pub fn start_ms(&self, stagger_index: usize, group_stagger_ms: f32) -> f32 {
        let stagger = self.stagger_ms.unwrap_or(group_stagger_ms).max(0.0);
        self.offset_ms.max(0.0) + stagger_index as f32 * stagger
    }
}

/// One element whose values follow the scroll offset through a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrubEntry {
    pub target: TargetId,
    pub from: PropertyState,
    pub to: PropertyState,
    /// Element the range is measured against; the target itself when `None`.
    pub trigger: Option<TargetId>,
    pub start: TriggerPosition,
    pub end: TriggerPosition,
    pub easing: EasingFunction,
    /// `None` ties progress to the scroll offset exactly. `Some(ms)` lets the
    /// displayed progress catch up over roughly that long.
    pub smoothing_ms: Option<f32>,
}

impl ScrubEntry {
    pub fn new(target: impl Into<TargetId>) -> Self {
        Self {
            target: target.into(),
            from: PropertyState::new(),
            to: PropertyState::new(),
            trigger: None,
            start: TriggerPosition::top(1.0),
            end: TriggerPosition::bottom(0.0),
            easing: EasingFunction::Linear,
            smoothing_ms: None,
        }
    }

    pub fn from(mut self, state: PropertyState) -> Self {
        self.from = state;
        self
    }

    pub fn to(mut self, state: PropertyState) -> Self {
        self.to = state;
        self
    }

    pub fn trigger(mut self, trigger: impl Into<TargetId>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    pub fn start(mut self, start: TriggerPosition) -> Self {
        self.start = start;
        self
    }

    pub fn end(mut self, end: TriggerPosition) -> Self {
        self.end = end;
        self
    }

    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn smoothing_ms(mut self, smoothing_ms: Option<f32>) -> Self {
        self.smoothing_ms = smoothing_ms;
        self
    }

    /// The element whose bounds drive this entry.
    pub fn trigger_target(&self) -> &TargetId {
        self.trigger.as_ref().unwrap_or(&self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupEntry {
    Reveal(RevealEntry),
    Scrub(ScrubEntry),
}

/// Everything one section registers at mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealGroup {
    pub section: String,
    /// Default interval between consecutive stagger indices.
    pub stagger_ms: f32,
    pub entries: Vec<GroupEntry>,
}

impl RevealGroup {
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            stagger_ms: 0.0,
            entries: Vec::new(),
        }
    }

    pub fn stagger_ms(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn reveal(mut self, entry: RevealEntry) -> Self {
        self.entries.push(GroupEntry::Reveal(entry));
        self
    }

    pub fn scrub(mut self, entry: ScrubEntry) -> Self {
        self.entries.push(GroupEntry::Scrub(entry));
        self
    }

    /// Add entries as one batch staggered at `stagger_ms` intervals.
    ///
    /// Stagger indices are assigned at registration among the entries that
    /// resolve, so a missing element does not leave a gap.
    pub fn batch<I>(mut self, entries: I, stagger_ms: f32) -> Self
    where
        I: IntoIterator<Item = RevealEntry>,
    {
        let batch = self.next_batch();
        for entry in entries {
            let entry = entry.in_batch(batch).stagger_ms(stagger_ms);
            self.entries.push(GroupEntry::Reveal(entry));
        }
        self
    }

    /// One batch entry per target, copied from `template`.
    pub fn staggered<I, T>(self, targets: I, stagger_ms: f32, template: RevealEntry) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        let entries = targets
            .into_iter()
            .map(|target| template.clone().with_target(target));
        self.batch(entries, stagger_ms)
    }

    fn next_batch(&self) -> usize {
        self.reveal_entries()
            .filter_map(|entry| entry.batch)
            .max()
            .map_or(0, |last| last + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reveal_entries(&self) -> impl Iterator<Item = &RevealEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            GroupEntry::Reveal(reveal) => Some(reveal),
            GroupEntry::Scrub(_) => None,
        })
    }

    pub fn scrub_entries(&self) -> impl Iterator<Item = &ScrubEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            GroupEntry::Scrub(scrub) => Some(scrub),
            GroupEntry::Reveal(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::TriggerAnchor;

    #[test]
    fn test_entry_defaults() {
        let entry = RevealEntry::new("card");
        assert_eq!(entry.target.as_str(), "card");
        assert_eq!(entry.zone.anchor, TriggerAnchor::Own);
        assert_eq!(entry.policy, RepeatPolicy::PlayReverseOnExit);
        assert_eq!(entry.spec.duration_ms, 800.0);
        assert_eq!(entry.start_ms(0, 100.0), 0.0);
    }

    #[test]
    fn test_start_ms() {
        let entry = RevealEntry::new("char").at_ms(200.0);
        assert_eq!(entry.start_ms(3, 30.0), 290.0);

        let entry = entry.stagger_ms(50.0);
        assert_eq!(entry.start_ms(3, 30.0), 350.0);
    }

    #[test]
    fn test_staggered_batch() {
        let template = RevealEntry::new("")
            .from(PropertyState::new().opacity(0.0).y(50.0))
            .zone(TriggerZone::shared("grid"));
        let group = RevealGroup::new("skills")
            .reveal(RevealEntry::new("title"))
            .staggered(["a", "b", "c"], 100.0, template);

        assert_eq!(group.len(), 4);
        let batch: Vec<_> = group.reveal_entries().skip(1).collect();
        assert_eq!(batch[2].target.as_str(), "c");
        assert_eq!(batch[2].batch, Some(0));
        assert_eq!(batch[2].stagger_index, None);
        assert_eq!(batch[2].start_ms(2, 0.0), 200.0);
        assert_eq!(batch[0].zone, TriggerZone::shared("grid"));
        assert_eq!(group.reveal_entries().next().and_then(|e| e.batch), None);
    }

    #[test]
    fn test_batches_are_numbered_in_order() {
        let group = RevealGroup::new("education")
            .staggered(["card-0", "card-1"], 200.0, RevealEntry::new(""))
            .batch([RevealEntry::new("dot-0"), RevealEntry::new("dot-1")], 150.0);

        let batches: Vec<_> = group.reveal_entries().map(|e| (e.batch, e.stagger_ms)).collect();
        assert_eq!(
            batches,
            [
                (Some(0), Some(200.0)),
                (Some(0), Some(200.0)),
                (Some(1), Some(150.0)),
                (Some(1), Some(150.0)),
            ]
        );
    }

    #[test]
    fn test_scrub_trigger_target() {
        let own = ScrubEntry::new("image");
        assert_eq!(own.trigger_target().as_str(), "image");
        assert_eq!(own.easing, EasingFunction::Linear);

        let shared = ScrubEntry::new("image").trigger("hero");
        assert_eq!(shared.trigger_target().as_str(), "hero");

        let group = RevealGroup::new("hero").scrub(shared).reveal(RevealEntry::new("x"));
        assert_eq!(group.scrub_entries().count(), 1);
        assert_eq!(group.reveal_entries().count(), 1);
    }
}
