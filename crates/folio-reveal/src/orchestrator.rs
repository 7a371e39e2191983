//! Scroll reveal orchestrator.
//!
//! The `ScrollRevealOrchestrator` owns every active watch on the page:
//! - Registering a section's [`RevealGroup`] and handing back the session
//!   that releases it
//! - Evaluating trigger zones once per frame and firing toggle actions
//! - Advancing each watch's playhead and writing changed values to the host
//! - Following the scroll offset for scrub entries
//!
//! # Usage
//!
//! ```ignore
//! let orchestrator = ScrollRevealOrchestrator::global();
//! let session = orchestrator.register_group(presets.skills(&layout), &mut page);
//!
//! // once per frame
//! let viewport = page.viewport();
//! orchestrator.tick(&mut page, viewport, 16.0);
//!
//! // section unmounted
//! drop(session);
//! ```

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::easing::EasingFunction;
use crate::entry::{GroupEntry, RevealEntry, RevealGroup, ScrubEntry};
use crate::error::RevealError;
use crate::events::{EventQueue, RevealEventKind, TriggerEvent, TweenEvent};
use crate::host::RenderHost;
use crate::interpolate::Interpolate;
use crate::session::OrchestratorSession;
use crate::trigger::{
    crossings, progress_between, Crossing, ToggleAction, ToggleActions, TriggerAnchor,
    TriggerPosition, TriggerZone, Viewport, ZoneState,
};
use crate::tween::{PlayDirection, Playhead, TrackTiming};
use crate::types::{PropertyState, SessionId, TargetId, WatchId};

/// Scrub progress closer than this to its target snaps onto it.
const SCRUB_SNAP: f32 = 0.0005;

/// Shared scroll-trigger facility.
///
/// Cloning is cheap; clones drive the same set of watches.
#[derive(Debug, Clone, Default)]
pub struct ScrollRevealOrchestrator {
    inner: Arc<Mutex<Inner>>,
}

static_assertions::assert_impl_all!(ScrollRevealOrchestrator: Send, Sync);

impl ScrollRevealOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orchestrator whose event queue keeps at most `capacity` undrained events.
    pub fn with_event_capacity(capacity: usize) -> Self {
        let inner = Inner {
            events: EventQueue::with_capacity(capacity),
            ..Inner::default()
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Process-wide instance, created on first use.
    pub fn global() -> &'static ScrollRevealOrchestrator {
        static GLOBAL: OnceCell<ScrollRevealOrchestrator> = OnceCell::new();
        GLOBAL.get_or_init(|| {
            log::info!("scroll reveal orchestrator initialised");
            ScrollRevealOrchestrator::new()
        })
    }

    /// Register every entry of a section and render their from-states.
    ///
    /// Entries whose target or shared trigger cannot be resolved are
    /// skipped and listed on the returned session. A section that is still
    /// registered is released first.
    pub fn register_group(
        &self,
        group: RevealGroup,
        host: &mut dyn RenderHost,
    ) -> OrchestratorSession {
        let RevealGroup {
            section,
            stagger_ms,
            entries,
        } = group;
        let session = SessionId::new();
        let mut inner = self.inner.lock();

        if let Some(previous) = inner.sections.get(&section).copied() {
            log::warn!(
                "section `{section}` registered while session {} is active; releasing it",
                previous.0
            );
            inner.release(previous);
        }

        let mut watches: Vec<Watch> = Vec::new();
        let mut scrubs: Vec<ScrubTrack> = Vec::new();
        let mut skipped = Vec::new();
        // Stagger slots are handed out to resolved entries only.
        let mut reveal_position = 0;
        let mut batch_positions: HashMap<usize, usize> = HashMap::new();

        for entry in entries {
            let resolved = match &entry {
                GroupEntry::Reveal(reveal) => resolve_reveal(reveal, host),
                GroupEntry::Scrub(scrub) => resolve_scrub(scrub, host),
            };
            if let Err(err) = resolved {
                log::debug!("section `{section}`: skipping entry: {err}");
                if let Some(target) = err.target() {
                    inner.events.push_tween_event(TweenEvent::Skipped {
                        session,
                        section: section.clone(),
                        target: target.clone(),
                        reason: err.to_string(),
                    });
                }
                skipped.push(err);
                continue;
            }

            match entry {
                GroupEntry::Reveal(reveal) => {
                    let index = match (reveal.stagger_index, reveal.batch) {
                        (Some(index), _) => index,
                        (None, Some(batch)) => {
                            let slot = batch_positions.entry(batch).or_default();
                            let index = *slot;
                            *slot += 1;
                            index
                        }
                        (None, None) => reveal_position,
                    };
                    reveal_position += 1;
                    let timing = TrackTiming::new(reveal.start_ms(index, stagger_ms), reveal.spec);
                    let mut track = Track::new(&reveal, timing);
                    track.render_from(host);

                    let actions = reveal.policy.toggle_actions();
                    let existing = watches
                        .iter_mut()
                        .find(|watch| watch.accepts(&reveal, actions));
                    match existing {
                        Some(watch) => watch.tracks.push(track),
                        None => watches.push(Watch::new(
                            session,
                            &section,
                            &reveal,
                            actions,
                            track,
                        )),
                    }
                }
                GroupEntry::Scrub(scrub) => {
                    let mut track = ScrubTrack::new(scrub);
                    track.render_from(host);
                    scrubs.push(track);
                }
            }
        }

        let mut record = SessionRecord {
            section: section.clone(),
            watches: Vec::with_capacity(watches.len()),
            scrubs: Vec::with_capacity(scrubs.len()),
        };
        for mut watch in watches {
            watch.finish_registration(&mut inner.events);
            record.watches.push(watch.id);
            inner.watches.insert(watch.id, watch);
        }
        for scrub in scrubs {
            let id = WatchId::new();
            record.scrubs.push(id);
            inner.scrubs.insert(id, scrub);
        }

        log::info!(
            "registered section `{section}` as session {}: {} watches, {} scrubs, {} skipped",
            session.0,
            record.watches.len(),
            record.scrubs.len(),
            skipped.len()
        );
        inner.sections.insert(section.clone(), session);
        inner.sessions.insert(session, record);
        drop(inner);

        OrchestratorSession::new(session, section, skipped, Arc::downgrade(&self.inner))
    }

    /// Per-frame update: evaluate zones, fire crossings, advance playheads
    /// and write changed values to the host.
    pub fn tick(&self, host: &mut dyn RenderHost, viewport: Viewport, delta_ms: f32) {
        let mut inner = self.inner.lock();
        let Inner {
            watches,
            scrubs,
            events,
            ..
        } = &mut *inner;

        for watch in watches.values_mut() {
            watch.tick(host, &viewport, delta_ms, events);
        }
        for scrub in scrubs.values_mut() {
            scrub.tick(host, &viewport, delta_ms);
        }
    }

    /// Release every session, e.g. on page exit. Outstanding handles become inert.
    pub fn shutdown(&self) {
        let mut inner = self.inner.lock();
        let ids: Vec<SessionId> = inner.sessions.keys().copied().collect();
        for id in &ids {
            inner.release(*id);
        }
        log::info!("orchestrator shut down; released {} sessions", ids.len());
    }

    /// Watches and scrub tracks currently registered.
    pub fn active_watch_count(&self) -> usize {
        let inner = self.inner.lock();
        inner.watches.len() + inner.scrubs.len()
    }

    /// Entries still moving towards their destination.
    pub fn pending_tween_count(&self) -> usize {
        let inner = self.inner.lock();
        let tracks: usize = inner.watches.values().map(Watch::pending_tracks).sum();
        let scrubs = inner.scrubs.values().filter(|s| s.is_pending()).count();
        tracks + scrubs
    }

    /// Watches and scrub tracks owned by one session.
    pub fn session_watch_count(&self, session: SessionId) -> usize {
        self.inner
            .lock()
            .sessions
            .get(&session)
            .map_or(0, |record| record.watches.len() + record.scrubs.len())
    }

    pub fn is_session_active(&self, session: SessionId) -> bool {
        self.inner.lock().sessions.contains_key(&session)
    }

    pub fn active_session_count(&self) -> usize {
        self.inner.lock().sessions.len()
    }

    /// The session currently registered for a section.
    pub fn section_session(&self, section: &str) -> Option<SessionId> {
        self.inner.lock().sections.get(section).copied()
    }

    pub fn drain_events(&self) -> Vec<RevealEventKind> {
        self.inner.lock().events.drain().collect()
    }

    pub fn pending_event_count(&self) -> usize {
        self.inner.lock().events.len()
    }

    /// Events lost to a full queue since it was last drained.
    pub fn dropped_event_count(&self) -> usize {
        self.inner.lock().events.dropped()
    }
}

fn resolve_reveal(entry: &RevealEntry, host: &dyn RenderHost) -> Result<(), RevealError> {
    if host.bounds(&entry.target).is_none() {
        return Err(RevealError::TargetMissing {
            target: entry.target.clone(),
        });
    }
    if let TriggerAnchor::Shared { parent } = &entry.zone.anchor {
        if host.bounds(parent).is_none() {
            return Err(RevealError::TriggerMissing {
                trigger: parent.clone(),
                target: entry.target.clone(),
            });
        }
    }
    Ok(())
}

fn resolve_scrub(entry: &ScrubEntry, host: &dyn RenderHost) -> Result<(), RevealError> {
    if host.bounds(&entry.target).is_none() {
        return Err(RevealError::TargetMissing {
            target: entry.target.clone(),
        });
    }
    if let Some(trigger) = &entry.trigger {
        if host.bounds(trigger).is_none() {
            return Err(RevealError::TriggerMissing {
                trigger: trigger.clone(),
                target: entry.target.clone(),
            });
        }
    }
    Ok(())
}

/// State shared by the orchestrator and the sessions it hands out.
#[derive(Debug, Default)]
pub(crate) struct Inner {
    sessions: HashMap<SessionId, SessionRecord>,
    /// Active session per section name.
    sections: HashMap<String, SessionId>,
    watches: BTreeMap<WatchId, Watch>,
    scrubs: BTreeMap<WatchId, ScrubTrack>,
    events: EventQueue,
}

impl Inner {
    pub(crate) fn has_session(&self, session: SessionId) -> bool {
        self.sessions.contains_key(&session)
    }

    /// Remove a session and everything it registered.
    ///
    /// Returns `false` if the session was already released.
    pub(crate) fn release(&mut self, session: SessionId) -> bool {
        let Some(record) = self.sessions.remove(&session) else {
            return false;
        };
        if self.sections.get(&record.section) == Some(&session) {
            self.sections.remove(&record.section);
        }

        let mut interrupted = 0;
        for id in &record.watches {
            let Some(watch) = self.watches.remove(id) else {
                continue;
            };
            for track in watch.tracks.iter().filter(|t| watch.is_in_flight(t)) {
                interrupted += 1;
                self.events.push_tween_event(TweenEvent::Interrupted {
                    session,
                    section: record.section.clone(),
                    target: track.target.clone(),
                });
            }
        }
        for id in &record.scrubs {
            self.scrubs.remove(id);
        }

        log::info!(
            "released session {} (`{}`): {} watches, {} scrubs, {} tweens interrupted",
            session.0,
            record.section,
            record.watches.len(),
            record.scrubs.len(),
            interrupted
        );
        true
    }
}

#[derive(Debug)]
struct SessionRecord {
    section: String,
    watches: Vec<WatchId>,
    scrubs: Vec<WatchId>,
}

/// One trigger evaluation and the entries it drives.
#[derive(Debug)]
struct Watch {
    id: WatchId,
    session: SessionId,
    section: String,
    /// Element the zone is measured against; `None` for mount watches.
    trigger: Option<TargetId>,
    zone: TriggerZone,
    actions: ToggleActions,
    batch: Option<usize>,
    state: Option<ZoneState>,
    playhead: Playhead,
    tracks: Vec<Track>,
}

impl Watch {
    fn new(
        session: SessionId,
        section: &str,
        entry: &RevealEntry,
        actions: ToggleActions,
        track: Track,
    ) -> Self {
        let trigger = match &entry.zone.anchor {
            TriggerAnchor::Own => Some(entry.target.clone()),
            TriggerAnchor::Shared { parent } => Some(parent.clone()),
            TriggerAnchor::Mount => None,
        };
        Self {
            id: WatchId::new(),
            session,
            section: section.to_string(),
            trigger,
            zone: entry.zone.clone(),
            actions,
            batch: entry.batch,
            state: None,
            playhead: Playhead::default(),
            tracks: vec![track],
        }
    }

    /// Whether an entry joins this watch instead of starting its own.
    ///
    /// Mount entries share one timeline per policy. Shared entries join
    /// watches with the same zone, policy and batch.
    fn accepts(&self, entry: &RevealEntry, actions: ToggleActions) -> bool {
        if self.actions != actions {
            return false;
        }
        match (&entry.zone.anchor, &self.zone.anchor) {
            (TriggerAnchor::Mount, TriggerAnchor::Mount) => true,
            (TriggerAnchor::Shared { .. }, _) => {
                self.zone == entry.zone && self.batch == entry.batch
            }
            _ => false,
        }
    }

    /// Size the timeline to its tracks; mount watches enter right away.
    fn finish_registration(&mut self, events: &mut EventQueue) {
        let total = self
            .tracks
            .iter()
            .map(|track| track.timing.end_ms())
            .fold(0.0, f32::max);
        self.playhead = Playhead::new(total);

        if self.trigger.is_none() {
            self.fire(Crossing::Enter, events);
            self.state = Some(ZoneState::Active);
        }
    }

    fn tick(
        &mut self,
        host: &mut dyn RenderHost,
        viewport: &Viewport,
        delta_ms: f32,
        events: &mut EventQueue,
    ) {
        if let Some(trigger) = &self.trigger {
            let Some(bounds) = host.bounds(trigger) else {
                return;
            };
            let state = self.zone.state_at(&bounds, viewport);
            for crossing in crossings(self.state, state) {
                self.fire(crossing, events);
            }
            self.state = Some(state);
        }

        self.playhead.advance(delta_ms);
        let time_ms = self.playhead.time_ms();
        for track in &mut self.tracks {
            if host.bounds(&track.target).is_none() {
                continue;
            }
            for change in track.update(time_ms, host) {
                events.push_tween_event(change.into_event(
                    self.session,
                    &self.section,
                    &track.target,
                ));
            }
        }
    }

    fn fire(&mut self, crossing: Crossing, events: &mut EventQueue) {
        let action = self.actions.action_for(crossing);
        log::debug!(
            "`{}` watch {}: {crossing:?} -> {action:?}",
            self.section,
            self.id.0
        );
        match action {
            ToggleAction::None => {}
            ToggleAction::Play => self.playhead.play(),
            ToggleAction::Reverse => self.playhead.reverse(),
            ToggleAction::Restart => self.playhead.restart(),
            ToggleAction::Reset => self.playhead.reset(),
            ToggleAction::Complete => self.playhead.complete(),
        }

        let session = self.session;
        let section = self.section.clone();
        let watch = self.id;
        let trigger = self.trigger.clone();
        events.push_trigger_event(match crossing {
            Crossing::Enter => TriggerEvent::Entered {
                session,
                section,
                watch,
                trigger,
            },
            Crossing::Leave => TriggerEvent::Left {
                session,
                section,
                watch,
                trigger,
            },
            Crossing::EnterBack => TriggerEvent::EnteredBack {
                session,
                section,
                watch,
                trigger,
            },
            Crossing::LeaveBack => TriggerEvent::LeftBack {
                session,
                section,
                watch,
                trigger,
            },
        });
    }

    /// Tracks the running playhead has yet to carry to its end.
    fn pending_tracks(&self) -> usize {
        if !self.playhead.is_running() {
            return 0;
        }
        let direction = self.playhead.direction();
        self.tracks
            .iter()
            .filter(|track| {
                let progress = track.last_applied.unwrap_or(0.0);
                match direction {
                    PlayDirection::Forward => progress < 1.0,
                    PlayDirection::Backward => progress > 0.0,
                    PlayDirection::Stopped => false,
                }
            })
            .count()
    }

    fn is_in_flight(&self, track: &Track) -> bool {
        self.playhead.is_running()
            && track
                .last_applied
                .is_some_and(|progress| progress > 0.0 && progress < 1.0)
    }
}

/// Lifecycle transitions of a track, turned into [`TweenEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackChange {
    Started,
    Completed,
    Reverted,
}

impl TrackChange {
    fn into_event(self, session: SessionId, section: &str, target: &TargetId) -> TweenEvent {
        let section = section.to_string();
        let target = target.clone();
        match self {
            Self::Started => TweenEvent::Started {
                session,
                section,
                target,
            },
            Self::Completed => TweenEvent::Completed {
                session,
                section,
                target,
            },
            Self::Reverted => TweenEvent::Reverted {
                session,
                section,
                target,
            },
        }
    }
}

/// One entry on a watch's timeline.
#[derive(Debug)]
struct Track {
    target: TargetId,
    from: PropertyState,
    to: PropertyState,
    timing: TrackTiming,
    /// Progress last written to the host.
    last_applied: Option<f32>,
}

impl Track {
    fn new(entry: &RevealEntry, timing: TrackTiming) -> Self {
        Self {
            target: entry.target.clone(),
            from: entry.from.clone(),
            to: entry.to.clone(),
            timing,
            last_applied: None,
        }
    }

    fn values_at(&self, progress: f32) -> PropertyState {
        let eased = self.timing.spec.easing.evaluate(progress);
        self.from.interpolate(&self.to, eased)
    }

    fn render_from(&mut self, host: &mut dyn RenderHost) {
        host.apply(&self.target, &self.values_at(0.0));
        self.last_applied = Some(0.0);
    }

    fn update(&mut self, time_ms: f32, host: &mut dyn RenderHost) -> Vec<TrackChange> {
        let progress = self.timing.progress_at(time_ms);
        let previous = self.last_applied.unwrap_or(0.0);
        if self.last_applied == Some(progress) {
            return Vec::new();
        }
        host.apply(&self.target, &self.values_at(progress));
        self.last_applied = Some(progress);

        let mut changes = Vec::new();
        if previous <= 0.0 && progress > 0.0 {
            changes.push(TrackChange::Started);
        }
        if previous < 1.0 && progress >= 1.0 {
            changes.push(TrackChange::Completed);
        }
        if previous > 0.0 && progress <= 0.0 {
            changes.push(TrackChange::Reverted);
        }
        changes
    }
}

/// A scrub entry and its displayed progress.
#[derive(Debug)]
struct ScrubTrack {
    target: TargetId,
    trigger: TargetId,
    start: TriggerPosition,
    end: TriggerPosition,
    from: PropertyState,
    to: PropertyState,
    easing: EasingFunction,
    smoothing_ms: Option<f32>,
    /// Progress dictated by the scroll offset.
    scroll_progress: f32,
    /// Progress last written to the host.
    progress: f32,
}

impl ScrubTrack {
    fn new(entry: ScrubEntry) -> Self {
        let trigger = entry.trigger_target().clone();
        Self {
            target: entry.target,
            trigger,
            start: entry.start,
            end: entry.end,
            from: entry.from,
            to: entry.to,
            easing: entry.easing,
            smoothing_ms: entry.smoothing_ms,
            scroll_progress: 0.0,
            progress: 0.0,
        }
    }

    fn values_at(&self, progress: f32) -> PropertyState {
        self.from.interpolate(&self.to, self.easing.evaluate(progress))
    }

    fn render_from(&mut self, host: &mut dyn RenderHost) {
        host.apply(&self.target, &self.values_at(0.0));
    }

    fn is_pending(&self) -> bool {
        self.progress != self.scroll_progress
    }

    fn tick(&mut self, host: &mut dyn RenderHost, viewport: &Viewport, delta_ms: f32) {
        let Some(bounds) = host.bounds(&self.trigger) else {
            return;
        };
        if host.bounds(&self.target).is_none() {
            return;
        }
        self.scroll_progress = progress_between(&self.start, &self.end, &bounds, viewport) as f32;

        let next = match self.smoothing_ms {
            Some(smoothing) if smoothing > 0.0 => {
                let step = (delta_ms.max(0.0) / smoothing).min(1.0);
                let next = self.progress + (self.scroll_progress - self.progress) * step;
                if (self.scroll_progress - next).abs() < SCRUB_SNAP {
                    self.scroll_progress
                } else {
                    next
                }
            }
            _ => self.scroll_progress,
        };
        if next == self.progress {
            return;
        }
        self.progress = next;
        host.apply(&self.target, &self.values_at(next));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimulatedPage;
    use crate::trigger::{ElementBounds, RepeatPolicy};
    use crate::types::AnimatableProperty;

    const EPSILON: f64 = 0.001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn page() -> SimulatedPage {
        let mut page = SimulatedPage::new(500.0);
        page.attach("card", ElementBounds::new(1000.0, 200.0));
        page.attach("grid", ElementBounds::new(1000.0, 400.0));
        page.attach("a", ElementBounds::new(1000.0, 100.0));
        page.attach("b", ElementBounds::new(1100.0, 100.0));
        page.attach("spacer", ElementBounds::new(2000.0, 1000.0));
        page
    }

    fn run(orchestrator: &ScrollRevealOrchestrator, page: &mut SimulatedPage, frames: usize) {
        for _ in 0..frames {
            let viewport = page.viewport();
            orchestrator.tick(page, viewport, 16.0);
        }
    }

    fn fade(target: &str) -> RevealEntry {
        RevealEntry::new(target)
            .from(PropertyState::new().opacity(0.0).y(40.0))
            .to(PropertyState::new().opacity(1.0).y(0.0))
            .duration_ms(200.0)
    }

    #[test]
    fn test_register_renders_from_state() {
        let orchestrator = ScrollRevealOrchestrator::new();
        let mut page = page();
        let session =
            orchestrator.register_group(RevealGroup::new("s").reveal(fade("card")), &mut page);

        assert!(session.skipped().is_empty());
        assert_eq!(orchestrator.active_watch_count(), 1);
        assert_eq!(page.value("card", AnimatableProperty::Opacity), Some(0.0));
        assert_eq!(page.value("card", AnimatableProperty::TranslateY), Some(40.0));
    }

    #[test]
    fn test_play_and_reverse() {
        let orchestrator = ScrollRevealOrchestrator::new();
        let mut page = page();
        let _session =
            orchestrator.register_group(RevealGroup::new("s").reveal(fade("card")), &mut page);

        // card top reaches 80% of the viewport at scroll 600
        page.scroll_to(700.0);
        run(&orchestrator, &mut page, 20);
        let opacity = page.value("card", AnimatableProperty::Opacity).unwrap();
        assert!(approx_eq(opacity, 1.0));

        page.scroll_to(0.0);
        run(&orchestrator, &mut page, 20);
        let opacity = page.value("card", AnimatableProperty::Opacity).unwrap();
        assert!(approx_eq(opacity, 0.0));
    }

    #[test]
    fn test_shared_entries_join_one_watch() {
        let orchestrator = ScrollRevealOrchestrator::new();
        let mut page = page();
        let group = RevealGroup::new("grid")
            .staggered(["a", "b"], 50.0, fade("").zone(TriggerZone::shared("grid")))
            .reveal(fade("card"));
        let session = orchestrator.register_group(group, &mut page);

        assert_eq!(orchestrator.session_watch_count(session.id()), 2);
    }

    #[test]
    fn test_different_policies_split_shared_watch() {
        let orchestrator = ScrollRevealOrchestrator::new();
        let mut page = page();
        let group = RevealGroup::new("grid")
            .reveal(fade("a").zone(TriggerZone::shared("grid")))
            .reveal(
                fade("b")
                    .zone(TriggerZone::shared("grid"))
                    .policy(RepeatPolicy::PlayOnce),
            );
        let session = orchestrator.register_group(group, &mut page);
        assert_eq!(orchestrator.session_watch_count(session.id()), 2);
    }

    #[test]
    fn test_batches_on_one_zone_get_their_own_watches() {
        let orchestrator = ScrollRevealOrchestrator::new();
        let mut page = page();
        let shared = || fade("").zone(TriggerZone::shared("grid"));
        let group = RevealGroup::new("grid")
            .staggered(["a", "b"], 50.0, shared())
            .staggered(["card"], 50.0, shared());
        let session = orchestrator.register_group(group, &mut page);
        assert_eq!(orchestrator.session_watch_count(session.id()), 2);
    }

    #[test]
    fn test_mount_entries_split_by_policy() {
        let orchestrator = ScrollRevealOrchestrator::new();
        let mut page = page();
        let actions: ToggleActions = "complete none none none".parse().unwrap();
        let group = RevealGroup::new("hero")
            .reveal(fade("a").zone(TriggerZone::on_mount()))
            .reveal(
                fade("b")
                    .zone(TriggerZone::on_mount())
                    .policy(RepeatPolicy::Custom { actions }),
            );
        let session = orchestrator.register_group(group, &mut page);
        assert_eq!(orchestrator.session_watch_count(session.id()), 2);

        // `b` jumps to its end state on the first frame
        run(&orchestrator, &mut page, 1);
        assert!(approx_eq(page.value("b", AnimatableProperty::Opacity).unwrap(), 1.0));
        assert!(page.value("a", AnimatableProperty::Opacity).unwrap() < 1.0);
    }

    #[test]
    fn test_mount_watch_plays_without_scrolling() {
        let orchestrator = ScrollRevealOrchestrator::new();
        let mut page = page();
        let group = RevealGroup::new("hero")
            .reveal(fade("a").zone(TriggerZone::on_mount()))
            .reveal(fade("b").zone(TriggerZone::on_mount()).at_ms(100.0));
        let session = orchestrator.register_group(group, &mut page);
        assert_eq!(orchestrator.session_watch_count(session.id()), 1);

        // 224ms: `a` is done, `b` has been running for 124ms
        run(&orchestrator, &mut page, 14);
        assert!(approx_eq(page.value("a", AnimatableProperty::Opacity).unwrap(), 1.0));
        assert!(page.value("b", AnimatableProperty::Opacity).unwrap() < 1.0);

        run(&orchestrator, &mut page, 20);
        assert!(approx_eq(page.value("b", AnimatableProperty::Opacity).unwrap(), 1.0));
        assert_eq!(orchestrator.pending_tween_count(), 0);
    }

    #[test]
    fn test_detached_trigger_freezes_watch() {
        let orchestrator = ScrollRevealOrchestrator::new();
        let mut page = page();
        let _session =
            orchestrator.register_group(RevealGroup::new("s").reveal(fade("card")), &mut page);

        page.detach("card");
        page.scroll_to(700.0);
        run(&orchestrator, &mut page, 5);
        assert_eq!(page.write_count(), 1);
        assert!(orchestrator
            .drain_events()
            .iter()
            .all(|event| !event.is_entered()));
    }

    #[test]
    fn test_scrub_follows_scroll() {
        let orchestrator = ScrollRevealOrchestrator::new();
        let mut page = page();
        let scrub = ScrubEntry::new("card")
            .from(PropertyState::new().y(0.0))
            .to(PropertyState::new().y(100.0))
            .start(TriggerPosition::top(1.0))
            .end(TriggerPosition::top(0.0));
        let _session = orchestrator.register_group(RevealGroup::new("s").scrub(scrub), &mut page);

        // range runs from scroll 500 to 1000
        page.scroll_to(750.0);
        run(&orchestrator, &mut page, 1);
        assert!(approx_eq(page.value("card", AnimatableProperty::TranslateY).unwrap(), 50.0));
        assert_eq!(orchestrator.pending_tween_count(), 0);
    }

    #[test]
    fn test_smoothed_scrub_catches_up() {
        let orchestrator = ScrollRevealOrchestrator::new();
        let mut page = page();
        let scrub = ScrubEntry::new("card")
            .from(PropertyState::new().y(0.0))
            .to(PropertyState::new().y(100.0))
            .start(TriggerPosition::top(1.0))
            .end(TriggerPosition::top(0.0))
            .smoothing_ms(Some(160.0));
        let _session = orchestrator.register_group(RevealGroup::new("s").scrub(scrub), &mut page);

        page.scroll_to(1000.0);
        run(&orchestrator, &mut page, 1);
        // one 16ms frame covers a tenth of the remaining distance
        assert!(approx_eq(page.value("card", AnimatableProperty::TranslateY).unwrap(), 10.0));
        assert_eq!(orchestrator.pending_tween_count(), 1);

        run(&orchestrator, &mut page, 200);
        assert!(approx_eq(page.value("card", AnimatableProperty::TranslateY).unwrap(), 100.0));
        assert_eq!(orchestrator.pending_tween_count(), 0);
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let orchestrator = ScrollRevealOrchestrator::new();
        let mut page = page();
        let first =
            orchestrator.register_group(RevealGroup::new("one").reveal(fade("a")), &mut page);
        let second =
            orchestrator.register_group(RevealGroup::new("two").reveal(fade("b")), &mut page);
        assert_eq!(orchestrator.active_session_count(), 2);

        orchestrator.shutdown();
        assert_eq!(orchestrator.active_session_count(), 0);
        assert_eq!(orchestrator.active_watch_count(), 0);
        assert!(!first.is_active());
        assert!(!second.is_active());
    }

    #[test]
    fn test_global_is_shared() {
        let a = ScrollRevealOrchestrator::global();
        let b = ScrollRevealOrchestrator::global();
        assert!(Arc::ptr_eq(&a.inner, &b.inner));
    }
}
