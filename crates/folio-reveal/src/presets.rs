//! Reveal groups for each section of the portfolio page.
//!
//! Every section registers one [`RevealGroup`] when it mounts. Element ids
//! follow `<section>-<part>` for single elements and
//! `<section>-<part>-<index>` for repeated ones (see [`element_id`]), and
//! the demo layout attaches elements under the same ids.

use folio_config::FolioConfig;

use crate::easing::EasingFunction;
use crate::entry::{RevealEntry, RevealGroup, ScrubEntry};
use crate::trigger::{TriggerPosition, TriggerZone};
use crate::tween::TweenSpec;
use crate::types::{AnimatableProperty, AnimatableValue, PropertyState, TargetId};

/// Id of the `index`th repeated element of a section part.
pub fn element_id(section: &str, part: &str, index: usize) -> TargetId {
    TargetId::new(format!("{section}-{part}-{index}"))
}

/// Id of a single named element of a section.
pub fn part_id(section: &str, part: &str) -> TargetId {
    TargetId::new(format!("{section}-{part}"))
}

fn ids(section: &str, part: &str, count: usize) -> Vec<TargetId> {
    (0..count).map(|i| element_id(section, part, i)).collect()
}

/// How many of each repeated element the page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    /// Elements faded in by the page-level reveal.
    pub reveal_sections: Vec<TargetId>,
    pub headline_chars: usize,
    pub badges: usize,
    pub skill_cards: usize,
    /// Proficiency per tech-stack bar, in percent.
    pub skill_levels: Vec<f64>,
    pub projects: usize,
    pub services: usize,
    pub certificates: usize,
    pub achievements: usize,
    pub education: usize,
    pub contact_cards: usize,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            reveal_sections: [
                "skills",
                "projects",
                "services",
                "certificates",
                "education",
                "contact",
            ]
            .into_iter()
            .map(|section| part_id(section, "heading"))
            .collect(),
            headline_chars: "DEBAPRAKASH".len(),
            badges: 2,
            skill_cards: 4,
            skill_levels: vec![90.0, 85.0, 90.0, 80.0, 75.0, 70.0],
            projects: 6,
            services: 4,
            certificates: 8,
            achievements: 3,
            education: 3,
            contact_cards: 5,
        }
    }
}

/// Builds the page's reveal groups from configured defaults.
#[derive(Debug, Clone)]
pub struct Presets {
    page_spec: TweenSpec,
    page_start: TriggerPosition,
    page_end: TriggerPosition,
    scrub_smoothing_ms: Option<f32>,
}

impl Presets {
    pub fn new(config: &FolioConfig) -> Self {
        let page_start = config.reveal.start.parse().unwrap_or_else(|err| {
            log::warn!("{err}; using top 80%");
            TriggerPosition::top(0.8)
        });
        let page_end = config.reveal.end.parse().unwrap_or_else(|err| {
            log::warn!("{err}; using top 50%");
            TriggerPosition::top(0.5)
        });
        Self {
            page_spec: TweenSpec::from_defaults(&config.reveal),
            page_start,
            page_end,
            scrub_smoothing_ms: config.scrub.smoothing_ms,
        }
    }

    /// Groups for every section, in page order.
    pub fn all(&self, content: &PageContent) -> Vec<RevealGroup> {
        vec![
            self.page(content),
            self.hero(content),
            self.skills(content),
            self.projects(content),
            self.services(content),
            self.certificates(content),
            self.education(content),
            self.contact(content),
        ]
    }

    /// Fade-up for every reveal section, each on its own trigger.
    pub fn page(&self, content: &PageContent) -> RevealGroup {
        let zone = TriggerZone::own().start(self.page_start).end(self.page_end);
        content
            .reveal_sections
            .iter()
            .fold(RevealGroup::new("page"), |group, section| {
                group.reveal(
                    RevealEntry::new(section)
                        .from(PropertyState::new().opacity(0.0).y(50.0))
                        .to(PropertyState::new().opacity(1.0).y(0.0))
                        .zone(zone.clone())
                        .spec(self.page_spec)
                        .stagger_index(0),
                )
            })
    }

    /// Intro timeline played on mount, plus scroll parallax.
    pub fn hero(&self, content: &PageContent) -> RevealGroup {
        let mount = || RevealEntry::new("").zone(TriggerZone::on_mount());
        let fade_up = |target: TargetId, at_ms: f32| {
            mount()
                .with_target(target)
                .from(PropertyState::new().opacity(0.0).y(20.0))
                .to(PropertyState::new().opacity(1.0).y(0.0))
                .duration_ms(600.0)
                .at_ms(at_ms)
        };

        RevealGroup::new("hero")
            .staggered(
                ids("hero", "char", content.headline_chars),
                30.0,
                mount()
                    .from(PropertyState::new().y(100.0).opacity(0.0))
                    .to(PropertyState::new().y(0.0).opacity(1.0))
                    .duration_ms(800.0)
                    .at_ms(200.0),
            )
            .reveal(
                mount()
                    .with_target(part_id("hero", "subheadline"))
                    .from(PropertyState::new().opacity(0.0).blur(10.0))
                    .to(PropertyState::new().opacity(1.0).blur(0.0))
                    .duration_ms(1000.0)
                    .at_ms(400.0),
            )
            .reveal(fade_up(part_id("hero", "description"), 600.0))
            .reveal(fade_up(part_id("hero", "cta"), 800.0))
            .reveal(
                mount()
                    .with_target(part_id("hero", "socials"))
                    .from(PropertyState::new().opacity(0.0).x(-20.0))
                    .to(PropertyState::new().opacity(1.0).x(0.0))
                    .duration_ms(600.0)
                    .at_ms(900.0),
            )
            .reveal(
                mount()
                    .with_target(part_id("hero", "image"))
                    .from(PropertyState::new().opacity(0.0).scale(1.1).x(50.0))
                    .to(PropertyState::new().opacity(1.0).scale(1.0).x(0.0))
                    .duration_ms(1200.0)
                    .easing(EasingFunction::power_out(2))
                    .at_ms(300.0),
            )
            .staggered(
                ids("hero", "badge", content.badges),
                200.0,
                mount()
                    .from(PropertyState::new().opacity(0.0).scale(0.0))
                    .to(PropertyState::new().opacity(1.0).scale(1.0))
                    .duration_ms(600.0)
                    .easing(EasingFunction::back_out(2.0))
                    .at_ms(1000.0),
            )
            .scrub(parallax(part_id("hero", "image"), 80.0))
            .scrub(parallax(part_id("hero", "text"), -30.0))
    }

    pub fn skills(&self, content: &PageContent) -> RevealGroup {
        let width = |percent| {
            PropertyState::new().with(AnimatableProperty::Width, AnimatableValue::percent(percent))
        };
        let bars = content
            .skill_levels
            .iter()
            .enumerate()
            .map(|(i, level)| {
                RevealEntry::new(element_id("skills", "bar", i))
                    .from(width(0.0))
                    .to(width(*level))
                    .zone(TriggerZone::shared(part_id("skills", "tech-stack")))
                    .duration_ms(1200.0)
            })
            .collect::<Vec<_>>();

        RevealGroup::new("skills")
            .staggered(
                ids("skills", "card", content.skill_cards),
                100.0,
                RevealEntry::new("")
                    .from(PropertyState::new().opacity(0.0).y(50.0).rotate_x(-10.0))
                    .to(PropertyState::new().opacity(1.0).y(0.0).rotate_x(0.0))
                    .zone(TriggerZone::shared(part_id("skills", "cards")))
                    .duration_ms(800.0),
            )
            .batch(bars, 100.0)
    }

    /// Project cards tilt in on their own triggers; the connector line is
    /// drawn as the section scrolls past.
    pub fn projects(&self, content: &PageContent) -> RevealGroup {
        let group = (0..content.projects).fold(RevealGroup::new("projects"), |group, i| {
            let tilt = if i % 2 == 0 { -5.0 } else { 5.0 };
            group.reveal(
                RevealEntry::new(element_id("projects", "card", i))
                    .from(PropertyState::new().opacity(0.0).y(80.0).rotate_x(tilt))
                    .to(PropertyState::new().opacity(1.0).y(0.0).rotate_x(0.0))
                    .zone(TriggerZone::own().start(TriggerPosition::top(0.85)))
                    .duration_ms(1000.0)
                    .stagger_index(0),
            )
        });

        group.scrub(
            ScrubEntry::new(part_id("projects", "connector"))
                .from(PropertyState::new().with(AnimatableProperty::StrokeDashOffset, 1000.0))
                .to(PropertyState::new().with(AnimatableProperty::StrokeDashOffset, 0.0))
                .trigger("projects")
                .start(TriggerPosition::top(0.6))
                .end(TriggerPosition::bottom(0.4))
                .smoothing_ms(self.scrub_smoothing_ms),
        )
    }

    pub fn services(&self, content: &PageContent) -> RevealGroup {
        RevealGroup::new("services").staggered(
            ids("services", "card", content.services),
            150.0,
            fade_up("services", "grid", 60.0, 800.0),
        )
    }

    pub fn certificates(&self, content: &PageContent) -> RevealGroup {
        RevealGroup::new("certificates")
            .staggered(
                ids("certificates", "card", content.certificates),
                100.0,
                fade_up("certificates", "grid", 40.0, 600.0),
            )
            .staggered(
                ids("certificates", "achievement", content.achievements),
                100.0,
                RevealEntry::new("")
                    .from(PropertyState::new().opacity(0.0).scale(0.9))
                    .to(PropertyState::new().opacity(1.0).scale(1.0))
                    .zone(TriggerZone::shared(part_id("certificates", "achievements")))
                    .duration_ms(500.0)
                    .easing(EasingFunction::back_out(1.7)),
            )
    }

    pub fn education(&self, content: &PageContent) -> RevealGroup {
        let timeline = part_id("education", "timeline");
        let below = TriggerZone::shared(&timeline).start(TriggerPosition::top(0.75));
        let height = |percent| {
            PropertyState::new().with(AnimatableProperty::Height, AnimatableValue::percent(percent))
        };

        RevealGroup::new("education")
            .reveal(
                RevealEntry::new(part_id("education", "line"))
                    .from(height(0.0))
                    .to(height(100.0))
                    .zone(TriggerZone::shared(&timeline))
                    .duration_ms(1500.0)
                    .stagger_index(0),
            )
            .staggered(
                ids("education", "card", content.education),
                200.0,
                RevealEntry::new("")
                    .from(PropertyState::new().opacity(0.0).x(-30.0))
                    .to(PropertyState::new().opacity(1.0).x(0.0))
                    .zone(below.clone())
                    .duration_ms(800.0),
            )
            .staggered(
                ids("education", "dot", content.education),
                200.0,
                RevealEntry::new("")
                    .from(PropertyState::new().scale(0.0))
                    .to(PropertyState::new().scale(1.0))
                    .zone(below)
                    .duration_ms(400.0)
                    .easing(EasingFunction::back_out(2.0)),
            )
    }

    pub fn contact(&self, content: &PageContent) -> RevealGroup {
        RevealGroup::new("contact")
            .reveal(
                RevealEntry::new(part_id("contact", "cta"))
                    .from(PropertyState::new().scale(0.8).opacity(0.0))
                    .to(PropertyState::new().scale(1.0).opacity(1.0))
                    .duration_ms(1000.0)
                    .stagger_index(0),
            )
            .staggered(
                ids("contact", "card", content.contact_cards),
                100.0,
                fade_up("contact", "grid", 30.0, 600.0),
            )
    }
}

/// Template for cards rising into place, triggered by their shared grid.
fn fade_up(section: &str, grid: &str, rise: f64, duration_ms: f32) -> RevealEntry {
    RevealEntry::new("")
        .from(PropertyState::new().opacity(0.0).y(rise))
        .to(PropertyState::new().opacity(1.0).y(0.0))
        .zone(TriggerZone::shared(part_id(section, grid)))
        .duration_ms(duration_ms)
}

/// Vertical drift while the hero scrolls out of view.
fn parallax(target: TargetId, distance: f64) -> ScrubEntry {
    ScrubEntry::new(target)
        .from(PropertyState::new().y(0.0))
        .to(PropertyState::new().y(distance))
        .trigger("hero")
        .start(TriggerPosition::top(0.0))
        .end(TriggerPosition::bottom(0.0))
}
