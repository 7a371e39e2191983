//! Static page layout for the demo.
//!
//! Sections are stacked top to bottom in document order. Element ids match
//! the ones the presets register, so every entry resolves.

use folio_reveal::{ElementBounds, PageContent, SimulatedPage, TargetId, element_id, part_id};

const SECTION_GAP: f64 = 120.0;
const ROW_GAP: f64 = 24.0;

/// Repeated `<section>-<part>-<i>` elements.
struct Cells<'a> {
    section: &'a str,
    part: &'a str,
    count: usize,
}

fn cells<'a>(section: &'a str, part: &'a str, count: usize) -> Cells<'a> {
    Cells {
        section,
        part,
        count,
    }
}

/// Vertical flow cursor over a page.
struct Flow<'a> {
    page: &'a mut SimulatedPage,
    y: f64,
}

impl Flow<'_> {
    fn block(&mut self, id: impl Into<TargetId>, height: f64) -> ElementBounds {
        let bounds = ElementBounds::new(self.y, height);
        self.page.attach(id, bounds);
        self.y += height;
        bounds
    }

    fn gap(&mut self, height: f64) {
        self.y += height;
    }

    /// Repeated elements in rows of `per_row`, wrapped by a container element.
    fn grid(&mut self, container: TargetId, cells: Cells<'_>, per_row: usize, height: f64) {
        let top = self.y;
        let per_row = per_row.max(1);
        let Cells {
            section,
            part,
            count,
        } = cells;
        for i in 0..count {
            let row = (i / per_row) as f64;
            self.page.attach(
                element_id(section, part, i),
                ElementBounds::new(top + row * (height + ROW_GAP), height),
            );
        }
        let rows = count.div_ceil(per_row) as f64;
        let total = rows * (height + ROW_GAP);
        self.page.attach(container, ElementBounds::new(top, total));
        self.y = top + total;
    }

    /// Lay out a section's children, then attach the section around them.
    fn section(&mut self, id: &str, build: impl FnOnce(&mut Self)) {
        let top = self.y;
        self.gap(80.0);
        self.block(part_id(id, "heading"), 120.0);
        build(self);
        self.page.attach(id, ElementBounds::new(top, self.y - top));
        self.gap(SECTION_GAP);
    }
}

/// Attach every element the presets animate.
pub fn build_page(content: &PageContent, viewport_height: f64) -> SimulatedPage {
    let mut page = SimulatedPage::new(viewport_height);
    let mut flow = Flow {
        page: &mut page,
        y: 0.0,
    };

    hero(&mut flow, content, viewport_height);

    flow.section("skills", |flow| {
        let cards = cells("skills", "card", content.skill_cards);
        flow.grid(part_id("skills", "cards"), cards, 2, 260.0);
        let bars = content.skill_levels.len();
        flow.gap(60.0);
        flow.grid(part_id("skills", "tech-stack"), cells("skills", "bar", bars), 2, 48.0);
    });

    flow.section("projects", |flow| {
        let top = flow.y;
        for i in 0..content.projects {
            flow.block(element_id("projects", "card", i), 420.0);
            flow.gap(ROW_GAP);
        }
        flow.page.attach(
            part_id("projects", "connector"),
            ElementBounds::new(top, flow.y - top),
        );
    });

    flow.section("services", |flow| {
        let cards = cells("services", "card", content.services);
        flow.grid(part_id("services", "grid"), cards, 2, 320.0);
    });

    flow.section("certificates", |flow| {
        let cards = cells("certificates", "card", content.certificates);
        flow.grid(part_id("certificates", "grid"), cards, 3, 220.0);
        flow.gap(60.0);
        let achievements = cells("certificates", "achievement", content.achievements);
        flow.grid(part_id("certificates", "achievements"), achievements, 3, 180.0);
    });

    flow.section("education", |flow| {
        let top = flow.y;
        for i in 0..content.education {
            flow.page
                .attach(element_id("education", "dot", i), ElementBounds::new(flow.y + 24.0, 16.0));
            flow.block(element_id("education", "card", i), 240.0);
            flow.gap(ROW_GAP);
        }
        let height = flow.y - top;
        flow.page
            .attach(part_id("education", "timeline"), ElementBounds::new(top, height));
        flow.page
            .attach(part_id("education", "line"), ElementBounds::new(top, height));
    });

    flow.section("contact", |flow| {
        flow.block(part_id("contact", "cta"), 200.0);
        flow.gap(60.0);
        let cards = cells("contact", "card", content.contact_cards);
        flow.grid(part_id("contact", "grid"), cards, 2, 160.0);
    });

    flow.block("footer", 240.0);
    page
}

fn hero(flow: &mut Flow<'_>, content: &PageContent, viewport_height: f64) {
    let height = viewport_height.max(600.0);
    flow.page.attach("hero", ElementBounds::new(0.0, height));

    let at = |top: f64, h: f64| ElementBounds::new(top, h);
    flow.page.attach(part_id("hero", "text"), at(96.0, 420.0));
    for i in 0..content.headline_chars {
        let line = if i < 4 { 0.0 } else { 1.0 };
        flow.page
            .attach(element_id("hero", "char", i), at(180.0 + line * 90.0, 84.0));
    }
    flow.page.attach(part_id("hero", "subheadline"), at(380.0, 32.0));
    flow.page.attach(part_id("hero", "description"), at(420.0, 48.0));
    flow.page.attach(part_id("hero", "cta"), at(480.0, 48.0));
    flow.page.attach(part_id("hero", "socials"), at(540.0, 40.0));
    flow.page.attach(part_id("hero", "image"), at(120.0, 460.0));
    for i in 0..content.badges {
        flow.page
            .attach(element_id("hero", "badge", i), at(160.0 + i as f64 * 260.0, 56.0));
    }
    flow.y = height + SECTION_GAP;
}
