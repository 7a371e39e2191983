use anyhow::{Context, Result};
use folio_config::FolioConfig;
use folio_reveal::{
    OrchestratorSession, PageContent, Presets, RevealEventKind, ScrollRevealOrchestrator,
    SimulatedPage, TweenEvent,
};

mod layout;

fn main() -> Result<()> {
    // Optional config path as the first argument, else folio.toml / defaults
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let mut config = FolioConfig::load_from_file(&path)
                .with_context(|| format!("loading configuration from {path}"))?;
            config.merge_with_env();
            config
        }
        None => FolioConfig::load(),
    };

    let filter = config.demo.log_filter.as_deref().unwrap_or("info");
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .try_init();

    let content = PageContent::default();
    let mut page = layout::build_page(&content, config.demo.viewport_height);
    log::info!(
        "page laid out: {} elements, {:.0}px tall, {:.0}px viewport",
        page.element_count(),
        page.document_height(),
        page.viewport().height
    );

    let orchestrator = ScrollRevealOrchestrator::global();
    let presets = Presets::new(&config);
    let mut sessions: Vec<OrchestratorSession> = presets
        .all(&content)
        .into_iter()
        .map(|group| orchestrator.register_group(group, &mut page))
        .collect();
    for session in sessions.iter().filter(|s| !s.skipped().is_empty()) {
        log::warn!(
            "section `{}` skipped {} entries",
            session.section(),
            session.skipped().len()
        );
    }
    report("mounted", orchestrator);

    let mut driver = Driver {
        orchestrator,
        page: &mut page,
        frame_ms: config.demo.frame_ms.max(1.0),
    };
    let step = config.demo.scroll_step.max(1.0);
    let bottom = (driver.page.document_height() - driver.page.viewport().height).max(0.0);

    let frames = driver.scroll_until(step, |page| page.viewport().scroll_y >= bottom);
    driver.settle(config.demo.settle_frames);
    log::info!("scrolled down in {frames} frames");
    report("scrolled to bottom", orchestrator);

    let frames = driver.scroll_until(-step, |page| page.viewport().scroll_y <= 0.0);
    driver.settle(config.demo.settle_frames);
    log::info!("scrolled back up in {frames} frames");
    report("scrolled to top", orchestrator);

    for session in &mut sessions {
        session.dispose();
    }
    report("unmounted", orchestrator);
    orchestrator.shutdown();
    Ok(())
}

/// Advances the page one frame at a time.
struct Driver<'a> {
    orchestrator: &'a ScrollRevealOrchestrator,
    page: &'a mut SimulatedPage,
    frame_ms: f32,
}

impl Driver<'_> {
    fn frame(&mut self) {
        let viewport = self.page.viewport();
        self.orchestrator.tick(&mut *self.page, viewport, self.frame_ms);
    }

    /// Scroll by `step` every frame until `done`; returns the frame count.
    fn scroll_until(&mut self, step: f64, done: impl Fn(&SimulatedPage) -> bool) -> usize {
        let mut frames = 0;
        while !done(self.page) {
            self.page.scroll_by(step);
            self.frame();
            frames += 1;
        }
        frames
    }

    fn settle(&mut self, frames: u32) {
        for _ in 0..frames {
            self.frame();
        }
    }
}

fn report(stage: &str, orchestrator: &ScrollRevealOrchestrator) {
    let mut crossings = 0;
    let (mut started, mut completed, mut reverted, mut interrupted, mut skipped) = (0, 0, 0, 0, 0);
    for event in orchestrator.drain_events() {
        match event {
            RevealEventKind::Trigger(_) => crossings += 1,
            RevealEventKind::Tween(TweenEvent::Started { .. }) => started += 1,
            RevealEventKind::Tween(TweenEvent::Completed { .. }) => completed += 1,
            RevealEventKind::Tween(TweenEvent::Reverted { .. }) => reverted += 1,
            RevealEventKind::Tween(TweenEvent::Interrupted { .. }) => interrupted += 1,
            RevealEventKind::Tween(TweenEvent::Skipped { .. }) => skipped += 1,
        }
    }
    log::info!(
        "{stage}: {} sessions, {} watches, {} pending; {crossings} crossings, {started} started, \
         {completed} completed, {reverted} reverted, {interrupted} interrupted, {skipped} skipped",
        orchestrator.active_session_count(),
        orchestrator.active_watch_count(),
        orchestrator.pending_tween_count(),
    );
}
