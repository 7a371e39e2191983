//! The render layer seen from the orchestrator.
//!
//! The orchestrator never owns elements. It asks a [`RenderHost`] where a
//! target currently sits and hands it the values to draw. [`SimulatedPage`]
//! is an in-memory host with a scrollable viewport, used by the tests and
//! the demo driver.

use std::collections::HashMap;

use crate::trigger::{ElementBounds, Viewport};
use crate::types::{AnimatableProperty, PropertyState, TargetId};

/// Element lookup and value sink.
pub trait RenderHost {
    /// Document-space bounds of an attached element, `None` once detached.
    fn bounds(&self, target: &TargetId) -> Option<ElementBounds>;

    /// Write animated values onto an element. Properties not mentioned keep
    /// their current values.
    fn apply(&mut self, target: &TargetId, values: &PropertyState);
}

#[derive(Debug, Clone)]
struct PageElement {
    bounds: ElementBounds,
    values: PropertyState,
}

/// Headless page: elements laid out in document space plus a viewport.
#[derive(Debug, Clone)]
pub struct SimulatedPage {
    elements: HashMap<TargetId, PageElement>,
    viewport: Viewport,
    writes: usize,
}

impl SimulatedPage {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            elements: HashMap::new(),
            viewport: Viewport::new(0.0, viewport_height),
            writes: 0,
        }
    }

    /// Add or move an element. Values already written to it are kept.
    pub fn attach(&mut self, target: impl Into<TargetId>, bounds: ElementBounds) {
        self.elements
            .entry(target.into())
            .and_modify(|element| element.bounds = bounds)
            .or_insert_with(|| PageElement {
                bounds,
                values: PropertyState::new(),
            });
    }

    pub fn detach(&mut self, target: &str) -> bool {
        self.elements.remove(&TargetId::new(target)).is_some()
    }

    pub fn is_attached(&self, target: &str) -> bool {
        self.elements.contains_key(&TargetId::new(target))
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Values written to an element so far.
    pub fn values(&self, target: &str) -> Option<&PropertyState> {
        self.elements
            .get(&TargetId::new(target))
            .map(|element| &element.values)
    }

    /// One property of an element as a plain number.
    pub fn value(&self, target: &str, property: AnimatableProperty) -> Option<f64> {
        self.values(target)
            .and_then(|values| values.get(property))
            .map(|value| value.as_f64())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Height of the document: the lowest element bottom, at least one viewport.
    pub fn document_height(&self) -> f64 {
        self.elements
            .values()
            .map(|element| element.bounds.bottom())
            .fold(self.viewport.height, f64::max)
    }

    /// Scroll to an absolute offset, clamped to the scrollable range.
    pub fn scroll_to(&mut self, scroll_y: f64) {
        let max = (self.document_height() - self.viewport.height).max(0.0);
        self.viewport.scroll_y = scroll_y.clamp(0.0, max);
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.viewport.scroll_y + delta);
    }

    /// Number of `apply` calls that reached an attached element.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl RenderHost for SimulatedPage {
    fn bounds(&self, target: &TargetId) -> Option<ElementBounds> {
        self.elements.get(target).map(|element| element.bounds)
    }

    fn apply(&mut self, target: &TargetId, values: &PropertyState) {
        let Some(element) = self.elements.get_mut(target) else {
            log::debug!("dropping write to detached element `{target}`");
            return;
        };
        element.values.merge(values);
        self.writes += 1;
    }
}
