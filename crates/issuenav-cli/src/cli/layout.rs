use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use issuenav_core::{KeyboardScope, Layout, Region, RegionBinding, StateField};

#[derive(Debug, Default)]
struct LayoutInner {
    rendered: bool,
    footer_markers: Vec<String>,
    bindings: Vec<RegionBinding>,
}

/// Text layout: records what was mounted where, for the summary printer.
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    inner: Rc<RefCell<LayoutInner>>,
}

impl TextLayout {
    pub fn is_rendered(&self) -> bool {
        self.inner.borrow().rendered
    }

    pub fn footer_markers(&self) -> Vec<String> {
        self.inner.borrow().footer_markers.clone()
    }

    /// Regions in the order they were mounted
    pub fn mounted_regions(&self) -> Vec<Region> {
        self.inner.borrow().bindings.iter().map(|b| b.region).collect()
    }
}

impl Layout for TextLayout {
    fn render(&mut self) {
        self.inner.borrow_mut().rendered = true;
    }

    fn mark_footer(&mut self, marker: &str) {
        let mut inner = self.inner.borrow_mut();
        if !inner.footer_markers.iter().any(|m| m == marker) {
            inner.footer_markers.push(marker.to_string());
        }
    }

    fn show(&mut self, binding: RegionBinding) {
        let region = binding.region;
        binding.screen.state().subscribe(move |_, changed| {
            if changed.iter().any(|f| matches!(f, StateField::Query | StateField::Filter)) {
                debug!("{} region out of date", region.name());
            }
        });

        let mut inner = self.inner.borrow_mut();
        inner.bindings.retain(|b| b.region != region);
        inner.bindings.push(binding);
    }
}

/// Active keyboard scope, shared with the summary printer.
#[derive(Debug, Clone, Default)]
pub struct ScopeRegistry {
    active: Rc<RefCell<Option<String>>>,
}

impl ScopeRegistry {
    pub fn active(&self) -> Option<String> {
        self.active.borrow().clone()
    }
}

impl KeyboardScope for ScopeRegistry {
    fn set_scope(&mut self, scope: &str) {
        info!("Keyboard scope set to '{}'", scope);
        *self.active.borrow_mut() = Some(scope.to_string());
    }
}
