//! Layout providers: read-only geometry queries, one per sample.
//!
//! The session asks for the stage layout at the moment each sample is
//! processed and never caches the answer, so a resize takes effect on the
//! very next sample.

use std::sync::{Arc, RwLock};

use tiltdrift_motion_model::geometry::StageLayout;

/// Supplies the current container and avatar dimensions on demand.
pub trait LayoutProvider: Send {
    /// The layout right now. Queried per sample, never pushed.
    fn layout(&self) -> StageLayout;
}

/// A layout that never changes. The common case for tests and CLI runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedLayout(pub StageLayout);

impl LayoutProvider for FixedLayout {
    fn layout(&self) -> StageLayout {
        self.0
    }
}

/// A layout shared with a UI thread that may resize the container or
/// avatar while tracking runs.
#[derive(Debug, Clone)]
pub struct SharedLayout {
    inner: Arc<RwLock<StageLayout>>,
}

impl SharedLayout {
    pub fn new(initial: StageLayout) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Replace the layout; the next processed sample sees the new value.
    pub fn set(&self, layout: StageLayout) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = layout;
        }
    }
}

impl LayoutProvider for SharedLayout {
    fn layout(&self) -> StageLayout {
        self.inner
            .read()
            .map(|guard| *guard)
            .unwrap_or(StageLayout::new(0.0, 0.0, 0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_layout_is_constant() {
        let provider = FixedLayout(StageLayout::new(1000.0, 2000.0, 100.0, 100.0));
        assert_eq!(provider.layout().container_width, 1000.0);
        assert_eq!(provider.layout().container_width, 1000.0);
    }

    #[test]
    fn test_shared_layout_sees_resize() {
        let provider = SharedLayout::new(StageLayout::new(0.0, 0.0, 100.0, 100.0));
        assert!(!provider.layout().is_laid_out());

        let handle = provider.clone();
        handle.set(StageLayout::new(800.0, 600.0, 100.0, 100.0));
        assert!(provider.layout().is_laid_out());
        assert_eq!(provider.layout().container_height, 600.0);
    }
}
