use crate::view::{Overlay, ProductView};

/// Open/closed flags for every overlay plus the page-wide scroll lock.
///
/// There is one lock, not a count: closing any overlay releases it even if
/// another is still open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlays {
    compare_colors: bool,
    size_chart: bool,
    cart_drawer: bool,
    scroll_locked: bool,
}

impl Overlays {
    pub fn is_open(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::CompareColors => self.compare_colors,
            Overlay::SizeChart => self.size_chart,
            Overlay::CartDrawer => self.cart_drawer,
        }
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    fn flag_mut(&mut self, overlay: Overlay) -> &mut bool {
        match overlay {
            Overlay::CompareColors => &mut self.compare_colors,
            Overlay::SizeChart => &mut self.size_chart,
            Overlay::CartDrawer => &mut self.cart_drawer,
        }
    }

    pub fn open<V: ProductView>(&mut self, overlay: Overlay, view: &mut V) {
        *self.flag_mut(overlay) = true;
        view.set_overlay_open(overlay, true);
        self.scroll_locked = true;
        view.set_scroll_locked(true);
        tracing::debug!(?overlay, "overlay opened");
    }

    /// Close every modal, whichever one the close gesture came from.
    pub fn close_modals<V: ProductView>(&mut self, view: &mut V) {
        for modal in Overlay::MODALS {
            *self.flag_mut(modal) = false;
            view.set_overlay_open(modal, false);
        }
        self.release_scroll(view);
        tracing::debug!("modals closed");
    }

    pub fn close_cart<V: ProductView>(&mut self, view: &mut V) {
        self.cart_drawer = false;
        view.set_overlay_open(Overlay::CartDrawer, false);
        self.release_scroll(view);
        tracing::debug!("cart drawer closed");
    }

    /// The global cancel gesture (Escape): modals and drawer together.
    pub fn close_all<V: ProductView>(&mut self, view: &mut V) {
        self.close_modals(view);
        self.close_cart(view);
    }

    fn release_scroll<V: ProductView>(&mut self, view: &mut V) {
        self.scroll_locked = false;
        view.set_scroll_locked(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RecordingView;

    #[test]
    fn test_open_then_close_releases_scroll() {
        let mut overlays = Overlays::default();
        let mut view = RecordingView::new();
        overlays.open(Overlay::SizeChart, &mut view);
        assert!(overlays.is_open(Overlay::SizeChart));
        assert!(overlays.scroll_locked());
        overlays.close_modals(&mut view);
        assert!(!overlays.is_open(Overlay::SizeChart));
        assert!(!overlays.scroll_locked());
    }

    #[test]
    fn test_single_lock_is_released_by_first_close() {
        let mut overlays = Overlays::default();
        let mut view = RecordingView::new();
        overlays.open(Overlay::CompareColors, &mut view);
        overlays.open(Overlay::CartDrawer, &mut view);
        overlays.close_cart(&mut view);
        assert!(overlays.is_open(Overlay::CompareColors));
        assert!(!overlays.scroll_locked());
    }

    #[test]
    fn test_close_all_covers_drawer() {
        let mut overlays = Overlays::default();
        let mut view = RecordingView::new();
        overlays.open(Overlay::CartDrawer, &mut view);
        overlays.close_all(&mut view);
        assert_eq!(overlays, Overlays::default());
    }
}
