use crate::action::Action;
use crate::cart;
use crate::config::PageConfig;
use crate::gallery::{self, Zoom};
use crate::numeric::parse_int_prefix;
use crate::overlay::Overlays;
use crate::size_chart;
use crate::state::{Color, Field, Font, ProductSelection, Quantity, Size};
use crate::timer::Scheduler;
use crate::toast::Toast;
use crate::view::{AccordionKind, Overlay, ProductView};

/// Work the page defers to a later clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    HideToast,
    EndCartAnimation,
}

/// Owns the product selection and all page UI state, and is the only writer
/// of either. Every action mutates state first, then pushes the result to
/// the view.
pub struct PageController<V: ProductView> {
    config: PageConfig,
    selection: ProductSelection,
    overlays: Overlays,
    toast: Toast,
    zoom: Zoom,
    current_image: String,
    timers: Scheduler<Deferred>,
    view: V,
}

impl<V: ProductView> PageController<V> {
    /// Take over a loaded page: mark the first thumbnail and bring the
    /// state-derived regions in line with the initial selection.
    pub fn new(config: PageConfig, mut view: V) -> Self {
        if view.thumbnail_url(0).is_some() {
            view.highlight_thumbnail(0);
        }
        let mut controller = Self {
            selection: config.initial_selection(),
            overlays: Overlays::default(),
            toast: Toast::new(config.toast_policy, config.toast_ms),
            zoom: Zoom::default(),
            current_image: view.main_image_url(),
            timers: Scheduler::new(),
            config,
            view,
        };
        controller.sync_all();
        controller
    }

    pub fn selection(&self) -> &ProductSelection {
        &self.selection
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Run every deferred task due by `now_ms`, then hold the clock there.
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some((due, task)) = self.timers.pop_due(now_ms) {
            tracing::trace!(due, ?task, "timer fired");
            match task {
                Deferred::HideToast => self.toast.hide(&mut self.view),
                Deferred::EndCartAnimation => cart::end_animation(&mut self.view),
            }
        }
        self.timers.set_now(now_ms);
    }

    /// Advance the clock to `now_ms`, then handle `action`.
    pub fn dispatch_at(&mut self, now_ms: u64, action: Action) {
        self.advance_to(now_ms);
        self.dispatch(action);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatch");
        match action {
            Action::SelectThumbnail { index } => self.select_thumbnail(index),
            Action::SelectColor { color } => self.select_color(color),
            Action::SelectSize { size } => self.select_size(size),
            Action::IncrementQuantity => self.step_quantity(Quantity::incremented),
            Action::DecrementQuantity => self.step_quantity(Quantity::decremented),
            Action::QuantityInput { text } => self.quantity_input(&text),
            Action::ToggleWishlist => self.toggle_wishlist(),
            Action::SwitchTab { tab } => self.view.activate_tab(&tab),
            Action::OpenCompareColors => self.overlays.open(Overlay::CompareColors, &mut self.view),
            Action::OpenSizeChart => self.overlays.open(Overlay::SizeChart, &mut self.view),
            Action::CloseModals => self.overlays.close_modals(&mut self.view),
            Action::SwitchSizeChartUnit { unit } => {
                size_chart::switch_unit(&mut self.view, unit);
            }
            Action::QuickAdd => {
                self.notify("Item added to cart");
                self.add_to_cart(1);
            }
            Action::ToggleAccordion { index } => {
                self.view.toggle_accordion(AccordionKind::Details, index);
            }
            Action::ToggleFaq { index } => {
                self.view.toggle_accordion(AccordionKind::Faq, index);
            }
            Action::SetPersonalization { enabled } => self.set_personalization(enabled),
            Action::PersonalizationText { text } => self.personalization_text(text),
            Action::SelectFont { font } => self.select_font(font),
            Action::ToggleMobileMenu => {
                self.view.toggle_nav();
            }
            Action::OpenCart => self.overlays.open(Overlay::CartDrawer, &mut self.view),
            Action::CloseCart => self.overlays.close_cart(&mut self.view),
            Action::KeyDown { key } => {
                if key == "Escape" {
                    self.overlays.close_all(&mut self.view);
                }
            }
            Action::ZoomMove { page_x, page_y, rect } => match gallery::lens_position(page_x, page_y, rect) {
                Some((x, y)) => {
                    let lens = self.zoom.lens(&self.current_image, x, y);
                    self.view.show_zoom(&lens);
                }
                None => tracing::trace!("zoom ignored for empty image rect"),
            },
            Action::ZoomLeave => self.view.hide_zoom(),
            Action::CartAnimationEnd => cart::end_animation(&mut self.view),
        }
    }

    /// Write one field, then resynchronize color, size, quantity and
    /// wishlist regardless of which field changed.
    pub fn set_field(&mut self, field: Field) {
        tracing::debug!(?field, "set field");
        self.selection.apply(field);
        self.sync_all();
    }

    fn sync_all(&mut self) {
        tracing::trace!("resync selection regions");
        self.view.set_active_color(self.selection.color);
        self.view.set_active_size(self.selection.size);
        self.view.set_quantity_display(self.selection.quantity);
        self.view.set_wishlist(self.selection.in_wishlist);
    }

    /// Show a toast message.
    pub fn notify(&mut self, message: &str) {
        self.toast.notify(message, &mut self.view, &mut self.timers);
    }

    pub fn add_to_cart(&mut self, delta: i64) -> i64 {
        cart::add_to_cart(&mut self.view, &mut self.timers, delta, self.config.cart_animation_ms)
    }

    /// Show `url` as the main image; the alt text follows the current color.
    fn set_main_image(&mut self, url: &str) {
        let alt = gallery::main_image_alt(self.selection.color);
        self.view.set_main_image(url, &alt);
        self.current_image = url.to_string();
    }

    fn select_thumbnail(&mut self, index: usize) {
        let Some(url) = self.view.thumbnail_url(index) else {
            tracing::trace!(index, "no such thumbnail");
            return;
        };
        self.set_main_image(&url);
        self.view.highlight_thumbnail(index);
    }

    fn select_color(&mut self, color: Color) {
        self.set_field(Field::Color(color));
        self.view.set_active_color(color);
        self.set_main_image(gallery::image_for_color(color));
    }

    fn select_size(&mut self, size: Size) {
        if !self.view.size_available(size) {
            tracing::trace!(%size, "size unavailable, selection unchanged");
            return;
        }
        self.set_field(Field::Size(size));
        self.view.set_active_size(size);
    }

    fn step_quantity(&mut self, step: fn(Quantity) -> Option<Quantity>) {
        match step(self.selection.quantity) {
            Some(q) => self.set_field(Field::Quantity(q)),
            None => tracing::trace!(quantity = %self.selection.quantity, "quantity at bound"),
        }
    }

    fn quantity_input(&mut self, text: &str) {
        match parse_int_prefix(text).and_then(Quantity::new) {
            Some(q) => self.set_field(Field::Quantity(q)),
            None => {
                tracing::trace!(text, "quantity input rejected");
                self.view.set_quantity_display(self.selection.quantity);
            }
        }
    }

    fn toggle_wishlist(&mut self) {
        self.selection.in_wishlist = !self.selection.in_wishlist;
        let saved = self.selection.in_wishlist;
        tracing::debug!(saved, "wishlist toggled");
        self.view.set_wishlist(saved);
        self.notify(if saved { "Added to wishlist" } else { "Removed from wishlist" });
    }

    fn set_personalization(&mut self, enabled: bool) {
        self.selection.personalization.enabled = enabled;
        self.view.set_personalization_enabled(enabled);
        tracing::debug!(enabled, "personalization toggled");
    }

    fn personalization_text(&mut self, text: String) {
        if !self.selection.personalization.enabled {
            tracing::trace!("personalization disabled, text ignored");
            return;
        }
        self.selection.personalization.text = text;
    }

    fn select_font(&mut self, font: Font) {
        self.view.set_active_font(font);
        self.selection.personalization.font = font;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToastPolicy;
    use crate::view::{RecordingView, ViewCall};
    use pretty_assertions::assert_eq;

    fn controller() -> PageController<RecordingView> {
        let view = RecordingView {
            thumbnails: vec!["assets/1.jpg".into(), "assets/2.jpg".into()],
            main_image: "assets/1.jpg".into(),
            cart_count: "0".into(),
            ..RecordingView::default()
        };
        let mut c = PageController::new(PageConfig::default(), view);
        c.view_mut().take_calls();
        c
    }

    fn full_sync(color: Color, size: Size, quantity: u8, saved: bool) -> Vec<ViewCall> {
        vec![
            ViewCall::ActiveColor(color),
            ViewCall::ActiveSize(size),
            ViewCall::QuantityDisplay(quantity),
            ViewCall::Wishlist(saved),
        ]
    }

    #[test]
    fn test_new_marks_first_thumbnail_and_syncs() {
        let view = RecordingView { thumbnails: vec!["a".into()], ..RecordingView::default() };
        let c = PageController::new(PageConfig::default(), view);
        let mut expected = vec![ViewCall::Thumbnail(0)];
        expected.extend(full_sync(Color::Red, Size::M, 1, false));
        assert_eq!(c.view().calls, expected);
    }

    #[test]
    fn test_every_field_write_resyncs_all_regions() {
        let mut c = controller();
        c.dispatch(Action::IncrementQuantity);
        assert_eq!(c.view_mut().take_calls(), full_sync(Color::Red, Size::M, 2, false));
    }

    #[test]
    fn test_color_selection_swaps_image() {
        let mut c = controller();
        c.dispatch(Action::SelectColor { color: Color::Green });
        let mut expected = full_sync(Color::Green, Size::M, 1, false);
        expected.push(ViewCall::ActiveColor(Color::Green));
        expected.push(ViewCall::MainImage {
            url: "assets/3.jpg".into(),
            alt: "Main Product - Green variant".into(),
        });
        assert_eq!(c.view_mut().take_calls(), expected);
        assert_eq!(c.selection().color, Color::Green);
    }

    #[test]
    fn test_unavailable_size_is_ignored() {
        let mut c = controller();
        c.view_mut().unavailable.insert(Size::Xxl);
        c.dispatch(Action::SelectSize { size: Size::Xxl });
        assert!(c.view().calls.is_empty());
        assert_eq!(c.selection().size, Size::M);
        c.dispatch(Action::SelectSize { size: Size::L });
        assert_eq!(c.selection().size, Size::L);
    }

    #[test]
    fn test_quantity_bounds_are_silent_noops() {
        let mut c = controller();
        c.dispatch(Action::DecrementQuantity);
        assert!(c.view().calls.is_empty());
        c.dispatch(Action::QuantityInput { text: "10".into() });
        c.view_mut().take_calls();
        c.dispatch(Action::IncrementQuantity);
        assert!(c.view().calls.is_empty());
        assert_eq!(c.selection().quantity.get(), 10);
    }

    #[test]
    fn test_bad_quantity_input_rewrites_field() {
        let mut c = controller();
        c.dispatch(Action::QuantityInput { text: "4".into() });
        c.view_mut().take_calls();
        for bad in ["abc", "0", "11", "", "-1"] {
            c.dispatch(Action::QuantityInput { text: bad.into() });
            assert_eq!(c.view_mut().take_calls(), vec![ViewCall::QuantityDisplay(4)]);
        }
        assert_eq!(c.selection().quantity.get(), 4);
    }

    #[test]
    fn test_wishlist_toggle_notifies() {
        let mut c = controller();
        c.dispatch(Action::ToggleWishlist);
        assert_eq!(
            c.view_mut().take_calls(),
            vec![ViewCall::Wishlist(true), ViewCall::ToastShown("Added to wishlist".into())]
        );
        c.dispatch(Action::ToggleWishlist);
        assert!(!c.selection().in_wishlist);
        assert_eq!(c.toast().message(), "Removed from wishlist");
    }

    #[test]
    fn test_quick_add_notifies_then_counts() {
        let mut c = controller();
        c.dispatch(Action::QuickAdd);
        assert_eq!(
            c.view_mut().take_calls(),
            vec![
                ViewCall::ToastShown("Item added to cart".into()),
                ViewCall::CartCount(1),
                ViewCall::CartAnimating(true),
            ]
        );
        c.advance_to(500);
        assert_eq!(c.view_mut().take_calls(), vec![ViewCall::CartAnimating(false)]);
        c.advance_to(3000);
        assert_eq!(c.view_mut().take_calls(), vec![ViewCall::ToastHidden]);
        assert_eq!(c.pending_timers(), 0);
    }

    #[test]
    fn test_overlapping_toasts_hide_on_first_timer() {
        let mut c = controller();
        c.dispatch_at(0, Action::ToggleWishlist);
        c.dispatch_at(1000, Action::ToggleWishlist);
        c.advance_to(2999);
        assert!(c.toast().is_visible());
        c.advance_to(3000);
        assert!(!c.toast().is_visible());
        assert_eq!(c.toast().message(), "Removed from wishlist");
        assert_eq!(c.pending_timers(), 1);
        c.advance_to(4000);
        assert_eq!(c.pending_timers(), 0);
    }

    #[test]
    fn test_supersede_policy_keeps_latest_toast_up() {
        let config = PageConfig { toast_policy: ToastPolicy::Supersede, ..PageConfig::default() };
        let mut c = PageController::new(config, RecordingView::new());
        c.dispatch_at(0, Action::ToggleWishlist);
        c.dispatch_at(1000, Action::ToggleWishlist);
        c.advance_to(3000);
        assert!(c.toast().is_visible());
        c.advance_to(4000);
        assert!(!c.toast().is_visible());
    }

    #[test]
    fn test_escape_closes_everything() {
        let mut c = controller();
        c.dispatch(Action::OpenSizeChart);
        c.dispatch(Action::KeyDown { key: "Enter".into() });
        assert!(c.overlays().is_open(Overlay::SizeChart));
        c.dispatch(Action::KeyDown { key: "Escape".into() });
        assert!(!c.overlays().is_open(Overlay::SizeChart));
        assert!(!c.overlays().scroll_locked());
    }

    #[test]
    fn test_thumbnail_sets_image_with_current_color_alt() {
        let mut c = controller();
        c.dispatch(Action::SelectThumbnail { index: 1 });
        assert_eq!(
            c.view_mut().take_calls(),
            vec![
                ViewCall::MainImage { url: "assets/2.jpg".into(), alt: "Main Product - Red variant".into() },
                ViewCall::Thumbnail(1),
            ]
        );
        c.dispatch(Action::SelectThumbnail { index: 9 });
        assert!(c.view().calls.is_empty());
    }

    #[test]
    fn test_zoom_uses_image_current_at_first_move() {
        let mut c = controller();
        let rect = gallery::ImageRect { left: 0.0, top: 0.0, width: 200.0, height: 100.0 };
        c.dispatch(Action::ZoomMove { page_x: 50.0, page_y: 50.0, rect });
        c.dispatch(Action::SelectColor { color: Color::Blue });
        c.view_mut().take_calls();
        c.dispatch(Action::ZoomMove { page_x: 100.0, page_y: 25.0, rect });
        c.dispatch(Action::ZoomLeave);
        assert_eq!(
            c.view_mut().take_calls(),
            vec![
                ViewCall::Zoom(crate::view::ZoomLens {
                    background: "assets/1.jpg".into(),
                    x_pct: 50.0,
                    y_pct: 25.0,
                }),
                ViewCall::ZoomHidden,
            ]
        );
    }

    #[test]
    fn test_personalization_text_needs_enabled() {
        let mut c = controller();
        c.dispatch(Action::PersonalizationText { text: "AB".into() });
        assert_eq!(c.selection().personalization.text, "");
        c.dispatch(Action::SetPersonalization { enabled: true });
        c.dispatch(Action::PersonalizationText { text: "AB".into() });
        c.dispatch(Action::SelectFont { font: Font::Script });
        let p = &c.selection().personalization;
        assert_eq!((p.enabled, p.text.as_str(), p.font), (true, "AB", Font::Script));
    }

    #[test]
    fn test_accordions_and_nav_toggle_independently() {
        let mut c = controller();
        c.dispatch(Action::ToggleAccordion { index: 0 });
        c.dispatch(Action::ToggleFaq { index: 0 });
        c.dispatch(Action::ToggleAccordion { index: 0 });
        c.dispatch(Action::ToggleMobileMenu);
        assert_eq!(
            c.view_mut().take_calls(),
            vec![
                ViewCall::Accordion { kind: AccordionKind::Details, index: 0, open: true },
                ViewCall::Accordion { kind: AccordionKind::Faq, index: 0, open: true },
                ViewCall::Accordion { kind: AccordionKind::Details, index: 0, open: false },
                ViewCall::Nav(true),
            ]
        );
    }
}
