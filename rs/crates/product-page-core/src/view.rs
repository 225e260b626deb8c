//! The page as the controller sees it: one method per region.
//!
//! The controller never touches markup directly. [`crate::DomView`] applies
//! these calls to a page tree; [`RecordingView`] keeps a log of them for
//! tests.

use crate::state::{Color, Font, Quantity, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Dialogs and drawers that block the page while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    CompareColors,
    SizeChart,
    CartDrawer,
}

impl Overlay {
    pub const MODALS: [Overlay; 2] = [Overlay::CompareColors, Overlay::SizeChart];
}

/// The two independent accordion groups of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccordionKind {
    Details,
    Faq,
}

/// Magnifier state for the main image.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomLens {
    pub background: String,
    pub x_pct: f64,
    pub y_pct: f64,
}

pub trait ProductView {
    /// Mark exactly the swatch for `color` active and show its name.
    fn set_active_color(&mut self, color: Color);
    /// Mark exactly the option for `size` active and show its name.
    fn set_active_size(&mut self, size: Size);
    /// False when the option for `size` is flagged unavailable or absent.
    fn size_available(&self, size: Size) -> bool;
    fn set_quantity_display(&mut self, quantity: Quantity);
    fn set_wishlist(&mut self, saved: bool);

    fn main_image_url(&self) -> String;
    fn set_main_image(&mut self, url: &str, alt: &str);
    fn thumbnail_url(&self, index: usize) -> Option<String>;
    fn highlight_thumbnail(&mut self, index: usize);
    fn show_zoom(&mut self, lens: &ZoomLens);
    fn hide_zoom(&mut self);

    fn activate_tab(&mut self, tab: &str);
    fn activate_unit_tab(&mut self, unit: &str);
    fn size_chart_cells(&self) -> Vec<String>;
    fn set_size_chart_cell(&mut self, index: usize, text: &str);

    fn set_overlay_open(&mut self, overlay: Overlay, open: bool);
    fn set_scroll_locked(&mut self, locked: bool);

    /// Flip one accordion item; returns whether it is open afterwards.
    fn toggle_accordion(&mut self, kind: AccordionKind, index: usize) -> bool;
    /// Flip the main navigation; returns whether it is open afterwards.
    fn toggle_nav(&mut self) -> bool;

    fn set_personalization_enabled(&mut self, enabled: bool);
    fn set_active_font(&mut self, font: Font);

    fn show_toast(&mut self, message: &str);
    fn hide_toast(&mut self);

    fn cart_count_text(&self) -> String;
    fn set_cart_count(&mut self, count: i64);
    fn set_cart_animating(&mut self, animating: bool);
}

/// Every write a [`RecordingView`] received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    ActiveColor(Color),
    ActiveSize(Size),
    QuantityDisplay(u8),
    Wishlist(bool),
    MainImage { url: String, alt: String },
    Thumbnail(usize),
    Zoom(ZoomLens),
    ZoomHidden,
    Tab(String),
    UnitTab(String),
    ChartCell { index: usize, text: String },
    Overlay { overlay: Overlay, open: bool },
    ScrollLocked(bool),
    Accordion { kind: AccordionKind, index: usize, open: bool },
    Nav(bool),
    PersonalizationEnabled(bool),
    ActiveFont(Font),
    ToastShown(String),
    ToastHidden,
    CartCount(i64),
    CartAnimating(bool),
}

/// Test double: answers reads from a few plain fields and logs every write.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    pub unavailable: HashSet<Size>,
    pub thumbnails: Vec<String>,
    pub main_image: String,
    pub chart_cells: Vec<String>,
    pub cart_count: String,
    pub accordions: HashSet<(AccordionKind, usize)>,
    pub nav_open: bool,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget logged calls, keeping the simulated page.
    pub fn take_calls(&mut self) -> Vec<ViewCall> {
        std::mem::take(&mut self.calls)
    }
}

impl ProductView for RecordingView {
    fn set_active_color(&mut self, color: Color) {
        self.calls.push(ViewCall::ActiveColor(color));
    }

    fn set_active_size(&mut self, size: Size) {
        self.calls.push(ViewCall::ActiveSize(size));
    }

    fn size_available(&self, size: Size) -> bool {
        !self.unavailable.contains(&size)
    }

    fn set_quantity_display(&mut self, quantity: Quantity) {
        self.calls.push(ViewCall::QuantityDisplay(quantity.get()));
    }

    fn set_wishlist(&mut self, saved: bool) {
        self.calls.push(ViewCall::Wishlist(saved));
    }

    fn main_image_url(&self) -> String {
        self.main_image.clone()
    }

    fn set_main_image(&mut self, url: &str, alt: &str) {
        self.main_image = url.to_string();
        self.calls.push(ViewCall::MainImage { url: url.to_string(), alt: alt.to_string() });
    }

    fn thumbnail_url(&self, index: usize) -> Option<String> {
        self.thumbnails.get(index).cloned()
    }

    fn highlight_thumbnail(&mut self, index: usize) {
        self.calls.push(ViewCall::Thumbnail(index));
    }

    fn show_zoom(&mut self, lens: &ZoomLens) {
        self.calls.push(ViewCall::Zoom(lens.clone()));
    }

    fn hide_zoom(&mut self) {
        self.calls.push(ViewCall::ZoomHidden);
    }

    fn activate_tab(&mut self, tab: &str) {
        self.calls.push(ViewCall::Tab(tab.to_string()));
    }

    fn activate_unit_tab(&mut self, unit: &str) {
        self.calls.push(ViewCall::UnitTab(unit.to_string()));
    }

    fn size_chart_cells(&self) -> Vec<String> {
        self.chart_cells.clone()
    }

    fn set_size_chart_cell(&mut self, index: usize, text: &str) {
        if let Some(cell) = self.chart_cells.get_mut(index) {
            *cell = text.to_string();
        }
        self.calls.push(ViewCall::ChartCell { index, text: text.to_string() });
    }

    fn set_overlay_open(&mut self, overlay: Overlay, open: bool) {
        self.calls.push(ViewCall::Overlay { overlay, open });
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.calls.push(ViewCall::ScrollLocked(locked));
    }

    fn toggle_accordion(&mut self, kind: AccordionKind, index: usize) -> bool {
        let open = self.accordions.insert((kind, index));
        if !open {
            self.accordions.remove(&(kind, index));
        }
        self.calls.push(ViewCall::Accordion { kind, index, open });
        open
    }

    fn toggle_nav(&mut self) -> bool {
        self.nav_open = !self.nav_open;
        self.calls.push(ViewCall::Nav(self.nav_open));
        self.nav_open
    }

    fn set_personalization_enabled(&mut self, enabled: bool) {
        self.calls.push(ViewCall::PersonalizationEnabled(enabled));
    }

    fn set_active_font(&mut self, font: Font) {
        self.calls.push(ViewCall::ActiveFont(font));
    }

    fn show_toast(&mut self, message: &str) {
        self.calls.push(ViewCall::ToastShown(message.to_string()));
    }

    fn hide_toast(&mut self) {
        self.calls.push(ViewCall::ToastHidden);
    }

    fn cart_count_text(&self) -> String {
        self.cart_count.clone()
    }

    fn set_cart_count(&mut self, count: i64) {
        self.cart_count = count.to_string();
        self.calls.push(ViewCall::CartCount(count));
    }

    fn set_cart_animating(&mut self, animating: bool) {
        self.calls.push(ViewCall::CartAnimating(animating));
    }
}
