//! [`ProductView`] over an owned page tree.
//!
//! Every element the page needs is resolved once in [`DomView::bind`]; a
//! missing one fails the bind. Later writes go through the stored paths and
//! skip silently if a path no longer resolves.

use crate::error::PageError;
use crate::state::{Color, Font, Quantity, Size};
use crate::view::{AccordionKind, Overlay, ProductView, ZoomLens};
use product_dom::{parent_path, snapshot_json, DomNode, NodePath, Selector};

const MAIN_IMAGE: &str = "#mainImage";
const THUMBNAILS: &str = "#thumbnails";
const THUMBNAIL_IMAGES: &str = "#thumbnails img";
const IMAGE_ZOOM: &str = "#imageZoom";
const COLOR_SWATCHES: &str = ".color-swatch";
const SELECTED_COLOR: &str = "#selectedColor";
const SIZE_OPTIONS: &str = ".size-option";
const SELECTED_SIZE: &str = "#selectedSize";
const QUANTITY_INPUT: &str = ".quantity-input";
const WISHLIST_BUTTON: &str = ".wishlist-btn";
const TAB_BUTTONS: &str = ".tab-btn";
const TAB_CONTENTS: &str = ".tab-content";
const COMPARE_MODAL: &str = "#compareColorsModal";
const SIZE_CHART_MODAL: &str = "#sizeChartModal";
const SIZE_TAB_BUTTONS: &str = ".size-tab-btn";
const SIZE_CHART_CELLS: &str = ".size-chart td";
const ACCORDION_HEADERS: &str = ".accordion-header";
const FAQ_QUESTIONS: &str = ".faq-question";
const PERSONALIZATION_FIELD: &str = ".personalization-field";
const PERSONALIZATION_INPUT: &str = ".personalization-field input";
const FONT_OPTIONS: &str = ".font-option";
const MAIN_NAV: &str = ".main-nav";
const CART_BUTTON: &str = ".cart-btn";
const CART_COUNT: &str = ".cart-count";
const CART_DRAWER: &str = "#cartDrawer";
const NOTIFICATION: &str = ".notification";
const NOTIFICATION_TEXT: &str = ".notification span";
const BODY: &str = "body";

/// Controls the host binds gestures to. The view never writes them, but a
/// page without them cannot be driven.
const REQUIRED_CONTROLS: [&str; 9] = [
    ".quantity-btn.minus",
    ".quantity-btn.plus",
    "#compareColorsBtn",
    "#openSizeChart",
    "#personalizeCheckbox",
    ".mobile-menu-btn",
    ".cart-close",
    ".cart-overlay",
    ".size-chart",
];

#[derive(Debug, Clone)]
pub struct DomView {
    page: DomNode,
    focused: Option<NodePath>,
    main_image: NodePath,
    zoom: NodePath,
    thumbnails: Vec<NodePath>,
    swatches: Vec<NodePath>,
    selected_color: NodePath,
    size_options: Vec<NodePath>,
    selected_size: NodePath,
    quantity_input: NodePath,
    wishlist: NodePath,
    tab_buttons: Vec<NodePath>,
    tab_contents: Vec<NodePath>,
    compare_modal: NodePath,
    size_chart_modal: NodePath,
    unit_tabs: Vec<NodePath>,
    chart_cells: Vec<NodePath>,
    accordion_items: Vec<NodePath>,
    faq_items: Vec<NodePath>,
    personalization_field: NodePath,
    personalization_input: NodePath,
    font_options: Vec<NodePath>,
    main_nav: NodePath,
    cart_button: NodePath,
    cart_count: NodePath,
    cart_drawer: NodePath,
    notification: NodePath,
    notification_text: NodePath,
    body: NodePath,
}

fn one(page: &DomNode, css: &str) -> Result<NodePath, PageError> {
    page.query(&Selector::parse(css)?)
        .ok_or_else(|| PageError::MissingElement(css.to_string()))
}

fn all(page: &DomNode, css: &str) -> Result<Vec<NodePath>, PageError> {
    Ok(page.select_all(css)?)
}

/// Accordion items are the parents of their clickable headers.
fn parents(page: &DomNode, css: &str) -> Result<Vec<NodePath>, PageError> {
    Ok(all(page, css)?.iter().filter_map(|p| parent_path(p)).collect())
}

fn edit(page: &mut DomNode, path: &[usize], f: impl FnOnce(&mut DomNode)) {
    if let Some(node) = page.node_at_mut(path) {
        f(node);
    }
}

/// Mark `active` on exactly the nodes whose key equals `value`.
fn mark_active(page: &mut DomNode, paths: &[NodePath], value: &str, key: impl Fn(&DomNode) -> Option<&str>) {
    for path in paths {
        edit(page, path, |n| {
            let on = key(n) == Some(value);
            n.set_class("active", on);
        });
    }
}

impl DomView {
    pub fn bind(page: DomNode) -> Result<Self, PageError> {
        for css in REQUIRED_CONTROLS {
            one(&page, css)?;
        }
        one(&page, THUMBNAILS)?;
        let view = DomView {
            focused: None,
            main_image: one(&page, MAIN_IMAGE)?,
            zoom: one(&page, IMAGE_ZOOM)?,
            thumbnails: all(&page, THUMBNAIL_IMAGES)?,
            swatches: all(&page, COLOR_SWATCHES)?,
            selected_color: one(&page, SELECTED_COLOR)?,
            size_options: all(&page, SIZE_OPTIONS)?,
            selected_size: one(&page, SELECTED_SIZE)?,
            quantity_input: one(&page, QUANTITY_INPUT)?,
            wishlist: one(&page, WISHLIST_BUTTON)?,
            tab_buttons: all(&page, TAB_BUTTONS)?,
            tab_contents: all(&page, TAB_CONTENTS)?,
            compare_modal: one(&page, COMPARE_MODAL)?,
            size_chart_modal: one(&page, SIZE_CHART_MODAL)?,
            unit_tabs: all(&page, SIZE_TAB_BUTTONS)?,
            chart_cells: all(&page, SIZE_CHART_CELLS)?,
            accordion_items: parents(&page, ACCORDION_HEADERS)?,
            faq_items: parents(&page, FAQ_QUESTIONS)?,
            personalization_field: one(&page, PERSONALIZATION_FIELD)?,
            personalization_input: one(&page, PERSONALIZATION_INPUT)?,
            font_options: all(&page, FONT_OPTIONS)?,
            main_nav: one(&page, MAIN_NAV)?,
            cart_button: one(&page, CART_BUTTON)?,
            cart_count: one(&page, CART_COUNT)?,
            cart_drawer: one(&page, CART_DRAWER)?,
            notification: one(&page, NOTIFICATION)?,
            notification_text: one(&page, NOTIFICATION_TEXT)?,
            body: one(&page, BODY)?,
            page,
        };
        tracing::debug!(
            thumbnails = view.thumbnails.len(),
            swatches = view.swatches.len(),
            sizes = view.size_options.len(),
            chart_cells = view.chart_cells.len(),
            "page bound"
        );
        Ok(view)
    }

    pub fn page(&self) -> &DomNode {
        &self.page
    }

    pub fn into_page(self) -> DomNode {
        self.page
    }

    /// The element that last received focus, if it is still there.
    pub fn focused(&self) -> Option<&DomNode> {
        self.page.node_at(self.focused.as_deref()?)
    }

    pub fn snapshot_json(&self) -> Result<String, PageError> {
        Ok(snapshot_json(&self.page)?)
    }

    fn text_at(&self, path: &[usize]) -> String {
        self.page.node_at(path).map(DomNode::text_content).unwrap_or_default()
    }

    fn overlay_path(&self, overlay: Overlay) -> &NodePath {
        match overlay {
            Overlay::CompareColors => &self.compare_modal,
            Overlay::SizeChart => &self.size_chart_modal,
            Overlay::CartDrawer => &self.cart_drawer,
        }
    }
}

impl ProductView for DomView {
    fn set_active_color(&mut self, color: Color) {
        mark_active(&mut self.page, &self.swatches, color.as_str(), |n| n.data("color"));
        edit(&mut self.page, &self.selected_color, |n| n.set_text(color.as_str()));
    }

    fn set_active_size(&mut self, size: Size) {
        mark_active(&mut self.page, &self.size_options, size.as_str(), |n| n.data("size"));
        edit(&mut self.page, &self.selected_size, |n| n.set_text(size.as_str()));
    }

    fn size_available(&self, size: Size) -> bool {
        self.size_options
            .iter()
            .filter_map(|p| self.page.node_at(p))
            .find(|n| n.data("size") == Some(size.as_str()))
            .is_some_and(|n| !n.has_class("unavailable"))
    }

    fn set_quantity_display(&mut self, quantity: Quantity) {
        edit(&mut self.page, &self.quantity_input, |n| n.set_attr("value", &quantity.to_string()));
    }

    fn set_wishlist(&mut self, saved: bool) {
        let (icon, label) = if saved { ("fas fa-heart", " Saved") } else { ("far fa-heart", " Save") };
        edit(&mut self.page, &self.wishlist, |n| {
            n.replace_children(vec![
                DomNode::element("i").with_class(icon),
                DomNode::text_node(label),
            ]);
            n.set_class("active", saved);
        });
    }

    fn main_image_url(&self) -> String {
        self.page
            .node_at(&self.main_image)
            .and_then(|n| n.attr("src"))
            .unwrap_or_default()
            .to_string()
    }

    fn set_main_image(&mut self, url: &str, alt: &str) {
        edit(&mut self.page, &self.main_image, |n| {
            n.set_attr("src", url);
            n.set_attr("alt", alt);
        });
    }

    fn thumbnail_url(&self, index: usize) -> Option<String> {
        let path = self.thumbnails.get(index)?;
        self.page.node_at(path)?.data("large").map(str::to_string)
    }

    fn highlight_thumbnail(&mut self, index: usize) {
        for (i, path) in self.thumbnails.iter().enumerate() {
            edit(&mut self.page, path, |n| n.set_class("selected", i == index));
        }
    }

    fn show_zoom(&mut self, lens: &ZoomLens) {
        edit(&mut self.page, &self.zoom, |n| {
            n.set_style("background-image", &format!("url('{}')", lens.background));
            n.set_style("background-position", &format!("{}% {}%", lens.x_pct, lens.y_pct));
            n.set_style("opacity", "1");
            n.set_style("transform", "scale(1)");
        });
    }

    fn hide_zoom(&mut self) {
        edit(&mut self.page, &self.zoom, |n| {
            n.set_style("opacity", "0");
            n.set_style("transform", "scale(0)");
        });
    }

    fn activate_tab(&mut self, tab: &str) {
        mark_active(&mut self.page, &self.tab_buttons, tab, |n| n.data("tab"));
        mark_active(&mut self.page, &self.tab_contents, tab, |n| n.id());
    }

    fn activate_unit_tab(&mut self, unit: &str) {
        mark_active(&mut self.page, &self.unit_tabs, unit, |n| n.data("unit"));
    }

    fn size_chart_cells(&self) -> Vec<String> {
        self.chart_cells.iter().map(|p| self.text_at(p)).collect()
    }

    fn set_size_chart_cell(&mut self, index: usize, text: &str) {
        if let Some(path) = self.chart_cells.get(index) {
            edit(&mut self.page, path, |n| n.set_text(text));
        }
    }

    fn set_overlay_open(&mut self, overlay: Overlay, open: bool) {
        let path = self.overlay_path(overlay).clone();
        edit(&mut self.page, &path, |n| n.set_class("active", open));
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        edit(&mut self.page, &self.body, |n| n.set_style("overflow", if locked { "hidden" } else { "" }));
    }

    fn toggle_accordion(&mut self, kind: AccordionKind, index: usize) -> bool {
        let items = match kind {
            AccordionKind::Details => &self.accordion_items,
            AccordionKind::Faq => &self.faq_items,
        };
        let Some(path) = items.get(index) else {
            return false;
        };
        match self.page.node_at_mut(path) {
            Some(item) => item.toggle_class("active"),
            None => false,
        }
    }

    fn toggle_nav(&mut self) -> bool {
        self.page.node_at_mut(&self.main_nav).is_some_and(|n| n.toggle_class("active"))
    }

    fn set_personalization_enabled(&mut self, enabled: bool) {
        edit(&mut self.page, &self.personalization_field, |n| {
            n.set_style("display", if enabled { "block" } else { "none" });
        });
        edit(&mut self.page, &self.personalization_input, |n| {
            if enabled {
                n.remove_attr("disabled");
            } else {
                n.set_attr("disabled", "");
            }
        });
        if enabled {
            self.focused = Some(self.personalization_input.clone());
        } else if self.focused.as_ref() == Some(&self.personalization_input) {
            self.focused = None;
        }
    }

    fn set_active_font(&mut self, font: Font) {
        mark_active(&mut self.page, &self.font_options, font.as_str(), |n| n.data("font"));
    }

    fn show_toast(&mut self, message: &str) {
        edit(&mut self.page, &self.notification_text, |n| n.set_text(message));
        edit(&mut self.page, &self.notification, |n| n.add_class("show"));
    }

    fn hide_toast(&mut self) {
        edit(&mut self.page, &self.notification, |n| n.remove_class("show"));
    }

    fn cart_count_text(&self) -> String {
        self.text_at(&self.cart_count)
    }

    fn set_cart_count(&mut self, count: i64) {
        edit(&mut self.page, &self.cart_count, |n| n.set_text(&count.to_string()));
    }

    fn set_cart_animating(&mut self, animating: bool) {
        edit(&mut self.page, &self.cart_button, |n| n.set_class("animate", animating));
    }
}
