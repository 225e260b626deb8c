//! product-page-core: interactivity of a single product detail page
//!
//! One [`PageController`] owns the product selection (color, size, quantity,
//! wishlist, personalization) and the page's UI state (overlays, toast,
//! zoom). Host events arrive as [`Action`]s; the controller updates its state
//! and pushes the result through the [`ProductView`] trait. [`DomView`]
//! implements that trait over a `product_dom` page tree.

mod action;
mod cart;
mod config;
mod controller;
mod dom_view;
mod error;
pub mod fixture;
pub mod gallery;
pub mod numeric;
mod overlay;
pub mod size_chart;
mod state;
pub mod timer;
mod toast;
pub mod view;

pub use action::{parse_action, Action};
pub use config::{PageConfig, ToastPolicy};
pub use controller::{Deferred, PageController};
pub use dom_view::DomView;
pub use error::PageError;
pub use overlay::Overlays;
pub use size_chart::Unit;
pub use state::{Color, Field, Font, Personalization, ProductSelection, Quantity, Size};
pub use toast::Toast;
pub use view::{AccordionKind, Overlay, ProductView, RecordingView, ViewCall, ZoomLens};

/// Bind a page tree and take it over with the given configuration.
pub fn load_page(page: product_dom::DomNode, config: PageConfig) -> Result<PageController<DomView>, PageError> {
    let view = DomView::bind(page)?;
    Ok(PageController::new(config, view))
}
