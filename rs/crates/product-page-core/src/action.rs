use crate::error::PageError;
use crate::gallery::ImageRect;
use crate::size_chart::Unit;
use crate::state::{Color, Font, Size};
use serde::{Deserialize, Serialize};

/// Every user gesture the page reacts to.
///
/// Wire form is a flat JSON object tagged by `"action"`:
/// `{"action":"select_color","color":"Blue"}`, `{"action":"quick_add"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SelectThumbnail { index: usize },
    SelectColor { color: Color },
    SelectSize { size: Size },
    IncrementQuantity,
    DecrementQuantity,
    /// Raw text committed in the quantity field.
    QuantityInput { text: String },
    ToggleWishlist,
    SwitchTab { tab: String },
    OpenCompareColors,
    OpenSizeChart,
    /// Close button or backdrop of any modal.
    CloseModals,
    SwitchSizeChartUnit { unit: Unit },
    QuickAdd,
    ToggleAccordion { index: usize },
    ToggleFaq { index: usize },
    SetPersonalization { enabled: bool },
    PersonalizationText { text: String },
    SelectFont { font: Font },
    ToggleMobileMenu,
    OpenCart,
    /// Close button or backdrop of the cart drawer.
    CloseCart,
    KeyDown { key: String },
    ZoomMove { page_x: f64, page_y: f64, rect: ImageRect },
    ZoomLeave,
    /// The cart button's highlight animation finished on the host.
    CartAnimationEnd,
}

pub fn parse_action(input: &[u8]) -> Result<Action, PageError> {
    Ok(serde_json::from_slice(input)?)
}
