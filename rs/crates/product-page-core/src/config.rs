use crate::state::{Color, Font, Personalization, ProductSelection, Quantity, Size};
use serde::{Deserialize, Serialize};

/// What a newer notification does to the hide scheduled by an older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastPolicy {
    /// Every notification schedules its own hide and none is cancelled; an
    /// older hide can take down a newer message early.
    #[default]
    Independent,
    /// A newer notification cancels the pending hide and restarts the delay.
    Supersede,
}

/// Initial selection and timing knobs for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub color: Color,
    pub size: Size,
    pub quantity: Quantity,
    pub price: f64,
    pub font: Font,
    /// How long a toast stays up, in milliseconds.
    pub toast_ms: u64,
    /// Length of the cart button highlight, in milliseconds.
    pub cart_animation_ms: u64,
    pub toast_policy: ToastPolicy,
}

impl Default for PageConfig {
    fn default() -> Self {
        let selection = ProductSelection::default();
        Self {
            color: selection.color,
            size: selection.size,
            quantity: selection.quantity,
            price: selection.price,
            font: selection.personalization.font,
            toast_ms: 3000,
            cart_animation_ms: 500,
            toast_policy: ToastPolicy::Independent,
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The selection a freshly loaded page starts with.
    pub fn initial_selection(&self) -> ProductSelection {
        ProductSelection {
            color: self.color,
            size: self.size,
            quantity: self.quantity,
            price: self.price,
            in_wishlist: false,
            personalization: Personalization { font: self.font, ..Personalization::default() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = PageConfig::from_json(r#"{"color":"Blue","toast_policy":"supersede"}"#).unwrap();
        assert_eq!(cfg.color, Color::Blue);
        assert_eq!(cfg.toast_policy, ToastPolicy::Supersede);
        assert_eq!(cfg.toast_ms, 3000);
        assert_eq!(cfg.cart_animation_ms, 500);
        assert_eq!(cfg.initial_selection().size, Size::M);
    }

    #[test]
    fn test_out_of_range_quantity_is_rejected() {
        assert!(PageConfig::from_json(r#"{"quantity":0}"#).is_err());
        assert_eq!(PageConfig::from_json(r#"{"quantity":4}"#).unwrap().quantity.get(), 4);
    }
}
