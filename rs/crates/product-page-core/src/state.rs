use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color variants offered on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Black,
    White,
}

impl Color {
    pub const ALL: [Color; 5] = [Color::Red, Color::Blue, Color::Green, Color::Black, Color::White];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Black => "Black",
            Color::White => "White",
        }
    }
}

/// Garment sizes. Availability is a property of the page, not of the size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "XS")]
    Xs,
    S,
    M,
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "XXL")]
    Xxl,
}

impl Size {
    pub const ALL: [Size; 6] = [Size::Xs, Size::S, Size::M, Size::L, Size::Xl, Size::Xxl];

    pub fn as_str(self) -> &'static str {
        match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
            Size::Xxl => "XXL",
        }
    }
}

/// Lettering fonts for personalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Font {
    Serif,
    SansSerif,
    Script,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::Serif, Font::SansSerif, Font::Script];

    pub fn as_str(self) -> &'static str {
        match self {
            Font::Serif => "serif",
            Font::SansSerif => "sans-serif",
            Font::Script => "script",
        }
    }
}

macro_rules! impl_name_traits {
    ($($ty:ident),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL.into_iter().find(|v| v.as_str() == s).ok_or(())
            }
        }
    )*};
}

impl_name_traits!(Color, Size, Font);

/// Order quantity, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quantity(u8);

impl Quantity {
    pub const MIN: Quantity = Quantity(1);
    pub const MAX: Quantity = Quantity(10);

    /// `None` when `value` is outside `1..=10`.
    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN.0 as i64..=Self::MAX.0 as i64).contains(&value) {
            Some(Quantity(value as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Next quantity up, `None` at the upper bound.
    pub fn incremented(self) -> Option<Self> {
        Self::new(self.0 as i64 + 1)
    }

    /// Next quantity down, `None` at the lower bound.
    pub fn decremented(self) -> Option<Self> {
        Self::new(self.0 as i64 - 1)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Quantity::new(value).ok_or_else(|| format!("quantity {value} outside 1..=10"))
    }
}

impl From<Quantity> for i64 {
    fn from(q: Quantity) -> Self {
        q.0 as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personalization {
    pub enabled: bool,
    pub text: String,
    pub font: Font,
}

impl Default for Personalization {
    fn default() -> Self {
        Self { enabled: false, text: String::new(), font: Font::Serif }
    }
}

/// The one product configuration record of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSelection {
    pub color: Color,
    pub size: Size,
    pub quantity: Quantity,
    pub price: f64,
    pub in_wishlist: bool,
    pub personalization: Personalization,
}

impl Default for ProductSelection {
    fn default() -> Self {
        Self {
            color: Color::Red,
            size: Size::M,
            quantity: Quantity::MIN,
            price: 129.99,
            in_wishlist: false,
            personalization: Personalization::default(),
        }
    }
}

/// A keyed write into the selection; every write resynchronizes the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Color(Color),
    Size(Size),
    Quantity(Quantity),
}

impl ProductSelection {
    pub fn apply(&mut self, field: Field) {
        match field {
            Field::Color(c) => self.color = c,
            Field::Size(s) => self.size = s,
            Field::Quantity(q) => self.quantity = q,
        }
    }
}
