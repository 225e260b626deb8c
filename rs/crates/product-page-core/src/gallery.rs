use crate::state::Color;
use crate::view::ZoomLens;
use serde::{Deserialize, Serialize};

/// Main image shown for a color that has no entry of its own.
pub const DEFAULT_IMAGE: &str = "assets/1.jpg";

const COLOR_IMAGES: [(&str, &str); 5] = [
    ("Red", "assets/1.jpg"),
    ("Blue", "assets/2.jpg"),
    ("Green", "assets/3.jpg"),
    ("Black", "assets/4.jpeg"),
    ("White", "assets/5.jpeg"),
];

/// Main image for a color name, [`DEFAULT_IMAGE`] if the name is unknown.
pub fn image_for_color_name(name: &str) -> &'static str {
    COLOR_IMAGES
        .iter()
        .find(|(color, _)| *color == name)
        .map_or(DEFAULT_IMAGE, |&(_, url)| url)
}

pub fn image_for_color(color: Color) -> &'static str {
    image_for_color_name(color.as_str())
}

pub fn main_image_alt(color: Color) -> String {
    format!("Main Product - {} variant", color)
}

/// The main image's bounding box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer position over the image as percentages of its size.
/// `None` for an image with no area.
pub fn lens_position(page_x: f64, page_y: f64, rect: ImageRect) -> Option<(f64, f64)> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let x = (page_x - rect.left) / rect.width * 100.0;
    let y = (page_y - rect.top) / rect.height * 100.0;
    Some((x, y))
}

/// The magnifier picks up its background from the main image the first time
/// it is shown and keeps it from then on.
#[derive(Debug, Clone, Default)]
pub struct Zoom {
    background: Option<String>,
}

impl Zoom {
    pub fn lens(&mut self, current_image: &str, x_pct: f64, y_pct: f64) -> ZoomLens {
        let background = self
            .background
            .get_or_insert_with(|| current_image.to_string())
            .clone();
        ZoomLens { background, x_pct, y_pct }
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_color_has_its_own_image() {
        let urls: Vec<&str> = Color::ALL.iter().map(|c| image_for_color(*c)).collect();
        assert_eq!(urls, ["assets/1.jpg", "assets/2.jpg", "assets/3.jpg", "assets/4.jpeg", "assets/5.jpeg"]);
        assert_eq!(image_for_color_name("Purple"), DEFAULT_IMAGE);
        assert_eq!(main_image_alt(Color::Black), "Main Product - Black variant");
    }

    #[test]
    fn test_lens_position_is_relative_to_rect() {
        let rect = ImageRect { left: 100.0, top: 50.0, width: 400.0, height: 200.0 };
        assert_eq!(lens_position(300.0, 100.0, rect), Some((50.0, 25.0)));
        assert_eq!(lens_position(0.0, 0.0, ImageRect { width: 0.0, ..rect }), None);
    }

    #[test]
    fn test_zoom_background_is_sticky() {
        let mut zoom = Zoom::default();
        assert_eq!(zoom.lens("assets/1.jpg", 1.0, 2.0).background, "assets/1.jpg");
        assert_eq!(zoom.lens("assets/2.jpg", 1.0, 2.0).background, "assets/1.jpg");
        assert_eq!(zoom.background(), Some("assets/1.jpg"));
    }
}
