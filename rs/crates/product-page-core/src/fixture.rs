//! Reference markup for the product page.
//!
//! The structure every host page must match: the ids and classes
//! [`crate::DomView`] binds to, with the initial defaults the page loads
//! with (Red, M, quantity 1, XXL sold out, empty cart).

use crate::state::{Color, Font, Size};
use product_dom::DomNode;

fn el(tag: &str, class: &str) -> DomNode {
    DomNode::element(tag).with_class(class)
}

fn button(class: &str, label: &str) -> DomNode {
    el("button", class).with_text(label)
}

fn header() -> DomNode {
    el("header", "site-header").with_children([
        button("mobile-menu-btn", "Menu"),
        el("nav", "main-nav").with_children([
            DomNode::text("a", "Shop").with_attr("href", "#"),
            DomNode::text("a", "Journal").with_attr("href", "#"),
        ]),
        el("button", "cart-btn")
            .with_child(el("i", "fas fa-shopping-bag"))
            .with_child(DomNode::text("span", "0").with_class("cart-count")),
    ])
}

fn gallery() -> DomNode {
    let thumbs = ["assets/1.jpg", "assets/2.jpg", "assets/3.jpg", "assets/4.jpeg", "assets/5.jpeg"];
    el("div", "product-gallery").with_children([
        el("div", "main-image-wrap").with_children([
            DomNode::element("img")
                .with_id("mainImage")
                .with_attr("src", "assets/1.jpg")
                .with_attr("alt", "Main Product - Red variant"),
            el("div", "image-zoom").with_id("imageZoom"),
        ]),
        DomNode::element("div").with_id("thumbnails").with_children(thumbs.iter().enumerate().map(|(i, src)| {
            DomNode::element("img")
                .with_attr("src", src)
                .with_attr("alt", &format!("Thumbnail {}", i + 1))
                .with_data("large", src)
        })),
    ])
}

fn options() -> DomNode {
    let swatches = Color::ALL.iter().map(|c| {
        let swatch = el("button", "color-swatch").with_data("color", c.as_str());
        if *c == Color::Red { swatch.with_class("active") } else { swatch }
    });
    let sizes = Size::ALL.iter().map(|s| {
        let mut option = button("size-option", s.as_str()).with_data("size", s.as_str());
        if *s == Size::M {
            option.add_class("active");
        }
        if *s == Size::Xxl {
            option.add_class("unavailable");
        }
        option
    });
    let fonts = Font::ALL.iter().map(|f| {
        let option = button("font-option", f.as_str()).with_data("font", f.as_str());
        if *f == Font::Serif { option.with_class("active") } else { option }
    });

    el("div", "product-options").with_children([
        el("div", "option-group").with_children([
            DomNode::text("span", "Color: "),
            DomNode::text("span", "Red").with_id("selectedColor"),
            el("div", "color-swatches").with_children(swatches),
            button("compare-btn", "Compare colors").with_id("compareColorsBtn"),
        ]),
        el("div", "option-group").with_children([
            DomNode::text("span", "Size: "),
            DomNode::text("span", "M").with_id("selectedSize"),
            el("div", "size-options").with_children(sizes),
            button("size-chart-link", "Size chart").with_id("openSizeChart"),
        ]),
        el("div", "quantity-selector").with_children([
            button("quantity-btn minus", "-"),
            el("input", "quantity-input").with_attr("type", "text").with_attr("value", "1"),
            button("quantity-btn plus", "+"),
        ]),
        el("div", "personalization").with_children([
            DomNode::element("input").with_id("personalizeCheckbox").with_attr("type", "checkbox"),
            el("div", "personalization-field").with_attr("style", "display: none").with_children([
                DomNode::element("input")
                    .with_attr("type", "text")
                    .with_attr("maxlength", "20")
                    .with_attr("disabled", ""),
                el("div", "font-options").with_children(fonts),
            ]),
        ]),
        el("div", "product-actions").with_children([
            button("add-to-cart-btn", "Add to cart"),
            el("button", "wishlist-btn").with_children([
                el("i", "far fa-heart"),
                DomNode::text_node(" Save"),
            ]),
        ]),
    ])
}

fn info_tabs() -> DomNode {
    let tabs = [("description", "Description"), ("specifications", "Specifications"), ("reviews", "Reviews")];
    let buttons = tabs.iter().enumerate().map(|(i, (id, label))| {
        let b = button("tab-btn", label).with_data("tab", id);
        if i == 0 { b.with_class("active") } else { b }
    });
    let contents = tabs.iter().enumerate().map(|(i, (id, label))| {
        let c = el("div", "tab-content").with_id(id).with_child(DomNode::text("p", label));
        if i == 0 { c.with_class("active") } else { c }
    });
    el("section", "product-tabs").with_children([
        el("div", "tab-buttons").with_children(buttons),
        el("div", "tab-panels").with_children(contents),
    ])
}

fn accordions() -> DomNode {
    let details = ["Materials", "Care", "Shipping"].map(|title| {
        el("div", "accordion-item").with_children([
            button("accordion-header", title),
            el("div", "accordion-body").with_text(title),
        ])
    });
    let faqs = ["Does it shrink?", "Can I return it?"].map(|q| {
        el("div", "faq-item").with_children([
            button("faq-question", q),
            el("div", "faq-answer").with_text("Yes."),
        ])
    });
    el("section", "product-more").with_children([
        el("div", "accordion").with_children(details),
        el("div", "faq").with_children(faqs),
        el("div", "related-products").with_children([
            el("a", "quick-add-btn").with_attr("href", "#").with_text("Quick add"),
            el("a", "quick-add-btn").with_attr("href", "#").with_text("Quick add"),
        ]),
    ])
}

fn modal(id: &str, body: Vec<DomNode>) -> DomNode {
    el("div", "modal").with_id(id).with_children([
        el("div", "modal-overlay"),
        el("div", "modal-content")
            .with_child(button("modal-close", "×"))
            .with_children(body),
    ])
}

fn size_chart() -> DomNode {
    let rows = [
        ["S", "34-36\"", "28-30\"", "27\""],
        ["M", "38-40\"", "30-32\"", "28\""],
        ["L", "42-44\"", "34-36\"", "29\""],
        ["XL", "46-48\"", "38-40\"", "30\""],
    ];
    let head = el("tr", "").with_children(["Size", "Chest", "Waist", "Length"].map(|h| DomNode::text("th", h)));
    let body = rows.map(|row| el("tr", "").with_children(row.map(|cell| DomNode::text("td", cell))));
    el("table", "size-chart").with_child(head).with_children(body)
}

fn overlays() -> Vec<DomNode> {
    vec![
        modal(
            "compareColorsModal",
            Color::ALL
                .iter()
                .map(|c| DomNode::text("figure", c.as_str()).with_data("color", c.as_str()))
                .collect(),
        ),
        modal(
            "sizeChartModal",
            vec![
                el("div", "size-tabs").with_children([
                    button("size-tab-btn active", "Inches").with_data("unit", "in"),
                    button("size-tab-btn", "Centimeters").with_data("unit", "cm"),
                ]),
                size_chart(),
            ],
        ),
        el("div", "cart-drawer").with_id("cartDrawer").with_children([
            el("div", "cart-overlay"),
            el("div", "cart-panel").with_children([button("cart-close", "×"), DomNode::text("p", "Your cart")]),
        ]),
        el("div", "notification").with_children([el("i", "fas fa-check"), DomNode::element("span")]),
    ]
}

/// The full reference page, rooted at `<body>`.
pub fn product_page() -> DomNode {
    DomNode::element("body")
        .with_child(header())
        .with_child(
            el("main", "product-page").with_children([gallery(), options(), info_tabs(), accordions()]),
        )
        .with_children(overlays())
}
