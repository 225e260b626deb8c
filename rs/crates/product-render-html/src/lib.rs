//! product-render-html: Render page trees to HTML strings
//!
//! Used to print a page after its state has been driven, so the result can
//! be opened in a browser or diffed as text.

use product_dom::DomNode;

/// Void elements that must not have closing tags
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Render a DomNode tree to an HTML string.
pub fn render_to_html(node: &DomNode) -> String {
    let mut buf = String::with_capacity(4096);
    write_node(node, &mut buf);
    buf
}

/// Options for rendering a full HTML document.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    pub title: Option<String>,
    pub styles: Vec<String>,
}

/// Render a full HTML document whose `<body>` is `root` (or contains it, if
/// `root` is not itself a body element).
pub fn render_page(root: &DomNode, opts: &PageOptions) -> String {
    let body_html = render_to_html(root);

    let mut html = String::with_capacity(body_html.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\" />\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    if let Some(title) = &opts.title {
        html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    }
    for href in &opts.styles {
        html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\" />\n", escape_attr(href)));
    }
    html.push_str("</head>\n");

    if root.tag == "body" {
        html.push_str(&body_html);
    } else {
        html.push_str("<body>");
        html.push_str(&body_html);
        html.push_str("</body>");
    }
    html.push_str("\n</html>");
    html
}

fn write_node(node: &DomNode, buf: &mut String) {
    if node.is_text_node() {
        if let Some(text) = &node.text {
            buf.push_str(&escape_html(text));
        }
        return;
    }

    let is_void = VOID_ELEMENTS.contains(&node.tag.as_str());

    buf.push('<');
    buf.push_str(&node.tag);

    // BTreeMap keeps attribute order deterministic
    for (k, v) in &node.attrs {
        buf.push(' ');
        buf.push_str(k);
        if !v.is_empty() {
            buf.push_str("=\"");
            buf.push_str(&escape_attr(v));
            buf.push('"');
        }
    }

    buf.push('>');
    if is_void {
        return;
    }

    if let Some(text) = &node.text {
        buf.push_str(&escape_html(text));
    }
    for child in node.children_iter() {
        write_node(child, buf);
    }

    buf.push_str("</");
    buf.push_str(&node.tag);
    buf.push('>');
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_render() {
        let node = DomNode::element("div")
            .with_id("app")
            .with_class("container")
            .with_child(DomNode::text("h1", "Tee & Co"))
            .with_child(
                DomNode::element("button")
                    .with_class("wishlist-btn")
                    .with_child(DomNode::element("i").with_class("far fa-heart"))
                    .with_child(DomNode::text_node(" Save")),
            );

        let html = render_to_html(&node);
        assert_eq!(
            html,
            "<div class=\"container\" id=\"app\"><h1>Tee &amp; Co</h1>\
             <button class=\"wishlist-btn\"><i class=\"far fa-heart\"></i> Save</button></div>"
        );
    }

    #[test]
    fn test_void_and_boolean_attrs() {
        let node = DomNode::element("input")
            .with_attr("type", "text")
            .with_attr("disabled", "")
            .with_attr("value", "\"3\"");
        let html = render_to_html(&node);
        assert_eq!(html, "<input disabled type=\"text\" value=\"&quot;3&quot;\">");
    }

    #[test]
    fn test_render_page_wraps_non_body_root() {
        let opts = PageOptions { title: Some("Tee <new>".into()), styles: vec!["style.css".into()] };
        let page = render_page(&DomNode::text("p", "hi"), &opts);
        assert!(page.contains("<title>Tee &lt;new&gt;</title>"));
        assert!(page.contains("<link rel=\"stylesheet\" href=\"style.css\" />"));
        assert!(page.contains("<body><p>hi</p></body>"));

        let page = render_page(&DomNode::element("body"), &PageOptions::default());
        assert!(page.contains("</head>\n<body></body>\n</html>"));
    }
}
