//! product-dom: owned page tree for the product detail page
//!
//! A deliberately small DOM: elements carry attributes, optional text and
//! children. The page controller's DOM-backed view mutates this tree in place
//! and hosts receive it back as a JSON snapshot. Nodes are addressed by
//! [`NodePath`] so that a view can resolve its elements once and keep the
//! paths for the lifetime of the page.

mod selector;

pub use selector::{Selector, SelectorError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag used for bare text nodes (the `#text` nodes of a browser DOM).
pub const TEXT_TAG: &str = "#text";

/// Child indices from the root down to a node. The root itself is `[]`.
pub type NodePath = Vec<usize>;

/// A single node in the page tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomNode {
    /// HTML tag name (e.g. "div", "button", "input"), or [`TEXT_TAG`]
    pub tag: String,

    /// HTML attributes (id, class, style, data-*, etc.)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,

    /// Text content for leaf nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Child nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DomNode>,
}

/// A complete snapshot wrapping the root DomNode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub root: DomNode,
}

impl DomNode {
    /// Create an empty element
    pub fn element(tag: &str) -> Self {
        DomNode {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create a simple text-bearing element
    pub fn text(tag: &str, content: &str) -> Self {
        Self::element(tag).with_text(content)
    }

    /// Create a bare text node
    pub fn text_node(content: &str) -> Self {
        Self::text(TEXT_TAG, content)
    }

    pub fn is_text_node(&self) -> bool {
        self.tag == TEXT_TAG
    }

    // -- builder ------------------------------------------------------------

    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    /// Append one or more space-separated classes.
    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set a `data-*` attribute.
    pub fn with_data(self, name: &str, value: &str) -> Self {
        self.with_attr(&format!("data-{name}"), value)
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_child(mut self, child: DomNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = DomNode>) -> Self {
        self.children.extend(children);
        self
    }

    // -- attributes ---------------------------------------------------------

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|s| s.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.remove(name);
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Read a `data-*` attribute by its short name (`data("color")`).
    pub fn data(&self, name: &str) -> Option<&str> {
        self.attr(&format!("data-{name}"))
    }

    // -- classes ------------------------------------------------------------

    /// Get the class attribute if present
    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class().unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.class() {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attr("class", &joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let kept: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        if kept.is_empty() {
            self.remove_attr("class");
        } else {
            let joined = kept.join(" ");
            self.set_attr("class", &joined);
        }
    }

    /// Toggle a class; returns whether it is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    // -- inline style -------------------------------------------------------

    fn style_entries(&self) -> Vec<(String, String)> {
        self.attr("style")
            .unwrap_or("")
            .split(';')
            .filter_map(|decl| {
                let (prop, value) = decl.split_once(':')?;
                let prop = prop.trim();
                if prop.is_empty() {
                    return None;
                }
                Some((prop.to_string(), value.trim().to_string()))
            })
            .collect()
    }

    /// Read one inline style property.
    pub fn style(&self, prop: &str) -> Option<String> {
        self.style_entries()
            .into_iter()
            .find(|(p, _)| p == prop)
            .map(|(_, v)| v)
    }

    /// Set one inline style property; an empty value removes it.
    pub fn set_style(&mut self, prop: &str, value: &str) {
        let mut entries = self.style_entries();
        let existing = entries.iter().position(|(p, _)| p == prop);
        match (existing, value.is_empty()) {
            (Some(i), true) => {
                entries.remove(i);
            }
            (Some(i), false) => entries[i].1 = value.to_string(),
            (None, true) => {}
            (None, false) => entries.push((prop.to_string(), value.to_string())),
        }
        if entries.is_empty() {
            self.remove_attr("style");
        } else {
            let css: Vec<String> = entries.iter().map(|(p, v)| format!("{p}: {v}")).collect();
            self.set_attr("style", &css.join("; "));
        }
    }

    // -- text ---------------------------------------------------------------

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(t) = &self.text {
            out.push_str(t);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Replace all content with plain text (`textContent =` semantics).
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        self.text = Some(text.to_string());
    }

    /// Replace all content with the given children (`innerHTML =` semantics).
    pub fn replace_children(&mut self, children: Vec<DomNode>) {
        self.text = None;
        self.children = children;
    }

    // -- traversal ----------------------------------------------------------

    /// Iterate over children (empty slice if none)
    pub fn children_iter(&self) -> &[DomNode] {
        &self.children
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&DomNode> {
        let mut node = self;
        for &i in path {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut DomNode> {
        let mut node = self;
        for &i in path {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    /// Paths of every node (root included) matching the selector, in
    /// document order.
    pub fn query_all(&self, selector: &Selector) -> Vec<NodePath> {
        let mut out = Vec::new();
        let mut ancestors = Vec::new();
        let mut path = Vec::new();
        self.walk(selector, &mut ancestors, &mut path, &mut out);
        out
    }

    fn walk<'a>(
        &'a self,
        selector: &Selector,
        ancestors: &mut Vec<&'a DomNode>,
        path: &mut NodePath,
        out: &mut Vec<NodePath>,
    ) {
        if selector.matches(self, ancestors) {
            out.push(path.clone());
        }
        ancestors.push(self);
        for (i, child) in self.children.iter().enumerate() {
            path.push(i);
            child.walk(selector, ancestors, path, out);
            path.pop();
        }
        ancestors.pop();
    }

    /// First match in document order.
    pub fn query(&self, selector: &Selector) -> Option<NodePath> {
        self.query_all(selector).into_iter().next()
    }

    /// Parse `css` and return every match.
    pub fn select_all(&self, css: &str) -> Result<Vec<NodePath>, SelectorError> {
        Ok(self.query_all(&Selector::parse(css)?))
    }
}

/// Parent of a path, `None` for the root.
pub fn parent_path(path: &[usize]) -> Option<NodePath> {
    path.split_last().map(|(_, parent)| parent.to_vec())
}

/// Parse a snapshot from a JSON string
pub fn parse_snapshot(json: &str) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parse a single DomNode from a JSON string
pub fn parse_node(json: &str) -> Result<DomNode, serde_json::Error> {
    serde_json::from_str(json)
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    root: &'a DomNode,
}

/// Serialize `root` as a snapshot (`{"root": ...}`) without cloning it.
pub fn snapshot_json(root: &DomNode) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SnapshotRef { root })
}
