use crate::DomNode;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// One compound step: `img`, `#mainImage`, `.quantity-btn.minus`, `*`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct SelectorStep {
    tag: Option<String>,
    universal: bool,
    id: Option<String>,
    classes: Vec<String>,
}

impl SelectorStep {
    fn is_empty(&self) -> bool {
        !self.universal && self.tag.is_none() && self.id.is_none() && self.classes.is_empty()
    }

    fn matches(&self, node: &DomNode) -> bool {
        if node.is_text_node() {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !node.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| node.has_class(c))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectorCombinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectorPart {
    step: SelectorStep,
    // Relation to previous (left) selector part.
    combinator: Option<SelectorCombinator>,
}

/// A parsed selector: compound steps joined by descendant (` `) or child
/// (`>`) combinators. Attribute and pseudo-class syntax is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<SelectorPart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorError {
    pub selector: String,
    pub reason: &'static str,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selector {:?}: {}", self.selector, self.reason)
    }
}

impl std::error::Error for SelectorError {}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let fail = |reason| SelectorError { selector: input.to_string(), reason };
        let mut chars = input.trim().chars().peekable();
        if chars.peek().is_none() {
            return Err(fail("empty selector"));
        }

        let mut parts: Vec<SelectorPart> = Vec::new();
        let mut pending: Option<SelectorCombinator> = None;
        loop {
            let mut saw_space = false;
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
                saw_space = true;
            }
            if saw_space && !parts.is_empty() && pending.is_none() {
                pending = Some(SelectorCombinator::Descendant);
            }
            match chars.peek() {
                None => break,
                Some('>') => {
                    if parts.is_empty() || pending == Some(SelectorCombinator::Child) {
                        return Err(fail("misplaced '>'"));
                    }
                    chars.next();
                    pending = Some(SelectorCombinator::Child);
                }
                Some(_) => {
                    let step = parse_step(&mut chars).map_err(fail)?;
                    let combinator = if parts.is_empty() {
                        None
                    } else {
                        Some(pending.take().ok_or_else(|| fail("missing combinator"))?)
                    };
                    parts.push(SelectorPart { step, combinator });
                }
            }
        }
        if pending == Some(SelectorCombinator::Child) {
            return Err(fail("dangling '>'"));
        }
        Ok(Selector { parts })
    }

    /// Whether `node`, whose ancestors are given outermost first, matches.
    pub fn matches(&self, node: &DomNode, ancestors: &[&DomNode]) -> bool {
        matches_parts(&self.parts, node, ancestors)
    }
}

fn matches_parts(parts: &[SelectorPart], node: &DomNode, ancestors: &[&DomNode]) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return true;
    };
    if !last.step.matches(node) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }
    match last.combinator {
        Some(SelectorCombinator::Child) => match ancestors.split_last() {
            Some((parent, above)) => matches_parts(rest, parent, above),
            None => false,
        },
        _ => (0..ancestors.len())
            .rev()
            .any(|i| matches_parts(rest, ancestors[i], &ancestors[..i])),
    }
}

fn parse_step(chars: &mut Peekable<Chars<'_>>) -> Result<SelectorStep, &'static str> {
    let mut step = SelectorStep::default();
    while let Some(&c) = chars.peek() {
        match c {
            '#' => {
                chars.next();
                if step.id.is_some() {
                    return Err("duplicate id");
                }
                step.id = Some(parse_ident(chars)?);
            }
            '.' => {
                chars.next();
                step.classes.push(parse_ident(chars)?);
            }
            '*' => {
                chars.next();
                if !step.is_empty() {
                    return Err("'*' must start a step");
                }
                step.universal = true;
            }
            c if c.is_whitespace() || c == '>' => break,
            c if is_ident_char(c) => {
                if !step.is_empty() {
                    return Err("tag name must start a step");
                }
                step.tag = Some(parse_ident(chars)?);
            }
            _ => return Err("unsupported selector syntax"),
        }
    }
    if step.is_empty() {
        return Err("empty step");
    }
    Ok(step)
}

fn parse_ident(chars: &mut Peekable<Chars<'_>>) -> Result<String, &'static str> {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    if ident.is_empty() {
        return Err("expected identifier");
    }
    Ok(ident)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> DomNode {
        DomNode::element("body").with_children([
            DomNode::element("div").with_class("quantity").with_children([
                DomNode::element("button").with_class("quantity-btn minus"),
                DomNode::element("input").with_class("quantity-input"),
                DomNode::element("button").with_class("quantity-btn plus"),
            ]),
            DomNode::element("div").with_class("notification").with_child(
                DomNode::element("div").with_child(DomNode::text("span", "hi")),
            ),
        ])
    }

    #[test]
    fn test_compound_classes_match_only_full_set() {
        let page = page();
        assert_eq!(page.select_all(".quantity-btn.minus").unwrap(), vec![vec![0, 0]]);
        assert_eq!(page.select_all(".quantity-btn").unwrap().len(), 2);
        assert_eq!(page.select_all("button.plus").unwrap(), vec![vec![0, 2]]);
    }

    #[test]
    fn test_descendant_and_child_combinators() {
        let page = page();
        assert_eq!(page.select_all(".notification span").unwrap(), vec![vec![1, 0, 0]]);
        assert!(page.select_all(".notification > span").unwrap().is_empty());
        assert_eq!(page.select_all(".notification > div > span").unwrap().len(), 1);
        assert_eq!(page.select_all("body   .quantity >input").unwrap(), vec![vec![0, 1]]);
    }

    #[test]
    fn test_universal_matches_elements_only() {
        let node = DomNode::element("p").with_child(DomNode::text_node("x"));
        assert_eq!(node.select_all("*").unwrap(), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_rejects_bad_syntax() {
        for bad in ["", "  ", "> a", "a >", "a > > b", "#", "a[href]", "a:hover", "div#x#y", ".a b*"] {
            assert!(Selector::parse(bad).is_err(), "{bad:?} should be rejected");
        }
        let err = Selector::parse("a >").unwrap_err();
        assert_eq!(err.to_string(), "invalid selector \"a >\": dangling '>'");
    }
}
