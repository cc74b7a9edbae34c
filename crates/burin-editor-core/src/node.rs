//! The recursive element/text tree.
//!
//! Nodes are immutable and copy-on-write: an `Element` is a cheap `Arc`
//! handle, and every mutator returns either a rebuilt spine sharing all
//! untouched subtrees or the identical handle when nothing changed.
//! `Element::ptr_eq` is the "did anything change" check consumers rely on.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use smol_str::{SmolStr, format_smolstr};

use crate::path::Path;

/// A text leaf.
///
/// May be the empty string, which carries meaning: no visible character,
/// rendered by the host as a line-break placeholder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Text(SmolStr);

impl Text {
    pub fn new(content: impl Into<SmolStr>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty text renders as a line break, not as nothing.
    pub fn is_line_break(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in chars, the unit path offsets are measured in.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// This text with the chars in `start..end` removed. Offsets are char
    /// offsets and are clamped to the text.
    pub fn remove_span(&self, start: usize, end: usize) -> Text {
        let len = self.char_len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        if start == end {
            return self.clone();
        }
        let start_byte = self.byte_at(start);
        let end_byte = self.byte_at(end);
        Text(format_smolstr!(
            "{}{}",
            &self.0[..start_byte],
            &self.0[end_byte..]
        ))
    }

    fn merged_with(&self, other: &Text) -> Text {
        Text(format_smolstr!("{}{}", self.0, other.0))
    }

    fn byte_at(&self, char_offset: usize) -> usize {
        self.0
            .char_indices()
            .nth(char_offset)
            .map(|(byte, _)| byte)
            .unwrap_or(self.0.len())
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for Text {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier assigned to an element once, at creation.
///
/// Never recomputed from content and never reassigned; two elements with the
/// same identifier are the same element at different points in time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(SmolStr);

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(0);

impl ElementId {
    /// A fresh identifier from a process-wide counter.
    pub fn fresh() -> Self {
        let n = NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed);
        Self(format_smolstr!("e{n:x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An identified node with ordered children.
#[derive(Clone, Debug)]
pub struct Element {
    inner: Arc<ElementInner>,
}

#[derive(Debug)]
struct ElementInner {
    id: ElementId,
    children: Vec<Node>,
}

/// A child position in the tree: either a nested element or a text leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Identity comparison: handle equality for elements, value equality for
    /// text leaves.
    pub fn same_as(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Element(a), Node::Element(b)) => Element::ptr_eq(a, b),
            (Node::Text(a), Node::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl Element {
    /// A new element with a fresh identifier.
    pub fn new(children: Vec<Node>) -> Self {
        Self::with_parts(ElementId::fresh(), children)
    }

    fn with_parts(id: ElementId, children: Vec<Node>) -> Self {
        Self {
            inner: Arc::new(ElementInner { id, children }),
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.inner.id
    }

    pub fn children(&self) -> &[Node] {
        &self.inner.children
    }

    /// Whether two handles refer to the same tree value. This is the cheap
    /// unchanged-detection check; mutators return a `ptr_eq` handle whenever
    /// they had nothing to do.
    pub fn ptr_eq(a: &Element, b: &Element) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Canonical form: runs of consecutive non-empty text siblings are merged
    /// into a single text node, recursively. Empty texts are line-break
    /// placeholders and terminate a run; they are never merged away.
    ///
    /// Returns the identical handle when nothing changed anywhere in the
    /// subtree.
    pub fn normalize(&self) -> Element {
        let mut changed = false;
        let mut children: Vec<Node> = Vec::with_capacity(self.children().len());
        for child in self.children() {
            match child {
                Node::Element(element) => {
                    let normalized = element.normalize();
                    if !Element::ptr_eq(&normalized, element) {
                        changed = true;
                    }
                    children.push(Node::Element(normalized));
                }
                Node::Text(text) => {
                    if !text.is_line_break()
                        && let Some(Node::Text(previous)) = children.last_mut()
                        && !previous.is_line_break()
                    {
                        *previous = previous.merged_with(text);
                        changed = true;
                        continue;
                    }
                    children.push(Node::Text(text.clone()));
                }
            }
        }
        if changed {
            Element::with_parts(self.id().clone(), children)
        } else {
            self.clone()
        }
    }

    pub fn is_normalized(&self) -> bool {
        Element::ptr_eq(&self.normalize(), self)
    }

    /// The node addressed by `path`, if every interior segment resolves to an
    /// element and every index is in range. The root path addresses no child.
    pub fn node_at(&self, path: &Path) -> Option<&Node> {
        let mut element = self;
        let mut indices = path.indices();
        loop {
            let (&index, rest) = indices.split_first()?;
            let child = element.children().get(index)?;
            if rest.is_empty() {
                return Some(child);
            }
            element = child.as_element()?;
            indices = rest;
        }
    }

    /// The element at `path`; the root path addresses this element.
    pub fn element_at(&self, path: &Path) -> Option<&Element> {
        if path.is_root() {
            Some(self)
        } else {
            self.node_at(path)?.as_element()
        }
    }

    /// The text leaf at `path`.
    pub fn text_at(&self, path: &Path) -> Option<&Text> {
        self.node_at(path)?.as_text()
    }

    /// Rewrite the node addressed by `path` through `f`, rebuilding only the
    /// ancestor spine and sharing all untouched siblings.
    ///
    /// Misses (out-of-range index, text where an element was required, `f`
    /// declining with `None`, or `f` returning an identical node) are silent
    /// no-ops returning the original handle. Stale paths arrive routinely
    /// during rapid typing and must not fault.
    pub fn map_node_at<F>(&self, path: &Path, f: F) -> Element
    where
        F: FnOnce(&Node) -> Option<Node>,
    {
        self.map_node_in(path.indices(), f)
    }

    fn map_node_in<F>(&self, indices: &[usize], f: F) -> Element
    where
        F: FnOnce(&Node) -> Option<Node>,
    {
        let Some((&index, rest)) = indices.split_first() else {
            return self.clone();
        };
        let Some(child) = self.children().get(index) else {
            return self.clone();
        };
        if rest.is_empty() {
            return match f(child) {
                Some(replacement) if !replacement.same_as(child) => {
                    self.with_child_replaced(index, replacement)
                }
                _ => self.clone(),
            };
        }
        let Some(element) = child.as_element() else {
            return self.clone();
        };
        let updated = element.map_node_in(rest, f);
        if Element::ptr_eq(&updated, element) {
            self.clone()
        } else {
            self.with_child_replaced(index, Node::Element(updated))
        }
    }

    fn with_child_replaced(&self, index: usize, node: Node) -> Element {
        let mut children = self.children().to_vec();
        children[index] = node;
        Element::with_parts(self.id().clone(), children)
    }

    /// Write `text` into the text leaf at `path`. A path that does not
    /// resolve to a text leaf, or a write of the current content, returns the
    /// original handle.
    pub fn set_text(&self, path: &Path, text: impl Into<SmolStr>) -> Element {
        let text = Text::new(text);
        self.map_node_at(path, move |node| {
            let Node::Text(current) = node else {
                return None;
            };
            if *current == text {
                None
            } else {
                Some(Node::Text(text))
            }
        })
    }

    /// Remove the content spanned by two bounds, each a text path with a
    /// trailing char offset relative to this element. `None` on either side
    /// means the span is open toward that end of the subtree.
    ///
    /// Whole nodes strictly between the bound branches are removed; the
    /// boundary text leaves are trimmed in place (possibly down to the empty
    /// string, which stays as a line-break placeholder). A bound that does
    /// not resolve to a text leaf is stale input, and staleness is checked
    /// before anything is touched: the whole tree comes back unchanged, never
    /// with one side trimmed and the other ignored.
    pub(crate) fn delete_between(
        &self,
        start: Option<&[usize]>,
        end: Option<&[usize]>,
    ) -> Element {
        if start.is_some_and(|bound| !self.is_text_bound(bound))
            || end.is_some_and(|bound| !self.is_text_bound(bound))
        {
            return self.clone();
        }
        let children = self.children();
        let (start_index, start_rest) = match start {
            Some([index, rest @ ..]) => (*index, Some(rest)),
            Some([]) => return self.clone(),
            None => (0, None),
        };
        let (end_index, end_rest) = match end {
            Some([index, rest @ ..]) => (*index, Some(rest)),
            Some([]) => return self.clone(),
            None => (children.len().saturating_sub(1), None),
        };
        if start_index >= children.len() || end_index >= children.len() || end_index < start_index
        {
            return self.clone();
        }

        let mut changed = false;
        let mut kept: Vec<Node> = Vec::with_capacity(children.len());
        for (index, child) in children.iter().enumerate() {
            if index < start_index || index > end_index {
                kept.push(child.clone());
                continue;
            }
            if index > start_index && index < end_index {
                // Whole node inside the span.
                changed = true;
                continue;
            }
            let (from, to) = if start_index == end_index {
                (start_rest, end_rest)
            } else if index == start_index {
                (start_rest, None)
            } else {
                (None, end_rest)
            };
            let trimmed = delete_in_node(child, from, to);
            if !trimmed.same_as(child) {
                changed = true;
            }
            kept.push(trimmed);
        }

        if changed {
            Element::with_parts(self.id().clone(), kept)
        } else {
            self.clone()
        }
    }

    /// Whether `indices` is a resolvable deletion bound: a path to a text
    /// leaf of this subtree plus one trailing char offset.
    fn is_text_bound(&self, indices: &[usize]) -> bool {
        match indices.split_last() {
            Some((_, text_path)) if !text_path.is_empty() => {
                self.text_at(&Path::from(text_path)).is_some()
            }
            _ => false,
        }
    }
}

fn delete_in_node(node: &Node, start: Option<&[usize]>, end: Option<&[usize]>) -> Node {
    match node {
        Node::Element(element) => Node::Element(element.delete_between(start, end)),
        Node::Text(text) => {
            // A bound reaching a text leaf must be exactly its char offset.
            let from = match start {
                Some([offset]) => *offset,
                Some(_) => return node.clone(),
                None => 0,
            };
            let to = match end {
                Some([offset]) => *offset,
                Some(_) => return node.clone(),
                None => text.char_len(),
            };
            Node::Text(text.remove_span(from, to))
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Element::ptr_eq(self, other)
            || (self.id() == other.id() && self.children() == other.children())
    }
}

impl Eq for Element {}
