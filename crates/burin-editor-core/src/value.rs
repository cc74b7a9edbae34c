//! The aggregate editor state and its pure transitions.
//!
//! A `Value` is immutable: every operation returns a new value that shares
//! unchanged subtrees with the previous one, and returns a handle-identical
//! value when nothing changed at all. The hosting application holds the
//! single current value and replaces it on every dispatched action; nothing
//! else retains a value beyond the current render cycle.

use smol_str::SmolStr;

use crate::node::Element;
use crate::path::Path;
use crate::selection::Selection;

/// The editor state: the root element, whether the surface has focus, and
/// the selection if the editor holds a caret or range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Value {
    element: Element,
    has_focus: bool,
    selection: Option<Selection>,
}

impl Value {
    /// The initial state: unfocused, nothing selected.
    pub fn new(element: Element) -> Self {
        Self {
            element,
            has_focus: false,
            selection: None,
        }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Cheap unchanged-detection: element handle identity plus focus and
    /// selection equality. Transitions guarantee this holds between input and
    /// output whenever they had nothing to do.
    pub fn same_as(&self, other: &Value) -> bool {
        Element::ptr_eq(&self.element, &other.element)
            && self.has_focus == other.has_focus
            && self.selection == other.selection
    }

    /// Set or clear focus; element and selection are untouched.
    pub fn set_focus(&self, has_focus: bool) -> Value {
        if self.has_focus == has_focus {
            return self.clone();
        }
        Value {
            element: self.element.clone(),
            has_focus,
            selection: self.selection.clone(),
        }
    }

    /// Replace the selection wholesale.
    ///
    /// The paths are not validated against the current element; resolving
    /// them is the render layer's job, through its node↔path lookup. Passing
    /// `None` drops the caret entirely.
    pub fn select(&self, selection: Option<Selection>) -> Value {
        if self.selection == selection {
            return self.clone();
        }
        Value {
            element: self.element.clone(),
            has_focus: self.has_focus,
            selection,
        }
    }

    /// Write `text` into the text node at `path`, then renormalize.
    ///
    /// A path that does not resolve to a text node leaves the value
    /// unchanged. If normalization merges text runs, a stored selection that
    /// pointed into a merged node goes stale; the value does not repair it,
    /// and callers are expected to re-derive the selection from the host once
    /// the surface settles.
    pub fn set_text(&self, path: &Path, text: impl Into<SmolStr>) -> Value {
        let written = self.element.set_text(path, text);
        if Element::ptr_eq(&written, &self.element) {
            return self.clone();
        }
        Value {
            element: written.normalize(),
            has_focus: self.has_focus,
            selection: self.selection.clone(),
        }
    }

    /// Remove the content spanned by `selection` and collapse to the
    /// deletion point.
    ///
    /// Handles a span within one text node, a span across siblings (whole
    /// intervening nodes removed, boundary nodes trimmed), and a span
    /// crossing nested elements. The resulting selection is a caret at the
    /// range start; as with [`Value::set_text`], it is not re-derived if
    /// normalization restructures the boundary afterwards. A span that
    /// removes nothing (collapsed, or with a stale bound) leaves the value
    /// unchanged, selection included.
    pub fn delete_content(&self, selection: &Selection) -> Value {
        let range = selection.to_range();
        let deleted = self
            .element
            .delete_between(Some(range.start().indices()), Some(range.end().indices()));
        if Element::ptr_eq(&deleted, &self.element) {
            return self.clone();
        }
        let caret = match Selection::caret(range.start().clone()) {
            Ok(caret) => Some(caret),
            Err(_) => self.selection.clone(),
        };
        Value {
            element: deleted.normalize(),
            has_focus: self.has_focus,
            selection: caret,
        }
    }
}
