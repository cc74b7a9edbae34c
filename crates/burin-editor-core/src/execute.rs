//! The reducer: applying actions to editor values.
//!
//! `reduce` is the central dispatch point. It is pure and total: every arm
//! either produces a new value or hands back the input value unchanged, and
//! the match is exhaustive so the action set and the transition set cannot
//! drift apart.

use crate::actions::{Action, Direction};
use crate::value::Value;

/// Apply one action to a value, producing the next value.
///
/// Never fails; contract-violating payloads (for example a caret whose path
/// cannot contain a text node) degrade to returning the input value, logged
/// under the `burin::editor` target.
pub fn reduce(value: &Value, action: &Action) -> Value {
    match action {
        Action::Focus => value.set_focus(true),
        Action::Blur => value.set_focus(false),
        Action::SelectionChange { selection } => value.select(selection.clone()),
        Action::InsertText { text, selection } => {
            let text_path = match selection.focus().parent() {
                Ok(path) if !path.is_root() => path,
                _ => {
                    tracing::debug!(
                        target: "burin::editor",
                        focus = ?selection.focus(),
                        "insert ignored: caret is not inside a text node"
                    );
                    return value.clone();
                }
            };
            value
                .set_text(&text_path, text.clone())
                .select(Some(selection.clone()))
        }
        Action::DeleteText {
            selection,
            direction,
        } => {
            let span = if selection.is_collapsed() {
                let widened = match direction {
                    Direction::Backward => selection.move_anchor(-1),
                    Direction::Forward => selection.move_focus(1),
                };
                match widened {
                    Ok(span) => span,
                    Err(_) => {
                        // Backward delete at offset zero: nothing before the
                        // caret in this node.
                        tracing::trace!(
                            target: "burin::editor",
                            "delete ignored: caret at node boundary"
                        );
                        return value.clone();
                    }
                }
            } else {
                selection.clone()
            };
            value.delete_content(&span)
        }
    }
}

/// The dispatch boundary owned by the hosting application.
///
/// Holds the single current value, applies actions strictly in dispatch
/// order, and invokes the change handler only when an action actually
/// produced a new value.
pub struct Editor {
    value: Value,
    on_change: Option<Box<dyn FnMut(&Value)>>,
}

impl Editor {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            on_change: None,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Install the handler invoked after every value replacement.
    pub fn on_change(&mut self, handler: impl FnMut(&Value) + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    /// Apply `action` to the current value. Returns whether anything changed.
    pub fn dispatch(&mut self, action: &Action) -> bool {
        let next = reduce(&self.value, action);
        if next.same_as(&self.value) {
            tracing::trace!(target: "burin::editor", ?action, "action produced no change");
            return false;
        }
        tracing::trace!(target: "burin::editor", ?action, "value replaced");
        self.value = next;
        if let Some(handler) = self.on_change.as_mut() {
            handler(&self.value);
        }
        true
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("value", &self.value)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use smol_str::SmolStr;

    use super::*;
    use crate::actions::InputType;
    use crate::host::{HostSelection, PathRegistry};
    use crate::node::{Element, Node, Text};
    use crate::path::Path;
    use crate::selection::Selection;

    /// `<div><div>foo</div></div>`
    fn make_editor() -> Editor {
        Editor::new(Value::new(Element::new(vec![
            Element::new(vec![Node::Text(Text::new("foo"))]).into(),
        ])))
    }

    fn caret(path: impl Into<Path>) -> Selection {
        Selection::caret(path.into()).unwrap()
    }

    #[test]
    fn test_focus_and_blur() {
        let mut editor = make_editor();
        assert!(editor.dispatch(&Action::Focus));
        assert!(editor.value().has_focus());
        // Focusing again changes nothing.
        assert!(!editor.dispatch(&Action::Focus));
        assert!(editor.dispatch(&Action::Blur));
        assert!(!editor.value().has_focus());
    }

    #[test]
    fn test_insert_text_sets_node_and_selection() {
        let mut editor = make_editor();
        let action = Action::InsertText {
            text: SmolStr::new("fooX"),
            selection: caret([0, 0, 4]),
        };
        assert!(editor.dispatch(&action));
        assert_eq!(
            editor
                .value()
                .element()
                .text_at(&Path::from([0, 0]))
                .map(Text::as_str),
            Some("fooX")
        );
        assert_eq!(editor.value().selection(), Some(&caret([0, 0, 4])));
    }

    #[test]
    fn test_insert_with_rootward_caret_is_ignored() {
        let mut editor = make_editor();
        let action = Action::InsertText {
            text: SmolStr::new("x"),
            // Focus parent would be the root: no text node there.
            selection: caret([2]),
        };
        assert!(!editor.dispatch(&action));
    }

    #[test]
    fn test_delete_backward_at_caret() {
        let mut editor = make_editor();
        let action = Action::DeleteText {
            selection: caret([0, 0, 3]),
            direction: Direction::Backward,
        };
        assert!(editor.dispatch(&action));
        assert_eq!(
            editor
                .value()
                .element()
                .text_at(&Path::from([0, 0]))
                .map(Text::as_str),
            Some("fo")
        );
        assert_eq!(editor.value().selection(), Some(&caret([0, 0, 2])));
    }

    #[test]
    fn test_delete_backward_at_offset_zero_is_ignored() {
        let mut editor = make_editor();
        let action = Action::DeleteText {
            selection: caret([0, 0, 0]),
            direction: Direction::Backward,
        };
        assert!(!editor.dispatch(&action));
        assert_eq!(
            editor
                .value()
                .element()
                .text_at(&Path::from([0, 0]))
                .map(Text::as_str),
            Some("foo")
        );
    }

    #[test]
    fn test_delete_forward_at_caret() {
        let mut editor = make_editor();
        let action = Action::DeleteText {
            selection: caret([0, 0, 0]),
            direction: Direction::Forward,
        };
        assert!(editor.dispatch(&action));
        assert_eq!(
            editor
                .value()
                .element()
                .text_at(&Path::from([0, 0]))
                .map(Text::as_str),
            Some("oo")
        );
    }

    #[test]
    fn test_on_change_fires_only_on_real_change() {
        let mut editor = make_editor();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        editor.on_change(move |_| seen.set(seen.get() + 1));

        editor.dispatch(&Action::Focus);
        assert_eq!(calls.get(), 1);
        editor.dispatch(&Action::Focus); // no-op
        assert_eq!(calls.get(), 1);
        editor.dispatch(&Action::SelectionChange {
            selection: Some(caret([0, 0, 1])),
        });
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_unresolvable_host_selection_never_reaches_the_reducer() {
        let mut editor = make_editor();
        let registry: PathRegistry<u32> = PathRegistry::new();
        let host = HostSelection {
            anchor_node: 1,
            anchor_offset: 0,
            focus_node: 1,
            focus_offset: 0,
        };
        // The lookup knows nothing, so no selection and no action.
        let resolved = Selection::from_host_selection(&registry, &host);
        assert!(resolved.is_none());
        let action = resolved
            .and_then(|selection| {
                crate::actions::action_for_input(&InputType::InsertText, Some("x"), selection)
            });
        assert!(action.is_none());
        // The value is untouched.
        let before = editor.value().clone();
        if let Some(action) = action {
            editor.dispatch(&action);
        }
        assert!(editor.value().same_as(&before));
    }
}
