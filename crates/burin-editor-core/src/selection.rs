//! Selections and direction-normalized ranges over paths.
//!
//! A selection is the anchor/focus pair as the user produced it; a range is
//! the same pair reordered so `start` is not after `end`. Ranges are derived
//! on demand and never stored.

use crate::host::{HostRange, HostSelection, NodeLookup};
use crate::path::{Path, PathError};

/// An anchor/focus pair of non-empty paths.
///
/// The anchor is where the selection started, the focus is its current
/// extent; they may be in either order. Collapsed selections (anchor equals
/// focus) are carets.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    anchor: Path,
    focus: Path,
}

impl Selection {
    /// Build a selection from two endpoints. Root paths are rejected: a
    /// selection endpoint always addresses a child of the root or deeper.
    pub fn new(anchor: Path, focus: Path) -> Result<Self, PathError> {
        if anchor.is_root() || focus.is_root() {
            return Err(PathError::EmptyPath);
        }
        Ok(Self { anchor, focus })
    }

    /// A collapsed selection at `path`.
    pub fn caret(path: Path) -> Result<Self, PathError> {
        Self::new(path.clone(), path)
    }

    pub fn anchor(&self) -> &Path {
        &self.anchor
    }

    pub fn focus(&self) -> &Path {
        &self.focus
    }

    /// Whether the anchor is not after the focus, under the prefix-tolerant
    /// comparison of [`Path::is_not_after`].
    pub fn is_forward(&self) -> bool {
        self.anchor.is_not_after(&self.focus)
    }

    /// A caret, not a range.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The direction-normalized bounds of this selection.
    pub fn to_range(&self) -> Range {
        if self.is_forward() {
            Range {
                start: self.anchor.clone(),
                end: self.focus.clone(),
            }
        } else {
            Range {
                start: self.focus.clone(),
                end: self.anchor.clone(),
            }
        }
    }

    /// Both endpoints moved to the range start. Identity on a caret.
    pub fn collapse_to_start(&self) -> Selection {
        if self.is_collapsed() {
            return self.clone();
        }
        let start = self.to_range().start;
        Selection {
            anchor: start.clone(),
            focus: start,
        }
    }

    /// Both endpoints moved to the range end. Identity on a caret.
    pub fn collapse_to_end(&self) -> Selection {
        if self.is_collapsed() {
            return self.clone();
        }
        let end = self.to_range().end;
        Selection {
            anchor: end.clone(),
            focus: end,
        }
    }

    /// The selection with its anchor shifted by `delta` offsets.
    pub fn move_anchor(&self, delta: isize) -> Result<Selection, PathError> {
        Ok(Selection {
            anchor: self.anchor.shifted(delta)?,
            focus: self.focus.clone(),
        })
    }

    /// The selection with its focus shifted by `delta` offsets.
    pub fn move_focus(&self, delta: isize) -> Result<Selection, PathError> {
        Ok(Selection {
            anchor: self.anchor.clone(),
            focus: self.focus.shifted(delta)?,
        })
    }

    /// Both endpoints shifted by the same `delta`, preserving the span.
    pub fn move_by(&self, delta: isize) -> Result<Selection, PathError> {
        Ok(Selection {
            anchor: self.anchor.shifted(delta)?,
            focus: self.focus.shifted(delta)?,
        })
    }

    /// Drop the final index of both endpoints, converting a char selection
    /// into the selection of its enclosing nodes.
    pub fn ascend(&self) -> Result<Selection, PathError> {
        Selection::new(self.anchor.parent()?, self.focus.parent()?)
    }

    /// Append one index to each endpoint, converting a node selection into a
    /// selection of char offsets within those nodes.
    pub fn descend(&self, anchor_index: usize, focus_index: usize) -> Selection {
        Selection {
            anchor: self.anchor.child(anchor_index),
            focus: self.focus.child(focus_index),
        }
    }

    /// Resolve a host-reported selection snapshot through the lookup
    /// capability. `None` when either node is unknown to the lookup, which is
    /// routine (content outside the editor, or a node not yet registered) and
    /// never a fault.
    pub fn from_host_selection<L: NodeLookup>(
        lookup: &L,
        host: &HostSelection<L::Node>,
    ) -> Option<Selection> {
        let anchor = lookup.path_for_node(&host.anchor_node)?.child(host.anchor_offset);
        let focus = lookup.path_for_node(&host.focus_node)?.child(host.focus_offset);
        Selection::new(anchor, focus).ok()
    }

    /// Resolve a host-reported start/end range snapshot, as carried by input
    /// events, into a forward selection.
    pub fn from_host_range<L: NodeLookup>(
        lookup: &L,
        host: &HostRange<L::Node>,
    ) -> Option<Selection> {
        let start = lookup
            .path_for_node(&host.start_container)?
            .child(host.start_offset);
        let end = lookup
            .path_for_node(&host.end_container)?
            .child(host.end_offset);
        Selection::new(start, end).ok()
    }
}

/// Direction-independent bounds derived from a selection: `start` is not
/// after `end`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Range {
    start: Path,
    end: Path,
}

impl Range {
    pub fn start(&self) -> &Path {
        &self.start
    }

    pub fn end(&self) -> &Path {
        &self.end
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PathRegistry;

    fn selection(anchor: impl Into<Path>, focus: impl Into<Path>) -> Selection {
        Selection::new(anchor.into(), focus.into()).unwrap()
    }

    #[test]
    fn test_rejects_root_endpoints() {
        assert_eq!(
            Selection::new(Path::root(), Path::from([0])),
            Err(PathError::EmptyPath)
        );
        assert_eq!(Selection::caret(Path::root()), Err(PathError::EmptyPath));
    }

    #[test]
    fn test_directionality() {
        let forward = selection([0, 0], [0, 2]);
        assert!(forward.is_forward());
        let backward = selection([0, 2], [0, 0]);
        assert!(!backward.is_forward());

        let range = forward.to_range();
        assert_eq!(range, backward.to_range());
        assert_eq!(range.start(), &Path::from([0, 0]));
        assert_eq!(range.end(), &Path::from([0, 2]));
    }

    #[test]
    fn test_collapse() {
        let sel = selection([0, 2], [0, 0]);
        let start = sel.collapse_to_start();
        assert!(start.is_collapsed());
        assert_eq!(start.anchor(), &Path::from([0, 0]));
        let end = sel.collapse_to_end();
        assert_eq!(end.focus(), &Path::from([0, 2]));
        // Idempotent.
        assert_eq!(start.collapse_to_start(), start);
    }

    #[test]
    fn test_move_preserves_span() {
        let sel = selection([0, 0, 1], [0, 0, 3]);
        let moved = sel.move_by(1).unwrap();
        assert_eq!(moved, selection([0, 0, 2], [0, 0, 4]));
        let back = moved.move_by(-1).unwrap();
        assert_eq!(back, sel);
    }

    #[test]
    fn test_move_below_zero_fails() {
        let caret = Selection::caret(Path::from([0, 0])).unwrap();
        assert!(caret.move_anchor(-1).is_err());
        assert!(caret.move_by(-1).is_err());
    }

    #[test]
    fn test_ascend_descend_round_trip() {
        let sel = selection([0, 1], [0, 2]);
        let chars = sel.descend(0, 4);
        assert_eq!(chars, selection([0, 1, 0], [0, 2, 4]));
        assert_eq!(chars.ascend().unwrap(), sel);
    }

    #[test]
    fn test_ascend_to_root_fails() {
        let sel = selection([0], [1]);
        assert!(sel.ascend().is_err());
    }

    #[test]
    fn test_from_host_selection() {
        let mut registry: PathRegistry<u32> = PathRegistry::new();
        registry.register(10, Path::from([0, 0]));
        registry.register(11, Path::from([1, 0]));

        let host = HostSelection {
            anchor_node: 10,
            anchor_offset: 2,
            focus_node: 11,
            focus_offset: 5,
        };
        let sel = Selection::from_host_selection(&registry, &host).unwrap();
        assert_eq!(sel, selection([0, 0, 2], [1, 0, 5]));
    }

    #[test]
    fn test_from_host_selection_unresolvable() {
        let mut registry: PathRegistry<u32> = PathRegistry::new();
        registry.register(10, Path::from([0, 0]));

        let host = HostSelection {
            anchor_node: 99, // never registered
            anchor_offset: 0,
            focus_node: 10,
            focus_offset: 1,
        };
        assert!(Selection::from_host_selection(&registry, &host).is_none());
    }

    #[test]
    fn test_from_host_range() {
        let mut registry: PathRegistry<u32> = PathRegistry::new();
        registry.register(7, Path::from([0, 1]));

        let host = HostRange {
            start_container: 7,
            start_offset: 1,
            end_container: 7,
            end_offset: 4,
        };
        let sel = Selection::from_host_range(&registry, &host).unwrap();
        assert_eq!(sel, selection([0, 1, 1], [0, 1, 4]));
        assert!(sel.is_forward());
    }
}
