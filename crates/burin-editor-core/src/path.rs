//! Structural paths into the element tree.
//!
//! A `Path` is an ordered sequence of child indices: `path[i]` selects the
//! `i`-th child of the node reached by `path[..i]`, starting from the root
//! element. The empty path addresses the root itself. When a path addresses a
//! character position, its final index is a char offset into a text node
//! rather than a child index.
//!
//! Paths carry no reference to a tree. The same `Path` value is meaningless
//! without a tree to resolve it against, and becomes stale the instant the
//! tree is restructured at or above the addressed position.

use thiserror::Error;

/// A caller-contract violation in a path operation.
///
/// These indicate a bug at the call site, not a runtime condition, so the
/// offending operation is aborted instead of coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// The root path has no parent and no last index.
    #[error("the root path has no parent or last index")]
    EmptyPath,

    /// Shifting the final index would move it below zero.
    #[error("shifting index {index} by {delta} would produce a negative index")]
    NegativeIndex { index: usize, delta: isize },
}

/// A structural address into the element tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<usize>);

impl Path {
    /// The empty path, addressing the root element.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Whether this path addresses the root element.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of indices in the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw index sequence.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// All but the last index.
    pub fn parent(&self) -> Result<Path, PathError> {
        match self.0.split_last() {
            Some((_, parent)) => Ok(Path(parent.to_vec())),
            None => Err(PathError::EmptyPath),
        }
    }

    /// The final index.
    pub fn last(&self) -> Result<usize, PathError> {
        self.0.last().copied().ok_or(PathError::EmptyPath)
    }

    /// `(parent, last)` in one step.
    pub fn split_last(&self) -> Result<(Path, usize), PathError> {
        match self.0.split_last() {
            Some((&last, parent)) => Ok((Path(parent.to_vec()), last)),
            None => Err(PathError::EmptyPath),
        }
    }

    /// Append one index, descending into a child (or into a char offset).
    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Path(indices)
    }

    /// A copy of this path with its final index shifted by `delta`.
    ///
    /// The result is not clamped to any sibling or char count; bounds are
    /// checked by the tree model when the path is resolved.
    pub fn shifted(&self, delta: isize) -> Result<Path, PathError> {
        let (parent, last) = self.split_last()?;
        let moved = last as isize + delta;
        if moved < 0 {
            return Err(PathError::NegativeIndex { index: last, delta });
        }
        Ok(parent.child(moved as usize))
    }

    /// Index-wise "not after" comparison between two paths.
    ///
    /// Holds iff no index of `self` exceeds the corresponding index of
    /// `other`; indices beyond the shorter path are ignored. This is a
    /// prefix-tolerant comparison, not a strict total order across differing
    /// lengths: a path that is a strict prefix of another compares as "not
    /// after" in both directions. Selection direction is defined in these
    /// terms, so ranges built from selections whose endpoints diverge at
    /// different depths inherit that looseness.
    pub fn is_not_after(&self, other: &Path) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a <= b)
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for Path {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_equality() {
        let p = Path::from([0, 2, 1]);
        assert_eq!(p, p.clone());
        assert_ne!(p, Path::from([0, 2]));
        assert_ne!(p, Path::from([0, 2, 2]));
        assert_eq!(Path::root(), Path::from([]));
    }

    #[test]
    fn test_parent_last_round_trip() {
        let p = Path::from([3, 1, 4]);
        let (parent, last) = p.split_last().unwrap();
        assert_eq!(parent, Path::from([3, 1]));
        assert_eq!(last, 4);
        assert_eq!(parent.child(last), p);
    }

    #[test]
    fn test_root_has_no_parent() {
        assert_eq!(Path::root().parent(), Err(PathError::EmptyPath));
        assert_eq!(Path::root().last(), Err(PathError::EmptyPath));
        assert_eq!(Path::root().shifted(1), Err(PathError::EmptyPath));
    }

    #[test]
    fn test_shift_composes() {
        let p = Path::from([0, 5]);
        let twice = p.shifted(2).unwrap().shifted(3).unwrap();
        assert_eq!(twice, p.shifted(5).unwrap());
        assert_eq!(twice, Path::from([0, 10]));
    }

    #[test]
    fn test_shift_below_zero_fails() {
        assert_eq!(
            Path::from([0]).shifted(-1),
            Err(PathError::NegativeIndex { index: 0, delta: -1 })
        );
        // Shifting back up to zero is fine.
        assert_eq!(Path::from([0, 2]).shifted(-2).unwrap(), Path::from([0, 0]));
    }

    #[test]
    fn test_is_not_after() {
        let a = Path::from([0, 0]);
        let b = Path::from([0, 2]);
        assert!(a.is_not_after(&b));
        assert!(!b.is_not_after(&a));
        assert!(a.is_not_after(&a));
    }

    #[test]
    fn test_is_not_after_is_prefix_tolerant() {
        // A strict prefix compares as "not after" in both directions.
        let short = Path::from([0, 1]);
        let long = Path::from([0, 1, 9]);
        assert!(short.is_not_after(&long));
        assert!(long.is_not_after(&short));
    }
}
