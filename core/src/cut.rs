//! Frontier partitions ("cut states") and the single-cell transition.
//!
//! The frontier holds one cell per position of the current slice: cells of
//! the current slice up to the position just visited, cells of the previous
//! slice after it. Each position carries a component label. Label `0` marks a
//! position that has no cell yet, which only happens during the first slice.

use alloc::vec;
use alloc::vec::Vec;

/// Temporary label for a cell that starts a new component.
const FRESH: u8 = u8::MAX;

/// Which candidate edges join the newly visited cell to visited cells.
///
/// Choices are ordered by mask value: none, along, across, both. This order
/// decides the total order over mazes and is shared by counting, ranking and
/// unranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Choice(u8);

impl Choice {
    const ALONG: u8 = 0b01;
    const ACROSS: u8 = 0b10;

    pub(crate) const ALL: [Choice; 4] = [Choice(0), Choice(1), Choice(2), Choice(3)];

    pub(crate) fn new(along: bool, across: bool) -> Self {
        let mut mask = 0;
        if along {
            mask |= Self::ALONG;
        }
        if across {
            mask |= Self::ACROSS;
        }
        Choice(mask)
    }

    /// Takes the edge to the previous position of the same slice.
    pub(crate) fn along(self) -> bool {
        self.0 & Self::ALONG != 0
    }

    /// Takes the edge to the same position of the previous slice.
    pub(crate) fn across(self) -> bool {
        self.0 & Self::ACROSS != 0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Canonically labelled partition of the frontier.
///
/// Components are numbered from 1 in order of first appearance, so two
/// states are equal exactly when they describe the same partition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct CutState {
    labels: Vec<u8>,
}

impl CutState {
    /// Frontier before any cell has been visited.
    pub(crate) fn empty(span: usize) -> Self {
        Self { labels: vec![0; span] }
    }

    /// Visit the cell at `pos` taking the edges named by `choice`.
    ///
    /// Returns `None` when the choice needs an edge that does not exist,
    /// closes a cycle, or leaves a component with no cell on the frontier
    /// (that component could never be joined to the rest again).
    pub(crate) fn advance(&self, pos: usize, has_previous_slice: bool, choice: Choice) -> Option<Self> {
        if (choice.along() && pos == 0) || (choice.across() && !has_previous_slice) {
            return None;
        }

        let mut labels = self.labels.clone();
        let leaving = labels[pos];

        let label = match (choice.along(), choice.across()) {
            (false, false) => FRESH,
            (true, false) => labels[pos - 1],
            (false, true) => leaving,
            (true, true) => {
                let joined = labels[pos - 1];
                if joined == leaving {
                    return None;
                }
                for l in labels.iter_mut().filter(|l| **l == leaving) {
                    *l = joined;
                }
                joined
            }
        };

        if has_previous_slice && !choice.across() {
            let still_reachable = labels
                .iter()
                .enumerate()
                .any(|(i, &l)| i != pos && l == leaving);
            if !still_reachable {
                return None;
            }
        }

        labels[pos] = label;
        let mut next = Self { labels };
        next.canonicalize();
        Some(next)
    }

    /// Every frontier cell belongs to one component.
    pub(crate) fn is_connected(&self) -> bool {
        self.labels.iter().all(|&l| l == 1)
    }

    fn canonicalize(&mut self) {
        let mut renumber = [0u8; 256];
        let mut next = 1u8;
        for l in self.labels.iter_mut().filter(|l| **l != 0) {
            let slot = &mut renumber[*l as usize];
            if *slot == 0 {
                *slot = next;
                next += 1;
            }
            *l = *slot;
        }
    }

    #[cfg(test)]
    pub(crate) fn labels(&self) -> &[u8] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(labels: &[u8]) -> CutState {
        CutState { labels: labels.to_vec() }
    }

    #[test]
    fn test_choice_order() {
        assert!(Choice::ALL.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Choice::new(false, false), Choice::ALL[0]);
        assert_eq!(Choice::new(true, false), Choice::ALL[1]);
        assert_eq!(Choice::new(false, true), Choice::ALL[2]);
        assert_eq!(Choice::new(true, true), Choice::ALL[3]);
    }

    #[test]
    fn test_first_slice_fills_frontier() {
        let start = CutState::empty(3);
        let first = start.advance(0, false, Choice::new(false, false)).unwrap();
        assert_eq!(first.labels(), &[1, 0, 0]);

        // no previous position and no previous slice yet
        assert!(start.advance(0, false, Choice::new(true, false)).is_none());
        assert!(start.advance(0, false, Choice::new(false, true)).is_none());

        let joined = first.advance(1, false, Choice::new(true, false)).unwrap();
        assert_eq!(joined.labels(), &[1, 1, 0]);
        let split = first.advance(1, false, Choice::new(false, false)).unwrap();
        assert_eq!(split.labels(), &[1, 2, 0]);
    }

    #[test]
    fn test_both_edges_merge_components() {
        let s = state(&[1, 1, 2]);
        let merged = s.advance(1, true, Choice::new(true, true));
        // position 0 and the leaving cell are already connected
        assert!(merged.is_none());

        let s = state(&[1, 2, 2]);
        let merged = s.advance(1, true, Choice::new(true, true)).unwrap();
        assert_eq!(merged.labels(), &[1, 1, 1]);
        assert!(merged.is_connected());
    }

    #[test]
    fn test_isolated_component_is_rejected() {
        // the cell leaving position 1 is the only member of component 2
        let s = state(&[1, 2, 1]);
        assert!(s.advance(1, true, Choice::new(true, false)).is_none());
        assert!(s.advance(1, true, Choice::new(false, false)).is_none());
        let kept = s.advance(1, true, Choice::new(false, true)).unwrap();
        assert_eq!(kept.labels(), &[1, 2, 1]);
    }

    #[test]
    fn test_canonical_relabelling() {
        let s = state(&[2, 2, 1]);
        let next = s.advance(0, true, Choice::new(false, false)).unwrap();
        // fresh component first, then the old ones in order of appearance
        assert_eq!(next.labels(), &[1, 2, 3]);
        assert!(!next.is_connected());
    }
}
