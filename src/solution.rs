//! An unordered collection of elements together with the two decision
//! procedures ([`SolutionSet::is_hitting`], [`SolutionSet::is_minimal_hitting`])
//! used both as the engines' `path_from_root`/`label` representation and for
//! independent verification of a solver's output.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;

/// A finite set of elements `E`.
///
/// Used for conflicts, labels, and `path_from_root` alike: the algorithms in
/// this crate never need to distinguish "a conflict" from "a candidate
/// hitting set" at the type level, only at the call site.
#[derive(Clone, Debug, Default)]
pub struct SolutionSet<E>(IndexSet<E>)
where
    E: Eq + Hash;

impl<E> SolutionSet<E>
where
    E: Eq + Hash + Clone,
{
    /// An empty set.
    pub fn new() -> Self {
        Self(IndexSet::new())
    }

    /// Builds a set from an iterator of elements.
    pub fn from_iter(elements: impl IntoIterator<Item = E>) -> Self {
        Self(elements.into_iter().collect())
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.0.iter()
    }

    /// Whether `element` is a member.
    pub fn contains(&self, element: &E) -> bool {
        self.0.contains(element)
    }

    /// Inserts `element`, returning whether it was newly inserted.
    pub fn insert(&mut self, element: E) -> bool {
        self.0.insert(element)
    }

    /// Whether `self` and `other` share no elements.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.0.iter().all(|e| !other.0.contains(e))
    }

    /// Whether every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.iter().all(|e| other.0.contains(e))
    }

    /// Whether `self` is a subset of `other` and the two are not equal.
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.is_subset(other) && self.len() < other.len()
    }

    /// The elements present in `self` but not `other`.
    pub fn difference(&self, other: &Self) -> Self {
        Self::from_iter(self.0.iter().filter(|e| !other.0.contains(*e)).cloned())
    }

    /// The elements present in both `self` and `other`.
    pub fn intersection(&self, other: &Self) -> Self {
        Self::from_iter(self.0.iter().filter(|e| other.0.contains(*e)).cloned())
    }

    /// The elements present in either `self` or `other`.
    pub fn union(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for e in other.iter() {
            result.insert(e.clone());
        }
        result
    }

    /// True iff the set is non-empty and intersects every conflict in `conflicts`.
    pub fn is_hitting(&self, conflicts: &[Self]) -> bool {
        if self.is_empty() {
            return false;
        }
        conflicts.iter().all(|conflict| !self.is_disjoint(conflict))
    }

    /// True iff the set is a hitting set of `conflicts` and no proper subset
    /// of it is also a hitting set: equivalently, every element is needed to
    /// hit at least one conflict.
    pub fn is_minimal_hitting(&self, conflicts: &[Self]) -> bool {
        if !self.is_hitting(conflicts) {
            return false;
        }
        let covered: Self = conflicts
            .iter()
            .fold(Self::new(), |acc, conflict| acc.union(&self.intersection(conflict)));
        covered.len() == self.len()
    }
}

impl<E> PartialEq for SolutionSet<E>
where
    E: Eq + Hash + Clone,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<E> Eq for SolutionSet<E> where E: Eq + Hash + Clone {}

impl<E> Hash for SolutionSet<E>
where
    E: Eq + Hash + Clone + Ord,
{
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        let mut sorted: Vec<&E> = self.0.iter().collect();
        sorted.sort();
        for element in sorted {
            element.hash(state);
        }
    }
}

impl<E> fmt::Display for SolutionSet<E>
where
    E: Eq + Hash + Clone + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, element) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "}}")
    }
}

impl<E> FromIterator<E> for SolutionSet<E>
where
    E: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        Self::from_iter(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashset;

    fn set(elements: impl IntoIterator<Item = i32>) -> SolutionSet<i32> {
        SolutionSet::from_iter(elements)
    }

    #[test]
    fn test_empty_set_never_hits() {
        let conflicts = vec![set(hashset! {1, 2})];
        assert!(!set(hashset! {}).is_hitting(&conflicts));
    }

    #[test]
    fn test_is_hitting_requires_intersection_with_every_conflict() {
        let conflicts = vec![set(hashset! {1, 3}), set(hashset! {1, 4})];
        assert!(set(hashset! {1}).is_hitting(&conflicts));
        assert!(!set(hashset! {3}).is_hitting(&conflicts));
        assert!(set(hashset! {3, 4}).is_hitting(&conflicts));
    }

    #[test]
    fn test_minimal_hitting_rejects_redundant_elements() {
        let conflicts = vec![set(hashset! {1, 3}), set(hashset! {1, 4})];
        assert!(set(hashset! {1}).is_minimal_hitting(&conflicts));
        assert!(!set(hashset! {1, 3}).is_minimal_hitting(&conflicts));
        assert!(set(hashset! {3, 4}).is_minimal_hitting(&conflicts));
    }

    #[test]
    fn test_equality_is_order_independent() {
        assert_eq!(set(vec![1, 2, 3]), set(vec![3, 2, 1]));
    }
}
