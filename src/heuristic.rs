//! Per-state estimates of the cost-to-goal.
use rustc_hash::FxHashMap;

use crate::cost::Cost;
use crate::error::ConfigurationError;
use crate::space::State;
use crate::space::StateGraph;

/// A lookup table `State -> h(State)`.
///
/// Admissibility and consistency are assumed by the informed strategies, but
/// never enforced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeuristicTable<St, C>
where
    St: State,
    C: Cost,
{
    values: FxHashMap<St, C>,
}

impl<St, C> HeuristicTable<St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: FxHashMap::default(),
        }
    }

    /// The table that estimates zero everywhere reachable in `graph`.
    ///
    /// Turns A* into UCS.
    pub fn zero(graph: &StateGraph<St, C>) -> Self {
        graph.states().map(|s| (s.clone(), C::zero())).collect()
    }

    /// Sets `h(s)`, returning the previous value.
    pub fn insert(&mut self, s: St, h: C) -> Option<C> {
        self.values.insert(s, h)
    }

    #[inline(always)]
    pub fn get(&self, s: &St) -> Option<C> {
        self.values.get(s).copied()
    }

    #[inline(always)]
    pub fn h(&self, s: &St) -> Result<C, ConfigurationError> {
        self.get(s).ok_or_else(|| ConfigurationError::MissingHeuristic {
            state: s.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checks `h(n) <= c(n, m) + h(m)` on every edge, and `h(goal) == 0`.
    ///
    /// States without a value are ignored.
    pub fn is_consistent(&self, graph: &StateGraph<St, C>, goal: &St) -> bool {
        if self.get(goal).is_some_and(|h| !h.is_zero()) {
            return false;
        }
        graph.edges().all(|(from, to, c)| match (self.get(from), self.get(to)) {
            (Some(h_from), Some(h_to)) => h_from <= c.saturating_add(&h_to),
            _ => true,
        })
    }
}

impl<St, C> Default for HeuristicTable<St, C>
where
    St: State,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<St, C> FromIterator<(St, C)> for HeuristicTable<St, C>
where
    St: State,
    C: Cost,
{
    fn from_iter<I: IntoIterator<Item = (St, C)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<St, C> Extend<(St, C)> for HeuristicTable<St, C>
where
    St: State,
    C: Cost,
{
    fn extend<I: IntoIterator<Item = (St, C)>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical() -> (StateGraph<&'static str, u32>, HeuristicTable<&'static str, u32>) {
        let graph = StateGraph::from_edges([
            ("S", "A", 3),
            ("S", "B", 1),
            ("A", "B", 2),
            ("A", "C", 2),
            ("B", "C", 3),
            ("C", "D", 4),
            ("C", "G", 4),
            ("D", "G", 1),
        ]);
        let h = HeuristicTable::from_iter([
            ("S", 7),
            ("A", 5),
            ("B", 7),
            ("C", 4),
            ("D", 1),
            ("G", 0),
        ]);
        (graph, h)
    }

    #[test]
    fn lookup() {
        let (_, h) = canonical();
        assert_eq!(h.len(), 6);
        assert_eq!(h.get(&"A"), Some(5));
        assert_eq!(h.h(&"G"), Ok(0));
        assert_eq!(
            h.h(&"X"),
            Err(ConfigurationError::MissingHeuristic {
                state: "X".to_string()
            })
        );
    }

    #[test]
    fn consistency() {
        let (graph, mut h) = canonical();
        assert!(h.is_consistent(&graph, &"G"));

        // h(A) = 10 > c(A, C) + h(C) = 6
        h.insert("A", 10);
        assert!(!h.is_consistent(&graph, &"G"));

        assert!(HeuristicTable::zero(&graph).is_consistent(&graph, &"G"));
        assert!(!canonical().1.is_consistent(&graph, &"S"));
    }
}
