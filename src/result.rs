//! The outcome of a single search.
use rustc_hash::FxHashSet;

use crate::cost::Cost;
use crate::space::Path;
use crate::space::State;
use crate::space::StateGraph;

/// Counters gathered during a search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search nodes created, including the root.
    pub generated: usize,
    /// Graph-search entries popped after their state had been expanded.
    pub discarded: usize,
    /// Largest frontier size.
    pub max_frontier: usize,
    /// Memory held by the search tree.
    pub tree_bytes: usize,
}

/// What a search found.
///
/// Either a path to the target, or an exhausted frontier. Both come with the
/// states in the order they were expanded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult<St, C>
where
    St: State,
    C: Cost,
{
    path: Option<Path<St, C>>,
    expanded_order: Vec<St>,
    exhausted: bool,
    stats: SearchStats,
}

impl<St, C> SearchResult<St, C>
where
    St: State,
    C: Cost,
{
    pub(crate) fn found(path: Path<St, C>, expanded_order: Vec<St>, stats: SearchStats) -> Self {
        Self {
            path: Some(path),
            expanded_order,
            exhausted: false,
            stats,
        }
    }

    pub(crate) fn exhausted(expanded_order: Vec<St>, stats: SearchStats) -> Self {
        Self {
            path: None,
            expanded_order,
            exhausted: true,
            stats,
        }
    }

    #[inline(always)]
    pub fn path(&self) -> Option<&Path<St, C>> {
        self.path.as_ref()
    }

    #[inline(always)]
    pub fn cost(&self) -> Option<C> {
        self.path.as_ref().map(|p| p.cost)
    }

    /// States in the order they were expanded.
    #[inline(always)]
    pub fn expanded_order(&self) -> &[St] {
        &self.expanded_order
    }

    /// Whether the frontier ran out before reaching the target.
    #[inline(always)]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[inline(always)]
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    #[inline(always)]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// States of `graph` that were never expanded, in graph order.
    ///
    /// Together with `expanded_order` this covers every state of `graph`. The
    /// one expanded state that may fall outside of it is a start that isn't a
    /// vertex, which is expanded as a terminal state.
    pub fn unexpanded<'g>(&self, graph: &'g StateGraph<St, C>) -> Vec<&'g St> {
        let expanded: FxHashSet<&St> = self.expanded_order.iter().collect();
        graph.states().filter(|s| !expanded.contains(s)).collect()
    }

    pub fn write_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use thousands::Separable;

        let expanded = self.expanded_order.len();
        let unique = self.expanded_order.iter().collect::<FxHashSet<_>>().len();
        writeln!(out, "Search Stats:")?;
        writeln!(
            out,
            "  - Expanded nodes:   {} ({} unique states)",
            expanded.separate_with_commas(),
            unique.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Generated nodes:  {} ({})",
            self.stats.generated.separate_with_commas(),
            Size::from_bytes(self.stats.tree_bytes)
        )?;
        writeln!(
            out,
            "  - Discarded nodes:  {}",
            self.stats.discarded.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - |Open|*:          {}",
            self.stats.max_frontier.separate_with_commas()
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpanded_is_the_complement() {
        let mut graph = StateGraph::from_edges([("S", "A", 1u32), ("A", "G", 1), ("S", "B", 5)]);
        graph.add_state("X");

        let mut path = Path::new_from_start("S");
        path.append("A", 1);
        path.append("G", 1);
        let result = SearchResult::found(path, vec!["S", "A", "G"], SearchStats::default());

        assert!(result.is_found());
        assert!(!result.is_exhausted());
        assert_eq!(result.cost(), Some(2));
        assert_eq!(result.unexpanded(&graph), vec![&"B", &"X"]);
    }

    #[test]
    fn stats_report() {
        let stats = SearchStats {
            generated: 12_345,
            discarded: 2,
            max_frontier: 40,
            tree_bytes: 4096,
        };
        let result = SearchResult::<char, u32>::exhausted(vec!['S', 'A', 'A'], stats);

        let mut out = vec![];
        result.write_stats(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Expanded nodes:   3 (2 unique states)"));
        assert!(out.contains("Generated nodes:  12,345"));
        assert!(result.path().is_none());
    }
}
