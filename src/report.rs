//! Human readable rendering of a search.
use itertools::Itertools;
use owo_colors::OwoColorize;

use crate::cost::Cost;
use crate::result::SearchResult;
use crate::space::State;
use crate::space::StateGraph;
use crate::strategy::DuplicatePolicy;
use crate::strategy::Strategy;

/// A finished search, ready to be printed.
///
/// Output is coloured, use `anstream` to strip it when needed.
pub struct Report<'r, St, C>
where
    St: State,
    C: Cost,
{
    strategy: Strategy,
    policy: DuplicatePolicy,
    graph: &'r StateGraph<St, C>,
    result: &'r SearchResult<St, C>,
}

impl<'r, St, C> Report<'r, St, C>
where
    St: State,
    C: Cost,
{
    pub fn new(
        strategy: Strategy,
        policy: DuplicatePolicy,
        graph: &'r StateGraph<St, C>,
        result: &'r SearchResult<St, C>,
    ) -> Self {
        Self {
            strategy,
            policy,
            graph,
            result,
        }
    }
}

impl<St, C> std::fmt::Display for Report<'_, St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(
            f,
            "{}",
            format!("{} ({})", self.strategy, self.policy).bold()
        )?;
        writeln!(
            f,
            "  States expanded:     {}",
            self.result.expanded_order().iter().join(", ")
        )?;
        match self.result.path() {
            Some(p) => writeln!(
                f,
                "  Path returned:       {} (cost {})",
                p.states.iter().join(" -> ").green(),
                p.cost
            )?,
            None => writeln!(f, "  Path returned:       {}", "none (exhausted)".red())?,
        }
        let unexpanded = self.result.unexpanded(self.graph);
        if unexpanded.is_empty() {
            writeln!(f, "  States not expanded: {}", "-".dimmed())
        } else {
            writeln!(
                f,
                "  States not expanded: {}",
                unexpanded.iter().join(", ").yellow()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::engine::SearchEngine;
    use crate::heuristic::HeuristicTable;

    fn graph() -> StateGraph<char, u32> {
        let mut graph = StateGraph::from_edges([('S', 'A', 1), ('A', 'G', 1), ('S', 'B', 4)]);
        graph.add_state('X');
        graph
    }

    #[test]
    fn found() {
        let graph = graph();
        let h = HeuristicTable::zero(&graph);
        let engine = SearchEngine::new(Strategy::AStar, DuplicatePolicy::GraphSearch);
        let result = engine.run(&graph, Some(&h), 'S', 'G').unwrap();

        let out = Report::new(engine.strategy(), engine.policy(), &graph, &result).to_string();
        assert!(out.contains("A* (graph search)"));
        assert!(out.contains("States expanded:     S, A, G"));
        assert!(out.contains("S -> A -> G"));
        assert!(out.contains("(cost 2)"));
        // Ordered like the graph, not like the search.
        assert!(out.contains("B, X"));
    }

    #[test]
    fn stripped_for_logs() {
        let graph = graph();
        let engine = SearchEngine::new(Strategy::UniformCost, DuplicatePolicy::GraphSearch);
        let result = engine.run(&graph, None, 'S', 'G').unwrap();

        let out = Report::new(engine.strategy(), engine.policy(), &graph, &result).to_string();
        let plain = anstream::adapter::strip_str(&out).to_string();
        assert!(!plain.contains('\x1b'));
        assert!(plain.starts_with("UCS (graph search)\n"));
        assert!(plain.contains("Path returned:       S -> A -> G (cost 2)"));
        assert!(plain.contains("States not expanded: B, X"));
    }

    #[test]
    fn exhausted() {
        let graph = graph();
        let engine = SearchEngine::new(Strategy::BreadthFirst, DuplicatePolicy::TreeSearch);
        let result = engine.run(&graph, None, 'S', 'X').unwrap();

        let out = Report::new(engine.strategy(), engine.policy(), &graph, &result).to_string();
        assert!(out.contains("BFS (tree search)"));
        assert!(out.contains("none (exhausted)"));
        assert!(out.contains("States expanded:     S, A, B, G"));
    }
}
