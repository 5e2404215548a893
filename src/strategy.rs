//! The knobs of the search engine.
use derive_more::Display;

use crate::cost::Cost;
use crate::frontier::Priority;

/// Which node gets expanded next.
#[derive(
    Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum,
)]
pub enum Strategy {
    /// Depth-first, a stack.
    #[display("DFS")]
    #[value(name = "dfs")]
    DepthFirst,
    /// Breadth-first, a FIFO queue.
    #[display("BFS")]
    #[value(name = "bfs")]
    BreadthFirst,
    /// Cheapest accumulated cost first.
    #[display("UCS")]
    #[value(name = "ucs")]
    UniformCost,
    /// Lowest heuristic estimate first.
    #[display("Greedy")]
    #[value(name = "greedy")]
    Greedy,
    /// Lowest `g + h` first.
    #[display("A*")]
    #[value(name = "astar")]
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::DepthFirst,
        Strategy::BreadthFirst,
        Strategy::UniformCost,
        Strategy::Greedy,
        Strategy::AStar,
    ];

    /// Whether the frontier is ranked by accumulated cost.
    #[inline(always)]
    pub fn uses_cost(self) -> bool {
        matches!(self, Strategy::UniformCost | Strategy::AStar)
    }

    /// Whether the frontier is ranked by a heuristic estimate.
    #[inline(always)]
    pub fn uses_heuristic(self) -> bool {
        matches!(self, Strategy::Greedy | Strategy::AStar)
    }

    /// Whether the frontier is a priority queue.
    #[inline(always)]
    pub fn is_best_first(self) -> bool {
        self.uses_cost() || self.uses_heuristic()
    }

    /// The ranking of a node reached with cost `g` and estimate `h`.
    ///
    /// `h` is ignored by uninformed strategies, and both are ignored by
    /// DFS and BFS which only care about arrival order.
    #[inline(always)]
    pub fn priority<C: Cost>(self, g: C, h: C) -> Priority<C> {
        match self {
            Strategy::DepthFirst | Strategy::BreadthFirst => Priority::arrival(),
            Strategy::UniformCost => Priority::uniform_cost(g),
            Strategy::Greedy => Priority::greedy(h),
            Strategy::AStar => Priority::astar(g, h),
        }
    }
}

/// How repeated states are suppressed.
#[derive(
    Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum,
)]
pub enum DuplicatePolicy {
    /// A state can't appear twice within a single path.
    #[display("tree search")]
    #[value(name = "tree")]
    TreeSearch,
    /// A state is expanded at most once.
    #[display("graph search")]
    #[value(name = "graph")]
    GraphSearch,
}

impl DuplicatePolicy {
    pub const ALL: [DuplicatePolicy; 2] =
        [DuplicatePolicy::TreeSearch, DuplicatePolicy::GraphSearch];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_traits() {
        assert!(!Strategy::DepthFirst.is_best_first());
        assert!(!Strategy::BreadthFirst.is_best_first());
        assert!(Strategy::UniformCost.uses_cost());
        assert!(!Strategy::UniformCost.uses_heuristic());
        assert!(!Strategy::Greedy.uses_cost());
        assert!(Strategy::Greedy.uses_heuristic());
        assert!(Strategy::AStar.uses_cost() && Strategy::AStar.uses_heuristic());
    }

    #[test]
    fn priorities() {
        assert_eq!(Strategy::UniformCost.priority(3u32, 9), Priority::uniform_cost(3));
        assert_eq!(Strategy::Greedy.priority(3u32, 9), Priority::greedy(9));
        assert_eq!(Strategy::AStar.priority(3u32, 9), Priority::astar(3, 9));
        assert_eq!(
            Strategy::DepthFirst.priority(3u32, 9),
            Strategy::BreadthFirst.priority(5u32, 1)
        );
    }

    #[test]
    fn display() {
        assert_eq!(Strategy::AStar.to_string(), "A*");
        assert_eq!(DuplicatePolicy::GraphSearch.to_string(), "graph search");
    }
}
