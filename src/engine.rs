//! The search engine.
//!
//! One expansion loop serves every [`Strategy`] in both tree and graph mode.
//! The strategy picks the frontier discipline and the ranking of new nodes,
//! the [`DuplicatePolicy`] decides which children are suppressed.
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::cost::Cost;
use crate::error::ConfigurationError;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::frontier::Priority;
use crate::heuristic::HeuristicTable;
use crate::result::SearchResult;
use crate::result::SearchStats;
use crate::search::SearchTree;
use crate::search::SearchTreeNode;
use crate::space::Path;
use crate::space::State;
use crate::space::StateGraph;
use crate::strategy::DuplicatePolicy;
use crate::strategy::Strategy;

/// A configured search.
///
/// The engine holds no state between runs, so one engine can be reused (and
/// shared) for any number of searches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchEngine {
    strategy: Strategy,
    policy: DuplicatePolicy,
    expansion_limit: Option<usize>,
}

impl SearchEngine {
    #[must_use]
    pub fn new(strategy: Strategy, policy: DuplicatePolicy) -> Self {
        Self {
            strategy,
            policy,
            expansion_limit: None,
        }
    }

    /// Gives up with [`SearchError::ExpansionLimitReached`] after expanding
    /// `limit` states without reaching the target.
    #[must_use]
    pub fn with_expansion_limit(mut self, limit: usize) -> Self {
        self.expansion_limit = Some(limit);
        self
    }

    #[inline(always)]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline(always)]
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Checks that the inputs can be searched with this strategy.
    ///
    /// Only states reachable from `start` are checked.
    pub fn validate<St, C>(
        &self,
        graph: &StateGraph<St, C>,
        heuristics: Option<&HeuristicTable<St, C>>,
        start: &St,
    ) -> Result<(), ConfigurationError>
    where
        St: State,
        C: Cost,
    {
        if !self.strategy.is_best_first() {
            return Ok(());
        }
        let table = match (self.strategy.uses_heuristic(), heuristics) {
            (true, None) => {
                return Err(ConfigurationError::MissingHeuristicTable {
                    strategy: self.strategy,
                });
            }
            (true, Some(table)) => Some(table),
            (false, _) => None,
        };

        for s in graph.reachable_from(start) {
            if self.strategy.uses_cost() {
                for (to, c) in graph.neighbours(&s) {
                    if !c.valid() {
                        return Err(ConfigurationError::InvalidEdgeCost {
                            from: s.to_string(),
                            to: to.to_string(),
                            cost: c.to_string(),
                        });
                    }
                    if c.is_negative() {
                        return Err(ConfigurationError::NegativeEdgeCost {
                            from: s.to_string(),
                            to: to.to_string(),
                            cost: c.to_string(),
                        });
                    }
                }
            }
            if let Some(table) = table {
                let h = table.h(&s)?;
                if !h.valid() {
                    return Err(ConfigurationError::InvalidHeuristic {
                        state: s.to_string(),
                        value: h.to_string(),
                    });
                }
                if h.is_negative() {
                    return Err(ConfigurationError::NegativeHeuristic {
                        state: s.to_string(),
                        value: h.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Searches for a path from `start` to `target`.
    ///
    /// `heuristics` is only consulted by Greedy and A*.
    pub fn run<St, C>(
        &self,
        graph: &StateGraph<St, C>,
        heuristics: Option<&HeuristicTable<St, C>>,
        start: St,
        target: St,
    ) -> Result<SearchResult<St, C>, SearchError>
    where
        St: State,
        C: Cost,
    {
        self.validate(graph, heuristics, &start)?;

        let tree = SearchTree::<St, C>::new();
        self.search(&tree, graph, heuristics, start, &target)
    }

    fn search<'t, St, C>(
        &self,
        tree: &'t SearchTree<'t, St, C>,
        graph: &StateGraph<St, C>,
        heuristics: Option<&HeuristicTable<St, C>>,
        start: St,
        target: &St,
    ) -> Result<SearchResult<St, C>, SearchError>
    where
        St: State,
        C: Cost,
    {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Search");

        let mut frontier = Frontier::<St, C>::new(self.strategy);
        let mut visited = FxHashSet::<St>::default();
        let mut expanded_order: Vec<St> = vec![];
        let mut stats = SearchStats::default();

        let root = tree.root(start);
        frontier.push(self.priority(heuristics, root)?, root);

        while let Some(node) = frontier.pop() {
            #[cfg(feature = "coz_profile")]
            coz::scope!("NodeExpansion");

            let state = node.state();
            if self.policy == DuplicatePolicy::GraphSearch && visited.contains(state) {
                // Pushed before its state got expanded through another path.
                stats.discarded += 1;
                continue;
            }
            if let Some(limit) = self.expansion_limit {
                if expanded_order.len() >= limit {
                    log::debug!(
                        "{} ({}) gave up after {limit} expansions",
                        self.strategy,
                        self.policy
                    );
                    return Err(SearchError::ExpansionLimitReached { limit });
                }
            }

            log::trace!("Expanding {state} (g={}, depth={})", node.g(), node.depth());
            expanded_order.push(state.clone());

            if state == target {
                #[cfg(feature = "coz_profile")]
                coz::progress!("GoalFound");

                let path = node.path();
                self.verify_path(graph, &path);
                log::debug!(
                    "{} ({}) found {path} after {} expansions",
                    self.strategy,
                    self.policy,
                    expanded_order.len()
                );
                Self::finish_stats(&mut stats, tree, &frontier, root);
                return Ok(SearchResult::found(path, expanded_order, stats));
            }

            if self.policy == DuplicatePolicy::GraphSearch {
                visited.insert(state.clone());
            }

            // Children are considered in ascending state order. A stack pops
            // the last push first, so DFS pushes them in reverse.
            let mut children: SmallVec<[&(St, C); 8]> =
                graph.neighbours(state).iter().collect();
            children.sort_by(|l, r| l.0.cmp(&r.0));
            if self.strategy == Strategy::DepthFirst {
                children.reverse();
            }

            for (child, c) in children {
                #[cfg(feature = "coz_profile")]
                coz::scope!("ReachNode");

                let excluded = match self.policy {
                    DuplicatePolicy::TreeSearch => node.in_path(child),
                    DuplicatePolicy::GraphSearch => visited.contains(child),
                };
                if excluded {
                    continue;
                }

                let child_node = tree.reach(node, child.clone(), *c);
                frontier.push(self.priority(heuristics, child_node)?, child_node);
            }
        }

        log::debug!(
            "{} ({}) exhausted the frontier after {} expansions",
            self.strategy,
            self.policy,
            expanded_order.len()
        );
        Self::finish_stats(&mut stats, tree, &frontier, root);
        Ok(SearchResult::exhausted(expanded_order, stats))
    }

    /// Ranks a freshly generated node.
    #[inline(always)]
    fn priority<St, C>(
        &self,
        heuristics: Option<&HeuristicTable<St, C>>,
        node: &SearchTreeNode<'_, St, C>,
    ) -> Result<Priority<C>, ConfigurationError>
    where
        St: State,
        C: Cost,
    {
        let h = match (self.strategy.uses_heuristic(), heuristics) {
            (true, Some(table)) => table.h(node.state())?,
            (true, None) => {
                return Err(ConfigurationError::MissingHeuristicTable {
                    strategy: self.strategy,
                });
            }
            (false, _) => C::zero(),
        };
        Ok(self.strategy.priority(node.g(), h))
    }

    fn finish_stats<'t, St, C>(
        stats: &mut SearchStats,
        tree: &'t SearchTree<'t, St, C>,
        frontier: &Frontier<'t, St, C>,
        root: &'t SearchTreeNode<'t, St, C>,
    ) where
        St: State,
        C: Cost,
    {
        stats.generated = tree.len();
        stats.max_frontier = frontier.high_water();
        stats.tree_bytes = tree.len() * std::mem::size_of_val(root);
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify_path<St, C>(&self, _graph: &StateGraph<St, C>, _path: &Path<St, C>)
    where
        St: State,
        C: Cost,
    {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    fn verify_path<St, C>(&self, graph: &StateGraph<St, C>, path: &Path<St, C>)
    where
        St: State,
        C: Cost,
    {
        assert!(graph.valid_path(path), "{path} is not a path of {graph:?}");
        if self.policy == DuplicatePolicy::TreeSearch {
            let unique: FxHashSet<&St> = path.states.iter().collect();
            assert_eq!(unique.len(), path.len(), "{path} repeats states");
        }
    }
}

/// Searches `graph` for a path from `start` to `target`.
///
/// ```
/// use graph_search::engine::run;
/// use graph_search::space::StateGraph;
/// use graph_search::strategy::DuplicatePolicy;
/// use graph_search::strategy::Strategy;
///
/// let graph = StateGraph::from_edges([("S", "A", 1u32), ("A", "G", 1), ("S", "G", 5)]);
/// let ucs = Strategy::UniformCost;
/// let result = run(&graph, None, "S", "G", ucs, DuplicatePolicy::GraphSearch).unwrap();
/// assert_eq!(result.path().unwrap().states, vec!["S", "A", "G"]);
/// assert_eq!(result.expanded_order(), &["S", "A", "G"]);
/// ```
pub fn run<St, C>(
    graph: &StateGraph<St, C>,
    heuristics: Option<&HeuristicTable<St, C>>,
    start: St,
    target: St,
    strategy: Strategy,
    mode: DuplicatePolicy,
) -> Result<SearchResult<St, C>, SearchError>
where
    St: State,
    C: Cost,
{
    SearchEngine::new(strategy, mode).run(graph, heuristics, start, target)
}
