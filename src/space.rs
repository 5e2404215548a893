//! Explicit weighted state-spaces.
//!
//! A [`StateGraph`] maps each [`State`] to its outgoing `(State, Cost)` edges.
//! States without outgoing edges are terminal.
use std::collections::VecDeque;
use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::cost::Cost;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

/// A vertex identifier.
///
/// The order is only used to break ties deterministically.
pub trait State: Clone + Debug + Display + Eq + Hash + Ord {}
impl<T> State for T where T: Clone + Debug + Display + Eq + Hash + Ord {}

/// A sequence of states from a start, and its accumulated edge cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<St, C>
where
    St: State,
    C: Cost,
{
    pub states: Vec<St>,
    pub cost: C,
}

impl<St, C> Path<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    pub fn new_from_start(start: St) -> Self {
        Self {
            states: vec![start],
            cost: C::zero(),
        }
    }

    #[inline(always)]
    pub fn start(&self) -> Option<&St> {
        self.states.first()
    }

    #[inline(always)]
    pub fn end(&self) -> Option<&St> {
        self.states.last()
    }

    /// Number of states in the path, including the start.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[inline(always)]
    pub fn append(&mut self, s: St, c: C) {
        self.states.push(s);
        self.cost = self.cost.saturating_add(&c);
    }

    /// Reverses the Path, likely making it invalid.
    ///
    /// Useful when naturally reconstructing paths in reverse.
    pub fn reverse(&mut self) {
        self.states.reverse();
    }
}

impl<St, C> std::fmt::Display for Path<St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Path({}, [", self.cost)?;
        for (i, s) in self.states.iter().take(MAX_ELEMENTS_DISPLAYED).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{s}")?;
        }
        if self.states.len() > MAX_ELEMENTS_DISPLAYED {
            write!(f, ", ...")?;
        }
        write!(f, "])")
    }
}

type Edges<St, C> = SmallVec<[(St, C); 4]>;

/// A directed graph with weighted edges.
///
/// States keep their first-insertion order, and so do the edges leaving each
/// state. Adding an edge that already exists replaces its cost.
#[derive(Clone, PartialEq, Eq)]
pub struct StateGraph<St, C>
where
    St: State,
    C: Cost,
{
    states: Vec<St>,
    index: FxHashMap<St, usize>,
    /// Outgoing edges, indexed like `states`.
    edges: Vec<Edges<St, C>>,
}

impl<St, C> StateGraph<St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: vec![],
            index: FxHashMap::default(),
            edges: vec![],
        }
    }

    /// Builds a graph from `(from, to, cost)` triples.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (St, St, C)>,
    {
        let mut graph = Self::new();
        for (from, to, c) in edges {
            graph.add_edge(from, to, c);
        }
        graph
    }

    /// Builds a graph from a `state -> [(neighbour, cost)]` mapping.
    pub fn from_adjacency<I, N>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (St, N)>,
        N: IntoIterator<Item = (St, C)>,
    {
        let mut graph = Self::new();
        for (from, neighbours) in adjacency {
            graph.add_state(from.clone());
            for (to, c) in neighbours {
                graph.add_edge(from.clone(), to, c);
            }
        }
        graph
    }

    fn intern(&mut self, s: St) -> usize {
        if let Some(&i) = self.index.get(&s) {
            return i;
        }
        let i = self.states.len();
        self.states.push(s.clone());
        self.edges.push(Edges::new());
        self.index.insert(s, i);
        i
    }

    /// Adds a state. Returns whether it was new.
    pub fn add_state(&mut self, s: St) -> bool {
        let len = self.states.len();
        self.intern(s) == len
    }

    /// Adds the edge `from -> to`, replacing its cost if it already existed.
    pub fn add_edge(&mut self, from: St, to: St, c: C) {
        let i = self.intern(from);
        self.intern(to.clone());

        let edges = &mut self.edges[i];
        match edges.iter_mut().find(|(s, _)| *s == to) {
            Some(edge) => edge.1 = c,
            None => edges.push((to, c)),
        }
    }

    /// Number of states.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.iter().map(|e| e.len()).sum()
    }

    #[inline(always)]
    pub fn contains(&self, s: &St) -> bool {
        self.index.contains_key(s)
    }

    /// All the states in insertion order.
    pub fn states(&self) -> impl Iterator<Item = &St> {
        self.states.iter()
    }

    /// Outgoing edges of a state.
    ///
    /// Unknown states have no edges.
    #[inline(always)]
    pub fn neighbours(&self, s: &St) -> &[(St, C)] {
        match self.index.get(s) {
            Some(&i) => &self.edges[i],
            None => &[],
        }
    }

    /// All the edges as `(from, to, cost)`.
    pub fn edges(&self) -> impl Iterator<Item = (&St, &St, C)> {
        self.states
            .iter()
            .zip(self.edges.iter())
            .flat_map(|(from, edges)| edges.iter().map(move |(to, c)| (from, to, *c)))
    }

    pub fn edge_cost(&self, from: &St, to: &St) -> Option<C> {
        self.neighbours(from)
            .iter()
            .find(|(s, _)| s == to)
            .map(|(_, c)| *c)
    }

    /// States reachable from `start` (including it) in breadth-first order.
    pub fn reachable_from(&self, start: &St) -> Vec<St> {
        let mut seen = FxHashSet::<St>::default();
        let mut order = vec![];
        let mut queue = VecDeque::new();

        seen.insert(start.clone());
        queue.push_back(start.clone());
        while let Some(s) = queue.pop_front() {
            for (n, _) in self.neighbours(&s) {
                if seen.insert(n.clone()) {
                    queue.push_back(n.clone());
                }
            }
            order.push(s);
        }
        order
    }

    /// Cost of walking through `states`, if every step is an edge.
    pub fn path_cost(&self, states: &[St]) -> Option<C> {
        let mut cost = C::zero();
        for step in states.windows(2) {
            cost = cost.saturating_add(&self.edge_cost(&step[0], &step[1])?);
        }
        Some(cost)
    }

    /// Verifies that a path follows edges of this graph and has the right
    /// cost.
    pub fn valid_path(&self, p: &Path<St, C>) -> bool {
        if p.is_empty() {
            return p.cost == C::zero();
        }
        self.path_cost(&p.states) == Some(p.cost)
    }
}

impl StateGraph<u32, u32> {
    /// A random graph over states `0..num_states`.
    ///
    /// Self-loops are skipped, so the graph may end up with fewer edges.
    pub fn random<R: rand::Rng>(
        r: &mut R,
        num_states: u32,
        num_edges: usize,
        max_cost: u32,
    ) -> Self {
        let mut graph = Self::new();
        for s in 0..num_states {
            graph.add_state(s);
        }
        if num_states == 0 {
            return graph;
        }

        for _ in 0..num_edges {
            let from = r.random_range(0..num_states);
            let to = r.random_range(0..num_states);
            if from == to {
                continue;
            }
            graph.add_edge(from, to, r.random_range(0..=max_cost));
        }
        graph
    }
}

impl<St, C> Default for StateGraph<St, C>
where
    St: State,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<St, C> FromIterator<(St, St, C)> for StateGraph<St, C>
where
    St: State,
    C: Cost,
{
    fn from_iter<I: IntoIterator<Item = (St, St, C)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

impl<St, C> std::fmt::Display for StateGraph<St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "StateGraph({} states, {} edges):", self.len(), self.num_edges())?;
        for (from, to, c) in self.edges().take(MAX_ELEMENTS_DISPLAYED) {
            writeln!(f, "  {from} -> {to} ({c})")?;
        }
        Ok(())
    }
}

impl<St, C> std::fmt::Debug for StateGraph<St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "StateGraph({} states, {} edges)", self.len(), self.num_edges())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    fn canonical() -> StateGraph<&'static str, u32> {
        StateGraph::from_edges([
            ("S", "A", 3),
            ("S", "B", 1),
            ("A", "B", 2),
            ("A", "C", 2),
            ("B", "C", 3),
            ("C", "D", 4),
            ("C", "G", 4),
            ("D", "G", 1),
        ])
    }

    #[test]
    fn construction() {
        let g = canonical();
        assert_eq!(g.len(), 6);
        assert_eq!(g.num_edges(), 8);
        assert_eq!(
            g.states().copied().collect::<Vec<_>>(),
            vec!["S", "A", "B", "C", "D", "G"]
        );
        assert_eq!(g.neighbours(&"C"), &[("D", 4), ("G", 4)]);
        assert_eq!(g.neighbours(&"G"), &[]);
        assert_eq!(g.neighbours(&"X"), &[]);
        assert_eq!(g.edge_cost(&"D", &"G"), Some(1));
        assert_eq!(g.edge_cost(&"G", &"D"), None);
    }

    #[test]
    fn adjacency_matches_edge_list() {
        let g = StateGraph::from_adjacency([
            ("S", vec![("A", 3), ("B", 1)]),
            ("A", vec![("B", 2), ("C", 2)]),
            ("B", vec![("C", 3)]),
            ("C", vec![("D", 4), ("G", 4)]),
            ("D", vec![("G", 1)]),
            ("G", vec![]),
        ]);
        assert_eq!(g, canonical());
    }

    #[test]
    fn repeated_edge_replaces_cost() {
        let mut g = canonical();
        g.add_edge("S", "A", 10);
        assert_eq!(g.num_edges(), 8);
        assert_eq!(g.edge_cost(&"S", &"A"), Some(10));
        assert!(!g.add_state("S"));
        assert!(g.add_state("X"));
        assert_eq!(g.len(), 7);
    }

    #[test]
    fn reachability() {
        let mut g = canonical();
        g.add_state("X");
        assert_eq!(g.reachable_from(&"S"), vec!["S", "A", "B", "C", "D", "G"]);
        assert_eq!(g.reachable_from(&"D"), vec!["D", "G"]);
        assert_eq!(g.reachable_from(&"X"), vec!["X"]);
        assert_eq!(g.reachable_from(&"nowhere"), vec!["nowhere"]);
    }

    #[test]
    fn path_validation() {
        let g = canonical();
        let mut p = Path::new_from_start("S");
        p.append("B", 1);
        p.append("C", 3);
        p.append("G", 4);
        assert!(g.valid_path(&p));
        assert_eq!(p.to_string(), "Path(8, [S, B, C, G])");

        p.cost = 7;
        assert!(!g.valid_path(&p));
        assert_eq!(g.path_cost(&["S", "C"]), None);
        assert_eq!(g.path_cost(&["S"]), Some(0));
    }

    #[test]
    fn random_graphs_are_reproducible() {
        let g1 = StateGraph::random(&mut ChaCha8Rng::seed_from_u64(7), 50, 200, 9);
        let g2 = StateGraph::random(&mut ChaCha8Rng::seed_from_u64(7), 50, 200, 9);
        assert_eq!(g1, g2);
        assert_eq!(g1.len(), 50);
        assert!(g1.num_edges() <= 200);
        assert!(g1.edges().all(|(from, to, c)| from != to && c <= 9));
    }
}
