//! The open list of a search.
//!
//! Uninformed strategies only care about arrival order and use a stack or a
//! queue. Best-first strategies use a binary heap ranked by
//! `(priority, state, insertion order)`.
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use crate::cost::Cost;
use crate::search::SearchTreeNode;
use crate::space::State;
use crate::strategy::Strategy;

/// The strategy-specific part of a ranking. Lower is better.
///
/// - UCS: `(g, 0)`
/// - Greedy: `(h, 0)`
/// - A*: `(g + h, g)`, tie-breaking for lower g.
///
/// ```
/// use graph_search::frontier::Priority;
///
/// assert!(Priority::astar(1u32, 7) < Priority::astar(3, 5));
/// assert!(Priority::astar(3u32, 5) < Priority::astar(0, 9));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority<C: Cost> {
    primary: C,
    secondary: C,
}

impl<C> Priority<C>
where
    C: Cost,
{
    /// DFS and BFS rank by arrival order alone.
    #[inline(always)]
    pub fn arrival() -> Self {
        Self {
            primary: C::zero(),
            secondary: C::zero(),
        }
    }
    #[inline(always)]
    pub fn uniform_cost(g: C) -> Self {
        Self {
            primary: g,
            secondary: C::zero(),
        }
    }
    #[inline(always)]
    pub fn greedy(h: C) -> Self {
        Self {
            primary: h,
            secondary: C::zero(),
        }
    }
    #[inline(always)]
    pub fn astar(g: C, h: C) -> Self {
        Self {
            primary: g.saturating_add(&h),
            secondary: g,
        }
    }
}

/// The full ranking of a frontier entry.
///
/// Ties on the priority are broken by the natural order of states, then by
/// insertion order (first-inserted-first).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rank<St, C>
where
    St: State,
    C: Cost,
{
    pub priority: Priority<C>,
    pub state: St,
    pub seq: u64,
}

/// A heap node.
///
/// Carries the ranking and a reference to the actual search node.
#[derive(Debug)]
struct FrontierEntry<'t, St, C>
where
    St: State,
    C: Cost,
{
    rank: Rank<St, C>,
    node: &'t SearchTreeNode<'t, St, C>,
}

/// PartialEq is forwarded to self.rank's PartialEq
impl<St: State, C: Cost> PartialEq for FrontierEntry<'_, St, C> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl<St: State, C: Cost> Eq for FrontierEntry<'_, St, C> {}

/// PartialOrd is forwarded to Ord::cmp
impl<St: State, C: Cost> PartialOrd for FrontierEntry<'_, St, C> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
/// Ord is forwarded to self.rank's Ord
impl<St: State, C: Cost> Ord for FrontierEntry<'_, St, C> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

#[derive(Debug)]
enum Open<'t, St, C>
where
    St: State,
    C: Cost,
{
    Stack(Vec<&'t SearchTreeNode<'t, St, C>>),
    Queue(VecDeque<&'t SearchTreeNode<'t, St, C>>),
    /// `BinaryHeap` is a max-heap.
    Heap(BinaryHeap<Reverse<FrontierEntry<'t, St, C>>>),
}

/// Nodes waiting to be expanded.
#[derive(Debug)]
pub struct Frontier<'t, St, C>
where
    St: State,
    C: Cost,
{
    open: Open<'t, St, C>,
    /// Number of pushes so far, used as insertion order.
    pushed: u64,
    high_water: usize,
}

impl<'t, St, C> Frontier<'t, St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        let open = match strategy {
            Strategy::DepthFirst => Open::Stack(Vec::new()),
            Strategy::BreadthFirst => Open::Queue(VecDeque::new()),
            Strategy::UniformCost | Strategy::Greedy | Strategy::AStar => {
                Open::Heap(BinaryHeap::new())
            }
        };
        Self {
            open,
            pushed: 0,
            high_water: 0,
        }
    }

    /// Adds a node. `priority` is ignored by stacks and queues.
    pub fn push(&mut self, priority: Priority<C>, node: &'t SearchTreeNode<'t, St, C>) {
        match &mut self.open {
            Open::Stack(stack) => stack.push(node),
            Open::Queue(queue) => queue.push_back(node),
            Open::Heap(heap) => heap.push(Reverse(FrontierEntry {
                rank: Rank {
                    priority,
                    state: node.state().clone(),
                    seq: self.pushed,
                },
                node,
            })),
        }
        self.pushed += 1;
        self.high_water = std::cmp::max(self.high_water, self.len());
    }

    /// Removes the next node to expand.
    #[must_use]
    pub fn pop(&mut self) -> Option<&'t SearchTreeNode<'t, St, C>> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Pop");

        match &mut self.open {
            Open::Stack(stack) => stack.pop(),
            Open::Queue(queue) => queue.pop_front(),
            Open::Heap(heap) => heap.pop().map(|Reverse(e)| e.node),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        match &self.open {
            Open::Stack(stack) => stack.len(),
            Open::Queue(queue) => queue.len(),
            Open::Heap(heap) => heap.len(),
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest size the frontier reached.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::search::SearchTree;

    fn drain<'t>(frontier: &mut Frontier<'t, char, u32>) -> Vec<char> {
        let mut order = vec![];
        while let Some(node) = frontier.pop() {
            order.push(*node.state());
        }
        order
    }

    #[test]
    fn stack_and_queue_disciplines() {
        let tree = SearchTree::<char, u32>::new();
        let root = tree.root('S');
        let children: Vec<_> = ['A', 'B', 'C'].map(|s| tree.reach(root, s, 1)).into();

        let mut stack = Frontier::new(Strategy::DepthFirst);
        let mut queue = Frontier::new(Strategy::BreadthFirst);
        for &n in &children {
            stack.push(Priority::arrival(), n);
            queue.push(Priority::arrival(), n);
        }
        assert_eq!(stack.len(), 3);
        assert_eq!(drain(&mut stack), vec!['C', 'B', 'A']);
        assert_eq!(drain(&mut queue), vec!['A', 'B', 'C']);
        assert!(stack.is_empty());
        assert_eq!(stack.high_water(), 3);
        assert!(stack.pop().is_none());
    }

    #[test]
    fn heap_breaks_ties_by_state_then_insertion() {
        let tree = SearchTree::<char, u32>::new();
        let root = tree.root('S');
        let mut frontier = Frontier::new(Strategy::UniformCost);

        let c = tree.reach(root, 'C', 2);
        let b = tree.reach(root, 'B', 2);
        let a = tree.reach(root, 'A', 5);
        frontier.push(Priority::uniform_cost(c.g()), c);
        frontier.push(Priority::uniform_cost(b.g()), b);
        frontier.push(Priority::uniform_cost(a.g()), a);

        // Same state and priority, but inserted later.
        let b_late = tree.reach(c, 'B', 0);
        frontier.push(Priority::uniform_cost(b_late.g()), b_late);

        let first = frontier.pop().unwrap();
        assert_eq!((*first.state(), first.depth()), ('B', 1));
        let second = frontier.pop().unwrap();
        assert_eq!((*second.state(), second.depth()), ('B', 2));
        assert_eq!(drain(&mut frontier), vec!['C', 'A']);
    }

    #[test]
    fn astar_prefers_lower_g_on_equal_f() {
        let tree = SearchTree::<char, u32>::new();
        let root = tree.root('S');
        let mut frontier = Frontier::new(Strategy::AStar);

        let a = tree.reach(root, 'A', 3);
        let b = tree.reach(root, 'B', 1);
        frontier.push(Priority::astar(a.g(), 5), a); // f = 8, g = 3
        frontier.push(Priority::astar(b.g(), 7), b); // f = 8, g = 1

        assert_eq!(drain(&mut frontier), vec!['B', 'A']);
    }
}
