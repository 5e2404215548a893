use typed_arena::Arena;

use crate::cost::Cost;
use crate::space::Path;
use crate::space::State;

/// A node of the search tree.
///
/// Nodes only know their parent, paths are reconstructed by walking up to the
/// root. The same `State` may be held by many nodes in tree search.
#[derive(Debug)]
pub struct SearchTreeNode<'t, St, C>
where
    St: State,
    C: Cost,
{
    pub(crate) parent: Option<&'t SearchTreeNode<'t, St, C>>,
    pub(crate) state: St,
    /// Accumulated cost from the root.
    pub(crate) g: C,
    /// Number of edges from the root.
    pub(crate) depth: usize,
}

impl<'t, St, C> SearchTreeNode<'t, St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    pub fn state(&self) -> &St {
        &self.state
    }

    #[inline(always)]
    pub fn g(&self) -> C {
        self.g
    }

    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// This node followed by its ancestors up to the root.
    pub fn ancestors(&'t self) -> Ancestors<'t, St, C> {
        Ancestors { next: Some(self) }
    }

    /// Whether `s` is held by this node or any of its ancestors.
    pub fn in_path(&'t self, s: &St) -> bool {
        self.ancestors().any(|n| n.state == *s)
    }

    /// The path from the root to this node.
    #[must_use]
    pub fn path(&'t self) -> Path<St, C> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PathReconstruction");

        let mut states: Vec<St> = Vec::with_capacity(self.depth + 1);
        states.extend(self.ancestors().map(|n| n.state.clone()));
        let mut path = Path {
            states,
            cost: self.g,
        };
        path.reverse();
        path
    }
}

/// Iterator from a node up to the root of its tree.
pub struct Ancestors<'t, St, C>
where
    St: State,
    C: Cost,
{
    next: Option<&'t SearchTreeNode<'t, St, C>>,
}

impl<'t, St, C> Iterator for Ancestors<'t, St, C>
where
    St: State,
    C: Cost,
{
    type Item = &'t SearchTreeNode<'t, St, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent;
        Some(node)
    }
}

/// All the nodes created during a single search.
///
/// Nodes are never freed before the whole tree is dropped, so they can point to
/// their parents with plain references.
pub struct SearchTree<'t, St, C>
where
    St: State,
    C: Cost,
{
    nodes: Arena<SearchTreeNode<'t, St, C>>,
}

impl<'t, St, C> SearchTree<'t, St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
        }
    }

    /// Adds a root node with zero cost.
    pub fn root(&'t self, s: St) -> &'t SearchTreeNode<'t, St, C> {
        self.nodes.alloc(SearchTreeNode {
            parent: None,
            state: s,
            g: C::zero(),
            depth: 0,
        })
    }

    /// Adds a node reached from `parent` through an edge of cost `c`.
    pub fn reach(
        &'t self,
        parent: &'t SearchTreeNode<'t, St, C>,
        s: St,
        c: C,
    ) -> &'t SearchTreeNode<'t, St, C> {
        self.nodes.alloc(SearchTreeNode {
            parent: Some(parent),
            state: s,
            g: parent.g.saturating_add(&c),
            depth: parent.depth + 1,
        })
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<St, C> Default for SearchTree<'_, St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, C> std::fmt::Debug for SearchTree<'_, St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_reconstruction() {
        let tree = SearchTree::<&str, u32>::new();
        let s = tree.root("S");
        let b = tree.reach(s, "B", 1);
        let c = tree.reach(b, "C", 3);
        let g = tree.reach(c, "G", 4);
        // A sibling branch shares the prefix.
        let a = tree.reach(s, "A", 3);

        assert_eq!(tree.len(), 5);
        assert_eq!(g.g(), 8);
        assert_eq!(g.depth(), 3);
        assert_eq!(g.path().states, vec!["S", "B", "C", "G"]);
        assert_eq!(g.path().cost, 8);
        assert_eq!(a.path().states, vec!["S", "A"]);
        assert_eq!(s.path(), Path::new_from_start("S"));
    }

    #[test]
    fn path_membership() {
        let tree = SearchTree::<char, u32>::new();
        let s = tree.root('S');
        let a = tree.reach(s, 'A', 3);
        let b = tree.reach(s, 'B', 1);

        assert!(a.in_path(&'S'));
        assert!(a.in_path(&'A'));
        assert!(!a.in_path(&'B'));
        assert!(!b.in_path(&'A'));
        assert_eq!(a.ancestors().count(), 2);
    }
}
