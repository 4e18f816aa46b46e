//! Search nodes and the arena that owns them.
//!
//! Each node stores the index of its parent rather than a reference, so the
//! tree is a flat `Vec` that lives exactly as long as one search.

use planforge_core::{ActionId, State};

/// Index of a node in its [`NodeArena`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A reached state and how it was reached.
#[derive(Debug, Clone)]
pub struct SearchNode {
    state: State,
    /// Parent node and the action applied to it (None for root).
    via: Option<(NodeId, ActionId)>,
    /// Number of actions from the root.
    depth: usize,
    /// Summed action cost from the root.
    cost: u64,
}

impl SearchNode {
    pub fn root(state: State) -> Self {
        Self {
            state,
            via: None,
            depth: 0,
            cost: 0,
        }
    }

    pub fn child(
        parent: NodeId,
        parent_node: &SearchNode,
        action: ActionId,
        state: State,
        step_cost: u32,
    ) -> Self {
        Self {
            state,
            via: Some((parent, action)),
            depth: parent_node.depth + 1,
            cost: parent_node.cost + u64::from(step_cost),
        }
    }

    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.via.map(|(p, _)| p)
    }

    #[inline]
    pub fn action(&self) -> Option<ActionId> {
        self.via.map(|(_, a)| a)
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn cost(&self) -> u64 {
        self.cost
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.via.is_none()
    }
}

/// Append-only storage for the nodes of one search.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics once the arena holds `u32::MAX` nodes.
    pub fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("search node arena is full"));
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Actions from the root to `id`, in execution order.
    pub fn path_to(&self, id: NodeId) -> Vec<ActionId> {
        let mut path = Vec::with_capacity(self.get(id).depth());
        let mut current = self.get(id);
        while let Some((parent, action)) = current.via {
            path.push(action);
            current = self.get(parent);
        }
        path.reverse();
        path
    }
}
