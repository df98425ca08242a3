//! Association graph between measurements, candidate sources and the
//! wires they share, partitioned into independent connected components.
//!
//! Nodes live in an arena (`Vec`) and are referred to by their index;
//! wire nodes are deduplicated through an ident lookup table so that a
//! measurement and a source touching the same wire end up connected.

use std::collections::HashMap;

/// External identifier of a measurement channel, source or wire.
pub type Ident = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node {
    Measurement { ident: Ident, value: f32, weight: f32 },
    Source      { ident: Ident, value: f32, weight: f32 },
    Wire        { ident: Ident },
}

impl Node {
    pub fn ident(&self) -> Ident {
        match *self {
            Node::Measurement { ident, .. }
            | Node::Source { ident, .. }
            | Node::Wire { ident } => ident,
        }
    }

    pub fn is_wire(&self) -> bool {
        matches!(self, Node::Wire { .. })
    }
}

#[derive(Default)]
pub struct Grouping {
    nodes: Vec<Node>,
    edges: Vec<Vec<usize>>,
    wires: HashMap<Ident, usize>,
}

/// Component id per node, over an adjacency-list graph. Ids are assigned
/// in order of lowest member node, so they are deterministic.
pub(crate) fn connected_components(edges: &[Vec<usize>]) -> (usize, Vec<usize>) {
    let nnodes = edges.len();
    let mut component = vec![usize::MAX; nnodes];
    let mut ncomponents = 0;
    let mut stack = vec![];

    for seed in 0..nnodes {
        if component[seed] != usize::MAX {
            continue;
        }
        stack.push(seed);
        while let Some(node) = stack.pop() {
            if component[node] != usize::MAX {
                continue;
            }
            component[node] = ncomponents;
            stack.extend(edges[node].iter().copied());
        }
        ncomponents += 1;
    }
    (ncomponents, component)
}

impl Grouping {
    pub fn new() -> Self {
        Self::default()
    }

    fn wire_node(&mut self, ident: Ident) -> usize {
        if let Some(&slot) = self.wires.get(&ident) {
            return slot;
        }
        let slot = self.nodes.len();
        self.nodes.push(Node::Wire { ident });
        self.edges.push(vec![]);
        self.wires.insert(ident, slot);
        slot
    }

    /// Add a measurement or source node, linked to the wires it touches.
    pub fn add(&mut self, node: Node, wire_ids: &[Ident]) {
        let slot = self.nodes.len();
        self.nodes.push(node);
        self.edges.push(vec![]);

        for &wid in wire_ids {
            let wslot = self.wire_node(wid);
            self.edges[slot].push(wslot);
            self.edges[wslot].push(slot);
        }
    }

    /// The connected components of the graph, with wire nodes left out.
    /// Components containing only wires are dropped.
    pub fn clusters(&self) -> Vec<Vec<Node>> {
        let (ncomponents, component) = connected_components(&self.edges);

        let mut clusters: Vec<Vec<Node>> = vec![vec![]; ncomponents];
        for (slot, node) in self.nodes.iter().enumerate() {
            if node.is_wire() {
                continue;
            }
            clusters[component[slot]].push(*node);
        }
        clusters.retain(|c| !c.is_empty());
        clusters
    }
}
