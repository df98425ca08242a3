//! Charge assignment: one regularized least-squares problem per connected
//! component of the measurement/source graph.
//!
//! Clusters produced by [`Grouping`](crate::grouping::Grouping) come in
//! with their wire nodes already stripped; here each cluster becomes one
//! aggregate measurement node edged to the cluster's (deduplicated)
//! sources. Components are disjoint sub-problems and are solved
//! independently, so their processing order cannot affect the answer.

use std::collections::HashMap;

use ndarray::{Array1, Array2};

use crate::grouping::{connected_components, Ident, Node};
use crate::ress;

/// Solved charge per source identifier.
pub type Solution = HashMap<Ident, f32>;

#[derive(Clone, Debug)]
enum SolveNode {
    Measurement { value: f32, weight: f32 },
    Source { ident: Ident, value: f32, weight: f32 },
}

pub struct Solving {
    params: ress::Params,
    nodes: Vec<SolveNode>,
    edges: Vec<Vec<usize>>,
    sources: HashMap<Ident, usize>,
}

impl Default for Solving {
    fn default() -> Self {
        // lasso, as charge is sparse by nature
        Self::new(ress::Params { model: ress::Model::Lasso, ..ress::Params::default() })
    }
}

impl Solving {
    pub fn new(params: ress::Params) -> Self {
        Self { params, nodes: vec![], edges: vec![], sources: HashMap::new() }
    }

    fn source_node(&mut self, ident: Ident, value: f32, weight: f32) -> usize {
        if let Some(&slot) = self.sources.get(&ident) {
            return slot;
        }
        let slot = self.nodes.len();
        self.nodes.push(SolveNode::Source { ident, value, weight });
        self.edges.push(vec![]);
        self.sources.insert(ident, slot);
        slot
    }

    fn measurement_node(&mut self, value: f32, weight: f32) -> usize {
        let slot = self.nodes.len();
        self.nodes.push(SolveNode::Measurement { value, weight });
        self.edges.push(vec![]);
        slot
    }

    /// Absorb a set of clusters. A cluster contributes only if it holds at
    /// least one measurement and one source; its measurements collapse
    /// into one aggregate node carrying their mean value and mean weight.
    pub fn add(&mut self, clusters: &[Vec<Node>]) {
        for cluster in clusters {
            let mut total_value = 0.0;
            let mut total_weight = 0.0;
            let mut nmeasurements = 0;
            let mut source_slots = vec![];

            for node in cluster {
                match *node {
                    Node::Measurement { value, weight, .. } => {
                        total_value += value;
                        total_weight += weight;
                        nmeasurements += 1;
                    }
                    Node::Source { ident, value, weight } => {
                        source_slots.push(self.source_node(ident, value, weight));
                    }
                    Node::Wire { .. } => (),
                }
            }
            if nmeasurements == 0 || source_slots.is_empty() {
                continue;
            }

            let n = nmeasurements as f32;
            let mslot = self.measurement_node(total_value / n, total_weight / n);
            for sslot in source_slots {
                self.edges[mslot].push(sslot);
                self.edges[sslot].push(mslot);
            }
        }
    }

    /// Solve every connected component and return the charge per source
    /// identifier. Source nodes keep their solved values, so a further
    /// `solve` is seeded by this one.
    pub fn solve(&mut self) -> Solution {
        let (ncomponents, component) = connected_components(&self.edges);

        let mut sources = vec![vec![]; ncomponents];
        let mut measures = vec![vec![]; ncomponents];
        for (slot, node) in self.nodes.iter().enumerate() {
            match node {
                SolveNode::Source { .. } => sources[component[slot]].push(slot),
                SolveNode::Measurement { .. } => measures[component[slot]].push(slot),
            }
        }

        let mut answer = Solution::new();
        for (sources, measures) in sources.iter().zip(&measures) {
            if !sources.is_empty() && !measures.is_empty() {
                self.solve_one(&mut answer, sources, measures);
            }
        }
        answer
    }

    fn solve_one(&mut self, answer: &mut Solution, sources: &[usize], measures: &[usize]) {
        let mut meas = Array1::zeros(measures.len());
        let mut init = Array1::zeros(sources.len());
        let mut weight = Array1::zeros(sources.len());
        let mut geom = Array2::zeros((measures.len(), sources.len()));

        let mslot2row: HashMap<usize, usize> =
            measures.iter().enumerate().map(|(row, &slot)| (slot, row)).collect();
        for (row, &mslot) in measures.iter().enumerate() {
            if let SolveNode::Measurement { value, .. } = self.nodes[mslot] {
                meas[row] = value as f64;
            }
        }
        for (col, &sslot) in sources.iter().enumerate() {
            if let SolveNode::Source { value, weight: w, .. } = self.nodes[sslot] {
                init[col] = value as f64;
                weight[col] = w as f64;
            }
            for &mslot in &self.edges[sslot] {
                geom[[mslot2row[&mslot], col]] = 1.0;
            }
        }

        let solved = ress::solve(&geom, &meas, &self.params, Some(&init), Some(&weight));

        for (col, &sslot) in sources.iter().enumerate() {
            if let SolveNode::Source { ident, value, .. } = &mut self.nodes[sslot] {
                *value = solved[col] as f32;
                answer.insert(*ident, solved[col] as f32);
            }
        }
    }
}

// ------------------------------ TESTS ------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};
    use float_eq::assert_float_eq;

    fn loose_lasso() -> ress::Params {
        ress::Params {
            model: ress::Model::Lasso,
            lambda: 1e-6,
            tolerance: 1e-9,
            ..ress::Params::default()
        }
    }

    fn measurement(ident: Ident, value: f32) -> Node {
        Node::Measurement { ident, value, weight: 1.0 }
    }

    fn source(ident: Ident) -> Node {
        Node::Source { ident, value: 0.0, weight: 1.0 }
    }

    #[test]
    fn one_to_one_sources_recover_measurements() {
        let mut solving = Solving::new(loose_lasso());
        solving.add(&[
            vec![measurement(10, 4.0), source(1)],
            vec![measurement(11, 2.5), source(2)],
            vec![measurement(12, 9.0), source(3)],
        ]);
        let answer = solving.solve();
        assert_eq!(answer.len(), 3);
        assert_float_eq!(answer[&1], 4.0, abs <= 1e-3);
        assert_float_eq!(answer[&2], 2.5, abs <= 1e-3);
        assert_float_eq!(answer[&3], 9.0, abs <= 1e-3);
    }

    #[test]
    fn cluster_measurements_average() {
        // two measurements of the same source: the aggregate node carries
        // their mean
        let mut solving = Solving::new(loose_lasso());
        solving.add(&[vec![measurement(10, 4.0), measurement(11, 6.0), source(1)]]);
        let answer = solving.solve();
        assert_float_eq!(answer[&1], 5.0, abs <= 1e-3);
    }

    #[test]
    fn clusters_lacking_measurement_or_source_are_skipped() {
        let mut solving = Solving::new(loose_lasso());
        solving.add(&[
            vec![source(1)],
            vec![measurement(10, 3.0)],
        ]);
        assert!(solving.solve().is_empty());
    }

    #[test]
    fn component_order_does_not_leak() {
        let forward = {
            let mut solving = Solving::new(loose_lasso());
            solving.add(&[
                vec![measurement(10, 4.0), source(1), source(2)],
                vec![measurement(20, 7.0), source(3)],
            ]);
            solving.solve()
        };
        let backward = {
            let mut solving = Solving::new(loose_lasso());
            solving.add(&[
                vec![measurement(20, 7.0), source(3)],
                vec![measurement(10, 4.0), source(1), source(2)],
            ]);
            solving.solve()
        };
        assert_eq!(forward.len(), backward.len());
        for (ident, value) in &forward {
            assert_float_eq!(*value, backward[ident], abs <= 1e-6);
        }
    }
}
