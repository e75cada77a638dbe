//! Directed multigraph over station indices.
//!
//! Nodes are `0..node_count`: a station with no arcs is still a node, so
//! `node_count` is the size of the station list, not of the touched set.
//!
//! Every arc is stored once in `edges`; `adjacency[source]` keeps the targets
//! of `source` in first-insertion order, each with the ids of its parallel
//! arcs in key order. Iteration follows that layout, so the order of
//! [`MultiDiGraph::edges`] only depends on insertion order.

use crate::data::{Edge, EdgeAttributes, StationIndex};

type Bucket = (StationIndex, Vec<usize>);

#[derive(Debug, Default, Clone)]
pub struct MultiDiGraph {
    adjacency: Vec<Vec<Bucket>>,
    edges: Vec<Edge>,
}

impl MultiDiGraph {
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            edges: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Inserts a new parallel arc and returns its key within `(source, target)`.
    pub fn add_edge(
        &mut self,
        source: StationIndex,
        target: StationIndex,
        attributes: EdgeAttributes,
    ) -> usize {
        let needed = source.max(target) + 1;
        if self.adjacency.len() < needed {
            self.adjacency.resize_with(needed, Vec::new);
        }

        let id = self.edges.len();
        let buckets = &mut self.adjacency[source];
        let key = match buckets.iter_mut().find(|(to, _)| *to == target) {
            Some((_, ids)) => {
                ids.push(id);
                ids.len() - 1
            }
            None => {
                buckets.push((target, vec![id]));
                0
            }
        };

        self.edges.push(Edge {
            source,
            target,
            key,
            attributes,
        });

        key
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        let edges = &self.edges;
        self.adjacency.iter().flat_map(move |buckets| {
            buckets
                .iter()
                .flat_map(move |(_, ids)| ids.iter().map(move |&id| &edges[id]))
        })
    }

    pub fn out_edges(&self, source: StationIndex) -> impl Iterator<Item = &Edge> + '_ {
        let edges = &self.edges;
        self.adjacency
            .get(source)
            .into_iter()
            .flatten()
            .flat_map(move |(_, ids)| ids.iter().map(move |&id| &edges[id]))
    }

    pub fn edges_between(
        &self,
        source: StationIndex,
        target: StationIndex,
    ) -> impl Iterator<Item = &Edge> + '_ {
        let edges = &self.edges;
        self.bucket(source, target)
            .into_iter()
            .flatten()
            .map(move |&id| &edges[id])
    }

    pub fn contains_edge(&self, source: StationIndex, target: StationIndex) -> bool {
        self.bucket(source, target).is_some()
    }

    fn bucket(&self, source: StationIndex, target: StationIndex) -> Option<&Vec<usize>> {
        self.adjacency
            .get(source)?
            .iter()
            .find(|(to, _)| *to == target)
            .map(|(_, ids)| ids)
    }
}
