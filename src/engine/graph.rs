//! Plain graph: topology plus edge weights, no attribute columns.

use std::collections::HashMap;

/// Adjacency-list graph produced by subgraph extraction. Undirected graphs
/// store each edge in both endpoint lists but count it once.
#[derive(Debug, Clone)]
pub struct Graph {
    directed: bool,
    adjacency: HashMap<i64, Vec<(i64, f64)>>,
    num_edges: usize,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            adjacency: HashMap::new(),
            num_edges: 0,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn add_edge(&mut self, src: i64, dst: i64, weight: f64) {
        self.adjacency.entry(src).or_default().push((dst, weight));
        if self.directed {
            self.adjacency.entry(dst).or_default();
        } else {
            self.adjacency.entry(dst).or_default().push((src, weight));
        }
        self.num_edges += 1;
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    pub fn has_vertex(&self, id: i64) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn neighbors(&self, id: i64) -> &[(i64, f64)] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undirected_edges_visible_from_both_endpoints() {
        let mut g = Graph::new(false);
        g.add_edge(1, 2, 0.5);
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.num_vertices(), 2);
        assert_eq!(g.neighbors(1), &[(2, 0.5)]);
        assert_eq!(g.neighbors(2), &[(1, 0.5)]);
    }

    #[test]
    fn test_directed_edges_one_way() {
        let mut g = Graph::new(true);
        g.add_edge(1, 2, 1.0);
        assert_eq!(g.neighbors(1), &[(2, 1.0)]);
        assert!(g.neighbors(2).is_empty());
        assert!(g.has_vertex(2));
    }
}
