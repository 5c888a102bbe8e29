use std::fs;

use bit_set::BitSet;

use crate::color::VertexId;
use crate::dimacs::read_from_file;

/** models a graph to color.

The adjacency is stored twice: one bitset row per vertex for O(1) adjacency
queries, and one strictly ascending neighbor list per vertex for the linear
non-neighbor sweeps of the search. Both representations agree once
`make_adjacency_lists` has run. */
#[derive(Debug, Clone)]
pub struct ColoringGraph {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// adj_matrix[i]: bitset of the neighbors of i
    adj_matrix: Vec<BitSet>,
    /// adj_list[i]: ascending list of the neighbors of i
    adj_list: Vec<Vec<VertexId>>,
}

impl ColoringGraph {
    /** creates an edgeless graph with `n` vertices */
    pub fn new(n:usize) -> Self {
        Self {
            n,
            m: 0,
            adj_matrix: vec![BitSet::default(); n],
            adj_list: vec![Vec::new(); n],
        }
    }

    /// returns the number of vertices in the graph
    pub fn nb_vertices(&self) -> usize { self.n }

    /// returns the number of edges in the graph
    pub fn nb_edges(&self) -> usize { self.m }

    /// number of neighbors of vertex u
    pub fn degree(&self, u:VertexId) -> usize { self.adj_list[u].len() }

    /// returns the neighbors of vertex u in ascending order
    pub fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    /// returns true iff u and v are adjacent
    pub fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool {
        self.adj_matrix[u].contains(v)
    }

    /** inserts the edge {v,w}. Symmetric and idempotent; self-loops and
    out-of-range endpoints are rejected. */
    pub fn add_edge(&mut self, v:VertexId, w:VertexId) {
        assert!(v != w, "add_edge: self-loop on vertex {}", v);
        assert!(v < self.n && w < self.n, "add_edge: vertex out of range ({},{})", v, w);
        if !self.adj_matrix[v].contains(w) {
            self.adj_matrix[v].insert(w);
            self.adj_matrix[w].insert(v);
            self.m += 1;
        }
    }

    /** rebuilds every neighbor list from the matrix, in ascending order.
    Must run after the last `add_edge` and before solving; the constructors
    that return finished graphs call it themselves. */
    pub fn make_adjacency_lists(&mut self) {
        for (v,list) in self.adj_list.iter_mut().enumerate() {
            list.clear();
            list.extend(self.adj_matrix[v].iter());
        }
    }

    /** returns the subgraph induced by `order`: vertex i of the result
    corresponds to vertex order[i] of self, edges preserved. */
    pub fn induced_subgraph(&self, order:&[VertexId]) -> Self {
        let mut subg = Self::new(order.len());
        for i in 0..order.len() {
            for j in 0..i {
                if self.are_adjacent(order[i], order[j]) {
                    subg.add_edge(i, j);
                }
            }
        }
        subg.make_adjacency_lists();
        subg
    }

    /** returns the complement graph: edges exactly between distinct
    non-adjacent pairs of self. */
    pub fn complement(&self) -> Self {
        let mut res = Self::new(self.n);
        for v in 0..self.n {
            for w in 0..v {
                if !self.are_adjacent(v, w) {
                    res.add_edge(v, w);
                }
            }
        }
        res.make_adjacency_lists();
        res
    }

    /// creates a graph from a DIMACS file
    pub fn from_file(filename:&str) -> Self {
        let (n,_,adj_list) = read_from_file(filename);
        let mut res = Self::new(n);
        for (v,list) in adj_list.iter().enumerate() {
            for w in list {
                if v < *w {
                    res.add_edge(v, *w);
                }
            }
        }
        res.make_adjacency_lists();
        res
    }

    /// displays various information about the instance
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        if self.n > 0 {
            let degrees:Vec<usize> = (0..self.n).map(|i| self.degree(i)).collect();
            println!("\t{} \t min degree", degrees.iter().min().unwrap());
            println!("\t{} \t max degree", degrees.iter().max().unwrap());
        }
    }

    /** writes a string encoding the solution (one color class per line) */
    pub fn solution_to_string(&self, solution:&[Vec<VertexId>]) -> String {
        let mut res = String::default();
        for e in solution {
            for v in e {
                res += format!("{} ", v).as_str();
            }
            res += "\n";
        }
        res
    }

    /** writes a solution into a file. each line corresponds to a color. */
    pub fn write_solution(&self, filename:&str, solution:&[Vec<VertexId>]) {
        fs::write(filename, self.solution_to_string(solution))
            .unwrap_or_else(|_|
                panic!("write_solution: unable to write the solution in {}", filename)
            );
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_idempotent() {
        let mut g = ColoringGraph::new(3);
        g.add_edge(0, 1);
        g.add_edge(1, 0);
        g.add_edge(0, 1);
        g.make_adjacency_lists();
        assert_eq!(g.nb_edges(), 1);
        assert!(g.are_adjacent(0, 1));
        assert!(g.are_adjacent(1, 0));
        assert!(!g.are_adjacent(0, 2));
        assert_eq!(g.neighbors(0), &[1]);
    }

    #[test]
    #[should_panic]
    fn test_add_edge_rejects_self_loop() {
        let mut g = ColoringGraph::new(3);
        g.add_edge(1, 1);
    }

    #[test]
    #[should_panic]
    fn test_add_edge_rejects_out_of_range() {
        let mut g = ColoringGraph::new(3);
        g.add_edge(0, 3);
    }

    #[test]
    fn test_adjacency_lists_ascending() {
        let mut g = ColoringGraph::new(5);
        g.add_edge(4, 2);
        g.add_edge(4, 0);
        g.add_edge(4, 3);
        g.make_adjacency_lists();
        assert_eq!(g.neighbors(4), &[0, 2, 3]);
        assert_eq!(g.degree(4), 3);
    }

    #[test]
    fn test_induced_subgraph() {
        // path 0-1-2-3, relabeled by [2,1,3,0]
        let mut g = ColoringGraph::new(4);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.make_adjacency_lists();
        let sub = g.induced_subgraph(&[2, 1, 3, 0]);
        assert_eq!(sub.nb_vertices(), 4);
        assert_eq!(sub.nb_edges(), 3);
        assert!(sub.are_adjacent(0, 1)); // 2-1
        assert!(sub.are_adjacent(0, 2)); // 2-3
        assert!(sub.are_adjacent(1, 3)); // 1-0
        assert!(!sub.are_adjacent(0, 3));
        // restriction to a subset of the vertices
        let tri = g.induced_subgraph(&[0, 1, 2]);
        assert_eq!(tri.nb_vertices(), 3);
        assert_eq!(tri.nb_edges(), 2);
    }

    #[test]
    fn test_complement() {
        let mut g = ColoringGraph::new(4);
        g.add_edge(0, 1);
        g.add_edge(2, 3);
        g.make_adjacency_lists();
        let c = g.complement();
        assert_eq!(c.nb_edges(), 4);
        assert!(!c.are_adjacent(0, 1));
        assert!(!c.are_adjacent(2, 3));
        assert!(c.are_adjacent(0, 2));
        assert!(c.are_adjacent(0, 3));
        assert!(c.are_adjacent(1, 2));
        assert!(c.are_adjacent(1, 3));
    }

    #[test]
    fn test_from_file() {
        let g = ColoringGraph::from_file("insts/grid2x2.col");
        assert_eq!(g.nb_vertices(), 4);
        assert_eq!(g.nb_edges(), 4);
    }
}
