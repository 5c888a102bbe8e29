use dogs::search_algorithm::{NeverStoppingCriterion, StoppingCriterion};
use fastrand::Rng;

use crate::bitset;
use crate::color::{Solution, VertexId};
use crate::graph::ColoringGraph;
use crate::search::domains::{ColorDomains, PartialColoring};

/// first backtrack budget of the restart loop
const INITIAL_CALL_LIMIT: u64 = 1000;


/** One run of the decision procedure: does the compatibility graph admit an
f-fold coloring with the given palette?

Color classes are cliques of the compatibility graph, so placing a color on
a vertex removes that color from the domains of every vertex it cannot share
a class with. Each branch hands the child its own copy of the domains; the
partial assignment is a shared stack truncated on backtrack. */
struct Expansion<'a> {
    /// compatibility graph (two vertices are adjacent iff they may share a color)
    inst: &'a ColoringGraph,
    /// color multiplicity
    f: usize,
    /// words per domain row
    nb_words: usize,
    /// number of placements of a saturated assignment (n·f)
    target_size: usize,
    /// current partial assignment
    assignment: PartialColoring,
    /// number of expand calls so far
    nb_calls: u64,
    /// budget on expand calls
    call_limit: u64,
}

impl<'a> Expansion<'a> {
    /** selects the vertex to branch on: smallest non-empty domain, ties
    broken by the total overlap of the candidate's domain with the domains of
    the non-adjacent other candidates, final ties by vertex index. */
    fn choose_branching_vertex(&self, domains:&ColorDomains) -> VertexId {
        let n = self.inst.nb_vertices();
        let mut best_count = usize::MAX;
        let mut candidates:Vec<VertexId> = Vec::new();
        for v in 0..n {
            if bitset::is_empty(domains.avail(v)) {
                continue;
            }
            let count = bitset::popcount(domains.avail(v));
            if count < best_count {
                best_count = count;
                candidates.clear();
            }
            if count == best_count {
                candidates.push(v);
            }
        }
        debug_assert!(!candidates.is_empty());
        let mut scores = vec![0; candidates.len()];
        for (i,v) in candidates.iter().enumerate() {
            for (j,w) in candidates[..i].iter().enumerate() {
                if !self.inst.are_adjacent(*v, *w) {
                    let pc = bitset::intersection_popcount(
                        domains.avail(*v), domains.avail(*w)
                    );
                    scores[i] += pc;
                    scores[j] += pc;
                }
            }
        }
        let mut best_v = candidates[0];
        let mut best_score = scores[0];
        for (i,v) in candidates.iter().enumerate().skip(1) {
            if scores[i] > best_score {
                best_score = scores[i];
                best_v = *v;
            }
        }
        best_v
    }

    /** recursive search. Unit propagation first, then one child per candidate
    color of the branching vertex. The assignment is restored to its entry
    size on return; `incumbent` receives any saturated assignment found. */
    fn expand(&mut self, incumbent:&mut PartialColoring, domains:&mut ColorDomains) {
        self.nb_calls += 1;
        if self.nb_calls >= self.call_limit {
            return;
        }

        if self.assignment.len() == self.target_size {
            incumbent.copy_from(&self.assignment);
            return;
        }

        let n = self.inst.nb_vertices();
        let size_before = self.assignment.len();

        // UNIT PROPAGATION: a vertex whose remaining options exactly cover its
        // missing colors must take all of them
        let mut unit_stack:Vec<VertexId> = Vec::new();
        for v in 0..n {
            let pc = bitset::popcount(domains.avail(v));
            let nb_possible = pc + domains.nb_assigned(v);
            if pc != 0 && nb_possible == self.f {
                unit_stack.push(v);
            } else if nb_possible < self.f {
                return;
            }
        }
        while let Some(v) = unit_stack.pop() {
            let color = bitset::first_set_bit(domains.avail(v)).unwrap();
            self.assignment.place(v, color, domains, self.f);
            if domains.nb_assigned(v) != self.f {
                unit_stack.push(v); // v still has colors to take
            }
            // the color leaves the domain of every vertex that cannot share a
            // class with v; the sorted neighbor list is merged against 0..n
            let adjlist = self.inst.neighbors(v);
            let mut next_adj = 0;
            for w in 0..n {
                if next_adj < adjlist.len() && adjlist[next_adj] == w {
                    next_adj += 1;
                    continue;
                }
                if w == v {
                    continue;
                }
                if bitset::test(domains.avail(w), color) {
                    bitset::unset(domains.avail_mut(w), color);
                    let pc = bitset::popcount(domains.avail(w));
                    if pc != 0 && pc + domains.nb_assigned(w) == self.f {
                        unit_stack.push(w);
                    } else if pc + domains.nb_assigned(w) < self.f {
                        self.assignment.truncate(size_before);
                        return;
                    }
                }
            }
        }

        if self.assignment.len() == self.target_size {
            incumbent.copy_from(&self.assignment);
            self.assignment.truncate(size_before);
            return;
        }

        // BRANCHING
        let best_v = self.choose_branching_vertex(domains);

        // a color present in every non-empty domain is interchangeable with
        // the colors remaining after it: one trial of it closes the node
        let mut colors_in_all_domains = vec![!0u64; self.nb_words];
        for v in 0..n {
            if !bitset::is_empty(domains.avail(v)) {
                bitset::intersect_into(&mut colors_in_all_domains, domains.avail(v));
            }
        }

        let mut domain_copy = vec![0u64; self.nb_words];
        bitset::copy(domains.avail(best_v), &mut domain_copy);

        let mut child = domains.clone();
        while let Some(color) = bitset::first_set_bit(&domain_copy) {
            let color_in_all_domains = bitset::test(&colors_in_all_domains, color);
            bitset::unset(&mut domain_copy, color);

            child.copy_from(domains);
            // no wipeout check here: a domain this makes unit gets
            // instantiated by unit propagation in the child call
            let adjlist = self.inst.neighbors(best_v);
            let mut next_adj = 0;
            for w in 0..n {
                if next_adj < adjlist.len() && adjlist[next_adj] == w {
                    next_adj += 1;
                    continue;
                }
                if w == best_v {
                    continue;
                }
                bitset::unset(child.avail_mut(w), color);
            }

            self.assignment.place(best_v, color, &mut child, self.f);
            self.expand(incumbent, &mut child);
            self.assignment.pop();

            if incumbent.len() == self.target_size || color_in_all_domains {
                break;
            }
        }

        self.assignment.truncate(size_before);
    }
}


/** runs the decision procedure for palette size `nb_colors` on the
compatibility graph `inst`, under a budget of `call_limit` expand calls.
Writes a saturated assignment into `incumbent` when one is found and returns
the number of expand calls used: a value below the budget means the search
tree was explored completely, so the (un)satisfiability answer is proven. */
pub fn solve(inst:&ColoringGraph, f:usize, nb_colors:usize, call_limit:u64,
    incumbent:&mut PartialColoring) -> u64
{
    let n = inst.nb_vertices();
    let mut domains = ColorDomains::new(n, nb_colors);
    let mut expansion = Expansion {
        inst,
        f,
        nb_words: domains.nb_words(),
        target_size: n*f,
        assignment: PartialColoring::with_capacity(n*f),
        nb_calls: 0,
        call_limit,
    };
    expansion.expand(incumbent, &mut domains);
    expansion.nb_calls
}

/** Fisher-Yates shuffle of 0..n, reproducible from `seed` */
pub fn randomized_vertex_order(n:usize, seed:u64) -> Vec<VertexId> {
    let rng = Rng::with_seed(seed);
    let mut vv:Vec<VertexId> = (0..n).collect();
    for i in (1..n).rev() {
        let r = rng.usize(0..=i);
        vv.swap(i, r);
    }
    vv
}

/**
finds the smallest palette admitting an f-fold coloring of the conflict graph
`inst`, together with a witness (one color class per entry).

For each candidate palette size the decision procedure runs under a backtrack
budget; when the budget is exhausted before an answer is proven, the search
restarts with a 10% larger budget and a reshuffled vertex order. One line per
decided palette size goes to stdout: `"<k> <nb calls> SATISFIABLE|UNSAT"`.

Returns None if `stop` fires between restarts before the answer is proven;
with a never-firing criterion the search is complete and always returns.
*/
pub fn find_fold_coloring<Stop:StoppingCriterion>(inst:&ColoringGraph, f:usize, stop:Stop)
    -> Option<(usize, Solution)>
{
    assert!(f >= 1, "find_fold_coloring: multiplicity must be at least 1");
    let n = inst.nb_vertices();
    let target_size = n*f;
    // color classes are cliques of the compatibility graph
    let compat = inst.complement();
    let mut seed:u64 = 0;
    let mut order = randomized_vertex_order(n, seed);
    let mut sorted = compat.induced_subgraph(&order);
    let mut call_limit = INITIAL_CALL_LIMIT;
    let mut nb_colors = 0;
    loop {
        let mut incumbent = PartialColoring::with_capacity(target_size);
        let nb_calls = loop {
            if stop.is_finished() {
                return None;
            }
            incumbent.clear();
            let calls = solve(&sorted, f, nb_colors, call_limit, &mut incumbent);
            if calls < call_limit {
                break calls; // proof of (un)satisfiability completed
            }
            call_limit += call_limit/10;
            seed += 1;
            order = randomized_vertex_order(n, seed);
            sorted = compat.induced_subgraph(&order);
        };
        let satisfiable = incumbent.len() == target_size;
        println!("{} {} {}", nb_colors, nb_calls,
            if satisfiable { "SATISFIABLE" } else { "UNSAT" });
        if satisfiable {
            return Some((nb_colors, incumbent.color_classes(nb_colors, &order)));
        }
        nb_colors += 1;
    }
}

/** smallest palette admitting an f-fold coloring of `inst` (complete search) */
pub fn find_coloring_number(inst:&ColoringGraph, f:usize) -> usize {
    match find_fold_coloring(inst, f, NeverStoppingCriterion::default()) {
        Some((nb_colors,_)) => nb_colors,
        None => unreachable!("the never-stopping criterion cannot fire"),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::{checker, CheckerResult};

    fn graph_from_edges(n:usize, edges:&[(usize,usize)]) -> ColoringGraph {
        let mut g = ColoringGraph::new(n);
        for (v,w) in edges {
            g.add_edge(*v, *w);
        }
        g.make_adjacency_lists();
        g
    }

    fn cycle(n:usize) -> ColoringGraph {
        let edges:Vec<(usize,usize)> = (0..n).map(|i| (i, (i+1)%n)).collect();
        graph_from_edges(n, &edges)
    }

    fn complete(n:usize) -> ColoringGraph {
        let mut edges = Vec::new();
        for v in 0..n {
            for w in 0..v {
                edges.push((v,w));
            }
        }
        graph_from_edges(n, &edges)
    }

    /// solves and checks the witness before returning the coloring number
    fn solve_and_check(inst:&ColoringGraph, f:usize) -> usize {
        let (nb_colors, solution) =
            find_fold_coloring(inst, f, NeverStoppingCriterion::default()).unwrap();
        assert_eq!(checker(inst, f, &solution), CheckerResult::Ok(solution.len()));
        assert_eq!(solution.len(), nb_colors);
        nb_colors
    }

    #[test]
    fn test_no_vertices() {
        let g = ColoringGraph::new(0);
        assert_eq!(find_coloring_number(&g, 1), 0);
        assert_eq!(find_coloring_number(&g, 3), 0);
    }

    #[test]
    fn test_edgeless() {
        let g = graph_from_edges(4, &[]);
        assert_eq!(solve_and_check(&g, 1), 1);
        assert_eq!(solve_and_check(&g, 2), 2);
    }

    #[test]
    fn test_triangle() {
        let g = complete(3);
        assert_eq!(solve_and_check(&g, 1), 3);
        assert_eq!(solve_and_check(&g, 2), 6);
        let from_file = ColoringGraph::from_file("insts/triangle.col");
        assert_eq!(solve_and_check(&from_file, 2), 6);
    }

    #[test]
    fn test_path() {
        let g = graph_from_edges(4, &[(0,1),(1,2),(2,3)]);
        assert_eq!(solve_and_check(&g, 1), 2);
    }

    #[test]
    fn test_complete_graphs() {
        // an f-fold coloring of K_n needs n·f colors
        assert_eq!(solve_and_check(&complete(4), 1), 4);
        assert_eq!(solve_and_check(&complete(4), 2), 8);
        assert_eq!(solve_and_check(&complete(5), 1), 5);
    }

    #[test]
    fn test_odd_cycles() {
        assert_eq!(solve_and_check(&cycle(5), 1), 3);
        assert_eq!(solve_and_check(&cycle(7), 1), 3);
    }

    #[test]
    fn test_c5_fold() {
        // the fractional chromatic number of C5 is 5/2
        assert_eq!(solve_and_check(&cycle(5), 2), 5);
    }

    #[test]
    fn test_bipartite() {
        let g = graph_from_edges(6, &[(0,3),(0,4),(0,5),(1,3),(1,4),(1,5),(2,3),(2,4),(2,5)]);
        assert_eq!(solve_and_check(&g, 1), 2);
        let grid = ColoringGraph::from_file("insts/grid2x2.col");
        assert_eq!(solve_and_check(&grid, 1), 2);
    }

    #[test]
    fn test_petersen_fold() {
        // the Petersen graph is the Kneser graph K(5,2): its fractional
        // chromatic number is 5/2
        let g = ColoringGraph::from_file("insts/petersen.col");
        assert_eq!(solve_and_check(&g, 1), 3);
        assert_eq!(solve_and_check(&g, 2), 5);
    }

    #[test]
    fn test_monotone_in_multiplicity() {
        let g = cycle(5);
        let mut prev = 0;
        for f in 1..=4 {
            let k = solve_and_check(&g, f);
            assert!(k >= prev);
            prev = k;
        }
        assert_eq!(prev, 10); // 2f + ⌈f/2⌉ for f = 4
    }

    #[test]
    fn test_permutation_invariance() {
        let g = ColoringGraph::from_file("insts/petersen.col");
        let relabeled = g.induced_subgraph(&[3, 9, 0, 7, 5, 2, 8, 1, 6, 4]);
        assert_eq!(find_coloring_number(&g, 2), find_coloring_number(&relabeled, 2));
    }

    #[test]
    fn test_induced_subgraph_bound() {
        let g = ColoringGraph::from_file("insts/petersen.col");
        let h = g.induced_subgraph(&[0, 1, 2, 3, 4]); // the outer 5-cycle
        assert!(find_coloring_number(&h, 2) <= find_coloring_number(&g, 2));
    }

    #[test]
    fn test_solve_proves_unsat_under_budget() {
        // 2-fold coloring of C5 with only 4 colors is infeasible; the proof
        // must leave the incumbent empty and stay below a generous budget
        let compat = cycle(5).complement();
        let order:Vec<VertexId> = (0..5).collect();
        let sorted = compat.induced_subgraph(&order);
        let mut incumbent = PartialColoring::with_capacity(10);
        let nb_calls = solve(&sorted, 2, 4, 1_000_000, &mut incumbent);
        assert!(nb_calls < 1_000_000);
        assert_eq!(incumbent.len(), 0);
    }

    #[test]
    fn test_restart_determinism() {
        let compat = cycle(7).complement();
        let order = randomized_vertex_order(7, 0);
        let sorted = compat.induced_subgraph(&order);
        let mut first = PartialColoring::with_capacity(7);
        let mut second = PartialColoring::with_capacity(7);
        let calls_first = solve(&sorted, 1, 3, 1000, &mut first);
        let calls_second = solve(&sorted, 1, 3, 1000, &mut second);
        assert_eq!(calls_first, calls_second);
        assert_eq!(first, second);
        // the whole search is reproducible as well
        let g = cycle(7);
        let run_a = find_fold_coloring(&g, 2, NeverStoppingCriterion::default());
        let run_b = find_fold_coloring(&g, 2, NeverStoppingCriterion::default());
        assert_eq!(run_a, run_b);
    }

    #[test]
    fn test_randomized_vertex_order() {
        let first = randomized_vertex_order(20, 42);
        let second = randomized_vertex_order(20, 42);
        assert_eq!(first, second);
        let other_seed = randomized_vertex_order(20, 43);
        assert_ne!(first, other_seed);
        let mut sorted_order = first;
        sorted_order.sort_unstable();
        assert_eq!(sorted_order, (0..20).collect::<Vec<usize>>());
    }
}
