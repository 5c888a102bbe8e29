use bit_set::BitSet;

use crate::graph::ColoringGraph;

/** Vertex Id */
pub type VertexId = usize;

/** Solution of an f-fold graph coloring problem, represented as a partition
into color classes. Under multiplicity f, every vertex belongs to exactly f
classes; f = 1 is the classical coloring. */
pub type Solution = Vec<Vec<VertexId>>;


/** checker result.
Returns the number of colors if the solution is correct,
otherwise, provide an explanation on why the solution is incorrect.
*/
#[derive(Clone,Debug,Eq,PartialEq)]
pub enum CheckerResult {
    /// solution is correct and provide its cost
    Ok(usize),
    /// a vertex is added twice in the same color class
    VertexAddedTwice(VertexId),
    /// a vertex does not belong to exactly f classes
    WrongMultiplicity(VertexId, usize),
    /// two adjacent vertices share a color class
    ConflictingEdge(VertexId, VertexId),
}

/**
checks an f-fold coloring against the conflict graph `inst`:
every vertex must appear in exactly f classes, no class may repeat a vertex,
and no class may contain two adjacent vertices.
*/
pub fn checker(inst:&ColoringGraph, f:usize, sol:&[Vec<VertexId>]) -> CheckerResult {
    let mut nb_classes = vec![0; inst.nb_vertices()];
    for class in sol {
        let mut in_class: BitSet = BitSet::default();
        for v in class {
            if in_class.contains(*v) {
                return CheckerResult::VertexAddedTwice(*v);
            }
            in_class.insert(*v);
            nb_classes[*v] += 1;
        }
        // check conflicts
        for v1 in class {
            for v2 in class {
                if v1 < v2 && inst.are_adjacent(*v1, *v2) {
                    return CheckerResult::ConflictingEdge(*v1, *v2);
                }
            }
        }
    }
    for (v,nb) in nb_classes.iter().enumerate() {
        if *nb != f {
            return CheckerResult::WrongMultiplicity(v, *nb);
        }
    }
    // if ok: return the number of colors
    CheckerResult::Ok(sol.len())
}
