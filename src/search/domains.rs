use crate::bitset;
use crate::color::{Solution, VertexId};

/** Per-vertex color domains of one search node.

The domain rows live in a single contiguous allocation so that handing a
child node its own state is two slice copies, and intersection popcounts
between rows stay word-parallel. `nb_assigned[v]` counts the colors already
placed on v; a vertex holding its f colors has an empty row. */
#[derive(Debug, Clone)]
pub struct ColorDomains {
    /// words per domain row
    nb_words: usize,
    /// avail[v*nb_words..(v+1)*nb_words]: colors still assignable to v
    avail: Vec<u64>,
    /// nb_assigned[v]: number of colors already placed on v
    nb_assigned: Vec<usize>,
}

impl ColorDomains {
    /** creates the root domains: every vertex may take any of the
    `nb_colors` colors */
    pub fn new(n:usize, nb_colors:usize) -> Self {
        let nb_words = bitset::nb_words(nb_colors);
        let mut avail = vec![0u64; n*nb_words];
        for v in 0..n {
            bitset::set_first_n(&mut avail[v*nb_words..(v+1)*nb_words], nb_colors);
        }
        Self { nb_words, avail, nb_assigned: vec![0;n] }
    }

    /// words per domain row
    pub fn nb_words(&self) -> usize { self.nb_words }

    /// domain of v
    pub fn avail(&self, v:VertexId) -> &[u64] {
        &self.avail[v*self.nb_words..(v+1)*self.nb_words]
    }

    /// mutable domain of v
    pub fn avail_mut(&mut self, v:VertexId) -> &mut [u64] {
        &mut self.avail[v*self.nb_words..(v+1)*self.nb_words]
    }

    /// number of colors already placed on v
    pub fn nb_assigned(&self, v:VertexId) -> usize { self.nb_assigned[v] }

    /** overwrites self with `other`. Both must stem from the same root
    (same vertex count and palette). */
    pub fn copy_from(&mut self, other:&Self) {
        debug_assert_eq!(self.nb_words, other.nb_words);
        self.avail.copy_from_slice(&other.avail);
        self.nb_assigned.copy_from_slice(&other.nb_assigned);
    }

    /** records that v took `color`: removes it from v's domain and wipes
    the whole domain once v holds its f colors. */
    pub fn assign(&mut self, v:VertexId, color:usize, f:usize) {
        debug_assert!(self.nb_assigned[v] < f);
        self.nb_assigned[v] += 1;
        let saturated = self.nb_assigned[v] == f;
        let row = self.avail_mut(v);
        bitset::unset(row, color);
        if saturated {
            bitset::clear(row);
        }
    }
}


/** Stack of (vertex, color) placements in decision order.

Backtracking is a truncation to a previously recorded size; a saturated
assignment holds n·f placements and is copied out as color classes. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialColoring {
    /// placements, oldest first
    placements: Vec<(VertexId, usize)>,
}

impl PartialColoring {
    /** creates an empty assignment able to hold `capacity` placements */
    pub fn with_capacity(capacity:usize) -> Self {
        Self { placements: Vec::with_capacity(capacity) }
    }

    /// number of placements so far
    pub fn len(&self) -> usize { self.placements.len() }

    /// true iff nothing is placed yet
    pub fn is_empty(&self) -> bool { self.placements.is_empty() }

    /// forgets every placement
    pub fn clear(&mut self) { self.placements.clear(); }

    /** places `color` on `v` and updates the domains accordingly */
    pub fn place(&mut self, v:VertexId, color:usize, domains:&mut ColorDomains, f:usize) {
        self.placements.push((v, color));
        domains.assign(v, color, f);
    }

    /// removes the most recent placement
    pub fn pop(&mut self) {
        self.placements.pop();
    }

    /// truncates to `size` placements
    pub fn truncate(&mut self, size:usize) {
        self.placements.truncate(size);
    }

    /// overwrites self with `other`
    pub fn copy_from(&mut self, other:&Self) {
        self.placements.clear();
        self.placements.extend_from_slice(&other.placements);
    }

    /** copies a saturated assignment out as color classes. Internal vertex i
    is mapped back to `order[i]`; every class comes out ascending. */
    pub fn color_classes(&self, nb_colors:usize, order:&[VertexId]) -> Solution {
        let mut res = vec![Vec::new(); nb_colors];
        for (v,color) in &self.placements {
            res[*color].push(order[*v]);
        }
        for class in res.iter_mut() {
            class.sort_unstable();
        }
        res
    }
}
