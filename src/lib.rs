//! Exact solver for fractional (f-fold) graph coloring: find the smallest
//! palette from which every vertex can take f distinct colors so that
//! adjacent vertices receive disjoint color sets.

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// coloring solutions and checker
pub mod color;

/// fixed-width bitset primitives backing the color domains
pub mod bitset;

/// graph model (dense adjacency matrix + sorted neighbor lists)
pub mod graph;

/// read DIMACS instances
pub mod dimacs;

/// helper and utility methods for executables
pub mod util;

/// search procedures for the f-fold coloring problem
pub mod search;
