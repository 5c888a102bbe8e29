//! Search procedures for the f-fold coloring problem.

/// color domains and partial assignment of one search node
pub mod domains;

/// complete backtracking search with unit propagation and restarts
pub mod fold_backtracking;
