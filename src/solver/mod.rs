//! Two-graph symbolic solver.
//!
//! The transfer function of a circuit is read off the common spanning trees
//! of its current graph and voltage graph. By Cauchy–Binet,
//!
//! ```text
//! det(A_I · diag(y) · A_Vᵀ) = Σ_T sign(A_I[T]) · sign(A_V[T]) · Π_{e ∈ T} y_e
//! ```
//!
//! where `T` ranges over edge sets that are spanning trees of both graphs.
//! The pipeline is:
//!
//! 1. [`enumerate_trees`] finds every common tree containing the forced edges
//! 2. [`tree_sign`] gives each tree its sign from the two incidence matrices
//! 3. [`Metacircuit`] turns each tree into a monomial and sorts it into the
//!    numerator or the denominator by the reference edge it holds
//! 4. [`TransferFunction::simplify`] tidies the resulting pair
//!
//! The search is exponential in the number of edges and runs to completion;
//! there is no cancellation.

mod enumerate;
mod expression;
mod metacircuit;
mod sign;
mod simplify;
mod traversal;

pub use enumerate::{enumerate_trees, EnumerationStats};
pub use expression::{Expression, Term};
pub use metacircuit::{AnalysisConfig, Metacircuit, TreeClass};
pub use sign::{tree_sign, IncidenceMatrix};
pub use simplify::TransferFunction;
pub use traversal::{has_cycle, traverse, Traversal};
