//! Enumerates the minimal hitting sets of a finite collection of finite
//! sets (the "conflicts"), via two graph-construction algorithms: Reiter's
//! hitting-set DAG (with Greiner et al.'s corrections) and Wotawa's
//! reduced-complexity tree.
//!
//! A hitting set intersects every conflict; it is minimal if no proper
//! subset is still hitting. Both engines share breadth-first construction,
//! node labeling from an unhit conflict, ticking when a path already hits
//! every conflict, closing against a ticked ancestor, and optional pruning
//! / optional pre-sorting of conflicts by cardinality. See [`hsdag`] and
//! [`rctree`] for the algorithms themselves, and [`problem::Problem`] for
//! the contract both implement.

#![warn(missing_docs)]
#![warn(
    clippy::all,
    clippy::as_conversions,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro
)]
#![allow(clippy::too_many_arguments, clippy::blocks_in_conditions)]

pub mod engine;
pub mod error;
pub mod generate;
pub mod graph;
pub mod hsdag;
pub mod parse;
pub mod problem;
pub mod rctree;
pub mod solution;

#[cfg(test)]
pub mod testing;
