//! # bondcalc Math
//!
//! Numerical building blocks for the bondcalc bond analytics workspace.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketing root-finding algorithms (Brent, Bisection)
//!
//! Both solvers share a [`solvers::SolverConfig`] and report a
//! [`solvers::SolverResult`] carrying the root together with iteration
//! statistics, so callers can log or surface convergence behaviour.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, brent, BisectionSolver, BracketSolver, BrentSolver, SolverConfig,
        SolverResult,
    };
}

pub use error::{MathError, MathResult};
