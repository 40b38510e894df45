//! Bus factor analysis of git repositories.
//!
//! Commits are folded into a per-file [`ledger::Ledger`] of time-decayed
//! contributions. [`authorship`] turns those into degree-of-authorship
//! scores, [`selector`] picks key developers and computes the bus factor
//! of a set of files, and [`tree`] aggregates it over a directory tree.
//! [`context::BusFactor`] ties the pieces together.

pub mod aliases;
pub mod analyze;
pub mod authorship;
pub mod cli;
pub mod commits;
pub mod config;
pub mod context;
pub mod error;
pub mod git;
pub mod identity;
pub mod ledger;
pub mod report_helpers;
pub mod selector;
pub mod tree;
pub mod util;

pub use context::{BusFactor, ComputationContext};
pub use error::{BusFactorError, Result};
