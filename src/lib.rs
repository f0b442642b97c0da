//! movietree: an ordered movie catalog backed by an arena-based binary
//! search tree.
//!
//! Records are loaded from CSV, keyed by a derived title string
//! (`"<title> - <id>"`), and served back through in-order traversal and
//! inclusive range queries whose results can be exported as CSV subsets.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod record;
pub mod tree;
pub mod util;
