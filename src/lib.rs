//! Parse LCOV coverage reports and compute aggregate coverage statistics.
//!
//! The main entry point is [`summarize`], which consumes a reader of
//! LCOV text and returns a [`Summary`] of line, function, and branch
//! coverage across all source files in the report.

pub mod error;
pub mod model;
pub mod parser;
pub mod report;

use std::io::{BufReader, Read};

pub use error::{LcovError, Result};
pub use model::{FileRecord, Summary};

/// Parse LCOV data from a reader and return the aggregate summary.
///
/// Parsing is strict: the first malformed or out-of-sequence record
/// fails the whole call and no partial summary is returned.
pub fn summarize<R: Read>(reader: R) -> Result<Summary> {
    parser::Parser::new(BufReader::new(reader)).parse()
}
