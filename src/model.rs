//! Typed representation of LCOV coverage data: the per-file records the
//! parser accumulates and the whole-report `Summary` it returns.

use serde::Serialize;

/// Compute a coverage percentage, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64 * 100.0
    }
}

/// A single `DA` entry: one instrumentable line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineEntry {
    pub line_number: u32,
    pub execution_count: u64,
}

/// A single `FN` entry: a function definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionEntry {
    pub start_line: u32,
    pub name: String,
}

/// A single `BRDA` entry: one branch arm on a given line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchEntry {
    pub line_number: u32,
    pub block_number: u32,
    pub branch_number: u32,
    /// `"-"` on the wire is normalized to 0.
    pub execution_count: u64,
}

/// Coverage data for a single source file, accumulated between an `SF`
/// record and its matching `end_of_record`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub test_name: String,
    pub source_file: String,
    pub lines: Vec<LineEntry>,
    pub lines_found: u64,
    pub lines_hit: u64,
    pub functions: Vec<FunctionEntry>,
    pub functions_hit: u64,
    pub branches: Vec<BranchEntry>,
    pub branches_found: u64,
    pub branches_hit: u64,
}

/// Aggregate coverage statistics across an entire LCOV report.
///
/// The found/hit totals come from each file's explicit `LF`/`LH` and
/// `BRF`/`BRH` records, never from counting the raw entry lists; the
/// function totals come from counting `FN` definitions and `FNDA`
/// records with a positive execution count.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub total_files: u64,
    pub total_lines: u64,
    pub covered_lines: u64,
    /// Line coverage as a percentage (0–100).
    pub line_coverage_rate: f64,
    pub total_functions: u64,
    pub covered_functions: u64,
    pub function_coverage_rate: f64,
    pub total_branches: u64,
    pub covered_branches: u64,
    pub branch_coverage_rate: f64,
    /// Per-file records in input order, one per closed file block.
    pub files: Vec<FileRecord>,
}

impl Summary {
    /// Fold a closed file block into the report totals.
    pub(crate) fn fold(&mut self, file: FileRecord) {
        self.total_files += 1;
        self.total_lines += file.lines_found;
        self.covered_lines += file.lines_hit;
        self.total_functions += file.functions.len() as u64;
        self.covered_functions += file.functions_hit;
        self.total_branches += file.branches_found;
        self.covered_branches += file.branches_hit;
        self.files.push(file);
    }

    /// Recompute the three derived rates from the current totals.
    pub(crate) fn finish(&mut self) {
        self.line_coverage_rate = rate(self.covered_lines, self.total_lines);
        self.function_coverage_rate = rate(self.covered_functions, self.total_functions);
        self.branch_coverage_rate = rate(self.covered_branches, self.total_branches);
    }
}
