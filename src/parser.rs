//! Streaming record parser and aggregator for the LCOV `.info` format.
//!
//! Reference: https://ltp.sourceforge.net/coverage/lcov/geninfo.1.php
//!
//! Key records:
//!   TN:<test name>
//!   SF:<absolute path to source file>
//!   FN:<line>,<function name>
//!   FNDA:<execution count>,<function name>
//!   DA:<line number>,<execution count>
//!   BRDA:<line>,<block>,<branch>,<taken>   ("-" means 0)
//!   BRF:<branches found>
//!   BRH:<branches hit>
//!   LF:<lines found>
//!   LH:<lines hit>
//!   end_of_record
//!
//! Parsing is strict: the first malformed or out-of-sequence record
//! aborts the parse and no partial summary is returned.

use std::io::BufRead;

use crate::error::{LcovError, Result};
use crate::model::{BranchEntry, FileRecord, FunctionEntry, LineEntry, Summary};

/// The closed set of record tags the aggregator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    TestName,
    SourceFile,
    LineData,
    LinesFound,
    LinesHit,
    FunctionName,
    FunctionData,
    BranchData,
    BranchFound,
    BranchHit,
    EndOfRecord,
}

impl RecordKind {
    /// Map a raw tag to its kind, or `None` for tags we don't recognize.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "TN" => Some(Self::TestName),
            "SF" => Some(Self::SourceFile),
            "DA" => Some(Self::LineData),
            "LF" => Some(Self::LinesFound),
            "LH" => Some(Self::LinesHit),
            "FN" => Some(Self::FunctionName),
            "FNDA" => Some(Self::FunctionData),
            "BRDA" => Some(Self::BranchData),
            "BRF" => Some(Self::BranchFound),
            "BRH" => Some(Self::BranchHit),
            "end_of_record" => Some(Self::EndOfRecord),
            _ => None,
        }
    }

    /// Human-readable name used in sequencing error messages.
    fn label(self) -> &'static str {
        match self {
            Self::TestName => "test name",
            Self::SourceFile => "source file",
            Self::LineData => "line data",
            Self::LinesFound => "lines found",
            Self::LinesHit => "lines hit",
            Self::FunctionName => "function name",
            Self::FunctionData => "function data",
            Self::BranchData => "branch data",
            Self::BranchFound => "branch found",
            Self::BranchHit => "branch hit",
            Self::EndOfRecord => "end of record",
        }
    }
}

/// One tokenized line: a raw tag and everything after the first colon.
///
/// The tag is kept as a string so that unrecognized record kinds pass
/// through the tokenizer intact and can be skipped by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    pub tag: &'a str,
    pub value: &'a str,
}

/// Split one trimmed, non-empty line into a `Record`.
///
/// The literal `end_of_record` tokenizes whole, with an empty value.
/// Any other line splits at the first colon, so values may themselves
/// contain colons (`DA:1:5` yields value `"1:5"`). An empty value after
/// the colon is accepted here; kind-specific validation happens in the
/// aggregator.
pub fn tokenize(line: &str) -> Result<Record<'_>> {
    if line == "end_of_record" {
        return Ok(Record {
            tag: line,
            value: "",
        });
    }
    match line.split_once(':') {
        Some((tag, value)) => Ok(Record { tag, value }),
        None => Err(LcovError::Record(line.to_string())),
    }
}

/// Aggregation state: either no file block is open, or exactly one is.
///
/// A `TN` record seen before any `SF` stages a pending block carried
/// inside `Idle`; only an `SF` record opens the block for file-scoped
/// records.
enum State {
    Idle(Option<FileRecord>),
    InFile(FileRecord),
}

/// Streaming LCOV parser. Consumes lines from a buffered reader and
/// rolls them up into a [`Summary`].
pub struct Parser<R> {
    reader: R,
}

impl<R: BufRead> Parser<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read and parse the entire input.
    ///
    /// Blank lines (after trimming) are skipped. The first format,
    /// sequencing, value, or I/O error aborts the parse. A trailing
    /// file block with no `end_of_record` is dropped, not counted.
    pub fn parse(mut self) -> Result<Summary> {
        let mut summary = Summary::default();
        let mut state = State::Idle(None);

        let mut raw = String::new();
        loop {
            raw.clear();
            if self.reader.read_line(&mut raw)? == 0 {
                break;
            }
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let record = tokenize(line)?;
            state = apply(state, &mut summary, &record)?;
        }

        summary.finish();
        Ok(summary)
    }
}

/// Apply one tokenized record to the state machine.
fn apply(state: State, summary: &mut Summary, record: &Record<'_>) -> Result<State> {
    let kind = match RecordKind::from_tag(record.tag) {
        Some(kind) => kind,
        // Unknown record kinds are skipped for forward compatibility.
        None => return Ok(state),
    };
    let value = record.value;

    match kind {
        RecordKind::TestName => Ok(match state {
            State::Idle(pending) => {
                let mut file = pending.unwrap_or_default();
                file.test_name = value.to_string();
                State::Idle(Some(file))
            }
            State::InFile(mut file) => {
                file.test_name = value.to_string();
                State::InFile(file)
            }
        }),
        RecordKind::SourceFile => Ok(match state {
            State::Idle(pending) => {
                let mut file = pending.unwrap_or_default();
                file.source_file = value.to_string();
                State::InFile(file)
            }
            State::InFile(mut file) => {
                // A second SF renames the open block; it does not close it.
                file.source_file = value.to_string();
                State::InFile(file)
            }
        }),
        RecordKind::EndOfRecord => Ok(match state {
            State::Idle(pending) => State::Idle(pending),
            State::InFile(file) => {
                summary.fold(file);
                State::Idle(None)
            }
        }),
        _ => {
            // Everything else is file-scoped and needs an open block.
            let mut file = match state {
                State::InFile(file) => file,
                State::Idle(_) => return Err(LcovError::Sequence(kind.label())),
            };
            apply_file_record(&mut file, kind, value)?;
            Ok(State::InFile(file))
        }
    }
}

/// Apply a file-scoped record to the open block.
fn apply_file_record(file: &mut FileRecord, kind: RecordKind, value: &str) -> Result<()> {
    match kind {
        RecordKind::LineData => file.lines.push(parse_line_data(value)?),
        RecordKind::LinesFound => file.lines_found = parse_count(value, "lines found value")?,
        RecordKind::LinesHit => file.lines_hit = parse_count(value, "lines hit value")?,
        RecordKind::FunctionName => file.functions.push(parse_function_name(value)?),
        RecordKind::FunctionData => {
            // FNDA records are matched with FN records by name; we only
            // need a tally of functions that executed at least once.
            // Malformed FNDA records are skipped rather than fatal, unlike
            // DA/BRDA — this matches the observed behavior of the format's
            // existing consumers.
            let parts: Vec<&str> = value.split(',').collect();
            if parts.len() == 2 {
                if let Ok(count) = parts[0].parse::<u64>() {
                    if count > 0 {
                        file.functions_hit += 1;
                    }
                }
            }
        }
        RecordKind::BranchData => file.branches.push(parse_branch_data(value)?),
        RecordKind::BranchFound => {
            file.branches_found = parse_count(value, "branches found value")?;
        }
        RecordKind::BranchHit => file.branches_hit = parse_count(value, "branches hit value")?,
        RecordKind::TestName | RecordKind::SourceFile | RecordKind::EndOfRecord => {}
    }
    Ok(())
}

/// Parse a bare integer record payload (LF, LH, BRF, BRH).
fn parse_count(value: &str, field: &'static str) -> Result<u64> {
    value.parse().map_err(|_| LcovError::Value {
        field,
        value: value.to_string(),
    })
}

/// Parse a `DA` payload: `<line>,<count>`, exactly two parts.
fn parse_line_data(value: &str) -> Result<LineEntry> {
    let invalid = || LcovError::Value {
        field: "line data format",
        value: value.to_string(),
    };
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 2 {
        return Err(invalid());
    }
    Ok(LineEntry {
        line_number: parts[0].parse().map_err(|_| invalid())?,
        execution_count: parts[1].parse().map_err(|_| invalid())?,
    })
}

/// Parse an `FN` payload: `<line>,<name>`, split at the first comma so
/// function names may contain commas.
fn parse_function_name(value: &str) -> Result<FunctionEntry> {
    let invalid = || LcovError::Value {
        field: "function name format",
        value: value.to_string(),
    };
    let (line, name) = value.split_once(',').ok_or_else(invalid)?;
    Ok(FunctionEntry {
        start_line: line.parse().map_err(|_| invalid())?,
        name: name.to_string(),
    })
}

/// Parse a `BRDA` payload: `<line>,<block>,<branch>,<taken>` where
/// `<taken>` is an integer or the literal `-` meaning "never evaluated",
/// normalized to 0.
fn parse_branch_data(value: &str) -> Result<BranchEntry> {
    let invalid = || LcovError::Value {
        field: "branch data format",
        value: value.to_string(),
    };
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 4 {
        return Err(invalid());
    }
    let execution_count = if parts[3] == "-" {
        0
    } else {
        parts[3].parse().map_err(|_| invalid())?
    };
    Ok(BranchEntry {
        line_number: parts[0].parse().map_err(|_| invalid())?,
        block_number: parts[1].parse().map_err(|_| invalid())?,
        branch_number: parts[2].parse().map_err(|_| invalid())?,
        execution_count,
    })
}
