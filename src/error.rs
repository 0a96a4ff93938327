use thiserror::Error;

#[derive(Error, Debug)]
pub enum LcovError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line that could not be split into a record tag and value.
    #[error("invalid record format: {0}")]
    Record(String),

    /// A file-scoped record seen while no file block was open.
    #[error("{0} without source file")]
    Sequence(&'static str),

    /// A record payload that failed its arity or numeric checks.
    #[error("invalid {field}: {value}")]
    Value { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, LcovError>;
