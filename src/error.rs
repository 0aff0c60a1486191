use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("table dimensions must be positive (got {rows} rows, {cols} columns)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("column index {index} out of range for table with {columns} columns")]
    IndexOutOfRange { index: usize, columns: usize },

    #[error("table already complete ({capacity} cells written)")]
    TableComplete { capacity: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
