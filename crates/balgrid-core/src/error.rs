// crates/balgrid-core/src/error.rs

use balgrid_parser::LoadError;
use thiserror::Error;

use crate::fill::FillError;
use crate::output::OutputError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to load input: {0}")]
    Load(#[from] LoadError),

    #[error("No valid balance rows remained after cleanup")]
    EmptySeries,

    #[error("Observed span needs {slots} grid slots, more than the limit of {limit}")]
    GridTooLarge { slots: i64, limit: i64 },

    #[error("Gap filling failed: {0}")]
    Fill(#[from] FillError),

    #[error("Failed to write output: {0}")]
    Output(#[from] OutputError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
