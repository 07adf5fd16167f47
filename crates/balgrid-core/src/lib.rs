pub mod config;
pub mod error;
pub mod fill;
pub mod grid;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod series;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{process_file, PipelineOutput, PipelineReport};
pub use series::{BalanceSeries, Record};
