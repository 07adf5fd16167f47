pub mod errors;
pub mod loader;
pub mod model;

pub use errors::LoadError;
pub use loader::{is_summary_row, load_path, load_reader};
pub use model::{LoadedTable, LoaderOptions, RawRow, BALANCE_COLUMN, DATETIME_COLUMN};
