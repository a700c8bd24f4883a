/// Filesystem (CSV) table transport.
pub mod fs;

pub use fs::{load_table, save_table};
