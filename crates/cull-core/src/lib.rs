pub mod sort;
pub mod types;

pub use sort::{apply_sort, SortMode};
pub use types::*;
