//! Path and URL utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem paths (`normalize_path`, `to_slash_relative`)
//! - [`route`]: URL utilities (`is_external_link`, `split_path_suffix`)

pub mod fs;
pub mod route;

pub use fs::{normalize_path, to_slash_relative};
