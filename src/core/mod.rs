//! Core types - pure abstractions shared across the codebase.

mod category;
mod link;
mod relative;
mod url;

pub use category::ContentKind;
pub use link::LinkKind;
pub use relative::relativize;
pub use url::BasePath;
