//! Configuration section definitions.
//!
//! Each module corresponds to a section in `quill.toml`:
//!
//! | Module    | TOML Section  | Purpose                               |
//! |-----------|---------------|---------------------------------------|
//! | `build`   | `[build]`     | Content/output paths, static copy     |
//! | `plugins` | `[plugins]`   | Relative URLs, multilingual, blog     |
//! | `site`    | `[site]`      | Metadata, location, languages         |

mod build;
mod plugins;
mod site;

pub use build::BuildSectionConfig;
pub use plugins::{BlogConfig, PluginsConfig};
pub use site::SiteSectionConfig;
