//! Site initialization module.
//!
//! Creates new site structure with default configuration.
//!
//! # Module Structure
//!
//! - [`validate`]: Pre-initialization validation
//! - [`structure`]: Directories and starter content
//! - [`config`]: Configuration and ignore files

mod config;
mod structure;
mod validate;

use anyhow::Result;
use std::path::Path;

use crate::{config::SiteConfig, log};

use validate::InitMode;

/// Create a new site with default structure
///
/// # Steps
/// 1. Validate target directory
/// 2. Create directories and starter pages
/// 3. Write configuration and ignore files
///
/// If `dry_run` is true, only lists what would be created and prints the
/// config template to stdout.
pub fn new_site(site_config: &SiteConfig, has_name: bool, dry_run: bool) -> Result<()> {
    let root = &site_config.root;
    validate::validate_target(root, InitMode::from_name(has_name))?;

    if dry_run {
        for path in planned_paths() {
            log!("init"; "would create {}", path);
        }
        print!("{}", config::generate_config_template());
        return Ok(());
    }

    create_site(root, &site_config.root_relative(&site_config.build.output))?;
    log!("init"; "Site initialized in {}", root.display());
    log!("hint"; "run `quill build` to generate the site");
    Ok(())
}

/// Write the whole starter site under `root`.
fn create_site(root: &Path, output_dir: &Path) -> Result<()> {
    structure::create_structure(root)?;
    structure::write_starter_content(root)?;
    config::write_config(root)?;
    config::write_ignore_files(root, output_dir)?;
    Ok(())
}

/// Everything `init` creates, relative to the site root.
fn planned_paths() -> Vec<&'static str> {
    let mut paths = vec![config::CONFIG_FILE];
    paths.extend(structure::SITE_DIRS.iter().copied());
    paths.extend(structure::STARTER_FILES.iter().map(|(path, _)| *path));
    paths.extend(config::IGNORE_FILES.iter().copied());
    paths
}
