//! Target directory checks for `quill init`.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Where `init` writes the new site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// `quill init`: the current directory, which must be empty
    CurrentDir,
    /// `quill init <name>`: a new directory, which must not exist yet
    NewDir,
}

impl InitMode {
    pub const fn from_name(has_name: bool) -> Self {
        if has_name { Self::NewDir } else { Self::CurrentDir }
    }
}

/// Refuse to initialize over existing files.
pub fn validate_target(root: &Path, mode: InitMode) -> Result<()> {
    match mode {
        InitMode::CurrentDir if has_entries(root)? => bail!(
            "current directory is not empty\n\
             run `quill init <name>` to create the site in a new directory"
        ),
        InitMode::NewDir if root.exists() => bail!(
            "'{}' already exists\n\
             pick another name or remove it first",
            root.display()
        ),
        _ => Ok(()),
    }
}

fn has_entries(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    let mut entries =
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;
    Ok(entries.next().is_some())
}
