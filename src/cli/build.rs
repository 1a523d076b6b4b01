//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Init** - Clear the output directory with `--clean`
//! - **Collect** - Partition content into pages and static assets
//! - **Load** - Front matter, output paths, drafts (parallel)
//! - **Expand** - Plugin page expansion: multilingual, then blog
//! - **Render** - Markup and layout (parallel)
//! - **Pipeline** - Post-render transforms, relative URLs last (parallel)
//! - **Write** - Pages and assets (parallel), then plugin output such as the feed

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::{Context, Result, anyhow, bail};
use rayon::prelude::*;

use crate::{
    asset::copy_asset,
    compiler::{
        ContentFiles,
        load::load_pages,
        render::Renderer,
        write::{check_conflicts, write_page},
    },
    config::SiteConfig,
    debug, log,
    logger::ProgressLine,
    page::Page,
    plugins::{BuildContext, build_pipeline, enabled_plugins},
    utils::plural::plural_count,
};

/// What a build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Pages written, generated ones included.
    pub pages: usize,
    /// Assets copied; fresh outputs are not counted.
    pub assets_copied: usize,
    pub drafts_skipped: usize,
}

/// Build the entire site.
///
/// Pipeline: init -> collect -> load -> expand -> render -> pipeline -> write -> finish
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<BuildReport> {
    init_output(config)?;

    if !config.build.base_path.is_root() {
        debug!("build"; "site mounted at {}", config.build.base_path);
    }

    let files = ContentFiles::collect(config);
    debug!(
        "build";
        "{} and {} in {}",
        plural_count(files.pages.len(), "page source"),
        plural_count(files.assets.len(), "asset"),
        config.root_relative(&config.build.content).display()
    );

    let loaded = load_pages(&files.pages, config)?;
    if !quiet && loaded.drafts_skipped > 0 {
        log!("build"; "{} skipped", plural_count(loaded.drafts_skipped, "draft"));
    }
    let mut pages = loaded.pages;

    // Expand
    let ctx = BuildContext::new(config);
    let plugins = enabled_plugins(config);
    for plugin in &plugins {
        plugin
            .expand(&mut pages, &ctx)
            .with_context(|| format!("plugin `{}` failed", plugin.name()))?;
        debug!("plugin"; "{}: {}", plugin.name(), plural_count(pages.len(), "page"));
    }
    check_conflicts(&pages)?;

    // Render
    let renderer = Renderer::new(config)?;
    pages.par_iter_mut().for_each(|page| renderer.render(page));

    // Post-render pipeline
    let pipeline = build_pipeline(&plugins);
    if !pipeline.is_empty() {
        debug!("pipeline"; "{}", pipeline.names().join(" -> "));
    }
    pipeline.run(&mut pages);

    // Write
    let progress = (!quiet).then(|| {
        ProgressLine::new(&[("pages", pages.len()), ("assets", files.assets.len())])
    });
    let has_error = AtomicBool::new(false);
    let (pages_result, assets_result) = rayon::join(
        || write_pages(&pages, config, &has_error, progress.as_ref()),
        || copy_assets(&files.assets, config, &has_error, progress.as_ref()),
    );
    pages_result?;
    let assets_copied = assets_result?;
    if let Some(p) = progress {
        p.finish();
    }

    for plugin in &plugins {
        plugin
            .finish(&pages, &ctx)
            .with_context(|| format!("plugin `{}` failed", plugin.name()))?;
    }

    let report = BuildReport {
        pages: pages.len(),
        assets_copied,
        drafts_skipped: loaded.drafts_skipped,
    };
    if !quiet {
        log_build_result(config, &report);
    }
    Ok(report)
}

/// Prepare the output directory, clearing it first with `--clean`.
fn init_output(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;

    if config.build.clean && output.exists() {
        // Never wipe the project or its sources
        if *output == config.root || config.build.content.starts_with(output) {
            bail!(
                "refusing to clean output directory {}: it contains the project sources",
                output.display()
            );
        }
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Write every page in parallel, stopping at the first failure.
fn write_pages(
    pages: &[Page],
    config: &SiteConfig,
    has_error: &AtomicBool,
    progress: Option<&ProgressLine>,
) -> Result<()> {
    pages.par_iter().try_for_each(|page| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        if let Err(e) = write_page(page, &config.build.output) {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", page.output_path, e);
            }
            return Err(anyhow!("Build failed"));
        }
        if let Some(p) = progress {
            p.inc("pages");
        }
        Ok(())
    })
}

/// Copy static assets in parallel, stopping at the first failure.
///
/// Returns how many files were copied.
fn copy_assets(
    files: &[PathBuf],
    config: &SiteConfig,
    has_error: &AtomicBool,
    progress: Option<&ProgressLine>,
) -> Result<usize> {
    let copied = AtomicUsize::new(0);
    files.par_iter().try_for_each(|path| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        match copy_asset(path, config, config.build.clean) {
            Ok(true) => {
                copied.fetch_add(1, Ordering::Relaxed);
            }
            Ok(false) => {}
            Err(e) => {
                if !has_error.swap(true, Ordering::Relaxed) {
                    log!("error"; "{}: {:#}", path.display(), e);
                }
                return Err(anyhow!("Build failed"));
            }
        }
        if let Some(p) = progress {
            p.inc("assets");
        }
        Ok(())
    })?;
    Ok(copied.into_inner())
}

fn log_build_result(config: &SiteConfig, report: &BuildReport) {
    if report.pages == 0 {
        log!(
            "warn";
            "no pages built, check that {} has .md or .html files",
            config.root_relative(&config.build.content).display()
        );
        return;
    }
    log!(
        "build";
        "done: {}, {} copied to {}",
        plural_count(report.pages, "page"),
        plural_count(report.assets_copied, "asset"),
        config.root_relative(&config.build.output).display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    fn site(root: &Path, extra: &str) -> SiteConfig {
        let mut config = test_parse_config(extra);
        config.root = root.to_path_buf();
        config.build.content = root.join("content");
        config.build.output = root.join("_site");
        config.build.base_path =
            crate::core::BasePath::from_location(config.site.location.as_deref());
        config
    }

    fn read(root: &Path, rel: &str) -> String {
        fs::read_to_string(root.join("_site").join(rel))
            .unwrap_or_else(|e| panic!("{rel}: {e}"))
    }

    #[test]
    fn test_build_writes_relative_links() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "content/index.md", "# Home\n\n[About](/about/) ![cat](/static/cat.png)");
        write(root, "content/about.md", "---\ntitle: About\n---\n[Home](/)");
        write(
            root,
            "content/posts/hello.md",
            "+++\ntitle = \"Hello\"\ndate = 2024-01-02\ntags = [\"rust\"]\n+++\n[About](/about/#team)",
        );
        write(root, "content/static/cat.png", "png");

        let config = site(root, "location = \"https://example.com/docs/\"");
        let report = build_site(&config, true).unwrap();

        // index, about, hello, archive, archive/rust
        assert_eq!(report.pages, 5);
        assert_eq!(report.assets_copied, 1);

        let index = read(root, "index.html");
        assert!(index.contains("href=\"about/\""), "{index}");
        assert!(index.contains("src=\"static/cat.png\""), "{index}");

        let about = read(root, "about/index.html");
        assert!(about.contains("href=\"../\""), "{about}");

        let hello = read(root, "posts/hello/index.html");
        assert!(hello.contains("href=\"../../about/#team\""), "{hello}");

        let archive = read(root, "archive/index.html");
        assert!(archive.contains("href=\"../posts/hello/\""), "{archive}");
        assert!(archive.contains("href=\"rust/\""), "{archive}");

        assert_eq!(read(root, "static/cat.png"), "png");

        let feed = read(root, "feed.xml");
        assert!(feed.contains("<link>https://example.com/docs/posts/hello/</link>"));
    }

    #[test]
    fn test_build_multilingual_alternates() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "content/about.md",
            "+++\ntitle = \"About\"\nlang = [\"en\", \"gl\"]\n[gl]\ntitle = \"Sobre\"\n+++\n[Home](/)",
        );

        let config = site(root, "languages = [\"en\", \"gl\"]");
        build_site(&config, true).unwrap();

        let en = read(root, "about/index.html");
        assert!(en.contains("<html lang=\"en\">"), "{en}");
        assert!(en.contains("hreflang=\"gl\" href=\"../gl/about/\""), "{en}");

        let gl = read(root, "gl/about/index.html");
        assert!(gl.contains("<title>Sobre - Test</title>"), "{gl}");
        assert!(gl.contains("hreflang=\"en\" href=\"../../about/\""), "{gl}");
        assert!(gl.contains("href=\"../../\""), "{gl}");
    }

    #[test]
    fn test_build_without_relative_urls_keeps_absolute() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "content/a.md", "[b](/b/)");

        let config = site(root, "[plugins]\nrelative_urls = false");
        build_site(&config, true).unwrap();
        assert!(read(root, "a/index.html").contains("href=\"/b/\""));
    }

    #[test]
    fn test_conflicting_output_paths_fail() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "content/a.md", "---\nurl: /same/\n---\n");
        write(root, "content/b.md", "---\nurl: /same/\n---\n");

        let config = site(root, "");
        let err = build_site(&config, true).unwrap_err();
        assert!(format!("{err:#}").contains("/same/index.html"));
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "content/index.md", "# Home");
        write(root, "_site/stale.html", "old");

        let mut config = site(root, "");
        build_site(&config, true).unwrap();
        assert!(root.join("_site/stale.html").exists());

        config.build.clean = true;
        build_site(&config, true).unwrap();
        assert!(!root.join("_site/stale.html").exists());
        assert!(root.join("_site/index.html").exists());
    }

    #[test]
    fn test_clean_refuses_project_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "content/index.md", "# Home");

        let mut config = site(root, "");
        config.build.output = root.to_path_buf();
        config.build.clean = true;
        assert!(build_site(&config, true).is_err());
        assert!(root.join("content/index.md").exists());
    }
}
