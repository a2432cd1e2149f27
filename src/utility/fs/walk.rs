// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use flume::bounded;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;
use wax::{Glob, Program};

/// Options for parallel directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Options for scanning a model output directory.
    ///
    /// Trained models are usually gitignored, so ignore files are not
    /// consulted. Python caches and notebook checkpoints are skipped.
    #[must_use]
    pub fn for_artifacts() -> Self {
        Self::builder()
            .with_respect_gitignore(false)
            .with_skip_dirs(vec![
                "__pycache__".to_string(),
                ".ipynb_checkpoints".to_string(),
                ".git".to_string(),
            ])
            .build()
    }
}

/// Result of a parallel walk operation.
#[derive(Debug)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.ignore(options.respect_gitignore());

    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Some(name) = entry.file_name().to_str()
                && skip_dirs.iter().any(|skip| skip == name)
            {
                return false;
            }
            true
        });
    }

    builder
}

/// Performs parallel directory traversal using `ignore::WalkParallel`.
///
/// Results are collected through bounded flume channels and sorted, so the
/// output order does not depend on thread scheduling.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use aqi_runner::utility::fs::walk::{parallel_walk, WalkOptions};
///
/// let result = parallel_walk("modeling/models", &WalkOptions::for_artifacts())?;
/// println!("Found {} files", result.files().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parallel_walk<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<WalkResult> {
    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let (file_tx, file_rx) = bounded::<PathBuf>(1000);
    let (dir_tx, dir_rx) = bounded::<PathBuf>(1000);
    let error_count = Arc::new(AtomicUsize::new(0));

    let parallel = build_walker(root, options).build_parallel();

    // Receivers must drain while the walk runs or the bounded channels fill up.
    let (files, directories) = std::thread::scope(|scope| {
        let files = scope.spawn(|| file_rx.iter().collect::<Vec<_>>());
        let directories = scope.spawn(|| dir_rx.iter().collect::<Vec<_>>());

        parallel.run(|| {
            let file_tx = file_tx.clone();
            let dir_tx = dir_tx.clone();
            let error_count = Arc::clone(&error_count);

            Box::new(move |entry_result| {
                match entry_result {
                    Ok(entry) => {
                        let path = entry.path();
                        if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                            let _ = dir_tx.send(path.to_path_buf());
                        } else if entry.file_type().is_some_and(|ft| ft.is_file()) {
                            let _ = file_tx.send(path.to_path_buf());
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "walk error");
                        error_count.fetch_add(1, Ordering::Relaxed);
                    }
                }
                ignore::WalkState::Continue
            })
        });

        drop(file_tx);
        drop(dir_tx);

        (
            files.join().unwrap_or_default(),
            directories.join().unwrap_or_default(),
        )
    });

    let mut files = files;
    let mut directories = directories;
    files.sort();
    directories.sort();

    Ok(WalkResult {
        files,
        directories,
        error_count: error_count.load(Ordering::Relaxed),
    })
}

/// Finds files under `root` whose path relative to `root` matches a glob.
///
/// # Errors
///
/// Returns an error if the root directory does not exist or the glob is invalid.
pub fn find_files<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    let result = parallel_walk(root, options)?;
    Ok(result
        .files()
        .iter()
        .filter(|path| {
            path.strip_prefix(root)
                .is_ok_and(|relative| glob.is_match(relative))
        })
        .cloned()
        .collect())
}
