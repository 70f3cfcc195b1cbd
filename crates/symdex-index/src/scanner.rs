//! Source-tree file scanner.
//!
//! Walks a directory with the `ignore` crate so gitignore-style rules
//! apply, layers a fixed exclusion set and a binary-extension denylist on
//! top, and caps file size. Returns absolute paths, sorted, so repeated
//! scans of an unchanged tree are byte-for-byte deterministic.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use symdex_core::SymdexError;

/// Files larger than this are skipped outright (generated bundles,
/// minified artifacts, vendored blobs).
pub const MAX_FILE_SIZE: u64 = 1_048_576;

/// Directories never descended into, regardless of ignore files.
const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "target",
    "dist",
    "build",
    "out",
    "__pycache__",
    ".venv",
    "venv",
    ".tox",
    "vendor",
    ".idea",
    ".vscode",
    "coverage",
];

/// Extensions that never contain extractable source.
const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "svg", "pdf", "zip", "tar", "gz", "bz2",
    "xz", "7z", "exe", "dll", "so", "dylib", "a", "o", "obj", "class", "jar", "war", "pyc", "bin",
    "dat", "db", "sqlite", "woff", "woff2", "ttf", "eot", "otf", "mp3", "mp4", "avi", "mov",
    "wav", "flac", "wasm", "lock",
];

/// Scan a source tree for candidate files.
///
/// Respects the project's `.gitignore` even without a `.git` directory.
pub fn scan(root: &Path) -> Result<Vec<PathBuf>, SymdexError> {
    let root = if root.is_absolute() {
        root.to_path_buf()
    } else {
        std::env::current_dir()?.join(root)
    };
    if !root.is_dir() {
        return Err(SymdexError::Scan(format!(
            "Not a directory: {}",
            root.display()
        )));
    }

    let walker = WalkBuilder::new(&root)
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !(entry.file_type().is_some_and(|ft| ft.is_dir())
                && EXCLUDED_DIRS.contains(&name.as_ref()))
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!("Walk error: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if BINARY_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
                continue;
            }
        }

        match entry.metadata() {
            Ok(meta) if meta.len() > MAX_FILE_SIZE => {
                tracing::debug!("Skipping oversized file {}", path.display());
                continue;
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!("Failed to stat {}: {}", path.display(), err);
                continue;
            }
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
