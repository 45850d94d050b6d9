use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub mod error;
pub mod outline;


pub use error::OutlineError;
pub use outline::{RenderOptions, Structure};

/// Directories never worth descending into
const IGNORED_DIRS: &[&str] = &[
    "__pycache__",
    ".git",
    ".hg",
    ".tox",
    ".venv",
    "venv",
    ".mypy_cache",
    ".pytest_cache",
    "node_modules",
    "build",
    "dist",
];

/// Result of outlining one source, serializable for `--json`
#[derive(Debug, Serialize)]
pub struct OutlineResult {
    pub path: Option<String>,
    pub outline: String,
    pub structure: Structure,
    pub original_lines: usize,
    pub outline_lines: usize,
}

/// Outline Python source text
pub fn outline_source(content: &str, options: RenderOptions) -> Result<OutlineResult, OutlineError> {
    let structure = outline::outline_structure(content)?;
    let text = outline::render_with(&structure, options);

    Ok(OutlineResult {
        path: None,
        original_lines: content.lines().count(),
        outline_lines: text.lines().count(),
        outline: text,
        structure,
    })
}

/// Read and outline a single file
pub fn outline_file(path: &Path, options: RenderOptions) -> Result<OutlineResult, OutlineError> {
    if !path.exists() {
        return Err(OutlineError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|e| OutlineError::io(path, e))?;

    let mut result = outline_source(&content, options)?;
    result.path = Some(path.to_string_lossy().to_string());
    Ok(result)
}

/// Batch outline multiple files in parallel, keeping input order
pub fn outline_files(
    paths: &[PathBuf],
    options: RenderOptions,
) -> Vec<Result<OutlineResult, OutlineError>> {
    paths
        .par_iter()
        .map(|path| {
            let result = outline_file(path, options);
            if let Err(err) = &result {
                warn!(path = %path.display(), error = %err, "failed to outline file");
            }
            result
        })
        .collect()
}

/// Find Python sources under `root`, sorted by path
pub fn scan_project(root: &Path) -> Result<Vec<PathBuf>, OutlineError> {
    if !root.exists() {
        return Err(OutlineError::NotFound(root.to_path_buf()));
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(true)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !IGNORED_DIRS.contains(&name.as_ref())
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();
                let is_python = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map_or(false, outline::is_python_extension);
                if path.is_file() && is_python {
                    files.push(path.to_path_buf());
                }
            }
            Err(err) => warn!(error = %err, "error walking path"),
        }
    }

    files.sort();
    debug!(root = %root.display(), files = files.len(), "scanned project");
    Ok(files)
}
