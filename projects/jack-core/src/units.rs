use jack_emit::OutputFormat;
use jack_types::{JackError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Extension of Jack source files.
pub const SOURCE_EXTENSION: &str = "jack";

/// Resolves the source units named by `path`: a file is one unit; a
/// directory contributes each `.jack` file directly inside it, in path order.
pub fn collect_units(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(JackError::io(path, "no such file or directory"));
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut units = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| JackError::io(path, e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|s| s.to_str()) == Some(SOURCE_EXTENSION) {
            units.push(entry.into_path());
        } else {
            debug!("skipping {}", entry.path().display());
        }
    }
    Ok(units)
}

/// Where the artifacts of one unit go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub tree: PathBuf,
    pub tokens: PathBuf,
}

impl OutputPaths {
    /// `<stem>.<ext>` and `<stem>T.<ext>`, inside `out_dir` or next to the source.
    pub fn for_unit(source: &Path, out_dir: Option<&Path>, format: OutputFormat) -> Self {
        let stem = source.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        let dir = match out_dir {
            Some(dir) => dir.to_path_buf(),
            None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        let ext = format.extension();
        Self {
            tree: dir.join(format!("{}.{}", stem, ext)),
            tokens: dir.join(format!("{}T.{}", stem, ext)),
        }
    }
}
