//! Output and staging path derivation.

use std::path::{Path, PathBuf};

/// `{parent}/{stem}{suffix}.{target_ext}` next to the source.
///
/// Only the last extension is replaced: `a.tar.csv` becomes
/// `a.tar_converted.json`.
pub fn derive_output_path(source: &Path, suffix: &str, target_ext: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = format!("{}{}.{}", stem, suffix, target_ext);
    match source.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Hidden sibling that handlers write to before the rename into place.
pub(crate) fn staging_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    output.with_file_name(format!(".{}.partial", name))
}
