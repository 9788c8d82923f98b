//! All-or-nothing writing of a run's output files.
//!
//! Every output is first written to a temporary file in its destination
//! directory, so a failed write never leaves a truncated file behind. Only
//! when all of them are staged are they renamed into place. If a rename
//! fails, the outputs already moved are removed again.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

/// Write `outputs` (destination path and contents) as a unit.
///
/// On error no destination written by this call is left on disk.
pub fn write_all(outputs: &[(PathBuf, &[u8])]) -> io::Result<()> {
    let mut staged = Vec::with_capacity(outputs.len());
    for (path, bytes) in outputs {
        let mut file = NamedTempFile::new_in(parent_dir(path))?;
        file.write_all(bytes)?;
        file.flush()?;
        staged.push((file, path));
    }

    let mut persisted: Vec<&Path> = Vec::with_capacity(staged.len());
    for (file, path) in staged {
        if let Err(err) = file.persist(path) {
            roll_back(&persisted);
            return Err(err.error);
        }
        persisted.push(path);
    }
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn roll_back(persisted: &[&Path]) {
    for path in persisted {
        if let Err(err) = std::fs::remove_file(path) {
            warn!(path = %path.display(), %err, "Could not remove partial output");
        }
    }
}
