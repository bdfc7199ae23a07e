//! Writing downloaded images and thumbnails to numbered files.
//!
//! Files are named `{name}.jpg` inside the output directory and silently
//! replace any existing file. A missing buffer (no thumbnail in the EXIF
//! block) is not an error: nothing is written and the caller reports it.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a single save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    Written { file: String, bytes: usize },
    Skipped { file: String },
}

/// File name for a base name: `3` → `3.jpg`, `3_thumb` → `3_thumb.jpg`.
pub fn jpg_name(name: &str) -> String {
    format!("{name}.jpg")
}

/// Write `bytes` to `{dir}/{name}.jpg`, or skip when there are none.
pub fn save_jpg(dir: &Path, name: &str, bytes: Option<&[u8]>) -> Result<Saved, SaveError> {
    let file = jpg_name(name);
    let Some(bytes) = bytes else {
        tracing::debug!(file = %file, "nothing to write");
        return Ok(Saved::Skipped { file });
    };

    let path = dir.join(&file);
    write_all(&path, bytes).map_err(|source| SaveError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "written");

    Ok(Saved::Written {
        file,
        bytes: bytes.len(),
    })
}

fn write_all(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(bytes)?;
    f.flush()
}
