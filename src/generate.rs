//! HTML gallery generation.
//!
//! Final stage of the pipeline. Emits a single `index.html` next to the saved
//! images, with one table row per processed image:
//!
//! ```text
//! <tr>
//!   <td><a href="1.jpg"><img src="1_thumb.jpg"></a></td>
//!   <td><ul><li>Make : Canon</li><li>Model : Canon EOS 5D Mark IV</li>…</ul></td>
//! </tr>
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Metadata comes from third-party files, so interpolation being escaped by
//! default matters here: a Software tag of `<script>` renders as text.

use crate::types::GalleryEntry;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INDEX_FILENAME: &str = "index.html";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render and write `index.html`, replacing any existing file.
pub fn generate(
    output_dir: &Path,
    entries: &[GalleryEntry],
    title: &str,
) -> Result<PathBuf, GenerateError> {
    let path = output_dir.join(INDEX_FILENAME);
    let page = render_gallery(entries, title);
    fs::write(&path, page.into_string())?;
    tracing::debug!(path = %path.display(), rows = entries.len(), "gallery written");
    Ok(path)
}

/// Renders the whole gallery document.
pub fn render_gallery(entries: &[GalleryEntry], title: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) }
            }
            body {
                table {
                    tbody {
                        @for entry in entries {
                            (render_row(entry))
                        }
                    }
                }
            }
        }
    }
}

/// Renders one row: linked thumbnail, then the metadata list.
fn render_row(entry: &GalleryEntry) -> Markup {
    html! {
        tr {
            td {
                a href=(entry.image_file()) {
                    img src=(entry.thumb_file());
                }
            }
            td {
                ul {
                    @for (label, value) in entry.record.entries() {
                        li { (label) " : " (value) }
                    }
                }
            }
        }
    }
}
