//! CLI output formatting for pipeline progress.
//!
//! Output is one header line per image followed by indented detail lines,
//! printed inline as the run progresses:
//!
//! ```text
//! Found 2 gallery images on https://www.example.com/review
//! 001 http://img.example.com/front.jpg
//!     482113 Bytes written to disk as 1.jpg.
//!     5120 Bytes written to disk as 1_thumb.jpg.
//! 002 http://img.example.com/rear.jpg
//!     391020 Bytes written to disk as 2.jpg.
//!     Unable to write file 2_thumb.jpg!
//!     Incomplete EXIF: Lens (Exif:42036) missing
//! Generated ./index.html (2 images)
//! ```
//!
//! [`format_event`] is pure (returns lines) for testability; [`print_event`]
//! writes them to stdout.

use crate::pipeline::RunEvent;
use crate::save::Saved;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

pub fn format_event(event: &RunEvent) -> Vec<String> {
    match event {
        RunEvent::PageScanned { url, image_count } => match image_count {
            0 => vec![format!("No gallery images found on {url}")],
            n => vec![format!("Found {n} gallery images on {url}")],
        },
        RunEvent::ImageFetched { index, url } => {
            vec![format!("{} {}", format_index(*index), url)]
        }
        RunEvent::ImageSkipped { url } => {
            vec![format!("Unable to download {url}, skipped")]
        }
        RunEvent::Saved(Saved::Written { file, bytes }) => {
            vec![format!(
                "{}{bytes} Bytes written to disk as {file}.",
                indent(1)
            )]
        }
        RunEvent::Saved(Saved::Skipped { file }) => {
            vec![format!("{}Unable to write file {file}!", indent(1))]
        }
        RunEvent::MetadataIncomplete { incomplete, .. } => {
            vec![format!("{}Incomplete EXIF: {incomplete}", indent(1))]
        }
        RunEvent::GalleryWritten { path, rows } => {
            let noun = if *rows == 1 { "image" } else { "images" };
            vec![format!("Generated {} ({rows} {noun})", path.display())]
        }
    }
}

pub fn print_event(event: &RunEvent) {
    for line in format_event(event) {
        println!("{}", line);
    }
}
