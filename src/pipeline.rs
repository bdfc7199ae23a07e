//! The end-to-end run: review page → images → EXIF → files → `index.html`.
//!
//! ```text
//! fetch page ─▶ extract links ─▶ for each link, in document order:
//!                                    fetch ─▶ decode ─▶ save N.jpg, N_thumb.jpg ─▶ record
//!                                ─▶ render index.html
//! ```
//!
//! Everything runs sequentially on the calling thread. Progress is reported
//! through a callback as [`RunEvent`]s; the CLI prints them with
//! [`crate::output::print_event`], tests collect them.
//!
//! ## Failure policy
//!
//! | Situation | Effect |
//! |---|---|
//! | no gallery anchors | run ends after extraction, nothing written |
//! | image fetch is not `200` | image skipped entirely (no files, no row) |
//! | EXIF block malformed | fatal, [`RunError::Decode`] |
//! | tag missing | partial record kept, [`RunEvent::MetadataIncomplete`] |
//! | no embedded thumbnail | thumbnail write skipped, row kept |
//!
//! Numbering counts processed images only, so files stay `1..=M` even when
//! some downloads are skipped.

use crate::config::{Config, ConfigError};
use crate::decode::{DecodeError, decode};
use crate::fetch::{Fetch, FetchError, HttpFetcher};
use crate::generate::{GenerateError, generate};
use crate::metadata::{ExifRecord, Incomplete};
use crate::save::{SaveError, Saved, save_jpg};
use crate::scrape::{LinkExtractor, ScrapeError};
use crate::types::GalleryEntry;
use reqwest::Url;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Invalid review URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
    #[error("Review page {0} returned no data")]
    PageUnavailable(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error("Generate failed: {0}")]
    Generate(#[from] GenerateError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Progress reported while a run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    PageScanned { url: String, image_count: usize },
    ImageFetched { index: usize, url: String },
    ImageSkipped { url: String },
    Saved(Saved),
    MetadataIncomplete { index: usize, incomplete: Incomplete },
    GalleryWritten { path: PathBuf, rows: usize },
}

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunResult {
    pub entries: Vec<GalleryEntry>,
    /// Image URLs whose fetch returned no data.
    pub skipped: Vec<String>,
    /// Written gallery page; `None` when the page had no gallery images.
    pub index: Option<PathBuf>,
}

/// Run against the network with the default HTTP client.
pub fn run(
    url: &str,
    config: &Config,
    on_event: impl FnMut(&RunEvent),
) -> Result<RunResult, RunError> {
    let fetcher = HttpFetcher::new()?;
    run_with_fetcher(&fetcher, url, config, on_event)
}

/// Run with a specific fetcher (allows testing without a network).
pub fn run_with_fetcher(
    fetcher: &impl Fetch,
    url: &str,
    config: &Config,
    mut on_event: impl FnMut(&RunEvent),
) -> Result<RunResult, RunError> {
    config.validate()?;
    let page_url = Url::parse(url).map_err(|e| RunError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    let extractor = LinkExtractor::new(&config.gallery_class, &config.scheme)?;

    let page = fetcher
        .fetch(page_url.as_str())?
        .ok_or_else(|| RunError::PageUnavailable(page_url.to_string()))?;
    let html = String::from_utf8_lossy(&page);
    let image_urls = extractor.extract(&html, &page_url);

    on_event(&RunEvent::PageScanned {
        url: page_url.to_string(),
        image_count: image_urls.len(),
    });

    let mut result = RunResult::default();
    if image_urls.is_empty() {
        return Ok(result);
    }

    std::fs::create_dir_all(&config.output_dir)?;

    for image_url in image_urls {
        let Some(bytes) = fetcher.fetch(&image_url)? else {
            on_event(&RunEvent::ImageSkipped {
                url: image_url.clone(),
            });
            result.skipped.push(image_url);
            continue;
        };

        let index = result.entries.len() + 1;
        on_event(&RunEvent::ImageFetched {
            index,
            url: image_url.clone(),
        });

        let container = decode(&bytes)?;

        let entry = GalleryEntry {
            index,
            url: image_url,
            record: ExifRecord::from_container(&container),
        };

        let saved = save_jpg(&config.output_dir, &entry.image_name(), Some(&bytes))?;
        on_event(&RunEvent::Saved(saved));
        let saved = save_jpg(
            &config.output_dir,
            &entry.thumb_name(),
            container.thumbnail.as_deref(),
        )?;
        on_event(&RunEvent::Saved(saved));

        if let Some(incomplete) = &entry.record.incomplete {
            on_event(&RunEvent::MetadataIncomplete {
                index,
                incomplete: incomplete.clone(),
            });
        }

        result.entries.push(entry);
    }

    let path = generate(&config.output_dir, &result.entries, &config.title)?;
    on_event(&RunEvent::GalleryWritten {
        path: path.clone(),
        rows: result.entries.len(),
    });
    result.index = Some(path);

    Ok(result)
}
