//! Gallery link extraction from a review page.
//!
//! The review page marks each full-resolution image with an anchor carrying
//! the gallery class:
//!
//! ```html
//! <a class="rsImg" href="//images.example.com/review/front.jpg?w=1200&q=80">
//!     <img src="//images.example.com/review/front-small.jpg">
//! </a>
//! ```
//!
//! Each `href` becomes one image URL:
//!
//! 1. Truncate at the first `?` (resizing and tracking parameters).
//! 2. Scheme-relative links (`//host/...`) get the configured scheme prepended.
//! 3. Absolute links are kept; anything else is resolved against the page URL.
//!
//! Anchors without a usable `href` are skipped. Order follows the document.

use reqwest::Url;
use scraper::{Html, Selector};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Invalid gallery selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Finds gallery anchors and turns their links into image URLs.
#[derive(Debug)]
pub struct LinkExtractor {
    selector: Selector,
    scheme: String,
}

impl LinkExtractor {
    /// Build an extractor for anchors with class `gallery_class`.
    ///
    /// `scheme` is given without the trailing colon (`"http"`).
    pub fn new(gallery_class: &str, scheme: &str) -> Result<Self, ScrapeError> {
        let css = format!("a.{gallery_class}");
        let selector = Selector::parse(&css).map_err(|e| ScrapeError::Selector {
            selector: css.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            selector,
            scheme: scheme.to_string(),
        })
    }

    /// Return the image URLs referenced by gallery anchors, in document order.
    ///
    /// An empty vector means the page has no gallery; that is not an error.
    pub fn extract(&self, html: &str, page_url: &Url) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.selector)
            .filter_map(|anchor| {
                let href = anchor.value().attr("href");
                if href.is_none() {
                    tracing::debug!("gallery anchor without href skipped");
                }
                href
            })
            .filter_map(|href| self.normalize(href, page_url))
            .collect()
    }

    /// Strip the query string and give the link a scheme.
    fn normalize(&self, href: &str, page_url: &Url) -> Option<String> {
        let link = strip_query(href.trim());
        if link.is_empty() {
            return None;
        }

        if link.starts_with("//") {
            return Some(format!("{}:{}", self.scheme, link));
        }
        if Url::parse(link).is_ok() {
            return Some(link.to_string());
        }
        match page_url.join(link) {
            Ok(url) => Some(url.to_string()),
            Err(err) => {
                tracing::warn!(href = link, error = %err, "unresolvable gallery link skipped");
                None
            }
        }
    }
}

/// Everything before the first `?`; the whole link when there is none.
fn strip_query(href: &str) -> &str {
    match href.find('?') {
        Some(pos) => &href[..pos],
        None => href,
    }
}
