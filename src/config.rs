//! Run configuration.
//!
//! There is no config file: every setting comes from a command-line flag and
//! falls back to the defaults below.
//!
//! ```text
//! output_dir     = "."           # receives N.jpg, N_thumb.jpg, index.html
//! gallery_class  = "rsImg"       # class marking gallery anchors
//! scheme         = "http"        # prepended to scheme-relative links
//! title          = "My Webpage"  # <title> of the generated page
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory that receives the images and `index.html`.
    pub output_dir: PathBuf,
    /// Class attribute that marks a gallery anchor on the review page.
    pub gallery_class: String,
    /// Scheme prepended to scheme-relative (`//host/...`) links, without the colon.
    pub scheme: String,
    /// Page title of the generated gallery.
    pub title: String,
}

pub const DEFAULT_GALLERY_CLASS: &str = "rsImg";
pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_TITLE: &str = "My Webpage";

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            gallery_class: DEFAULT_GALLERY_CLASS.to_string(),
            scheme: DEFAULT_SCHEME.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl Config {
    /// Validate values that would otherwise fail deep inside the pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let class = self.gallery_class.trim();
        if class.is_empty() {
            return Err(ConfigError::Validation(
                "gallery class must not be empty".into(),
            ));
        }
        if class.contains(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "gallery class must be a single class name, got '{class}'"
            )));
        }
        if !is_valid_scheme(&self.scheme) {
            return Err(ConfigError::Validation(format!(
                "scheme must look like 'http' or 'https', got '{}'",
                self.scheme
            )));
        }
        Ok(())
    }
}

/// RFC 3986: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}
