//! Types shared between the pipeline and the gallery renderer.

use crate::metadata::ExifRecord;
use crate::save::jpg_name;

/// One processed image: where it came from, where it was saved, what it says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    /// 1-based position among processed images; also the file number.
    pub index: usize,
    /// Source URL the image was downloaded from.
    pub url: String,
    pub record: ExifRecord,
}

impl GalleryEntry {
    /// Base name of the full image, without extension (`"3"`).
    pub fn image_name(&self) -> String {
        self.index.to_string()
    }

    /// Base name of the thumbnail, without extension (`"3_thumb"`).
    pub fn thumb_name(&self) -> String {
        format!("{}_thumb", self.index)
    }

    /// `3.jpg`
    pub fn image_file(&self) -> String {
        jpg_name(&self.image_name())
    }

    /// `3_thumb.jpg`
    pub fn thumb_file(&self) -> String {
        jpg_name(&self.thumb_name())
    }
}
