//! Shared test utilities.
//!
//! Builds synthetic JPEG buffers with a real EXIF block (so the decoder runs
//! against `kamadak-exif` rather than a mock) and provides an in-memory
//! [`FakeFetcher`] for driving the pipeline without a network.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let jpeg = ExifFixture::complete().without(37386).to_jpeg();
//! let fetcher = FakeFetcher::default()
//!     .page("https://example.com/review", &gallery_page(&["//img/1.jpg"]))
//!     .image("http://img/1.jpg", jpeg);
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::decode::{ExifContainer, TagValue};
use crate::fetch::{Fetch, FetchError};

// =========================================================================
// Synthetic EXIF / JPEG
// =========================================================================

/// A TIFF field value as written into a fixture.
#[derive(Debug, Clone)]
pub enum TiffValue {
    Ascii(String),
    Short(u16),
    Long(u32),
    Rational(u32, u32),
    Undefined(Vec<u8>),
}

impl TiffValue {
    /// `(type, count, little-endian bytes)`
    fn encode(&self) -> (u16, u32, Vec<u8>) {
        match self {
            TiffValue::Ascii(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                (2, bytes.len() as u32, bytes)
            }
            TiffValue::Short(v) => (3, 1, v.to_le_bytes().to_vec()),
            TiffValue::Long(v) => (4, 1, v.to_le_bytes().to_vec()),
            TiffValue::Rational(num, denom) => {
                let mut bytes = num.to_le_bytes().to_vec();
                bytes.extend_from_slice(&denom.to_le_bytes());
                (5, 1, bytes)
            }
            TiffValue::Undefined(bytes) => (7, bytes.len() as u32, bytes.clone()),
        }
    }
}

fn ascii(s: &str) -> TiffValue {
    TiffValue::Ascii(s.to_string())
}

/// Tags for IFD0, the Exif sub-IFD, and an optional IFD1 thumbnail.
#[derive(Debug, Clone)]
pub struct ExifFixture {
    pub zeroth: Vec<(u16, TiffValue)>,
    pub exif: Vec<(u16, TiffValue)>,
    pub thumbnail: Option<Vec<u8>>,
}

const EXIF_IFD_POINTER: u16 = 34665;
const JPEG_INTERCHANGE_FORMAT: u16 = 513;
const JPEG_INTERCHANGE_FORMAT_LENGTH: u16 = 514;

impl ExifFixture {
    /// All nine gallery tags plus a small thumbnail.
    pub fn complete() -> Self {
        Self {
            zeroth: vec![
                (271, ascii("Canon")),
                (272, ascii("Canon EOS 5D Mark IV")),
                (305, ascii("Adobe Lightroom")),
            ],
            exif: vec![
                (33434, TiffValue::Rational(1, 250)),
                (33437, TiffValue::Rational(28, 10)),
                (34855, TiffValue::Short(400)),
                (36867, ascii("2019:05:04 10:11:12")),
                (37386, TiffValue::Rational(50, 1)),
                (42036, ascii("EF50mm f/1.8 STM")),
            ],
            thumbnail: Some(fake_jpeg_payload(b"thumbnail")),
        }
    }

    /// Drop a tag from whichever group holds it.
    pub fn without(mut self, tag: u16) -> Self {
        self.zeroth.retain(|(t, _)| *t != tag);
        self.exif.retain(|(t, _)| *t != tag);
        self
    }

    /// Replace (or add) an Exif sub-IFD tag.
    pub fn with_exif(mut self, tag: u16, value: TiffValue) -> Self {
        self.exif.retain(|(t, _)| *t != tag);
        self.exif.push((tag, value));
        self
    }

    /// Little-endian TIFF block: header, IFD0, Exif IFD, IFD1, thumbnail.
    pub fn to_tiff(&self) -> Vec<u8> {
        let mut ifd0 = self.zeroth.clone();
        if !self.exif.is_empty() {
            ifd0.push((EXIF_IFD_POINTER, TiffValue::Long(0)));
        }
        let mut ifd1 = Vec::new();
        if let Some(thumb) = &self.thumbnail {
            ifd1.push((JPEG_INTERCHANGE_FORMAT, TiffValue::Long(0)));
            ifd1.push((JPEG_INTERCHANGE_FORMAT_LENGTH, TiffValue::Long(thumb.len() as u32)));
        }

        // Sizes do not depend on offsets, so lay out with placeholders first.
        let ifd0_start = 8u32;
        let exif_start = ifd0_start + encode_ifd(&ifd0, 0, 0).len() as u32;
        let exif_len = if self.exif.is_empty() {
            0
        } else {
            encode_ifd(&self.exif, 0, 0).len() as u32
        };
        let ifd1_start = exif_start + exif_len;
        let thumb_start = ifd1_start + encode_ifd(&ifd1, 0, 0).len() as u32;

        set_long(&mut ifd0, EXIF_IFD_POINTER, exif_start);
        set_long(&mut ifd1, JPEG_INTERCHANGE_FORMAT, thumb_start);

        let next_ifd = if ifd1.is_empty() { 0 } else { ifd1_start };

        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"II");
        tiff.extend_from_slice(&42u16.to_le_bytes());
        tiff.extend_from_slice(&ifd0_start.to_le_bytes());
        tiff.extend(encode_ifd(&ifd0, ifd0_start, next_ifd));
        if !self.exif.is_empty() {
            tiff.extend(encode_ifd(&self.exif, exif_start, 0));
        }
        if let Some(thumb) = &self.thumbnail {
            tiff.extend(encode_ifd(&ifd1, ifd1_start, 0));
            tiff.extend_from_slice(thumb);
        }
        tiff
    }

    /// A JPEG whose APP1 segment carries [`Self::to_tiff`].
    pub fn to_jpeg(&self) -> Vec<u8> {
        let tiff = self.to_tiff();
        let mut payload = b"Exif\0\0".to_vec();
        payload.extend(tiff);

        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
        jpeg.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        jpeg.extend(payload);
        jpeg.extend_from_slice(&[0xFF, 0xD9]);
        jpeg
    }
}

fn set_long(entries: &mut [(u16, TiffValue)], tag: u16, value: u32) {
    if let Some((_, v)) = entries.iter_mut().find(|(t, _)| *t == tag) {
        *v = TiffValue::Long(value);
    }
}

/// Encode one IFD starting at `start`, with out-of-line values after it.
fn encode_ifd(entries: &[(u16, TiffValue)], start: u32, next_ifd: u32) -> Vec<u8> {
    let mut sorted: Vec<&(u16, TiffValue)> = entries.iter().collect();
    sorted.sort_by_key(|(tag, _)| *tag);

    let data_start = start + 2 + 12 * sorted.len() as u32 + 4;
    let mut head = Vec::new();
    let mut data = Vec::new();

    head.extend_from_slice(&(sorted.len() as u16).to_le_bytes());
    for (tag, value) in sorted {
        let (typ, count, mut bytes) = value.encode();
        head.extend_from_slice(&tag.to_le_bytes());
        head.extend_from_slice(&typ.to_le_bytes());
        head.extend_from_slice(&count.to_le_bytes());
        if bytes.len() <= 4 {
            bytes.resize(4, 0);
            head.extend(bytes);
        } else {
            head.extend_from_slice(&(data_start + data.len() as u32).to_le_bytes());
            data.extend(bytes);
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    head.extend_from_slice(&next_ifd.to_le_bytes());
    head.extend(data);
    head
}

/// Bytes that look like a tiny JPEG stream (SOI … EOI).
pub fn fake_jpeg_payload(marker: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8];
    bytes.extend_from_slice(marker);
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes
}

/// A JFIF-only JPEG with no EXIF block.
pub fn jpeg_without_exif() -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    jpeg.extend_from_slice(b"JFIF\0");
    jpeg.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// The decoded form of [`ExifFixture::complete`], without going through bytes.
pub fn complete_container() -> ExifContainer {
    let text = |s: &str| TagValue::Text(s.as_bytes().to_vec());
    let rational = |num, denom| TagValue::Rational { num, denom };
    ExifContainer {
        zeroth: BTreeMap::from([
            (271, text("Canon")),
            (272, text("Canon EOS 5D Mark IV")),
            (305, text("Adobe Lightroom")),
        ]),
        exif: BTreeMap::from([
            (33434, rational(1, 250)),
            (33437, rational(28, 10)),
            (34855, TagValue::Integer(400)),
            (36867, text("2019:05:04 10:11:12")),
            (37386, rational(50, 1)),
            (42036, text("EF50mm f/1.8 STM")),
        ]),
        thumbnail: Some(fake_jpeg_payload(b"thumbnail")),
    }
}

// =========================================================================
// Review page markup
// =========================================================================

/// A review page with one gallery anchor per href.
pub fn gallery_page(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a class="rsImg" href="{href}"><img src="small.jpg"></a>"#))
        .collect();
    format!(
        "<!DOCTYPE html><html><head><title>Review</title></head>\
         <body><div class=\"royalSlider\">{anchors}</div></body></html>"
    )
}

// =========================================================================
// In-memory fetcher
// =========================================================================

/// Serves canned responses. URLs without a response yield `None` (like a 404).
#[derive(Debug, Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Vec<u8>>,
}

impl FakeFetcher {
    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.responses
            .insert(url.to_string(), html.as_bytes().to_vec());
        self
    }

    pub fn image(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.responses.insert(url.to_string(), bytes);
        self
    }
}

impl Fetch for FakeFetcher {
    fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>, FetchError> {
        Ok(self.responses.get(url).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_ifd_places_long_values_after_entries() {
        let entries = vec![(271, ascii("Canon"))];
        let ifd = encode_ifd(&entries, 8, 0);
        // count(2) + entry(12) + next(4) + "Canon\0"(6)
        assert_eq!(ifd.len(), 24);
        let offset = u32::from_le_bytes([ifd[10], ifd[11], ifd[12], ifd[13]]);
        assert_eq!(offset, 8 + 18);
        assert_eq!(&ifd[18..24], b"Canon\0");
    }

    #[test]
    fn short_values_are_inline() {
        let ifd = encode_ifd(&[(34855, TiffValue::Short(400))], 8, 0);
        assert_eq!(ifd.len(), 18);
        assert_eq!(u16::from_le_bytes([ifd[10], ifd[11]]), 400);
    }

    #[test]
    fn jpeg_segment_length_covers_payload() {
        let jpeg = ExifFixture::complete().to_jpeg();
        let seg_len = u16::from_be_bytes([jpeg[4], jpeg[5]]) as usize;
        // SOI(2) + marker(2) + segment + EOI(2)
        assert_eq!(jpeg.len(), 2 + 2 + seg_len + 2);
        assert_eq!(&jpeg[6..12], b"Exif\0\0");
    }
}
