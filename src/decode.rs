//! EXIF decoding of downloaded JPEG buffers.
//!
//! Produces an [`ExifContainer`] with two tag groups keyed by numeric tag:
//!
//! | Group | IFD | Examples |
//! |---|---|---|
//! | `zeroth` | IFD0 (primary image, TIFF context) | Make (271), Model (272), Software (305) |
//! | `exif` | Exif sub-IFD | ExposureTime (33434), FNumber (33437), LensModel (42036) |
//!
//! plus the thumbnail JPEG embedded in IFD1 (JPEGInterchangeFormat /
//! JPEGInterchangeFormatLength).
//!
//! Parsing is done by `kamadak-exif`; this module only flattens its fields
//! into the small value model the record builder needs. A JPEG without an
//! EXIF block decodes to an empty container. Anything that is not a
//! recognizable container, or carries a broken EXIF block, is a
//! [`DecodeError`].

use exif::{Context, In, Reader, Tag, Value};
use std::collections::BTreeMap;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("EXIF error: {0}")]
    Exif(#[from] exif::Error),
}

/// The first value of a decoded EXIF field.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// ASCII or UNDEFINED bytes, without the NUL terminator.
    Text(Vec<u8>),
    /// BYTE, SHORT, LONG and their signed variants.
    Integer(i64),
    /// RATIONAL or SRATIONAL.
    Rational { num: i64, denom: i64 },
    /// FLOAT, DOUBLE or an unknown type.
    Other,
}

/// Decoded EXIF groups of one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifContainer {
    pub zeroth: BTreeMap<u16, TagValue>,
    pub exif: BTreeMap<u16, TagValue>,
    pub thumbnail: Option<Vec<u8>>,
}

/// Which tag group a field lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Zeroth,
    Exif,
}

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Section::Zeroth => "0th",
            Section::Exif => "Exif",
        }
    }
}

impl ExifContainer {
    pub fn get(&self, section: Section, tag: u16) -> Option<&TagValue> {
        match section {
            Section::Zeroth => self.zeroth.get(&tag),
            Section::Exif => self.exif.get(&tag),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.zeroth.is_empty() && self.exif.is_empty() && self.thumbnail.is_none()
    }
}

/// Decode the EXIF block of a JPEG (or other EXIF-bearing container) buffer.
pub fn decode(bytes: &[u8]) -> Result<ExifContainer, DecodeError> {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => {
            tracing::debug!("image carries no EXIF block");
            return Ok(ExifContainer::default());
        }
        Err(err) => return Err(err.into()),
    };

    let mut container = ExifContainer::default();
    for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
        let group = match field.tag.context() {
            Context::Tiff => &mut container.zeroth,
            Context::Exif => &mut container.exif,
            _ => continue,
        };
        if let Some(value) = first_value(&field.value) {
            group.insert(field.tag.number(), value);
        }
    }
    container.thumbnail = thumbnail(&exif);

    tracing::debug!(
        zeroth = container.zeroth.len(),
        exif = container.exif.len(),
        thumbnail = container.thumbnail.as_ref().map_or(0, Vec::len),
        "decoded EXIF"
    );
    Ok(container)
}

/// Reduce a (possibly multi-valued) field to its first value.
fn first_value(value: &Value) -> Option<TagValue> {
    let v = match value {
        Value::Ascii(parts) => TagValue::Text(parts.first()?.clone()),
        Value::Undefined(bytes, _) => {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            TagValue::Text(bytes[..end].to_vec())
        }
        Value::Byte(v) => TagValue::Integer(i64::from(*v.first()?)),
        Value::Short(v) => TagValue::Integer(i64::from(*v.first()?)),
        Value::Long(v) => TagValue::Integer(i64::from(*v.first()?)),
        Value::SByte(v) => TagValue::Integer(i64::from(*v.first()?)),
        Value::SShort(v) => TagValue::Integer(i64::from(*v.first()?)),
        Value::SLong(v) => TagValue::Integer(i64::from(*v.first()?)),
        Value::Rational(v) => {
            let r = v.first()?;
            TagValue::Rational {
                num: i64::from(r.num),
                denom: i64::from(r.denom),
            }
        }
        Value::SRational(v) => {
            let r = v.first()?;
            TagValue::Rational {
                num: i64::from(r.num),
                denom: i64::from(r.denom),
            }
        }
        _ => TagValue::Other,
    };
    Some(v)
}

/// Slice the IFD1 thumbnail out of the raw TIFF buffer.
fn thumbnail(exif: &exif::Exif) -> Option<Vec<u8>> {
    let offset = exif
        .get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;
    let len = exif
        .get_field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;

    let buf = exif.buf();
    match offset.checked_add(len) {
        Some(end) if end <= buf.len() && len > 0 => Some(buf[offset..end].to_vec()),
        _ => {
            tracing::warn!(offset, len, "thumbnail range outside EXIF block, ignored");
            None
        }
    }
}
