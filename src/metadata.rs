//! Display metadata built from decoded EXIF tags.
//!
//! Every gallery row lists the same nine fields, read from fixed tags:
//!
//! | # | Field | Tag | Display |
//! |---|---|---|---|
//! | 1 | Make | 0th:271 | text |
//! | 2 | Model | 0th:272 | text |
//! | 3 | Lens | Exif:42036 | text |
//! | 4 | Focal length | Exif:37386 | `50.0 mm` |
//! | 5 | Depth of Field | Exif:33437 | `f/2.8` |
//! | 6 | Exposure | Exif:33434 | `1/250 sec` |
//! | 7 | ISO | Exif:34855 | `ISO 400` |
//! | 8 | Date/Time | Exif:36867 | text |
//! | 9 | Software | 0th:305 | text |
//!
//! ## Stop on first missing tag
//!
//! Fields are filled in table order. The first tag that is absent (or holds a
//! value that cannot be displayed) ends population: the record keeps the
//! fields before it, drops everything after it, and remembers where it
//! stopped so the caller can report it. A record therefore always holds a
//! prefix of the table.

use crate::decode::{ExifContainer, Section, TagValue};
use std::fmt;

/// One of the nine gallery metadata fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Make,
    Model,
    Lens,
    FocalLength,
    DepthOfField,
    Exposure,
    Iso,
    DateTime,
    Software,
}

impl Field {
    /// Label shown in the gallery bullet list.
    pub fn label(self) -> &'static str {
        match self {
            Field::Make => "Make",
            Field::Model => "Model",
            Field::Lens => "Lens",
            Field::FocalLength => "Focal length",
            Field::DepthOfField => "Depth of Field",
            Field::Exposure => "Exposure",
            Field::Iso => "ISO",
            Field::DateTime => "Date/Time",
            Field::Software => "Software",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct FieldSpec {
    field: Field,
    section: Section,
    tag: u16,
    format: fn(&TagValue) -> Option<String>,
}

#[rustfmt::skip]
static FIELDS: [FieldSpec; 9] = [
    FieldSpec { field: Field::Make, section: Section::Zeroth, tag: 271, format: text },
    FieldSpec { field: Field::Model, section: Section::Zeroth, tag: 272, format: text },
    FieldSpec { field: Field::Lens, section: Section::Exif, tag: 42036, format: text },
    FieldSpec { field: Field::FocalLength, section: Section::Exif, tag: 37386, format: focal_length },
    FieldSpec { field: Field::DepthOfField, section: Section::Exif, tag: 33437, format: f_number },
    FieldSpec { field: Field::Exposure, section: Section::Exif, tag: 33434, format: exposure },
    FieldSpec { field: Field::Iso, section: Section::Exif, tag: 34855, format: iso },
    FieldSpec { field: Field::DateTime, section: Section::Exif, tag: 36867, format: text },
    FieldSpec { field: Field::Software, section: Section::Zeroth, tag: 305, format: text },
];

/// All fields in display order.
pub fn fields() -> impl Iterator<Item = Field> {
    FIELDS.iter().map(|spec| spec.field)
}

/// Why population of a record stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The tag is not in the EXIF block.
    Missing,
    /// The tag is present but its value has the wrong type or a zero divisor.
    Unreadable,
}

/// Where and why a record stopped being filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incomplete {
    pub field: Field,
    pub section: Section,
    pub tag: u16,
    pub reason: StopReason,
}

impl fmt::Display for Incomplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.reason {
            StopReason::Missing => "missing",
            StopReason::Unreadable => "unreadable",
        };
        write!(
            f,
            "{} ({}:{}) {}",
            self.field,
            self.section.name(),
            self.tag,
            what
        )
    }
}

/// Display-ready metadata of one image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExifRecord {
    pub make: Option<String>,
    pub model: Option<String>,
    pub lens: Option<String>,
    pub focal_length: Option<String>,
    pub depth_of_field: Option<String>,
    pub exposure: Option<String>,
    pub iso: Option<String>,
    pub date_time: Option<String>,
    pub software: Option<String>,
    /// Set when population stopped before the last field.
    pub incomplete: Option<Incomplete>,
}

impl ExifRecord {
    /// Build the record from decoded EXIF, stopping at the first missing tag.
    pub fn from_container(container: &ExifContainer) -> Self {
        let mut record = Self::default();

        for spec in &FIELDS {
            let reason = match container.get(spec.section, spec.tag) {
                None => StopReason::Missing,
                Some(value) => match (spec.format)(value) {
                    Some(display) => {
                        *record.slot_mut(spec.field) = Some(display);
                        continue;
                    }
                    None => StopReason::Unreadable,
                },
            };

            let incomplete = Incomplete {
                field: spec.field,
                section: spec.section,
                tag: spec.tag,
                reason,
            };
            tracing::debug!(%incomplete, "EXIF record stopped early");
            record.incomplete = Some(incomplete);
            break;
        }

        record
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::Make => &self.make,
            Field::Model => &self.model,
            Field::Lens => &self.lens,
            Field::FocalLength => &self.focal_length,
            Field::DepthOfField => &self.depth_of_field,
            Field::Exposure => &self.exposure,
            Field::Iso => &self.iso,
            Field::DateTime => &self.date_time,
            Field::Software => &self.software,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Make => &mut self.make,
            Field::Model => &mut self.model,
            Field::Lens => &mut self.lens,
            Field::FocalLength => &mut self.focal_length,
            Field::DepthOfField => &mut self.depth_of_field,
            Field::Exposure => &mut self.exposure,
            Field::Iso => &mut self.iso,
            Field::DateTime => &mut self.date_time,
            Field::Software => &mut self.software,
        }
    }

    /// Populated `(label, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        fields()
            .filter_map(|field| self.get(field).map(|value| (field.label(), value)))
            .collect()
    }

    pub fn len(&self) -> usize {
        fields().filter(|&field| self.get(field).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.incomplete.is_none()
    }
}

// ---------------------------------------------------------------------------
// Formatters
// ---------------------------------------------------------------------------

fn text(value: &TagValue) -> Option<String> {
    match value {
        TagValue::Text(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

fn focal_length(value: &TagValue) -> Option<String> {
    quotient(value).map(|q| format!("{q} mm"))
}

fn f_number(value: &TagValue) -> Option<String> {
    quotient(value).map(|q| format!("f/{q}"))
}

fn exposure(value: &TagValue) -> Option<String> {
    match value {
        TagValue::Rational { num, denom } => Some(format!("{num}/{denom} sec")),
        _ => None,
    }
}

fn iso(value: &TagValue) -> Option<String> {
    match value {
        TagValue::Integer(v) => Some(format!("ISO {v}")),
        _ => None,
    }
}

/// `num / denom` as a decimal that always shows a fractional part (`50.0`, `2.8`).
fn quotient(value: &TagValue) -> Option<String> {
    match value {
        TagValue::Rational { num, denom } if *denom != 0 => {
            Some(format!("{:?}", *num as f64 / *denom as f64))
        }
        _ => None,
    }
}
