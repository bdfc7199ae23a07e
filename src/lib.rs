//! # Review Gallery
//!
//! Turns a car-review web page into a local photo gallery. The review page
//! links every full-resolution photo from a gallery anchor; each photo is
//! downloaded, its EXIF block decoded, the photo and its embedded thumbnail
//! saved as numbered JPEGs, and a single `index.html` lists them all with
//! camera, lens and exposure details.
//!
//! # Architecture: One Linear Pass
//!
//! ```text
//! 1. Scrape     review page  →  image URLs        (document order)
//! 2. Fetch      image URL    →  bytes             (200 only, else skipped)
//! 3. Decode     bytes        →  EXIF groups + thumbnail → display record
//! 4. Generate   records      →  N.jpg, N_thumb.jpg, index.html
//! ```
//!
//! There is no state between runs and no concurrency: images are handled one
//! at a time, in page order. [`pipeline::run`] drives the stages and reports
//! progress through a callback, so the whole run is callable from tests.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scrape`] | Stage 1: gallery anchor selection and link normalization |
//! | [`fetch`] | Stage 2: [`fetch::Fetch`] trait and the blocking HTTP client |
//! | [`decode`] | Stage 3: EXIF container decoding (0th / Exif groups, thumbnail) |
//! | [`metadata`] | Stage 3: fixed nine-field display record |
//! | [`save`] | Stage 4: numbered JPEG files |
//! | [`generate`] | Stage 4: `index.html` rendered with Maud |
//! | [`pipeline`] | Runs the stages, owns the failure policy |
//! | [`config`] | Run settings and their defaults |
//! | [`types`] | [`types::GalleryEntry`], shared by pipeline and renderer |
//! | [`output`] | CLI progress formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Fixed Metadata Schema
//!
//! The gallery shows the same nine fields for every image, each read from one
//! EXIF tag. They are a table in [`metadata`], not string keys into a map, and
//! the "stop at the first missing tag" rule is a loop over that table.
//!
//! ## Skip, Don't Guess, on Failed Downloads
//!
//! A download that does not return `200` removes the image from the run. No
//! file is written, no row is rendered, and numbering continues without a gap.
//!
//! ## Maud Over String Concatenation
//!
//! EXIF strings come from whoever produced the photo. Rendering them through
//! [Maud](https://maud.lambda.xyz/) escapes them, so a tag cannot inject
//! markup into the gallery page.

pub mod config;
pub mod decode;
pub mod fetch;
pub mod generate;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod save;
pub mod scrape;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
