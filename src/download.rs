//! Builds the "download your mandala" link.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose;
use chrono::{DateTime, TimeZone};
use image::{DynamicImage, ImageFormat};

use crate::constants::{DOWNLOAD_LINK_TEXT, DOWNLOAD_PREFIX, DOWNLOAD_TIMESTAMP_FORMAT};
use crate::error::GenerationError;

/// `mandala_<YYYYMMDD_HHMMSS>.png` for the given moment.
pub fn download_filename<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{DOWNLOAD_PREFIX}_{}.png",
        timestamp.format(DOWNLOAD_TIMESTAMP_FORMAT)
    )
}

/// Encodes the bitmap as PNG.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, GenerationError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(encoding_failed)?;
    Ok(buffer.into_inner())
}

fn encoding_failed(err: image::ImageError) -> GenerationError {
    GenerationError::Encode(format!("PNG encoding failed: {err}"))
}

/// An image embedded as a data URI, plus the name the browser saves it as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadLink {
    /// Suggested filename
    pub filename: String,
    /// `data:image/png;base64,...`
    pub data_uri: String,
}

impl DownloadLink {
    /// The anchor element.
    pub fn markup(&self) -> String {
        format!(
            r#"<a href="{}" download="{}">📥 {}</a>"#,
            self.data_uri,
            html_escape::encode_double_quoted_attribute(&self.filename),
            DOWNLOAD_LINK_TEXT
        )
    }
}

/// Encodes the image and wraps it up as a downloadable link.
pub fn build_download_link(
    image: &DynamicImage,
    filename: &str,
) -> Result<DownloadLink, GenerationError> {
    let png = encode_png(image)?;
    Ok(DownloadLink {
        filename: filename.to_string(),
        data_uri: format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(png)
        ),
    })
}
