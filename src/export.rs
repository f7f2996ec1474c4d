//! Record export.
//!
//! A record is handed over to another device as a QR code holding the record
//! serialized to JSON, uncompressed. The same payload can be copied to the
//! clipboard when a camera is not at hand.

use crate::store::Record;
use clipboard::{ClipboardContext, ClipboardProvider};
use log::*;
use qrcode::render::unicode::Dense1x2;
use qrcode::{EcLevel, QrCode};

/// Errors that can occur while exporting a record.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The record could not be serialized
    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    /// The payload does not fit in a QR code
    #[error("Failed to build QR code: {0}")]
    Render(String),

    /// The system clipboard could not be reached
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// A QR code ready to be drawn in a terminal.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrImage {
    width: usize,
    normal: String,
    inverted: String,
}

impl QrImage {
    /// Number of modules along one side, quiet zone excluded.
    ///
    pub fn width(&self) -> usize {
        self.width
    }

    /// Half-block rendering, two module rows per text line. Dark modules are
    /// drawn as filled cells unless `inverted` is set, which suits terminals
    /// with a dark background.
    ///
    pub fn render(&self, inverted: bool) -> &str {
        if inverted {
            &self.inverted
        } else {
            &self.normal
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.normal.lines().map(str::to_string).collect()
    }
}

fn draw(code: &QrCode, dark: Dense1x2, light: Dense1x2) -> String {
    code.render::<Dense1x2>()
        .dark_color(dark)
        .light_color(light)
        .quiet_zone(true)
        .build()
}

/// Serialize a record, id included, to the JSON payload carried by its QR
/// code.
///
pub fn encode_record(record: &Record) -> Result<String, ExportError> {
    Ok(serde_json::to_string(record)?)
}

/// Build the QR code for a payload. Pure function of its input.
///
/// Uses the lowest error correction level to keep the code small enough for
/// a terminal window.
///
pub fn render_qr(payload: &str) -> Result<QrImage, ExportError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    Ok(QrImage {
        width: code.width(),
        normal: draw(&code, Dense1x2::Dark, Dense1x2::Light),
        inverted: draw(&code, Dense1x2::Light, Dense1x2::Dark),
    })
}

/// Encode a record and build its QR code in one step.
///
pub fn export_record(record: &Record) -> Result<(String, QrImage), ExportError> {
    let payload = encode_record(record)?;
    let image = render_qr(&payload)?;
    debug!(
        "Exported record {:?} as {} byte payload ({} modules wide)",
        record.id(),
        payload.len(),
        image.width()
    );
    Ok((payload, image))
}

/// Place text on the system clipboard.
///
pub fn copy_to_clipboard(text: &str) -> Result<(), ExportError> {
    let mut context: ClipboardContext =
        ClipboardProvider::new().map_err(|e| ExportError::Clipboard(e.to_string()))?;
    context
        .set_contents(text.to_string())
        .map_err(|e| ExportError::Clipboard(e.to_string()))
}
