//! Non-interactive commands run from the shell.

use crate::config::Config;
use crate::error::AppResult;
use crate::export;
use crate::schema::FieldSchema;
use crate::state::StateError;
use crate::store::{FileStorage, Record, RecordList, RecordStore};
use anyhow::Result;
use std::io::Write;
use std::sync::Arc;

/// How `export` prints a record.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// The JSON payload carried by the QR code.
    Json,
    /// QR code for terminals with a dark background.
    QrDark,
    /// QR code for terminals with a light background.
    QrLight,
}

async fn load_records(config: &Config) -> AppResult<(FieldSchema, RecordList)> {
    let schema = Arc::new(FieldSchema::season_2025()?);
    let store = RecordStore::new(FileStorage::new(config.data_dir()?), schema.clone());
    let records = store.try_load().await?;
    Ok(((*schema).clone(), records))
}

/// One line per record, e.g. `1718000000000  Team: 254  Teleop Points: 12`.
///
pub fn format_record_line(schema: &FieldSchema, record: &Record) -> String {
    let mut line = format!(
        "{}  Team: {}",
        record.id().unwrap_or("-"),
        schema.summary_title(record)
    );
    if let Some((label, value)) = schema.summary_detail(record) {
        line.push_str(&format!("  {}: {}", label, value));
    }
    line
}

/// Print every saved record, newest first.
///
pub async fn list(config: &Config) -> Result<()> {
    let (schema, records) = load_records(config).await?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if records.is_empty() {
        writeln!(out, "No forms submitted yet. Go fill one out!")?;
        return Ok(());
    }
    for record in records.iter() {
        writeln!(out, "{}", format_record_line(&schema, record))?;
    }
    Ok(())
}

/// Print one record as a QR code or as its JSON payload.
///
pub async fn export(config: &Config, id: &str, format: ExportFormat) -> Result<()> {
    let (_, records) = load_records(config).await?;
    let record = records
        .find(id)
        .ok_or_else(|| StateError::RecordNotFound { id: id.to_string() })?;
    let output = render_export(record, format)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", output)?;
    Ok(())
}

/// Text printed by `export` for one record.
///
pub fn render_export(record: &Record, format: ExportFormat) -> AppResult<String> {
    let payload = export::encode_record(record)?;
    Ok(match format {
        ExportFormat::Json => payload,
        ExportFormat::QrDark => export::render_qr(&payload)?.render(true).to_string(),
        ExportFormat::QrLight => export::render_qr(&payload)?.render(false).to_string(),
    })
}
