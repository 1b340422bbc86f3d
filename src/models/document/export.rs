use chrono::NaiveDateTime;
use csv::Writer;

use crate::errors::AppError;
use crate::models::extra_field::build_extra_fields;
use crate::models::setting::AppSettings;
use super::types::Document;

const LEADING_COLUMNS: [&str; 9] = [
    "qr_id",
    "title",
    "recipient",
    "distributed_by",
    "distributed_at",
    "due_date",
    "returned_by",
    "returned_at",
    "status",
];

fn iso_seconds(value: Option<NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Column headers: fixed columns, the five configured labels, then notes.
pub fn csv_header(settings: &AppSettings) -> Vec<String> {
    LEADING_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(build_extra_fields(settings, None).into_iter().map(|f| f.label))
        .chain(std::iter::once("notes".to_string()))
        .collect()
}

/// One CSV record per document. Newlines in notes become spaces.
pub fn csv_row(doc: &Document) -> Vec<String> {
    let mut row = vec![
        doc.qr_id.clone(),
        doc.title.clone().unwrap_or_default(),
        doc.recipient.clone().unwrap_or_default(),
        doc.distributed_by.clone().unwrap_or_default(),
        iso_seconds(doc.distributed_at),
        doc.due_date.map(|d| d.to_string()).unwrap_or_default(),
        doc.returned_by.clone().unwrap_or_default(),
        iso_seconds(doc.returned_at),
        doc.status.as_str().to_string(),
    ];
    row.extend(doc.extra_values.iter().map(|v| v.clone().unwrap_or_default()));
    row.push(
        doc.notes
            .as_deref()
            .unwrap_or_default()
            .replace("\r\n", " ")
            .replace('\n', " "),
    );
    row
}

/// Render every document as CSV text.
pub fn write_csv(settings: &AppSettings, docs: &[Document]) -> Result<String, AppError> {
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(csv_header(settings))?;
    for doc in docs {
        wtr.write_record(csv_row(doc))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
