use chrono::{NaiveDate, NaiveDateTime};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::models::extra_field::EXTRA_FIELD_COUNT;

/// Where a document is in its distribute/return cycle.
///
/// Stored as free text; values written by other tools survive as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentStatus {
    New,
    Assigned,
    Returned,
    Other(String),
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 3] = [Self::New, Self::Assigned, Self::Returned];

    /// Map a stored column value, keeping unrecognised text as is.
    pub fn from_stored(value: &str) -> Self {
        Self::from_filter(value).unwrap_or_else(|| Self::Other(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "new",
            Self::Assigned => "assigned",
            Self::Returned => "returned",
            Self::Other(raw) => raw,
        }
    }

    /// Caption shown in the UI.
    pub fn label(&self) -> &str {
        match self {
            Self::New => "未配布",
            Self::Assigned => "配布中",
            Self::Returned => "返却済",
            Self::Other(raw) => raw,
        }
    }

    /// Parse a list filter value. Anything other than the three known statuses yields `None`.
    pub fn from_filter(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Percent-encode a QR ID for use as a single URL path segment.
pub fn qr_path_segment(qr_id: &str) -> String {
    urlencoding::encode(qr_id).into_owned()
}

/// One physical document, keyed by the payload of its QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    pub qr_id: String,
    pub title: Option<String>,
    pub recipient: Option<String>,
    pub distributed_by: Option<String>,
    pub distributed_at: Option<NaiveDateTime>,
    pub due_date: Option<NaiveDate>,
    pub extra_values: [Option<String>; EXTRA_FIELD_COUNT],
    pub returned_by: Option<String>,
    pub returned_at: Option<NaiveDateTime>,
    pub status: DocumentStatus,
    pub notes: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for Document {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            qr_id: row.try_get("qr_id")?,
            title: row.try_get("title")?,
            recipient: row.try_get("recipient")?,
            distributed_by: row.try_get("distributed_by")?,
            distributed_at: row.try_get("distributed_at")?,
            due_date: row.try_get("due_date")?,
            extra_values: [
                row.try_get("field1_value")?,
                row.try_get("field2_value")?,
                row.try_get("field3_value")?,
                row.try_get("field4_value")?,
                row.try_get("field5_value")?,
            ],
            returned_by: row.try_get("returned_by")?,
            returned_at: row.try_get("returned_at")?,
            status: DocumentStatus::from_stored(row.try_get::<&str, _>("status")?),
            notes: row.try_get("notes")?,
        })
    }
}

/// Distribution details to record against a QR ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignInput {
    pub recipient: String,
    pub distributed_by: Option<String>,
    /// `None` means "now".
    pub distributed_at: Option<NaiveDateTime>,
    pub due_date: Option<NaiveDate>,
    /// `None` keeps the existing title.
    pub title: Option<String>,
    pub notes: Option<String>,
    pub extra_values: [Option<String>; EXTRA_FIELD_COUNT],
}

/// Return details for a previously distributed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnInput {
    pub returned_by: Option<String>,
    /// `None` means "now".
    pub returned_at: Option<NaiveDateTime>,
    /// Appended to any existing notes.
    pub notes: Option<String>,
}

/// Per-status totals for the landing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub new: i64,
    pub assigned: i64,
    pub returned: i64,
    /// Rows whose status is none of the three above.
    pub other: i64,
}

impl StatusCounts {
    pub fn total(&self) -> i64 {
        self.new + self.assigned + self.returned + self.other
    }
}
