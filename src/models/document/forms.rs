//! Form structures posted by the assign and return pages, and their
//! conversion into validated inputs.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::errors::AppError;
use super::types::{AssignInput, ReturnInput};

/// Accepted `datetime-local` and ISO-8601 shapes, most specific first.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Blank form values count as not submitted.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Like [`non_blank`], but a present value is kept exactly as typed.
pub fn non_blank_verbatim(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

pub fn parse_datetime_input(value: Option<&str>) -> Result<Option<NaiveDateTime>, AppError> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&raw, fmt) {
            return Ok(Some(dt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date.and_time(chrono::NaiveTime::MIN)));
    }
    Err(AppError::InvalidInput(format!("Invalid date/time: {raw}")))
}

pub fn parse_date_input(value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::InvalidInput(format!("Invalid date: {raw}")))
}

#[derive(Debug, Default, Deserialize)]
pub struct AssignForm {
    pub recipient: Option<String>,
    pub distributed_by: Option<String>,
    pub distributed_at: Option<String>,
    pub due_date: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub field1: Option<String>,
    pub field2: Option<String>,
    pub field3: Option<String>,
    pub field4: Option<String>,
    pub field5: Option<String>,
}

impl AssignForm {
    /// Field-level problems to show back on the form.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        if non_blank(self.recipient.as_deref()).is_none() {
            errors.push("配布先は必須です".to_string());
        }
        errors
    }

    /// Convert into an [`AssignInput`]. Call [`AssignForm::validate`] first.
    pub fn to_input(&self) -> Result<AssignInput, AppError> {
        let recipient = non_blank(self.recipient.as_deref())
            .ok_or_else(|| AppError::InvalidInput("recipient is required".to_string()))?;
        let extra = [
            &self.field1,
            &self.field2,
            &self.field3,
            &self.field4,
            &self.field5,
        ];

        Ok(AssignInput {
            recipient,
            distributed_by: non_blank(self.distributed_by.as_deref()),
            distributed_at: parse_datetime_input(self.distributed_at.as_deref())?,
            due_date: parse_date_input(self.due_date.as_deref())?,
            title: non_blank(self.title.as_deref()),
            notes: non_blank(self.notes.as_deref()),
            extra_values: extra.map(|v| non_blank(v.as_deref())),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReturnForm {
    pub returned_by: Option<String>,
    pub returned_at: Option<String>,
    pub notes: Option<String>,
}

impl ReturnForm {
    pub fn to_input(&self) -> Result<ReturnInput, AppError> {
        Ok(ReturnInput {
            returned_by: non_blank(self.returned_by.as_deref()),
            returned_at: parse_datetime_input(self.returned_at.as_deref())?,
            notes: non_blank_verbatim(self.notes.as_deref()),
        })
    }
}
