use askama::Template;
use chrono::NaiveDateTime;

use crate::models::document::{AssignForm, Document, DocumentStatus, qr_path_segment};
use crate::models::extra_field::{ExtraField, build_extra_fields};
use crate::models::setting::AppSettings;

use super::PageContext;

fn display_seconds(value: Option<NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Value for a `datetime-local` input.
fn input_seconds(value: Option<NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// A document flattened to display strings.
#[derive(Debug, Clone)]
pub struct DocumentView {
    pub qr_id: String,
    /// `qr_id` encoded for `/detail/{..}`-style links.
    pub path_id: String,
    pub title: String,
    pub recipient: String,
    pub distributed_by: String,
    pub distributed_at: String,
    pub due_date: String,
    pub returned_by: String,
    pub returned_at: String,
    pub status: String,
    pub status_label: String,
    pub notes: String,
    pub extra_fields: Vec<ExtraField>,
    /// Lower-cased text the list page's client-side `q` filter matches against.
    pub search_text: String,
}

impl DocumentView {
    pub fn new(doc: &Document, settings: &AppSettings) -> Self {
        let title = doc.title.clone().unwrap_or_default();
        let recipient = doc.recipient.clone().unwrap_or_default();
        let search_text = format!("{} {} {}", doc.qr_id, title, recipient).to_lowercase();
        Self {
            qr_id: doc.qr_id.clone(),
            path_id: qr_path_segment(&doc.qr_id),
            title,
            recipient,
            distributed_by: doc.distributed_by.clone().unwrap_or_default(),
            distributed_at: display_seconds(doc.distributed_at),
            due_date: doc.due_date.map(|d| d.to_string()).unwrap_or_default(),
            returned_by: doc.returned_by.clone().unwrap_or_default(),
            returned_at: display_seconds(doc.returned_at),
            status: doc.status.as_str().to_string(),
            status_label: doc.status.label().to_string(),
            notes: doc.notes.clone().unwrap_or_default(),
            extra_fields: build_extra_fields(settings, Some(doc)),
            search_text,
        }
    }
}

#[derive(Template)]
#[template(path = "documents/assign_form.html")]
pub struct AssignFormTemplate {
    pub ctx: PageContext,
    pub qr_id: String,
    pub exists: bool,
    pub status_label: String,
    pub title: String,
    pub recipient: String,
    pub distributed_by: String,
    pub distributed_value: String,
    pub due_value: String,
    pub notes: String,
    pub extra_fields: Vec<ExtraField>,
    pub errors: Vec<String>,
}

impl AssignFormTemplate {
    /// Form pre-filled from the stored document, if any.
    pub fn new(qr_id: &str, doc: Option<&Document>, settings: &AppSettings) -> Self {
        let text = |value: Option<&String>| value.cloned().unwrap_or_default();
        Self {
            ctx: PageContext::new("/scan"),
            qr_id: qr_id.to_string(),
            exists: doc.is_some(),
            status_label: doc
                .map(|d| d.status.label())
                .unwrap_or(DocumentStatus::New.label())
                .to_string(),
            title: text(doc.and_then(|d| d.title.as_ref())),
            recipient: text(doc.and_then(|d| d.recipient.as_ref())),
            distributed_by: text(doc.and_then(|d| d.distributed_by.as_ref())),
            distributed_value: input_seconds(doc.and_then(|d| d.distributed_at)),
            due_value: doc
                .and_then(|d| d.due_date)
                .map(|d| d.to_string())
                .unwrap_or_default(),
            notes: text(doc.and_then(|d| d.notes.as_ref())),
            extra_fields: build_extra_fields(settings, doc),
            errors: vec![],
        }
    }

    /// Form re-filled from a rejected submission.
    pub fn from_submission(
        qr_id: &str,
        doc: Option<&Document>,
        settings: &AppSettings,
        form: &AssignForm,
        errors: Vec<String>,
    ) -> Self {
        let submitted = |v: &Option<String>| v.clone().unwrap_or_default();
        let values = [&form.field1, &form.field2, &form.field3, &form.field4, &form.field5];
        let mut extra_fields = build_extra_fields(settings, None);
        for (field, value) in extra_fields.iter_mut().zip(values) {
            field.value = submitted(value);
        }

        Self {
            title: submitted(&form.title),
            recipient: submitted(&form.recipient),
            distributed_by: submitted(&form.distributed_by),
            distributed_value: submitted(&form.distributed_at),
            due_value: submitted(&form.due_date),
            notes: submitted(&form.notes),
            extra_fields,
            errors,
            ..Self::new(qr_id, doc, settings)
        }
    }
}

#[derive(Template)]
#[template(path = "documents/return_form.html")]
pub struct ReturnFormTemplate {
    pub ctx: PageContext,
    pub doc: DocumentView,
}

/// One choice in the list page's status filter.
pub struct StatusOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl StatusOption {
    pub fn all(selected: Option<&DocumentStatus>) -> Vec<Self> {
        DocumentStatus::ALL
            .into_iter()
            .map(|s| Self {
                value: s.as_str().to_string(),
                label: s.label().to_string(),
                selected: selected == Some(&s),
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "documents/list.html")]
pub struct ListTemplate {
    pub ctx: PageContext,
    pub docs: Vec<DocumentView>,
    pub labels: Vec<String>,
    pub search_query: String,
    pub status_options: Vec<StatusOption>,
    pub any_status: bool,
}

#[derive(Template)]
#[template(path = "documents/detail.html")]
pub struct DetailTemplate {
    pub ctx: PageContext,
    pub doc: DocumentView,
}
