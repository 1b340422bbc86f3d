//! The five generic value slots on a document and their configurable captions.
//!
//! Slot `n` (1-based) is stored in `documents.field{n}_value`, posted as form
//! field `field{n}`, and captioned by `app_settings.field{n}_label`. Every view
//! that shows the slots goes through [`build_extra_fields`] so that labels and
//! values line up the same way in forms, tables and the CSV export.

use crate::models::document::Document;
use crate::models::setting::AppSettings;

pub const EXTRA_FIELD_COUNT: usize = 5;

/// Caption shown for slot `idx` when no label has been configured.
pub fn default_label(idx: usize) -> String {
    format!("項目{idx}")
}

/// One extra-field slot, resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraField {
    pub index: usize,
    pub label: String,
    /// Form input name (`field1`..`field5`).
    pub name: String,
    pub value: String,
}

/// An editable label on the settings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelField {
    pub index: usize,
    pub name: String,
    pub value: String,
    pub placeholder: String,
}

/// Resolve the configured label for slot `idx`, falling back to the positional default.
pub fn resolve_label(settings: &AppSettings, idx: usize) -> String {
    settings
        .labels
        .get(idx - 1)
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_label(idx))
}

pub fn build_extra_fields(settings: &AppSettings, doc: Option<&Document>) -> Vec<ExtraField> {
    (1..=EXTRA_FIELD_COUNT)
        .map(|idx| ExtraField {
            index: idx,
            label: resolve_label(settings, idx),
            name: format!("field{idx}"),
            value: doc
                .and_then(|d| d.extra_values[idx - 1].clone())
                .unwrap_or_default(),
        })
        .collect()
}

pub fn build_label_fields(settings: &AppSettings) -> Vec<LabelField> {
    (1..=EXTRA_FIELD_COUNT)
        .map(|idx| LabelField {
            index: idx,
            name: format!("field{idx}_label"),
            value: resolve_label(settings, idx),
            placeholder: default_label(idx),
        })
        .collect()
}
