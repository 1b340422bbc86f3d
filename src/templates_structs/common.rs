use askama::Template;

use crate::models::document::StatusCounts;
use crate::models::extra_field::LabelField;

use super::PageContext;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub ctx: PageContext,
    pub counts: StatusCounts,
}

#[derive(Template)]
#[template(path = "scan.html")]
pub struct ScanTemplate {
    pub ctx: PageContext,
    /// `assign` or `return`.
    pub mode: String,
}

impl ScanTemplate {
    /// Coerce the requested mode; anything unrecognised becomes `assign`.
    pub fn for_mode(requested: Option<&str>) -> Self {
        let mode = match requested {
            Some("return") => "return",
            _ => "assign",
        };
        Self {
            ctx: PageContext::new("/scan"),
            mode: mode.to_string(),
        }
    }

    pub fn is_return(&self) -> bool {
        self.mode == "return"
    }
}

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub ctx: PageContext,
    pub label_fields: Vec<LabelField>,
    pub saved: bool,
}

#[derive(Template)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate {
    pub ctx: PageContext,
}
