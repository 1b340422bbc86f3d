// Template context structures for askama templates, organized by page group.
// All types are re-exported: `use qr_linker::templates_structs::*`

mod common;
mod document;

pub use self::common::{IndexTemplate, NotFoundTemplate, ScanTemplate, SettingsTemplate};
pub use self::document::{
    AssignFormTemplate, DetailTemplate, DocumentView, ListTemplate, ReturnFormTemplate,
    StatusOption,
};

pub const APP_NAME: &str = "QR Linker";

/// Context shared by every page: app name and the active nav entry.
pub struct PageContext {
    pub app_name: String,
    pub current_path: String,
}

impl PageContext {
    pub fn new(current_path: &str) -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            current_path: current_path.to_string(),
        }
    }

    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path
    }
}
