pub mod assign;
pub mod detail;
pub mod export;
pub mod list;
pub mod returns;

pub use assign::{assign_form, assign_save};
pub use detail::detail;
pub use export::export_csv;
pub use list::list;
pub use returns::{return_form, return_save};
