pub mod document;
pub mod extra_field;
pub mod setting;
