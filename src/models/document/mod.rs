pub mod export;
pub mod forms;
pub mod queries;
pub mod types;

pub use forms::*;
pub use queries::*;
pub use types::*;
