pub mod pathway;
pub mod queries;
pub mod types;

pub use pathway::*;
pub use queries::*;
pub use types::*;
