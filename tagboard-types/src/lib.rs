pub mod models;
pub mod reports;

pub use models::*;
pub use reports::*;
