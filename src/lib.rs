pub mod cs;
pub mod error;
pub mod input;

pub use cs::dynamic;
pub use error::{Error, Result};
