pub mod cookies;
pub mod error;

pub use error::*;
