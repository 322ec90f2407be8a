//! Type definitions for pagetally

mod error;
mod range;
mod record;

pub use error::*;
pub use range::*;
pub use record::*;
