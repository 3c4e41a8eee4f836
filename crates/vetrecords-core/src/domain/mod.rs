//! Domain errors and the relationship checks that raise them.

mod error;
mod rules;

pub use error::*;
pub use rules::*;
