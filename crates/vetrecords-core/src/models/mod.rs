//! Domain models for the clinic records store.

mod clinical_file;
mod ids;
mod lifecycle;
mod owner;
mod pet;
mod treatment;
mod veterinarian;
mod visit;

pub use clinical_file::*;
pub use ids::*;
pub use lifecycle::{RecordState, SoftDelete};
pub use owner::*;
pub use pet::*;
pub use treatment::*;
pub use veterinarian::*;
pub use visit::*;
