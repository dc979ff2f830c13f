pub mod constraint;
pub mod model;

pub use model::{Model, Snapshot};
